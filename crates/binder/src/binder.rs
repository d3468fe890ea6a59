use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bindery_invocation::{Host, HostError, Invocation, MemberRef};
use bindery_primitives::{TypeHandle, Value};
use bindery_registry::{
	Candidate, Field, Imported, MemberRegistry, NamespaceScanner, RegistryError, TypeCatalog,
};
use tracing::{debug, trace};

use crate::coerce::{coerce_argument, coerce_arguments};
use crate::config::BinderConfig;
use crate::error::{BindError, Result};
use crate::memo::{MemoKey, ResolutionMemo};
use crate::resolve::{Receiver, Resolver};

/// Resolution context: the member registry, the host that executes selected
/// members, and the settings that steer resolution.
///
/// All methods take `&self`; a `Binder` can be shared across threads.
pub struct Binder {
	registry: MemberRegistry,
	host: Arc<dyn Host>,
	scanner: Option<Arc<dyn NamespaceScanner>>,
	recast_decimals: AtomicBool,
	memoize: bool,
	require_imports: bool,
	memo: ResolutionMemo,
}

impl fmt::Debug for Binder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Binder")
			.field("registry", &self.registry)
			.field("config", &self.config())
			.field("memoized", &self.memo.len())
			.finish_non_exhaustive()
	}
}

impl Binder {
	pub fn new(catalog: Arc<dyn TypeCatalog>, host: Arc<dyn Host>) -> Self {
		Self {
			registry: MemberRegistry::new(catalog),
			host,
			scanner: None,
			recast_decimals: AtomicBool::new(true),
			memoize: true,
			require_imports: false,
			memo: ResolutionMemo::default(),
		}
	}

	pub fn with_config(mut self, config: BinderConfig) -> Self {
		self.recast_decimals = AtomicBool::new(config.recast_decimals);
		self.memoize = config.memoize;
		self.require_imports = config.require_imports;
		self
	}

	/// Enables [`Binder::import`].
	pub fn with_scanner(mut self, scanner: Arc<dyn NamespaceScanner>) -> Self {
		self.scanner = Some(scanner);
		self
	}

	pub fn registry(&self) -> &MemberRegistry {
		&self.registry
	}

	/// Current settings, including the live decimal toggle.
	pub fn config(&self) -> BinderConfig {
		BinderConfig {
			recast_decimals: self.recasting_decimals(),
			memoize: self.memoize,
			require_imports: self.require_imports,
		}
	}

	/// Registers the types named by an import string (`pkg.Type`, `pkg.*`,
	/// `pkg.Outer.Inner`).
	pub fn import(&self, import: &str) -> Result<Imported> {
		let scanner = self
			.scanner
			.as_deref()
			.ok_or_else(|| RegistryError::NoScanner(import.to_string()))?;
		Ok(self.registry.import(scanner, import)?)
	}

	/// Turns magnitude-based reclassification of decimal arguments on or off.
	/// Takes effect for the next resolution.
	pub fn set_recast_decimals(&self, recast: bool) {
		self.recast_decimals.store(recast, Ordering::Relaxed);
	}

	pub fn recasting_decimals(&self) -> bool {
		self.recast_decimals.load(Ordering::Relaxed)
	}

	/// Number of memoized resolutions.
	pub fn memoized(&self) -> usize {
		self.memo.len()
	}

	/// Calls the member `name` on `receiver`: its own constructor, a nested
	/// type's constructor, or a method, whichever the name denotes.
	pub fn call(&self, receiver: &Value, name: &str, args: Vec<Value>) -> Result<Value> {
		let receiver = self.receiver(receiver, name)?;
		let member = self.resolve_with(&receiver, name, &args)?;
		self.dispatch(&receiver, &member, args)
	}

	/// Resolves `name` on `receiver` without dispatching.
	pub fn resolve(&self, receiver: &Value, name: &str, args: &[Value]) -> Result<MemberRef> {
		let receiver = self.receiver(receiver, name)?;
		self.resolve_with(&receiver, name, args)
	}

	/// Best-matching method named `name` on the receiver's type.
	pub fn find_method(&self, receiver: &Value, name: &str, args: &[Value]) -> Result<Arc<Candidate>> {
		let receiver = self.receiver(receiver, name)?;
		self.resolver().select_method(receiver.ty(), name, args)
	}

	/// Best-matching constructor of `ty`.
	pub fn find_constructor(&self, ty: &TypeHandle, args: &[Value]) -> Result<Arc<Candidate>> {
		self.ensure_registered(ty)?;
		self.resolver().select_constructor(ty, args)
	}

	pub fn construct(&self, ty: &TypeHandle, args: Vec<Value>) -> Result<Value> {
		let constructor = self.find_constructor(ty, &args)?;
		let receiver = Receiver::Static(ty.clone());
		self.dispatch(&receiver, &MemberRef::Constructor(constructor), args)
	}

	/// Constructs the type most recently imported under `simple_name`.
	pub fn construct_named(&self, simple_name: &str, args: Vec<Value>) -> Result<Value> {
		let ty = self
			.registry
			.full_name_of(simple_name)
			.filter(|ty| self.registry.is_registered(ty))
			.ok_or_else(|| BindError::NotImported(simple_name.to_string()))?;
		self.construct(&ty, args)
	}

	/// Resolves the field `name` on the receiver's type without reading it.
	pub fn find_field(&self, receiver: &Value, name: &str) -> Result<MemberRef> {
		let receiver = self.receiver(receiver, name)?;
		self.resolver().resolve_field(receiver.ty(), name)
	}

	/// Reads a field. Enum constants are fields of their enum type.
	pub fn get_field(&self, receiver: &Value, name: &str) -> Result<Value> {
		let receiver = self.receiver(receiver, name)?;
		let field = self.resolver().resolve_field(receiver.ty(), name)?;
		self.dispatch(&receiver, &field, Vec::new())
	}

	/// Returns the nested type `name` of the receiver's type as a type handle,
	/// or else the field `name`.
	pub fn get_field_or_nested(&self, receiver: &Value, name: &str) -> Result<Value> {
		let receiver = self.receiver(receiver, name)?;
		if let Some(nested) = self.registry.nested_type_of(receiver.ty(), name) {
			return Ok(Value::Type(nested.handle));
		}
		let field = self.resolver().resolve_field(receiver.ty(), name)?;
		self.dispatch(&receiver, &field, Vec::new())
	}

	/// Assigns `value` to a field, converting it to the field's type.
	pub fn set_field(&self, receiver: &Value, name: &str, value: Value) -> Result<()> {
		let receiver = self.receiver(receiver, name)?;
		let resolver = self.resolver();
		let field = resolver.lookup_field(receiver.ty(), name)?;
		if resolver.scorer().score_argument(&value, field.ty()).is_none() {
			return Err(BindError::NoSuchOverload {
				ty: receiver.ty().clone(),
				name: name.to_string(),
				args: value.type_label(),
			});
		}
		let value = coerce_argument(value, field.ty());
		let target = self.field_receiver(&receiver, &field)?;
		debug!(field = %field, "writing field");
		self.host
			.write_field(target, &field, value)
			.map_err(|source| failure(&field, source))
	}

	/// Executes a dispatch request.
	pub fn run(&self, invocation: Invocation) -> Result<Value> {
		debug!(invocation = %invocation.describe(), "run");
		match invocation {
			Invocation::Call { receiver, name, args } => self.call(&receiver, &name, args),
			Invocation::Construct { type_name, args } => self.construct_named(&type_name, args),
			Invocation::GetField { receiver, name } => self.get_field(&receiver, &name),
			Invocation::GetFieldOrNested { receiver, name } => self.get_field_or_nested(&receiver, &name),
			Invocation::SetField { receiver, name, value } => {
				self.set_field(&receiver, &name, value).map(|()| Value::Null)
			}
		}
	}

	fn resolver(&self) -> Resolver<'_> {
		Resolver::new(&self.registry, self.recasting_decimals())
	}

	/// Normalizes `value` and makes sure its type is registered.
	fn receiver<'v>(&self, value: &'v Value, name: &str) -> Result<Receiver<'v>> {
		let receiver = Receiver::of(value).ok_or_else(|| BindError::NullReceiver {
			name: name.to_string(),
		})?;
		self.ensure_registered(receiver.ty())?;
		Ok(receiver)
	}

	fn ensure_registered(&self, ty: &TypeHandle) -> Result<()> {
		if self.registry.is_registered(ty) {
			return Ok(());
		}
		if self.require_imports {
			return Err(BindError::NotImported(ty.to_string()));
		}
		// Types unknown to the catalog stay unregistered; lookups on them
		// come back empty and surface as `NoSuchMember`.
		if self.registry.register_type(ty) {
			trace!(ty = %ty, "registered on first use");
		}
		Ok(())
	}

	fn resolve_with(&self, receiver: &Receiver<'_>, name: &str, args: &[Value]) -> Result<MemberRef> {
		let recast = self.recasting_decimals();
		let key = self
			.memoize
			.then(|| MemoKey::new(receiver.ty(), receiver.is_static(), name, args, recast));
		if let Some(hit) = key.as_ref().and_then(|key| self.memo.get(key)) {
			trace!(member = %hit.describe(), "memo hit");
			return Ok(hit);
		}

		let resolved = Resolver::new(&self.registry, recast).resolve_call(receiver, name, args)?;
		if let Some(key) = key {
			self.memo.insert(key, resolved.clone());
		}
		Ok(resolved)
	}

	fn dispatch(&self, receiver: &Receiver<'_>, member: &MemberRef, args: Vec<Value>) -> Result<Value> {
		debug!(member = %member.describe(), args = args.len(), "dispatching");
		match member {
			MemberRef::Constructor(constructor) => {
				coerce_arguments(self.host.as_ref(), constructor.params(), args)
					.and_then(|args| self.host.construct(constructor, args))
					.map_err(|source| failure(constructor, source))
			}
			MemberRef::NestedConstructor {
				nested,
				constructor,
				binds_enclosing,
			} => {
				let args = if *binds_enclosing {
					let outer = receiver.instance().ok_or_else(|| BindError::AmbiguousBinding {
						enclosing: receiver.ty().clone(),
						nested: nested.clone(),
					})?;
					std::iter::once(outer.clone()).chain(args).collect()
				} else {
					args
				};
				coerce_arguments(self.host.as_ref(), constructor.params(), args)
					.and_then(|args| self.host.construct(constructor, args))
					.map_err(|source| failure(constructor, source))
			}
			MemberRef::Method(method) => {
				let target = if method.is_static() {
					None
				} else {
					Some(receiver.instance().ok_or_else(|| BindError::NeedsInstance {
						member: method.to_string(),
					})?)
				};
				coerce_arguments(self.host.as_ref(), method.params(), args)
					.and_then(|args| self.host.invoke(target, method, args))
					.map_err(|source| failure(method, source))
			}
			MemberRef::Field(field) => self.read_field(receiver, field),
		}
	}

	fn field_receiver<'v>(&self, receiver: &Receiver<'v>, field: &Field) -> Result<Option<&'v Value>> {
		if field.is_static() {
			return Ok(None);
		}
		receiver
			.instance()
			.map(Some)
			.ok_or_else(|| BindError::NeedsInstance {
				member: field.to_string(),
			})
	}

	fn read_field(&self, receiver: &Receiver<'_>, field: &Field) -> Result<Value> {
		if field.is_enum_constant() {
			return self
				.host
				.enum_constant(&field.owner, field.name())
				.map_err(|source| failure(field, source));
		}
		let target = self.field_receiver(receiver, field)?;
		self.host
			.read_field(target, field)
			.map_err(|source| failure(field, source))
	}
}

fn failure(member: &impl fmt::Display, source: HostError) -> BindError {
	BindError::InvocationFailure {
		member: member.to_string(),
		source,
	}
}
