//! Name resolution against a receiver.
//!
//! A call name is tried, in order, as
//!
//! 1. the receiver type's own simple name, selecting one of its constructors;
//! 2. the simple name of a type nested in the receiver type, selecting one of
//!    the nested type's constructors;
//! 3. a method family of the receiver type.
//!
//! The first stage that recognizes the name decides the outcome. Later stages
//! are not consulted even if the earlier one fails to find an overload.

use std::sync::Arc;

use bindery_invocation::MemberRef;
use bindery_primitives::{TypeHandle, Value};
use bindery_registry::{Candidate, Field, MemberRegistry, NestedTypeDecl};
use tracing::{debug, trace};

use crate::error::{BindError, Result};
use crate::score::Scorer;

/// A receiver normalized to the type whose members are looked up.
#[derive(Debug, Clone)]
pub(crate) enum Receiver<'v> {
	/// A type handle: only static members and constructors are reachable.
	Static(TypeHandle),
	Instance { ty: TypeHandle, value: &'v Value },
}

impl<'v> Receiver<'v> {
	/// Returns `None` for null.
	pub(crate) fn of(value: &'v Value) -> Option<Self> {
		match value {
			Value::Null => None,
			Value::Type(ty) => Some(Self::Static(ty.clone())),
			other => other.runtime_type().map(|ty| Self::Instance {
				ty: ty.handle(),
				value: other,
			}),
		}
	}

	pub(crate) fn ty(&self) -> &TypeHandle {
		match self {
			Self::Static(ty) | Self::Instance { ty, .. } => ty,
		}
	}

	pub(crate) fn instance(&self) -> Option<&'v Value> {
		match self {
			Self::Static(_) => None,
			Self::Instance { value, .. } => Some(value),
		}
	}

	pub(crate) fn is_static(&self) -> bool {
		matches!(self, Self::Static(_))
	}
}

pub(crate) struct Resolver<'r> {
	registry: &'r MemberRegistry,
	scorer: Scorer<'r>,
}

impl<'r> Resolver<'r> {
	pub(crate) fn new(registry: &'r MemberRegistry, recast_decimals: bool) -> Self {
		Self {
			registry,
			scorer: Scorer::new(registry, recast_decimals),
		}
	}

	pub(crate) fn scorer(&self) -> &Scorer<'r> {
		&self.scorer
	}

	pub(crate) fn resolve_call(&self, receiver: &Receiver<'_>, name: &str, args: &[Value]) -> Result<MemberRef> {
		let ty = receiver.ty();
		if self.registry.simple_name_of(ty).as_deref() == Some(name) {
			trace!(ty = %ty, "name is the receiver's own type");
			return self.select_constructor(ty, args).map(MemberRef::Constructor);
		}
		if let Some(nested) = self.registry.nested_type_of(ty, name) {
			trace!(ty = %ty, nested = %nested.handle, "name is a nested type");
			return self.resolve_nested(receiver, nested, args);
		}
		self.select_method(ty, name, args).map(MemberRef::Method)
	}

	fn resolve_nested(&self, receiver: &Receiver<'_>, nested: NestedTypeDecl, args: &[Value]) -> Result<MemberRef> {
		let constructor = if !nested.requires_enclosing {
			self.select_constructor(&nested.handle, args)?
		} else if let Some(outer) = receiver.instance() {
			let mut bound = Vec::with_capacity(args.len() + 1);
			bound.push(outer.clone());
			bound.extend_from_slice(args);
			self.select_constructor(&nested.handle, &bound)?
		} else {
			return Err(BindError::AmbiguousBinding {
				enclosing: receiver.ty().clone(),
				nested: nested.handle,
			});
		};
		Ok(MemberRef::NestedConstructor {
			nested: nested.handle,
			constructor,
			binds_enclosing: nested.requires_enclosing,
		})
	}

	pub(crate) fn select_constructor(&self, ty: &TypeHandle, args: &[Value]) -> Result<Arc<Candidate>> {
		let constructors = self.registry.lookup_constructors(ty);
		if constructors.is_empty() {
			return Err(BindError::NoSuchMember {
				ty: ty.clone(),
				name: ty.simple_name().to_string(),
			});
		}
		self.select(&constructors, ty, ty.simple_name(), args)
	}

	pub(crate) fn select_method(&self, ty: &TypeHandle, name: &str, args: &[Value]) -> Result<Arc<Candidate>> {
		let methods = self.registry.lookup_methods(ty, name);
		if methods.is_empty() {
			return Err(BindError::NoSuchMember {
				ty: ty.clone(),
				name: name.to_string(),
			});
		}
		self.select(&methods, ty, name, args)
	}

	fn select(&self, candidates: &[Arc<Candidate>], ty: &TypeHandle, name: &str, args: &[Value]) -> Result<Arc<Candidate>> {
		match self.scorer.select(candidates, args) {
			Some((selected, score)) => {
				debug!(candidate = %selected, score, of = candidates.len(), "selected overload");
				Ok(Arc::clone(selected))
			}
			None => Err(BindError::NoSuchOverload {
				ty: ty.clone(),
				name: name.to_string(),
				args: describe_args(args),
			}),
		}
	}

	pub(crate) fn lookup_field(&self, ty: &TypeHandle, name: &str) -> Result<Arc<Field>> {
		self.registry
			.lookup_field(ty, name)
			.ok_or_else(|| BindError::NoSuchMember {
				ty: ty.clone(),
				name: name.to_string(),
			})
	}

	/// Resolves `name` as a field of `ty`, ready for dispatch as a read.
	pub(crate) fn resolve_field(&self, ty: &TypeHandle, name: &str) -> Result<MemberRef> {
		self.lookup_field(ty, name).map(MemberRef::Field)
	}
}

pub(crate) fn describe_args(args: &[Value]) -> String {
	args.iter().map(Value::type_label).collect::<Vec<_>>().join(", ")
}
