//! Explicit registration tables.
//!
//! [`StaticCatalog`] backs both [`TypeCatalog`] and [`NamespaceScanner`] with
//! type and member declarations made up front through [`TypeBuilder`]. Hosts
//! without native introspection describe their types this way.
//!
//! ```ignore
//! let mut catalog = StaticCatalog::new();
//! catalog
//! 	.define("app.Counter")
//! 	.constructor(&[])
//! 	.constructor(&["int"])
//! 	.method("add", &["int"])
//! 	.static_method("zero", &[])
//! 	.finish();
//! ```

use bindery_primitives::{TypeHandle, TypeRef};
use rustc_hash::FxHashMap as HashMap;

use crate::catalog::{
	CallTarget, ConstructorDecl, FieldDecl, InvocationKind, MemberListing, MethodDecl,
	NamespaceScanner, NestedTypeDecl, TypeCatalog, TypeDescriptor, TypeKind, Visibility,
};

/// Catalog built from explicit declarations.
#[derive(Debug, Default)]
pub struct StaticCatalog {
	order: Vec<TypeHandle>,
	types: HashMap<TypeHandle, TypeDescriptor>,
	members: HashMap<TypeHandle, MemberListing>,
	next_target: u64,
}

impl StaticCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts declaring a public top-level class named `full_name`.
	pub fn define(&mut self, full_name: &str) -> TypeBuilder<'_> {
		let descriptor = TypeDescriptor::class(TypeHandle::new(full_name));
		TypeBuilder {
			catalog: self,
			descriptor,
			listing: MemberListing::default(),
		}
	}

	/// Starts declaring a nested class of `enclosing`.
	///
	/// Constructors of a non-static nested type implicitly take the enclosing
	/// instance as their first parameter.
	pub fn define_nested(
		&mut self,
		enclosing: &str,
		simple_name: &str,
		is_static: bool,
	) -> TypeBuilder<'_> {
		let outer = TypeHandle::new(enclosing);
		let mut descriptor = TypeDescriptor::class(outer.nested(simple_name));
		descriptor.simple_name = simple_name.to_string();
		descriptor.is_static = is_static;
		descriptor.enclosing = Some(outer);
		TypeBuilder {
			catalog: self,
			descriptor,
			listing: MemberListing::default(),
		}
	}

	pub fn contains(&self, ty: &TypeHandle) -> bool {
		self.types.contains_key(ty)
	}

	fn next_target(&mut self) -> CallTarget {
		self.next_target += 1;
		CallTarget(self.next_target)
	}

	fn insert(&mut self, descriptor: TypeDescriptor, listing: MemberListing) -> TypeHandle {
		let handle = descriptor.handle.clone();
		if !self.types.contains_key(&handle) {
			self.order.push(handle.clone());
		}
		self.types.insert(handle.clone(), descriptor);
		self.members.insert(handle.clone(), listing);
		handle
	}
}

impl TypeCatalog for StaticCatalog {
	fn describe_type(&self, ty: &TypeHandle) -> Option<TypeDescriptor> {
		let mut descriptor = self.types.get(ty)?.clone();
		descriptor.nested = self
			.order
			.iter()
			.filter_map(|handle| self.types.get(handle))
			.filter(|inner| inner.enclosing.as_ref() == Some(ty))
			.map(|inner| NestedTypeDecl {
				simple_name: inner.simple_name.clone(),
				handle: inner.handle.clone(),
				requires_enclosing: !inner.is_static,
			})
			.collect();
		Some(descriptor)
	}

	fn describe_members(&self, ty: &TypeHandle) -> Option<MemberListing> {
		self.members.get(ty).cloned()
	}
}

impl NamespaceScanner for StaticCatalog {
	fn types_in(&self, namespace: &str) -> Vec<TypeHandle> {
		self.order
			.iter()
			.filter(|handle| handle.namespace() == Some(namespace))
			.cloned()
			.collect()
	}

	fn find_type(&self, binary_name: &str) -> Option<TypeHandle> {
		let handle = TypeHandle::new(binary_name);
		self.types.contains_key(&handle).then_some(handle)
	}
}

/// Fluent declaration of one type. Nothing is recorded until [`TypeBuilder::finish`].
pub struct TypeBuilder<'a> {
	catalog: &'a mut StaticCatalog,
	descriptor: TypeDescriptor,
	listing: MemberListing,
}

fn parse_params(params: &[&str]) -> Vec<TypeRef> {
	params.iter().map(|name| TypeRef::parse(name)).collect()
}

impl TypeBuilder<'_> {
	pub fn interface(mut self) -> Self {
		self.descriptor.kind = TypeKind::Interface;
		self
	}

	pub fn enumeration(mut self) -> Self {
		self.descriptor.kind = TypeKind::Enum;
		self
	}

	/// Marks the type itself as not publicly accessible.
	pub fn restricted(mut self) -> Self {
		self.descriptor.visibility = Visibility::Restricted;
		self
	}

	pub fn extends(mut self, superclass: &str) -> Self {
		self.descriptor.superclass = Some(TypeHandle::new(superclass));
		self
	}

	pub fn implements(mut self, interface: &str) -> Self {
		self.descriptor.interfaces.push(TypeHandle::new(interface));
		self
	}

	pub fn constructor(mut self, params: &[&str]) -> Self {
		let target = self.catalog.next_target();
		self.listing.constructors.push(ConstructorDecl {
			params: parse_params(params),
			visibility: Visibility::Public,
			target,
		});
		self
	}

	pub fn restricted_constructor(mut self, params: &[&str]) -> Self {
		let target = self.catalog.next_target();
		self.listing.constructors.push(ConstructorDecl {
			params: parse_params(params),
			visibility: Visibility::Restricted,
			target,
		});
		self
	}

	fn push_method(
		mut self,
		name: &str,
		params: &[&str],
		invocation: InvocationKind,
		visibility: Visibility,
	) -> Self {
		let target = self.catalog.next_target();
		self.listing.methods.push(MethodDecl {
			name: name.to_string(),
			params: parse_params(params),
			invocation,
			visibility,
			target,
		});
		self
	}

	pub fn method(self, name: &str, params: &[&str]) -> Self {
		self.push_method(name, params, InvocationKind::Instance, Visibility::Public)
	}

	pub fn static_method(self, name: &str, params: &[&str]) -> Self {
		self.push_method(name, params, InvocationKind::Static, Visibility::Public)
	}

	pub fn restricted_method(self, name: &str, params: &[&str]) -> Self {
		self.push_method(name, params, InvocationKind::Instance, Visibility::Restricted)
	}

	fn push_field(mut self, name: &str, ty: TypeRef, invocation: InvocationKind, enum_constant: bool) -> Self {
		let target = self.catalog.next_target();
		self.listing.fields.push(FieldDecl {
			name: name.to_string(),
			ty,
			invocation,
			visibility: Visibility::Public,
			enum_constant,
			target,
		});
		self
	}

	pub fn field(self, name: &str, ty: &str) -> Self {
		self.push_field(name, TypeRef::parse(ty), InvocationKind::Instance, false)
	}

	pub fn static_field(self, name: &str, ty: &str) -> Self {
		self.push_field(name, TypeRef::parse(ty), InvocationKind::Static, false)
	}

	/// Declares an enum constant, exposed as a static field of this type.
	pub fn constant(self, name: &str) -> Self {
		let ty = TypeRef::Named(self.descriptor.handle.clone());
		self.push_field(name, ty, InvocationKind::Static, true)
	}

	/// Records the declaration and returns the type's handle.
	pub fn finish(self) -> TypeHandle {
		let Self {
			catalog,
			descriptor,
			mut listing,
		} = self;
		if let Some(outer) = descriptor.enclosing.as_ref().filter(|_| !descriptor.is_static) {
			for ctor in &mut listing.constructors {
				ctor.params.insert(0, TypeRef::Named(outer.clone()));
			}
		}
		catalog.insert(descriptor, listing)
	}
}
