//! Boundary contracts with the introspection facility.
//!
//! A [`TypeCatalog`] describes types without instantiating them; a
//! [`NamespaceScanner`] discovers importable type names. Both are read-only
//! and are queried by the registry at most once per type.

use bindery_primitives::{TypeHandle, TypeRef};

/// Kind of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
	Class,
	Interface,
	/// Enumerated type; exposes constants as fields and has no constructors.
	Enum,
}

/// Visibility of a type or member. Only public entities are dispatchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
	#[default]
	Public,
	Restricted,
}

/// Whether a member needs a receiver instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InvocationKind {
	#[default]
	Instance,
	Static,
}

/// Opaque token identifying a member to the host's invoke/construct primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallTarget(pub u64);

/// A type declared inside an enclosing type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedTypeDecl {
	pub simple_name: String,
	pub handle: TypeHandle,
	/// True if construction needs an instance of the enclosing type.
	pub requires_enclosing: bool,
}

/// Catalog description of a type, excluding its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
	pub handle: TypeHandle,
	pub simple_name: String,
	pub kind: TypeKind,
	pub visibility: Visibility,
	/// Static flag of a nested type; always true for top-level types.
	pub is_static: bool,
	pub enclosing: Option<TypeHandle>,
	pub superclass: Option<TypeHandle>,
	pub interfaces: Vec<TypeHandle>,
	/// Declared nested types, in declaration order.
	pub nested: Vec<NestedTypeDecl>,
}

impl TypeDescriptor {
	/// Creates a descriptor for a public top-level class.
	pub fn class(handle: TypeHandle) -> Self {
		Self {
			simple_name: handle.simple_name().to_string(),
			handle,
			kind: TypeKind::Class,
			visibility: Visibility::Public,
			is_static: true,
			enclosing: None,
			superclass: None,
			interfaces: Vec::new(),
			nested: Vec::new(),
		}
	}

	pub fn is_nested(&self) -> bool {
		self.enclosing.is_some()
	}

	pub fn is_enum(&self) -> bool {
		self.kind == TypeKind::Enum
	}

	/// Direct supertypes: superclass first, then interfaces in declaration order.
	pub fn supertypes(&self) -> impl Iterator<Item = &TypeHandle> {
		self.superclass.iter().chain(self.interfaces.iter())
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
	pub name: String,
	pub params: Vec<TypeRef>,
	pub invocation: InvocationKind,
	pub visibility: Visibility,
	pub target: CallTarget,
}

/// Constructor declaration. For nested types requiring an enclosing
/// instance, the first parameter is the enclosing type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDecl {
	pub params: Vec<TypeRef>,
	pub visibility: Visibility,
	pub target: CallTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
	pub name: String,
	pub ty: TypeRef,
	pub invocation: InvocationKind,
	pub visibility: Visibility,
	/// Enum constants are exposed as static fields of their enum type.
	pub enum_constant: bool,
	pub target: CallTarget,
}

/// Members declared directly on one type (not inherited ones).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberListing {
	pub methods: Vec<MethodDecl>,
	pub constructors: Vec<ConstructorDecl>,
	pub fields: Vec<FieldDecl>,
}

/// Introspection facility enumerating a type's accessible members.
pub trait TypeCatalog: Send + Sync {
	/// Describes a type, or `None` if the catalog does not know it.
	fn describe_type(&self, ty: &TypeHandle) -> Option<TypeDescriptor>;

	/// Lists the members declared directly on `ty`.
	fn describe_members(&self, ty: &TypeHandle) -> Option<MemberListing>;
}

/// Discovers importable types by namespace or binary name.
pub trait NamespaceScanner: Send + Sync {
	/// Types declared directly in `namespace`, nested types included. Not recursive.
	fn types_in(&self, namespace: &str) -> Vec<TypeHandle>;

	/// Type with exactly this binary name (nested separator `$`).
	fn find_type(&self, binary_name: &str) -> Option<TypeHandle>;
}
