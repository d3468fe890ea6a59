use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::rank::NumRank;

/// Separator between an enclosing type's binary name and a nested type's simple name.
pub const NESTED_SEPARATOR: char = '$';

/// Reference to a type definition, identified by its fully-qualified name.
///
/// Handles are cheap to clone and compare. A handle says nothing about
/// whether the type is known to any catalog; registries decide that.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeHandle(Arc<str>);

impl TypeHandle {
	/// Creates a handle from a fully-qualified (binary) name such as `pkg.Outer$Inner`.
	pub fn new(full_name: impl AsRef<str>) -> Self {
		Self(Arc::from(full_name.as_ref()))
	}

	/// Returns the fully-qualified name.
	pub fn full_name(&self) -> &str {
		&self.0
	}

	/// Returns the name after the last namespace or nested separator.
	pub fn simple_name(&self) -> &str {
		match self.0.rfind(['.', NESTED_SEPARATOR]) {
			Some(idx) => &self.0[idx + 1..],
			None => &self.0,
		}
	}

	/// Returns the namespace part of the name, if any.
	///
	/// Nested types share the namespace of their outermost enclosing type.
	pub fn namespace(&self) -> Option<&str> {
		self.0.rfind('.').map(|idx| &self.0[..idx])
	}

	/// Returns the handle of a nested type declared in this one.
	pub fn nested(&self, simple_name: &str) -> Self {
		Self::new(format!("{}{NESTED_SEPARATOR}{simple_name}", self.0))
	}
}

impl fmt::Debug for TypeHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TypeHandle({})", self.0)
	}
}

impl fmt::Display for TypeHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for TypeHandle {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

/// Primitive value kinds. Each has a raw (non-nullable) and a boxed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
	Bool,
	Byte,
	Short,
	Char,
	Int,
	Long,
	Float,
	Double,
}

impl Primitive {
	pub const ALL: [Primitive; 8] = [
		Primitive::Bool,
		Primitive::Byte,
		Primitive::Short,
		Primitive::Char,
		Primitive::Int,
		Primitive::Long,
		Primitive::Float,
		Primitive::Double,
	];

	/// Name of the raw form.
	pub const fn raw_name(self) -> &'static str {
		match self {
			Self::Bool => "boolean",
			Self::Byte => "byte",
			Self::Short => "short",
			Self::Char => "char",
			Self::Int => "int",
			Self::Long => "long",
			Self::Float => "float",
			Self::Double => "double",
		}
	}

	/// Name of the boxed form.
	pub const fn boxed_name(self) -> &'static str {
		match self {
			Self::Bool => "Boolean",
			Self::Byte => "Byte",
			Self::Short => "Short",
			Self::Char => "Character",
			Self::Int => "Integer",
			Self::Long => "Long",
			Self::Float => "Float",
			Self::Double => "Double",
		}
	}

	pub const fn rank(self) -> NumRank {
		match self {
			Self::Bool => NumRank::Nan,
			Self::Byte => NumRank::Byte,
			Self::Short => NumRank::Short,
			Self::Char => NumRank::Char,
			Self::Int => NumRank::Int,
			Self::Long => NumRank::Long,
			Self::Float => NumRank::Float,
			Self::Double => NumRank::Double,
		}
	}
}

/// Declared type of a parameter or field, or the runtime type of a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
	/// Raw primitive. Never accepts null.
	Raw(Primitive),
	/// Boxed primitive.
	Boxed(Primitive),
	/// Arbitrary-precision decimal.
	Decimal,
	String,
	/// Ordered sequence container.
	Sequence,
	/// The top type; every reference type is compatible with it.
	Object,
	/// Array of the top type.
	ObjectArray,
	/// The type of type handles themselves.
	Type,
	/// Host-defined reference type.
	Named(TypeHandle),
}

impl TypeRef {
	/// Parses a type name as written in catalog declarations.
	///
	/// Builtin names (`int`, `Integer`, `Object[]`, `List`, ...) map to their
	/// builtin variants, anything else is a [`TypeRef::Named`] handle.
	pub fn parse(name: &str) -> Self {
		let name = name.trim();
		if let Some(p) = Primitive::ALL.into_iter().find(|p| p.raw_name() == name) {
			return Self::Raw(p);
		}
		if let Some(p) = Primitive::ALL.into_iter().find(|p| p.boxed_name() == name) {
			return Self::Boxed(p);
		}
		match name {
			"Decimal" => Self::Decimal,
			"String" => Self::String,
			"List" => Self::Sequence,
			"Object" => Self::Object,
			"Object[]" => Self::ObjectArray,
			"Type" => Self::Type,
			other => Self::Named(TypeHandle::new(other)),
		}
	}

	/// Returns true if null is an acceptable value of this type.
	pub fn is_nullable(&self) -> bool {
		!matches!(self, Self::Raw(_))
	}

	pub fn is_raw(&self) -> bool {
		matches!(self, Self::Raw(_))
	}

	/// Returns true for the top type.
	pub fn is_top(&self) -> bool {
		matches!(self, Self::Object)
	}

	/// Returns the primitive behind a raw or boxed type.
	pub fn primitive(&self) -> Option<Primitive> {
		match self {
			Self::Raw(p) | Self::Boxed(p) => Some(*p),
			_ => None,
		}
	}

	/// Numeric rank of this type; non-numeric types rank as [`NumRank::Nan`].
	pub fn rank(&self) -> NumRank {
		NumRank::of(self)
	}

	/// Returns the handle under which this type is described in a catalog.
	pub fn handle(&self) -> TypeHandle {
		match self {
			Self::Named(handle) => handle.clone(),
			builtin => TypeHandle::new(builtin.to_string()),
		}
	}
}

impl fmt::Display for TypeRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Raw(p) => f.write_str(p.raw_name()),
			Self::Boxed(p) => f.write_str(p.boxed_name()),
			Self::Decimal => f.write_str("Decimal"),
			Self::String => f.write_str("String"),
			Self::Sequence => f.write_str("List"),
			Self::Object => f.write_str("Object"),
			Self::ObjectArray => f.write_str("Object[]"),
			Self::Type => f.write_str("Type"),
			Self::Named(handle) => f.write_str(handle.full_name()),
		}
	}
}

impl FromStr for TypeRef {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::parse(s))
	}
}

impl From<&str> for TypeRef {
	fn from(name: &str) -> Self {
		Self::parse(name)
	}
}

impl From<TypeHandle> for TypeRef {
	fn from(handle: TypeHandle) -> Self {
		Self::Named(handle)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn simple_name_strips_namespace_and_enclosing_type() {
		assert_eq!(TypeHandle::new("pkg.sub.Outer").simple_name(), "Outer");
		assert_eq!(TypeHandle::new("pkg.Outer$Inner").simple_name(), "Inner");
		assert_eq!(TypeHandle::new("Bare").simple_name(), "Bare");
	}

	#[test]
	fn nested_handles_keep_outer_namespace() {
		let inner = TypeHandle::new("pkg.Outer").nested("Inner");
		assert_eq!(inner.full_name(), "pkg.Outer$Inner");
		assert_eq!(inner.namespace(), Some("pkg"));
	}

	#[test]
	fn parse_round_trips_builtin_names() {
		for name in [
			"int", "Integer", "char", "Character", "boolean", "Decimal", "String", "List",
			"Object", "Object[]", "Type",
		] {
			assert_eq!(TypeRef::parse(name).to_string(), name);
		}
		assert_eq!(
			TypeRef::parse("pkg.Widget"),
			TypeRef::Named(TypeHandle::new("pkg.Widget"))
		);
	}

	#[test]
	fn only_raw_primitives_reject_null() {
		assert!(!TypeRef::Raw(Primitive::Int).is_nullable());
		assert!(TypeRef::Boxed(Primitive::Int).is_nullable());
		assert!(TypeRef::Object.is_nullable());
		assert!(TypeRef::parse("pkg.Widget").is_nullable());
	}
}
