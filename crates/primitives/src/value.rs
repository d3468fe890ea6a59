use std::any::Any;
use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::types::{Primitive, TypeHandle, TypeRef};

/// Host-owned instance: the instance's type plus an opaque shared payload.
#[derive(Clone)]
pub struct ObjectRef {
	ty: TypeHandle,
	payload: Arc<dyn Any + Send + Sync>,
}

impl ObjectRef {
	pub fn new<T: Any + Send + Sync>(ty: TypeHandle, payload: T) -> Self {
		Self {
			ty,
			payload: Arc::new(payload),
		}
	}

	/// Returns the runtime type of the instance.
	pub fn type_handle(&self) -> &TypeHandle {
		&self.ty
	}

	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.payload.downcast_ref()
	}

	/// Returns true if both refer to the same host instance.
	pub fn same_instance(&self, other: &ObjectRef) -> bool {
		std::ptr::addr_eq(Arc::as_ptr(&self.payload), Arc::as_ptr(&other.payload))
	}
}

impl PartialEq for ObjectRef {
	fn eq(&self, other: &Self) -> bool {
		self.ty == other.ty && self.same_instance(other)
	}
}

impl fmt::Debug for ObjectRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ObjectRef")
			.field("ty", &self.ty)
			.finish_non_exhaustive()
	}
}

/// A runtime value passed to or returned from a dispatched member.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
	#[default]
	Null,
	Bool(bool),
	Byte(i8),
	Short(i16),
	Char(char),
	Int(i32),
	Long(i64),
	Float(f32),
	Double(f64),
	Decimal(Decimal),
	Str(String),
	/// Ordered, growable sequence.
	List(Vec<Value>),
	/// Fixed-size array of the top type.
	Array(Vec<Value>),
	/// A type handle used as a value (static receiver or type argument).
	Type(TypeHandle),
	Object(ObjectRef),
}

impl Value {
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Returns the runtime type, or `None` for null.
	///
	/// Primitive values report their boxed type, as they would when carried in
	/// a heterogeneous argument list.
	pub fn runtime_type(&self) -> Option<TypeRef> {
		Some(match self {
			Value::Null => return None,
			Value::Bool(_) => TypeRef::Boxed(Primitive::Bool),
			Value::Byte(_) => TypeRef::Boxed(Primitive::Byte),
			Value::Short(_) => TypeRef::Boxed(Primitive::Short),
			Value::Char(_) => TypeRef::Boxed(Primitive::Char),
			Value::Int(_) => TypeRef::Boxed(Primitive::Int),
			Value::Long(_) => TypeRef::Boxed(Primitive::Long),
			Value::Float(_) => TypeRef::Boxed(Primitive::Float),
			Value::Double(_) => TypeRef::Boxed(Primitive::Double),
			Value::Decimal(_) => TypeRef::Decimal,
			Value::Str(_) => TypeRef::String,
			Value::List(_) => TypeRef::Sequence,
			Value::Array(_) => TypeRef::ObjectArray,
			Value::Type(_) => TypeRef::Type,
			Value::Object(obj) => TypeRef::Named(obj.type_handle().clone()),
		})
	}

	/// Short type label for diagnostics.
	pub fn type_label(&self) -> String {
		self.runtime_type()
			.map_or_else(|| "null".to_string(), |ty| ty.to_string())
	}

	pub fn as_object(&self) -> Option<&ObjectRef> {
		match self {
			Value::Object(obj) => Some(obj),
			_ => None,
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<i8> for Value {
	fn from(v: i8) -> Self {
		Value::Byte(v)
	}
}

impl From<i16> for Value {
	fn from(v: i16) -> Self {
		Value::Short(v)
	}
}

impl From<char> for Value {
	fn from(v: char) -> Self {
		Value::Char(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Long(v)
	}
}

impl From<f32> for Value {
	fn from(v: f32) -> Self {
		Value::Float(v)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Double(v)
	}
}

impl From<Decimal> for Value {
	fn from(v: Decimal) -> Self {
		Value::Decimal(v)
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Str(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Str(v.to_string())
	}
}

impl From<TypeHandle> for Value {
	fn from(v: TypeHandle) -> Self {
		Value::Type(v)
	}
}

impl From<ObjectRef> for Value {
	fn from(v: ObjectRef) -> Self {
		Value::Object(v)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map_or(Value::Null, Into::into)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn primitives_report_boxed_runtime_types() {
		assert_eq!(
			Value::Int(5).runtime_type(),
			Some(TypeRef::Boxed(Primitive::Int))
		);
		assert_eq!(
			Value::Char('x').runtime_type(),
			Some(TypeRef::Boxed(Primitive::Char))
		);
		assert_eq!(Value::Null.runtime_type(), None);
	}

	#[test]
	fn object_equality_is_identity() {
		let ty = TypeHandle::new("pkg.Widget");
		let a = ObjectRef::new(ty.clone(), 1u8);
		let b = ObjectRef::new(ty, 1u8);
		assert_eq!(a, a.clone());
		assert_ne!(a, b);
		assert_eq!(
			Value::Object(a).runtime_type(),
			Some(TypeRef::parse("pkg.Widget"))
		);
	}

	#[test]
	fn options_convert_to_null() {
		assert_eq!(Value::from(None::<i32>), Value::Null);
		assert_eq!(Value::from(Some(3)), Value::Int(3));
	}
}
