use bindery_primitives::{ObjectRef, TypeHandle, Value};
use bindery_registry::{Candidate, Field};
use thiserror::Error;

/// Failure reported by the host while executing a selected member.
#[derive(Debug, Error)]
pub enum HostError {
	/// The member ran and raised.
	#[error("{0}")]
	Raised(String),
	/// The host does not implement this operation.
	#[error("host does not support {0}")]
	Unsupported(&'static str),
	#[error(transparent)]
	Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Executes members once resolution has selected them.
///
/// Arguments arrive already coerced to the selected parameter types. The
/// receiver is `None` for static members.
pub trait Host: Send + Sync {
	fn invoke(
		&self,
		receiver: Option<&Value>,
		method: &Candidate,
		args: Vec<Value>,
	) -> Result<Value, HostError>;

	fn construct(&self, constructor: &Candidate, args: Vec<Value>) -> Result<Value, HostError>;

	fn read_field(&self, receiver: Option<&Value>, field: &Field) -> Result<Value, HostError>;

	fn write_field(
		&self,
		receiver: Option<&Value>,
		field: &Field,
		value: Value,
	) -> Result<(), HostError> {
		let _ = (receiver, field, value);
		Err(HostError::Unsupported("field assignment"))
	}

	/// Returns the enum constant `name` of `ty`.
	fn enum_constant(&self, ty: &TypeHandle, name: &str) -> Result<Value, HostError>;

	/// Copies the elements of a host-owned sequence, in order.
	///
	/// Called when a host object implementing `List` is passed to an
	/// `Object[]` parameter.
	fn sequence_elements(&self, sequence: &ObjectRef) -> Result<Vec<Value>, HostError> {
		let _ = sequence;
		Err(HostError::Unsupported("sequence snapshots"))
	}
}
