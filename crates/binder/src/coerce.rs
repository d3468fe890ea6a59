//! Argument coercion.
//!
//! Runs after selection: each accepted argument is converted to the exact
//! representation its parameter expects. Coercion never re-scores; it trusts
//! that the scorer accepted the pairing.

use bindery_invocation::{Host, HostError};
use bindery_primitives::{NumRank, TypeRef, Value, convert_to_rank};


/// Converts `args` to match `params` position by position.
///
/// Host objects passed to `Object[]` parameters are copied into arrays
/// through [`Host::sequence_elements`]; the scorer only accepts that pairing
/// when the object's type implements `List`.
pub fn coerce_arguments(
	host: &dyn Host,
	params: &[TypeRef],
	args: Vec<Value>,
) -> Result<Vec<Value>, HostError> {
	args.into_iter()
		.zip(params)
		.map(|(arg, param)| match (arg, param) {
			(Value::Object(sequence), TypeRef::ObjectArray) => {
				host.sequence_elements(&sequence).map(Value::Array)
			}
			(arg, param) => Ok(coerce_argument(arg, param)),
		})
		.collect()
}

/// Converts one argument to the representation `param` expects.
pub fn coerce_argument(arg: Value, param: &TypeRef) -> Value {
	match (arg, param) {
		(Value::List(items), TypeRef::ObjectArray) => Value::Array(items),
		(arg, param) => {
			let rank = param.rank();
			if rank == NumRank::Nan {
				return arg;
			}
			convert_to_rank(&arg, rank).unwrap_or(arg)
		}
	}
}
