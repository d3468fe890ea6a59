//! Core types for dynamic dispatch: type handles, declared types, runtime
//! values, and the numeric rank ladder used to score implicit conversions.

/// Numeric rank ladder and rank-to-rank conversion scores.
pub mod rank;
/// Type handles and declared/runtime type references.
pub mod types;
/// Runtime argument and result values.
pub mod value;

pub use rank::{NumRank, convert_to_rank, score_numeric};
pub use rust_decimal::Decimal;
pub use types::{NESTED_SEPARATOR, Primitive, TypeHandle, TypeRef};
pub use value::{ObjectRef, Value};
