use std::sync::Arc;

use bindery_primitives::TypeHandle;
use bindery_registry::{Candidate, Field};

/// Outcome of resolving a name against a receiver, before dispatch.
///
/// A `MemberRef` holds no argument or instance values, so the same
/// resolution can be reused for any call with the same argument shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberRef {
	/// A constructor of the receiver's own type.
	Constructor(Arc<Candidate>),
	/// A constructor of a type nested in the receiver's type.
	NestedConstructor {
		nested: TypeHandle,
		constructor: Arc<Candidate>,
		/// The enclosing instance is passed as the first argument.
		binds_enclosing: bool,
	},
	Method(Arc<Candidate>),
	Field(Arc<Field>),
}

impl MemberRef {
	/// The selected constructor or method, if this is not a field.
	pub fn candidate(&self) -> Option<&Arc<Candidate>> {
		match self {
			Self::Constructor(c) | Self::Method(c) => Some(c),
			Self::NestedConstructor { constructor, .. } => Some(constructor),
			Self::Field(_) => None,
		}
	}

	/// Short description for tracing/logging.
	pub fn describe(&self) -> String {
		match self {
			Self::Constructor(c) => format!("ctor:{c}"),
			Self::NestedConstructor {
				constructor,
				binds_enclosing: true,
				..
			} => format!("inner_ctor:{constructor}"),
			Self::NestedConstructor { constructor, .. } => format!("nested_ctor:{constructor}"),
			Self::Method(c) if c.is_static() => format!("static:{c}"),
			Self::Method(c) => format!("method:{c}"),
			Self::Field(f) => format!("field:{f}"),
		}
	}
}
