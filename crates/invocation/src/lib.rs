//! Canonical dispatch types for Bindery.
//!
//! Every entry point converts its request into an [`Invocation`] before the
//! binder resolves it. Resolution produces a [`MemberRef`], which the binder
//! hands to a [`Host`] for the actual call, construction, or field access.

mod host;
mod member_ref;


use bindery_primitives::Value;

pub use host::{Host, HostError};
pub use member_ref::MemberRef;

/// A dynamic member access routed through overload resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
	/// Call a method, the receiver's constructor, or a nested type's constructor.
	Call {
		/// Type handle (static context) or instance.
		receiver: Value,
		/// Member name, or a simple type name for constructors.
		name: String,
		/// Runtime argument values.
		args: Vec<Value>,
	},
	/// Construct an imported type referenced by its simple name.
	Construct {
		/// Simple type name, looked up through the import table.
		type_name: String,
		args: Vec<Value>,
	},
	/// Read a field or enum constant.
	GetField { receiver: Value, name: String },
	/// Read a nested type (as a type handle) or, failing that, a field.
	GetFieldOrNested { receiver: Value, name: String },
	/// Assign a field.
	SetField {
		receiver: Value,
		name: String,
		value: Value,
	},
}

impl Invocation {
	/// Creates a call invocation.
	pub fn call(receiver: impl Into<Value>, name: impl Into<String>, args: Vec<Value>) -> Self {
		Self::Call {
			receiver: receiver.into(),
			name: name.into(),
			args,
		}
	}

	/// Creates a construction by simple type name.
	pub fn construct(type_name: impl Into<String>, args: Vec<Value>) -> Self {
		Self::Construct {
			type_name: type_name.into(),
			args,
		}
	}

	pub fn get_field(receiver: impl Into<Value>, name: impl Into<String>) -> Self {
		Self::GetField {
			receiver: receiver.into(),
			name: name.into(),
		}
	}

	pub fn get_field_or_nested(receiver: impl Into<Value>, name: impl Into<String>) -> Self {
		Self::GetFieldOrNested {
			receiver: receiver.into(),
			name: name.into(),
		}
	}

	pub fn set_field(receiver: impl Into<Value>, name: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::SetField {
			receiver: receiver.into(),
			name: name.into(),
			value: value.into(),
		}
	}

	/// Short description for tracing/logging.
	pub fn describe(&self) -> String {
		match self {
			Self::Call { receiver, name, args } => {
				format!("call:{}.{name}/{}", receiver_label(receiver), args.len())
			}
			Self::Construct { type_name, args } => format!("new:{type_name}/{}", args.len()),
			Self::GetField { receiver, name } => format!("get:{}.{name}", receiver_label(receiver)),
			Self::GetFieldOrNested { receiver, name } => {
				format!("get_or_nested:{}.{name}", receiver_label(receiver))
			}
			Self::SetField { receiver, name, .. } => format!("set:{}.{name}", receiver_label(receiver)),
		}
	}
}

/// Type handles print as themselves; instances print as their runtime type.
fn receiver_label(receiver: &Value) -> String {
	match receiver {
		Value::Type(handle) => handle.to_string(),
		other => other.type_label(),
	}
}
