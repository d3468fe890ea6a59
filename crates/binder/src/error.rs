//! Errors surfaced by resolution and dispatch.

use bindery_invocation::HostError;
use bindery_primitives::TypeHandle;
use bindery_registry::RegistryError;
use thiserror::Error;

/// Reasons a member access could not be resolved or executed.
#[derive(Debug, Error)]
pub enum BindError {
	/// No accessible member, constructor, or field with this name.
	#[error("no member `{name}` on {ty}")]
	NoSuchMember { ty: TypeHandle, name: String },

	/// Candidates exist, but none accepts the arguments.
	#[error("no overload of `{name}` on {ty} accepts ({args})")]
	NoSuchOverload {
		ty: TypeHandle,
		name: String,
		/// Runtime types of the arguments, comma separated.
		args: String,
	},

	/// An instance-bound nested type was named from a static reference to
	/// its enclosing type.
	#[error("{nested} needs an enclosing {enclosing} instance, but {enclosing} was referenced statically")]
	AmbiguousBinding { enclosing: TypeHandle, nested: TypeHandle },

	/// The host failed while executing the selected member.
	#[error("{member} failed: {source}")]
	InvocationFailure {
		member: String,
		#[source]
		source: HostError,
	},

	/// The type is not in the import table.
	#[error("type `{0}` is not imported")]
	NotImported(String),

	/// An instance member was selected from a static reference.
	#[error("{member} needs an instance receiver")]
	NeedsInstance { member: String },

	#[error("null receiver for `{name}`")]
	NullReceiver { name: String },

	#[error(transparent)]
	Registry(#[from] RegistryError),
}

pub type Result<T> = std::result::Result<T, BindError>;
