//! Simple-name collisions.
//!
//! The simple-name table is last-write-wins: registering a second type with
//! the same simple name re-points the name to it. Collisions are recorded so
//! callers can surface the ambiguity; they are never resolved.

use bindery_primitives::TypeHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleNameCollision {
	pub simple_name: String,
	/// Type the simple name pointed to before.
	pub replaced: TypeHandle,
	/// Type the simple name points to now.
	pub winner: TypeHandle,
}

impl std::fmt::Display for SimpleNameCollision {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"simple name `{}` re-pointed from {} to {}",
			self.simple_name, self.replaced, self.winner
		)
	}
}
