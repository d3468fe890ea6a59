//! Dynamic member dispatch with compiler-style overload resolution.
//!
//! A [`Binder`] takes a receiver (a type handle or an instance), a member
//! name and runtime argument values, selects the overload a static compiler
//! would pick, converts the arguments to the selected parameter types, and
//! hands the call to a [`Host`].
//!
//! # Resolution
//!
//! Candidates come from the [`MemberRegistry`], which caches what a
//! [`TypeCatalog`] reports per type. Each candidate is scored against the
//! arguments ([`score`]); the strict maximum wins and ties keep the earlier
//! candidate. Numeric arguments are compared by rank, so `f(5)` prefers
//! `f(Integer)` over `f(int)` over `f(long)` over `f(Object)`.
//!
//! ```ignore
//! let binder = Binder::new(catalog.clone(), host).with_scanner(catalog);
//! binder.import("app.*")?;
//! let counter = binder.construct_named("Counter", vec![])?;
//! binder.call(&counter, "add", vec![Value::Int(5)])?;
//! ```
//!
//! # Configuration
//!
//! [`BinderConfig`] is loaded from TOML; see [`config`].

mod binder;
pub mod coerce;
pub mod config;
pub mod error;
mod memo;
mod resolve;
pub mod score;

pub use binder::Binder;
pub use bindery_invocation::{Host, HostError, Invocation, MemberRef};
pub use bindery_primitives::{Decimal, NumRank, ObjectRef, Primitive, TypeHandle, TypeRef, Value};
pub use bindery_registry::{
	Candidate, Field, Imported, MemberRegistry, NamespaceScanner, RegistryError, StaticCatalog,
	TypeCatalog,
};
pub use config::{BinderConfig, ConfigError, ConfigLayer};
pub use error::{BindError, Result};
pub use score::Scorer;
