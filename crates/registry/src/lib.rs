//! Member registry for dynamic dispatch.
//!
//! The registry caches, per fully-qualified type name, every accessible
//! constructor, method, field and nested type reported by a [`TypeCatalog`].
//! It is the only component that talks to the catalog; everything downstream
//! reads the cache.
//!
//! # Lifecycle
//!
//! A type is *registered* once its [`TypeDescriptor`] is cached (names, kind,
//! supertypes, nested types). It is *loaded* once its member tables have been
//! populated. Registration is cheap and happens on import; loading walks the
//! inheritance chain and happens on first member lookup.
//!
//! Entries are never removed.
//!
//! # Imports
//!
//! [`MemberRegistry::import`] feeds names discovered by a
//! [`NamespaceScanner`] into registration, mirroring an import statement
//! (`pkg.Type`, `pkg.*`, or `pkg.Outer.Inner`).

pub mod catalog;
pub mod collision;
pub mod error;
pub mod import;
pub mod member;
pub mod registry;
pub mod static_catalog;

pub use bindery_primitives as primitives;
pub use catalog::{
	CallTarget, ConstructorDecl, FieldDecl, InvocationKind, MemberListing, MethodDecl,
	NamespaceScanner, NestedTypeDecl, TypeCatalog, TypeDescriptor, TypeKind, Visibility,
};
pub use collision::SimpleNameCollision;
pub use error::RegistryError;
pub use import::Imported;
pub use member::{Candidate, CandidateKind, CandidateSet, Field};
pub use registry::MemberRegistry;
pub use static_catalog::{StaticCatalog, TypeBuilder};
