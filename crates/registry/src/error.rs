/// Registry errors.
///
/// Lookups never fail: unknown types and members come back empty. Only
/// operations that were asked to discover something report errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// The scanner found no type or namespace for an import string.
	#[error("nothing to import for `{0}`")]
	NothingToImport(String),

	/// An import was requested but no namespace scanner is configured.
	#[error("no namespace scanner configured; cannot import `{0}`")]
	NoScanner(String),
}
