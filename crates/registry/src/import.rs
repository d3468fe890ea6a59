//! Import statements.
//!
//! An import string names a type (`pkg.Type`), a namespace (`pkg` or
//! `pkg.*`), or a nested type written with dots (`pkg.Outer.Inner`). The
//! scanner resolves it to type handles which are then registered. Outer
//! types are always registered; nested types only when they are static,
//! since instance-bound nested types are reached through their enclosing
//! type instead.

use bindery_primitives::{NESTED_SEPARATOR, TypeHandle};
use tracing::{debug, trace};

use crate::catalog::NamespaceScanner;
use crate::error::RegistryError;
use crate::registry::MemberRegistry;


/// Outcome of a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Imported {
	/// The same import string was processed before; nothing was scanned.
	Cached,
	/// Number of types registered by this import.
	Fresh(usize),
}

impl MemberRegistry {
	/// Resolves `import` through `scanner` and registers what it names.
	pub fn import(
		&self,
		scanner: &dyn NamespaceScanner,
		import: &str,
	) -> Result<Imported, RegistryError> {
		if self.imports.read().contains(import) {
			return Ok(Imported::Cached);
		}

		let found = match import.strip_suffix(".*") {
			Some(namespace) => scanner.types_in(namespace),
			None => {
				let in_namespace = scanner.types_in(import);
				if in_namespace.is_empty() {
					resolve_nested_path(scanner, import).into_iter().collect()
				} else {
					in_namespace
				}
			}
		};
		if found.is_empty() {
			return Err(RegistryError::NothingToImport(import.to_string()));
		}

		let mut registered = 0;
		for ty in &found {
			let Some(entry) = self.entry(ty) else {
				trace!(ty = %ty, "scanner reported a type the catalog does not describe");
				continue;
			};
			if entry.descriptor.is_nested() && !entry.descriptor.is_static {
				trace!(ty = %ty, "skipping instance-bound nested type");
				continue;
			}
			if self.register_type(ty) {
				registered += 1;
			}
		}

		self.imports.write().insert(import.to_string());
		debug!(import, registered, "imported");
		Ok(Imported::Fresh(registered))
	}

	/// Returns true if `import` was processed before.
	pub fn was_imported(&self, import: &str) -> bool {
		self.imports.read().contains(import)
	}
}

/// Finds a type for a dotted path, treating trailing dots as nested-type
/// separators one at a time until the scanner recognizes the name.
fn resolve_nested_path(scanner: &dyn NamespaceScanner, import: &str) -> Option<TypeHandle> {
	let mut candidate = import.to_string();
	loop {
		if let Some(found) = scanner.find_type(&candidate) {
			return Some(found);
		}
		let idx = candidate.rfind('.')?;
		candidate.replace_range(idx..=idx, &NESTED_SEPARATOR.to_string());
	}
}
