//! Per-type member cache.
//!
//! # Invariants
//!
//! - The catalog is asked to describe a type, and to list its members, at most
//!   once per registry. Negative answers are cached too.
//! - Member tables are populated exactly once per type, even when several
//!   threads ask for the same type concurrently (`OnceLock` per entry).
//! - Nothing is ever removed.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use bindery_primitives::TypeHandle;
use parking_lot::{Mutex, RwLock};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use tracing::{debug, trace, warn};

use crate::catalog::{MemberListing, NestedTypeDecl, TypeCatalog, TypeDescriptor, Visibility};
use crate::collision::SimpleNameCollision;
use crate::member::{Candidate, CandidateSet, Field, MemberTable};

#[cfg(test)]
mod tests;

pub(crate) struct TypeEntry {
	pub(crate) handle: TypeHandle,
	pub(crate) descriptor: TypeDescriptor,
	nested: HashMap<String, NestedTypeDecl>,
	registered: AtomicBool,
	declared: OnceLock<Option<MemberListing>>,
	members: OnceLock<Arc<MemberTable>>,
}

impl TypeEntry {
	fn new(handle: TypeHandle, descriptor: TypeDescriptor) -> Self {
		let nested = descriptor
			.nested
			.iter()
			.map(|decl| (decl.simple_name.clone(), decl.clone()))
			.collect();
		Self {
			handle,
			descriptor,
			nested,
			registered: AtomicBool::new(false),
			declared: OnceLock::new(),
			members: OnceLock::new(),
		}
	}
}

/// Process-wide (per [`MemberRegistry`] instance) cache of type members.
pub struct MemberRegistry {
	catalog: Arc<dyn TypeCatalog>,
	types: RwLock<HashMap<TypeHandle, Arc<TypeEntry>>>,
	unknown: RwLock<HashSet<TypeHandle>>,
	simple_names: RwLock<HashMap<String, TypeHandle>>,
	collisions: Mutex<Vec<SimpleNameCollision>>,
	pub(crate) imports: RwLock<HashSet<String>>,
}

impl fmt::Debug for MemberRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemberRegistry")
			.field("types", &self.types.read().len())
			.field("simple_names", &self.simple_names.read().len())
			.finish_non_exhaustive()
	}
}

impl MemberRegistry {
	pub fn new(catalog: Arc<dyn TypeCatalog>) -> Self {
		Self {
			catalog,
			types: RwLock::new(HashMap::default()),
			unknown: RwLock::new(HashSet::default()),
			simple_names: RwLock::new(HashMap::default()),
			collisions: Mutex::new(Vec::new()),
			imports: RwLock::new(HashSet::default()),
		}
	}

	/// Returns the cached entry for `ty`, describing it on first sight.
	pub(crate) fn entry(&self, ty: &TypeHandle) -> Option<Arc<TypeEntry>> {
		if let Some(entry) = self.types.read().get(ty) {
			return Some(Arc::clone(entry));
		}
		if self.unknown.read().contains(ty) {
			return None;
		}

		let mut types = self.types.write();
		if let Some(entry) = types.get(ty) {
			return Some(Arc::clone(entry));
		}
		let mut unknown = self.unknown.write();
		if unknown.contains(ty) {
			return None;
		}
		match self.catalog.describe_type(ty) {
			Some(descriptor) => {
				trace!(ty = %ty, kind = ?descriptor.kind, "described type");
				let entry = Arc::new(TypeEntry::new(ty.clone(), descriptor));
				types.insert(ty.clone(), Arc::clone(&entry));
				Some(entry)
			}
			None => {
				trace!(ty = %ty, "type unknown to catalog");
				unknown.insert(ty.clone());
				None
			}
		}
	}

	/// Registers `ty`: caches its descriptor and nested-type index and maps its
	/// simple name to it.
	///
	/// Idempotent. The simple name is re-pointed on every call, so the most
	/// recently registered type wins a simple-name collision. Returns `false`
	/// if the catalog does not know the type.
	pub fn register_type(&self, ty: &TypeHandle) -> bool {
		let Some(entry) = self.entry(ty) else {
			return false;
		};
		entry.registered.store(true, Ordering::Release);
		self.point_simple_name(&entry);
		true
	}

	pub(crate) fn point_simple_name(&self, entry: &TypeEntry) {
		let simple = &entry.descriptor.simple_name;
		let previous = self
			.simple_names
			.write()
			.insert(simple.clone(), entry.handle.clone());
		if let Some(replaced) = previous.filter(|prev| *prev != entry.handle) {
			warn!(
				simple_name = %simple,
				replaced = %replaced,
				winner = %entry.handle,
				"simple name collision; last registration wins"
			);
			self.collisions.lock().push(SimpleNameCollision {
				simple_name: simple.clone(),
				replaced,
				winner: entry.handle.clone(),
			});
		}
	}

	/// Populates the member tables of `ty` if that has not happened yet.
	///
	/// Returns `false` if the catalog does not know the type.
	pub fn ensure_loaded(&self, ty: &TypeHandle) -> bool {
		self.members(ty).is_some()
	}

	fn members(&self, ty: &TypeHandle) -> Option<Arc<MemberTable>> {
		let entry = self.entry(ty)?;
		let table = entry
			.members
			.get_or_init(|| Arc::new(self.build_table(&entry)));
		Some(Arc::clone(table))
	}

	fn declared<'e>(&self, entry: &'e TypeEntry) -> Option<&'e MemberListing> {
		entry
			.declared
			.get_or_init(|| self.catalog.describe_members(&entry.handle))
			.as_ref()
	}

	fn build_table(&self, entry: &TypeEntry) -> MemberTable {
		let mut table = MemberTable::default();
		if entry.descriptor.visibility != Visibility::Public {
			debug!(ty = %entry.handle, "restricted type; no accessible members");
			return table;
		}

		if !entry.descriptor.is_enum() {
			let constructors: Vec<Arc<Candidate>> = self
				.declared(entry)
				.map(|listing| {
					listing
						.constructors
						.iter()
						.filter(|decl| decl.visibility == Visibility::Public)
						.map(|decl| Arc::new(Candidate::constructor(entry.handle.clone(), decl)))
						.collect()
				})
				.unwrap_or_default();
			table.constructors = Some(constructors.into());
		}

		let mut methods: HashMap<Arc<str>, Vec<Arc<Candidate>>> = HashMap::default();
		for level in self.inheritance_chain(entry) {
			let Some(listing) = self.declared(&level) else {
				continue;
			};
			for decl in listing
				.methods
				.iter()
				.filter(|decl| decl.visibility == Visibility::Public)
			{
				let candidate = Candidate::method(level.handle.clone(), decl);
				let family = methods.entry(Arc::from(decl.name.as_str())).or_default();
				if family.iter().any(|seen| seen.same_signature(&candidate)) {
					continue;
				}
				family.push(Arc::new(candidate));
			}
			for decl in listing
				.fields
				.iter()
				.filter(|decl| decl.visibility == Visibility::Public)
			{
				table
					.fields
					.entry(Arc::from(decl.name.as_str()))
					.or_insert_with(|| {
						Arc::new(Field {
							owner: level.handle.clone(),
							decl: decl.clone(),
						})
					});
			}
		}
		table.methods = methods
			.into_iter()
			.map(|(name, family)| (name, family.into()))
			.collect();

		debug!(
			ty = %entry.handle,
			constructors = table.constructors.as_ref().map_or(0, |set| set.len()),
			methods = table.method_count(),
			fields = table.fields.len(),
			"loaded members"
		);
		table
	}

	/// Superclass chain (most-derived first, `entry` included), followed by
	/// every reachable interface in breadth-first order.
	fn inheritance_chain(&self, entry: &TypeEntry) -> Vec<Arc<TypeEntry>> {
		let mut seen = HashSet::default();
		let mut chain: Vec<Arc<TypeEntry>> = Vec::new();

		let mut current = Some(entry.handle.clone());
		while let Some(handle) = current.take() {
			if !seen.insert(handle.clone()) {
				break;
			}
			let Some(level) = self.entry(&handle) else {
				break;
			};
			current = level.descriptor.superclass.clone();
			chain.push(level);
		}

		let mut queue: VecDeque<TypeHandle> = chain
			.iter()
			.flat_map(|level| level.descriptor.interfaces.iter().cloned())
			.collect();
		while let Some(handle) = queue.pop_front() {
			if !seen.insert(handle.clone()) {
				continue;
			}
			let Some(level) = self.entry(&handle) else {
				continue;
			};
			queue.extend(level.descriptor.interfaces.iter().cloned());
			chain.push(level);
		}
		chain
	}

	/// Methods named `name` on `ty`, loading the type on demand. Empty if none.
	pub fn lookup_methods(&self, ty: &TypeHandle, name: &str) -> CandidateSet {
		self.members(ty)
			.and_then(|table| table.methods.get(name).cloned())
			.unwrap_or_else(|| Vec::new().into())
	}

	/// Constructors of `ty`, loading the type on demand. Empty for enums.
	pub fn lookup_constructors(&self, ty: &TypeHandle) -> CandidateSet {
		self.members(ty)
			.and_then(|table| table.constructors.clone())
			.unwrap_or_else(|| Vec::new().into())
	}

	/// Field (or enum constant) named `name` on `ty` or any supertype.
	pub fn lookup_field(&self, ty: &TypeHandle, name: &str) -> Option<Arc<Field>> {
		self.members(ty)
			.and_then(|table| table.fields.get(name).cloned())
	}

	/// Returns true if `ty` has at least one accessible method named `name`.
	pub fn has_method(&self, ty: &TypeHandle, name: &str) -> bool {
		!self.lookup_methods(ty, name).is_empty()
	}

	/// Fully-qualified handle most recently registered under `simple_name`.
	pub fn full_name_of(&self, simple_name: &str) -> Option<TypeHandle> {
		self.simple_names.read().get(simple_name).cloned()
	}

	pub fn simple_name_of(&self, ty: &TypeHandle) -> Option<String> {
		self.entry(ty).map(|entry| entry.descriptor.simple_name.clone())
	}

	pub fn descriptor(&self, ty: &TypeHandle) -> Option<TypeDescriptor> {
		self.entry(ty).map(|entry| entry.descriptor.clone())
	}

	/// Nested type of `ty` declared under `simple_name`.
	pub fn nested_type_of(&self, ty: &TypeHandle, simple_name: &str) -> Option<NestedTypeDecl> {
		self.entry(ty)
			.and_then(|entry| entry.nested.get(simple_name).cloned())
	}

	pub fn is_registered(&self, ty: &TypeHandle) -> bool {
		self.types
			.read()
			.get(ty)
			.is_some_and(|entry| entry.registered.load(Ordering::Acquire))
	}

	pub fn is_loaded(&self, ty: &TypeHandle) -> bool {
		self.types
			.read()
			.get(ty)
			.is_some_and(|entry| entry.members.get().is_some())
	}

	/// Returns true if `simple_name` maps to a registered type.
	pub fn is_imported(&self, simple_name: &str) -> bool {
		self.full_name_of(simple_name)
			.is_some_and(|ty| self.is_registered(&ty))
	}

	/// Returns true if `sup` is `sub` or one of its transitive supertypes.
	pub fn is_subtype(&self, sub: &TypeHandle, sup: &TypeHandle) -> bool {
		if sub == sup {
			return true;
		}
		let mut seen = HashSet::default();
		let mut queue = VecDeque::from([sub.clone()]);
		while let Some(handle) = queue.pop_front() {
			if !seen.insert(handle.clone()) {
				continue;
			}
			let Some(entry) = self.entry(&handle) else {
				continue;
			};
			for parent in entry.descriptor.supertypes() {
				if parent == sup {
					return true;
				}
				queue.push_back(parent.clone());
			}
		}
		false
	}

	/// Simple-name collisions recorded so far, oldest first.
	pub fn collisions(&self) -> Vec<SimpleNameCollision> {
		self.collisions.lock().clone()
	}

	/// Number of registered types.
	pub fn len(&self) -> usize {
		self.types
			.read()
			.values()
			.filter(|entry| entry.registered.load(Ordering::Acquire))
			.count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
