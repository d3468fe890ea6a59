use std::fmt;
use std::sync::Arc;

use bindery_primitives::{TypeHandle, TypeRef};
use rustc_hash::FxHashMap as HashMap;
use smallvec::SmallVec;

use crate::catalog::{CallTarget, ConstructorDecl, FieldDecl, InvocationKind, MethodDecl};

/// Ordered candidates sharing one member name, in registry enumeration order.
pub type CandidateSet = Arc<[Arc<Candidate>]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateKind {
	Constructor,
	Method,
}

/// One constructor or method signature considered during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
	owner: TypeHandle,
	name: Arc<str>,
	kind: CandidateKind,
	params: SmallVec<[TypeRef; 4]>,
	invocation: InvocationKind,
	target: CallTarget,
}

impl Candidate {
	pub fn method(owner: TypeHandle, decl: &MethodDecl) -> Self {
		Self {
			owner,
			name: Arc::from(decl.name.as_str()),
			kind: CandidateKind::Method,
			params: decl.params.iter().cloned().collect(),
			invocation: decl.invocation,
			target: decl.target,
		}
	}

	pub fn constructor(owner: TypeHandle, decl: &ConstructorDecl) -> Self {
		Self {
			name: Arc::from(owner.simple_name()),
			owner,
			kind: CandidateKind::Constructor,
			params: decl.params.iter().cloned().collect(),
			invocation: InvocationKind::Static,
			target: decl.target,
		}
	}

	/// Type that declares this member.
	pub fn owner(&self) -> &TypeHandle {
		&self.owner
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn params(&self) -> &[TypeRef] {
		&self.params
	}

	pub fn is_static(&self) -> bool {
		self.invocation == InvocationKind::Static
	}

	pub fn target(&self) -> CallTarget {
		self.target
	}

	/// Returns `name(param, ...)`, the form used to compare overloads.
	pub fn signature(&self) -> String {
		let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
		format!("{}({})", self.name, params.join(", "))
	}

	/// Returns true if both have the same name and parameter list.
	pub(crate) fn same_signature(&self, other: &Candidate) -> bool {
		self.name == other.name && self.params == other.params
	}
}

impl fmt::Display for Candidate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.owner, self.signature())
	}
}

/// A field, including enum constants, of a loaded type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
	pub owner: TypeHandle,
	pub decl: FieldDecl,
}

impl Field {
	pub fn name(&self) -> &str {
		&self.decl.name
	}

	pub fn ty(&self) -> &TypeRef {
		&self.decl.ty
	}

	pub fn is_static(&self) -> bool {
		self.decl.invocation == InvocationKind::Static
	}

	pub fn is_enum_constant(&self) -> bool {
		self.decl.enum_constant
	}
}

impl fmt::Display for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.owner, self.decl.name)
	}
}

/// Loaded members of one type, inherited ones included.
#[derive(Debug, Default)]
pub(crate) struct MemberTable {
	/// `None` for enums, which expose no constructors.
	pub(crate) constructors: Option<CandidateSet>,
	pub(crate) methods: HashMap<Arc<str>, CandidateSet>,
	pub(crate) fields: HashMap<Arc<str>, Arc<Field>>,
}

impl MemberTable {
	pub(crate) fn method_count(&self) -> usize {
		self.methods.values().map(|set| set.len()).sum()
	}
}
