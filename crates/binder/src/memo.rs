//! Resolution memo.
//!
//! Overload selection depends only on the receiver type, the static flag,
//! the member name and the *shape* of the arguments (their runtime types,
//! plus the magnitude rank of decimals while recasting). Repeated calls with
//! the same shape reuse the earlier [`MemberRef`].

use bindery_invocation::MemberRef;
use bindery_primitives::{NumRank, TypeHandle, TypeRef, Value};
use parking_lot::Mutex;
use rustc_hash::FxHashMap as HashMap;
use smallvec::SmallVec;

/// What scoring can observe about one argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ArgShape {
	Null,
	Typed(TypeRef),
	/// A decimal reclassified by magnitude.
	Decimal(NumRank),
}

impl ArgShape {
	fn of(arg: &Value, recast_decimals: bool) -> Self {
		match arg {
			Value::Null => Self::Null,
			Value::Decimal(d) if recast_decimals => Self::Decimal(NumRank::of_decimal(d)),
			other => other.runtime_type().map_or(Self::Null, Self::Typed),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct MemoKey {
	ty: TypeHandle,
	is_static: bool,
	name: String,
	shape: SmallVec<[ArgShape; 4]>,
}

impl MemoKey {
	pub(crate) fn new(ty: &TypeHandle, is_static: bool, name: &str, args: &[Value], recast_decimals: bool) -> Self {
		Self {
			ty: ty.clone(),
			is_static,
			name: name.to_string(),
			shape: args.iter().map(|arg| ArgShape::of(arg, recast_decimals)).collect(),
		}
	}
}

#[derive(Debug, Default)]
pub(crate) struct ResolutionMemo {
	entries: Mutex<HashMap<MemoKey, MemberRef>>,
}

impl ResolutionMemo {
	pub(crate) fn get(&self, key: &MemoKey) -> Option<MemberRef> {
		self.entries.lock().get(key).cloned()
	}

	pub(crate) fn insert(&self, key: MemoKey, resolved: MemberRef) {
		self.entries.lock().insert(key, resolved);
	}

	pub(crate) fn len(&self) -> usize {
		self.entries.lock().len()
	}
}
