//! Candidate scoring.
//!
//! A candidate's score is the sum of its per-argument scores, or BAD
//! (`None`) as soon as one argument cannot be passed to its parameter.
//! Higher is better. Per argument, from best to worst:
//!
//! | pairing                                         | score |
//! |-------------------------------------------------|-------|
//! | runtime type equals parameter type              | 6     |
//! | parameter is a supertype of the runtime type    | 5     |
//! | sequence passed to an `Object[]` parameter      | 4     |
//! | same-rank numeric, boxed/raw boolean            | 4     |
//! | numeric widening                                | 3     |
//! | integral to raw `char`                          | 2     |
//! | null to `Object`                                | 2     |
//! | null to any other reference type                | 1     |
//! | non-null to `Object`                            | 1     |
//!
//! A candidate with no parameters called with no arguments scores 1.
//!
//! Host types count as sequences when the catalog lists `List` among their
//! supertypes.

use std::sync::Arc;

use bindery_primitives::{Primitive, TypeRef, Value, score_numeric};
use bindery_registry::{Candidate, MemberRegistry};
use tracing::trace;


pub const SCORE_EXACT: u32 = 6;
pub const SCORE_SUBTYPE: u32 = 5;
pub const SCORE_SEQUENCE_TO_ARRAY: u32 = 4;
pub const SCORE_UNBOXED_BOOL: u32 = 4;
pub const SCORE_NULL_TO_TOP: u32 = 2;
pub const SCORE_NULL_TO_REFERENCE: u32 = 1;
pub const SCORE_VALUE_TO_TOP: u32 = 1;
pub const SCORE_NO_ARGS: u32 = 1;

/// Scores candidates against concrete argument lists.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'r> {
	registry: &'r MemberRegistry,
	recast_decimals: bool,
}

impl<'r> Scorer<'r> {
	pub fn new(registry: &'r MemberRegistry, recast_decimals: bool) -> Self {
		Self {
			registry,
			recast_decimals,
		}
	}

	/// Total score of `candidate` for `args`, or `None` if it cannot accept them.
	pub fn score(&self, candidate: &Candidate, args: &[Value]) -> Option<u32> {
		let params = candidate.params();
		if params.len() != args.len() {
			return None;
		}
		if params.is_empty() {
			return Some(SCORE_NO_ARGS);
		}
		params
			.iter()
			.zip(args)
			.try_fold(0, |total, (param, arg)| Some(total + self.score_argument(arg, param)?))
	}

	/// Score for passing one argument to one parameter.
	pub fn score_argument(&self, arg: &Value, param: &TypeRef) -> Option<u32> {
		let Some(arg_type) = arg.runtime_type() else {
			return match param {
				TypeRef::Raw(_) => None,
				TypeRef::Object => Some(SCORE_NULL_TO_TOP),
				_ => Some(SCORE_NULL_TO_REFERENCE),
			};
		};
		if param.is_top() {
			return Some(SCORE_VALUE_TO_TOP);
		}
		if arg_type == *param {
			return Some(SCORE_EXACT);
		}
		if !param.is_raw() && self.registry.is_subtype(&arg_type.handle(), &param.handle()) {
			return Some(SCORE_SUBTYPE);
		}
		match (&arg_type, param) {
			(arg_type, TypeRef::ObjectArray) if self.is_sequence(arg_type) => Some(SCORE_SEQUENCE_TO_ARRAY),
			(TypeRef::Boxed(Primitive::Bool), TypeRef::Raw(Primitive::Bool)) => Some(SCORE_UNBOXED_BOOL),
			_ => match score_numeric(arg, &arg_type, param, self.recast_decimals) {
				0 => None,
				score => Some(score),
			},
		}
	}

	/// Returns true for the builtin sequence type and host types implementing it.
	pub fn is_sequence(&self, ty: &TypeRef) -> bool {
		*ty == TypeRef::Sequence || self.registry.is_subtype(&ty.handle(), &TypeRef::Sequence.handle())
	}

	/// Selects the candidate with the strictly highest positive score.
	///
	/// Ties keep the earliest candidate in `candidates` order.
	pub fn select<'c>(
		&self,
		candidates: &'c [Arc<Candidate>],
		args: &[Value],
	) -> Option<(&'c Arc<Candidate>, u32)> {
		let mut best: Option<(&'c Arc<Candidate>, u32)> = None;
		for candidate in candidates {
			let score = self.score(candidate, args);
			trace!(candidate = %candidate, ?score, "scored");
			let Some(score) = score else {
				continue;
			};
			if best.is_none_or(|(_, high)| score > high) {
				best = Some((candidate, score));
			}
		}
		best
	}
}
