//! Numeric rank ladder.
//!
//! Every numeric or character-like type maps to exactly one [`NumRank`];
//! everything else maps to [`NumRank::Nan`]. Ranks are totally ordered along
//! the integer-width ladder followed by the floating ladder, and overload
//! scoring compares the rank of an argument against the rank of a parameter.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::types::TypeRef;
use crate::value::Value;


/// Score for an argument whose rank equals the parameter's.
pub const SCORE_SAME_RANK: u32 = 4;
/// Score for a widening conversion to a non-character rank.
pub const SCORE_WIDENING: u32 = 3;
/// Score for an integral argument passed to a raw character parameter.
pub const SCORE_TO_CHAR: u32 = 2;

/// Numeric classification in ascending width order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumRank {
	/// Not a number.
	Nan,
	Byte,
	Short,
	Char,
	Int,
	Long,
	Float,
	Double,
}

impl NumRank {
	/// Rank of a declared or runtime type. Raw and boxed forms share a rank.
	pub fn of(ty: &TypeRef) -> Self {
		ty.primitive().map_or(Self::Nan, |p| p.rank())
	}

	/// Smallest rank able to represent `value` exactly.
	///
	/// Whole values take the first integer rung whose range contains them;
	/// fractional or out-of-`long` values fall through to the floating
	/// rungs. [`Decimal`] tops out near 7.9e28, which `f32` always covers,
	/// so every decimal ranks at most [`NumRank::Float`].
	pub fn of_decimal(value: &Decimal) -> Self {
		if value.fract().is_zero() {
			if within(value, i8::MIN, i8::MAX) {
				return Self::Byte;
			} else if within(value, i16::MIN, i16::MAX) {
				return Self::Short;
			} else if within(value, i32::MIN, i32::MAX) {
				return Self::Int;
			} else if within(value, i64::MIN, i64::MAX) {
				return Self::Long;
			}
		}
		if value.to_f32().is_some_and(f32::is_finite) {
			Self::Float
		} else if value.to_f64().is_some_and(f64::is_finite) {
			Self::Double
		} else {
			Self::Nan
		}
	}

	/// Rank of an argument, reclassifying decimals by magnitude when
	/// `recast_decimals` is set.
	pub fn of_argument(value: &Value, ty: &TypeRef, recast_decimals: bool) -> Self {
		match value {
			Value::Decimal(d) if recast_decimals => Self::of_decimal(d),
			_ => Self::of(ty),
		}
	}
}

fn within<T: Into<Decimal>>(value: &Decimal, min: T, max: T) -> bool {
	*value >= min.into() && *value <= max.into()
}

/// Scores passing `arg` (of runtime type `arg_type`) to a `param_type` parameter.
///
/// Returns 0 when the pairing is not a legal implicit numeric conversion.
pub fn score_numeric(
	arg: &Value,
	arg_type: &TypeRef,
	param_type: &TypeRef,
	recast_decimals: bool,
) -> u32 {
	let param_rank = NumRank::of(param_type);
	let arg_rank = NumRank::of_argument(arg, arg_type, recast_decimals);
	if arg_rank == NumRank::Nan || param_rank == NumRank::Nan {
		return 0;
	}

	if arg_rank == param_rank {
		SCORE_SAME_RANK
	} else if param_rank > arg_rank {
		if param_rank != NumRank::Char {
			SCORE_WIDENING
		} else if param_type.is_raw() {
			SCORE_TO_CHAR
		} else {
			0
		}
	} else if param_rank == NumRank::Char && param_type.is_raw() && arg_rank <= NumRank::Int {
		SCORE_TO_CHAR
	} else {
		0
	}
}

enum Numeric {
	Integral(i128),
	Floating(f64),
	Decimal(Decimal),
}

fn numeric(value: &Value) -> Option<Numeric> {
	Some(match value {
		Value::Byte(v) => Numeric::Integral(i128::from(*v)),
		Value::Short(v) => Numeric::Integral(i128::from(*v)),
		Value::Char(c) => Numeric::Integral(i128::from(u32::from(*c))),
		Value::Int(v) => Numeric::Integral(i128::from(*v)),
		Value::Long(v) => Numeric::Integral(i128::from(*v)),
		Value::Float(v) => Numeric::Floating(f64::from(*v)),
		Value::Double(v) => Numeric::Floating(*v),
		Value::Decimal(d) => Numeric::Decimal(*d),
		_ => return None,
	})
}

/// Interprets a UTF-16 code unit as a `char`.
///
/// Surrogate code units (`0xD800..=0xDFFF`) have no `char` and become
/// U+FFFD, so narrowing such a value to `char` and back is lossy.
fn char_from_bits(bits: u16) -> char {
	char::from_u32(u32::from(bits)).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Converts a numeric or character value to the representation of `rank`.
///
/// Integer targets truncate to the low-order bits, floating sources are first
/// truncated toward zero (saturating), and decimals drop their fractional
/// part. Returns `None` for non-numeric values or [`NumRank::Nan`].
pub fn convert_to_rank(value: &Value, rank: NumRank) -> Option<Value> {
	if let (Value::Char(_), NumRank::Char) = (value, rank) {
		return Some(value.clone());
	}
	let num = numeric(value)?;
	let whole = match &num {
		Numeric::Integral(v) => *v,
		Numeric::Floating(v) => *v as i64 as i128,
		Numeric::Decimal(d) => d.trunc().to_i128().unwrap_or_default(),
	};
	let real = match &num {
		Numeric::Integral(v) => *v as f64,
		Numeric::Floating(v) => *v,
		Numeric::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
	};
	// Sub-int integer targets narrow through int, like floating-point casts do.
	let via_int = match &num {
		Numeric::Floating(v) => i128::from(*v as i32),
		_ => whole,
	};

	Some(match rank {
		NumRank::Nan => return None,
		NumRank::Byte => Value::Byte(via_int as i8),
		NumRank::Short => Value::Short(via_int as i16),
		NumRank::Char => Value::Char(char_from_bits(via_int as u16)),
		NumRank::Int => match &num {
			Numeric::Floating(v) => Value::Int(*v as i32),
			_ => Value::Int(whole as i32),
		},
		NumRank::Long => Value::Long(whole as i64),
		NumRank::Float => match &num {
			// Rounds once; going through `f64` would round twice for wide longs.
			Numeric::Integral(v) => Value::Float(*v as i64 as f32),
			Numeric::Decimal(d) => Value::Float(d.to_f32().unwrap_or(f32::NAN)),
			Numeric::Floating(v) => Value::Float(*v as f32),
		},
		NumRank::Double => Value::Double(real),
	})
}
