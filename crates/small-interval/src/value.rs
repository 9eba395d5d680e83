use std::fmt;

use crate::bound::Bound;

/// An abstract value of the interval analysis.
///
/// Integer and boolean intervals are incomparable; their join is `Top` and
/// their meet is `Bottom`. Intervals are never empty: an empty intersection is
/// represented by `Bottom`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntervalValue {
    Bottom,
    Int { low: Bound, high: Bound },
    Bool { low: bool, high: bool },
    Top,
}

impl IntervalValue {
    /// `[low, high]`, or `Bottom` when `low > high`.
    pub fn int(low: impl Into<Bound>, high: impl Into<Bound>) -> Self {
        let (low, high) = (low.into(), high.into());
        if low > high {
            IntervalValue::Bottom
        } else {
            IntervalValue::Int { low, high }
        }
    }

    pub fn constant(value: i64) -> Self {
        IntervalValue::int(value, value)
    }

    /// `[-∞, +∞]`: any integer, but still not a boolean.
    pub fn any_int() -> Self {
        IntervalValue::Int {
            low: Bound::NegInf,
            high: Bound::PosInf,
        }
    }

    pub fn boolean(value: bool) -> Self {
        IntervalValue::Bool {
            low: value,
            high: value,
        }
    }

    pub fn any_bool() -> Self {
        IntervalValue::Bool {
            low: false,
            high: true,
        }
    }

    /// The bounds of an integer interval.
    pub fn as_int(&self) -> Option<(Bound, Bound)> {
        match self {
            IntervalValue::Int { low, high } => Some((*low, *high)),
            _ => None,
        }
    }
}

impl fmt::Display for IntervalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalValue::Bottom => f.write_str("⊥"),
            IntervalValue::Top => f.write_str("⊤"),
            IntervalValue::Int { low, high } => write!(f, "[{low}, {high}]"),
            IntervalValue::Bool { low, high } => write!(f, "[{low}, {high}]"),
        }
    }
}
