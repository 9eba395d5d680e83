//! Zero analysis: tracks whether each variable is zero, non-zero or unknown.
//!
//! The lattice is finite, so the analysis joins at loop heads instead of
//! widening.

mod condition;
mod flow;

use std::fmt;

use small_analysis::{Analysis, JoinWidening, StatementDispatch, WideningStrategy};
use small_lattice::Lattice;

pub use condition::{ZeroCondition, ZeroConditionRule};
pub use flow::{ZeroFlow, ZeroFlowRule};

// ============================================================================
// Zero Domain
// ============================================================================

/// `BOTTOM < Z < U` and `BOTTOM < NZ < U`; `Z` and `NZ` are incomparable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZeroValue {
    Bottom,
    /// Definitely zero.
    Z,
    /// Definitely non-zero.
    NZ,
    /// Unknown.
    U,
}

impl fmt::Display for ZeroValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ZeroValue::Bottom => "BOTTOM",
            ZeroValue::Z => "Z",
            ZeroValue::NZ => "NZ",
            ZeroValue::U => "U",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZeroLattice;

impl Lattice for ZeroLattice {
    type Value = ZeroValue;

    fn top(&self) -> ZeroValue {
        ZeroValue::U
    }

    fn bottom(&self) -> ZeroValue {
        ZeroValue::Bottom
    }

    fn join(&self, a: &ZeroValue, b: &ZeroValue) -> ZeroValue {
        match (a, b) {
            (ZeroValue::Bottom, x) | (x, ZeroValue::Bottom) => *x,
            (x, y) if x == y => *x,
            _ => ZeroValue::U,
        }
    }

    fn meet(&self, a: &ZeroValue, b: &ZeroValue) -> ZeroValue {
        match (a, b) {
            (ZeroValue::U, x) | (x, ZeroValue::U) => *x,
            (x, y) if x == y => *x,
            _ => ZeroValue::Bottom,
        }
    }

    fn is_descendant(&self, a: &ZeroValue, b: &ZeroValue) -> bool {
        a != b && (*a == ZeroValue::Bottom || *b == ZeroValue::U)
    }

    fn successors(&self, value: &ZeroValue) -> Vec<ZeroValue> {
        match value {
            ZeroValue::Bottom => vec![ZeroValue::Z, ZeroValue::NZ],
            ZeroValue::Z | ZeroValue::NZ => vec![ZeroValue::U],
            ZeroValue::U => vec![],
        }
    }

    fn predecessors(&self, value: &ZeroValue) -> Vec<ZeroValue> {
        match value {
            ZeroValue::Bottom => vec![],
            ZeroValue::Z | ZeroValue::NZ => vec![ZeroValue::Bottom],
            ZeroValue::U => vec![ZeroValue::Z, ZeroValue::NZ],
        }
    }
}

// ============================================================================
// Analysis
// ============================================================================

pub type ZeroAnalysis =
    Analysis<ZeroLattice, StatementDispatch<ZeroFlow>, ZeroCondition, JoinWidening<ZeroLattice>>;

/// The zero analysis with its default configuration.
pub fn zero_analysis() -> ZeroAnalysis {
    Analysis::new(
        ZeroLattice,
        StatementDispatch::new(ZeroFlow),
        ZeroCondition,
        JoinWidening::new(ZeroLattice),
    )
    .with_widening(WideningStrategy::Never)
}
