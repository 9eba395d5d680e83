//! Interval analysis: tracks a `[low, high]` range for each integer variable
//! and a boolean interval for each boolean one.
//!
//! Bounds beyond the configured interval size are pushed out to infinity, and
//! loop heads are widened, so every run terminates.

mod bound;
mod condition;
mod flow;
mod lattice;
mod value;
mod widening;

use small_analysis::{Analysis, StatementDispatch, WideningStrategy};

pub use bound::Bound;
pub use condition::{IntervalCondition, IntervalConditionRule};
pub use flow::{IntervalFlow, IntervalFlowRule};
pub use lattice::IntervalLattice;
pub use value::IntervalValue;
pub use widening::{IntervalWidening, IntervalWideningRule};

pub type IntervalAnalysis =
    Analysis<IntervalLattice, StatementDispatch<IntervalFlow>, IntervalCondition, IntervalWidening>;

/// The interval analysis with the default interval size.
pub fn interval_analysis() -> IntervalAnalysis {
    interval_analysis_with(IntervalLattice::default())
}

/// The interval analysis over `lattice`, widening at every loop-head revisit.
pub fn interval_analysis_with(lattice: IntervalLattice) -> IntervalAnalysis {
    Analysis::new(
        lattice,
        StatementDispatch::new(IntervalFlow::new(lattice)),
        IntervalCondition::new(lattice),
        IntervalWidening::new(lattice),
    )
    .with_widening(WideningStrategy::LoopHeads)
}
