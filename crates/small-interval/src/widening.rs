use small_analysis::WideningOperator;
use small_lattice::Lattice;

use crate::bound::Bound;
use crate::lattice::IntervalLattice;
use crate::value::IntervalValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntervalWideningRule {
    /// `W(⊥, new) = new`
    Initial,
    /// `W([a, b], [c, d])`: every bound that moved outward snaps to infinity.
    Snap,
    /// Any other pair is joined.
    Join,
}

/// Standard interval widening. Each bound of a variable can snap at most
/// once, so a loop head stabilizes after a bounded number of revisits.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntervalWidening {
    lattice: IntervalLattice,
}

impl IntervalWidening {
    pub fn new(lattice: IntervalLattice) -> Self {
        Self { lattice }
    }
}

impl WideningOperator for IntervalWidening {
    type Value = IntervalValue;
    type Rule = IntervalWideningRule;

    fn apply(
        &self,
        last: &IntervalValue,
        new: &IntervalValue,
    ) -> (IntervalValue, IntervalWideningRule) {
        match (*last, *new) {
            (IntervalValue::Bottom, new) => (new, IntervalWideningRule::Initial),
            (
                IntervalValue::Int { low: a, high: b },
                IntervalValue::Int { low: c, high: d },
            ) => {
                let low = if a <= c { a } else { Bound::NegInf };
                let high = if b >= d { b } else { Bound::PosInf };
                (IntervalValue::Int { low, high }, IntervalWideningRule::Snap)
            }
            _ => (self.lattice.join(last, new), IntervalWideningRule::Join),
        }
    }
}
