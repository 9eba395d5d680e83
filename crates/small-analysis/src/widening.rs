use std::fmt::Debug;

use small_lattice::Lattice;

/// Forces convergence over lattices of unbounded height.
pub trait WideningOperator {
    type Value: Clone + PartialEq + Debug;
    type Rule: Copy + Debug;

    /// Combine the value from the previous visit with the newly computed one.
    /// The result must be above both.
    fn apply(&self, last: &Self::Value, new: &Self::Value) -> (Self::Value, Self::Rule);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinWideningRule {
    Join,
}

/// Widening that only joins. Sufficient for finite-height lattices.
#[derive(Clone, Debug, Default)]
pub struct JoinWidening<L> {
    lattice: L,
}

impl<L> JoinWidening<L> {
    pub fn new(lattice: L) -> Self {
        Self { lattice }
    }
}

impl<L: Lattice> WideningOperator for JoinWidening<L> {
    type Value = L::Value;
    type Rule = JoinWideningRule;

    fn apply(&self, last: &L::Value, new: &L::Value) -> (L::Value, JoinWideningRule) {
        (self.lattice.join(last, new), JoinWideningRule::Join)
    }
}

/// Strategy for when to apply widening at loop heads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WideningStrategy {
    /// Only join, never widen. Suitable for finite-height lattices that
    /// guarantee termination without widening.
    Never,
    /// Widen every time a loop head is revisited.
    #[default]
    LoopHeads,
    /// Join for the first `n` revisits of each loop head, then widen.
    Delayed(usize),
}

impl WideningStrategy {
    /// Whether the `revisit`-th revisit (starting at 1) of a loop head widens.
    pub fn widens(&self, revisit: usize) -> bool {
        match self {
            Self::Never => false,
            Self::LoopHeads => true,
            Self::Delayed(n) => revisit > *n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delayed_strategy_joins_first() {
        let strategy = WideningStrategy::Delayed(2);
        assert!(!strategy.widens(1));
        assert!(!strategy.widens(2));
        assert!(strategy.widens(3));
        assert!(WideningStrategy::LoopHeads.widens(1));
        assert!(!WideningStrategy::Never.widens(100));
    }
}
