use std::fmt::Debug;

/// A lattice of abstract values.
///
/// The lattice is an object rather than a trait on the value type so that a
/// domain can carry parameters, such as the bound at which interval limits
/// collapse to infinity.
///
/// Implementations must satisfy the usual laws: `join` and `meet` are
/// commutative, associative, idempotent and absorptive, `join(a, bottom) == a`
/// and `meet(a, top) == a`. The strict order given by [`is_descendant`] must
/// agree with them.
///
/// [`is_descendant`]: Lattice::is_descendant
pub trait Lattice {
    type Value: Clone + PartialEq + Debug;

    fn top(&self) -> Self::Value;

    fn bottom(&self) -> Self::Value;

    /// Least upper bound.
    fn join(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// Greatest lower bound.
    fn meet(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// `true` when `a` is strictly below (more precise than) `b`.
    fn is_descendant(&self, a: &Self::Value, b: &Self::Value) -> bool;

    /// `true` when `a` is strictly above (less precise than) `b`.
    fn is_ancestor(&self, a: &Self::Value, b: &Self::Value) -> bool {
        self.is_descendant(b, a)
    }

    /// Non-strict order: `a == b` or `a` is a descendant of `b`.
    fn is_subseteq(&self, a: &Self::Value, b: &Self::Value) -> bool {
        a == b || self.is_descendant(a, b)
    }

    /// Immediate upper covers of `value`.
    ///
    /// Only used for enumeration and diagnostics, never by the fixpoint
    /// engine.
    fn successors(&self, value: &Self::Value) -> Vec<Self::Value>;

    /// Immediate lower covers of `value`.
    fn predecessors(&self, value: &Self::Value) -> Vec<Self::Value>;

    fn is_bottom(&self, value: &Self::Value) -> bool {
        *value == self.bottom()
    }

    fn is_top(&self, value: &Self::Value) -> bool {
        *value == self.top()
    }
}
