use small_lattice::Lattice;

use crate::bound::Bound;
use crate::value::IntervalValue;

/// The interval lattice, ordered by containment.
///
/// `interval_size` (N) bounds the finite part of the lattice: transfer
/// functions push any bound beyond ±N out to infinity, and the cover
/// relation jumps from ±N straight to ±∞.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalLattice {
    interval_size: i64,
}

impl Default for IntervalLattice {
    fn default() -> Self {
        Self::new(500)
    }
}

impl IntervalLattice {
    pub fn new(interval_size: u32) -> Self {
        Self {
            interval_size: i64::from(interval_size),
        }
    }

    pub fn interval_size(&self) -> i64 {
        self.interval_size
    }

    /// Pull `value` back into the N-bounded lattice.
    ///
    /// A low bound below -N becomes -∞ and one above N becomes N; a high
    /// bound above N becomes +∞ and one below -N becomes -N. The result
    /// always contains the input.
    pub fn normalize(&self, value: IntervalValue) -> IntervalValue {
        let n = self.interval_size;
        match value {
            IntervalValue::Int { low, high } => {
                let low = if low < Bound::Finite(-n) {
                    Bound::NegInf
                } else if low > Bound::Finite(n) {
                    Bound::Finite(n)
                } else {
                    low
                };
                let high = if high > Bound::Finite(n) {
                    Bound::PosInf
                } else if high < Bound::Finite(-n) {
                    Bound::Finite(-n)
                } else {
                    high
                };
                IntervalValue::int(low, high)
            }
            other => other,
        }
    }
}

impl Lattice for IntervalLattice {
    type Value = IntervalValue;

    fn top(&self) -> IntervalValue {
        IntervalValue::Top
    }

    fn bottom(&self) -> IntervalValue {
        IntervalValue::Bottom
    }

    fn join(&self, a: &IntervalValue, b: &IntervalValue) -> IntervalValue {
        match (*a, *b) {
            (IntervalValue::Bottom, x) | (x, IntervalValue::Bottom) => x,
            (
                IntervalValue::Int { low: l1, high: h1 },
                IntervalValue::Int { low: l2, high: h2 },
            ) => IntervalValue::Int {
                low: l1.min(l2),
                high: h1.max(h2),
            },
            (
                IntervalValue::Bool { low: l1, high: h1 },
                IntervalValue::Bool { low: l2, high: h2 },
            ) => IntervalValue::Bool {
                low: l1.min(l2),
                high: h1.max(h2),
            },
            _ => IntervalValue::Top,
        }
    }

    fn meet(&self, a: &IntervalValue, b: &IntervalValue) -> IntervalValue {
        match (*a, *b) {
            (IntervalValue::Top, x) | (x, IntervalValue::Top) => x,
            (
                IntervalValue::Int { low: l1, high: h1 },
                IntervalValue::Int { low: l2, high: h2 },
            ) => IntervalValue::int(l1.max(l2), h1.min(h2)),
            (
                IntervalValue::Bool { low: l1, high: h1 },
                IntervalValue::Bool { low: l2, high: h2 },
            ) => {
                let (low, high) = (l1.max(l2), h1.min(h2));
                if low > high {
                    IntervalValue::Bottom
                } else {
                    IntervalValue::Bool { low, high }
                }
            }
            _ => IntervalValue::Bottom,
        }
    }

    fn is_descendant(&self, a: &IntervalValue, b: &IntervalValue) -> bool {
        if a == b {
            return false;
        }
        match (*a, *b) {
            (IntervalValue::Bottom, _) | (_, IntervalValue::Top) => true,
            (
                IntervalValue::Int { low: l1, high: h1 },
                IntervalValue::Int { low: l2, high: h2 },
            ) => l2 <= l1 && h1 <= h2,
            (
                IntervalValue::Bool { low: l1, high: h1 },
                IntervalValue::Bool { low: l2, high: h2 },
            ) => l2 <= l1 && h1 <= h2,
            _ => false,
        }
    }

    fn successors(&self, value: &IntervalValue) -> Vec<IntervalValue> {
        let n = self.interval_size;
        match *value {
            IntervalValue::Top => vec![],
            IntervalValue::Bottom => {
                let mut covers = vec![
                    IntervalValue::boolean(true),
                    IntervalValue::boolean(false),
                    IntervalValue::constant(0),
                ];
                for i in 1..=n {
                    covers.push(IntervalValue::constant(i));
                    covers.push(IntervalValue::constant(-i));
                }
                covers
            }
            IntervalValue::Bool {
                low: false,
                high: true,
            } => vec![IntervalValue::Top],
            IntervalValue::Bool { .. } => vec![IntervalValue::any_bool()],
            IntervalValue::Int {
                low: Bound::NegInf,
                high: Bound::PosInf,
            } => vec![IntervalValue::Top],
            IntervalValue::Int { low, high } => {
                let mut covers = Vec::new();
                match low {
                    Bound::Finite(l) if l == -n => {
                        covers.push(IntervalValue::int(Bound::NegInf, high));
                    }
                    Bound::Finite(l) if l > -n => covers.push(IntervalValue::int(l - 1, high)),
                    _ => {}
                }
                match high {
                    Bound::Finite(h) if h == n => {
                        covers.push(IntervalValue::int(low, Bound::PosInf));
                    }
                    Bound::Finite(h) if h < n => covers.push(IntervalValue::int(low, h + 1)),
                    _ => {}
                }
                covers
            }
        }
    }

    fn predecessors(&self, value: &IntervalValue) -> Vec<IntervalValue> {
        let n = self.interval_size;
        match *value {
            IntervalValue::Bottom => vec![],
            IntervalValue::Top => vec![IntervalValue::any_bool(), IntervalValue::any_int()],
            IntervalValue::Bool {
                low: false,
                high: true,
            } => vec![IntervalValue::boolean(false), IntervalValue::boolean(true)],
            IntervalValue::Bool { .. } => vec![IntervalValue::Bottom],
            IntervalValue::Int { low, high } if low == high => vec![IntervalValue::Bottom],
            IntervalValue::Int { low, high } => {
                let mut covers = Vec::new();
                match low {
                    Bound::NegInf => covers.push(IntervalValue::int(-n, high)),
                    Bound::Finite(l) if l < n => covers.push(IntervalValue::int(l + 1, high)),
                    _ => {}
                }
                match high {
                    Bound::PosInf => covers.push(IntervalValue::int(low, n)),
                    Bound::Finite(h) if h > -n => covers.push(IntervalValue::int(low, h - 1)),
                    _ => {}
                }
                covers
            }
        }
    }
}
