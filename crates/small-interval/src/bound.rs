use std::fmt;

/// An interval endpoint. The derived order is `NegInf < Finite(_) < PosInf`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bound {
    NegInf,
    Finite(i64),
    PosInf,
}

impl Bound {
    fn infinity(positive: bool) -> Self {
        if positive { Bound::PosInf } else { Bound::NegInf }
    }

    /// Extended addition. `None` for `-∞ + +∞`; finite overflow saturates to
    /// the matching infinity.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        match (self, other) {
            (Bound::NegInf, Bound::PosInf) | (Bound::PosInf, Bound::NegInf) => None,
            (Bound::NegInf, _) | (_, Bound::NegInf) => Some(Bound::NegInf),
            (Bound::PosInf, _) | (_, Bound::PosInf) => Some(Bound::PosInf),
            (Bound::Finite(a), Bound::Finite(b)) => Some(
                a.checked_add(b)
                    .map_or_else(|| Bound::infinity(a > 0), Bound::Finite),
            ),
        }
    }

    /// Extended multiplication. `None` for `0 · ±∞`; finite overflow
    /// saturates to the infinity of the product's sign.
    pub fn checked_mul(self, other: Self) -> Option<Self> {
        match (self, other) {
            (Bound::Finite(a), Bound::Finite(b)) => Some(
                a.checked_mul(b)
                    .map_or_else(|| Bound::infinity((a < 0) == (b < 0)), Bound::Finite),
            ),
            (Bound::Finite(0), _) | (_, Bound::Finite(0)) => None,
            (a, b) => Some(Bound::infinity(a.is_positive() == b.is_positive())),
        }
    }

    /// Add a constant, saturating to infinity on overflow.
    pub fn shift(self, by: i64) -> Self {
        match self {
            Bound::Finite(a) => a
                .checked_add(by)
                .map_or_else(|| Bound::infinity(by > 0), Bound::Finite),
            infinite => infinite,
        }
    }

    pub fn is_finite(self) -> bool {
        matches!(self, Bound::Finite(_))
    }

    fn is_positive(self) -> bool {
        self > Bound::Finite(0)
    }

    pub fn is_non_negative(self) -> bool {
        self >= Bound::Finite(0)
    }
}

impl From<i64> for Bound {
    fn from(value: i64) -> Self {
        Bound::Finite(value)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::NegInf => f.write_str("-∞"),
            Bound::Finite(value) => write!(f, "{value}"),
            Bound::PosInf => f.write_str("+∞"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order() {
        assert!(Bound::NegInf < Bound::Finite(i64::MIN));
        assert!(Bound::Finite(-1) < Bound::Finite(0));
        assert!(Bound::Finite(i64::MAX) < Bound::PosInf);
    }

    #[test]
    fn test_undefined_arithmetic() {
        assert_eq!(Bound::NegInf.checked_add(Bound::PosInf), None);
        assert_eq!(Bound::Finite(0).checked_mul(Bound::PosInf), None);
        assert_eq!(Bound::NegInf.checked_mul(Bound::Finite(0)), None);
    }

    #[test]
    fn test_extended_arithmetic() {
        assert_eq!(Bound::Finite(2).checked_add(Bound::Finite(3)), Some(Bound::Finite(5)));
        assert_eq!(Bound::Finite(2).checked_add(Bound::PosInf), Some(Bound::PosInf));
        assert_eq!(Bound::Finite(-2).checked_mul(Bound::PosInf), Some(Bound::NegInf));
        assert_eq!(Bound::NegInf.checked_mul(Bound::NegInf), Some(Bound::PosInf));
        assert_eq!(
            Bound::Finite(i64::MAX).checked_add(Bound::Finite(1)),
            Some(Bound::PosInf)
        );
        assert_eq!(
            Bound::Finite(i64::MIN).checked_mul(Bound::Finite(2)),
            Some(Bound::NegInf)
        );
        assert_eq!(Bound::Finite(i64::MIN).shift(-1), Bound::NegInf);
        assert_eq!(Bound::PosInf.shift(-7), Bound::PosInf);
    }

    #[test]
    fn test_display() {
        let rendered: Vec<_> = [Bound::NegInf, Bound::Finite(-3), Bound::PosInf]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, ["-∞", "-3", "+∞"]);
    }
}
