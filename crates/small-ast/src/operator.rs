use std::fmt;

/// Integer arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntBinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl IntBinaryOperator {
    /// Evaluate the operator on two concrete integers.
    ///
    /// Returns `None` on overflow or division by zero.
    pub fn evaluate(self, left: i64, right: i64) -> Option<i64> {
        match self {
            Self::Add => left.checked_add(right),
            Self::Sub => left.checked_sub(right),
            Self::Mul => left.checked_mul(right),
            Self::Div => left.checked_div(right),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

/// Ordering comparisons between integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntComparisonOperator {
    Lt,
    Gt,
    Lte,
    Gte,
}

impl IntComparisonOperator {
    /// The operator that holds exactly when `self` does not.
    pub fn negate(self) -> Self {
        match self {
            Self::Lt => Self::Gte,
            Self::Gt => Self::Lte,
            Self::Lte => Self::Gt,
            Self::Gte => Self::Lt,
        }
    }

    /// The operator to use when both operands swap sides: `a < b` is `b > a`.
    pub fn flip(self) -> Self {
        match self {
            Self::Lt => Self::Gt,
            Self::Gt => Self::Lt,
            Self::Lte => Self::Gte,
            Self::Gte => Self::Lte,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Lte => "<=",
            Self::Gte => ">=",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EqualityOperator {
    Eq,
    Neq,
}

impl EqualityOperator {
    pub fn negate(self) -> Self {
        match self {
            Self::Eq => Self::Neq,
            Self::Neq => Self::Eq,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Neq => "!=",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoolComparisonOperator {
    And,
    Or,
}

impl BoolComparisonOperator {
    /// The De Morgan dual: `and` becomes `or` and vice versa.
    pub fn dual(self) -> Self {
        match self {
            Self::And => Self::Or,
            Self::Or => Self::And,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

macro_rules! display_symbol {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.symbol())
                }
            }
        )*
    };
}

display_symbol!(
    IntBinaryOperator,
    IntComparisonOperator,
    EqualityOperator,
    BoolComparisonOperator
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_negate_is_involution() {
        for op in [
            IntComparisonOperator::Lt,
            IntComparisonOperator::Gt,
            IntComparisonOperator::Lte,
            IntComparisonOperator::Gte,
        ] {
            assert_eq!(op.negate().negate(), op);
            assert_eq!(op.flip().flip(), op);
            assert_ne!(op.negate(), op);
        }
    }

    #[test]
    fn test_evaluate_reports_undefined_results() {
        assert_eq!(IntBinaryOperator::Sub.evaluate(0, 5), Some(-5));
        assert_eq!(IntBinaryOperator::Div.evaluate(7, 2), Some(3));
        assert_eq!(IntBinaryOperator::Div.evaluate(1, 0), None);
        assert_eq!(IntBinaryOperator::Add.evaluate(i64::MAX, 1), None);
    }
}
