use std::collections::BTreeSet;
use std::fmt;

use crate::operator::{
    BoolComparisonOperator, EqualityOperator, IntBinaryOperator, IntComparisonOperator,
};

/// A Small expression.
///
/// Integer and boolean expressions share one type; the parser guarantees that
/// conditions are boolean and assignment right-hand sides are well formed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression {
    Variable(String),
    IntConstant(i64),
    IntBinary {
        left: Box<Expression>,
        operator: IntBinaryOperator,
        right: Box<Expression>,
    },
    BoolConstant(bool),
    BoolNot(Box<Expression>),
    IntComparison {
        left: Box<Expression>,
        operator: IntComparisonOperator,
        right: Box<Expression>,
    },
    EqualComparison {
        left: Box<Expression>,
        operator: EqualityOperator,
        right: Box<Expression>,
    },
    BoolComparison {
        left: Box<Expression>,
        operator: BoolComparisonOperator,
        right: Box<Expression>,
    },
    /// A call to another function. Analyses treat the result as unknown.
    FunctionCall {
        name: String,
        arguments: Vec<Expression>,
    },
}

// -- Constructors -----------------------------------------------------------

impl Expression {
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    pub fn int(value: i64) -> Self {
        Self::IntConstant(value)
    }

    pub fn bool(value: bool) -> Self {
        Self::BoolConstant(value)
    }

    pub fn binary(left: Expression, operator: IntBinaryOperator, right: Expression) -> Self {
        Self::IntBinary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn compare(left: Expression, operator: IntComparisonOperator, right: Expression) -> Self {
        Self::IntComparison {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn equal(left: Expression, operator: EqualityOperator, right: Expression) -> Self {
        Self::EqualComparison {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn logical(left: Expression, operator: BoolComparisonOperator, right: Expression) -> Self {
        Self::BoolComparison {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn not(inner: Expression) -> Self {
        Self::BoolNot(Box::new(inner))
    }

    pub fn call(name: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Self::FunctionCall {
            name: name.into(),
            arguments,
        }
    }
}

// -- Queries ----------------------------------------------------------------

impl Expression {
    /// The logical negation of a boolean expression.
    ///
    /// Comparisons flip their operator, constants flip their value, a double
    /// negation cancels and `and`/`or` follow De Morgan. Anything else is
    /// wrapped in `!`.
    pub fn negate(&self) -> Expression {
        match self {
            Self::BoolConstant(value) => Self::BoolConstant(!value),
            Self::BoolNot(inner) => inner.as_ref().clone(),
            Self::IntComparison {
                left,
                operator,
                right,
            } => Self::IntComparison {
                left: left.clone(),
                operator: operator.negate(),
                right: right.clone(),
            },
            Self::EqualComparison {
                left,
                operator,
                right,
            } => Self::EqualComparison {
                left: left.clone(),
                operator: operator.negate(),
                right: right.clone(),
            },
            Self::BoolComparison {
                left,
                operator,
                right,
            } => Self::logical(left.negate(), operator.dual(), right.negate()),
            other => Self::not(other.clone()),
        }
    }

    /// `true` for `Variable` and constants.
    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            Self::Variable(_) | Self::IntConstant(_) | Self::BoolConstant(_)
        )
    }

    /// Collect every variable name read by this expression.
    pub fn collect_variables(&self, into: &mut BTreeSet<String>) {
        match self {
            Self::Variable(name) => {
                into.insert(name.clone());
            }
            Self::IntConstant(_) | Self::BoolConstant(_) => {}
            Self::BoolNot(inner) => inner.collect_variables(into),
            Self::IntBinary { left, right, .. }
            | Self::IntComparison { left, right, .. }
            | Self::EqualComparison { left, right, .. }
            | Self::BoolComparison { left, right, .. } => {
                left.collect_variables(into);
                right.collect_variables(into);
            }
            Self::FunctionCall { arguments, .. } => {
                for argument in arguments {
                    argument.collect_variables(into);
                }
            }
        }
    }

    pub fn variables(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names
    }
}

// -- Printing ---------------------------------------------------------------

/// Write `expr`, parenthesized unless it is atomic, a call or a negation.
fn fmt_operand(expr: &Expression, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expr {
        Expression::IntBinary { .. }
        | Expression::IntComparison { .. }
        | Expression::EqualComparison { .. }
        | Expression::BoolComparison { .. } => write!(f, "({expr})"),
        Expression::IntConstant(value) if *value < 0 => write!(f, "({value})"),
        _ => write!(f, "{expr}"),
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(name) => f.write_str(name),
            Self::IntConstant(value) => write!(f, "{value}"),
            Self::BoolConstant(value) => write!(f, "{value}"),
            Self::BoolNot(inner) => {
                f.write_str("!")?;
                fmt_operand(inner, f)
            }
            Self::IntBinary {
                left,
                operator,
                right,
            } => {
                fmt_operand(left, f)?;
                write!(f, " {operator} ")?;
                fmt_operand(right, f)
            }
            Self::IntComparison {
                left,
                operator,
                right,
            } => {
                fmt_operand(left, f)?;
                write!(f, " {operator} ")?;
                fmt_operand(right, f)
            }
            Self::EqualComparison {
                left,
                operator,
                right,
            } => {
                fmt_operand(left, f)?;
                write!(f, " {operator} ")?;
                fmt_operand(right, f)
            }
            Self::BoolComparison {
                left,
                operator,
                right,
            } => {
                fmt_operand(left, f)?;
                write!(f, " {operator} ")?;
                fmt_operand(right, f)
            }
            Self::FunctionCall { name, arguments } => {
                write!(f, "{name}(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Expression {
        Expression::variable(name)
    }

    #[test]
    fn test_negate_comparisons() {
        let lt = Expression::compare(var("i"), IntComparisonOperator::Lt, var("n"));
        insta::assert_snapshot!(lt.negate().to_string(), @"i >= n");

        let eq = Expression::equal(var("x"), EqualityOperator::Eq, Expression::int(0));
        insta::assert_snapshot!(eq.negate().to_string(), @"x != 0");

        assert_eq!(Expression::bool(false).negate(), Expression::bool(true));
        assert_eq!(lt.negate().negate(), lt);
    }

    #[test]
    fn test_negate_uses_de_morgan() {
        let both = Expression::logical(
            Expression::compare(var("a"), IntComparisonOperator::Gt, Expression::int(0)),
            BoolComparisonOperator::And,
            Expression::not(var("flag")),
        );
        insta::assert_snapshot!(both.negate().to_string(), @"(a <= 0) or flag");
    }

    #[test]
    fn test_negate_wraps_opaque_expressions() {
        let call = Expression::call("check", vec![var("x")]);
        assert_eq!(call.negate(), Expression::not(call.clone()));
        assert_eq!(call.negate().negate(), call);
    }

    #[test]
    fn test_display_parenthesizes_nested_operands() {
        let expr = Expression::binary(
            Expression::binary(var("a"), IntBinaryOperator::Add, Expression::int(2)),
            IntBinaryOperator::Mul,
            Expression::int(-3),
        );
        insta::assert_snapshot!(expr.to_string(), @"(a + 2) * (-3)");
    }

    #[test]
    fn test_variables_includes_call_arguments() {
        let expr = Expression::binary(
            Expression::call("f", vec![var("x"), Expression::int(1)]),
            IntBinaryOperator::Sub,
            var("y"),
        );
        let names: Vec<_> = expr.variables().into_iter().collect();
        assert_eq!(names, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_structural_equality() {
        let a = Expression::binary(var("y"), IntBinaryOperator::Add, Expression::int(1));
        let b = Expression::binary(var("y"), IntBinaryOperator::Add, Expression::int(1));
        assert_eq!(a, b);
        assert!(!a.is_atomic());
        assert!(var("y").is_atomic());
    }
}
