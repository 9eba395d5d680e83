use small_analysis::{AbstractEnvironment, Bindings, ConditionUpdateFunction};
use small_ast::{EqualityOperator, Expression, IntComparisonOperator};

use crate::bound::Bound;
use crate::lattice::IntervalLattice;
use crate::value::IntervalValue;

/// Which narrowing rule fired on a branch condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntervalConditionRule {
    /// `y < c`: `y` is in `[-∞, c - 1]`.
    LessThan,
    /// `y > c`: `y` is in `[c + 1, +∞]`.
    GreaterThan,
    /// `y <= c`: `y` is in `[-∞, c]`.
    LessOrEqual,
    /// `y >= c`: `y` is in `[c, +∞]`.
    GreaterOrEqual,
    /// `y == c`: `y` is `[c, c]`.
    Equal,
    /// Constant on the left, answered by the mirrored rule.
    Commuted,
    /// `y < x` with both operands integer intervals.
    LessThanVariable,
    GreaterThanVariable,
    LessOrEqualVariable,
    GreaterOrEqualVariable,
    /// `y == x` where only `x` is bottom.
    EqualFromLeft,
    /// `y == x` where only `y` is bottom.
    EqualFromRight,
    /// Literal `false`.
    Infeasible,
    /// No rule applies; the environment is unchanged.
    Identity,
}

type Narrowing = (Option<Bindings<IntervalValue>>, IntervalConditionRule);

fn identity() -> Narrowing {
    (Some(Bindings::new()), IntervalConditionRule::Identity)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct IntervalCondition {
    lattice: IntervalLattice,
}

impl IntervalCondition {
    pub fn new(lattice: IntervalLattice) -> Self {
        Self { lattice }
    }

    fn bind<const N: usize>(&self, entries: [(&str, IntervalValue); N]) -> Option<Bindings<IntervalValue>> {
        Some(
            entries
                .into_iter()
                .map(|(name, value)| (name.to_string(), self.lattice.normalize(value)))
                .collect(),
        )
    }

    fn compare_constant(&self, y: &str, operator: IntComparisonOperator, c: i64) -> Narrowing {
        use IntComparisonOperator::*;
        use IntervalConditionRule as Rule;

        let c = Bound::Finite(c);
        let (value, rule) = match operator {
            Lt => (IntervalValue::int(Bound::NegInf, c.shift(-1)), Rule::LessThan),
            Gt => (IntervalValue::int(c.shift(1), Bound::PosInf), Rule::GreaterThan),
            Lte => (IntervalValue::int(Bound::NegInf, c), Rule::LessOrEqual),
            Gte => (IntervalValue::int(c, Bound::PosInf), Rule::GreaterOrEqual),
        };
        (self.bind([(y, value)]), rule)
    }

    fn compare_variables(
        &self,
        y: &str,
        operator: IntComparisonOperator,
        x: &str,
        env: &AbstractEnvironment<IntervalValue>,
    ) -> Narrowing {
        use IntComparisonOperator::*;
        use IntervalConditionRule as Rule;

        let y_value = env.lookup(&self.lattice, y).as_int();
        let x_value = env.lookup(&self.lattice, x).as_int();
        let (Some((ly, hy)), Some((lx, hx))) = (y_value, x_value) else {
            return identity();
        };
        let (y_value, x_value, rule) = match operator {
            Lt => (
                IntervalValue::int(Bound::NegInf, hx.shift(-1)),
                IntervalValue::int(ly.shift(1), Bound::PosInf),
                Rule::LessThanVariable,
            ),
            Gt => (
                IntervalValue::int(lx.shift(1), Bound::PosInf),
                IntervalValue::int(Bound::NegInf, hy.shift(-1)),
                Rule::GreaterThanVariable,
            ),
            Lte => (
                IntervalValue::int(Bound::NegInf, hx),
                IntervalValue::int(ly, Bound::PosInf),
                Rule::LessOrEqualVariable,
            ),
            Gte => (
                IntervalValue::int(lx, Bound::PosInf),
                IntervalValue::int(Bound::NegInf, hy),
                Rule::GreaterOrEqualVariable,
            ),
        };
        (self.bind([(y, y_value), (x, x_value)]), rule)
    }

    fn equal_variables(&self, y: &str, x: &str, env: &AbstractEnvironment<IntervalValue>) -> Narrowing {
        let y_value = env.lookup(&self.lattice, y);
        let x_value = env.lookup(&self.lattice, x);
        match (y_value, x_value) {
            (IntervalValue::Bottom, IntervalValue::Bottom) => identity(),
            (value, IntervalValue::Bottom) => (
                self.bind([(y, value), (x, value)]),
                IntervalConditionRule::EqualFromLeft,
            ),
            (IntervalValue::Bottom, value) => (
                self.bind([(y, value), (x, value)]),
                IntervalConditionRule::EqualFromRight,
            ),
            _ => identity(),
        }
    }
}

impl ConditionUpdateFunction for IntervalCondition {
    type Value = IntervalValue;
    type Rule = IntervalConditionRule;

    fn get_variables(
        &self,
        condition: &Expression,
        env: &AbstractEnvironment<IntervalValue>,
    ) -> Narrowing {
        match condition {
            Expression::IntComparison {
                left,
                operator,
                right,
            } => match (left.as_ref(), right.as_ref()) {
                (Expression::Variable(y), Expression::IntConstant(c)) => {
                    self.compare_constant(y, *operator, *c)
                }
                (Expression::IntConstant(c), Expression::Variable(y)) => {
                    let (bindings, _) = self.compare_constant(y, operator.flip(), *c);
                    (bindings, IntervalConditionRule::Commuted)
                }
                (Expression::Variable(y), Expression::Variable(x)) => {
                    self.compare_variables(y, *operator, x, env)
                }
                _ => identity(),
            },
            Expression::EqualComparison {
                left,
                operator: EqualityOperator::Eq,
                right,
            } => match (left.as_ref(), right.as_ref()) {
                (Expression::Variable(y), Expression::IntConstant(c)) => (
                    self.bind([(y.as_str(), IntervalValue::constant(*c))]),
                    IntervalConditionRule::Equal,
                ),
                (Expression::IntConstant(c), Expression::Variable(y)) => (
                    self.bind([(y.as_str(), IntervalValue::constant(*c))]),
                    IntervalConditionRule::Commuted,
                ),
                (Expression::Variable(y), Expression::Variable(x)) => {
                    self.equal_variables(y, x, env)
                }
                _ => identity(),
            },
            Expression::BoolConstant(false) => (None, IntervalConditionRule::Infeasible),
            _ => identity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(entries: &[(&str, IntervalValue)]) -> AbstractEnvironment<IntervalValue> {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    fn narrow(
        condition: Expression,
        env: &AbstractEnvironment<IntervalValue>,
    ) -> (Bindings<IntervalValue>, IntervalConditionRule) {
        let (bindings, rule) = IntervalCondition::default().get_variables(&condition, env);
        (bindings.expect("condition should be feasible"), rule)
    }

    fn compare(left: Expression, operator: IntComparisonOperator, right: Expression) -> Expression {
        Expression::compare(left, operator, right)
    }

    fn var(name: &str) -> Expression {
        Expression::variable(name)
    }

    #[test]
    fn test_constant_table() {
        use IntComparisonOperator::*;
        use IntervalConditionRule as Rule;

        let cases = [
            (Lt, IntervalValue::int(Bound::NegInf, 4), Rule::LessThan),
            (Gt, IntervalValue::int(6, Bound::PosInf), Rule::GreaterThan),
            (Lte, IntervalValue::int(Bound::NegInf, 5), Rule::LessOrEqual),
            (Gte, IntervalValue::int(5, Bound::PosInf), Rule::GreaterOrEqual),
        ];
        for (operator, value, rule) in cases {
            let (bindings, fired) = narrow(compare(var("y"), operator, Expression::int(5)), &env(&[]));
            assert_eq!(bindings["y"], value, "y {operator} 5");
            assert_eq!(fired, rule);
        }
    }

    #[test]
    fn test_constant_on_left_mirrors() {
        // 0 < y is y > 0
        let (bindings, rule) = narrow(
            compare(Expression::int(0), IntComparisonOperator::Lt, var("y")),
            &env(&[]),
        );
        assert_eq!(bindings["y"], IntervalValue::int(1, Bound::PosInf));
        assert_eq!(rule, IntervalConditionRule::Commuted);

        let equal = Expression::equal(Expression::int(3), EqualityOperator::Eq, var("y"));
        let (bindings, rule) = narrow(equal, &env(&[]));
        assert_eq!(bindings["y"], IntervalValue::constant(3));
        assert_eq!(rule, IntervalConditionRule::Commuted);
    }

    #[test]
    fn test_variable_comparison_narrows_both_sides() {
        let current = env(&[
            ("i", IntervalValue::int(0, 10)),
            ("n", IntervalValue::int(5, 20)),
        ]);
        let (bindings, rule) = narrow(compare(var("i"), IntComparisonOperator::Lt, var("n")), &current);
        assert_eq!(rule, IntervalConditionRule::LessThanVariable);
        assert_eq!(bindings["i"], IntervalValue::int(Bound::NegInf, 19));
        assert_eq!(bindings["n"], IntervalValue::int(1, Bound::PosInf));

        let (bindings, rule) = narrow(compare(var("i"), IntComparisonOperator::Gte, var("n")), &current);
        assert_eq!(rule, IntervalConditionRule::GreaterOrEqualVariable);
        assert_eq!(bindings["i"], IntervalValue::int(5, Bound::PosInf));
        assert_eq!(bindings["n"], IntervalValue::int(Bound::NegInf, 10));
    }

    #[test]
    fn test_variable_comparison_needs_intervals() {
        let current = env(&[("i", IntervalValue::int(0, 10))]);
        let (bindings, rule) = narrow(compare(var("i"), IntComparisonOperator::Lt, var("n")), &current);
        assert!(bindings.is_empty());
        assert_eq!(rule, IntervalConditionRule::Identity);
    }

    #[test]
    fn test_equality_with_bottom_side_propagates() {
        let current = env(&[
            ("y", IntervalValue::constant(4)),
            ("x", IntervalValue::Bottom),
        ]);
        let (bindings, rule) = narrow(Expression::equal(var("y"), EqualityOperator::Eq, var("x")), &current);
        assert_eq!(rule, IntervalConditionRule::EqualFromLeft);
        assert_eq!(bindings["x"], IntervalValue::constant(4));
        assert_eq!(bindings["y"], IntervalValue::constant(4));
    }

    #[test]
    fn test_false_is_infeasible_and_rest_is_identity() {
        let (bindings, rule) =
            IntervalCondition::default().get_variables(&Expression::bool(false), &env(&[]));
        assert!(bindings.is_none());
        assert_eq!(rule, IntervalConditionRule::Infeasible);

        let not_equal = Expression::equal(var("y"), EqualityOperator::Neq, Expression::int(0));
        let (bindings, rule) = narrow(not_equal, &env(&[]));
        assert!(bindings.is_empty());
        assert_eq!(rule, IntervalConditionRule::Identity);
    }
}
