//! Syntax tree of the Small language.
//!
//! Every node is an immutable value with structural equality and hashing, so
//! statements double as graph keys once wrapped in a [`ProgramPoint`].

mod expr;
mod function;
mod operator;
mod point;
mod stmt;

pub use expr::Expression;
pub use function::Function;
pub use operator::{
    BoolComparisonOperator, EqualityOperator, IntBinaryOperator, IntComparisonOperator,
};
pub use point::ProgramPoint;
pub use stmt::Statement;
