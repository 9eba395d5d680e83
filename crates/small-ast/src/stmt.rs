use std::collections::BTreeSet;
use std::fmt;

use crate::expr::Expression;

/// A Small statement. `line` identifies the statement within its function.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statement {
    Assignment {
        line: usize,
        variable: String,
        value: Expression,
    },
    IfElse {
        line: usize,
        condition: Expression,
        if_body: Vec<Statement>,
        else_body: Vec<Statement>,
    },
    While {
        line: usize,
        condition: Expression,
        body: Vec<Statement>,
    },
    Return {
        line: usize,
        value: Expression,
    },
}

impl Statement {
    pub fn assign(line: usize, variable: impl Into<String>, value: Expression) -> Self {
        Self::Assignment {
            line,
            variable: variable.into(),
            value,
        }
    }

    pub fn if_else(
        line: usize,
        condition: Expression,
        if_body: Vec<Statement>,
        else_body: Vec<Statement>,
    ) -> Self {
        Self::IfElse {
            line,
            condition,
            if_body,
            else_body,
        }
    }

    pub fn while_loop(line: usize, condition: Expression, body: Vec<Statement>) -> Self {
        Self::While {
            line,
            condition,
            body,
        }
    }

    pub fn ret(line: usize, value: Expression) -> Self {
        Self::Return { line, value }
    }

    pub fn line(&self) -> usize {
        match self {
            Self::Assignment { line, .. }
            | Self::IfElse { line, .. }
            | Self::While { line, .. }
            | Self::Return { line, .. } => *line,
        }
    }

    /// The branch condition of an `if` or `while`.
    pub fn condition(&self) -> Option<&Expression> {
        match self {
            Self::IfElse { condition, .. } | Self::While { condition, .. } => Some(condition),
            Self::Assignment { .. } | Self::Return { .. } => None,
        }
    }

    pub fn is_loop(&self) -> bool {
        matches!(self, Self::While { .. })
    }

    /// One-line rendering without nested bodies, e.g. `while (i < n)`.
    pub fn header(&self) -> String {
        match self {
            Self::Assignment {
                variable, value, ..
            } => format!("{variable} = {value}"),
            Self::IfElse { condition, .. } => format!("if ({condition})"),
            Self::While { condition, .. } => format!("while ({condition})"),
            Self::Return { value, .. } => format!("return {value}"),
        }
    }

    /// Collect every variable this statement (and its nested bodies) assigns
    /// or reads.
    pub fn collect_variables(&self, into: &mut BTreeSet<String>) {
        match self {
            Self::Assignment {
                variable, value, ..
            } => {
                into.insert(variable.clone());
                value.collect_variables(into);
            }
            Self::IfElse {
                condition,
                if_body,
                else_body,
                ..
            } => {
                condition.collect_variables(into);
                for statement in if_body.iter().chain(else_body) {
                    statement.collect_variables(into);
                }
            }
            Self::While {
                condition, body, ..
            } => {
                condition.collect_variables(into);
                for statement in body {
                    statement.collect_variables(into);
                }
            }
            Self::Return { value, .. } => value.collect_variables(into),
        }
    }

    pub(crate) fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "    ".repeat(depth);
        match self {
            Self::Assignment { .. } | Self::Return { .. } => {
                writeln!(f, "{indent}{};", self.header())
            }
            Self::IfElse {
                if_body, else_body, ..
            } => {
                writeln!(f, "{indent}{} {{", self.header())?;
                fmt_body(f, if_body, depth + 1)?;
                if else_body.is_empty() {
                    writeln!(f, "{indent}}}")
                } else {
                    writeln!(f, "{indent}}} else {{")?;
                    fmt_body(f, else_body, depth + 1)?;
                    writeln!(f, "{indent}}}")
                }
            }
            Self::While { body, .. } => {
                writeln!(f, "{indent}{} {{", self.header())?;
                fmt_body(f, body, depth + 1)?;
                writeln!(f, "{indent}}}")
            }
        }
    }
}

pub(crate) fn fmt_body(
    f: &mut fmt::Formatter<'_>,
    body: &[Statement],
    depth: usize,
) -> fmt::Result {
    for statement in body {
        statement.fmt_indented(f, depth)?;
    }
    Ok(())
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
