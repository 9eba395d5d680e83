use std::collections::BTreeSet;
use std::fmt;

use crate::stmt::{Statement, fmt_body};

/// A Small function definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    line: usize,
    name: String,
    parameters: Vec<String>,
    variables: BTreeSet<String>,
    body: Vec<Statement>,
    source: Option<String>,
}

#[bon::bon]
impl Function {
    /// Create a function. The variable set is computed from the parameters
    /// and every name the body assigns or reads.
    #[builder]
    pub fn new(
        /// Line of the `function` keyword.
        #[builder(default = 1)]
        line: usize,
        #[builder(into)] name: String,
        #[builder(default)] parameters: Vec<String>,
        body: Vec<Statement>,
        /// Original source text, kept for display only.
        #[builder(into)]
        source: Option<String>,
    ) -> Self {
        let mut variables: BTreeSet<String> = parameters.iter().cloned().collect();
        for statement in &body {
            statement.collect_variables(&mut variables);
        }
        Self {
            line,
            name,
            parameters,
            variables,
            body,
            source,
        }
    }
}

impl Function {
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Parameters plus every variable assigned or read in the body.
    pub fn variables(&self) -> &BTreeSet<String> {
        &self.variables
    }

    /// Variables that are not parameters.
    pub fn locals(&self) -> impl Iterator<Item = &String> {
        self.variables
            .iter()
            .filter(|name| !self.parameters.contains(name))
    }

    pub fn body(&self) -> &[Statement] {
        &self.body
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Find a statement at `line`, searching nested bodies.
    pub fn statement_at(&self, line: usize) -> Option<&Statement> {
        fn find(body: &[Statement], line: usize) -> Option<&Statement> {
            body.iter().find_map(|statement| {
                if statement.line() == line {
                    return Some(statement);
                }
                match statement {
                    Statement::IfElse {
                        if_body, else_body, ..
                    } => find(if_body, line).or_else(|| find(else_body, line)),
                    Statement::While { body, .. } => find(body, line),
                    Statement::Assignment { .. } | Statement::Return { .. } => None,
                }
            })
        }
        find(&self.body, line)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "function {}({}) {{",
            self.name,
            self.parameters.join(", ")
        )?;
        fmt_body(f, &self.body, 1)?;
        write!(f, "}}")
    }
}
