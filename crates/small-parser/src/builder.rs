use std::collections::BTreeMap;

use small_ast::{Function, Statement};

use crate::error::ParseError;
use crate::syntax::{FunctionSyntax, StatementSyntax};

/// Maps byte offsets to 1-based line and column numbers.
#[derive(Debug, Clone)]
pub(crate) struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(src: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(src.match_indices('\n').map(|(offset, _)| offset + 1))
            .collect();
        Self { starts }
    }

    pub fn line(&self, offset: usize) -> usize {
        self.starts.partition_point(|start| *start <= offset)
    }

    pub fn position(&self, offset: usize) -> (usize, usize) {
        let line = self.line(offset);
        let start = self.starts.get(line.saturating_sub(1)).copied().unwrap_or(0);
        (line, offset - start + 1)
    }
}

/// Lowers parsed syntax into [`Function`]s, numbering statements by the
/// source line they start on.
pub(crate) struct Builder<'src> {
    source: &'src str,
    lines: LineIndex,
}

impl<'src> Builder<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            lines: LineIndex::new(source),
        }
    }

    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }

    pub fn program(&self, functions: Vec<FunctionSyntax<'src>>) -> Result<Vec<Function>, ParseError> {
        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        let mut built = Vec::with_capacity(functions.len());
        for syntax in functions {
            let line = self.lines.line(syntax.span.start);
            if let Some(previous) = seen.insert(syntax.name.value, line) {
                return Err(ParseError::DuplicateFunction {
                    name: syntax.name.value.to_string(),
                    line,
                    previous,
                });
            }
            built.push(self.function(syntax)?);
        }
        Ok(built)
    }

    fn function(&self, syntax: FunctionSyntax<'src>) -> Result<Function, ParseError> {
        let mut parameters: Vec<String> = Vec::with_capacity(syntax.parameters.len());
        for parameter in &syntax.parameters {
            if parameters.iter().any(|name| name == parameter.value) {
                return Err(ParseError::DuplicateParameter {
                    function: syntax.name.value.to_string(),
                    name: parameter.value.to_string(),
                });
            }
            parameters.push(parameter.value.to_string());
        }

        let body = self.body(syntax.body);
        let function = Function::builder()
            .line(self.lines.line(syntax.span.start))
            .name(syntax.name.value)
            .parameters(parameters)
            .body(body)
            .source(&self.source[syntax.span.start..syntax.span.end])
            .build();
        tracing::trace!(
            function = function.name(),
            line = function.line(),
            variables = function.variables().len(),
            "built function"
        );
        Ok(function)
    }

    fn body(&self, statements: Vec<StatementSyntax<'src>>) -> Vec<Statement> {
        statements
            .into_iter()
            .map(|statement| self.statement(statement))
            .collect()
    }

    fn statement(&self, syntax: StatementSyntax<'src>) -> Statement {
        let line = self.lines.line(syntax.span().start);
        match syntax {
            StatementSyntax::Assign {
                variable, value, ..
            } => Statement::assign(line, variable, value),
            StatementSyntax::IfElse {
                condition,
                if_body,
                else_body,
                ..
            } => Statement::if_else(line, condition, self.body(if_body), self.body(else_body)),
            StatementSyntax::While {
                condition, body, ..
            } => Statement::while_loop(line, condition, self.body(body)),
            StatementSyntax::Return { value, .. } => Statement::ret(line, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index_positions() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.position(0), (1, 1));
        assert_eq!(index.position(1), (1, 2));
        assert_eq!(index.position(3), (2, 1));
        assert_eq!(index.position(6), (3, 1));
        assert_eq!(index.position(8), (4, 2));
    }
}
