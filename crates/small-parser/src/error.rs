use thiserror::Error;

/// Why a Small source text could not be turned into functions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected character `{text}` at {line}:{column}")]
    Lex {
        line: usize,
        column: usize,
        text: String,
    },
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("function `{name}` at line {line} is already defined at line {previous}")]
    DuplicateFunction {
        name: String,
        line: usize,
        previous: usize,
    },
    #[error("parameter `{name}` of function `{function}` is declared twice")]
    DuplicateParameter { function: String, name: String },
    #[error("expected exactly one function, found {found}")]
    ExpectedSingleFunction { found: usize },
}

impl ParseError {
    /// Source line the error points at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Lex { line, .. }
            | ParseError::Syntax { line, .. }
            | ParseError::DuplicateFunction { line, .. } => Some(*line),
            ParseError::DuplicateParameter { .. } | ParseError::ExpectedSingleFunction { .. } => {
                None
            }
        }
    }
}
