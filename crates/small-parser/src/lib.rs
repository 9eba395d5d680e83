//! Text front end for Small: turns source text into [`Function`]s.
//!
//! Statements are numbered by the source line they start on, which is also
//! how analysis results are keyed.
//!
//! ```ignore
//! let functions = small_parser::parse_program(source)?;
//! ```

mod builder;
mod error;
mod syntax;

use small_ast::Function;
use small_lexer::Token;

use crate::builder::Builder;
use crate::syntax::{parse_functions, tokenize};

pub use error::ParseError;

/// Parse every function in `src`.
pub fn parse_program(src: &str) -> Result<Vec<Function>, ParseError> {
    let builder = Builder::new(src);
    let tokens = tokenize(src);

    if let Some((_, span)) = tokens.iter().find(|(token, _)| *token == Token::Error) {
        let (line, column) = builder.lines().position(span.start);
        return Err(ParseError::Lex {
            line,
            column,
            text: src[span.start..span.end].to_string(),
        });
    }

    let syntax = parse_functions(&tokens).map_err(|errors| {
        let (line, column, message) = match errors.first() {
            Some(error) => {
                let (line, column) = builder.lines().position(error.span().start);
                (line, column, error.to_string())
            }
            None => (1, 1, "invalid program".to_string()),
        };
        ParseError::Syntax {
            line,
            column,
            message,
        }
    })?;

    let functions = builder.program(syntax)?;
    tracing::debug!(functions = functions.len(), "parsed program");
    Ok(functions)
}

/// Parse a source text holding exactly one function.
pub fn parse_function(src: &str) -> Result<Function, ParseError> {
    let mut functions = parse_program(src)?;
    match functions.len() {
        1 => Ok(functions.remove(0)),
        found => Err(ParseError::ExpectedSingleFunction { found }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use small_ast::Statement;

    const SIMPLE_IF: &str = "\
function main(a) {
    b = 2;
    if (b > 0) {
        c = a + 2;
    } else {
        c = b * 2;
    }
    return c;
}";

    #[test]
    fn test_statements_are_numbered_by_source_line() {
        let function = parse_function(SIMPLE_IF).unwrap();
        assert_eq!(function.line(), 1);
        let lines: Vec<_> = function.body().iter().map(Statement::line).collect();
        assert_eq!(lines, [2, 3, 8]);
        let Statement::IfElse {
            if_body, else_body, ..
        } = &function.body()[1]
        else {
            panic!("expected if statement");
        };
        assert_eq!(if_body[0].line(), 4);
        assert_eq!(else_body[0].line(), 6);
    }

    #[test]
    fn test_round_trip_through_printer() {
        let function = parse_function(SIMPLE_IF).unwrap();
        insta::assert_snapshot!(function, @r"
        function main(a) {
            b = 2;
            if (b > 0) {
                c = a + 2;
            } else {
                c = b * 2;
            }
            return c;
        }
        ");
        assert_eq!(function.source(), Some(SIMPLE_IF));
    }

    #[test]
    fn test_variables_cover_parameters_and_locals() {
        let function = parse_function(SIMPLE_IF).unwrap();
        let variables: Vec<_> = function.variables().iter().map(String::as_str).collect();
        assert_eq!(variables, ["a", "b", "c"]);
    }

    #[test]
    fn test_else_is_optional_and_comments_are_skipped() {
        let function = parse_function(
            "\
// leading comment
function f(n) {
    while (n > 0) { // count down
        n = n - 1;
    }
    if (n == 0) {
        n = 1;
    }
    return n;
}",
        )
        .unwrap();
        assert_eq!(function.line(), 2);
        insta::assert_snapshot!(function, @r"
        function f(n) {
            while (n > 0) {
                n = n - 1;
            }
            if (n == 0) {
                n = 1;
            }
            return n;
        }
        ");
    }

    #[test]
    fn test_multiple_functions() {
        let functions = parse_program(
            "function a() { x = 1; return x; }\nfunction b(y) { return y; }",
        )
        .unwrap();
        let names: Vec<_> = functions.iter().map(Function::name).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(functions[1].line(), 2);
        assert_eq!(
            parse_function("function a() { return 1; }\nfunction b() { return 2; }"),
            Err(ParseError::ExpectedSingleFunction { found: 2 })
        );
    }

    #[test]
    fn test_empty_function_body() {
        let function = parse_function("function main() {\n}").unwrap();
        assert!(function.body().is_empty());
        assert!(function.variables().is_empty());
    }

    #[test]
    fn test_lex_error_reports_position() {
        let err = parse_program("function main() {\n    x = 1 # 2;\n}").unwrap_err();
        assert_eq!(
            err,
            ParseError::Lex {
                line: 2,
                column: 11,
                text: "#".to_string(),
            }
        );
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let err = parse_program("function main() {\n    x = ;\n}").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_duplicate_definitions_are_rejected() {
        let err = parse_program("function f() { return 1; }\nfunction f() { return 2; }")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "function `f` at line 2 is already defined at line 1"
        );

        let err = parse_program("function g(a, a) { return a; }").unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateParameter {
                function: "g".to_string(),
                name: "a".to_string(),
            }
        );
    }
}
