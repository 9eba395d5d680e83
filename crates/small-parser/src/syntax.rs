use chumsky::input::Stream;
use chumsky::prelude::*;
use small_ast::{
    BoolComparisonOperator, EqualityOperator, Expression, IntBinaryOperator,
    IntComparisonOperator,
};
use small_lexer::{Logos, Token};

pub(crate) type ChumskyError<'src> = Rich<'src, Token<'src>, SimpleSpan>;

/// Standard error type for Small parsers.
pub(crate) type ParserError<'tokens, 'src> = extra::Err<Rich<'tokens, Token<'src>, SimpleSpan>>;

/// Token streams the Small grammar accepts.
pub(crate) trait TokenInput<'tokens, 'src: 'tokens>:
    chumsky::input::ValueInput<'tokens, Token = Token<'src>, Span = SimpleSpan>
{
}

impl<'tokens, 'src: 'tokens, I> TokenInput<'tokens, 'src> for I where
    I: chumsky::input::ValueInput<'tokens, Token = Token<'src>, Span = SimpleSpan>
{
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Spanned<T> {
    pub value: T,
    pub span: SimpleSpan,
}

/// A statement before line numbers are assigned.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StatementSyntax<'src> {
    Assign {
        variable: &'src str,
        value: Expression,
        span: SimpleSpan,
    },
    IfElse {
        condition: Expression,
        if_body: Vec<StatementSyntax<'src>>,
        else_body: Vec<StatementSyntax<'src>>,
        span: SimpleSpan,
    },
    While {
        condition: Expression,
        body: Vec<StatementSyntax<'src>>,
        span: SimpleSpan,
    },
    Return {
        value: Expression,
        span: SimpleSpan,
    },
}

impl StatementSyntax<'_> {
    pub fn span(&self) -> SimpleSpan {
        match self {
            StatementSyntax::Assign { span, .. }
            | StatementSyntax::IfElse { span, .. }
            | StatementSyntax::While { span, .. }
            | StatementSyntax::Return { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FunctionSyntax<'src> {
    pub name: Spanned<&'src str>,
    pub parameters: Vec<Spanned<&'src str>>,
    pub body: Vec<StatementSyntax<'src>>,
    pub span: SimpleSpan,
}

// ============================================================================
// Expressions
// ============================================================================

fn identifier<'src, I>() -> impl Parser<'src, I, Spanned<&'src str>, ParserError<'src, 'src>> + Clone
where
    I: TokenInput<'src, 'src>,
{
    select! { Token::Identifier(id) = e => Spanned {
        value: id,
        span: e.span(),
    }}
    .labelled("identifier")
}

/// `-` on a literal is a negative constant; on anything else it is `0 - e`.
fn negative(operand: Expression) -> Expression {
    match operand {
        Expression::IntConstant(value) if value.checked_neg().is_some() => Expression::int(-value),
        other => Expression::binary(Expression::int(0), IntBinaryOperator::Sub, other),
    }
}

/// Parses an expression. Loosest to tightest: `or`, `and`, `== !=`,
/// `< > <= >=`, `+ -`, `* /`, prefix `- !`.
pub(crate) fn expression<'src, I>()
-> impl Parser<'src, I, Expression, ParserError<'src, 'src>> + Clone
where
    I: TokenInput<'src, 'src>,
{
    recursive(|expr| {
        let literal = select! {
            Token::Int(value) => Expression::int(value),
            Token::True => Expression::bool(true),
            Token::False => Expression::bool(false),
        }
        .labelled("literal");

        let arguments = expr
            .clone()
            .separated_by(just(Token::Comma))
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .labelled("argument list");

        let name = identifier()
            .then(arguments.or_not())
            .map(|(name, arguments)| match arguments {
                Some(arguments) => Expression::call(name.value, arguments),
                None => Expression::variable(name.value),
            });

        let atom = choice((
            literal,
            name,
            expr.delimited_by(just(Token::LParen), just(Token::RParen)),
        ))
        .boxed();

        let unary = choice((just(Token::Minus), just(Token::Bang)))
            .repeated()
            .foldr(atom, |op, operand| match op {
                Token::Bang => Expression::not(operand),
                _ => negative(operand),
            })
            .boxed();

        let product_op = select! {
            Token::Star => IntBinaryOperator::Mul,
            Token::Slash => IntBinaryOperator::Div,
        };
        let product = unary
            .clone()
            .foldl(product_op.then(unary).repeated(), |left, (op, right)| {
                Expression::binary(left, op, right)
            })
            .boxed();

        let sum_op = select! {
            Token::Plus => IntBinaryOperator::Add,
            Token::Minus => IntBinaryOperator::Sub,
        };
        let sum = product
            .clone()
            .foldl(sum_op.then(product).repeated(), |left, (op, right)| {
                Expression::binary(left, op, right)
            })
            .boxed();

        let compare_op = select! {
            Token::Less => IntComparisonOperator::Lt,
            Token::Greater => IntComparisonOperator::Gt,
            Token::LessEqual => IntComparisonOperator::Lte,
            Token::GreaterEqual => IntComparisonOperator::Gte,
        };
        let comparison = sum
            .clone()
            .foldl(compare_op.then(sum).repeated(), |left, (op, right)| {
                Expression::compare(left, op, right)
            })
            .boxed();

        let equality_op = select! {
            Token::EqualEqual => EqualityOperator::Eq,
            Token::NotEqual => EqualityOperator::Neq,
        };
        let equality = comparison
            .clone()
            .foldl(equality_op.then(comparison).repeated(), |left, (op, right)| {
                Expression::equal(left, op, right)
            })
            .boxed();

        let conjunction = equality
            .clone()
            .foldl(
                just(Token::And)
                    .to(BoolComparisonOperator::And)
                    .then(equality)
                    .repeated(),
                |left, (op, right)| Expression::logical(left, op, right),
            )
            .boxed();

        conjunction
            .clone()
            .foldl(
                just(Token::Or)
                    .to(BoolComparisonOperator::Or)
                    .then(conjunction)
                    .repeated(),
                |left, (op, right)| Expression::logical(left, op, right),
            )
            .labelled("expression")
    })
}

// ============================================================================
// Statements and functions
// ============================================================================

fn statement<'src, I>()
-> impl Parser<'src, I, StatementSyntax<'src>, ParserError<'src, 'src>> + Clone
where
    I: TokenInput<'src, 'src>,
{
    recursive(|statement| {
        let block = statement
            .repeated()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LBrace), just(Token::RBrace))
            .labelled("block");

        let condition = expression()
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .labelled("condition");

        let assign = identifier()
            .then_ignore(just(Token::Assign))
            .then(expression())
            .then_ignore(just(Token::Semicolon))
            .map_with(|(variable, value), extra| StatementSyntax::Assign {
                variable: variable.value,
                value,
                span: extra.span(),
            })
            .labelled("assignment");

        let if_else = just(Token::If)
            .ignore_then(condition.clone())
            .then(block.clone())
            .then(just(Token::Else).ignore_then(block.clone()).or_not())
            .map_with(
                |((condition, if_body), else_body), extra| StatementSyntax::IfElse {
                    condition,
                    if_body,
                    else_body: else_body.unwrap_or_default(),
                    span: extra.span(),
                },
            )
            .labelled("if statement");

        let while_loop = just(Token::While)
            .ignore_then(condition)
            .then(block)
            .map_with(|(condition, body), extra| StatementSyntax::While {
                condition,
                body,
                span: extra.span(),
            })
            .labelled("while statement");

        let ret = just(Token::Return)
            .ignore_then(expression())
            .then_ignore(just(Token::Semicolon))
            .map_with(|value, extra| StatementSyntax::Return {
                value,
                span: extra.span(),
            })
            .labelled("return statement");

        choice((assign, if_else, while_loop, ret)).boxed()
    })
}

fn function<'src, I>() -> impl Parser<'src, I, FunctionSyntax<'src>, ParserError<'src, 'src>>
where
    I: TokenInput<'src, 'src>,
{
    let parameters = identifier()
        .separated_by(just(Token::Comma))
        .collect::<Vec<_>>()
        .delimited_by(just(Token::LParen), just(Token::RParen))
        .labelled("parameter list");

    let body = statement()
        .repeated()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::LBrace), just(Token::RBrace))
        .labelled("function body");

    just(Token::Function)
        .ignore_then(identifier())
        .then(parameters)
        .then(body)
        .map_with(|((name, parameters), body), extra| FunctionSyntax {
            name,
            parameters,
            body,
            span: extra.span(),
        })
        .labelled("function")
}

pub(crate) fn tokenize<'src>(src: &'src str) -> Vec<(Token<'src>, SimpleSpan)> {
    Token::lexer(src)
        .spanned()
        .map(|(token, span)| (token.unwrap_or(Token::Error), SimpleSpan::from(span)))
        .collect()
}

pub(crate) fn parse_functions<'src>(
    tokens: &[(Token<'src>, SimpleSpan)],
) -> Result<Vec<FunctionSyntax<'src>>, Vec<ChumskyError<'src>>> {
    let offset = tokens.last().map(|(_, span)| span.end).unwrap_or_default();
    let eoi = SimpleSpan::from(offset..offset);
    let stream = Stream::from_iter(tokens.to_vec()).map(eoi, |(token, span)| (token, span));

    function()
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
        .parse(stream)
        .into_result()
}

#[cfg(test)]
pub(crate) fn parse_expression(src: &str) -> Result<Expression, Vec<ChumskyError<'_>>> {
    let tokens = tokenize(src);
    let offset = tokens.last().map(|(_, span)| span.end).unwrap_or_default();
    let eoi = SimpleSpan::from(offset..offset);
    let stream = Stream::from_iter(tokens).map(eoi, |(token, span)| (token, span));

    expression()
        .then_ignore(end())
        .parse(stream)
        .into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(src: &str) -> String {
        parse_expression(src).unwrap().to_string()
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        assert_eq!(render("a + 2 * b"), "a + (2 * b)");
        assert_eq!(render("(a + 2) * b"), "(a + 2) * b");
    }

    #[test]
    fn test_binary_operators_associate_left() {
        assert_eq!(render("a - b - c"), "(a - b) - c");
        assert_eq!(render("a / b * c"), "(a / b) * c");
    }

    #[test]
    fn test_comparison_and_logic_precedence() {
        assert_eq!(render("i < n and b"), "(i < n) and b");
        assert_eq!(render("a or b and c"), "a or (b and c)");
        assert_eq!(render("x + 1 == y"), "(x + 1) == y");
    }

    #[test]
    fn test_minus_on_literal_is_a_constant() {
        assert_eq!(parse_expression("-3").unwrap(), Expression::int(-3));
        assert_eq!(
            parse_expression("-x").unwrap(),
            Expression::binary(Expression::int(0), IntBinaryOperator::Sub, Expression::variable("x"))
        );
        assert_eq!(render("a - -3"), "a - (-3)");
    }

    #[test]
    fn test_not_and_calls() {
        assert_eq!(
            parse_expression("!b").unwrap(),
            Expression::not(Expression::variable("b"))
        );
        assert_eq!(render("f(a, b + 1)"), "f(a, b + 1)");
        assert_eq!(render("g()"), "g()");
        assert_eq!(parse_expression("True").unwrap(), Expression::bool(true));
    }

    #[test]
    fn test_trailing_operator_is_an_error() {
        assert!(parse_expression("a +").is_err());
    }
}
