use std::iter::Peekable;

use crate::{
    error::ParseError,
    graph::{node::NodeRef, scalar::Operator},
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Deepest nesting of operators and containers a top-level expression may
/// have.
pub const MAX_DEPTH: usize = 256;

/// Whether the operand tree under `node` is more than `limit` levels deep.
///
/// Walks with an explicit stack, so arbitrarily deep trees are measured
/// without recursing.
pub(in crate::interpreter::parser) fn exceeds_depth(node: &NodeRef, limit: usize) -> bool {
    let mut stack = vec![(node.clone(), 1)];
    while let Some((node, depth)) = stack.pop() {
        if depth > limit {
            return true;
        }
        stack.extend(node.children().into_iter().map(|child| (child, depth + 1)));
    }
    false
}

/// Returns the token `n` positions ahead without consuming anything.
///
/// `peek_nth(tokens, 0)` is the next token.
pub(in crate::interpreter::parser) fn peek_nth<'a, I>(tokens: &Peekable<I>, n: usize) -> Option<&'a Token>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.clone().nth(n).map(|(token, _)| token)
}

/// Builds an operator node over `left` and `right`.
pub(in crate::interpreter::parser) fn binary(operator: Operator, left: &NodeRef, right: &NodeRef) -> NodeRef {
    let node = NodeRef::op(operator);
    node.push(left).push(right);
    node
}

/// Error for the next token when it cannot start or continue an expression.
pub(in crate::interpreter::parser) fn unexpected<'a, I>(tokens: &mut Peekable<I>) -> ParseError
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((token, line)) => ParseError::UnexpectedToken { token: token.describe(),
                                                             line:  *line, },
        None => ParseError::UnexpectedEndOfInput { line: 0 },
    }
}

/// Consumes the next token if it is a literal leaf and returns its node.
///
/// # Errors
/// `UnexpectedToken` for operators and brackets, `UnexpectedEndOfInput`
/// when the stream is exhausted.
pub(in crate::interpreter::parser) fn parse_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<NodeRef>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek() {
        Some((Token::Symbol(node)
              | Token::String(node)
              | Token::Url(node)
              | Token::Email(node)
              | Token::Ip(node)
              | Token::Integer(node)
              | Token::Number(node)
              | Token::Hex(node)
              | Token::Bin(node),
              _)) => {
            let node = node.clone();
            tokens.next();
            Ok(node)
        },
        _ => Err(unexpected(tokens)),
    }
}
