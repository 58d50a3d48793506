use std::iter::Peekable;

use crate::{
    graph::{node::NodeRef, scalar::Operator},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary, utils::binary},
    },
};

/// Parses push chains.
///
/// Handles the left-associative operator `//`: `a // b // c` pushes `b`
/// onto `a`, then `c` onto the result.
///
/// The rule is: `push := bind ("//" bind)*`
pub fn parse_push<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<NodeRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_bind(tokens)?;
    while let Some((Token::Push, _)) = tokens.peek() {
        tokens.next();
        let right = parse_bind(tokens)?;
        left = binary(Operator::Push, &left, &right);
    }
    Ok(left)
}

/// Parses bind chains.
///
/// Handles the left-associative operators `<<` and `>>`, which share one
/// precedence level.
///
/// The rule is: `bind := unary (("<<" | ">>") unary)*`
pub fn parse_bind<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<NodeRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_unary(tokens)?;
    loop {
        let operator = match tokens.peek() {
            Some((Token::LShift, _)) => Operator::LShift,
            Some((Token::RShift, _)) => Operator::RShift,
            _ => break,
        };
        tokens.next();
        let right = parse_unary(tokens)?;
        left = binary(operator, &left, &right);
    }
    Ok(left)
}
