use std::iter::Peekable;

use crate::{
    error::ParseError,
    graph::{kind::Kind, node::NodeRef},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::unexpected,
        },
    },
};

/// Parses a vector `[ ... ]` or block `{ ... }` literal.
///
/// Elements are whole expressions separated by whitespace or line breaks and
/// are pushed unevaluated, in order. `name` becomes the container's value.
///
/// Grammar: `container := ("[" expression* "]") | ("{" expression* "}")`
///
/// # Errors
/// `UnexpectedToken` if the stream is not at an opening bracket,
/// `UnexpectedEndOfInput` if it ends before the closing one.
pub fn parse_container<'a, I>(tokens: &mut Peekable<I>, name: &str) -> ParseResult<NodeRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (kind, closing, line) = match tokens.peek() {
        Some((Token::LBracket, line)) => (Kind::Vector, Token::RBracket, *line),
        Some((Token::LBrace, line)) => (Kind::Block, Token::RBrace, *line),
        _ => return Err(unexpected(tokens)),
    };
    tokens.next();

    let container = NodeRef::new(kind, name);
    loop {
        match tokens.peek() {
            Some((Token::NewLine, _)) => {
                tokens.next();
            },
            Some((token, _)) if *token == closing => {
                tokens.next();
                return Ok(container);
            },
            Some(_) => {
                let element = parse_expression(tokens)?;
                container.push(&element);
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }
}
