use std::iter::Peekable;

use crate::{
    error::ParseError,
    graph::{node::NodeRef, scalar::Operator},
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_container,
            core::ParseResult,
            utils::{MAX_DEPTH, binary, parse_literal, peek_nth},
        },
    },
};

/// Parses the highest precedence level.
///
/// - `` `x `` quotes the next unary expression,
/// - `symbol : literal` applies the symbol's binding to the quoted literal,
/// - `[ ... ]` and `{ ... }`, optionally named by a leading symbol, build
///   containers,
/// - anything else must be a literal leaf.
///
/// Quote and apply do not chain: `a:b:c` leaves the second `:` unparsed.
/// A run of ticks is counted rather than recursed into.
///
/// Grammar: `unary := "`" unary | symbol ":" literal | symbol? container |
/// literal`
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<NodeRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match (peek_nth(tokens, 0), peek_nth(tokens, 1)) {
        (Some(Token::Tick), _) => {
            let line = tokens.peek().map_or(0, |(_, line)| *line);
            let mut quotes = 0;
            while let Some((Token::Tick, _)) = tokens.peek() {
                tokens.next();
                quotes += 1;
                if quotes >= MAX_DEPTH {
                    return Err(ParseError::TooDeep { line,
                                                     limit: MAX_DEPTH });
                }
            }

            let mut node = parse_unary(tokens)?;
            for _ in 0..quotes {
                node = NodeRef::quote(&node);
            }
            Ok(node)
        },
        (Some(Token::Symbol(label)), Some(Token::Colon)) => {
            tokens.next();
            tokens.next();
            let argument = parse_literal(tokens)?;
            Ok(binary(Operator::Colon, label, &NodeRef::quote(&argument)))
        },
        (Some(Token::Symbol(name)), Some(Token::LBracket | Token::LBrace)) => {
            tokens.next();
            parse_container(tokens, &name.value_text())
        },
        (Some(Token::LBracket | Token::LBrace), _) => parse_container(tokens, ""),
        _ => parse_literal(tokens),
    }
}
