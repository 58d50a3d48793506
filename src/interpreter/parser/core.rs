use std::iter::Peekable;

use crate::{
    error::ParseError,
    graph::{node::NodeRef, scalar::Operator},
    interpreter::{
        lexer::{Token, tokenize_from},
        parser::{
            binary::parse_push,
            utils::{MAX_DEPTH, binary, exceeds_depth, peek_nth},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and descends through push, the binds
/// and finally quote, apply and atoms.
///
/// Grammar: `expression := assignment`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<NodeRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_assignment(tokens)
}

/// Parses `symbol = expression`, right-associative.
///
/// The target is stored quoted so evaluating the operands yields the symbol
/// itself rather than its current binding. A chain `a = b = c` collects its
/// targets first and nests them from the right.
///
/// Grammar: `assignment := symbol "=" assignment | push`
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<NodeRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut targets = Vec::new();
    while let (Some(Token::Symbol(target)), Some(Token::Eq)) = (peek_nth(tokens, 0),
                                                                 peek_nth(tokens, 1))
    {
        tokens.next();
        tokens.next();
        targets.push(target);
    }

    let mut value = parse_push(tokens)?;
    for target in targets.into_iter().rev() {
        value = binary(Operator::Eq, &NodeRef::quote(target), &value);
    }
    Ok(value)
}

/// Parses one top-level expression.
///
/// The expression must be followed by a line break, `.end` or the end of
/// input; the terminator is left in the stream.
///
/// # Errors
/// `UnexpectedTrailingTokens` when something else follows the expression,
/// `TooDeep` when the expression nests more than [`MAX_DEPTH`] levels.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<NodeRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = tokens.peek().map_or(0, |(_, line)| *line);
    let node = parse_expression(tokens)?;
    if exceeds_depth(&node, MAX_DEPTH) {
        return Err(ParseError::TooDeep { line,
                                         limit: MAX_DEPTH });
    }
    match tokens.peek() {
        None | Some((Token::NewLine | Token::End, _)) => Ok(node),
        Some((token, line)) => Err(ParseError::UnexpectedTrailingTokens { token: token.describe(),
                                                                          line:  *line, }),
    }
}

/// Top-level expressions of a parsed program.
#[derive(Debug, Default)]
pub struct Program {
    /// Expressions in source order.
    pub expressions: Vec<NodeRef>,
    /// Whether parsing stopped at `.end`.
    pub ended:       bool,
}

/// Parses every top-level expression of a program.
///
/// Expressions are separated by line breaks; parsing stops at `.end`.
///
/// # Errors
/// The first lexing or parsing error.
///
/// # Example
/// ```
/// use kb::parse;
///
/// let graph = parse("x = 5\nx\n.end\nignored").unwrap();
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph[1].render(true), "\n<symbol:x>");
/// ```
pub fn parse(source: &str) -> ParseResult<Vec<NodeRef>> {
    parse_program(source, 1).map(|program| program.expressions)
}

/// Parses `source` as lines numbered from `first_line`.
///
/// `.end` ends the program wherever it appears: an expression it cuts short
/// is dropped without an error.
///
/// # Errors
/// The first lexing or parsing error, or `TooDeep` when brackets nest more
/// than [`MAX_DEPTH`] levels.
pub fn parse_program(source: &str, first_line: usize) -> ParseResult<Program> {
    let mut tokens = tokenize_from(source, first_line)?;
    let mut program = Program::default();
    if let Some(end) = tokens.iter().position(|(token, _)| matches!(token, Token::End)) {
        tokens.truncate(end);
        program.ended = true;
    }
    check_bracket_depth(&tokens)?;

    let mut iter = tokens.iter().peekable();
    loop {
        while let Some((Token::NewLine, _)) = iter.peek() {
            iter.next();
        }
        if iter.peek().is_none() {
            break;
        }
        match parse_statement(&mut iter) {
            Ok(node) => program.expressions.push(node),
            Err(ParseError::UnexpectedEndOfInput { .. }) if program.ended => break,
            Err(e) => return Err(e),
        }
    }

    Ok(program)
}

/// Rejects bracket nesting the recursive container parser should not enter.
fn check_bracket_depth(tokens: &[(Token, usize)]) -> ParseResult<()> {
    let mut depth = 0_usize;
    for (token, line) in tokens {
        match token {
            Token::LBracket | Token::LBrace => {
                depth += 1;
                if depth > MAX_DEPTH {
                    return Err(ParseError::TooDeep { line:  *line,
                                                     limit: MAX_DEPTH, });
                }
            },
            Token::RBracket | Token::RBrace => depth = depth.saturating_sub(1),
            _ => {},
        }
    }
    Ok(())
}
