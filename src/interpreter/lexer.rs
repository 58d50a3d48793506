use logos::Logos;

use crate::{
    error::ParseError,
    graph::{kind::Kind, node::NodeRef},
    interpreter::parser::core::ParseResult,
};

/// Represents a lexical token in the source input.
///
/// Literal tokens carry the leaf node they denote, already built; operator
/// and bracket tokens are plain markers the parser turns into nodes.
///
/// When two patterns match the same longest input, the one with the higher
/// priority wins: literals over operators over the catch-all symbol.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Line break. Separates top-level expressions.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        Token::NewLine
    })]
    NewLine,
    /// `.end` stops the program.
    #[token(".end", priority = 10)]
    End,
    /// `'text'`, taken verbatim up to the next quote on the same line.
    #[token("'", lex_string)]
    String(NodeRef),
    /// `0xDeadBeef`
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| leaf(lex, Kind::Hex), priority = 10)]
    Hex(NodeRef),
    /// `0b1101`
    #[regex(r"0[bB][01]+", |lex| leaf(lex, Kind::Bin), priority = 10)]
    Bin(NodeRef),
    /// `-12.34`, `-4e+5`
    #[regex(r"-?[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", |lex| leaf(lex, Kind::Number), priority = 8)]
    #[regex(r"-?[0-9]+[eE][+-]?[0-9]+", |lex| leaf(lex, Kind::Number), priority = 8)]
    Number(NodeRef),
    /// `-1234`
    #[regex(r"-?[0-9]+", |lex| leaf(lex, Kind::Integer), priority = 8)]
    Integer(NodeRef),
    /// `` ` ``
    #[token("`", priority = 6)]
    Tick,
    /// `:`
    #[token(":", priority = 6)]
    Colon,
    /// `=`
    #[token("=", priority = 6)]
    Eq,
    /// `//`
    #[token("//", priority = 6)]
    Push,
    /// `<<`
    #[token("<<", priority = 6)]
    LShift,
    /// `>>`
    #[token(">>", priority = 6)]
    RShift,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `http://` or `https://` up to the next whitespace.
    #[regex(r"https?://[^ \t\r\n]+", |lex| leaf(lex, Kind::Url), priority = 8, allow_greedy = true)]
    Url(NodeRef),
    /// `name@host`
    #[regex(r"[a-z]+@[^ \t\r\n]+", |lex| leaf(lex, Kind::Email), priority = 8, allow_greedy = true)]
    Email(NodeRef),
    /// Dotted quad such as `127.0.0.1`.
    #[regex(r"[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}", |lex| leaf(lex, Kind::Ip), priority = 9)]
    Ip(NodeRef),
    /// Any other run of printable characters other than `#`, brackets, `:`,
    /// quotes and ticks.
    #[regex(r"[^\x00-\x20\x7f#{}\[\]:'`]+", |lex| leaf(lex, Kind::Symbol), priority = 1, allow_greedy = true)]
    Symbol(NodeRef),
    /// `# comment` up to the end of the line.
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Spaces, tabs and carriage returns.
    #[regex(r"[ \t\r]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and where it starts, for error positions.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Token {
    /// Short source-like description used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::NewLine => "end of line".to_string(),
            Self::End => ".end".to_string(),
            Self::Tick => "`".to_string(),
            Self::Colon => ":".to_string(),
            Self::Eq => "=".to_string(),
            Self::Push => "//".to_string(),
            Self::LShift => "<<".to_string(),
            Self::RShift => ">>".to_string(),
            Self::LBracket => "[".to_string(),
            Self::RBracket => "]".to_string(),
            Self::LBrace => "{".to_string(),
            Self::RBrace => "}".to_string(),
            Self::String(node)
            | Self::Hex(node)
            | Self::Bin(node)
            | Self::Number(node)
            | Self::Integer(node)
            | Self::Url(node)
            | Self::Email(node)
            | Self::Ip(node)
            | Self::Symbol(node) => node.to_string(),
            Self::Comment | Self::Ignored => String::new(),
        }
    }
}

/// Builds the leaf node for the current slice.
fn leaf(lex: &logos::Lexer<Token>, kind: Kind) -> Option<NodeRef> {
    NodeRef::from_text(kind, lex.slice()).ok()
}

/// Consumes a string body after its opening quote.
///
/// The body ends at the next `'`; a line break or the end of input first
/// makes the token fail.
fn lex_string(lex: &mut logos::Lexer<Token>) -> Option<NodeRef> {
    let rest = lex.remainder();
    let end = rest.find(['\'', '\n'])?;
    if rest.as_bytes()[end] != b'\'' {
        return None;
    }

    let node = NodeRef::string(&rest[..end]);
    lex.bump(end + 1);
    Some(node)
}

/// Splits `source` into tokens paired with their line numbers.
///
/// Lexing stops after `.end`; whatever follows is never read.
///
/// # Errors
/// `UnterminatedString` for a quote with no closing quote on its line and
/// `UnexpectedCharacter` for anything no token matches, such as control
/// characters.
///
/// # Example
/// ```
/// use kb::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("x = 0xFF # note").unwrap();
/// assert_eq!(tokens.len(), 3);
/// assert!(matches!(tokens[1], (Token::Eq, 1)));
/// ```
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token, usize)>> {
    tokenize_from(source, 1)
}

/// Like [`tokenize`], numbering lines from `first_line`.
///
/// Used when `source` is a fragment of a longer input fed piecewise.
pub fn tokenize_from(source: &str, first_line: usize) -> ParseResult<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source,
                                             LexerExtras { line:       first_line,
                                                           line_start: 0, });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            let end = matches!(tok, Token::End);
            tokens.push((tok, lexer.extras.line));
            if end {
                break;
            }
            continue;
        }

        let slice = lexer.slice();
        let line = lexer.extras.line;
        let column = source[lexer.extras.line_start..lexer.span().start].chars().count() + 1;
        return Err(if slice.starts_with('\'') {
                       ParseError::UnterminatedString { line, column }
                   } else {
                       ParseError::UnexpectedCharacter { text: slice.escape_debug().to_string(),
                                                         line,
                                                         column }
                   });
    }

    Ok(tokens)
}
