use crate::error::ErrorKind;

/// Represents all errors that can occur during lexing or parsing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No token matches the input at this position.
    #[error("line {line}, column {column}: unexpected character '{text}'")]
    UnexpectedCharacter {
        /// The offending input.
        text:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// 1-based column of the first offending character.
        column: usize,
    },
    /// A `'` string was not closed before the end of its line.
    #[error("line {line}, column {column}: unterminated string")]
    UnterminatedString {
        /// The source line where the error occurred.
        line:   usize,
        /// 1-based column of the opening quote.
        column: usize,
    },
    /// Found an unexpected token while parsing.
    #[error("line {line}: unexpected token {token}")]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("line {line}: unexpected end of input")]
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found extra tokens after a complete expression.
    #[error("line {line}: extra tokens after expression: {token}")]
    UnexpectedTrailingTokens {
        /// The first extra token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Brackets, quotes or operators nested past the supported depth.
    #[error("line {line}: expression nested deeper than {limit} levels")]
    TooDeep {
        /// The source line where the expression starts.
        line:  usize,
        /// The maximum nesting depth.
        limit: usize,
    },
}

impl ParseError {
    /// Parse errors are always syntax errors.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Syntax
    }
}
