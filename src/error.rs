/// Parsing errors.
///
/// Everything that can go wrong while turning source text into graph nodes:
/// characters no token matches, unterminated strings and token sequences the
/// grammar rejects.
pub mod parse_error;
/// Runtime errors.
///
/// Everything that can go wrong while evaluating or applying a node: unbound
/// symbols, missing attributes and nodes that do not support the requested
/// operation.
pub mod runtime_error;

use std::fmt;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// The three error classes the engine distinguishes.
///
/// Every concrete error maps onto one of them; front-ends that only care
/// about the class match on this instead of the full variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed token or grammar.
    Syntax,
    /// Unbound symbol or missing attribute key.
    Lookup,
    /// Evaluation or application of a node that does not support it.
    Type,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Syntax => "SyntaxError",
                        Self::Lookup => "LookupError",
                        Self::Type => "TypeError",
                    })
    }
}

/// Any error the engine reports.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Raised while lexing or parsing.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Raised while evaluating.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// The error class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(e) => e.kind(),
            Self::Runtime(e) => e.kind(),
        }
    }
}
