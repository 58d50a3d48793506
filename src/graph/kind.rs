use std::{fmt, str::FromStr};

/// Tag identifying the variant of a graph node.
///
/// The set is closed: evaluation and application dispatch with an exhaustive
/// `match` over it, so a new kind cannot be added without deciding how it
/// evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Bare identifier, resolved against the scope when evaluated.
    Symbol,
    /// Single-quoted text literal.
    String,
    /// 64-bit floating-point literal.
    Number,
    /// Decimal integer literal.
    Integer,
    /// `0x` integer literal.
    Hex,
    /// `0b` integer literal.
    Bin,
    /// Operator node built by the parser; operands live in its children.
    Op,
    /// Host-provided behavior.
    Command,
    /// Constructor for a leaf kind.
    Class,
    /// Symbol table. The root scope binds itself under this kind.
    Scope,
    /// `[ ... ]` literal.
    Vector,
    Dict,
    Stack,
    Queue,
    Set,
    /// `{ ... }` literal.
    Block,
    File,
    Ip,
    Port,
    Url,
    Email,
}

impl Kind {
    /// Every kind in declaration order.
    pub const ALL: [Self; 21] = [Self::Symbol,
                                 Self::String,
                                 Self::Number,
                                 Self::Integer,
                                 Self::Hex,
                                 Self::Bin,
                                 Self::Op,
                                 Self::Command,
                                 Self::Class,
                                 Self::Scope,
                                 Self::Vector,
                                 Self::Dict,
                                 Self::Stack,
                                 Self::Queue,
                                 Self::Set,
                                 Self::Block,
                                 Self::File,
                                 Self::Ip,
                                 Self::Port,
                                 Self::Url,
                                 Self::Email];

    /// Lowercase name used in render headers and as the bind-by-kind key.
    ///
    /// # Example
    /// ```
    /// use kb::graph::kind::Kind;
    ///
    /// assert_eq!(Kind::Hex.name(), "hex");
    /// assert_eq!(Kind::Scope.name(), "scope");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Symbol => "symbol",
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Hex => "hex",
            Self::Bin => "bin",
            Self::Op => "op",
            Self::Command => "command",
            Self::Class => "class",
            Self::Scope => "scope",
            Self::Vector => "vector",
            Self::Dict => "dict",
            Self::Stack => "stack",
            Self::Queue => "queue",
            Self::Set => "set",
            Self::Block => "block",
            Self::File => "file",
            Self::Ip => "ip",
            Self::Port => "port",
            Self::Url => "url",
            Self::Email => "email",
        }
    }

    /// Whether a `Class` can mint nodes of this kind from text.
    #[must_use]
    pub const fn is_constructible(self) -> bool {
        !matches!(self,
                  Self::Op | Self::Command | Self::Class | Self::Scope | Self::Block)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter()
                 .find(|kind| kind.name() == s)
                 .ok_or_else(|| format!("unknown kind '{s}'"))
    }
}
