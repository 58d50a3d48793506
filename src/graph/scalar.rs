use std::fmt;

use num_bigint::BigInt;

/// Operators the parser can build into `op` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `` ` `` quote.
    Tick,
    /// `:` apply.
    Colon,
    /// `=` assignment.
    Eq,
    /// `//` push.
    Push,
    /// `<<` bind by kind.
    LShift,
    /// `>>` bind by value.
    RShift,
}

impl Operator {
    /// Source form of the operator, used as the node value.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Tick => "`",
            Self::Colon => ":",
            Self::Eq => "=",
            Self::Push => "//",
            Self::LShift => "<<",
            Self::RShift => ">>",
        }
    }

    /// Number of operands an operator node of this kind carries.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Tick => 1,
            Self::Colon | Self::Eq | Self::Push | Self::LShift | Self::RShift => 2,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Scalar payload of a graph node.
///
/// `Display` produces the radix-neutral textual form, which is what
/// bind-by-value uses as the attribute key. Radix-aware rendering of `hex`
/// and `bin` nodes lives in [`Scalar::render_as`].
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Text: symbols, strings, urls, names of commands and classes.
    Text(String),
    /// Double precision float.
    Number(f64),
    /// Arbitrary precision integer, shared by `integer`, `hex` and `bin`.
    Integer(BigInt),
    /// Operator of an `op` node.
    Operator(Operator),
}

impl Scalar {
    /// Formats the value for a render header.
    ///
    /// `radix` is 16 or 2 for `hex` and `bin` nodes, anything else renders
    /// the plain form.
    ///
    /// # Example
    /// ```
    /// use kb::graph::scalar::Scalar;
    ///
    /// let v = Scalar::Integer(0xdead_beef_u32.into());
    /// assert_eq!(v.render_as(16), "0xdeadbeef");
    /// assert_eq!(v.to_string(), "3735928559");
    /// ```
    #[must_use]
    pub fn render_as(&self, radix: u32) -> String {
        match (self, radix) {
            (Self::Integer(n), 16) => format!("{n:#x}"),
            (Self::Integer(n), 2) => format!("{n:#b}"),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Operator(op) => write!(f, "{op}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<BigInt> for Scalar {
    fn from(value: BigInt) -> Self {
        Self::Integer(value)
    }
}

impl From<Operator> for Scalar {
    fn from(value: Operator) -> Self {
        Self::Operator(value)
    }
}

/// Parses a signed integer in `radix`, with an optional radix prefix.
///
/// The prefix (`0x` for 16, `0b` for 2) may follow the sign, so `-0xff`,
/// `0xff` and `ff` all parse as hexadecimal.
///
/// # Example
/// ```
/// use kb::graph::scalar::parse_integer;
///
/// assert_eq!(parse_integer("0b1101", 2), Some(13.into()));
/// assert_eq!(parse_integer("-0xff", 16), Some((-255).into()));
/// assert_eq!(parse_integer("12z", 10), None);
/// ```
#[must_use]
pub fn parse_integer(text: &str, radix: u32) -> Option<BigInt> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits = match radix {
        16 => strip_prefix(unsigned, "0x"),
        2 => strip_prefix(unsigned, "0b"),
        _ => unsigned,
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let magnitude = BigInt::parse_bytes(digits.as_bytes(), radix)?;
    Some(if negative { -magnitude } else { magnitude })
}

fn strip_prefix<'a>(text: &'a str, prefix: &str) -> &'a str {
    match text.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => &text[prefix.len()..],
        _ => text,
    }
}

/// Shortest round-trip form of a float.
///
/// Whole numbers keep a `.0`; very large and very small magnitudes switch to
/// an exponent with an explicit sign and at least two digits (`1e+16`,
/// `2.5e-07`).
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    // Debug already picks the shortest digits and the exponent cut-offs.
    let text = format!("{n:?}");
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// Parses a float literal such as `-12.34` or `-4e+5`.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    text.parse().ok()
}
