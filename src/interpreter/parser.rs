/// Entry points: expressions, statements and whole programs.
pub mod core;

/// Binary operator levels.
///
/// Push and the two binds, each a left-associative chain over the next
/// higher level.
pub mod binary;

/// Quote, labeled apply and atoms, the highest precedence level.
pub mod unary;

/// Vector and block literals.
pub mod block;

/// Lookahead helpers shared by the levels.
pub mod utils;
