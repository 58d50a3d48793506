//! # kb
//!
//! kb is a small homoiconic language engine. Source text is lexed and parsed
//! straight into a graph of shared nodes, and that same graph is evaluated in
//! place against a scope that is itself a node.
//!
//! ```
//! use kb::{evaluate, parse, root_scope};
//!
//! let scope = root_scope();
//! for expression in parse("host = 'example.org'\nhost").unwrap() {
//!     evaluate(&expression, &scope).unwrap();
//! }
//! assert_eq!(scope.get_attribute("host").unwrap().render(true),
//!            "\n<string:example.org>");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

/// Provides unified error types for parsing and evaluation.
///
/// This module defines every error raised while lexing, parsing or
/// evaluating, and sorts them into the three classes a front-end reports:
/// syntax, lookup and type errors.
///
/// # Responsibilities
/// - Defines `ParseError` and `RuntimeError` with the position or nodes
///   involved.
/// - Maps each error onto an `ErrorKind`.
/// - Wraps both in a single `Error` for callers that run whole programs.
pub mod error;
/// The object graph.
///
/// A node has a kind, a scalar value, named attribute slots and an ordered
/// list of children. Nodes are shared handles, so a graph can contain the
/// same node many times and may contain cycles.
pub mod graph;
/// Orchestrates lexing, parsing, evaluation and the interactive driver.
pub mod interpreter;

pub use error::{Error, ErrorKind};
pub use graph::{kind::Kind, node::NodeRef};
pub use interpreter::{
    evaluator::core::evaluate,
    parser::core::parse,
    scope::root_scope,
    session::{Flow, Session, SessionOptions},
};
