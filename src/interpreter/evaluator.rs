/// Kind dispatch for evaluation and application.
///
/// Defines `EvalResult`, `NodeRef::evaluate` and `NodeRef::apply`, the two
/// entry points every front-end calls.
pub mod core;

/// Operator semantics.
///
/// Quote, assignment, push, the two binds and apply, evaluated over the
/// operands stored in an `op` node's children.
pub mod operator;

/// Native behavior behind `command` and `class` nodes.
pub mod callable;
