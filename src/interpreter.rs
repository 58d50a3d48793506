/// The evaluator module runs graph nodes against a scope.
///
/// Evaluation dispatches on the node kind: literals return themselves,
/// symbols resolve in the scope, operator nodes run their operator and
/// `command`/`class` nodes call into native code. The same node type serves
/// as program, value and scope, so evaluation reads and rebinds the graph in
/// place.
///
/// # Responsibilities
/// - Implements `evaluate` and `apply` for every kind.
/// - Implements the operators: quote, apply, assignment, push and the binds.
/// - Defines the `Callable` seam used by host commands and classes.
pub mod evaluator;
/// The lexer module tokenizes source text.
///
/// Literal tokens already carry the leaf node they stand for, so the parser
/// only has to assemble operator and container nodes around them.
pub mod lexer;
/// The parser module builds graph nodes from tokens.
///
/// There is no separate syntax tree: the parser emits the same nodes the
/// evaluator consumes, one per top-level expression.
///
/// # Responsibilities
/// - Implements the operator precedence levels, lowest first: assignment,
///   push, binds, then quote and apply.
/// - Builds `[ ... ]` and `{ ... }` containers.
/// - Reports the offending token and line on failure.
pub mod parser;
/// Root scope construction.
pub mod scope;
/// Line-oriented read-eval-print driver.
pub mod session;
