/// Node kinds.
///
/// The closed set of variants a node can be, with their render names and
/// whether a class can build them from text.
pub mod kind;
/// The universal graph node.
///
/// One node type serves as parsed expression, runtime value and scope.
/// Defines the shared handle, leaf constructors and the slot/nest operations
/// (`set_attribute`, `bind_by_kind`, `bind_by_value`, `push`).
pub mod node;
/// Cycle-safe tree rendering.
pub mod render;
/// Scalar payloads and operators.
pub mod scalar;
