use crate::{error::ErrorKind, graph::kind::Kind};

/// Represents all errors that can occur during evaluation.
///
/// Nodes are named by their `<kind:value>` header, so the messages stay
/// short even when the node is the root scope.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Evaluated a symbol the scope has no binding for.
    #[error("unbound symbol '{name}'")]
    UnboundSymbol {
        /// The symbol text.
        name: String,
    },
    /// Read an attribute key that is not present.
    #[error("{node} has no attribute '{key}'")]
    MissingAttribute {
        /// The requested key.
        key:  String,
        /// Header of the node that was searched.
        node: String,
    },
    /// Evaluated a node whose kind does not support evaluation.
    #[error("{node} cannot be evaluated in {scope}")]
    NotEvaluable {
        /// Header of the offending node.
        node:  String,
        /// Header of the scope.
        scope: String,
    },
    /// Applied a node that is not callable.
    #[error("{node} cannot be applied to {argument} in {scope}")]
    NotApplicable {
        /// Header of the offending node.
        node:     String,
        /// Header of the argument.
        argument: String,
        /// Header of the scope.
        scope:    String,
    },
    /// Text that cannot be turned into a node of the requested kind.
    #[error("'{text}' is not a valid {kind} literal")]
    InvalidLiteral {
        /// The target kind.
        kind: Kind,
        /// The rejected text.
        text: String,
    },
    /// An `op` node whose value is not an operator.
    #[error("{node} is not an operator")]
    UnknownOperator {
        /// Header of the node.
        node: String,
    },
    /// An operator node without the operands its operator needs.
    #[error("{node} expects {expected} operands, found {found}")]
    MalformedOperator {
        /// Header of the operator node.
        node:     String,
        /// Operand count required by the operator.
        expected: usize,
        /// Operand count present.
        found:    usize,
    },
}

impl RuntimeError {
    /// The error class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnboundSymbol { .. } | Self::MissingAttribute { .. } => ErrorKind::Lookup,
            Self::NotEvaluable { .. } | Self::NotApplicable { .. } | Self::InvalidLiteral { .. } => {
                ErrorKind::Type
            },
            Self::UnknownOperator { .. } | Self::MalformedOperator { .. } => ErrorKind::Syntax,
        }
    }
}
