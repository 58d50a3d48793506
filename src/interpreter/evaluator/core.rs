use log::trace;

use crate::{
    error::RuntimeError,
    graph::{kind::Kind, node::NodeRef},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

impl NodeRef {
    /// Evaluates the node against `scope`.
    ///
    /// The dispatch is by kind:
    /// - literals and containers evaluate to themselves,
    /// - a symbol resolves to the binding of its text in `scope`,
    /// - an `op` node runs its operator,
    /// - `command` and `class` nodes defer to their native behavior,
    /// - a scope cannot be evaluated.
    ///
    /// # Errors
    /// `UnboundSymbol` for a symbol with no binding, `NotEvaluable` for kinds
    /// without evaluation, and whatever the operator or command raises.
    ///
    /// # Example
    /// ```
    /// use kb::{graph::node::NodeRef, interpreter::scope::root_scope};
    ///
    /// let scope = root_scope();
    /// let five = NodeRef::integer(5);
    /// scope.set_attribute("x", &five);
    ///
    /// assert!(NodeRef::symbol("x").evaluate(&scope).unwrap().ptr_eq(&five));
    /// assert!(NodeRef::symbol("y").evaluate(&scope).is_err());
    /// ```
    pub fn evaluate(&self, scope: &Self) -> EvalResult<Self> {
        trace!("evaluate {self} in {scope}");
        match self.kind() {
            Kind::String
            | Kind::Number
            | Kind::Integer
            | Kind::Hex
            | Kind::Bin
            | Kind::Vector
            | Kind::Dict
            | Kind::Stack
            | Kind::Queue
            | Kind::Set
            | Kind::Block
            | Kind::File
            | Kind::Ip
            | Kind::Port
            | Kind::Url
            | Kind::Email => Ok(self.clone()),
            Kind::Symbol => self.resolve(scope),
            Kind::Op => self.eval_operator(scope),
            Kind::Command | Kind::Class => match self.callable() {
                Some(callable) => callable.invoke(self, scope),
                None => Err(self.not_evaluable(scope)),
            },
            Kind::Scope => Err(self.not_evaluable(scope)),
        }
    }

    /// Applies the node to `argument` in `scope`.
    ///
    /// Only `command` and `class` nodes are callable.
    ///
    /// # Errors
    /// `NotApplicable` for every other kind, and whatever the native
    /// behavior raises.
    pub fn apply(&self, argument: &Self, scope: &Self) -> EvalResult<Self> {
        trace!("apply {self} to {argument}");
        match (self.kind(), self.callable()) {
            (Kind::Command | Kind::Class, Some(callable)) => {
                callable.invoke_with(self, argument, scope)
            },
            _ => Err(RuntimeError::NotApplicable { node:     self.to_string(),
                                                   argument: argument.to_string(),
                                                   scope:    scope.to_string(), }),
        }
    }

    fn resolve(&self, scope: &Self) -> EvalResult<Self> {
        let name = self.value_text();
        scope.get_attribute(&name)
             .map_err(|_| RuntimeError::UnboundSymbol { name })
    }

    fn not_evaluable(&self, scope: &Self) -> RuntimeError {
        RuntimeError::NotEvaluable { node:  self.to_string(),
                                     scope: scope.to_string(), }
    }
}

/// Evaluates `graph` against `scope`.
///
/// Free-function form of [`NodeRef::evaluate`] for front-ends.
///
/// # Errors
/// See [`NodeRef::evaluate`].
pub fn evaluate(graph: &NodeRef, scope: &NodeRef) -> EvalResult<NodeRef> {
    graph.evaluate(scope)
}
