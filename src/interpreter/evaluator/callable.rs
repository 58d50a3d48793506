use std::fmt;

use crate::{
    error::RuntimeError,
    graph::{kind::Kind, node::NodeRef, scalar::Scalar},
    interpreter::evaluator::core::EvalResult,
};

/// Native behavior attached to `command` and `class` nodes.
///
/// `this` is the node the behavior is attached to, so error messages can
/// name it. Both capabilities default to the error a plain node raises;
/// implementors override the ones they support.
pub trait Callable: fmt::Debug {
    /// Evaluates the owning node in `scope`.
    ///
    /// # Errors
    /// `NotEvaluable` unless overridden.
    fn invoke(&self, this: &NodeRef, scope: &NodeRef) -> EvalResult<NodeRef> {
        Err(RuntimeError::NotEvaluable { node:  this.to_string(),
                                         scope: scope.to_string(), })
    }

    /// Applies the owning node to `argument` in `scope`.
    ///
    /// # Errors
    /// `NotApplicable` unless overridden.
    fn invoke_with(&self, this: &NodeRef, argument: &NodeRef, scope: &NodeRef) -> EvalResult<NodeRef> {
        Err(RuntimeError::NotApplicable { node:     this.to_string(),
                                          argument: argument.to_string(),
                                          scope:    scope.to_string(), })
    }
}

/// Host function taking the scope.
pub type EvalFn = dyn Fn(&NodeRef) -> EvalResult<NodeRef>;
/// Host function taking an argument and the scope.
pub type ApplyFn = dyn Fn(&NodeRef, &NodeRef) -> EvalResult<NodeRef>;

/// Host-provided behavior exposed to the language.
///
/// Either form may be absent; calling an absent form raises the same error
/// as on a node without behavior.
///
/// # Example
/// ```
/// use kb::{
///     graph::node::NodeRef,
///     interpreter::{evaluator::callable::Command, scope::root_scope},
/// };
///
/// let scope = root_scope();
/// let echo = Command::new("echo").applies(|argument, _| Ok(argument.clone()))
///                                .into_node();
///
/// let arg = NodeRef::string("hi");
/// assert!(echo.apply(&arg, &scope).unwrap().ptr_eq(&arg));
/// assert!(echo.evaluate(&scope).is_err());
/// ```
pub struct Command {
    name:  String,
    eval:  Option<Box<EvalFn>>,
    apply: Option<Box<ApplyFn>>,
}

impl Command {
    /// Command with no behavior yet.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name:  name.to_string(),
               eval:  None,
               apply: None, }
    }

    /// Sets the `(scope) -> node` form.
    #[must_use]
    pub fn evaluates(mut self, f: impl Fn(&NodeRef) -> EvalResult<NodeRef> + 'static) -> Self {
        self.eval = Some(Box::new(f));
        self
    }

    /// Sets the `(argument, scope) -> node` form.
    #[must_use]
    pub fn applies(mut self,
                   f: impl Fn(&NodeRef, &NodeRef) -> EvalResult<NodeRef> + 'static)
                   -> Self {
        self.apply = Some(Box::new(f));
        self
    }

    /// Wraps the command in a `command` node named after it.
    #[must_use]
    pub fn into_node(self) -> NodeRef {
        let name = self.name.clone();
        NodeRef::with_callable(Kind::Command, name, std::rc::Rc::new(self))
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
         .field("name", &self.name)
         .field("evaluates", &self.eval.is_some())
         .field("applies", &self.apply.is_some())
         .finish()
    }
}

impl Callable for Command {
    fn invoke(&self, this: &NodeRef, scope: &NodeRef) -> EvalResult<NodeRef> {
        match &self.eval {
            Some(f) => f(scope),
            None => Err(RuntimeError::NotEvaluable { node:  this.to_string(),
                                                     scope: scope.to_string(), }),
        }
    }

    fn invoke_with(&self, this: &NodeRef, argument: &NodeRef, scope: &NodeRef) -> EvalResult<NodeRef> {
        match &self.apply {
            Some(f) => f(argument, scope),
            None => Err(RuntimeError::NotApplicable { node:     this.to_string(),
                                                      argument: argument.to_string(),
                                                      scope:    scope.to_string(), }),
        }
    }
}

/// Constructor for a leaf kind.
///
/// Applying a class to an argument builds a fresh node of the class's kind
/// from the argument's value. An integer value keeps its number when minted
/// as `integer`, `hex` or `bin`; anything else goes through its text.
/// Evaluating a class is an error.
#[derive(Debug, Clone, Copy)]
pub struct Class {
    kind: Kind,
}

impl Class {
    #[must_use]
    pub const fn new(kind: Kind) -> Self {
        Self { kind }
    }

    /// Wraps the class in a `class` node whose value is the kind name.
    #[must_use]
    pub fn into_node(self) -> NodeRef {
        NodeRef::with_callable(Kind::Class, self.kind.name(), std::rc::Rc::new(self))
    }
}

impl Callable for Class {
    fn invoke_with(&self, _this: &NodeRef, argument: &NodeRef, _scope: &NodeRef) -> EvalResult<NodeRef> {
        match (self.kind, argument.value()) {
            (Kind::Integer | Kind::Hex | Kind::Bin, Scalar::Integer(n)) => {
                Ok(NodeRef::new(self.kind, n))
            },
            _ => NodeRef::from_text(self.kind, &argument.value_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, interpreter::scope::root_scope};

    #[test]
    fn class_mints_from_argument_text() {
        let scope = root_scope();
        let port = Class::new(Kind::Port).into_node();
        let made = port.apply(&NodeRef::symbol("8080"), &scope).unwrap();
        assert_eq!(made.render(true), "\n<port:8080>");
    }

    #[test]
    fn class_parses_symbol_text_in_its_radix() {
        let scope = root_scope();
        let hex = Class::new(Kind::Hex).into_node();
        let made = hex.apply(&NodeRef::symbol("ff"), &scope).unwrap();
        assert_eq!(made.render(true), "\n<hex:0xff>");

        let integer = Class::new(Kind::Integer).into_node();
        let made = integer.apply(&made, &scope).unwrap();
        assert_eq!(made.render(true), "\n<integer:255>");
    }

    #[test]
    fn class_keeps_the_number_of_integer_arguments() {
        let scope = root_scope();
        let hex = Class::new(Kind::Hex).into_node();
        let bin = Class::new(Kind::Bin).into_node();

        assert_eq!(hex.apply(&NodeRef::hex(255), &scope).unwrap().render(true), "\n<hex:0xff>");
        assert_eq!(hex.apply(&NodeRef::integer(255), &scope).unwrap().render(true),
                   "\n<hex:0xff>");
        assert_eq!(bin.apply(&NodeRef::bin(5), &scope).unwrap().render(true), "\n<bin:0b101>");
        assert_eq!(bin.apply(&NodeRef::hex(5), &scope).unwrap().render(true), "\n<bin:0b101>");
    }

    #[test]
    fn class_rejects_multibyte_text_without_panicking() {
        let scope = root_scope();
        for kind in [Kind::Hex, Kind::Bin] {
            let err = Class::new(kind).into_node()
                                      .apply(&NodeRef::symbol("xé"), &scope)
                                      .unwrap_err();
            assert_eq!(err,
                       RuntimeError::InvalidLiteral { kind,
                                                      text: "xé".to_string() });
        }
    }

    #[test]
    fn class_is_not_evaluable() {
        let scope = root_scope();
        let err = Class::new(Kind::File).into_node().evaluate(&scope).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn class_rejects_bad_numbers() {
        let scope = root_scope();
        let err = Class::new(Kind::Number).into_node()
                                          .apply(&NodeRef::symbol("abc"), &scope)
                                          .unwrap_err();
        assert_eq!(err,
                   RuntimeError::InvalidLiteral { kind: Kind::Number,
                                                  text: "abc".to_string(), });
    }

    #[test]
    fn command_forms() {
        let scope = root_scope();
        let cmd = Command::new("here").evaluates(|scope| Ok(scope.clone())).into_node();
        assert!(cmd.evaluate(&scope).unwrap().ptr_eq(&scope));
        let err = cmd.apply(&NodeRef::symbol("x"), &scope).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(cmd.render(true), "\n<command:here>");
    }
}
