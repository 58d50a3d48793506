use log::debug;

use crate::{
    graph::{kind::Kind, node::NodeRef},
    interpreter::evaluator::{
        callable::{Class, Command},
        core::EvalResult,
    },
};

/// Value of the root scope node.
pub const ROOT_NAME: &str = "kb";

/// Type alias for builtin command handlers.
///
/// A builtin receives the argument it was applied to and the scope.
type BuiltinFn = fn(&NodeRef, &NodeRef) -> EvalResult<NodeRef>;

/// Commands registered in every root scope, keyed by name.
const BUILTIN_COMMANDS: &[(&str, BuiltinFn)] = &[("eval", eval_argument)];

/// Creates a root scope.
///
/// The scope binds itself under its kind name (`scope`), then a `class` for
/// every kind that can be built from text and the builtin commands, each
/// under its own name.
///
/// # Example
/// ```
/// use kb::{graph::node::NodeRef, interpreter::scope::root_scope};
///
/// let scope = root_scope();
/// assert!(scope.get_attribute("scope").unwrap().ptr_eq(&scope));
///
/// let port = scope.get_attribute("port").unwrap();
/// let made = port.apply(&NodeRef::symbol("8080"), &scope).unwrap();
/// assert_eq!(made.render(true), "\n<port:8080>");
/// ```
#[must_use]
pub fn root_scope() -> NodeRef {
    let scope = NodeRef::new(Kind::Scope, ROOT_NAME);
    scope.bind_by_kind(&scope);

    for kind in Kind::ALL.into_iter().filter(|kind| kind.is_constructible()) {
        scope.bind_by_value(&Class::new(kind).into_node());
    }
    for (name, func) in BUILTIN_COMMANDS {
        scope.bind_by_value(&Command::new(name).applies(*func).into_node());
    }

    debug!("root scope ready with {} bindings", scope.attributes().len());
    scope
}

/// `eval:x` evaluates its (quoted) argument in the scope.
fn eval_argument(argument: &NodeRef, scope: &NodeRef) -> EvalResult<NodeRef> {
    argument.evaluate(scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn scope_renders_its_self_reference_once() {
        let scope = root_scope();
        let tree = scope.render(true);
        assert!(tree.starts_with("\n<scope:kb>\n\tscope = <scope:kb> _/"));
    }

    #[test]
    fn classes_for_constructible_kinds_only() {
        let scope = root_scope();
        for name in ["symbol", "string", "number", "integer", "hex", "bin", "file", "ip", "port",
                     "url", "email", "vector"]
        {
            assert_eq!(scope.get_attribute(name).unwrap().kind(), Kind::Class, "{name}");
        }
        for name in ["op", "command", "class", "block"] {
            assert!(scope.get_attribute(name).is_err(), "{name}");
        }
    }

    #[test]
    fn eval_command_resolves_argument() {
        let scope = root_scope();
        let bound = NodeRef::string("bound");
        scope.set_attribute("x", &bound);
        let eval = scope.get_attribute("eval").unwrap();
        assert_eq!(eval.kind(), Kind::Command);
        assert!(eval.apply(&NodeRef::symbol("x"), &scope).unwrap().ptr_eq(&bound));
        assert_eq!(eval.evaluate(&scope).unwrap_err().kind(), ErrorKind::Type);
    }

    #[test]
    fn scopes_are_independent() {
        let first = root_scope();
        let second = root_scope();
        first.set_attribute("only_here", &NodeRef::integer(1));
        assert!(second.get_attribute("only_here").is_err());
    }
}
