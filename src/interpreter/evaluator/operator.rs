use log::debug;

use crate::{
    error::RuntimeError,
    graph::{node::NodeRef, scalar::Operator},
    interpreter::evaluator::core::EvalResult,
};

impl NodeRef {
    /// Runs the operator of an `op` node.
    ///
    /// A quote returns its operand untouched. Every other operator evaluates
    /// both operands before touching any node, so a failing operand leaves
    /// the graph as it was.
    pub(in crate::interpreter::evaluator) fn eval_operator(&self, scope: &Self) -> EvalResult<Self> {
        let operator = self.operator()
                           .ok_or_else(|| RuntimeError::UnknownOperator { node: self.to_string() })?;
        let operands = self.children();
        if operands.len() != operator.arity() {
            return Err(RuntimeError::MalformedOperator { node:     self.to_string(),
                                                         expected: operator.arity(),
                                                         found:    operands.len(), });
        }

        match operator {
            Operator::Tick => Ok(operands[0].clone()),
            Operator::Eq => {
                let (left, right) = evaluate_pair(&operands, scope)?;
                let name = left.value_text();
                debug!("bind {name} = {right}");
                scope.set_attribute(name, &right);
                Ok(right)
            },
            Operator::Push => {
                let (left, right) = evaluate_pair(&operands, scope)?;
                left.push(&right);
                Ok(left)
            },
            Operator::LShift => {
                let (left, right) = evaluate_pair(&operands, scope)?;
                left.bind_by_kind(&right);
                Ok(left)
            },
            Operator::RShift => {
                let (left, right) = evaluate_pair(&operands, scope)?;
                left.bind_by_value(&right);
                Ok(left)
            },
            Operator::Colon => {
                let (left, right) = evaluate_pair(&operands, scope)?;
                left.apply(&right, scope)
            },
        }
    }
}

/// Evaluates the two operands of a binary operator, left first.
fn evaluate_pair(operands: &[NodeRef], scope: &NodeRef) -> EvalResult<(NodeRef, NodeRef)> {
    let left = operands[0].evaluate(scope)?;
    let right = operands[1].evaluate(scope)?;
    Ok((left, right))
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{ErrorKind, RuntimeError},
        graph::{kind::Kind, node::NodeRef, scalar::Operator},
        interpreter::scope::root_scope,
    };

    fn binary(operator: Operator, left: &NodeRef, right: &NodeRef) -> NodeRef {
        let node = NodeRef::op(operator);
        node.push(left).push(right);
        node
    }

    #[test]
    fn quote_returns_operand_unevaluated() {
        let scope = root_scope();
        let sym = NodeRef::symbol("unbound");
        let quoted = NodeRef::quote(&sym);
        assert!(quoted.evaluate(&scope).unwrap().ptr_eq(&sym));
    }

    #[test]
    fn assignment_binds_and_returns_value() {
        let scope = root_scope();
        let value = NodeRef::string("v");
        let assign = binary(Operator::Eq, &NodeRef::quote(&NodeRef::symbol("x")), &value);

        assert!(assign.evaluate(&scope).unwrap().ptr_eq(&value));
        assert!(NodeRef::symbol("x").evaluate(&scope).unwrap().ptr_eq(&value));
    }

    #[test]
    fn push_appends_evaluated_right_to_left() {
        let scope = root_scope();
        let a = NodeRef::symbol("A");
        let b = NodeRef::string("B");
        scope.set_attribute("a", &a).set_attribute("b", &b);

        let result = binary(Operator::Push, &NodeRef::symbol("a"), &NodeRef::symbol("b"))
            .evaluate(&scope)
            .unwrap();
        assert!(result.ptr_eq(&a));
        assert!(a.child(a.child_count() - 1).unwrap().ptr_eq(&b));
    }

    #[test]
    fn shifts_bind_by_kind_and_value() {
        let scope = root_scope();
        let host = NodeRef::new(Kind::Vector, "host");
        scope.set_attribute("host", &host);
        scope.set_attribute("s", &NodeRef::string("text"));

        binary(Operator::LShift, &NodeRef::symbol("host"), &NodeRef::symbol("s")).evaluate(&scope)
                                                                                  .unwrap();
        binary(Operator::RShift, &NodeRef::symbol("host"), &NodeRef::symbol("s")).evaluate(&scope)
                                                                                  .unwrap();
        assert_eq!(host.render(true),
                   "\n<vector:host>\n\tstring = <string:text>\n\ttext = <string:text> _/");
    }

    #[test]
    fn failing_operand_leaves_left_untouched() {
        let scope = root_scope();
        let a = NodeRef::symbol("A");
        scope.set_attribute("a", &a);
        let err = binary(Operator::Push, &NodeRef::symbol("a"), &NodeRef::symbol("missing"))
            .evaluate(&scope)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
        assert_eq!(a.child_count(), 0);
    }

    #[test]
    fn missing_operands_are_reported() {
        let scope = root_scope();
        let lonely = NodeRef::op(Operator::Push);
        lonely.push(&NodeRef::string("only"));
        assert_eq!(lonely.evaluate(&scope).unwrap_err(),
                   RuntimeError::MalformedOperator { node:     "<op://>".to_string(),
                                                     expected: 2,
                                                     found:    1, });
    }

    #[test]
    fn op_without_operator_is_a_syntax_error() {
        let scope = root_scope();
        let err = NodeRef::new(Kind::Op, "?").evaluate(&scope).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }
}
