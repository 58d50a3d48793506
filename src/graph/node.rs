use std::{cell::RefCell, fmt, rc::Rc};

use indexmap::IndexMap;
use num_bigint::BigInt;

use crate::{
    error::RuntimeError,
    graph::{
        kind::Kind,
        scalar::{Operator, Scalar, parse_integer, parse_number},
    },
    interpreter::evaluator::{callable::Callable, core::EvalResult},
};

/// Payload of a graph node.
///
/// Nodes are only handled through [`NodeRef`]; this struct is the data behind
/// the shared cell.
pub struct Node {
    kind:       Kind,
    value:      Scalar,
    /// Slots, in insertion order. Rebinding a key keeps its position.
    attributes: IndexMap<String, NodeRef>,
    /// Nested elements. Append-only.
    children:   Vec<NodeRef>,
    /// Native behavior of `command` and `class` nodes.
    callable:   Option<Rc<dyn Callable>>,
}

impl Drop for Node {
    /// Releases nested nodes with a worklist, so dropping a long chain does
    /// not recurse once per level.
    fn drop(&mut self) {
        let mut orphans: Vec<NodeRef> = self.children.drain(..).collect();
        orphans.extend(self.attributes.drain(..).map(|(_, node)| node));
        while let Some(NodeRef(cell)) = orphans.pop() {
            if let Ok(cell) = Rc::try_unwrap(cell) {
                let mut node = cell.into_inner();
                orphans.extend(node.children.drain(..));
                orphans.extend(node.attributes.drain(..).map(|(_, node)| node));
            }
        }
    }
}

/// Shared handle to a graph node.
///
/// Cloning the handle shares the node; identity is the address of the shared
/// cell. Graphs may contain cycles (the root scope holds itself), so every
/// traversal keeps a visited set.
#[derive(Clone)]
pub struct NodeRef(Rc<RefCell<Node>>);

impl NodeRef {
    /// Creates a node with no attributes and no children.
    ///
    /// # Example
    /// ```
    /// use kb::graph::{kind::Kind, node::NodeRef};
    ///
    /// let hello = NodeRef::new(Kind::Symbol, "Hello");
    /// assert_eq!(hello.render(true), "\n<symbol:Hello>");
    /// ```
    pub fn new(kind: Kind, value: impl Into<Scalar>) -> Self {
        Self(Rc::new(RefCell::new(Node { kind,
                                         value: value.into(),
                                         attributes: IndexMap::new(),
                                         children: Vec::new(),
                                         callable: None })))
    }

    /// Creates a node carrying native behavior.
    pub fn with_callable(kind: Kind, value: impl Into<Scalar>, callable: Rc<dyn Callable>) -> Self {
        let node = Self::new(kind, value);
        node.0.borrow_mut().callable = Some(callable);
        node
    }

    pub fn symbol(text: &str) -> Self {
        Self::new(Kind::Symbol, text)
    }

    pub fn string(text: &str) -> Self {
        Self::new(Kind::String, text)
    }

    pub fn number(value: f64) -> Self {
        Self::new(Kind::Number, value)
    }

    pub fn integer(value: impl Into<BigInt>) -> Self {
        Self::new(Kind::Integer, value.into())
    }

    pub fn hex(value: impl Into<BigInt>) -> Self {
        Self::new(Kind::Hex, value.into())
    }

    pub fn bin(value: impl Into<BigInt>) -> Self {
        Self::new(Kind::Bin, value.into())
    }

    /// Operator node with no operands yet.
    pub fn op(operator: Operator) -> Self {
        Self::new(Kind::Op, operator)
    }

    /// Wraps `node` in a quote so evaluation returns it untouched.
    pub fn quote(node: &Self) -> Self {
        let tick = Self::op(Operator::Tick);
        tick.push(node);
        tick
    }

    /// Builds a node of `kind` from literal text.
    ///
    /// Numeric kinds parse the text (`hex` and `bin` with or without their
    /// radix prefix); text kinds take it verbatim.
    ///
    /// # Errors
    /// `InvalidLiteral` when the text does not parse for `kind`, or when
    /// `kind` has no textual constructor (operators, commands, classes and
    /// scopes).
    ///
    /// # Example
    /// ```
    /// use kb::graph::{kind::Kind, node::NodeRef};
    ///
    /// let port = NodeRef::from_text(Kind::Port, "8080").unwrap();
    /// assert_eq!(port.render(true), "\n<port:8080>");
    ///
    /// let hex = NodeRef::from_text(Kind::Hex, "0xDeadBeef").unwrap();
    /// assert_eq!(hex.render(true), "\n<hex:0xdeadbeef>");
    ///
    /// assert!(NodeRef::from_text(Kind::Integer, "twelve").is_err());
    /// ```
    pub fn from_text(kind: Kind, text: &str) -> EvalResult<Self> {
        let invalid = || RuntimeError::InvalidLiteral { kind,
                                                        text: text.to_string() };
        match kind {
            Kind::Number => parse_number(text).map(Self::number).ok_or_else(invalid),
            Kind::Integer => parse_integer(text, 10).map(Self::integer).ok_or_else(invalid),
            Kind::Hex => parse_integer(text, 16).map(Self::hex).ok_or_else(invalid),
            Kind::Bin => parse_integer(text, 2).map(Self::bin).ok_or_else(invalid),
            Kind::Op | Kind::Command | Kind::Class | Kind::Scope => Err(invalid()),
            Kind::Symbol
            | Kind::String
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
            | Kind::Email => Ok(Self::new(kind, text)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.0.borrow().kind
    }

    #[must_use]
    pub fn value(&self) -> Scalar {
        self.0.borrow().value.clone()
    }

    /// Radix-neutral text of the value; the bind-by-value key.
    #[must_use]
    pub fn value_text(&self) -> String {
        self.0.borrow().value.to_string()
    }

    /// The operator of an `op` node.
    #[must_use]
    pub fn operator(&self) -> Option<Operator> {
        match self.0.borrow().value {
            Scalar::Operator(op) => Some(op),
            _ => None,
        }
    }

    #[must_use]
    pub fn callable(&self) -> Option<Rc<dyn Callable>> {
        self.0.borrow().callable.clone()
    }

    /// Stable identity of the node, shown in non-test renders.
    #[must_use]
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }

    /// Whether both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// `A[key] = B`. Replaces an existing binding in place.
    pub fn set_attribute(&self, key: impl Into<String>, node: &Self) -> &Self {
        self.0.borrow_mut().attributes.insert(key.into(), node.clone());
        self
    }

    /// `A[key]`.
    ///
    /// # Errors
    /// `MissingAttribute` when `key` is not bound.
    pub fn get_attribute(&self, key: &str) -> EvalResult<Self> {
        self.0
            .borrow()
            .attributes
            .get(key)
            .cloned()
            .ok_or_else(|| RuntimeError::MissingAttribute { key:  key.to_string(),
                                                            node: self.to_string(), })
    }

    /// `A << B`: binds `node` under its kind name.
    pub fn bind_by_kind(&self, node: &Self) -> &Self {
        let key = node.kind().name();
        self.set_attribute(key, node)
    }

    /// `A >> B`: binds `node` under the text of its value.
    ///
    /// # Example
    /// ```
    /// use kb::graph::node::NodeRef;
    ///
    /// let hello = NodeRef::symbol("Hello");
    /// hello.bind_by_value(&NodeRef::symbol("right"));
    /// assert_eq!(hello.render(true), "\n<symbol:Hello>\n\tright = <symbol:right>");
    /// ```
    pub fn bind_by_value(&self, node: &Self) -> &Self {
        let key = node.value_text();
        self.set_attribute(key, node)
    }

    /// `A // B`: appends `node` to the children.
    pub fn push(&self, node: &Self) -> &Self {
        self.0.borrow_mut().children.push(node.clone());
        self
    }

    /// Snapshot of the attribute slots in insertion order.
    #[must_use]
    pub fn attributes(&self) -> Vec<(String, Self)> {
        self.0
            .borrow()
            .attributes
            .iter()
            .map(|(key, node)| (key.clone(), node.clone()))
            .collect()
    }

    /// Snapshot of the children.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        self.0.borrow().children.clone()
    }

    #[must_use]
    pub fn child(&self, index: usize) -> Option<Self> {
        self.0.borrow().children.get(index).cloned()
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// `<kind:value>`, with `hex` and `bin` values in their radix.
    #[must_use]
    pub fn header(&self) -> String {
        let node = self.0.borrow();
        let radix = match node.kind {
            Kind::Hex => 16,
            Kind::Bin => 2,
            _ => 10,
        };
        format!("<{}:{}>", node.kind, node.value.render_as(radix))
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header())
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @{:x}", self.header(), self.id())
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for NodeRef {}
