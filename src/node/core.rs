use std::{fmt, mem::discriminant, sync::Arc};

use crate::{
    evaluator::core::{Context, EvalResult, Kwargs},
    node::operator::{Apply, BinaryOperator, Conversion, ElementaryParams},
    value::core::Value,
};

/// The capability shared by everything that can be invoked: take positional
/// and keyword arguments, produce one value.
///
/// [`Node`] implements it, and so does any closure wrapped with
/// [`Node::from_fn`]. Implement it directly to plug a foreign computation into
/// a tree with [`Node::wrap`]; the implementation receives the evaluation
/// context so it can consult the active backend.
pub trait Evaluable: Send + Sync {
    /// Invokes the evaluable with concrete arguments.
    ///
    /// # Errors
    /// Whatever the underlying computation fails with.
    fn evaluate(&self, ctx: &Context, args: &[Value], kwargs: &Kwargs) -> EvalResult<Value>;
}

/// An [`Evaluable`] backed by a closure.
pub struct FnEvaluable<F>(F);

impl<F> Evaluable for FnEvaluable<F>
    where F: Fn(&[Value], &Kwargs) -> EvalResult<Value> + Send + Sync
{
    fn evaluate(&self, _ctx: &Context, args: &[Value], kwargs: &Kwargs) -> EvalResult<Value> {
        (self.0)(args, kwargs)
    }
}

/// An immutable, invokable node of an expression tree.
///
/// A `Node` is a shared handle: cloning it is cheap and yields the same
/// node, which [`Node::ptr_eq`] detects. Node equality is reference-based;
/// the comparison methods of the operator algebra (`less`, `equal`, ...)
/// build comparison nodes instead of comparing trees, and
/// [`Node::structural_eq`] compares two trees deeply.
#[derive(Clone)]
pub struct Node(Arc<NodeKind>);

/// The closed set of node kinds.
pub enum NodeKind {
    /// Always yields the stored value, whatever the arguments.
    Constant(Value),
    /// Yields the arguments: the single positional argument itself, or a
    /// tuple of all positional arguments when there are zero or several.
    Identity,
    /// A foreign evaluable.
    Custom(Arc<dyn Evaluable>),
    /// Evaluates both operands and combines them with the operator.
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// The left operand.
        left:  Node,
        /// The right operand.
        right: Node,
    },
    /// `low <= value < high`.
    InBetween {
        /// The tested value.
        value: Node,
        /// The inclusive lower bound.
        low:   Node,
        /// The exclusive upper bound.
        high:  Node,
    },
    /// Clips `leaf` into `[low, high]`.
    Clip {
        /// The lower boundary.
        low:  Node,
        /// The upper boundary.
        high: Node,
        /// The clipped value.
        leaf: Node,
    },
    /// An apply-style operation on the single runtime argument.
    Apply(Apply),
    /// A native conversion of the single runtime argument.
    Convert(Conversion),
    /// Evaluates `first`, then feeds its result to `then` as the only
    /// argument.
    Composed {
        /// The inner node, invoked with the call arguments.
        first: Node,
        /// The outer node, invoked with the inner result.
        then:  Node,
    },
    /// Builds a list from its evaluated elements.
    List(Vec<Node>),
    /// Builds a tuple from its evaluated elements.
    Tuple(Vec<Node>),
    /// Builds a mapping from evaluated keys and values, paired by position.
    Dict {
        /// The key nodes.
        keys:   Vec<Node>,
        /// The value nodes.
        values: Vec<Node>,
    },
}

/// Converts anything node-like into a node.
///
/// Nodes (owned or borrowed) come back as the same node; every other value
/// is wrapped in a constant.
///
/// # Example
/// ```
/// use fframe::{
///     node::core::{Node, to_node},
///     value::core::Value,
/// };
///
/// let a = Node::constant(3);
/// assert!(to_node(&a).ptr_eq(&a));
/// assert!(to_node(to_node(&a)).ptr_eq(&a));
///
/// assert_eq!(to_node(5).call(&[]).unwrap(), Value::Integer(5));
/// ```
pub fn to_node(value: impl Into<Node>) -> Node {
    value.into()
}

impl Node {
    /// Wraps a node kind.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self(Arc::new(kind))
    }

    /// A node that always yields `value`.
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::new(NodeKind::Constant(value.into()))
    }

    /// A node that yields its call arguments.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(NodeKind::Identity)
    }

    /// Lifts a foreign evaluable into a node with the full operator algebra.
    #[must_use]
    pub fn wrap(evaluable: Arc<dyn Evaluable>) -> Self {
        Self::new(NodeKind::Custom(evaluable))
    }

    /// Lifts a closure into a node. The closure receives the positional and
    /// keyword arguments of every call.
    ///
    /// # Example
    /// ```
    /// use fframe::{evaluator::core::Kwargs, node::core::Node, value::core::Value};
    ///
    /// let scale = Node::from_fn(|args: &[Value], kwargs: &Kwargs| {
    ///     let factor = kwargs.get("factor").cloned().unwrap_or(Value::Integer(1));
    ///     Ok(Value::Integer(args.len() as i64 * factor.as_real()? as i64))
    /// });
    ///
    /// let kwargs = Kwargs::from([("factor".to_string(), Value::Integer(10))]);
    /// let result = (scale + 1).call_with(&[Value::Integer(1), Value::Integer(2)], &kwargs).unwrap();
    /// assert_eq!(result, Value::Integer(21));
    /// ```
    pub fn from_fn<F>(f: F) -> Self
        where F: Fn(&[Value], &Kwargs) -> EvalResult<Value> + Send + Sync + 'static
    {
        Self::wrap(Arc::new(FnEvaluable(f)))
    }

    /// A binary node.
    pub fn binary(op: BinaryOperator, left: impl Into<Self>, right: impl Into<Self>) -> Self {
        Self::new(NodeKind::Binary { op,
                                     left: left.into(),
                                     right: right.into() })
    }

    /// The node's kind.
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.0
    }

    /// Returns `true` if both handles refer to the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The direct children of the node, in evaluation order.
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        match self.kind() {
            NodeKind::Constant(_)
            | NodeKind::Identity
            | NodeKind::Custom(_)
            | NodeKind::Apply(_)
            | NodeKind::Convert(_) => Vec::new(),
            NodeKind::Binary { left, right, .. } => vec![left, right],
            NodeKind::InBetween { value, low, high } => vec![low, high, value],
            NodeKind::Clip { low, high, leaf } => vec![low, high, leaf],
            NodeKind::Composed { first, then } => vec![first, then],
            NodeKind::List(items) | NodeKind::Tuple(items) => items.iter().collect(),
            NodeKind::Dict { keys, values } => keys.iter().chain(values).collect(),
        }
    }

    /// The number of nodes in the tree rooted at this node. Shared subtrees
    /// are counted once per reference.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.children().into_iter().map(Self::size).sum::<usize>()
    }

    /// Compares two trees deeply.
    ///
    /// Constants compare by value, custom evaluables by identity, and every
    /// other node by kind, stored parameters and children.
    ///
    /// # Example
    /// ```
    /// use fframe::node::core::Node;
    ///
    /// let x = Node::identity();
    /// let a = (&x + 1).sqrt();
    /// let b = (Node::identity() + 1).sqrt();
    ///
    /// assert!(a.structural_eq(&b));
    /// assert!(!a.ptr_eq(&b));
    /// assert!(!a.structural_eq(&(x + 2).sqrt()));
    /// ```
    #[must_use]
    pub fn structural_eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }

        match (self.kind(), other.kind()) {
            (NodeKind::Constant(a), NodeKind::Constant(b)) => a == b,
            (NodeKind::Custom(a), NodeKind::Custom(b)) => Arc::ptr_eq(a, b),
            (NodeKind::Apply(a), NodeKind::Apply(b)) => a == b,
            (NodeKind::Convert(a), NodeKind::Convert(b)) => a == b,
            (NodeKind::Binary { op: a, .. }, NodeKind::Binary { op: b, .. }) if a != b => false,
            (a, b) => {
                let (mine, theirs) = (self.children(), other.children());
                discriminant(a) == discriminant(b)
                && mine.len() == theirs.len()
                && mine.iter().zip(&theirs).all(|(x, y)| x.structural_eq(y))
            },
        }
    }

    /// Evaluates the node with positional arguments only, using the
    /// process-wide backend.
    ///
    /// # Errors
    /// Whatever the evaluated operations fail with.
    pub fn call(&self, args: &[Value]) -> EvalResult<Value> {
        self.call_with(args, &Kwargs::new())
    }

    /// Evaluates the node with positional and keyword arguments, using the
    /// process-wide backend.
    ///
    /// # Errors
    /// Whatever the evaluated operations fail with.
    pub fn call_with(&self, args: &[Value], kwargs: &Kwargs) -> EvalResult<Value> {
        Context::global().eval(self, args, kwargs)
    }

    /// Evaluates the node in an explicit context.
    ///
    /// # Errors
    /// Whatever the evaluated operations fail with.
    pub fn call_in(&self, ctx: &Context, args: &[Value], kwargs: &Kwargs) -> EvalResult<Value> {
        ctx.eval(self, args, kwargs)
    }
}

impl Evaluable for Node {
    fn evaluate(&self, ctx: &Context, args: &[Value], kwargs: &Kwargs) -> EvalResult<Value> {
        ctx.eval(self, args, kwargs)
    }
}

impl From<&Self> for Node {
    fn from(node: &Self) -> Self {
        node.clone()
    }
}

macro_rules! node_from_constant {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Self::constant(value)
                }
            }
        )*
    };
}

node_from_constant!(Value, i32, i64, f64, bool, &str, String);

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Node]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeKind::Constant(value) => write!(f, "{value}"),
            NodeKind::Identity => write!(f, "args"),
            NodeKind::Custom(_) => write!(f, "<custom>"),
            NodeKind::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
            NodeKind::InBetween { value, low, high } => {
                write!(f, "in_between({value}, {low}, {high})")
            },
            NodeKind::Clip { low, high, leaf } => write!(f, "clip({leaf}, {low}, {high})"),
            NodeKind::Apply(apply) => write!(f, "{apply}"),
            NodeKind::Convert(conversion) => write!(f, "{conversion}"),
            NodeKind::Composed { first, then } => match then.kind() {
                NodeKind::Apply(Apply::Indexing(_) | Apply::Attribute(_)) => {
                    write!(f, "{first}{then}")
                },
                NodeKind::Apply(Apply::Neg) => write!(f, "-{first}"),
                NodeKind::Apply(Apply::Not) => write!(f, "!{first}"),
                NodeKind::Apply(Apply::Elementary(func, params))
                    if *params == ElementaryParams::default() =>
                {
                    write!(f, "{}({first})", func.name())
                },
                NodeKind::Convert(conversion) => write!(f, "{conversion}({first})"),
                _ => write!(f, "({first} | {then})"),
            },
            NodeKind::List(items) => {
                write!(f, "[")?;
                write_items(f, items)?;
                write!(f, "]")
            },
            NodeKind::Tuple(items) => {
                write!(f, "(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            },
            NodeKind::Dict { keys, values } => {
                write!(f, "{{")?;
                for (index, (key, value)) in keys.iter().zip(values).enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            },
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({self})")
    }
}
