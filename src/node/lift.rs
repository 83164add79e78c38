use crate::{
    node::core::{Node, NodeKind},
    value::core::Value,
};

/// A native aggregate literal whose leaves may be nodes or plain values.
///
/// Lists, tuples and maps nest freely; [`lift`] unfolds the whole literal
/// into one node tree.
#[derive(Debug, Clone)]
pub enum Literal {
    /// A node, kept as is.
    Node(Node),
    /// A plain value, lifted to a constant.
    Value(Value),
    /// An ordered sequence.
    List(Vec<Literal>),
    /// A fixed tuple.
    Tuple(Vec<Literal>),
    /// Key-value pairs.
    Map(Vec<(Literal, Literal)>),
}

impl Literal {
    /// Builds a tuple literal from any number of items.
    pub fn tuple<I, T>(items: I) -> Self
        where I: IntoIterator<Item = T>,
              T: Into<Self>
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Builds a mapping literal from key-value pairs.
    pub fn map<I, K, V>(pairs: I) -> Self
        where I: IntoIterator<Item = (K, V)>,
              K: Into<Self>,
              V: Into<Self>
    {
        Self::Map(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<Node> for Literal {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<&Node> for Literal {
    fn from(node: &Node) -> Self {
        Self::Node(node.clone())
    }
}

macro_rules! literal_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Self::Value(value.into())
                }
            }
        )*
    };
}

literal_from_value!(Value, i32, i64, f64, bool, &str, String);

impl<T: Into<Self>> From<Vec<T>> for Literal {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Self>, B: Into<Self>> From<(A, B)> for Literal {
    fn from((a, b): (A, B)) -> Self {
        Self::Tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<Self>, B: Into<Self>, C: Into<Self>> From<(A, B, C)> for Literal {
    fn from((a, b, c): (A, B, C)) -> Self {
        Self::Tuple(vec![a.into(), b.into(), c.into()])
    }
}

/// Lifts a literal into a node tree.
///
/// Lists, tuples and maps become structural nodes whose evaluation rebuilds
/// the same shape from their evaluated children. Nodes are used as they
/// are, and plain values become constants.
///
/// A map node evaluates every key, then every value, and pairs them by
/// position; when two keys evaluate equal the later pair wins.
///
/// # Example
/// ```
/// use fframe::{
///     node::{
///         core::Node,
///         lift::{Literal, lift},
///     },
///     value::core::Value,
/// };
///
/// let a = Node::constant(3);
/// let b = Node::constant(4);
///
/// assert_eq!(lift(vec![&a, &b]).call(&[]).unwrap(), Value::list([3, 4]));
/// assert_eq!(lift(Literal::map([(&a, &b)])).call(&[]).unwrap(),
///            Value::map([(3, 4)]));
///
/// let nested = lift((&a, vec![Literal::from(&b), Literal::from(5)]));
/// assert_eq!(nested.call(&[]).unwrap(),
///            Value::tuple([Value::Integer(3), Value::list([4, 5])]));
/// ```
pub fn lift(literal: impl Into<Literal>) -> Node {
    match literal.into() {
        Literal::Node(node) => node,
        Literal::Value(value) => Node::constant(value),
        Literal::List(items) => Node::new(NodeKind::List(items.into_iter().map(lift).collect())),
        Literal::Tuple(items) => Node::new(NodeKind::Tuple(items.into_iter().map(lift).collect())),
        Literal::Map(pairs) => {
            let (keys, values) = pairs.into_iter().map(|(k, v)| (lift(k), lift(v))).unzip();
            Node::new(NodeKind::Dict { keys, values })
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_pass_through_unchanged() {
        let a = Node::constant(1);
        assert!(lift(&a).ptr_eq(&a));
    }

    #[test]
    fn later_keys_win() {
        let x = Node::identity();
        let tree = lift(Literal::map([(Literal::from(&x), Literal::from(1)),
                                      (Literal::from(2), Literal::from(&x))]));
        assert_eq!(tree.call(&[Value::Integer(2)]).unwrap(), Value::map([(2, 2)]));
    }

    #[test]
    fn size_counts_every_element() {
        let tree = lift(vec![Literal::from(1), Literal::from((2, 3))]);
        assert_eq!(tree.size(), 5);
        assert_eq!(tree.to_string(), "[1, (2, 3)]");
    }
}
