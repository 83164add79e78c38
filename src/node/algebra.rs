use std::ops::{Add, BitOr, Div, Mul, Neg, Not, Sub};

use crate::{
    node::{
        core::Node,
        operator::{BinaryOperator, Elementary, ElementaryParams, SumParams},
        ops,
    },
    value::{core::Value, dtype::DType, index::Index},
};

macro_rules! binary_operator {
    ($trait:ident, $method:ident, $op:ident) => {
        impl<T: Into<Node>> $trait<T> for Node {
            type Output = Node;

            fn $method(self, rhs: T) -> Node {
                Node::binary(BinaryOperator::$op, self, rhs)
            }
        }

        impl<T: Into<Node>> $trait<T> for &Node {
            type Output = Node;

            fn $method(self, rhs: T) -> Node {
                Node::binary(BinaryOperator::$op, self, rhs)
            }
        }
    };
}

binary_operator!(Add, add, Sum);
binary_operator!(Mul, mul, Product);
binary_operator!(Div, div, Quotient);

impl<T: Into<Node>> Sub<T> for Node {
    type Output = Node;

    fn sub(self, rhs: T) -> Node {
        let rhs: Node = rhs.into();
        Node::binary(BinaryOperator::Sum, self, -rhs)
    }
}

impl<T: Into<Node>> Sub<T> for &Node {
    type Output = Node;

    fn sub(self, rhs: T) -> Node {
        let rhs: Node = rhs.into();
        Node::binary(BinaryOperator::Sum, self, -rhs)
    }
}

// `3 - node`, `2.0 * node`, ...: the plain value sits on the left.
macro_rules! reflected_operators {
    ($($ty:ty),*) => {
        $(
            impl Add<Node> for $ty {
                type Output = Node;

                fn add(self, rhs: Node) -> Node {
                    rhs.radd(self)
                }
            }

            impl Add<&Node> for $ty {
                type Output = Node;

                fn add(self, rhs: &Node) -> Node {
                    rhs.radd(self)
                }
            }

            impl Sub<Node> for $ty {
                type Output = Node;

                fn sub(self, rhs: Node) -> Node {
                    rhs.rsub(self)
                }
            }

            impl Sub<&Node> for $ty {
                type Output = Node;

                fn sub(self, rhs: &Node) -> Node {
                    rhs.rsub(self)
                }
            }

            impl Mul<Node> for $ty {
                type Output = Node;

                fn mul(self, rhs: Node) -> Node {
                    rhs.rmul(self)
                }
            }

            impl Mul<&Node> for $ty {
                type Output = Node;

                fn mul(self, rhs: &Node) -> Node {
                    rhs.rmul(self)
                }
            }

            impl Div<Node> for $ty {
                type Output = Node;

                fn div(self, rhs: Node) -> Node {
                    rhs.rdiv(self)
                }
            }

            impl Div<&Node> for $ty {
                type Output = Node;

                fn div(self, rhs: &Node) -> Node {
                    rhs.rdiv(self)
                }
            }
        )*
    };
}

reflected_operators!(i32, i64, f64, Value);

impl Neg for Node {
    type Output = Self;

    fn neg(self) -> Self {
        self.compose(ops::neg())
    }
}

impl Neg for &Node {
    type Output = Node;

    fn neg(self) -> Node {
        self.compose(ops::neg())
    }
}

impl Not for Node {
    type Output = Self;

    fn not(self) -> Self {
        self.compose(ops::not())
    }
}

impl Not for &Node {
    type Output = Node;

    fn not(self) -> Node {
        self.compose(ops::not())
    }
}

/// `a | b` pipes the result of `a` into `b`.
impl<T: Into<Node>> BitOr<T> for Node {
    type Output = Self;

    fn bitor(self, rhs: T) -> Self {
        self.compose(rhs)
    }
}

impl<T: Into<Node>> BitOr<T> for &Node {
    type Output = Node;

    fn bitor(self, rhs: T) -> Node {
        self.compose(rhs)
    }
}

/// Construction methods mirroring the operators. None of them evaluates
/// anything; each returns a new node that owns `self` as a child.
impl Node {
    /// Unary plus: the node itself.
    #[must_use]
    pub fn pos(&self) -> Self {
        self.clone()
    }

    /// `other + self`.
    pub fn radd(&self, other: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::Sum, other, self)
    }

    /// `other - self`, built as `other + (-self)`.
    pub fn rsub(&self, other: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::Sum, other, -self)
    }

    /// `other * self`.
    pub fn rmul(&self, other: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::Product, other, self)
    }

    /// `other / self`.
    pub fn rdiv(&self, other: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::Quotient, other, self)
    }

    /// `self ** exponent`.
    ///
    /// # Example
    /// ```
    /// use fframe::{node::core::Node, value::core::Value};
    ///
    /// let a = Node::constant(3);
    /// assert_eq!(a.pow(4).call(&[]).unwrap(), Value::Integer(81));
    /// assert_eq!(a.rpow(2).call(&[]).unwrap(), Value::Integer(8));
    /// ```
    pub fn pow(&self, exponent: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::Power, self, exponent)
    }

    /// `base ** self`.
    pub fn rpow(&self, base: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::Power, base, self)
    }

    /// `self < other`.
    pub fn less(&self, other: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::Less, self, other)
    }

    /// `self <= other`.
    pub fn less_equal(&self, other: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::LessEqual, self, other)
    }

    /// `self == other`, evaluated on the results. This builds a node; use
    /// [`Node::ptr_eq`] or [`Node::structural_eq`] to compare nodes.
    pub fn equal(&self, other: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::Equal, self, other)
    }

    /// `self != other`, evaluated on the results.
    pub fn not_equal(&self, other: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::NotEqual, self, other)
    }

    /// `self > other`.
    pub fn greater(&self, other: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::Greater, self, other)
    }

    /// `self >= other`.
    pub fn greater_equal(&self, other: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::GreaterEqual, self, other)
    }

    /// Pipes the result of `self` into `then`: the new node evaluates
    /// `then(self(args))`.
    ///
    /// # Example
    /// ```
    /// use fframe::{
    ///     node::{core::Node, ops::sqrt},
    ///     value::core::Value,
    /// };
    ///
    /// let root = Node::constant(4).compose(sqrt());
    /// assert_eq!(root.call(&[]).unwrap(), Value::Real(2.0));
    /// ```
    pub fn compose(&self, then: impl Into<Self>) -> Self {
        ops::composed(self, then)
    }

    /// Applies an elementary function with explicit parameters.
    #[must_use]
    pub fn elementary(&self, func: Elementary, params: ElementaryParams) -> Self {
        self.compose(ops::elementary(func, params))
    }

    /// Cosine of the result.
    #[must_use]
    pub fn cos(&self) -> Self {
        self.compose(ops::cos())
    }

    /// Sine of the result.
    #[must_use]
    pub fn sin(&self) -> Self {
        self.compose(ops::sin())
    }

    /// Exponential of the result.
    #[must_use]
    pub fn exp(&self) -> Self {
        self.compose(ops::exp())
    }

    /// Square root of the result.
    #[must_use]
    pub fn sqrt(&self) -> Self {
        self.compose(ops::sqrt())
    }

    /// Reduces the result with the backend's `sum`.
    #[must_use]
    pub fn sum(&self, params: SumParams) -> Self {
        self.compose(ops::sum_call(params))
    }

    /// Clips the result into `[low, high]`.
    pub fn clip(&self, low: impl Into<Self>, high: impl Into<Self>) -> Self {
        ops::clip(low, high, self)
    }

    /// Tests `low <= self < high`.
    pub fn in_between(&self, low: impl Into<Self>, high: impl Into<Self>) -> Self {
        ops::in_between(self, low, high)
    }

    /// Converts the result to `dtype` through the backend.
    #[must_use]
    pub fn astype(&self, dtype: DType) -> Self {
        self.compose(ops::as_type(dtype))
    }

    /// Subscripts the result.
    ///
    /// # Example
    /// ```
    /// use fframe::{
    ///     node::core::Node,
    ///     value::{core::Value, index::Index},
    /// };
    ///
    /// let x = Node::identity();
    /// let args = [Value::list([1, 2, 3])];
    ///
    /// assert_eq!(x.at(-1).call(&args).unwrap(), Value::Integer(3));
    /// assert_eq!(x.at(Index::slice(None, Some(2))).call(&args).unwrap(),
    ///            Value::list([1, 2]));
    /// ```
    pub fn at(&self, index: impl Into<Index>) -> Self {
        self.compose(ops::indexing(index))
    }

    /// Reads a named attribute of the result.
    pub fn attr(&self, name: impl Into<String>) -> Self {
        self.compose(ops::attribute(name))
    }

    /// Converts the result to an integer.
    #[must_use]
    pub fn to_int(&self) -> Self {
        self.compose(ops::int())
    }

    /// Converts the result to a real.
    #[must_use]
    pub fn to_float(&self) -> Self {
        self.compose(ops::float())
    }

    /// Converts the result to a boolean.
    #[must_use]
    pub fn to_bool(&self) -> Self {
        self.compose(ops::boolean())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::core::NodeKind;

    #[test]
    fn subtraction_adds_the_negation() {
        let a = Node::constant(3);
        let tree = &a - 5;
        match tree.kind() {
            NodeKind::Binary { op: BinaryOperator::Sum,
                               left,
                               right, } => {
                assert!(left.ptr_eq(&a));
                assert_eq!(right.to_string(), "-5");
            },
            _ => panic!("expected a sum node, got {tree}"),
        }
        assert_eq!(tree.call(&[]).unwrap(), Value::Integer(-2));
    }

    #[test]
    fn reflected_operands_keep_their_side() {
        let x = Node::identity();
        assert_eq!((10_i32 - &x).call(&[Value::Integer(3)]).unwrap(), Value::Integer(7));
        assert_eq!((1.0 / &x).call(&[Value::Integer(4)]).unwrap(), Value::Real(0.25));
        assert_eq!((Value::from("a") + &x).call(&[Value::from("b")]).unwrap(),
                   Value::from("ab"));
    }

    #[test]
    fn unary_plus_is_the_same_node() {
        let a = Node::constant(1);
        assert!(a.pos().ptr_eq(&a));
    }

    #[test]
    fn display_reads_like_an_expression() {
        let x = Node::identity();
        let tree = (x.at(0) + 1).clip(0, 10);
        assert_eq!(tree.to_string(), "clip((args[0] + 1), 0, 10)");
        assert_eq!((-x.sqrt()).to_string(), "-sqrt(args)");
    }
}
