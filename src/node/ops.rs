use crate::{
    node::{
        core::{Node, NodeKind},
        operator::{Apply, BinaryOperator, Conversion, Elementary, ElementaryParams, SumParams},
    },
    value::{core::Value, dtype::DType, index::Index},
};

macro_rules! binary_constructors {
    ($($(#[$doc:meta])* $name:ident => $op:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(left: impl Into<Node>, right: impl Into<Node>) -> Node {
                Node::binary(BinaryOperator::$op, left, right)
            }
        )*
    };
}

binary_constructors! {
    /// `left + right`.
    sum => Sum,
    /// `left * right`.
    product => Product,
    /// `left / right`, true division.
    quotient => Quotient,
    /// `left ** right`.
    power => Power,
    /// `left < right`.
    less => Less,
    /// `left <= right`.
    less_equal => LessEqual,
    /// `left == right`.
    equal => Equal,
    /// `left != right`.
    not_equal => NotEqual,
    /// `left > right`.
    greater => Greater,
    /// `left >= right`.
    greater_equal => GreaterEqual,
}

/// A node that always yields `value`.
pub fn constant(value: impl Into<Value>) -> Node {
    Node::constant(value)
}

/// A node that yields its call arguments.
#[must_use]
pub fn identity() -> Node {
    Node::identity()
}

fn apply(apply: Apply) -> Node {
    Node::new(NodeKind::Apply(apply))
}

/// Negates its single input.
#[must_use]
pub fn neg() -> Node {
    apply(Apply::Neg)
}

/// Logical negation of its single input, through the backend.
#[must_use]
pub fn not() -> Node {
    apply(Apply::Not)
}

/// An elementary function with explicit parameters.
///
/// # Example
/// ```
/// use fframe::{
///     backend::core::BackendKind,
///     node::{
///         operator::{Elementary, ElementaryParams},
///         ops::{constant, elementary},
///     },
///     value::{core::Value, dtype::DType},
/// };
///
/// let params = ElementaryParams { dtype: Some(DType::Int) };
/// let tree = constant(Value::list([0.0, 2.0])) | elementary(Elementary::Exp, params);
///
/// if BackendKind::vectorized_available() {
///     assert_eq!(tree.call(&[]).unwrap().to_string(), "array([1, 7])");
/// }
/// ```
#[must_use]
pub fn elementary(func: Elementary, params: ElementaryParams) -> Node {
    apply(Apply::Elementary(func, params))
}

/// Cosine of its single input.
#[must_use]
pub fn cos() -> Node {
    elementary(Elementary::Cos, ElementaryParams::default())
}

/// Sine of its single input.
#[must_use]
pub fn sin() -> Node {
    elementary(Elementary::Sin, ElementaryParams::default())
}

/// Exponential of its single input.
#[must_use]
pub fn exp() -> Node {
    elementary(Elementary::Exp, ElementaryParams::default())
}

/// Square root of its single input.
#[must_use]
pub fn sqrt() -> Node {
    elementary(Elementary::Sqrt, ElementaryParams::default())
}

/// Reduces its single input with the backend's `sum`.
#[must_use]
pub fn sum_call(params: SumParams) -> Node {
    apply(Apply::SumCall(params))
}

/// Subscripts its single input with a stored key.
pub fn indexing(index: impl Into<Index>) -> Node {
    apply(Apply::Indexing(index.into()))
}

/// Reads a named attribute off its single input.
pub fn attribute(name: impl Into<String>) -> Node {
    apply(Apply::Attribute(name.into()))
}

/// Converts its single input to `dtype` through the backend.
#[must_use]
pub fn as_type(dtype: DType) -> Node {
    apply(Apply::AsType(dtype))
}

fn convert(conversion: Conversion) -> Node {
    Node::new(NodeKind::Convert(conversion))
}

/// Converts its single input to an integer.
#[must_use]
pub fn int() -> Node {
    convert(Conversion::Int)
}

/// Converts its single input to a real.
#[must_use]
pub fn float() -> Node {
    convert(Conversion::Float)
}

/// Converts its single input to a boolean.
#[must_use]
pub fn boolean() -> Node {
    convert(Conversion::Bool)
}

/// `low <= value < high`.
///
/// # Example
/// ```
/// use fframe::{node::ops::in_between, value::core::Value};
///
/// assert_eq!(in_between(5, 5, 10).call(&[]).unwrap(), Value::Bool(true));
/// assert_eq!(in_between(10, 5, 10).call(&[]).unwrap(), Value::Bool(false));
/// ```
pub fn in_between(value: impl Into<Node>, low: impl Into<Node>, high: impl Into<Node>) -> Node {
    Node::new(NodeKind::InBetween { value: value.into(),
                                    low:   low.into(),
                                    high:  high.into(), })
}

/// Clips `leaf` into `[low, high]`.
///
/// # Example
/// ```
/// use fframe::{node::ops::clip, value::core::Value};
///
/// assert_eq!(clip(0, 10, -5).call(&[]).unwrap(), Value::Integer(0));
/// assert_eq!(clip(0, 10, 15).call(&[]).unwrap(), Value::Integer(10));
/// assert_eq!(clip(0, 10, 5).call(&[]).unwrap(), Value::Integer(5));
/// ```
pub fn clip(low: impl Into<Node>, high: impl Into<Node>, leaf: impl Into<Node>) -> Node {
    Node::new(NodeKind::Clip { low:  low.into(),
                               high: high.into(),
                               leaf: leaf.into(), })
}

/// Evaluates `first`, then `then` on its result.
pub fn composed(first: impl Into<Node>, then: impl Into<Node>) -> Node {
    Node::new(NodeKind::Composed { first: first.into(),
                                   then:  then.into(), })
}
