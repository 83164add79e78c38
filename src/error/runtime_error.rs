#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while evaluating a node tree.
///
/// Every variant originates in a native operation on values (arithmetic,
/// comparison, subscripting, conversion) or in a backend operation. Nodes
/// propagate these errors unchanged, so a failing evaluation reports exactly
/// what the direct computation would have reported.
pub enum RuntimeError {
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
    },
    /// A binary operator does not support the given operand types.
    UnsupportedOperands {
        /// The operator symbol.
        op:    &'static str,
        /// Type name of the left operand.
        left:  &'static str,
        /// Type name of the right operand.
        right: &'static str,
    },
    /// A unary operator does not support the given operand type.
    BadOperand {
        /// The operator symbol.
        op:        &'static str,
        /// Type name of the operand.
        type_name: &'static str,
    },
    /// Attempted division by zero.
    DivisionByZero,
    /// Integer arithmetic overflowed, or a result is too large to represent.
    Overflow,
    /// Tried to access a sequence element outside the allowed bounds.
    IndexOutOfBounds {
        /// The index that was requested.
        index: i64,
        /// The length of the sequence.
        len:   usize,
    },
    /// A mapping does not contain the requested key.
    KeyNotFound {
        /// The key, rendered for display.
        key: String,
    },
    /// A value cannot be used as a mapping key.
    Unhashable {
        /// Type name of the value.
        type_name: &'static str,
    },
    /// A value does not support subscripting.
    NotSubscriptable {
        /// Type name of the value.
        type_name: &'static str,
    },
    /// A value cannot be iterated over.
    NotIterable {
        /// Type name of the value.
        type_name: &'static str,
    },
    /// A value has no attribute or method with the given name.
    UnknownAttribute {
        /// Type name of the value.
        type_name: &'static str,
        /// The attribute that was requested.
        name:      String,
    },
    /// The truth value of an array with more than one element is ambiguous.
    AmbiguousTruth {
        /// Number of elements in the array.
        len: usize,
    },
    /// Two arrays could not be broadcast together, or nested sequences are
    /// too ragged to form an array.
    ShapeMismatch {
        /// Shape of the left operand.
        left:  Vec<usize>,
        /// Shape of the right operand.
        right: Vec<usize>,
    },
    /// A reduction axis does not exist on the array.
    AxisOutOfBounds {
        /// The requested axis.
        axis: usize,
        /// Number of dimensions of the array.
        ndim: usize,
    },
    /// A math function was called outside of its domain.
    MathDomain {
        /// Name of the function.
        function: &'static str,
    },
    /// A string could not be converted to the requested type.
    InvalidLiteral {
        /// The target type.
        target:  &'static str,
        /// The offending string.
        literal: String,
    },
    /// The wrong number of positional arguments was supplied to a node.
    ArgumentCountMismatch {
        /// Number of arguments the node accepts.
        expected: usize,
        /// Number of arguments that were supplied.
        found:    usize,
    },
    /// A failure reported by a custom evaluable.
    Other {
        /// The failure message.
        message: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeError { details } => write!(f, "Type error: {details}."),
            Self::UnsupportedOperands { op, left, right } => write!(f,
                                                                    "Unsupported operand types for {op}: '{left}' and '{right}'."),
            Self::BadOperand { op, type_name } => {
                write!(f, "Bad operand type for unary {op}: '{type_name}'.")
            },
            Self::DivisionByZero => write!(f, "Division by zero."),
            Self::Overflow => write!(f, "Result too large to represent."),
            Self::IndexOutOfBounds { index, len } => write!(f,
                                                            "Index {index} is out of bounds for a sequence of length {len}."),
            Self::KeyNotFound { key } => write!(f, "Key not found: {key}."),
            Self::Unhashable { type_name } => {
                write!(f, "Unhashable type '{type_name}' cannot be used as a key.")
            },
            Self::NotSubscriptable { type_name } => {
                write!(f, "Object of type '{type_name}' is not subscriptable.")
            },
            Self::NotIterable { type_name } => {
                write!(f, "Object of type '{type_name}' is not iterable.")
            },
            Self::UnknownAttribute { type_name, name } => {
                write!(f, "Object of type '{type_name}' has no attribute '{name}'.")
            },
            Self::AmbiguousTruth { len } => write!(f,
                                                   "The truth value of an array with {len} elements is ambiguous."),
            Self::ShapeMismatch { left, right } => write!(f,
                                                          "Cannot broadcast shapes {left:?} and {right:?} together."),
            Self::AxisOutOfBounds { axis, ndim } => write!(f,
                                                           "Axis {axis} is out of bounds for an array of dimension {ndim}."),
            Self::MathDomain { function } => write!(f, "Math domain error in {function}."),
            Self::InvalidLiteral { target, literal } => {
                write!(f, "Invalid literal for {target}: '{literal}'.")
            },
            Self::ArgumentCountMismatch { expected, found } => write!(f,
                                                                      "Argument count mismatch: expected {expected}, found {found}."),
            Self::Other { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

#[cfg(feature = "vectorized")]
impl From<ndarray::ShapeError> for RuntimeError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::Other { message: format!("Array shape error: {err}.") }
    }
}
