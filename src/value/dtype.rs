use std::fmt::Display;

use crate::value::core::Value;

/// The element types a value can be converted to.
///
/// Variants are ordered by promotion rank: combining two element types
/// yields the greater of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DType {
    /// Boolean elements.
    Bool,
    /// 64-bit integer elements.
    Int,
    /// 64-bit floating-point elements.
    Float,
}

impl DType {
    /// Returns the element type of a scalar value, or `None` for strings and
    /// containers.
    #[must_use]
    pub const fn of_scalar(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(_) => Some(Self::Bool),
            Value::Integer(_) => Some(Self::Int),
            Value::Real(_) => Some(Self::Float),
            _ => None,
        }
    }

    /// Returns the common element type of `self` and `other`.
    ///
    /// # Example
    /// ```
    /// use fframe::value::dtype::DType;
    ///
    /// assert_eq!(DType::Bool.promote(DType::Int), DType::Int);
    /// assert_eq!(DType::Float.promote(DType::Int), DType::Float);
    /// ```
    #[must_use]
    pub fn promote(self, other: Self) -> Self {
        self.max(other)
    }

    /// The canonical name of the element type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int64",
            Self::Float => "float64",
        }
    }
}

impl Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
