use std::fmt::{self, Debug, Display};

use crate::{
    evaluator::core::EvalResult,
    node::operator::{Elementary, ElementaryParams, SumParams},
    value::{core::Value, dtype::DType},
};

/// The numeric operations backend-dependent nodes delegate to.
///
/// A backend is stateless and shared by every evaluation in the process, so
/// implementations must be reentrant.
pub trait Backend: Send + Sync + Debug {
    /// Which implementation this is.
    fn kind(&self) -> BackendKind;

    /// Applies cosine, sine, exponential or square root.
    fn elementary(&self,
                  func: Elementary,
                  x: &Value,
                  params: &ElementaryParams)
                  -> EvalResult<Value>;

    /// Logical and of two values.
    fn logical_and(&self, a: &Value, b: &Value) -> EvalResult<Value>;

    /// Logical negation.
    fn logical_not(&self, x: &Value) -> EvalResult<Value>;

    /// Clips `value` into `[low, high]`.
    fn clip(&self, value: &Value, low: &Value, high: &Value) -> EvalResult<Value>;

    /// Sums the elements of `x`.
    fn sum(&self, x: &Value, params: &SumParams) -> EvalResult<Value>;

    /// Converts `x` to the element type `dtype`.
    fn astype(&self, x: &Value, dtype: DType) -> EvalResult<Value>;
}

/// Names the backend implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Element-wise operations over arrays.
    Vectorized,
    /// Single-value math.
    Scalar,
}

impl BackendKind {
    /// Returns `true` if this build includes the vectorized backend.
    #[must_use]
    pub const fn vectorized_available() -> bool {
        cfg!(feature = "vectorized")
    }
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vectorized => write!(f, "vectorized"),
            Self::Scalar => write!(f, "scalar"),
        }
    }
}
