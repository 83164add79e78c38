/// Entry point for binary operations.
///
/// Chooses between element-wise and scalar evaluation and routes each
/// operator to its handler.
pub mod core;
/// Element-wise evaluation over broadcast arrays.
#[cfg(feature = "vectorized")]
pub mod array;
/// Scalar arithmetic and sequence concatenation or repetition.
pub mod scalar;
/// Exponentiation.
pub mod power;
/// Equality and ordering comparisons.
pub mod comparison;
