/// Mapping keys.
///
/// Defines the `MapKey` type used for the keys of a `Value::Map`. Only
/// immutable scalar values and tuples of them can be keys; reals are wrapped
/// in `OrderedFloat` so that keys have a total order.
pub mod key;
/// Element types.
///
/// Defines `DType`, the closed set of element types that dtype conversion and
/// reductions accept, and the promotion order between them.
pub mod dtype;
/// Typed n-dimensional arrays.
///
/// Defines `NdArray`, the `ndarray`-backed payload of `Value::Array`, its
/// conversion from nested sequences, and the broadcasting helpers that
/// element-wise operations are built on.
#[cfg(feature = "vectorized")]
pub mod array;
/// Subscripting.
///
/// Defines `Index`, the key an indexing node stores, and the subscripting
/// rules for sequences, arrays, strings and mappings.
pub mod index;

/// The runtime value type.
///
/// Declares the `Value` enum that flows through every node during evaluation,
/// along with its conversions, truthiness, attributes and formatting.
pub mod core;
