/// Operators and typed parameters stored on nodes.
///
/// Declares the binary operators, native conversions, elementary functions
/// and apply-style operations a node can carry, together with the typed
/// parameter structures of the parameterised ones.
pub mod operator;

/// The node data model.
///
/// Defines `Node`, the immutable shared handle to an expression tree, the
/// closed `NodeKind` enum, the `Evaluable` capability, and the conversion of
/// plain values into constant nodes.
///
/// # Responsibilities
/// - Represents every node kind as one enum variant.
/// - Provides identity (`ptr_eq`) and deep (`structural_eq`) comparison.
/// - Renders trees as readable expressions.
pub mod core;

/// Named constructors for every node kind.
pub mod ops;

/// Operator syntax for building trees.
///
/// Implements the `std::ops` traits and the named construction methods on
/// `Node`. Every operation returns a new node and evaluates nothing.
pub mod algebra;

/// Lifting of native aggregates into structural nodes.
pub mod lift;
