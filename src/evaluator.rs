/// Evaluation context and node dispatch.
///
/// Defines `Context`, the read-only state every evaluation runs in, and the
/// `eval` entry point that walks a node tree. Also declares `EvalResult`
/// and `Kwargs`, used by all evaluation functions.
///
/// # Responsibilities
/// - Dispatches each node kind to its evaluation routine.
/// - Passes the call arguments unchanged to every child.
/// - Propagates child failures without wrapping them.
pub mod core;

/// Binary operators on values.
///
/// Implements the operand's own arithmetic, exponentiation and comparison,
/// with element-wise evaluation whenever an array is involved.
pub mod binary;

/// Negation and native conversions.
pub mod unary;

/// Apply-style operations on the single runtime input.
///
/// Routes backend-dependent operations (`not`, elementary functions,
/// reductions, dtype conversion) to the context's backend and evaluates
/// indexing and attribute access directly.
pub mod apply;

/// Structural and ternary nodes: lists, tuples, mappings, range tests and
/// clipping.
pub mod structural;
