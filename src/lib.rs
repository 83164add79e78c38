//! # fframe
//!
//! fframe is a deferred-evaluation expression algebra written in Rust.
//! Trees of immutable nodes are built with ordinary operator syntax and
//! evaluated later, any number of times, against concrete arguments, on a
//! vectorized or a scalar numeric backend.
//!
//! ```
//! use fframe::{Node, Value, lift};
//!
//! let x = Node::identity();
//! let tree = (x.at(0) + x.at(1) * x.at(2)).clip(0, 1);
//!
//! assert_eq!(tree.call(&[Value::list([0.25, 0.5, 1.0])]).unwrap(), Value::Real(0.75));
//! assert_eq!(tree.call(&[Value::list([1, 2, 3])]).unwrap(), Value::Integer(1));
//!
//! let pair = lift((x.at(0), x.at(1).sqrt()));
//! assert_eq!(pair.call(&[Value::list([1, 9])]).unwrap(),
//!            Value::tuple([Value::Integer(1), Value::Real(3.0)]));
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Numeric backends.
///
/// This module declares the fixed set of elementary operations that
/// backend-dependent nodes delegate to, the vectorized and scalar
/// implementations of them, and the process-wide choice between the two.
///
/// # Responsibilities
/// - Defines the `Backend` trait and its two implementations.
/// - Resolves the process-wide backend once and keeps it immutable.
/// - Falls back to the scalar backend when the vectorized one is not built.
pub mod backend;
/// Process configuration.
///
/// Reads the backend preference from the `FFRAME_BACKEND` environment
/// variable or from the command line, and resolves it to a backend this
/// build provides.
pub mod config;
/// Provides unified error types for evaluation and configuration.
///
/// This module defines all errors that can be raised while evaluating a node
/// tree or reading the configuration. It standardizes error reporting and
/// carries detailed information about failures.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (evaluation, configuration).
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Evaluates node trees.
///
/// This module walks a tree with concrete arguments and implements the
/// evaluation semantics of every node kind: the operand's own arithmetic and
/// comparison, negation and conversion, apply-style operations and the
/// structural builders.
///
/// # Responsibilities
/// - Provides the `Context` that every evaluation runs in.
/// - Passes call arguments unchanged to every child node.
/// - Propagates failures of native and backend operations unchanged.
pub mod evaluator;
/// Builds node trees.
///
/// This module defines the node data model, the named constructors for
/// every node kind, the operator syntax that builds nodes, and the lifting
/// of native aggregates into structural nodes.
///
/// # Responsibilities
/// - Keeps nodes immutable and cheap to share.
/// - Converts plain values into constant nodes.
/// - Never evaluates anything during construction.
pub mod node;
/// General utilities for safe numeric conversion.
///
/// This module provides conversion routines used throughout the evaluator
/// and the backends: safe conversions between integer and floating-point
/// types, and index and slice resolution.
///
/// # Responsibilities
/// - Safely convert between `i64`, `u32`, `usize`, and `f64` without silent
///   data loss.
/// - Resolve negative positions and slice bounds.
pub mod util;
/// Runtime values.
///
/// This module defines the values that flow through a tree during
/// evaluation, along with mapping keys, element types and subscripting.
pub mod value;

pub use crate::{
    evaluator::core::{Context, EvalResult, Kwargs},
    node::{
        core::{Evaluable, Node, to_node},
        lift::{Literal, lift},
    },
    value::core::Value,
};
