/// The backend interface.
///
/// Declares the `Backend` trait, the fixed set of elementary operations
/// backend-dependent nodes delegate to, and `BackendKind`, the names of the
/// available implementations.
pub mod core;

/// Process-wide backend selection.
///
/// Resolves the backend once, on first use, from the configuration and
/// keeps it for the rest of the process. Programs may establish the choice
/// explicitly before the first evaluation.
pub mod selection;

/// Element-wise backend on `ndarray` arrays, with broadcasting.
#[cfg(feature = "vectorized")]
pub mod vectorized;

/// Single-value fallback backend.
pub mod scalar;
