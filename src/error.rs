/// Configuration errors.
///
/// Defines the errors that can occur while reading the process configuration,
/// such as an unknown backend name in the environment or on the command line.
pub mod config_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating a node tree.
/// Runtime errors come from the native value operations and backend
/// operations a node performs: type mismatches, division by zero, failed
/// lookups, invalid conversions and so on. Nodes never wrap them.
pub mod runtime_error;

pub use config_error::ConfigError;
pub use runtime_error::RuntimeError;
