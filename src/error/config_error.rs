#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while reading configuration.
pub enum ConfigError {
    /// A backend name did not match any known backend.
    UnknownBackend {
        /// The name that was given.
        name: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownBackend { name } => write!(f,
                                                    "Unknown backend '{name}'. Expected one of 'auto', 'vectorized' or 'scalar'."),
        }
    }
}

impl std::error::Error for ConfigError {}
