use std::{fmt, str::FromStr};

use log::warn;

use crate::{backend::core::BackendKind, error::ConfigError};

/// Environment variable naming the backend preference.
pub const BACKEND_ENV: &str = "FFRAME_BACKEND";

/// Which backend the process should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendPreference {
    /// The vectorized backend if this build has it, the scalar one otherwise.
    #[default]
    Auto,
    /// The vectorized backend.
    Vectorized,
    /// The scalar backend.
    Scalar,
}

impl FromStr for BackendPreference {
    type Err = ConfigError;

    /// Parses a preference, ignoring case and surrounding whitespace.
    ///
    /// # Example
    /// ```
    /// use fframe::config::BackendPreference;
    ///
    /// assert_eq!(" Scalar ".parse::<BackendPreference>().unwrap(), BackendPreference::Scalar);
    /// assert!("gpu".parse::<BackendPreference>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(Self::Auto),
            "vectorized" => Ok(Self::Vectorized),
            "scalar" => Ok(Self::Scalar),
            _ => Err(ConfigError::UnknownBackend { name: s.to_string() }),
        }
    }
}

impl fmt::Display for BackendPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Vectorized => write!(f, "vectorized"),
            Self::Scalar => write!(f, "scalar"),
        }
    }
}

/// Process configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// The backend preference.
    pub backend: BackendPreference,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// An unparsable `FFRAME_BACKEND` is logged and treated as `auto`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through a variable lookup function.
    ///
    /// # Example
    /// ```
    /// use fframe::config::{BackendPreference, Config};
    ///
    /// let config = Config::from_lookup(|_| Some("scalar".to_string()));
    /// assert_eq!(config.backend, BackendPreference::Scalar);
    ///
    /// let config = Config::from_lookup(|_| Some("quantum".to_string()));
    /// assert_eq!(config.backend, BackendPreference::Auto);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let backend = match lookup(BACKEND_ENV) {
            None => BackendPreference::Auto,
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                                        warn!("Ignoring {BACKEND_ENV}: {err}");
                                        BackendPreference::Auto
                                    }),
        };
        Self { backend }
    }

    /// Resolves the preference to a backend this build provides.
    #[must_use]
    pub fn resolve(&self) -> BackendKind {
        match self.backend {
            BackendPreference::Auto if BackendKind::vectorized_available() => {
                BackendKind::Vectorized
            },
            BackendPreference::Auto | BackendPreference::Scalar => BackendKind::Scalar,
            BackendPreference::Vectorized => {
                crate::backend::selection::available(BackendKind::Vectorized)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_means_auto() {
        assert_eq!(Config::from_lookup(|_| None), Config::default());
    }

    #[test]
    fn scalar_is_always_available() {
        let config = Config { backend: BackendPreference::Scalar };
        assert_eq!(config.resolve(), BackendKind::Scalar);
    }

    #[test]
    fn auto_prefers_vectorized() {
        let expected = if cfg!(feature = "vectorized") {
            BackendKind::Vectorized
        } else {
            BackendKind::Scalar
        };
        assert_eq!(Config::default().resolve(), expected);
    }

    #[test]
    fn unknown_names_are_reported() {
        assert_eq!("numpy".parse::<BackendPreference>(),
                   Err(ConfigError::UnknownBackend { name: "numpy".to_string() }));
    }
}
