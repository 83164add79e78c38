use std::sync::OnceLock;

use log::{info, warn};

#[cfg(feature = "vectorized")]
use crate::backend::vectorized::Vectorized;
use crate::{
    backend::{
        core::{Backend, BackendKind},
        scalar::Scalar,
    },
    config::Config,
};

// The process-wide backend. Set once, never changed.
static ACTIVE: OnceLock<BackendKind> = OnceLock::new();

/// Returns the process-wide backend, resolving it from the environment
/// configuration on first use.
pub fn active() -> BackendKind {
    *ACTIVE.get_or_init(|| {
               let kind = Config::from_env().resolve();
               info!("Using the {kind} backend.");
               kind
           })
}

/// Establishes the process-wide backend.
///
/// Must be called before the first evaluation that uses the global context.
/// A vectorized request in a build without the `vectorized` feature installs
/// the scalar backend.
///
/// # Errors
/// Returns the backend already in use if the choice was established
/// earlier, either by a previous call or by a first evaluation.
pub fn install(kind: BackendKind) -> Result<BackendKind, BackendKind> {
    let kind = available(kind);
    match ACTIVE.set(kind) {
        Ok(()) => {
            info!("Using the {kind} backend.");
            Ok(kind)
        },
        Err(_) => {
            let current = active();
            warn!("Backend already set to {current}; ignoring request for {kind}.");
            Err(current)
        },
    }
}

/// Maps a requested backend to one this build provides.
#[must_use]
pub fn available(kind: BackendKind) -> BackendKind {
    if kind == BackendKind::Vectorized && !BackendKind::vectorized_available() {
        warn!("The vectorized backend is not available in this build; using the scalar backend.");
        return BackendKind::Scalar;
    }
    kind
}

/// Returns the backend implementation for a kind.
#[must_use]
pub fn for_kind(kind: BackendKind) -> &'static dyn Backend {
    match available(kind) {
        #[cfg(feature = "vectorized")]
        BackendKind::Vectorized => &Vectorized,
        #[cfg(not(feature = "vectorized"))]
        BackendKind::Vectorized => &Scalar,
        BackendKind::Scalar => &Scalar,
    }
}
