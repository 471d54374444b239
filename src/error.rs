//! Error types surfaced by the movement subsystem.

use std::path::PathBuf;

use thiserror::Error;

use crate::agent::AgentId;

/// Failures reported by [`MovementSystem`](crate::MovementSystem).
#[derive(Debug, Error)]
pub enum MovementError {
    /// Storage for flock membership or motion state could not be reserved.
    ///
    /// No flock or motion state has been modified when this is returned.
    #[error("failed to allocate {what}")]
    Allocation {
        /// Which collection could not grow.
        what: &'static str,
    },
    /// An enrolled agent has no motion state. This is an internal invariant
    /// violation rather than a user-facing failure.
    #[error("agent {0} is enrolled in a flock but has no motion state")]
    MissingMotionState(AgentId),
    /// The supplied settings were rejected during initialisation.
    #[error(transparent)]
    InvalidSettings(#[from] SettingsError),
}

impl MovementError {
    pub(crate) const fn allocation(what: &'static str) -> Self {
        Self::Allocation { what }
    }
}

/// Failures loading or validating [`MovementSettings`](crate::MovementSettings).
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings from {path}: {source}")]
    Io {
        /// Location that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The settings document is not valid JSON for the settings schema.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value the simulation cannot run with.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}
