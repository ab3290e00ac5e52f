//! Error types shared by the FSM core, the timers, and config loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::fsm::StateId;

/// Rejected tuning values. Raised at construction so a bad value never turns
/// into a divide-by-zero or a timer that never fires.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name}: duration must be a finite value >= 0, got {value}")]
    InvalidDuration { name: &'static str, value: f32 },

    #[error("{name}: radius must be a finite value > 0, got {value}")]
    InvalidRadius { name: &'static str, value: f32 },

    #[error("inner detection radius {inner} exceeds outer radius {outer}")]
    InnerRadiusBeyondOuter { inner: f32, outer: f32 },

    #[error("{name}: angle must be in (0, 360] degrees, got {value}")]
    InvalidAngle { name: &'static str, value: f32 },

    #[error("{name}: must be a finite value > 0, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name}: must be a finite value, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("failed to read config {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Sequencing errors raised by [`crate::fsm::StateMachine`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FsmError {
    #[error("state machine ticked before an initial state was set")]
    Uninitialized,

    #[error("state {0:?} is not registered with this machine")]
    UnknownState(StateId),
}

/// Failure while wiring a controller: a bad tuning value or a bad graph.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fsm(#[from] FsmError),
}
