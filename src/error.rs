//! Errors reported by balloon operations

use thiserror::Error;

use crate::types::BalloonState;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BalloonError {
    #[error("cannot {operation} while the balloon is {state}")]
    InvalidState {
        operation: &'static str,
        state: BalloonState,
    },
    #[error("target view is not attached to a view tree")]
    DetachedTarget,
    #[error("host view is not part of the target's view tree")]
    UnrelatedHost,
    #[error("invalid configuration: {0}")]
    Configuration(String),
}
