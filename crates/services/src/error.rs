//! Shared error types for the services crate.

use std::fmt;
use std::io;

use thiserror::Error;

use quiz_core::ValidationError;

use crate::sessions::SessionStatus;

/// Transitions a caller can ask the session for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    SubmitAnswer,
    RestartFull,
    RestartIncorrectOnly,
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionAction::SubmitAnswer => "submit answer",
            SessionAction::RestartFull => "restart",
            SessionAction::RestartIncorrectOnly => "restart incorrect only",
        };
        f.write_str(name)
    }
}

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    /// The quiz text was rejected; the session is unchanged.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The caller invoked a transition whose guard does not hold.
    ///
    /// This is an integration bug in the input surface, not a user error.
    #[error("cannot {action} while the session is {status}")]
    GuardViolation {
        action: SessionAction,
        status: SessionStatus,
    },
}

/// Errors emitted by `QuizRunner`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunnerError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("surface I/O failed: {0}")]
    Surface(#[from] io::Error),
}
