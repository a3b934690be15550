#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use error::{RunnerError, SessionAction, SessionError};

pub use sessions::{
    CompletedScreen, DisplaySurface, InputSurface, QuestionScreen, QuizRunner, QuizSession,
    RestartOutcome, ResultsBreakdown, Screen, SessionProgress, SessionStatus, UserAction,
};
