mod progress;
mod screen;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::{SessionAction, SessionError};
pub use progress::{ResultsBreakdown, SessionProgress};
pub use screen::{
    CompletedScreen, DisplaySurface, InputSurface, QuestionScreen, Screen, UserAction,
};
pub use service::{QuizSession, RestartOutcome, SessionStatus};
pub use workflow::QuizRunner;
