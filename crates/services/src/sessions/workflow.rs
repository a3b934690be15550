use std::ops::ControlFlow;

use tracing::debug;

use super::screen::{DisplaySurface, InputSurface, Screen, UserAction};
use super::service::{QuizSession, RestartOutcome};
use crate::error::{RunnerError, SessionError};

/// Drives a `QuizSession` from a pair of surfaces, one action per cycle.
#[derive(Debug, Default)]
pub struct QuizRunner {
    session: QuizSession,
}

impl QuizRunner {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self { session }
    }

    /// Render, read one action, apply it; repeat until the user quits.
    ///
    /// Returns the session as it stood when the user quit.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Surface` if either surface fails, and
    /// `RunnerError::Session` if the input surface asks for a transition whose
    /// guard does not hold. Rejected quiz text is not an error: it is rendered
    /// as `Screen::ValidationFailed` and the loop continues.
    pub fn run<D, I>(mut self, display: &mut D, input: &mut I) -> Result<QuizSession, RunnerError>
    where
        D: DisplaySurface + ?Sized,
        I: InputSurface + ?Sized,
    {
        loop {
            let screen = Screen::for_session(&self.session);
            display.render(&screen)?;
            let action = input.next_action(&screen)?;
            if self.apply(action, display)?.is_break() {
                return Ok(self.session);
            }
        }
    }

    /// Apply a single action. Transient messages go straight to `display`.
    ///
    /// # Errors
    ///
    /// See [`QuizRunner::run`].
    pub fn apply<D>(
        &mut self,
        action: UserAction,
        display: &mut D,
    ) -> Result<ControlFlow<()>, RunnerError>
    where
        D: DisplaySurface + ?Sized,
    {
        debug!(session_id = %self.session.id(), ?action, "applying user action");
        match action {
            UserAction::Start(raw) => match self.session.start(&raw) {
                Ok(_) => {}
                Err(SessionError::Validation(err)) => {
                    display.render(&Screen::ValidationFailed {
                        message: err.to_string(),
                    })?;
                }
                Err(err) => return Err(err.into()),
            },
            UserAction::Submit(selected) => {
                self.session.submit_answer(&selected)?;
            }
            UserAction::RestartFull => self.session.restart_full()?,
            UserAction::RestartIncorrectOnly => {
                if self.session.restart_incorrect_only()? == RestartOutcome::NothingToRetry {
                    display.render(&Screen::Notice {
                        message: RestartOutcome::NOTHING_TO_RETRY_NOTICE.to_string(),
                    })?;
                }
            }
            UserAction::Quit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }
}
