use chrono::{DateTime, Duration, Utc};
use std::fmt;
use tracing::{debug, info, warn};

use quiz_core::Clock;
use quiz_core::model::{AnswerRecord, Feedback, Question, SessionId};
use quiz_core::validate_quiz;

use super::progress::{ResultsBreakdown, SessionProgress};
use crate::error::{SessionAction, SessionError};

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

/// Lifecycle state of a quiz session, derived from the stored counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionStatus::NotStarted => "not started",
            SessionStatus::InProgress => "in progress",
            SessionStatus::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Outcome of asking to retry only the incorrectly answered questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartOutcome {
    /// A new round began with this many questions.
    Restarted { questions: usize },
    /// Every answer was correct; the session stays completed.
    NothingToRetry,
}

impl RestartOutcome {
    pub const NOTHING_TO_RETRY_NOTICE: &'static str =
        "All answers were correct! No questions to retry.";
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Single-user quiz session state machine.
///
/// Owns the validated question set and steps through the active questions one
/// answer at a time. `Completed` is never stored: it holds exactly when every
/// active question has an answer record.
pub struct QuizSession {
    id: SessionId,
    clock: Clock,
    started: bool,
    original: Vec<Question>,
    active: Vec<Question>,
    current: usize,
    score: usize,
    answers: Vec<AnswerRecord>,
    pending_feedback: Option<Feedback>,
    round: u32,
    round_started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a not-started session that reads the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Clock::System)
    }

    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            id: SessionId::new(),
            clock,
            started: false,
            original: Vec::new(),
            active: Vec::new(),
            current: 0,
            score: 0,
            answers: Vec::new(),
            pending_feedback: None,
            round: 0,
            round_started_at: None,
            completed_at: None,
        }
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Validate `raw` and begin a fresh session over its questions.
    ///
    /// Accepted from any state: a successful start discards whatever was in
    /// progress, including the previous original question set. Returns the
    /// number of questions loaded.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Validation` if the quiz text is rejected. The
    /// session is left exactly as it was.
    pub fn start(&mut self, raw: &str) -> Result<usize, SessionError> {
        let questions = match validate_quiz(raw) {
            Ok(questions) => questions,
            Err(err) => {
                warn!(session_id = %self.id, error = %err, "quiz definition rejected");
                return Err(err.into());
            }
        };

        self.original = questions.clone();
        self.started = true;
        self.round = 0;
        self.begin_round(questions);

        info!(
            session_id = %self.id,
            questions = self.active.len(),
            "quiz started"
        );
        Ok(self.active.len())
    }

    /// Record an answer to the current question and advance.
    ///
    /// Comparison with the correct answer is exact; a selection that is not
    /// among the options is accepted and scored as incorrect.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::GuardViolation` unless the session is in progress.
    pub fn submit_answer(&mut self, selected: &str) -> Result<&AnswerRecord, SessionError> {
        let Some(question) = self.current_question() else {
            return Err(self.guard_violation(SessionAction::SubmitAnswer));
        };

        let record = AnswerRecord::grade(question, selected);
        let feedback = Feedback::for_answer(question, &record);
        debug!(
            session_id = %self.id,
            position = self.current + 1,
            was_correct = record.was_correct,
            "answer recorded"
        );

        if record.was_correct {
            self.score += 1;
        }
        self.pending_feedback = Some(feedback);
        let recorded = self.answers.len();
        self.answers.push(record);
        self.current += 1;

        if self.is_complete() {
            self.completed_at = Some(self.clock.now());
            info!(
                session_id = %self.id,
                round = self.round,
                score = self.score,
                total = self.active.len(),
                elapsed_secs = self.round_duration().map(|d| d.num_seconds()),
                "round completed"
            );
        }

        Ok(&self.answers[recorded])
    }

    /// Start over with the full original question set.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::GuardViolation` unless the session is completed.
    pub fn restart_full(&mut self) -> Result<(), SessionError> {
        if !self.is_complete() {
            return Err(self.guard_violation(SessionAction::RestartFull));
        }

        self.begin_round(self.original.clone());
        info!(
            session_id = %self.id,
            round = self.round,
            questions = self.active.len(),
            "quiz restarted"
        );
        Ok(())
    }

    /// Start a new round containing only the questions answered incorrectly in
    /// the round just completed, in their original order.
    ///
    /// When every answer was correct nothing changes and
    /// `RestartOutcome::NothingToRetry` is returned.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::GuardViolation` unless the session is completed.
    pub fn restart_incorrect_only(&mut self) -> Result<RestartOutcome, SessionError> {
        if !self.is_complete() {
            return Err(self.guard_violation(SessionAction::RestartIncorrectOnly));
        }

        let retry: Vec<Question> = self
            .active
            .iter()
            .zip(&self.answers)
            .filter(|(_, record)| !record.was_correct)
            .map(|(question, _)| question.clone())
            .collect();

        if retry.is_empty() {
            info!(session_id = %self.id, round = self.round, "nothing to retry");
            return Ok(RestartOutcome::NothingToRetry);
        }

        let questions = retry.len();
        self.begin_round(retry);
        info!(
            session_id = %self.id,
            round = self.round,
            questions,
            "retrying incorrect answers"
        );
        Ok(RestartOutcome::Restarted { questions })
    }

    /// Abandon everything and return to the not-started state.
    pub fn reset(&mut self) {
        debug!(session_id = %self.id, "session reset");
        *self = Self {
            id: self.id,
            ..Self::with_clock(self.clock)
        };
    }

    fn begin_round(&mut self, questions: Vec<Question>) {
        self.active = questions;
        self.current = 0;
        self.score = 0;
        self.answers.clear();
        self.pending_feedback = None;
        self.round += 1;
        self.round_started_at = Some(self.clock.now());
        self.completed_at = None;
    }

    fn guard_violation(&self, action: SessionAction) -> SessionError {
        let status = self.status();
        warn!(session_id = %self.id, %action, %status, "transition guard violated");
        SessionError::GuardViolation { action, status }
    }

    //
    // ─── READ-ONLY VIEWS ───────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if !self.started {
            SessionStatus::NotStarted
        } else if self.current < self.active.len() {
            SessionStatus::InProgress
        } else {
            SessionStatus::Completed
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status() == SessionStatus::Completed
    }

    /// 1 for the first pass after `start`, incremented by every restart.
    /// 0 before the session starts.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn round_started_at(&self) -> Option<DateTime<Utc>> {
        self.round_started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Time from the start of the round to its last answer, once completed.
    #[must_use]
    pub fn round_duration(&self) -> Option<Duration> {
        Some(self.completed_at? - self.round_started_at?)
    }

    /// Number of questions in the active round.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.active.len()
    }

    /// 1-based position of the question awaiting an answer.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.current_question().map(|_| self.current + 1)
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.started {
            self.active.get(self.current)
        } else {
            None
        }
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    /// Score as a percentage of the round's questions, only once completed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> Option<f64> {
        if !self.is_complete() || self.active.is_empty() {
            return None;
        }
        Some(self.score as f64 / self.active.len() as f64 * 100.0)
    }

    /// Feedback for the most recently answered question.
    #[must_use]
    pub fn pending_feedback(&self) -> Option<&Feedback> {
        self.pending_feedback.as_ref()
    }

    /// Every answer given this round, in order.
    #[must_use]
    pub fn summary(&self) -> &[AnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn breakdown(&self) -> ResultsBreakdown {
        let correct = self.answers.iter().filter(|r| r.was_correct).count();
        ResultsBreakdown {
            correct,
            incorrect: self.answers.len() - correct,
        }
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.active.len(),
            answered: self.answers.len(),
            remaining: self.active.len().saturating_sub(self.current),
            is_complete: self.is_complete(),
        }
    }

    #[must_use]
    pub fn active_questions(&self) -> &[Question] {
        &self.active
    }

    #[must_use]
    pub fn original_questions(&self) -> &[Question] {
        &self.original
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("status", &self.status())
            .field("round", &self.round)
            .field("active_len", &self.active.len())
            .field("original_len", &self.original.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("round_started_at", &self.round_started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
