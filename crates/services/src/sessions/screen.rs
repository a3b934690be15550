use std::io;

use serde::Serialize;

use quiz_core::model::{AnswerRecord, Feedback};

use super::progress::ResultsBreakdown;
use super::service::{QuizSession, SessionStatus};

/// Render description handed to a `DisplaySurface`.
///
/// Presentation-agnostic: no pre-formatted strings beyond the user-facing
/// messages themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    /// Nothing loaded yet; waiting for quiz text.
    Welcome,
    /// Quiz text was rejected. Shown once, then the previous screen resumes.
    ValidationFailed { message: String },
    Question(QuestionScreen),
    Completed(CompletedScreen),
    /// Informational message, such as having nothing left to retry.
    Notice { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionScreen {
    /// 1-based.
    pub position: usize,
    pub total: usize,
    pub text: String,
    pub options: Vec<String>,
    /// Result of the previous answer, if any.
    pub feedback: Option<Feedback>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedScreen {
    /// Result of the final answer of the round.
    pub feedback: Option<Feedback>,
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub breakdown: ResultsBreakdown,
    pub summary: Vec<AnswerRecord>,
    /// Whole seconds from the start of the round to its last answer.
    pub elapsed_secs: Option<i64>,
}

impl Screen {
    /// Describe what the session currently looks like.
    #[must_use]
    pub fn for_session(session: &QuizSession) -> Self {
        match session.status() {
            SessionStatus::NotStarted => Screen::Welcome,
            SessionStatus::InProgress => match (session.current_question(), session.position()) {
                (Some(question), Some(position)) => Screen::Question(QuestionScreen {
                    position,
                    total: session.total_questions(),
                    text: question.text().to_string(),
                    options: question.options().to_vec(),
                    feedback: session.pending_feedback().cloned(),
                }),
                _ => Screen::Welcome,
            },
            SessionStatus::Completed => Screen::Completed(CompletedScreen {
                feedback: session.pending_feedback().cloned(),
                score: session.score(),
                total: session.total_questions(),
                percentage: session.percentage().unwrap_or_default(),
                breakdown: session.breakdown(),
                summary: session.summary().to_vec(),
                elapsed_secs: session.round_duration().map(|d| d.num_seconds()),
            }),
        }
    }
}

/// One user interaction, delivered by an `InputSurface`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Load (or reload) a quiz from raw JSON text.
    Start(String),
    Submit(String),
    RestartFull,
    RestartIncorrectOnly,
    Quit,
}

/// Receives render descriptions. How they are drawn is up to the implementor.
pub trait DisplaySurface {
    /// # Errors
    ///
    /// Returns an I/O error if the surface cannot be written to.
    fn render(&mut self, screen: &Screen) -> io::Result<()>;
}

/// Supplies exactly one user action per interaction cycle.
pub trait InputSurface {
    /// `screen` is what the user is currently looking at.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the surface cannot be read from.
    fn next_action(&mut self, screen: &Screen) -> io::Result<UserAction>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;

    const QUIZ: &str = r#"[
        {"question":"Q1","options":["a","b"],"correct_answer":"a","explanation":"e1"},
        {"question":"Q2","options":["a","b","c"],"correct_answer":"b","explanation":"e2"}
    ]"#;

    #[test]
    fn not_started_session_shows_welcome() {
        assert_eq!(Screen::for_session(&QuizSession::new()), Screen::Welcome);
    }

    #[test]
    fn question_screen_carries_previous_feedback() {
        let mut session = QuizSession::new();
        session.start(QUIZ).unwrap();

        let Screen::Question(first) = Screen::for_session(&session) else {
            panic!("expected question screen");
        };
        assert_eq!(first.position, 1);
        assert_eq!(first.total, 2);
        assert_eq!(first.text, "Q1");
        assert!(first.feedback.is_none());

        session.submit_answer("b").unwrap();
        let Screen::Question(second) = Screen::for_session(&session) else {
            panic!("expected question screen");
        };
        assert_eq!(second.position, 2);
        assert_eq!(second.options, ["a", "b", "c"]);
        let feedback = second.feedback.unwrap();
        assert!(!feedback.was_correct);
        assert_eq!(feedback.correct_answer, "a");
    }

    #[test]
    fn completed_screen_summarises_round() {
        let mut session = QuizSession::with_clock(fixed_clock());
        session.start(QUIZ).unwrap();
        session.submit_answer("a").unwrap();
        session.submit_answer("c").unwrap();

        let Screen::Completed(done) = Screen::for_session(&session) else {
            panic!("expected completed screen");
        };
        assert_eq!(done.score, 1);
        assert_eq!(done.total, 2);
        assert!((done.percentage - 50.0).abs() < f64::EPSILON);
        assert_eq!(done.breakdown.incorrect, 1);
        assert_eq!(done.summary.len(), 2);
        assert_eq!(done.summary[1].user_answer, "c");
        assert!(done.feedback.is_some());
        assert_eq!(done.elapsed_secs, Some(0));
    }
}
