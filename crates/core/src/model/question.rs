use serde::Serialize;
use thiserror::Error;

/// Smallest number of options a question may offer.
pub const MIN_OPTIONS: usize = 2;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Structural problems with a single question.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("expected at least 2 options, found {found}")]
    TooFewOptions { found: usize },

    #[error("correct answer {answer:?} is not one of the options")]
    AnswerNotInOptions { answer: String },
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question.
///
/// Fields are stored exactly as supplied: no trimming, case folding or
/// de-duplication of options. Serializes back to the input shape, so a
/// validated quiz can be written out and re-validated unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    #[serde(rename = "question")]
    text: String,
    options: Vec<String>,
    correct_answer: String,
    explanation: String,
}

impl Question {
    /// Build a question, enforcing the option count and answer membership rules.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::TooFewOptions` if fewer than two options are given.
    /// Returns `QuestionError::AnswerNotInOptions` if `correct_answer` does not
    /// match an option exactly.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        if options.len() < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions {
                found: options.len(),
            });
        }

        let correct_answer = correct_answer.into();
        if !options.iter().any(|option| *option == correct_answer) {
            return Err(QuestionError::AnswerNotInOptions {
                answer: correct_answer,
            });
        }

        Ok(Self {
            text: text.into(),
            options,
            correct_answer,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Exact string comparison against the correct answer.
    #[must_use]
    pub fn is_correct(&self, selected: &str) -> bool {
        self.correct_answer == selected
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn question_requires_two_options() {
        let err = Question::new("Q", opts(&["A"]), "A", "x").unwrap_err();
        assert_eq!(err, QuestionError::TooFewOptions { found: 1 });
    }

    #[test]
    fn question_requires_answer_among_options() {
        let err = Question::new("Q", opts(&["A", "B"]), "C", "x").unwrap_err();
        assert!(matches!(err, QuestionError::AnswerNotInOptions { answer } if answer == "C"));
    }

    #[test]
    fn answer_match_is_exact() {
        let q = Question::new("Q", opts(&["Paris", "paris"]), "Paris", "x").unwrap();
        assert!(q.is_correct("Paris"));
        assert!(!q.is_correct("paris"));
        assert!(!q.is_correct("Paris "));
    }

    #[test]
    fn duplicate_options_are_kept() {
        let q = Question::new("Q", opts(&["A", "A", "B"]), "A", "x").unwrap();
        assert_eq!(q.options().len(), 3);
    }
}
