use std::fmt;

use serde::Serialize;

use crate::model::Question;

//
// ─── ANSWER RECORD ────────────────────────────────────────────────────────────
//

/// One answered question, appended to the session log and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    pub question_text: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub was_correct: bool,
}

impl AnswerRecord {
    /// Score `selected` against `question`.
    ///
    /// Any string is accepted; one that is not among the options is simply wrong.
    #[must_use]
    pub fn grade(question: &Question, selected: impl Into<String>) -> Self {
        let user_answer = selected.into();
        Self {
            question_text: question.text().to_string(),
            was_correct: question.is_correct(&user_answer),
            correct_answer: question.correct_answer().to_string(),
            user_answer,
        }
    }
}

//
// ─── FEEDBACK ─────────────────────────────────────────────────────────────────
//

/// Result of the most recently answered question, shown on the next render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub was_correct: bool,
    pub correct_answer: String,
    pub explanation: String,
}

impl Feedback {
    #[must_use]
    pub fn for_answer(question: &Question, record: &AnswerRecord) -> Self {
        Self {
            was_correct: record.was_correct,
            correct_answer: question.correct_answer().to_string(),
            explanation: question.explanation().to_string(),
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.was_correct {
            write!(f, "Correct! {}", self.explanation)
        } else {
            write!(
                f,
                "Incorrect. The correct answer is {}. {}",
                self.correct_answer, self.explanation
            )
        }
    }
}
