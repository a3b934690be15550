//! Structural validation of user-supplied quiz JSON.
//!
//! Validation fails fast: the first problem found is returned as a single
//! error whose `Display` text can be shown to the user as-is.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{MIN_OPTIONS, Question, QuestionError};

/// Fields every question object must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 4] = ["question", "options", "correct_answer", "explanation"];

/// Reasons a quiz definition is rejected.
///
/// Question indexes are stored 0-based and rendered 1-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("Please paste quiz data to start the quiz.")]
    EmptyInput,

    #[error("Invalid JSON format: {reason}")]
    MalformedInput { reason: String },

    #[error("Quiz data must be a list of questions, found {found}.")]
    WrongShape { found: &'static str },

    #[error("Quiz data contains no questions.")]
    NoQuestions,

    #[error("Question {} must be an object.", .index + 1)]
    QuestionNotObject { index: usize },

    #[error("Question {} is missing the '{field}' field.", .index + 1)]
    MissingField { index: usize, field: &'static str },

    #[error("Question {} must have at least 2 options, found {found}.", .index + 1)]
    TooFewOptions { index: usize, found: usize },

    #[error("Question {}: '{field}' must be text.", .index + 1)]
    InvalidFieldType { index: usize, field: &'static str },

    #[error("Question {}: correct answer {answer:?} must be one of the options.", .index + 1)]
    AnswerNotInOptions { index: usize, answer: String },
}

/// Parse and validate raw quiz text into questions, preserving input order.
///
/// No normalization is applied; unknown extra fields are ignored.
///
/// # Errors
///
/// Returns the first `ValidationError` encountered.
pub fn validate_quiz(raw: &str) -> Result<Vec<Question>, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let parsed: Value = serde_json::from_str(raw).map_err(|err| ValidationError::MalformedInput {
        reason: err.to_string(),
    })?;

    let items = match parsed {
        Value::Array(items) => items,
        other => {
            return Err(ValidationError::WrongShape {
                found: json_kind(&other),
            });
        }
    };

    if items.is_empty() {
        return Err(ValidationError::NoQuestions);
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_question(index, item))
        .collect()
}

fn validate_question(index: usize, item: &Value) -> Result<Question, ValidationError> {
    let Some(fields) = item.as_object() else {
        return Err(ValidationError::QuestionNotObject { index });
    };

    if let Some(field) = REQUIRED_FIELDS
        .into_iter()
        .find(|field| !fields.contains_key(*field))
    {
        return Err(ValidationError::MissingField { index, field });
    }

    // A non-list `options` counts as having no options at all.
    let raw_options: &[Value] = match field(fields, index, "options")? {
        Value::Array(values) => values.as_slice(),
        _ => &[],
    };
    if raw_options.len() < MIN_OPTIONS {
        return Err(ValidationError::TooFewOptions {
            index,
            found: raw_options.len(),
        });
    }

    let text = text_field(fields, index, "question")?;
    let options = raw_options
        .iter()
        .map(|value| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or(ValidationError::InvalidFieldType {
                    index,
                    field: "options",
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let correct_answer = text_field(fields, index, "correct_answer")?;
    let explanation = text_field(fields, index, "explanation")?;

    Question::new(text, options, correct_answer, explanation).map_err(|err| match err {
        QuestionError::TooFewOptions { found } => ValidationError::TooFewOptions { index, found },
        QuestionError::AnswerNotInOptions { answer } => {
            ValidationError::AnswerNotInOptions { index, answer }
        }
    })
}

fn field<'a>(
    fields: &'a Map<String, Value>,
    index: usize,
    name: &'static str,
) -> Result<&'a Value, ValidationError> {
    fields
        .get(name)
        .ok_or(ValidationError::MissingField { index, field: name })
}

fn text_field<'a>(
    fields: &'a Map<String, Value>,
    index: usize,
    name: &'static str,
) -> Result<&'a str, ValidationError> {
    field(fields, index, name)?
        .as_str()
        .ok_or(ValidationError::InvalidFieldType { index, field: name })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
