mod answer;
mod ids;
mod question;

pub use answer::{AnswerRecord, Feedback};
pub use ids::SessionId;
pub use question::{MIN_OPTIONS, Question, QuestionError};
