mod models;

pub use models::{AnswerRecord, QuizQuestion, QuizResult, OPTION_COUNT};
