//! Data models for quiz questions and completed attempts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flashcards::Difficulty;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// A multiple-choice question with exactly four options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`, always in 0..=3.
    pub correct_answer: usize,
    pub explanation: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl QuizQuestion {
    pub fn new(
        question: String,
        options: Vec<String>,
        correct_answer: usize,
        explanation: String,
        difficulty: Difficulty,
    ) -> Self {
        debug_assert_eq!(options.len(), OPTION_COUNT);
        debug_assert!(correct_answer < OPTION_COUNT);
        Self {
            id: Uuid::new_v4(),
            question,
            options,
            correct_answer,
            explanation,
            difficulty,
            tags: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// One graded answer within a quiz attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: Uuid,
    /// Selected option index; `None` means the question was left unanswered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<usize>,
    pub correct: bool,
}

/// A completed quiz attempt. Created once per attempt, immutable after.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: Uuid,
    pub score: usize,
    pub total: usize,
    pub answers: Vec<AnswerRecord>,
    pub completed_at: DateTime<Utc>,
}

impl QuizResult {
    /// Grade an attempt against the question set.
    ///
    /// Correctness is recomputed here from each question's stored
    /// `correct_answer`; selections past the end of `selections` count as
    /// unanswered. The result always has one answer record per question.
    pub fn grade(questions: &[QuizQuestion], selections: &[Option<usize>]) -> Self {
        let answers: Vec<AnswerRecord> = questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let selected = selections.get(i).copied().flatten();
                AnswerRecord {
                    question_id: q.id,
                    selected,
                    correct: selected == Some(q.correct_answer),
                }
            })
            .collect();

        let score = answers.iter().filter(|a| a.correct).count();

        Self {
            id: Uuid::new_v4(),
            score,
            total: questions.len(),
            answers,
            completed_at: Utc::now(),
        }
    }
}
