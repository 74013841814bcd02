//! Generation of study material from source text
//!
//! Builds task-specific prompts, sends them through the Ollama client, and
//! parses completions into typed records. Parsing never fails: local-model
//! output is unreliable, so each batch path runs an ordered fallback ladder
//! and bottoms out at fixed placeholder records. The only errors that leave
//! this module are connectivity errors from the client.

mod parser;
mod prompts;

pub use prompts::{FLASHCARD_BATCH_SIZE, QUIZ_BATCH_SIZE};

use crate::flashcards::{Difficulty, Flashcard};
use crate::notes::NoteStyle;
use crate::ollama::{OllamaClient, Result};
use crate::quiz::QuizQuestion;

/// Content transformer: prompt construction plus resilient response parsing.
/// Stateless per call; each generation request is independent.
pub struct Generator {
    client: OllamaClient,
}

impl Generator {
    pub fn new(client: OllamaClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &OllamaClient {
        &self.client
    }

    /// Generate free-text notes in the requested style.
    ///
    /// Notes are free text, so the completion is returned verbatim.
    pub async fn make_notes(&self, content: &str, style: NoteStyle) -> Result<String> {
        let prompt = prompts::note_prompt(content, style);
        self.client.complete(&prompt).await
    }

    /// Generate a batch of up to [`FLASHCARD_BATCH_SIZE`] flashcards.
    ///
    /// Always yields at least one well-formed card; the parser falls back to
    /// placeholders when the completion cannot be understood.
    pub async fn make_flashcards(
        &self,
        content: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<Flashcard>> {
        let prompt = prompts::flashcard_prompt(content, difficulty);
        let completion = self.client.complete(&prompt).await?;

        let cards = parser::parse_flashcards(&completion)
            .into_iter()
            .map(|raw| Flashcard::new(raw.front, raw.back, difficulty))
            .collect();
        Ok(cards)
    }

    /// Generate a batch of up to [`QUIZ_BATCH_SIZE`] quiz questions.
    pub async fn make_quiz_questions(
        &self,
        content: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<QuizQuestion>> {
        let prompt = prompts::quiz_prompt(content, difficulty);
        let completion = self.client.complete(&prompt).await?;

        let questions = parser::parse_quiz_questions(&completion)
            .into_iter()
            .map(|raw| {
                QuizQuestion::new(
                    raw.question,
                    raw.options,
                    raw.correct_answer,
                    raw.explanation,
                    difficulty,
                )
            })
            .collect();
        Ok(questions)
    }
}
