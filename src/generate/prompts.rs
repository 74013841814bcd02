//! Fixed prompt templates for each generation task
//!
//! Every prompt embeds the source content verbatim. The batch prompts ask
//! for a bare JSON array and nothing else; the parser still assumes the
//! model will not always comply.

use crate::flashcards::Difficulty;
use crate::notes::NoteStyle;

/// Cards requested per flashcard generation.
pub const FLASHCARD_BATCH_SIZE: usize = 5;

/// Questions requested per quiz generation.
pub const QUIZ_BATCH_SIZE: usize = 3;

const BULLET_TEMPLATE: &str = "Convert the following text into clear, concise bullet-point \
    study notes. Group related points under short headings and keep each bullet to one idea.";

const DETAILED_TEMPLATE: &str = "Convert the following text into detailed study notes. Use \
    headings, explain each concept thoroughly, and include definitions and examples where \
    the text provides them.";

const CONDENSED_TEMPLATE: &str = "Condense the following text into a short summary of the \
    essential points only. Keep it brief enough to review in under a minute.";

pub fn note_prompt(content: &str, style: NoteStyle) -> String {
    let template = match style {
        NoteStyle::Bullet => BULLET_TEMPLATE,
        NoteStyle::Detailed => DETAILED_TEMPLATE,
        NoteStyle::Condensed => CONDENSED_TEMPLATE,
    };
    format!("{}\n\nText:\n{}", template, content)
}

pub fn flashcard_prompt(content: &str, difficulty: Difficulty) -> String {
    format!(
        "Create exactly {count} {difficulty} flashcards from the following text. \
         Respond with ONLY a JSON array in this exact format, no other text:\n\
         [{{\"front\": \"question\", \"back\": \"answer\"}}]\n\n\
         Text:\n{content}",
        count = FLASHCARD_BATCH_SIZE,
        difficulty = difficulty.as_str(),
        content = content,
    )
}

pub fn quiz_prompt(content: &str, difficulty: Difficulty) -> String {
    format!(
        "Create exactly {count} {difficulty} multiple-choice questions from the following \
         text. Each question must have exactly 4 options. Respond with ONLY a JSON array in \
         this exact format, no other text:\n\
         [{{\"question\": \"...\", \"options\": [\"a\", \"b\", \"c\", \"d\"], \
         \"correctAnswer\": 0, \"explanation\": \"...\"}}]\n\n\
         Text:\n{content}",
        count = QUIZ_BATCH_SIZE,
        difficulty = difficulty.as_str(),
        content = content,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_prompt_embeds_content_for_every_style() {
        let content = "Mitochondria are the powerhouse of the cell.";
        for style in [NoteStyle::Bullet, NoteStyle::Detailed, NoteStyle::Condensed] {
            let prompt = note_prompt(content, style);
            assert!(prompt.contains(content), "style {:?} lost the content", style);
        }
    }

    #[test]
    fn test_note_prompts_differ_by_style() {
        let bullet = note_prompt("x", NoteStyle::Bullet);
        let detailed = note_prompt("x", NoteStyle::Detailed);
        let condensed = note_prompt("x", NoteStyle::Condensed);
        assert_ne!(bullet, detailed);
        assert_ne!(detailed, condensed);
    }

    #[test]
    fn test_batch_prompts_request_json_and_embed_content() {
        let content = "The Treaty of Westphalia was signed in 1648.";

        let cards = flashcard_prompt(content, Difficulty::Easy);
        assert!(cards.contains(content));
        assert!(cards.contains("JSON array"));
        assert!(cards.contains("exactly 5"));

        let quiz = quiz_prompt(content, Difficulty::Hard);
        assert!(quiz.contains(content));
        assert!(quiz.contains("correctAnswer"));
        assert!(quiz.contains("exactly 3"));
        assert!(quiz.contains("hard"));
    }
}
