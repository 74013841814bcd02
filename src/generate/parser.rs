//! Fallback parsing of model completions
//!
//! Local models drift from the requested output format, so each batch task
//! runs an ordered list of parser strategies until one yields usable
//! records. The last rung is always a fixed placeholder set, which makes
//! these functions total: whatever the completion looks like, the caller
//! receives well-formed, non-empty output.
//!
//! Flashcards: JSON array extraction, then line pairing, then placeholders.
//! Quiz questions: JSON array extraction, then placeholders (there is no
//! sensible line format for a four-option question).

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::quiz::OPTION_COUNT;

use super::prompts::{FLASHCARD_BATCH_SIZE, QUIZ_BATCH_SIZE};

/// A flashcard as parsed from a completion, before it gets an identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawFlashcard {
    pub front: String,
    pub back: String,
}

/// A quiz question as parsed from a completion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    #[serde(alias = "correct_answer")]
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
}

/// Slice out the first `[...]` span of a completion, if any.
///
/// Models often wrap the array in prose or a code fence; taking the first
/// `[` through the last `]` tolerates both.
fn extract_json_array(completion: &str) -> Option<&str> {
    let start = completion.find('[')?;
    let end = completion.rfind(']')?;
    if end <= start {
        return None;
    }
    Some(&completion[start..=end])
}

fn ordinal_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\d+[.)]\s*").unwrap())
}

/// Strategy (a): parse the bracketed span as a JSON array of cards.
fn flashcards_from_json(completion: &str) -> Option<Vec<RawFlashcard>> {
    let span = extract_json_array(completion)?;
    let cards: Vec<RawFlashcard> = serde_json::from_str(span).ok()?;

    let cards: Vec<RawFlashcard> = cards
        .into_iter()
        .filter(|c| !c.front.trim().is_empty() && !c.back.trim().is_empty())
        .take(FLASHCARD_BATCH_SIZE)
        .collect();

    if cards.is_empty() {
        None
    } else {
        Some(cards)
    }
}

/// Strategy (b): pair consecutive non-blank lines as front/back, stripping
/// a leading ordinal ("1. ", "2) ") from the front line.
fn flashcards_from_lines(completion: &str) -> Option<Vec<RawFlashcard>> {
    let lines: Vec<&str> = completion
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let cards: Vec<RawFlashcard> = lines
        .chunks_exact(2)
        .map(|pair| RawFlashcard {
            front: ordinal_prefix().replace(pair[0], "").into_owned(),
            back: pair[1].to_string(),
        })
        .filter(|c| !c.front.is_empty() && !c.back.is_empty())
        .take(FLASHCARD_BATCH_SIZE)
        .collect();

    if cards.is_empty() {
        None
    } else {
        Some(cards)
    }
}

/// Strategy (c): fixed cards so the caller always gets something to study.
fn placeholder_flashcards() -> Vec<RawFlashcard> {
    vec![
        RawFlashcard {
            front: "What is the main topic of the material you provided?".to_string(),
            back: "Review the source material and restate its central idea in one sentence."
                .to_string(),
        },
        RawFlashcard {
            front: "Name one key detail from the material.".to_string(),
            back: "Pick a supporting fact or definition from the source and write it down."
                .to_string(),
        },
    ]
}

/// Parse a completion into 1..=5 flashcards. Total: never fails.
pub fn parse_flashcards(completion: &str) -> Vec<RawFlashcard> {
    let strategies: [fn(&str) -> Option<Vec<RawFlashcard>>; 2] =
        [flashcards_from_json, flashcards_from_lines];

    for strategy in strategies {
        if let Some(cards) = strategy(completion) {
            return cards;
        }
    }

    log::warn!("Flashcard completion unparseable, returning placeholders");
    placeholder_flashcards()
}

/// JSON strategy for quiz questions, with per-item shape validation.
fn quiz_from_json(completion: &str) -> Option<Vec<RawQuizQuestion>> {
    let span = extract_json_array(completion)?;
    let questions: Vec<RawQuizQuestion> = serde_json::from_str(span).ok()?;

    let questions: Vec<RawQuizQuestion> = questions
        .into_iter()
        .filter(|q| {
            !q.question.trim().is_empty()
                && q.options.len() == OPTION_COUNT
                && q.correct_answer < OPTION_COUNT
        })
        .take(QUIZ_BATCH_SIZE)
        .collect();

    if questions.is_empty() {
        None
    } else {
        Some(questions)
    }
}

fn placeholder_quiz_questions() -> Vec<RawQuizQuestion> {
    vec![
        RawQuizQuestion {
            question: "What should you do when generated questions fail to load?".to_string(),
            options: vec![
                "Re-read the source material and try again".to_string(),
                "Give up on studying".to_string(),
                "Ignore the material".to_string(),
                "Delete your notes".to_string(),
            ],
            correct_answer: 0,
            explanation: "The model output could not be parsed; regenerating usually works."
                .to_string(),
        },
        RawQuizQuestion {
            question: "Which habit improves recall the most?".to_string(),
            options: vec![
                "Passive re-reading".to_string(),
                "Active self-testing".to_string(),
                "Highlighting everything".to_string(),
                "Single long cram session".to_string(),
            ],
            correct_answer: 1,
            explanation: "Retrieval practice outperforms passive review.".to_string(),
        },
    ]
}

/// Parse a completion into at least one well-formed quiz question.
pub fn parse_quiz_questions(completion: &str) -> Vec<RawQuizQuestion> {
    if let Some(questions) = quiz_from_json(completion) {
        return questions;
    }

    log::warn!("Quiz completion unparseable, returning placeholders");
    placeholder_quiz_questions()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flashcards_from_clean_json() {
        let completion = r#"[{"front":"Q1","back":"A1"},{"front":"Q2","back":"A2"}]"#;
        let cards = parse_flashcards(completion);
        assert_eq!(
            cards,
            vec![
                RawFlashcard { front: "Q1".into(), back: "A1".into() },
                RawFlashcard { front: "Q2".into(), back: "A2".into() },
            ]
        );
    }

    #[test]
    fn test_flashcards_from_json_wrapped_in_prose() {
        let completion = "Here are your flashcards:\n```json\n[{\"front\":\"Q\",\"back\":\"A\"}]\n```\nEnjoy!";
        let cards = parse_flashcards(completion);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "Q");
    }

    #[test]
    fn test_flashcards_json_truncated_to_batch_size() {
        let items: Vec<String> = (0..8)
            .map(|i| format!(r#"{{"front":"Q{i}","back":"A{i}"}}"#))
            .collect();
        let completion = format!("[{}]", items.join(","));
        let cards = parse_flashcards(&completion);
        assert_eq!(cards.len(), FLASHCARD_BATCH_SIZE);
    }

    #[test]
    fn test_flashcards_line_pairing_strips_ordinals() {
        let completion = "1. Q1\nA1\n2. Q2\nA2";
        let cards = parse_flashcards(completion);
        assert_eq!(
            cards,
            vec![
                RawFlashcard { front: "Q1".into(), back: "A1".into() },
                RawFlashcard { front: "Q2".into(), back: "A2".into() },
            ]
        );
    }

    #[test]
    fn test_flashcards_line_pairing_skips_blank_lines() {
        let completion = "1) What is Rust?\n\nA systems language\n\n2) Who makes it?\n\nThe Rust project\n";
        let cards = parse_flashcards(completion);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].front, "What is Rust?");
        assert_eq!(cards[1].back, "The Rust project");
    }

    #[test]
    fn test_flashcards_garbage_yields_placeholders() {
        let cards = parse_flashcards("");
        assert_eq!(cards.len(), 2);
        for card in &cards {
            assert!(!card.front.is_empty());
            assert!(!card.back.is_empty());
        }
    }

    #[test]
    fn test_flashcards_always_between_one_and_five() {
        let inputs = [
            r#"[{"front":"Q","back":"A"}]"#,
            "Q only one line",
            "lots\nof\nrandom\nlines\nhere\nmore\nlines\nagain",
            "[]",
            "[{\"front\":\"\",\"back\":\"\"}]",
            "{\"front\":\"not an array\"}",
        ];
        for input in inputs {
            let cards = parse_flashcards(input);
            assert!((1..=FLASHCARD_BATCH_SIZE).contains(&cards.len()), "input {:?}", input);
            for card in &cards {
                assert!(!card.front.is_empty(), "input {:?}", input);
                assert!(!card.back.is_empty(), "input {:?}", input);
            }
        }
    }

    #[test]
    fn test_quiz_from_clean_json() {
        let completion = r#"[{"question":"2+2?","options":["1","2","3","4"],"correctAnswer":3,"explanation":"arithmetic"}]"#;
        let questions = parse_quiz_questions(completion);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_answer, 3);
        assert_eq!(questions[0].options.len(), 4);
    }

    #[test]
    fn test_quiz_accepts_snake_case_field() {
        let completion = r#"[{"question":"Q","options":["a","b","c","d"],"correct_answer":1,"explanation":"e"}]"#;
        let questions = parse_quiz_questions(completion);
        assert_eq!(questions[0].correct_answer, 1);
    }

    #[test]
    fn test_quiz_rejects_wrong_option_count() {
        // Three options: invalid, falls through to placeholders.
        let completion = r#"[{"question":"Q","options":["a","b","c"],"correctAnswer":0,"explanation":"e"}]"#;
        let questions = parse_quiz_questions(completion);
        assert!(questions.iter().all(|q| q.options.len() == 4));
        assert!(!questions.is_empty());
    }

    #[test]
    fn test_quiz_rejects_out_of_range_answer() {
        let completion = r#"[{"question":"Q","options":["a","b","c","d"],"correctAnswer":7,"explanation":"e"}]"#;
        let questions = parse_quiz_questions(completion);
        assert!(questions.iter().all(|q| q.correct_answer < 4));
        assert!(!questions.is_empty());
    }

    #[test]
    fn test_quiz_garbage_yields_valid_placeholders() {
        let questions = parse_quiz_questions("no brackets at all");
        assert!(!questions.is_empty());
        for q in &questions {
            assert_eq!(q.options.len(), 4);
            assert!(q.correct_answer < 4);
            assert!(!q.question.is_empty());
        }
    }

    #[test]
    fn test_extract_json_array_spans_first_to_last_bracket() {
        assert_eq!(extract_json_array("x [1, [2]] y"), Some("[1, [2]]"));
        assert_eq!(extract_json_array("no array"), None);
        assert_eq!(extract_json_array("] backwards ["), None);
    }
}
