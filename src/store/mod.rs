//! Durable JSON persistence for study collections
//!
//! One file per collection under the data directory:
//! ```text
//! ~/.local/share/cram/
//! ├── notes.json
//! ├── flashcards.json
//! ├── quiz_questions.json
//! ├── quiz_results.json
//! └── todos.json
//! ```
//!
//! Each collection is an insertion-ordered JSON array, written whole on
//! every save. Last write wins; there are no cross-collection transactions
//! and no file locking, so concurrent processes writing the same collection
//! can race. A malformed file is logged and treated as empty so the rest of
//! the user's data stays usable.

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::flashcards::Flashcard;
use crate::notes::Note;
use crate::quiz::{QuizQuestion, QuizResult, OPTION_COUNT};
use crate::todos::TodoItem;

/// Fixed collection names, one per entity type.
pub const NOTES: &str = "notes";
pub const FLASHCARDS: &str = "flashcards";
pub const QUIZ_QUESTIONS: &str = "quiz_questions";
pub const QUIZ_RESULTS: &str = "quiz_results";
pub const TODOS: &str = "todos";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine data directory")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence layer for all study collections
pub struct StudyStore {
    base_path: PathBuf,
}

impl StudyStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Default data directory (e.g. ~/.local/share/cram)
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("cram"))
            .ok_or(StoreError::DataDirNotFound)
    }

    /// Open the store at the default data directory, creating it if needed.
    pub fn open_default() -> Result<Self> {
        let store = Self::new(Self::default_data_dir()?);
        store.init()?;
        Ok(store)
    }

    /// Ensure the data directory exists
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", collection))
    }

    /// Load a collection. Absent or malformed files yield an empty vec;
    /// malformed content is logged and discarded, never surfaced.
    pub fn load<T: DeserializeOwned>(&self, collection: &str) -> Vec<T> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Vec::new();
        }

        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Failed to read collection {:?}: {}", path, e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Discarding malformed collection {:?}: {}", path, e);
                Vec::new()
            }
        }
    }

    /// Save a collection, replacing its previous contents.
    pub fn save<T: Serialize>(&self, collection: &str, records: &[T]) -> Result<()> {
        self.init()?;
        let path = self.collection_path(collection);
        fs::write(&path, serde_json::to_string_pretty(records)?)?;
        Ok(())
    }

    // ==================== Typed collections ====================

    pub fn load_notes(&self) -> Vec<Note> {
        self.load(NOTES)
    }

    pub fn save_notes(&self, notes: &[Note]) -> Result<()> {
        self.save(NOTES, notes)
    }

    pub fn load_flashcards(&self) -> Vec<Flashcard> {
        self.load(FLASHCARDS)
    }

    pub fn save_flashcards(&self, cards: &[Flashcard]) -> Result<()> {
        self.save(FLASHCARDS, cards)
    }

    /// Load quiz questions, dropping records whose shape is unusable
    /// (wrong option count, answer index out of range). Hand-edited or
    /// corrupted records must not be able to crash a quiz run.
    pub fn load_quiz_questions(&self) -> Vec<QuizQuestion> {
        let questions: Vec<QuizQuestion> = self.load(QUIZ_QUESTIONS);
        questions
            .into_iter()
            .filter(|q| {
                let valid =
                    q.options.len() == OPTION_COUNT && q.correct_answer < OPTION_COUNT;
                if !valid {
                    log::warn!(
                        "Dropping quiz question {} with {} options and answer index {}",
                        q.id,
                        q.options.len(),
                        q.correct_answer
                    );
                }
                valid
            })
            .collect()
    }

    pub fn save_quiz_questions(&self, questions: &[QuizQuestion]) -> Result<()> {
        self.save(QUIZ_QUESTIONS, questions)
    }

    pub fn load_quiz_results(&self) -> Vec<QuizResult> {
        self.load(QUIZ_RESULTS)
    }

    pub fn save_quiz_results(&self, results: &[QuizResult]) -> Result<()> {
        self.save(QUIZ_RESULTS, results)
    }

    pub fn load_todos(&self) -> Vec<TodoItem> {
        self.load(TODOS)
    }

    pub fn save_todos(&self, todos: &[TodoItem]) -> Result<()> {
        self.save(TODOS, todos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::Difficulty;
    use crate::notes::NoteStyle;
    use tempfile::TempDir;

    fn create_test_store() -> (StudyStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = StudyStore::new(temp_dir.path().to_path_buf());
        store.init().unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_load_absent_collection_is_empty() {
        let (store, _temp) = create_test_store();
        assert!(store.load_notes().is_empty());
        assert!(store.load_todos().is_empty());
    }

    #[test]
    fn test_save_and_load_preserves_order() {
        let (store, _temp) = create_test_store();

        let cards: Vec<Flashcard> = (0..4)
            .map(|i| Flashcard::new(format!("Q{}", i), format!("A{}", i), Difficulty::Easy))
            .collect();
        store.save_flashcards(&cards).unwrap();

        let loaded = store.load_flashcards();
        assert_eq!(loaded.len(), 4);
        for (saved, loaded) in cards.iter().zip(&loaded) {
            assert_eq!(saved.id, loaded.id);
            assert_eq!(saved.front, loaded.front);
        }
    }

    #[test]
    fn test_repeated_loads_are_identical() {
        let (store, _temp) = create_test_store();

        let notes = vec![Note::new("T".to_string(), "B".to_string(), NoteStyle::Bullet)];
        store.save_notes(&notes).unwrap();

        let first = store.load_notes();
        let second = store.load_notes();
        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].id, second[0].id);
        assert_eq!(first[0].updated_at, second[0].updated_at);
    }

    #[test]
    fn test_malformed_collection_loads_as_empty() {
        let (store, temp) = create_test_store();

        fs::write(temp.path().join("notes.json"), "{not json at all").unwrap();
        assert!(store.load_notes().is_empty());

        // Other collections stay usable.
        let todos = vec![TodoItem::new("buy flashcards".to_string())];
        store.save_todos(&todos).unwrap();
        assert_eq!(store.load_todos().len(), 1);
    }

    #[test]
    fn test_load_quiz_questions_drops_shape_invalid_records() {
        let (store, temp) = create_test_store();

        // Hand-tampered collection: an out-of-range answer index, a record
        // with too few options, and one valid record.
        let content = r#"[
            {
                "id": "7f1f9a52-7a2e-4a57-9f57-0a8a5fb1a001",
                "question": "Broken index?",
                "options": ["a", "b", "c", "d"],
                "correctAnswer": 9,
                "explanation": "",
                "createdAt": "2024-01-01T00:00:00Z"
            },
            {
                "id": "7f1f9a52-7a2e-4a57-9f57-0a8a5fb1a002",
                "question": "Too few options?",
                "options": ["a", "b", "c"],
                "correctAnswer": 0,
                "explanation": "",
                "createdAt": "2024-01-01T00:00:00Z"
            },
            {
                "id": "7f1f9a52-7a2e-4a57-9f57-0a8a5fb1a003",
                "question": "Fine?",
                "options": ["a", "b", "c", "d"],
                "correctAnswer": 2,
                "explanation": "ok",
                "createdAt": "2024-01-01T00:00:00Z"
            }
        ]"#;
        fs::write(temp.path().join("quiz_questions.json"), content).unwrap();

        let questions = store.load_quiz_questions();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Fine?");
        // Everything that survives the load is safe to index into.
        for q in &questions {
            assert!(q.correct_answer < q.options.len());
            let _ = &q.options[q.correct_answer];
        }
    }

    #[test]
    fn test_save_replaces_previous_contents() {
        let (store, _temp) = create_test_store();

        let todos = vec![
            TodoItem::new("one".to_string()),
            TodoItem::new("two".to_string()),
        ];
        store.save_todos(&todos).unwrap();
        store.save_todos(&todos[..1]).unwrap();

        let loaded = store.load_todos();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].text, "one");
    }
}
