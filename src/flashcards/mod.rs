mod models;

pub use models::{Difficulty, Flashcard};
