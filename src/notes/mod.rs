mod models;

pub use models::{Note, NoteSource, NoteStyle};
