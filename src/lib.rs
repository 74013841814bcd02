pub mod config;
pub mod export;
pub mod flashcards;
pub mod generate;
pub mod notes;
pub mod ollama;
pub mod quiz;
pub mod store;
pub mod todos;
