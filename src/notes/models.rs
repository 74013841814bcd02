//! Data models for generated and user-authored notes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Presentation style a note was generated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NoteStyle {
    /// Concise bullet points
    Bullet,
    /// Thorough prose with headings
    Detailed,
    /// Short summary paragraphs
    Condensed,
}

impl Default for NoteStyle {
    fn default() -> Self {
        Self::Bullet
    }
}

/// Where the source text for a note came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NoteSource {
    /// Pasted or typed text
    Text,
    /// Uploaded file
    File { file_name: String },
}

impl Default for NoteSource {
    fn default() -> Self {
        Self::Text
    }
}

/// A study note
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub style: NoteStyle,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub source: NoteSource,
    /// Freshly generated and not yet kept by the user. Draft notes are
    /// persisted immediately so a reload never loses them; keeping a note
    /// clears the flag, discarding deletes the record.
    #[serde(default)]
    pub draft: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(title: String, content: String, style: NoteStyle) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            style,
            tags: Vec::new(),
            source: NoteSource::default(),
            draft: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn from_file(title: String, content: String, style: NoteStyle, file_name: String) -> Self {
        let mut note = Self::new(title, content, style);
        note.source = NoteSource::File { file_name };
        note
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_note_defaults() {
        let note = Note::new("Title".to_string(), "Body".to_string(), NoteStyle::Detailed);
        assert_eq!(note.style, NoteStyle::Detailed);
        assert_eq!(note.source, NoteSource::Text);
        assert!(!note.draft);
        assert!(note.tags.is_empty());
    }

    #[test]
    fn test_note_roundtrip_keeps_source_file() {
        let note = Note::from_file(
            "Lecture".to_string(),
            "Body".to_string(),
            NoteStyle::Bullet,
            "lecture.txt".to_string(),
        );
        let json = serde_json::to_string(&note).unwrap();
        let back: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(back.source, NoteSource::File { file_name: "lecture.txt".to_string() });
        assert_eq!(back.id, note.id);
    }

    #[test]
    fn test_draft_flag_defaults_false_on_old_records() {
        // Records persisted before the draft flag existed must load cleanly.
        let json = r#"{
            "id": "b4c36c54-9d9c-4c35-a13f-7e9a33e0a2bb",
            "title": "Old",
            "content": "Body",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert!(!note.draft);
        assert_eq!(note.style, NoteStyle::Bullet);
    }
}
