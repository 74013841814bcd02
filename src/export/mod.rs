//! Note export to downloadable files
//!
//! The core supplies text and a format token; only the plain-text formats
//! carry logic here. Binary document formats need an external converter.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::notes::Note;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} export requires an external converter")]
    Unsupported(&'static str),
}

/// Target file format token
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Txt,
    Md,
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Md => "md",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}

/// File name used when the caller does not pick one: the title slugged to
/// lowercase alphanumerics, or the note id when the title has none.
pub fn default_file_name(note: &Note, format: ExportFormat) -> String {
    let slug: String = note
        .title
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        format!("{}.{}", note.id, format.extension())
    } else {
        format!("{}.{}", slug, format.extension())
    }
}

/// Write a note to `path` in the requested format.
pub fn export_note(note: &Note, format: ExportFormat, path: &Path) -> Result<(), ExportError> {
    let body = match format {
        ExportFormat::Txt => format!("{}\n\n{}\n", note.title, note.content),
        ExportFormat::Md => format!("# {}\n\n{}\n", note.title, note.content),
        ExportFormat::Pdf => return Err(ExportError::Unsupported("PDF")),
        ExportFormat::Docx => return Err(ExportError::Unsupported("DOCX")),
    };

    fs::write(path, body)?;
    Ok(())
}
