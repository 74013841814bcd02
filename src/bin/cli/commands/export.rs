use std::path::PathBuf;

use anyhow::{Context, Result};

use cram_lib::export::{default_file_name, export_note, ExportFormat};

use crate::app::App;

pub fn run(app: &App, id_prefix: &str, format: ExportFormat, out: Option<PathBuf>) -> Result<()> {
    let note = app.find_note(id_prefix)?;

    let path = out.unwrap_or_else(|| PathBuf::from(default_file_name(&note, format)));

    export_note(&note, format, &path)
        .with_context(|| format!("Failed to export note to {:?}", path))?;

    println!("Exported \"{}\" to {}", note.title, path.display());
    Ok(())
}
