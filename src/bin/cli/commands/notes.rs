use anyhow::{Context, Result};
use chrono::Utc;

use crate::app::App;
use crate::OutputFormat;

pub fn list(app: &App, drafts_only: bool, format: &OutputFormat) -> Result<()> {
    let notes = app.store.load_notes();
    let notes: Vec<_> = notes.into_iter().filter(|n| !drafts_only || n.draft).collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&notes)?);
        }
        OutputFormat::Plain => {
            if notes.is_empty() {
                println!("No notes. Generate some with: cram generate notes <file>");
                return Ok(());
            }
            for note in &notes {
                let marker = if note.draft { " [draft]" } else { "" };
                let tags = if note.tags.is_empty() {
                    String::new()
                } else {
                    format!("  #{}", note.tags.join(" #"))
                };
                println!(
                    "{}  {}{}{}  ({})",
                    note.id,
                    note.title,
                    marker,
                    tags,
                    note.updated_at.format("%Y-%m-%d")
                );
            }
        }
    }

    Ok(())
}

pub fn show(app: &App, id_prefix: &str) -> Result<()> {
    let note = app.find_note(id_prefix)?;
    println!("{}", note.title);
    println!();
    println!("{}", note.content);
    Ok(())
}

/// Clear the draft flag, keeping a freshly generated note
pub fn keep(app: &App, id_prefix: &str) -> Result<()> {
    let note = app.find_note(id_prefix)?;
    let mut notes = app.store.load_notes();

    for n in notes.iter_mut().filter(|n| n.id == note.id) {
        n.draft = false;
        n.updated_at = Utc::now();
    }
    app.store.save_notes(&notes).context("Failed to save notes")?;

    println!("Kept note \"{}\"", note.title);
    Ok(())
}

pub fn rm(app: &App, id_prefix: &str) -> Result<()> {
    let note = app.find_note(id_prefix)?;
    let mut notes = app.store.load_notes();
    notes.retain(|n| n.id != note.id);
    app.store.save_notes(&notes).context("Failed to save notes")?;

    println!("Deleted note \"{}\"", note.title);
    Ok(())
}
