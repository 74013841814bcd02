use anyhow::{Context, Result};

use cram_lib::flashcards::Difficulty;
use cram_lib::notes::{Note, NoteStyle};

use crate::app::App;
use crate::OutputFormat;

/// Generate notes and persist them (as a draft unless `keep`)
#[allow(clippy::too_many_arguments)]
pub async fn notes(
    app: &App,
    content: &str,
    style: NoteStyle,
    title: Option<String>,
    tags: Vec<String>,
    file_name: Option<String>,
    keep: bool,
    format: &OutputFormat,
) -> Result<()> {
    let generated = app
        .generator
        .make_notes(content, style)
        .await
        .context("Note generation failed")?;

    let title = title
        .or_else(|| file_name.clone())
        .unwrap_or_else(|| chrono::Local::now().format("Notes %Y-%m-%d %H:%M").to_string());

    let mut note = match file_name {
        Some(name) => Note::from_file(title, generated, style, name),
        None => Note::new(title, generated, style),
    };
    note.tags = tags;
    note.draft = !keep;

    let mut all = app.store.load_notes();
    all.push(note.clone());
    app.store.save_notes(&all).context("Failed to save note")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&note)?);
        }
        OutputFormat::Plain => {
            println!("{}", note.content);
            eprintln!();
            if note.draft {
                eprintln!(
                    "Saved draft note {} (\"{}\"). Keep it with: cram notes keep {}",
                    note.id, note.title, note.id
                );
            } else {
                eprintln!("Saved note {} (\"{}\")", note.id, note.title);
            }
        }
    }

    Ok(())
}

/// Generate a flashcard batch and append it to the collection
pub async fn flashcards(
    app: &App,
    content: &str,
    difficulty: Difficulty,
    tags: Vec<String>,
    format: &OutputFormat,
) -> Result<()> {
    let mut cards = app
        .generator
        .make_flashcards(content, difficulty)
        .await
        .context("Flashcard generation failed")?;

    for card in &mut cards {
        card.tags = tags.clone();
    }

    let mut all = app.store.load_flashcards();
    all.extend(cards.iter().cloned());
    app.store
        .save_flashcards(&all)
        .context("Failed to save flashcards")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
        OutputFormat::Plain => {
            for card in &cards {
                println!("Q: {}", card.front);
                println!("A: {}", card.back);
                println!();
            }
            eprintln!("Saved {} flashcards ({} total)", cards.len(), all.len());
        }
    }

    Ok(())
}

/// Generate a quiz question batch and append it to the collection
pub async fn quiz(
    app: &App,
    content: &str,
    difficulty: Difficulty,
    format: &OutputFormat,
) -> Result<()> {
    let questions = app
        .generator
        .make_quiz_questions(content, difficulty)
        .await
        .context("Quiz generation failed")?;

    let mut all = app.store.load_quiz_questions();
    all.extend(questions.iter().cloned());
    app.store
        .save_quiz_questions(&all)
        .context("Failed to save quiz questions")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&questions)?);
        }
        OutputFormat::Plain => {
            for q in &questions {
                println!("{}", q.question);
                for (i, option) in q.options.iter().enumerate() {
                    println!("  {}. {}", i + 1, option);
                }
                println!();
            }
            eprintln!(
                "Saved {} questions ({} total). Take the quiz with: cram quiz take",
                questions.len(),
                all.len()
            );
        }
    }

    Ok(())
}
