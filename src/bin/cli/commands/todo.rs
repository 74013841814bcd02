use anyhow::{Context, Result};

use cram_lib::todos::TodoItem;

use crate::app::App;
use crate::OutputFormat;

pub fn add(app: &App, text: String) -> Result<()> {
    let item = TodoItem::new(text);

    let mut todos = app.store.load_todos();
    todos.push(item.clone());
    app.store.save_todos(&todos).context("Failed to save to-dos")?;

    println!("Added: {}", item.text);
    Ok(())
}

pub fn list(app: &App, format: &OutputFormat) -> Result<()> {
    let todos = app.store.load_todos();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&todos)?);
        }
        OutputFormat::Plain => {
            if todos.is_empty() {
                println!("Nothing to do.");
                return Ok(());
            }
            for item in &todos {
                let check = if item.completed { "x" } else { " " };
                println!("[{}] {}  {}", check, item.id, item.text);
            }
        }
    }

    Ok(())
}

pub fn done(app: &App, id_prefix: &str) -> Result<()> {
    let item = app.find_todo(id_prefix)?;
    let mut todos = app.store.load_todos();

    for t in todos.iter_mut().filter(|t| t.id == item.id) {
        t.completed = true;
    }
    app.store.save_todos(&todos).context("Failed to save to-dos")?;

    println!("Done: {}", item.text);
    Ok(())
}

pub fn rm(app: &App, id_prefix: &str) -> Result<()> {
    let item = app.find_todo(id_prefix)?;
    let mut todos = app.store.load_todos();
    todos.retain(|t| t.id != item.id);
    app.store.save_todos(&todos).context("Failed to save to-dos")?;

    println!("Deleted: {}", item.text);
    Ok(())
}
