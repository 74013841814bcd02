use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn list(app: &App, format: &OutputFormat) -> Result<()> {
    let cards = app.store.load_flashcards();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No flashcards. Generate some with: cram generate flashcards <file>");
                return Ok(());
            }
            for card in &cards {
                println!("Q: {}", card.front);
                println!("A: {}", card.back);
                println!();
            }
            println!("{} cards", cards.len());
        }
    }

    Ok(())
}
