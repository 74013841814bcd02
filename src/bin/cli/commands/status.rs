use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub async fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let client = app.generator.client();
    let available = client.check_availability().await;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "url": client.base_url(),
                "model": client.model(),
                "available": available,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if available {
                println!("Ollama reachable at {} (model: {})", client.base_url(), client.model());
            } else {
                println!(
                    "Ollama NOT reachable at {}. Start it with: ollama serve",
                    client.base_url()
                );
            }
        }
    }

    Ok(())
}
