use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub async fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let client = app.generator.client();
    let models = client.list_models().await;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&models)?);
        }
        OutputFormat::Plain => {
            for name in &models {
                if name == client.model() {
                    println!("* {}", name);
                } else {
                    println!("  {}", name);
                }
            }
        }
    }

    Ok(())
}
