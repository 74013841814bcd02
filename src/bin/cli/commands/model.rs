use anyhow::Result;

use crate::app::App;

pub fn show(app: &App) {
    println!("{}", app.config.selected_model);
}

pub fn set(app: &App, name: String) -> Result<()> {
    app.set_model(name.clone())?;
    println!("Selected model: {}", name);
    Ok(())
}
