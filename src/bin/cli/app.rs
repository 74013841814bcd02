use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use cram_lib::config::{AppConfig, ConfigStorage};
use cram_lib::generate::Generator;
use cram_lib::notes::Note;
use cram_lib::ollama::OllamaClient;
use cram_lib::store::StudyStore;
use cram_lib::todos::TodoItem;

/// Shared application state for CLI commands
pub struct App {
    pub store: StudyStore,
    pub config_storage: ConfigStorage,
    pub config: AppConfig,
    pub generator: Generator,
}

impl App {
    /// Initialize store, config and generator. `url` and `model` override
    /// the persisted config for this invocation only.
    pub fn new(data_dir: Option<PathBuf>, url: Option<&str>, model: Option<&str>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => StudyStore::default_data_dir().context("Failed to get data directory")?,
        };

        let store = StudyStore::new(data_dir.clone());
        store.init().context("Failed to initialize study store")?;

        let config_storage = ConfigStorage::new(data_dir);
        let config = config_storage.load();

        let client = OllamaClient::new()
            .with_url(url.unwrap_or(&config.base_url))
            .with_model(model.unwrap_or(&config.selected_model));

        Ok(Self {
            store,
            config_storage,
            config,
            generator: Generator::new(client),
        })
    }

    /// Find a note by id prefix (case-insensitive)
    pub fn find_note(&self, id_prefix: &str) -> Result<Note> {
        let prefix = id_prefix.to_lowercase();
        let notes = self.store.load_notes();

        let matches: Vec<&Note> = notes
            .iter()
            .filter(|n| n.id.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            0 => bail!("No note matching '{}'. Run `cram notes list` to see ids.", id_prefix),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous note id '{}'. Matches:\n{}",
                id_prefix,
                matches
                    .iter()
                    .map(|n| format!("  - {}  {}", n.id, n.title))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }

    /// Find a to-do item by id prefix (case-insensitive)
    pub fn find_todo(&self, id_prefix: &str) -> Result<TodoItem> {
        let prefix = id_prefix.to_lowercase();
        let todos = self.store.load_todos();

        let matches: Vec<&TodoItem> = todos
            .iter()
            .filter(|t| t.id.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            0 => bail!("No to-do matching '{}'. Run `cram todo list` to see ids.", id_prefix),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous to-do id '{}'. Matches:\n{}",
                id_prefix,
                matches
                    .iter()
                    .map(|t| format!("  - {}  {}", t.id, t.text))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }

    /// Persist a new model selection
    pub fn set_model(&self, name: String) -> Result<()> {
        let mut config = self.config.clone();
        config.selected_model = name;
        self.config_storage
            .save(&config)
            .context("Failed to save config")?;
        Ok(())
    }
}
