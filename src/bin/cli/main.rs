mod app;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cram_lib::export::ExportFormat;
use cram_lib::flashcards::Difficulty;
use cram_lib::notes::NoteStyle;

#[derive(Parser)]
#[command(name = "cram", about = "Local-AI study aid: notes, flashcards, quizzes", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override the inference server URL for this invocation
    #[arg(long, global = true)]
    url: Option<String>,

    /// Override the model for this invocation (not persisted)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether the inference server is reachable
    Status,

    /// List models installed on the inference server
    Models,

    /// Generate study material from text
    #[command(subcommand)]
    Generate(GenerateCommand),

    /// Manage saved notes
    #[command(subcommand)]
    Notes(NotesCommand),

    /// List saved flashcards
    Cards,

    /// Take quizzes and review results
    #[command(subcommand)]
    Quiz(QuizCommand),

    /// Manage the to-do list
    #[command(subcommand)]
    Todo(TodoCommand),

    /// Export a note to a file
    Export {
        /// Note id (prefix match)
        note: String,
        /// Target format
        #[arg(long, value_enum, default_value = "md")]
        format: ExportFormat,
        /// Output path (defaults to the note title plus extension)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show or persist the selected model
    #[command(subcommand)]
    Model(ModelCommand),
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate notes from a file or stdin
    Notes {
        /// Input file (use "-" for stdin)
        input: String,
        /// Note style
        #[arg(long, value_enum, default_value = "bullet")]
        style: NoteStyle,
        /// Title for the saved note (defaults to the file name)
        #[arg(long)]
        title: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// Save as a kept note instead of a draft
        #[arg(long)]
        keep: bool,
    },
    /// Generate flashcards from a file or stdin
    Flashcards {
        /// Input file (use "-" for stdin)
        input: String,
        /// Difficulty
        #[arg(long, value_enum, default_value = "medium")]
        difficulty: Difficulty,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Generate quiz questions from a file or stdin
    Quiz {
        /// Input file (use "-" for stdin)
        input: String,
        /// Difficulty
        #[arg(long, value_enum, default_value = "medium")]
        difficulty: Difficulty,
    },
}

#[derive(Subcommand)]
enum NotesCommand {
    /// List saved notes
    List {
        /// Show only drafts awaiting review
        #[arg(long)]
        drafts: bool,
    },
    /// Print a note's content
    Show {
        /// Note id (prefix match)
        note: String,
    },
    /// Keep a draft note (clear its draft flag)
    Keep {
        /// Note id (prefix match)
        note: String,
    },
    /// Delete a note
    Rm {
        /// Note id (prefix match)
        note: String,
    },
}

#[derive(Subcommand)]
enum QuizCommand {
    /// Take a quiz over the saved questions, answering on stdin
    Take {
        /// Limit the number of questions asked
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List past quiz results
    Results,
    /// List the saved questions (answers hidden unless --answers)
    Questions {
        #[arg(long)]
        answers: bool,
    },
}

#[derive(Subcommand)]
enum TodoCommand {
    /// Add a to-do item
    Add { text: String },
    /// List to-do items
    List,
    /// Mark an item completed
    Done {
        /// Item id (prefix match)
        item: String,
    },
    /// Delete an item
    Rm {
        /// Item id (prefix match)
        item: String,
    },
}

#[derive(Subcommand)]
enum ModelCommand {
    /// Print the persisted model selection
    Show,
    /// Persist a model selection for future runs
    Set { name: String },
}

/// Read generation input from a file path, or stdin for "-"
fn read_input(input: &str) -> anyhow::Result<(String, Option<String>)> {
    if input == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
        Ok((buf, None))
    } else {
        let content = std::fs::read_to_string(input)?;
        let file_name = std::path::Path::new(input)
            .file_name()
            .map(|n| n.to_string_lossy().to_string());
        Ok((content, file_name))
    }
}

fn parse_tags(tags: Option<String>) -> Vec<String> {
    tags.map(|t| {
        t.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let app = app::App::new(cli.data_dir, cli.url.as_deref(), cli.model.as_deref())?;

    match cli.command {
        Command::Status => {
            commands::status::run(&app, &cli.format).await?;
        }
        Command::Models => {
            commands::models::run(&app, &cli.format).await?;
        }
        Command::Generate(cmd) => match cmd {
            GenerateCommand::Notes { input, style, title, tags, keep } => {
                let (content, file_name) = read_input(&input)?;
                commands::generate::notes(
                    &app,
                    &content,
                    style,
                    title,
                    parse_tags(tags),
                    file_name,
                    keep,
                    &cli.format,
                )
                .await?;
            }
            GenerateCommand::Flashcards { input, difficulty, tags } => {
                let (content, _) = read_input(&input)?;
                commands::generate::flashcards(&app, &content, difficulty, parse_tags(tags), &cli.format)
                    .await?;
            }
            GenerateCommand::Quiz { input, difficulty } => {
                let (content, _) = read_input(&input)?;
                commands::generate::quiz(&app, &content, difficulty, &cli.format).await?;
            }
        },
        Command::Notes(cmd) => match cmd {
            NotesCommand::List { drafts } => commands::notes::list(&app, drafts, &cli.format)?,
            NotesCommand::Show { note } => commands::notes::show(&app, &note)?,
            NotesCommand::Keep { note } => commands::notes::keep(&app, &note)?,
            NotesCommand::Rm { note } => commands::notes::rm(&app, &note)?,
        },
        Command::Cards => {
            commands::cards::list(&app, &cli.format)?;
        }
        Command::Quiz(cmd) => match cmd {
            QuizCommand::Take { limit } => commands::quiz::take(&app, limit)?,
            QuizCommand::Results => commands::quiz::results(&app, &cli.format)?,
            QuizCommand::Questions { answers } => commands::quiz::questions(&app, answers)?,
        },
        Command::Todo(cmd) => match cmd {
            TodoCommand::Add { text } => commands::todo::add(&app, text)?,
            TodoCommand::List => commands::todo::list(&app, &cli.format)?,
            TodoCommand::Done { item } => commands::todo::done(&app, &item)?,
            TodoCommand::Rm { item } => commands::todo::rm(&app, &item)?,
        },
        Command::Export { note, format, out } => {
            commands::export::run(&app, &note, format, out)?;
        }
        Command::Model(cmd) => match cmd {
            ModelCommand::Show => commands::model::show(&app),
            ModelCommand::Set { name } => commands::model::set(&app, name)?,
        },
    }

    Ok(())
}
