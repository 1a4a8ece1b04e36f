use std::path::PathBuf;

use clap::{Parser, Subcommand};

use flick_cli::commands::{replay_ops, settings_ops, user_dict_ops};

#[derive(Parser)]
#[command(name = "flicktool", about = "Flick keyboard engine tools")]
struct Cli {
    /// Write a JSON-lines trace to this directory (needs the `trace` feature)
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a gesture script against an in-memory document
    Replay {
        /// Path to the gesture script
        script: PathBuf,
        /// Output one JSON object per step instead of a table
        #[arg(long)]
        json: bool,
        /// Settings TOML to use instead of the defaults
        #[arg(long)]
        settings: Option<PathBuf>,
        /// User dictionary to start from
        #[arg(long)]
        user_dict: Option<PathBuf>,
    },
    /// Manage the user dictionary
    UserDict {
        #[command(subcommand)]
        action: UserDictAction,
    },
    /// Inspect keyboard settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum UserDictAction {
    /// Teach a word
    Add {
        word: String,
        /// User dictionary file
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Forget a word
    Remove {
        word: String,
        /// User dictionary file
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// List learned words
    List {
        /// User dictionary file
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the default settings TOML
    Default,
    /// Parse and validate a settings file
    Check { file: PathBuf },
}

fn main() {
    let cli = Cli::parse();
    if let Some(dir) = &cli.trace_dir {
        flick_engine::init_tracing(dir);
    }

    match cli.command {
        Command::Replay {
            script,
            json,
            settings,
            user_dict,
        } => replay_ops::replay(&script, json, settings.as_deref(), user_dict.as_deref()),
        Command::UserDict { action } => match action {
            UserDictAction::Add { word, path } => {
                let path = path.unwrap_or_else(user_dict_ops::default_user_dict_path);
                user_dict_ops::user_dict_add(&path, &word);
            }
            UserDictAction::Remove { word, path } => {
                let path = path.unwrap_or_else(user_dict_ops::default_user_dict_path);
                user_dict_ops::user_dict_remove(&path, &word);
            }
            UserDictAction::List { path } => {
                let path = path.unwrap_or_else(user_dict_ops::default_user_dict_path);
                user_dict_ops::user_dict_list(&path);
            }
        },
        Command::Settings { action } => match action {
            SettingsAction::Default => settings_ops::settings_export(),
            SettingsAction::Check { file } => settings_ops::settings_validate(&file),
        },
    }
}
