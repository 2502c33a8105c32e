//! CLI entry point for todosync.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod commands;
mod config;
mod format;
mod tui;

/// Local to-do list with search and history.
#[derive(Parser, Debug)]
#[command(
    name = "todosync",
    version,
    about = "todosync: create, complete, search and delete tasks stored on this machine"
)]
struct Cli {
    /// Directory holding the task snapshot (defaults to the platform data dir).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Configuration file (defaults to the platform config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new task.
    Add {
        /// Task title.
        title: String,
    },

    /// Mark a task as completed.
    Done {
        /// Task id or a unique prefix of it.
        task: String,
    },

    /// Delete a task (it stays in the history).
    Rm {
        /// Task id or a unique prefix of it.
        task: String,
    },

    /// List tasks.
    Ls {
        /// Only show active tasks whose title contains this text.
        #[arg(short = 's', long)]
        search: Option<String>,
        /// List completed tasks instead of active ones.
        #[arg(long, conflicts_with = "deleted")]
        completed: bool,
        /// List deleted tasks instead of active ones.
        #[arg(long)]
        deleted: bool,
        #[arg(long, value_enum, default_value_t = LsFormat::Table)]
        format: LsFormat,
    },

    /// Show a single task as JSON.
    Show {
        /// Task id or a unique prefix of it.
        task: String,
    },

    /// Print task counters.
    Stats,

    /// Launch interactive terminal UI.
    Tui,

    /// Write a configuration file with the default settings.
    InitConfig {
        /// Destination (defaults to the platform config path).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LsFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let Cli {
        data_dir,
        config,
        cmd,
    } = Cli::parse();

    if should_install_tracing(&cmd) {
        install_tracing();
    }

    execute_command(data_dir, config, cmd)
}

fn execute_command(data_dir: Option<PathBuf>, config_path: Option<PathBuf>, command: Command) -> Result<()> {
    if let Command::InitConfig { output, force } = &command {
        let path = config::init_config(output.as_deref(), *force)?;
        println!("wrote configuration: {}", path.display());
        return Ok(());
    }

    let app_config = config::load_config(config_path.as_deref())?;
    let runtime = tokio::runtime::Runtime::new()?;
    let service = config::open_service(data_dir, &app_config)?;

    match command {
        Command::Tui => tui::run(service, &runtime, &app_config.ui),
        other => commands::run(other, &service, &runtime),
    }
}

const fn should_install_tracing(cmd: &Command) -> bool {
    !matches!(cmd, Command::Tui)
}

fn install_tracing() {
    // RUST_LOG overrides the default INFO level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add_command() {
        let cli = Cli::parse_from(["todosync", "--data-dir", "/tmp/todo", "add", "Buy milk"]);

        assert_eq!(cli.data_dir.as_deref(), Some(std::path::Path::new("/tmp/todo")));
        match cli.cmd {
            Command::Add { title } => assert_eq!(title, "Buy milk"),
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn parse_ls_command_with_filters() {
        let cli = Cli::parse_from(["todosync", "ls", "--search", "milk", "--format", "json"]);

        match cli.cmd {
            Command::Ls {
                search,
                completed,
                deleted,
                format,
            } => {
                assert_eq!(search.as_deref(), Some("milk"));
                assert!(!completed);
                assert!(!deleted);
                assert_eq!(format, LsFormat::Json);
            }
            _ => panic!("expected ls command"),
        }
    }

    #[test]
    fn ls_history_flags_are_exclusive() {
        let result = Cli::try_parse_from(["todosync", "ls", "--completed", "--deleted"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::parse_from(["todosync", "done", "018e0f6a", "--config", "/tmp/c.toml"]);

        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/c.toml")));
        match cli.cmd {
            Command::Done { task } => assert_eq!(task, "018e0f6a"),
            _ => panic!("expected done command"),
        }
    }

    #[test]
    fn parse_tui_command() {
        let cli = Cli::parse_from(["todosync", "tui"]);
        match cli.cmd {
            Command::Tui => {}
            _ => panic!("expected tui command"),
        }
    }

    #[test]
    fn skips_tracing_in_tui_mode() {
        assert!(!should_install_tracing(&Command::Tui));
    }

    #[test]
    fn installs_tracing_for_other_commands() {
        assert!(should_install_tracing(&Command::Stats));
    }
}
