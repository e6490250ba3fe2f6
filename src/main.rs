//! ztp-tools: ZTP configuration store and CSV interchange
//!
//! Command-line front end over the stored provisioning document.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ztp_tools::{cli, config::CONFIG_FILE_NAMES};

#[derive(Parser)]
#[command(name = "ztp-tools")]
#[command(version)]
#[command(about = "ZTP configuration store with CSV import and export", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Error occurred (the message is printed to stderr)

EXAMPLES:
    # Edit the document in a spreadsheet
    ztp-tools export -O ztp.csv
    ztp-tools import ztp.csv

    # Replace the document from a generator
    generate-ztp | ztp-tools save -

    # Check a document before deploying it
    ztp-tools validate staged.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the document, the status log and served files
    #[arg(long, global = true, env = "ZTP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the stored document
    Show,

    /// Check a JSON document against the shape rules (the stored one by default)
    Validate {
        /// JSON file to check instead of the stored document
        file: Option<PathBuf>,
    },

    /// Replace the stored document with a JSON file
    Save {
        /// JSON file to store, `-` for stdin
        #[arg(default_value = "-")]
        file: PathBuf,
    },

    /// Export the stored document as `;`-delimited CSV
    Export {
        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Replace the stored document with the contents of a CSV file
    Import {
        /// CSV file with a header row
        file: PathBuf,
    },

    /// Inspect or modify the status log
    Log {
        #[command(subcommand)]
        action: LogAction,
    },

    /// Manage auxiliary files in the data directory
    Files {
        #[command(subcommand)]
        action: FilesAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `log` command
#[derive(Subcommand)]
enum LogAction {
    /// Print every logged message
    Show,
    /// Append a JSON object to the log
    Append {
        /// Message as a JSON object
        message: String,
        /// Address recorded as the reporting client
        #[arg(long, default_value = "127.0.0.1")]
        client: String,
    },
    /// Remove every logged message
    Reset,
}

/// Sub-subcommands for the `files` command
#[derive(Subcommand)]
enum FilesAction {
    /// List visible files with their sizes
    List,
    /// Remove a file, given relative to the data directory
    Rm {
        /// Relative path of the file
        path: String,
    },
    /// Copy a local file into the data directory
    Put {
        /// Local file to copy
        file: PathBuf,
        /// Folder below the data directory
        #[arg(long)]
        folder: Option<String>,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .ztp-tools.yaml in the current directory
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", cli::error_message(&err));
            ExitCode::FAILURE
        }
    }
}

/// Dispatch to command handlers
fn run(cli: Cli) -> Result<()> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::Show => {
            let config = cli::resolve_config(cli.config.as_deref(), cli.data_dir)?;
            cli::run_show(&config)
        }

        Commands::Validate { file } => {
            let config = cli::resolve_config(cli.config.as_deref(), cli.data_dir)?;
            cli::run_validate(file.as_deref(), &config, quiet).map(drop)
        }

        Commands::Save { file } => {
            let config = cli::resolve_config(cli.config.as_deref(), cli.data_dir)?;
            cli::run_save(&file, &config, quiet)
        }

        Commands::Export { output_file } => {
            let config = cli::resolve_config(cli.config.as_deref(), cli.data_dir)?;
            cli::run_export(output_file, &config, quiet)
        }

        Commands::Import { file } => {
            let config = cli::resolve_config(cli.config.as_deref(), cli.data_dir)?;
            cli::run_import(&file, &config, quiet).map(drop)
        }

        Commands::Log { action } => {
            let config = cli::resolve_config(cli.config.as_deref(), cli.data_dir)?;
            match action {
                LogAction::Show => cli::run_log_show(&config),
                LogAction::Append { message, client } => {
                    cli::run_log_append(&message, &client, &config, quiet)
                }
                LogAction::Reset => cli::run_log_reset(&config, quiet),
            }
        }

        Commands::Files { action } => {
            let config = cli::resolve_config(cli.config.as_deref(), cli.data_dir)?;
            match action {
                FilesAction::List => cli::run_files_list(&config),
                FilesAction::Rm { path } => cli::run_files_rm(&path, &config, quiet),
                FilesAction::Put { file, folder } => {
                    cli::run_files_put(&file, folder.as_deref(), &config, quiet)
                }
            }
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "ztp-tools", &mut io::stdout());
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema = ztp_tools::config::generate_json_schema()
                .context("failed to render schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) =
                    ztp_tools::config::load_config(cli.config.as_deref())
                        .context("failed to load config")?;
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml =
                    serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                eprintln!("Config file search paths (in order):");
                for path in ztp_tools::config::config_search_dirs() {
                    eprintln!("  {}", path.display());
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match ztp_tools::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".ztp-tools.yaml");
                if target.exists() {
                    bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, ztp_tools::config::generate_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}
