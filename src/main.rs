//! chroma-swipe CLI
//!
//! Swipe toward the name that matches the swatch.

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use chroma_swipe::catalog::Catalog;
use chroma_swipe::commentary::{CommandCommentator, Commentator, LocalCommentator};
use chroma_swipe::game::Game;
use chroma_swipe::report::{format_catalog, format_summary};
use chroma_swipe::tui;
use chroma_swipe::types::{GameConfig, OutputFormat};

#[derive(Parser)]
#[command(name = "chroma-swipe")]
#[command(about = "A terminal color-matching game: swipe toward the shade's name")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a session in the terminal, then print its summary
    Play {
        /// Seed for a reproducible challenge sequence
        #[arg(long)]
        seed: Option<u64>,

        /// Never ask for commentary
        #[arg(long)]
        no_commentary: bool,

        /// External program that writes the commentary line
        #[arg(long, value_name = "PROG")]
        commentary_cmd: Option<String>,

        /// Argument passed to the commentary program (repeatable)
        #[arg(long = "commentary-arg", value_name = "ARG", allow_hyphen_values = true)]
        commentary_args: Vec<String>,

        /// How long to wait for a comment before falling back
        #[arg(long, value_name = "MS", default_value_t = 4000)]
        commentary_timeout_ms: u64,

        /// Ask for commentary every N matches (0 disables)
        #[arg(long, value_name = "N", default_value_t = 5)]
        commentary_every: u32,

        /// Summary format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// Write log records to this file
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// List every color in the catalog
    Catalog {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Commentary settings gathered from the command line.
struct CommentaryArgs {
    disabled: bool,
    command: Option<String>,
    args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            seed,
            no_commentary,
            commentary_cmd,
            commentary_args,
            commentary_timeout_ms,
            commentary_every,
            format,
            log_file,
        } => {
            let config = GameConfig {
                commentary_every,
                commentary_timeout: Duration::from_millis(commentary_timeout_ms),
                ..Default::default()
            };
            let commentary = CommentaryArgs {
                disabled: no_commentary,
                command: commentary_cmd,
                args: commentary_args,
            };
            cmd_play(seed, config, commentary, format.into(), log_file)
        }
        Commands::Catalog { format } => cmd_catalog(format.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// LOGGING
// ============================================================================

/// Route log records to `path`. `RUST_LOG` overrides the default level.
///
/// Without a log file nothing is initialized: the TUI owns the terminal.
fn init_logging(path: Option<&PathBuf>) -> Result<(), String> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .map_err(|e| format!("cannot open log file {}: {}", path.display(), e))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_play(
    seed: Option<u64>,
    config: GameConfig,
    commentary: CommentaryArgs,
    format: OutputFormat,
    log_file: Option<PathBuf>,
) -> Result<(), String> {
    init_logging(log_file.as_ref())?;

    let rng = match seed {
        Some(seed) => {
            info!("seeded session: {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let provider: Option<Arc<dyn Commentator>> = if commentary.disabled || config.commentary_every == 0 {
        None
    } else if let Some(program) = commentary.command {
        info!("commentary from `{}`", program);
        Some(Arc::new(
            CommandCommentator::new(program, commentary.args)
                .with_deadline(config.commentary_timeout),
        ))
    } else {
        Some(Arc::new(LocalCommentator))
    };

    let game = Game::new(Arc::new(Catalog::standard()), config, rng);
    if game.current_challenge().is_none() {
        return Err("no challenge could be generated from the catalog".to_string());
    }

    let summary = tui::run(game, provider).map_err(|e| format!("terminal error: {}", e))?;

    emit(&format_summary(&summary, format));
    Ok(())
}

fn cmd_catalog(format: OutputFormat) -> Result<(), String> {
    let catalog = Catalog::standard();
    emit(&format_catalog(&catalog, format));
    Ok(())
}

/// Print a report, ending it with exactly one newline.
fn emit(text: &str) {
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
}
