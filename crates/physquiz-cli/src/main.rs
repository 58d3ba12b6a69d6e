//! physquiz CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "physquiz",
    version,
    about = "Timed physics quiz with integrity monitoring and result delivery"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz session
    Play {
        /// Questions file (overrides the configured source)
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Grade key to draw questions from (e.g. "11-1")
        #[arg(long)]
        grade: Option<String>,

        /// Questions per session
        #[arg(long)]
        count: Option<usize>,

        /// Disable the focus-loss monitor
        #[arg(long)]
        no_monitor: bool,

        /// Sign-in token to prefill name and email from
        #[arg(long)]
        token: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Export locally saved results to CSV
    Export {
        /// Output file (default: resultados_quiz_<date>.csv)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Results directory (overrides the configured store)
        #[arg(long)]
        store_dir: Option<PathBuf>,

        /// Print stored results as a table instead of writing a file
        #[arg(long)]
        list: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a questions file
    Validate {
        /// Path to the questions JSON file
        #[arg(long)]
        questions: PathBuf,
    },

    /// Create starter config and example questions file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("physquiz=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            questions,
            grade,
            count,
            no_monitor,
            token,
            config,
        } => commands::play::execute(questions, grade, count, no_monitor, token, config).await,
        Commands::Export {
            output,
            store_dir,
            list,
            config,
        } => commands::export::execute(output, store_dir, list, config),
        Commands::Validate { questions } => commands::validate::execute(questions),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
