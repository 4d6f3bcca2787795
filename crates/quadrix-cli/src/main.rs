//! quadrix command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "quadrix", version, about = "Quadratic equation drill and scoring")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new user
    Register {
        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,

        /// Unique login
        #[arg(long)]
        login: String,
    },

    /// Generate a new equation set
    New {
        /// User id returned by `register`
        #[arg(long)]
        user: String,

        /// Number of equations (default from config)
        #[arg(long)]
        count: Option<usize>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show the most recent equation set of a user
    List {
        /// User id returned by `register`
        #[arg(long)]
        user: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Submit answers for a set and show the score
    Score {
        /// Equation set id
        #[arg(long)]
        set: String,

        /// TOML answer sheet
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Single answer as N=r1,r2 (repeatable, N is the equation number)
        #[arg(long = "answer", allow_hyphen_values = true)]
        answer: Vec<String>,

        /// Output format: text, json, markdown, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Create starter config and example answer sheet
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quadrix=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Register {
            first_name,
            last_name,
            login,
        } => commands::register::execute(config, first_name, last_name, login).await,
        Commands::New {
            user,
            count,
            format,
        } => commands::new::execute(config, user, count, format).await,
        Commands::List { user, format } => commands::list::execute(config, user, format).await,
        Commands::Score {
            set,
            answers,
            answer,
            format,
            output,
        } => commands::score::execute(config, set, answers, answer, format, output).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
