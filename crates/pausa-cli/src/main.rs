use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pausa", version, about = "Work/break interval timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive timer session
    Run {
        /// 1-based index of a saved preset to load instead of prompting
        #[arg(long)]
        preset: Option<usize>,
    },
    /// Dump the session history log
    History,
    /// Report accumulated totals
    Stats,
    /// Duration preset management
    Preset {
        #[command(subcommand)]
        action: commands::preset::PresetAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run { preset } => commands::run::run(preset),
        Commands::History => commands::history::run(),
        Commands::Stats => commands::stats::run(),
        Commands::Preset { action } => commands::preset::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
