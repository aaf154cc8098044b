//! SlideCraft CLI - generate presentation decks with LLM providers

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{generate, parse, providers, score};

#[derive(Parser)]
#[command(name = "slidecraft")]
#[command(about = "Generate slide decks with Claude, OpenAI and Gemini", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a deck for a topic
    Generate {
        /// Presentation topic
        topic: String,

        /// Number of slides
        #[arg(long)]
        slides: Option<usize>,

        /// Target audience
        #[arg(long)]
        audience: Option<String>,

        /// Presentation length (e.g. "15 minutes")
        #[arg(long)]
        duration: Option<String>,

        /// Provider to use (claude, openai, gemini)
        #[arg(long)]
        provider: Option<String>,

        /// Ask several providers and keep the best-scoring deck
        #[arg(long)]
        compare: bool,

        /// Comma-separated providers to compare (default: all configured)
        #[arg(long)]
        providers: Option<String>,

        /// Write the deck as JSON to this file
        #[arg(long)]
        output: Option<String>,

        /// Use canned offline responses instead of calling providers
        #[arg(long)]
        mock: bool,
    },

    /// List providers and their configuration status
    Providers,

    /// Parse a raw model answer into slides
    Parse {
        /// File containing the model's answer
        file: String,
    },

    /// Score a JSON slide deck
    Score {
        /// Deck JSON file (saved deck or slide array)
        file: String,

        /// Show per-slide scores
        #[arg(long)]
        detail: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match cli.command {
        Commands::Generate {
            topic,
            slides,
            audience,
            duration,
            provider,
            compare,
            providers,
            output,
            mock,
        } => generate::run(generate::GenerateArgs {
            topic,
            slides,
            audience,
            duration,
            provider,
            compare,
            providers,
            output,
            mock,
        }),
        Commands::Providers => providers::run(),
        Commands::Parse { file } => parse::run(&file),
        Commands::Score { file, detail } => score::run(&file, detail),
    }
}
