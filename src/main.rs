//! codepal: terminal client for an AI-assisted programming helper.
//!
//! Modes:
//! - Interactive TUI chat with quick actions over a loaded source file
//! - Single prompt mode with `-p`
//! - One-shot subcommands: languages, knowledge base, text-to-speech

mod cli;
mod core;
mod run;
mod tui;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use cli::{Args, Commands, KbSubcommand};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    // Completions need no config; handle before loading anything.
    if let Some(Commands::Completions { shell }) = &args.command {
        let mut cmd = Args::command();
        clap_complete::generate(*shell, &mut cmd, core::app::NAME, &mut std::io::stdout());
        return Ok(());
    }

    let config = core::config::load().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    match &args.command {
        Some(Commands::Languages) => run::run_languages(&config).await,
        Some(Commands::Kb { subcommand }) => match subcommand {
            KbSubcommand::Upload {
                file,
                title,
                description,
            } => run::run_kb_upload(&config, file, title.as_deref(), description).await,
            KbSubcommand::List => run::run_kb_list(&config).await,
            KbSubcommand::Ask {
                question,
                file_ids,
                max_results,
            } => run::run_kb_ask(&config, question, file_ids, *max_results).await,
        },
        Some(Commands::Tts { text, output }) => run::run_tts(&config, text, output).await,
        Some(Commands::Completions { .. }) => unreachable!("handled above"),
        None if args.prompt.is_some() => run::run_single_prompt(&args, &config).await,
        None => run::launch_tui(&args, &config).await,
    }
}
