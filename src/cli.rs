//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

const AFTER_HELP: &str = "\
EXAMPLES:
  codepal                          Launch the chat TUI
  codepal src/main.py              TUI with main.py loaded as current code
  codepal -p \"explain closures\"    Single prompt, print the reply
  codepal -p - < question.txt      Read the prompt from stdin
  codepal languages                List supported programming languages
  codepal kb upload notes.pdf -t \"Java guide\"
  codepal kb list                  Show uploaded documents and their IDs
  codepal kb ask \"What are the naming rules?\"
  codepal tts \"Hello there\" -o hello.mp3
  codepal completions bash         Generate bash completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Terminal client for an AI-assisted programming helper",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Send a single prompt then exit (without opening the TUI)
    #[arg(
        short = 'p',
        long,
        help = "Provide a prompt to get an immediate reply (use '-' to read from stdin)"
    )]
    pub prompt: Option<String>,

    /// Source file loaded as current code for quick actions and chat context
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Override the detected language of the loaded file
    #[arg(short = 'l', long, help = "Language of FILE (e.g. python, java)")]
    pub language: Option<String>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List programming languages the helper supports
    Languages,
    /// Knowledge base: upload documents and ask questions about them
    Kb {
        #[command(subcommand)]
        subcommand: KbSubcommand,
    },
    /// Synthesize speech for a text and save the audio to a file
    Tts {
        /// Text to speak
        text: String,
        /// Output audio file
        #[arg(short = 'o', long, default_value = "speech.mp3")]
        output: PathBuf,
    },
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum KbSubcommand {
    /// Upload a document (PDF) to the knowledge base
    Upload {
        /// File to upload
        file: PathBuf,
        /// Document title (defaults to the file name)
        #[arg(short = 't', long)]
        title: Option<String>,
        /// Optional description
        #[arg(short = 'd', long, default_value = "")]
        description: String,
    },
    /// List uploaded documents with their IDs (usable with `ask --file-id`)
    List,
    /// Ask a question answered from the uploaded documents
    Ask {
        /// The question
        question: String,
        /// Restrict the search to specific uploaded files (repeatable)
        #[arg(long = "file-id", value_name = "ID")]
        file_ids: Vec<String>,
        /// Maximum number of source chunks to retrieve
        #[arg(long, default_value_t = 3)]
        max_results: u32,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    /// True when this invocation opens the interactive TUI.
    pub fn is_tui_mode(&self) -> bool {
        self.command.is_none() && self.prompt.is_none()
    }
}
