//! Application run modes: logger init, one-shot commands, TUI launch.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use crate::cli::Args;
use crate::core;
use crate::core::api::ApiClient;
use crate::core::config::Config;
use crate::core::prompts;
use crate::tui::CodeContext;

type RunResult = Result<(), Box<dyn std::error::Error>>;

/// Initialize env_logger. In TUI mode, writes to a cache file to avoid
/// corrupting the display.
pub fn init_logger(args: &Args) {
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()));

    if args.is_tui_mode() {
        let log_path = core::paths::cache_dir().map(|d| d.join(format!("{}.log", core::app::NAME)));
        if let Some(path) = log_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
            {
                logger.target(env_logger::Target::Pipe(Box::new(file)));
            }
        }
    }
    let _ = logger.try_init();
}

/// Load the optional FILE argument as code context.
fn load_code_context(args: &Args) -> Result<Option<CodeContext>, Box<dyn std::error::Error>> {
    match &args.file {
        Some(path) => {
            let ctx = CodeContext::load(path.clone(), args.language.clone())
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
            Ok(Some(ctx))
        }
        None => Ok(None),
    }
}

/// Run single prompt mode: send one chat message, print the reply to stdout.
/// A loaded FILE rides along as code context, like manual chat in the TUI.
pub async fn run_single_prompt(args: &Args, config: &Config) -> RunResult {
    let prompt_arg = args.prompt.as_deref().unwrap_or_default();
    let prompt = if prompt_arg == "-" {
        io::read_to_string(io::stdin())?
    } else {
        prompt_arg.to_string()
    };
    let prompt = prompt.trim();
    if prompt.is_empty() {
        eprintln!("Error: empty prompt");
        std::process::exit(1);
    }

    let code = load_code_context(args)?;
    let message = prompts::with_code_context(
        prompt,
        code.as_ref().map(|c| (c.language.as_str(), c.text.as_str())),
    );

    let client = ApiClient::new(config)?;
    let reply = client.chat(&message, &[], false).await?;
    println!("{}", reply.response);
    if let Some(tokens) = reply.tokens_info {
        let _ = writeln!(
            io::stderr(),
            "tokens: in≈{} max:{} out≈{}",
            tokens.estimated_input_tokens,
            tokens.max_tokens_used,
            tokens.estimated_output_tokens
        );
    }
    Ok(())
}

/// List supported languages, falling back to the builtin table offline.
pub async fn run_languages(config: &Config) -> RunResult {
    let client = ApiClient::new(config)?;
    let languages = match client.supported_languages().await {
        Ok(list) if !list.is_empty() => list,
        Ok(_) => core::languages::builtin_language_list(),
        Err(e) => {
            log::warn!("language fetch failed ({}), using builtin list", e);
            core::languages::builtin_language_list()
        }
    };
    for lang in languages {
        match lang.description {
            Some(desc) if !desc.is_empty() => {
                println!("{:<12} {} - {}", lang.value, lang.label, desc)
            }
            _ => println!("{:<12} {}", lang.value, lang.label),
        }
    }
    Ok(())
}

/// Upload a document to the knowledge base and print its metadata.
pub async fn run_kb_upload(
    config: &Config,
    file: &Path,
    title: Option<&str>,
    description: &str,
) -> RunResult {
    let default_title = file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled")
        .to_string();
    let title = title.unwrap_or(&default_title);

    let client = ApiClient::new(config)?;
    let doc = client.upload_document(file, title, description).await?;
    println!("Uploaded: {}", doc.title);
    println!("  file_id: {}", doc.file_id);
    println!("  file:    {} ({} bytes)", doc.filename, doc.file_size);
    if doc.pages_count > 0 {
        println!("  pages:   {}", doc.pages_count);
    }
    Ok(())
}

/// List uploaded knowledge-base documents with the IDs `ask --file-id` takes.
pub async fn run_kb_list(config: &Config) -> RunResult {
    let client = ApiClient::new(config)?;
    let docs = client.list_documents().await?;
    if docs.is_empty() {
        println!("No documents uploaded yet.");
        return Ok(());
    }
    for doc in &docs {
        println!("{}  {}", doc.file_id, doc.title);
        println!("    file:  {} ({} bytes)", doc.filename, doc.file_size);
        if doc.pages_count > 0 {
            println!("    pages: {}", doc.pages_count);
        }
        if !doc.upload_time.is_empty() {
            println!("    added: {}", doc.upload_time);
        }
        if !doc.description.is_empty() {
            println!("    about: {}", doc.description);
        }
    }
    println!("\n{} document(s)", docs.len());
    Ok(())
}

/// Ask the knowledge base a question and print the answer with citations.
pub async fn run_kb_ask(
    config: &Config,
    question: &str,
    file_ids: &[String],
    max_results: u32,
) -> RunResult {
    let client = ApiClient::new(config)?;
    let answer = client
        .ask_knowledge_base(question, file_ids, max_results)
        .await?;
    println!("{}", answer.response);
    if !answer.sources.is_empty() {
        println!("\nSources:");
        for (i, src) in answer.sources.iter().enumerate() {
            println!(
                "  [{}] {} ({}, chunk {}, similarity {:.2})",
                i + 1,
                src.source.title,
                src.source.filename,
                src.source.chunk_index,
                src.similarity_score
            );
            let excerpt: String = src.content.chars().take(160).collect();
            if !excerpt.is_empty() {
                println!("      {}", excerpt.replace('\n', " "));
            }
        }
    }
    Ok(())
}

/// Synthesize speech and write the decoded audio to a file.
pub async fn run_tts(config: &Config, text: &str, output: &Path) -> RunResult {
    let client = ApiClient::new(config)?;
    let audio = client.synthesize_speech(text).await?;
    std::fs::write(output, &audio.bytes)?;
    println!(
        "Wrote {} bytes ({}) to {}",
        audio.bytes.len(),
        audio.mime_type,
        output.display()
    );
    Ok(())
}

/// Launch the TUI in a blocking thread. Returns on exit, panic, or IO error.
pub async fn launch_tui(args: &Args, config: &Config) -> RunResult {
    let code = load_code_context(args)?;
    let client = Arc::new(ApiClient::new(config)?);
    let backend = config.base_url.clone();

    let join_result: Result<io::Result<()>, tokio::task::JoinError> =
        tokio::task::spawn_blocking(move || crate::tui::run(client, backend, code)).await;

    match join_result {
        Ok(io_result) => io_result?,
        Err(join_err) => {
            if let Ok(panic) = join_err.try_into_panic() {
                let msg = if let Some(s) = panic.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic.downcast_ref::<String>() {
                    s.clone()
                } else {
                    format!("{:?}", panic)
                };
                eprintln!("TUI panic: {}", msg);
            }
            return Err(
                Box::new(io::Error::other("TUI thread panicked")) as Box<dyn std::error::Error>
            );
        }
    }
    Ok(())
}
