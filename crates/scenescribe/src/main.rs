mod app;

use anyhow::Result;
use app::{RunOptions, DEFAULT_OUTPUT_DIR, DEFAULT_TITLE};
use clap::Parser;
use scenescribe_common::logger;
use scenescribe_llm::{ChatClient, SceneExtractor};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "scenescribe")]
#[command(about = "SceneScribe - pick key scenes from a movie transcript with an LLM", long_about = None)]
struct Cli {
    /// Configuration file holding the API key
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Movie title used in the prompt and the default transcript name
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Transcript path (defaults to <output-dir>/<title>.srt)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Directory created before the run
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Model override
    #[arg(long)]
    model: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Also write logs to this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.log_dir {
        Some(dir) => logger::setup_logging(dir, &cli.log_level)?,
        None => logger::setup_console_logging(&cli.log_level)?,
    }

    let mut out = std::io::stdout();

    let mut options = RunOptions::new(cli.title, cli.output_dir);
    if let Some(script) = cli.script {
        options = options.with_script_path(script);
    }

    let (transcript, mut config) = match app::prepare(&options, &cli.config) {
        Ok(prepared) => prepared,
        Err(e) => {
            app::print_diagnostic(&mut out, &e)?;
            return Ok(());
        }
    };
    if let Some(model) = cli.model {
        config.model = model;
    }

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling run");
            interrupt.cancel();
        }
    });

    let extractor = SceneExtractor::new(ChatClient::from_config(&config)?, config.max_chunk_length);

    tracing::info!("SceneScribe starting - Title: {}, Model: {}", options.title, config.model);

    if let Err(e) = app::run(&extractor, &options, &transcript, &mut out, &cancel).await {
        app::print_diagnostic(&mut out, &e)?;
    }

    Ok(())
}
