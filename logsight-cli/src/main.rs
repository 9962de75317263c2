mod cli;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use logsight_core::{read_log_file, AnalysisResult, Config, ReportBuilder};
use output::render;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so JSON on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Starting LogSight CLI for {} file(s)", cli.files.len());

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply_to(&mut config);
    debug!("Effective configuration: {:?}", config);

    let format = config.output.format;
    let builder = Arc::new(ReportBuilder::new(config.analysis.clone()));
    let max_size = config.ingest.max_file_size_bytes;

    // Independent files are analyzed concurrently, reported in argument order
    let tasks: Vec<_> = cli
        .files
        .iter()
        .cloned()
        .map(|path| {
            let builder = Arc::clone(&builder);
            tokio::spawn(analyze_file(path, builder, max_size))
        })
        .collect();

    let mut results = Vec::with_capacity(tasks.len());
    let mut failures = 0usize;
    for (path, task) in cli.files.iter().zip(tasks) {
        match task.await.context("Analysis task panicked")? {
            Ok(result) => results.push(result),
            Err(e) => {
                error!("Skipping {}: {:#}", path.display(), e);
                eprintln!("Error: {:#}", e);
                failures += 1;
            }
        }
    }

    if !results.is_empty() {
        println!("{}", render(&results, format)?);
    }

    if failures > 0 {
        error!("{} of {} file(s) could not be analyzed", failures, cli.files.len());
        std::process::exit(1);
    }

    Ok(())
}

async fn analyze_file(path: PathBuf, builder: Arc<ReportBuilder>, max_size: u64) -> Result<AnalysisResult> {
    let input = read_log_file(&path, max_size).await?;
    debug!("Decoded {} ({} bytes)", input.file_name, input.file_size);

    // The engine is synchronous; keep it off the async worker threads
    let result = tokio::task::spawn_blocking(move || builder.analyze_input(&input))
        .await
        .with_context(|| format!("Analysis of {} did not complete", path.display()))?;

    Ok(result)
}
