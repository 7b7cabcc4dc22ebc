mod args;

use anyhow::Context;
use args::Cli;
use clap::Parser;
use smexport_core::{init_logging, Config, Exporter};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = build_config(&cli)?;

    init_logging(&config.log_path)
        .with_context(|| format!("cannot open log file {}", config.log_path.display()))?;
    tracing::debug!(?config, "Configuration loaded");

    let exporter = Exporter::new(config);
    let summary = exporter.run(&cli.path)?;

    println!(
        "Exported {} bookmarks in {} folders from {} session files to {}",
        summary.bookmarks,
        summary.folders,
        summary.sessions,
        summary.output_path.display()
    );
    if summary.skipped > 0 || summary.decode_failures > 0 {
        println!(
            "{} sessions skipped, {} decode failures (see {})",
            summary.skipped,
            summary.decode_failures,
            exporter.config().log_path.display()
        );
    }

    Ok(())
}

fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(output) = &cli.output {
        config.output_path = output.clone();
    }
    if let Some(log_file) = &cli.log_file {
        config.log_path = log_file.clone();
    }
    if let Some(policy) = cli.on_shape_error {
        config.on_shape_error = policy;
    }
    config.sort_files |= cli.sorted;
    config.escape_markup |= cli.escape_html;

    config.validate()?;
    Ok(config)
}
