//! Dockerfile explanation generator.
//!
//! Reads a build file, groups it into logical commands, and writes a Markdown
//! report explaining each command and every text file copied by `COPY`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use dockdoc::analyze::{AnalysisConfig, run_analysis};
use dockdoc::core::types::{Instruction, LogicalCommand};
use dockdoc::exit_codes;
use dockdoc::io::build_file::load_build_file;
use dockdoc::io::config::{DEFAULT_CONFIG_PATH, DockdocConfig, load_config, write_config};
use dockdoc::io::explainer::OpenAiExplainer;
use dockdoc::logging;

#[derive(Parser)]
#[command(
    name = "dockdoc",
    version,
    about = "Generate Markdown explanations for a Dockerfile"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Explain every command and copied file, then write the report.
    Analyze {
        /// Path to the build file.
        dockerfile: PathBuf,
        /// Report destination (overrides `output_path` from the config file).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Model identifier (overrides `explainer.model`).
        #[arg(short, long)]
        model: Option<String>,
        /// Configuration file. Missing files fall back to defaults.
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// Print grouped commands and referenced paths as JSON without calling the service.
    Parse {
        /// Path to the build file.
        dockerfile: PathBuf,
    },
    /// Write a default configuration file.
    InitConfig {
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::FAILURE);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Analyze {
            dockerfile,
            output,
            model,
            config,
        } => cmd_analyze(&dockerfile, output, model, &config),
        Command::Parse { dockerfile } => cmd_parse(&dockerfile),
        Command::InitConfig { config, force } => cmd_init_config(&config, force),
    }
}

fn cmd_analyze(
    dockerfile: &Path,
    output: Option<PathBuf>,
    model: Option<String>,
    config_path: &Path,
) -> Result<()> {
    let mut cfg = load_config(config_path)?;
    if let Some(output) = output {
        cfg.output_path = output;
    }
    if let Some(model) = model {
        cfg.explainer.model = model;
    }
    cfg.validate()?;

    let analysis = AnalysisConfig::new(dockerfile, &cfg);
    let metadata = fs::metadata(&analysis.input_path)
        .with_context(|| format!("read build file {}", analysis.input_path.display()))?;
    ensure!(
        metadata.is_file(),
        "build file {} is not a regular file",
        analysis.input_path.display()
    );

    let api_key = env::var(&analysis.explainer.api_key_env).with_context(|| {
        format!(
            "read API key from ${}",
            analysis.explainer.api_key_env
        )
    })?;
    let explainer =
        OpenAiExplainer::new(&analysis.explainer, api_key).context("build explanation client")?;

    let outcome = run_analysis(&analysis, &explainer)?;
    info!(
        output = %outcome.output_path.display(),
        commands = outcome.commands,
        analyzed_files = outcome.analyzed_files.len(),
        skipped_files = outcome.skipped_files.len(),
        "analysis complete"
    );
    Ok(())
}

/// JSON view of one logical command for `dockdoc parse`.
#[derive(Serialize)]
struct CommandView<'a> {
    instruction: Instruction,
    text: String,
    arguments: Vec<&'a str>,
}

impl<'a> CommandView<'a> {
    fn from_command(command: &'a LogicalCommand) -> Self {
        Self {
            instruction: command.instruction,
            text: command.text(),
            arguments: command.arguments(),
        }
    }
}

#[derive(Serialize)]
struct ParseView<'a> {
    commands: Vec<CommandView<'a>>,
    referenced_paths: &'a [String],
}

fn cmd_parse(dockerfile: &Path) -> Result<()> {
    let loaded = load_build_file(dockerfile)?;
    let view = ParseView {
        commands: loaded
            .grouped
            .commands
            .iter()
            .map(CommandView::from_command)
            .collect(),
        referenced_paths: &loaded.grouped.referenced_paths,
    };
    let payload = serde_json::to_string_pretty(&view).context("serialize json")?;
    println!("{payload}");
    Ok(())
}

fn cmd_init_config(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        info!(path = %path.display(), "config already exists, leaving it untouched");
        return Ok(());
    }
    write_config(path, &DockdocConfig::default())
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "wrote default config");
    Ok(())
}
