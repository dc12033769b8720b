//! Orchestration for a single `dockdoc analyze` run.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::core::report::Report;
use crate::core::types::ExplanationEntry;
use crate::io::build_file::{LoadedBuildFile, load_build_file};
use crate::io::config::{DockdocConfig, ExplainerSettings};
use crate::io::explainer::Explainer;
use crate::io::gatekeeper::{FileVerdict, check_file};
use crate::io::prompt::PromptEngine;
use crate::io::report_writer::write_report;

/// Inputs for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Build file to analyze.
    pub input_path: PathBuf,
    /// Destination of the generated Markdown report.
    pub output_path: PathBuf,
    /// Model and generation settings used to construct the explainer.
    pub explainer: ExplainerSettings,
}

impl AnalysisConfig {
    pub fn new(input_path: impl Into<PathBuf>, config: &DockdocConfig) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: config.output_path.clone(),
            explainer: config.explainer.clone(),
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    pub output_path: PathBuf,
    /// Number of logical commands explained (one table row each).
    pub commands: usize,
    /// Referenced paths that received a content explanation, in order.
    pub analyzed_files: Vec<String>,
    /// Referenced paths that were excluded, with the reason.
    pub skipped_files: Vec<(String, FileVerdict)>,
}

/// Parse the build file, explain files and commands, and write the report.
///
/// Explanation requests are issued sequentially. The first service failure
/// aborts the run before any report is written.
#[instrument(skip_all, fields(input = %config.input_path.display()))]
pub fn run_analysis<E: Explainer>(config: &AnalysisConfig, explainer: &E) -> Result<AnalysisOutcome> {
    let build_file = load_build_file(&config.input_path)?;
    let prompts = PromptEngine::new();

    let (files, analyzed_files, skipped_files) = explain_files(&build_file, explainer, &prompts)?;
    let commands = explain_commands(&build_file, explainer, &prompts)?;

    let report = Report { commands, files };
    write_report(&config.output_path, &report)?;

    Ok(AnalysisOutcome {
        output_path: config.output_path.clone(),
        commands: report.commands.len(),
        analyzed_files,
        skipped_files,
    })
}

type FileResults = (
    Vec<ExplanationEntry>,
    Vec<String>,
    Vec<(String, FileVerdict)>,
);

fn explain_files<E: Explainer>(
    build_file: &LoadedBuildFile,
    explainer: &E,
    prompts: &PromptEngine,
) -> Result<FileResults> {
    let mut entries = Vec::new();
    let mut analyzed = Vec::new();
    let mut skipped = Vec::new();
    let mut seen = HashSet::new();

    for referenced in &build_file.grouped.referenced_paths {
        if !seen.insert(referenced.as_str()) {
            continue;
        }
        let resolved = build_file.resolve(referenced);
        let verdict = check_file(&resolved);
        if !verdict.is_eligible() {
            info!(file = %referenced, verdict = ?verdict, "skipping binary or missing file");
            skipped.push((referenced.clone(), verdict));
            continue;
        }

        info!(file = %referenced, "analyzing file");
        let content = read_text_lossy(&resolved)?;
        let prompt = prompts.file_prompt(&content)?;
        let explanation = explainer
            .explain(&prompt)
            .with_context(|| format!("explain file {referenced}"))?;
        entries.push(ExplanationEntry::new(referenced.clone(), explanation));
        analyzed.push(referenced.clone());
    }

    Ok((entries, analyzed, skipped))
}

fn explain_commands<E: Explainer>(
    build_file: &LoadedBuildFile,
    explainer: &E,
    prompts: &PromptEngine,
) -> Result<Vec<ExplanationEntry>> {
    let mut entries = Vec::with_capacity(build_file.grouped.commands.len());
    for command in &build_file.grouped.commands {
        info!(command = command.head(), "sending explanation request for command");
        let text = command.text();
        let prompt = prompts.command_prompt(&text)?;
        let explanation = explainer
            .explain(&prompt)
            .with_context(|| format!("explain command `{}`", command.head()))?;
        entries.push(ExplanationEntry::new(text, explanation));
    }
    Ok(entries)
}

fn read_text_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
