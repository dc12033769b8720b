//! Shared deterministic types for the build-file core.
//!
//! These types carry no I/O state; they describe the grouped view of a build
//! file and the explanation entries rendered into the final report.

use serde::Serialize;

/// Separator placed between physical lines of one logical command.
pub const CONTINUATION_MARKER: &str = " \\\n";

/// Build-file instruction keywords recognized as command starts.
///
/// Variants are listed in the order the classifier tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Instruction {
    From,
    Env,
    Run,
    Copy,
    Cmd,
    Entrypoint,
    Add,
}

impl Instruction {
    pub const ALL: [Instruction; 7] = [
        Instruction::From,
        Instruction::Env,
        Instruction::Run,
        Instruction::Copy,
        Instruction::Cmd,
        Instruction::Entrypoint,
        Instruction::Add,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Instruction::From => "FROM",
            Instruction::Env => "ENV",
            Instruction::Run => "RUN",
            Instruction::Copy => "COPY",
            Instruction::Cmd => "CMD",
            Instruction::Entrypoint => "ENTRYPOINT",
            Instruction::Add => "ADD",
        }
    }
}

/// One build instruction, possibly spanning several physical lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogicalCommand {
    pub instruction: Instruction,
    /// Trimmed physical lines, the first being the instruction-start line.
    pub lines: Vec<String>,
}

impl LogicalCommand {
    pub fn new(instruction: Instruction, first_line: &str) -> Self {
        Self {
            instruction,
            lines: vec![first_line.to_string()],
        }
    }

    /// Lines joined with [`CONTINUATION_MARKER`].
    pub fn text(&self) -> String {
        self.lines.join(CONTINUATION_MARKER)
    }

    /// First physical line, used for compact log output.
    pub fn head(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or_default()
    }

    /// Whitespace-separated tokens after the keyword, across all lines.
    pub fn arguments(&self) -> Vec<&str> {
        self.lines
            .iter()
            .flat_map(|line| line.split_whitespace())
            .skip(1)
            .collect()
    }
}

/// Parsed view of a build file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupedBuildFile {
    pub commands: Vec<LogicalCommand>,
    /// Copy-step source paths in first-seen order. May contain duplicates.
    pub referenced_paths: Vec<String>,
}

/// Subject (command text or file path) paired with its explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplanationEntry {
    pub subject: String,
    pub explanation: String,
}

impl ExplanationEntry {
    pub fn new(subject: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            explanation: explanation.into(),
        }
    }
}
