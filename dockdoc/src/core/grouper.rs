//! Grouping of classified lines into logical commands.
//!
//! The grouper is a two-state machine:
//!
//! ```text
//! Idle         --start-->        Accumulating
//! Accumulating --start-->        Accumulating  (emits previous command)
//! Accumulating --continuation--> Accumulating
//! Accumulating --end-->          Idle          (emits final command)
//! Idle         --continuation--> Idle          (line dropped)
//! ```
//!
//! Copy-step source paths are taken from the instruction-start line only.
//! Continuation lines of a multi-line `COPY` are never scanned for paths.

use tracing::debug;

use crate::core::classifier::{LineKind, classify_line};
use crate::core::types::{GroupedBuildFile, Instruction, LogicalCommand};

#[derive(Debug, Default)]
enum GrouperState {
    #[default]
    Idle,
    Accumulating(LogicalCommand),
}

/// Incremental grouper. Feed lines with [`Grouper::push_line`], then call
/// [`Grouper::finish`].
#[derive(Debug, Default)]
pub struct Grouper {
    state: GrouperState,
    output: GroupedBuildFile,
}

impl Grouper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, raw: &str) {
        let line = raw.trim();
        match classify_line(line) {
            LineKind::Skip => {}
            LineKind::InstructionStart(instruction) => self.start(instruction, line),
            LineKind::Continuation => match &mut self.state {
                GrouperState::Accumulating(command) => command.lines.push(line.to_string()),
                GrouperState::Idle => debug!(line, "dropping continuation with no open command"),
            },
        }
    }

    pub fn finish(mut self) -> GroupedBuildFile {
        self.close();
        self.output
    }

    fn start(&mut self, instruction: Instruction, line: &str) {
        self.close();
        if instruction == Instruction::Copy {
            self.output
                .referenced_paths
                .extend(copy_source_paths(line).into_iter().map(str::to_string));
        }
        self.state = GrouperState::Accumulating(LogicalCommand::new(instruction, line));
    }

    fn close(&mut self) {
        if let GrouperState::Accumulating(command) = std::mem::take(&mut self.state) {
            self.output.commands.push(command);
        }
    }
}

/// Group every line of `source` into logical commands and referenced paths.
pub fn group_lines(source: &str) -> GroupedBuildFile {
    let mut grouper = Grouper::new();
    for line in source.lines() {
        grouper.push_line(line);
    }
    grouper.finish()
}

/// Source tokens of a copy-step line: all but the keyword and the destination.
pub fn copy_source_paths(line: &str) -> Vec<&str> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() <= 2 {
        return Vec::new();
    }
    tokens[1..tokens.len() - 1].to_vec()
}
