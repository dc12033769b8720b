//! Deterministic classification of build-file lines.

use crate::core::types::Instruction;

/// Role of a single physical line in the instruction stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Blank line or `#` comment. Ignored entirely.
    Skip,
    /// Line opening a new logical command.
    InstructionStart(Instruction),
    /// Line extending the currently open command.
    Continuation,
}

/// Classify one line after trimming surrounding whitespace.
///
/// Keywords match case-sensitively as prefixes, so `RUNNER` is a `RUN` start.
pub fn classify_line(line: &str) -> LineKind {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return LineKind::Skip;
    }
    match instruction_prefix(line) {
        Some(instruction) => LineKind::InstructionStart(instruction),
        None => LineKind::Continuation,
    }
}

fn instruction_prefix(line: &str) -> Option<Instruction> {
    Instruction::ALL
        .into_iter()
        .find(|instruction| line.starts_with(instruction.keyword()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(classify_line(""), LineKind::Skip);
        assert_eq!(classify_line("   \t"), LineKind::Skip);
        assert_eq!(classify_line("# syntax=docker/dockerfile:1"), LineKind::Skip);
        assert_eq!(classify_line("    # indented comment"), LineKind::Skip);
    }

    #[test]
    fn every_keyword_starts_an_instruction() {
        for instruction in Instruction::ALL {
            let line = format!("{} something", instruction.keyword());
            assert_eq!(
                classify_line(&line),
                LineKind::InstructionStart(instruction)
            );
        }
    }

    #[test]
    fn leading_whitespace_is_trimmed_before_matching() {
        assert_eq!(
            classify_line("   COPY a b"),
            LineKind::InstructionStart(Instruction::Copy)
        );
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(classify_line("run echo hi"), LineKind::Continuation);
        assert_eq!(classify_line("From alpine"), LineKind::Continuation);
    }

    #[test]
    fn unrecognized_keywords_continue() {
        assert_eq!(classify_line("WORKDIR /app"), LineKind::Continuation);
        assert_eq!(classify_line("&& make install"), LineKind::Continuation);
    }

    #[test]
    fn prefix_match_accepts_longer_words() {
        assert_eq!(
            classify_line("RUNNER=1"),
            LineKind::InstructionStart(Instruction::Run)
        );
    }
}
