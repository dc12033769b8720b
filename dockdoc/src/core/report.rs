//! Markdown rendering for the analysis report.
//!
//! Each command occupies exactly one table row and each analyzed file exactly
//! one `###` subsection, so structural counts survive free-form explanations.

use crate::core::types::ExplanationEntry;

pub const REPORT_TITLE: &str = "# Dockerfile Command Analysis";
pub const FILES_HEADING: &str = "## File Content Analysis";
const TABLE_HEADER: &str = "| Command | Explanation |\n|---------|-------------|\n";

/// Explanations gathered for one build file, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub commands: Vec<ExplanationEntry>,
    pub files: Vec<ExplanationEntry>,
}

/// Render the full Markdown document.
pub fn render_markdown(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(REPORT_TITLE);
    out.push_str("\n\n");
    out.push_str(TABLE_HEADER);
    for entry in &report.commands {
        out.push_str("| ");
        out.push_str(&command_cell(&entry.subject));
        out.push_str(" | ");
        out.push_str(&text_cell(&entry.explanation));
        out.push_str(" |\n");
    }

    out.push_str("\n\n");
    out.push_str(FILES_HEADING);
    out.push_str("\n\n");
    for entry in &report.files {
        out.push_str("### ");
        out.push_str(entry.subject.trim());
        out.push_str("\n\n");
        out.push_str(&section_body(&entry.explanation));
        out.push_str("\n\n");
    }
    out
}

/// Multi-line commands become one code span per physical line joined by `<br>`.
fn command_cell(command: &str) -> String {
    command
        .lines()
        .map(|line| code_span(&line.replace('|', "\\|")))
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Fence is one backtick longer than the longest backtick run in `text`.
fn code_span(text: &str) -> String {
    let longest_run = text
        .split(|ch| ch != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    if longest_run == 0 {
        return format!("`{text}`");
    }
    let fence = "`".repeat(longest_run + 1);
    format!("{fence} {text} {fence}")
}

/// File explanation with level 1-3 ATX headings demoted to `####`, so
/// model-written headings never open a sibling file section.
fn section_body(text: &str) -> String {
    text.trim()
        .lines()
        .map(demote_heading)
        .collect::<Vec<_>>()
        .join("\n")
}

fn demote_heading(line: &str) -> String {
    let trimmed = line.trim_start();
    let level = trimmed.chars().take_while(|&ch| ch == '#').count();
    let rest = &trimmed[level..];
    let is_heading =
        (1..4).contains(&level) && (rest.is_empty() || rest.starts_with([' ', '\t']));
    if is_heading {
        format!("####{rest}")
    } else {
        line.to_string()
    }
}

fn text_cell(text: &str) -> String {
    text.trim()
        .lines()
        .map(|line| line.trim_end().replace('|', "\\|"))
        .collect::<Vec<_>>()
        .join("<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_rows(markdown: &str) -> usize {
        markdown
            .lines()
            .skip_while(|line| !line.starts_with("|---"))
            .skip(1)
            .take_while(|line| line.starts_with('|'))
            .count()
    }

    fn file_sections(markdown: &str) -> usize {
        markdown
            .lines()
            .filter(|line| line.starts_with("### "))
            .count()
    }

    #[test]
    fn renders_expected_layout() {
        let report = Report {
            commands: vec![ExplanationEntry::new("FROM alpine", "Base image.")],
            files: vec![ExplanationEntry::new("app.py", "Entry script.")],
        };
        let expected = "# Dockerfile Command Analysis\n\n\
| Command | Explanation |\n\
|---------|-------------|\n\
| `FROM alpine` | Base image. |\n\
\n\n## File Content Analysis\n\n\
### app.py\n\nEntry script.\n\n";
        assert_eq!(render_markdown(&report), expected);
    }

    #[test]
    fn multiline_explanations_keep_one_row_per_command() {
        let report = Report {
            commands: vec![
                ExplanationEntry::new(
                    "RUN apt-get update \\\n&& apt-get install -y curl",
                    "Line one.\n\n- bullet | with pipe\n",
                ),
                ExplanationEntry::new("CMD [\"app\"]", "Runs app."),
            ],
            files: Vec::new(),
        };
        let markdown = render_markdown(&report);
        assert_eq!(table_rows(&markdown), 2);
        assert_eq!(file_sections(&markdown), 0);
        assert!(markdown.contains("`RUN apt-get update \\`<br>`&& apt-get install -y curl`"));
        assert!(markdown.contains("Line one.<br><br>- bullet \\| with pipe"));
    }

    #[test]
    fn backticks_in_commands_use_longer_fence() {
        assert_eq!(command_cell("RUN echo `date`"), "`` RUN echo `date` ``");
        assert_eq!(command_cell("RUN echo ``x``"), "``` RUN echo ``x`` ```");
    }

    #[test]
    fn headings_in_file_explanations_stay_inside_their_section() {
        let report = Report {
            commands: Vec::new(),
            files: vec![ExplanationEntry::new(
                "app.py",
                "Overview.\n\n### Purpose\n\n# Usage\n#### Details\n#hashtag\nRuns the app.",
            )],
        };
        let markdown = render_markdown(&report);
        assert_eq!(file_sections(&markdown), 1);
        assert!(markdown.contains("#### Purpose\n"));
        assert!(markdown.contains("#### Usage\n#### Details\n#hashtag\n"));
    }

    #[test]
    fn empty_report_still_has_both_headings() {
        let markdown = render_markdown(&Report::default());
        assert!(markdown.contains(REPORT_TITLE));
        assert!(markdown.contains(FILES_HEADING));
        assert_eq!(table_rows(&markdown), 0);
    }
}
