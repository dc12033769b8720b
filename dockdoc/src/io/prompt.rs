//! Prompt templates for the explanation service.

use anyhow::Result;
use minijinja::{Environment, context};

const COMMAND_TEMPLATE: &str = include_str!("prompts/command.md");
const FILE_TEMPLATE: &str = include_str!("prompts/file.md");

/// Template engine wrapper around minijinja.
pub struct PromptEngine {
    env: Environment<'static>,
}

impl Default for PromptEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_template("command", COMMAND_TEMPLATE)
            .expect("command template should be valid");
        env.add_template("file", FILE_TEMPLATE)
            .expect("file template should be valid");
        Self { env }
    }

    /// Prompt asking for a detailed explanation of one build instruction.
    pub fn command_prompt(&self, command: &str) -> Result<String> {
        let template = self.env.get_template("command")?;
        Ok(template.render(context! { command => command })?)
    }

    /// Prompt asking for the purpose of a copied file's content.
    pub fn file_prompt(&self, content: &str) -> Result<String> {
        let template = self.env.get_template("file")?;
        Ok(template.render(context! { content => content })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_prompt_embeds_literal_text() {
        let engine = PromptEngine::new();
        let prompt = engine
            .command_prompt("RUN echo \"<hi>\" \\\n&& true")
            .expect("render");
        assert_eq!(
            prompt,
            "Explain the following Dockerfile command in detail:\n\nRUN echo \"<hi>\" \\\n&& true"
        );
    }

    #[test]
    fn file_prompt_embeds_content_unescaped() {
        let engine = PromptEngine::new();
        let prompt = engine.file_prompt("a & b {{ c }}").expect("render");
        assert_eq!(
            prompt,
            "Explain the purpose of the following file content:\n\na & b {{ c }}"
        );
    }
}
