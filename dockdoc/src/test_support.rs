//! Test-only helpers: scripted explainers and temporary build contexts.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::analyze::AnalysisConfig;
use crate::io::config::ExplainerSettings;
use crate::io::explainer::{Explainer, ServiceError};

/// Explainer that answers with the last line of each prompt and records
/// every prompt it receives.
#[derive(Debug, Default)]
pub struct EchoExplainer {
    prompts: RefCell<Vec<String>>,
}

impl EchoExplainer {
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Explainer for EchoExplainer {
    fn explain(&self, prompt: &str) -> Result<String, ServiceError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        let subject = prompt.lines().last().unwrap_or_default();
        Ok(format!("Explains {subject}"))
    }
}

/// Explainer that replays queued responses in order.
#[derive(Debug, Default)]
pub struct ScriptedExplainer {
    responses: RefCell<VecDeque<Result<String, ServiceError>>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedExplainer {
    pub fn new(responses: Vec<Result<String, ServiceError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Explainer for ScriptedExplainer {
    fn explain(&self, prompt: &str) -> Result<String, ServiceError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::MalformedResponse("script exhausted".into())))
    }
}

/// Temporary directory holding a `Dockerfile` and its build context.
pub struct BuildContext {
    dir: TempDir,
}

impl BuildContext {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp build context")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn dockerfile_path(&self) -> PathBuf {
        self.path().join("Dockerfile")
    }

    pub fn output_path(&self) -> PathBuf {
        self.path().join("README.md")
    }

    pub fn write_dockerfile(&self, contents: &str) -> Result<()> {
        self.write_file("Dockerfile", contents)
    }

    pub fn write_file(&self, relative: &str, contents: &str) -> Result<()> {
        self.write_bytes(relative, contents.as_bytes())
    }

    pub fn write_bytes(&self, relative: &str, contents: &[u8]) -> Result<()> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }

    pub fn config(&self) -> AnalysisConfig {
        AnalysisConfig {
            input_path: self.dockerfile_path(),
            output_path: self.output_path(),
            explainer: ExplainerSettings::default(),
        }
    }

    pub fn read_report(&self) -> Result<String> {
        fs::read_to_string(self.output_path()).context("read generated report")
    }
}
