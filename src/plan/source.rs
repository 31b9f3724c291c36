//! Plan retrieval.
//!
//! A [`PlanSource`] produces raw plan text. The default source shells out to
//! `terraform show -json`; the file sources read output that was captured
//! earlier in the pipeline.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::{PlanInput, SummaryConfig};
use crate::error::{PlanError, Result, SummaryError};

/// How the text returned by a [`PlanSource`] is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanEncoding {
    /// A single JSON document with a `resource_changes` array.
    Document,
    /// One JSON message per line, as printed by `plan -json`.
    Log,
}

/// Trait for plan retrieval backends.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanSource: Send + Sync {
    /// Returns the raw plan text.
    ///
    /// The text is not guaranteed to be valid JSON.
    async fn fetch(&self) -> Result<String>;

    /// Returns the encoding of the fetched text.
    fn encoding(&self) -> PlanEncoding;

    /// Returns a human-readable description of the source.
    fn describe(&self) -> String;
}

#[async_trait]
impl PlanSource for Box<dyn PlanSource> {
    async fn fetch(&self) -> Result<String> {
        (**self).fetch().await
    }

    fn encoding(&self) -> PlanEncoding {
        (**self).encoding()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Runs `<binary> show -json <plan>` and captures its stdout.
#[derive(Debug, Clone)]
pub struct TerraformShow {
    /// Planning tool binary.
    binary: String,
    /// Saved plan artifact.
    plan_file: PathBuf,
}

impl TerraformShow {
    /// Creates a source for the given binary and plan artifact.
    #[must_use]
    pub fn new(binary: impl Into<String>, plan_file: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            plan_file: plan_file.into(),
        }
    }

    /// Returns the command line that will be executed.
    #[must_use]
    pub fn command_line(&self) -> String {
        format!("{} show -json {}", self.binary, self.plan_file.display())
    }
}

#[async_trait]
impl PlanSource for TerraformShow {
    async fn fetch(&self) -> Result<String> {
        let command_line = self.command_line();
        info!("Running command: {command_line}");

        // stderr stays attached to ours so the tool's diagnostics reach the
        // user; `output()` would pipe it.
        let child = Command::new(&self.binary)
            .arg("show")
            .arg("-json")
            .arg(&self.plan_file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                SummaryError::Plan(PlanError::Launch {
                    command: command_line.clone(),
                    message: e.to_string(),
                })
            })?;

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            warn!("`{command_line}` exited with {}", output.status);
        }
        debug!("Captured {} bytes of plan output", output.stdout.len());

        String::from_utf8(output.stdout)
            .map_err(|e| SummaryError::plan_parse(format!("plan output is not valid UTF-8: {e}")))
    }

    fn encoding(&self) -> PlanEncoding {
        PlanEncoding::Document
    }

    fn describe(&self) -> String {
        self.command_line()
    }
}

/// Reads plan text from a file.
#[derive(Debug, Clone)]
pub struct PlanFile {
    /// File to read.
    path: PathBuf,
    /// Layout of the file.
    encoding: PlanEncoding,
}

impl PlanFile {
    /// Creates a source for a rendered `show -json` document.
    #[must_use]
    pub fn document(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encoding: PlanEncoding::Document,
        }
    }

    /// Creates a source for captured `plan -json` output.
    #[must_use]
    pub fn log(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encoding: PlanEncoding::Log,
        }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PlanSource for PlanFile {
    async fn fetch(&self) -> Result<String> {
        info!("Reading plan from: {}", self.path.display());

        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SummaryError::Plan(PlanError::NotFound {
                    path: self.path.clone(),
                })
            } else {
                SummaryError::Io(e)
            }
        })
    }

    fn encoding(&self) -> PlanEncoding {
        self.encoding
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Creates the plan source selected by the configuration.
#[must_use]
pub fn source_for(config: &SummaryConfig) -> Box<dyn PlanSource> {
    match config.input {
        PlanInput::Show => Box::new(TerraformShow::new(
            config.terraform_bin.clone(),
            config.plan_file.clone(),
        )),
        PlanInput::Json => Box::new(PlanFile::document(config.plan_file.clone())),
        PlanInput::Log => Box::new(PlanFile::log(config.plan_file.clone())),
    }
}
