//! The lint engine as an injected capability.
//!
//! The server never links the engine in; it talks to it through the [`Fixer`]
//! trait. Production uses [`CliFixer`], which pipes a document through the
//! `patched` binary; tests substitute their own implementations.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Options forwarded to a lint engine invocation.
///
/// Only `fix` and `cwd` are ever written by this crate; `extra` carries any
/// further engine configuration opaquely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixOptions {
    /// Ask the engine to apply automatic fixes.
    pub fix: bool,

    /// Directory the engine should resolve relative paths against.
    pub cwd: Option<PathBuf>,

    /// Engine-specific configuration, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Result of running the engine over one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixOutcome {
    /// The fixed document content, or `None` when the engine had nothing to
    /// fix. Absence of output is an expected outcome, not an error.
    pub output: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum FixerError {
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("i/o error talking to `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` produced non-UTF-8 output")]
    NonUtf8Output { program: String },
}

/// Capability boundary around the external lint engine.
#[tower_lsp::async_trait]
pub trait Fixer: Send + Sync {
    /// Lint `content` and return the auto-fixed text, if any.
    ///
    /// `filename` identifies the document on disk so the engine can pick up
    /// file-relative configuration; it may be absent for untitled documents.
    async fn fix_text(
        &self,
        content: &str,
        filename: Option<&Path>,
        options: &FixOptions,
    ) -> Result<FixOutcome, FixerError>;
}

/// Runs the `patched` executable over stdin/stdout.
#[derive(Debug, Clone)]
pub struct CliFixer {
    executable: PathBuf,
}

impl CliFixer {
    pub fn new(executable: PathBuf) -> Self {
        Self { executable }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn program(&self) -> String {
        self.executable.display().to_string()
    }
}

#[tower_lsp::async_trait]
impl Fixer for CliFixer {
    async fn fix_text(
        &self,
        content: &str,
        filename: Option<&Path>,
        options: &FixOptions,
    ) -> Result<FixOutcome, FixerError> {
        let mut command = Command::new(&self.executable);
        command.arg("--stdin");
        if options.fix {
            command.arg("--fix");
        }
        if let Some(filename) = filename {
            command.arg("--stdin-filename").arg(filename);
        }
        // The target directory goes to the child directly; the parent's cwd
        // stays out of the engine's view unless the caller chdir'd on purpose.
        if let Some(cwd) = &options.cwd {
            command.current_dir(cwd);
        }
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|source| FixerError::Spawn {
            program: self.program(),
            source,
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(content.as_bytes()).await {
                Ok(()) => {}
                // The engine may exit before draining stdin; its status and
                // output still decide the outcome below.
                Err(source) if source.kind() == io::ErrorKind::BrokenPipe => {}
                Err(source) => {
                    return Err(FixerError::Io {
                        program: self.program(),
                        source,
                    });
                }
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|source| FixerError::Io {
                program: self.program(),
                source,
            })?;

        if !output.status.success() || output.stdout.is_empty() {
            log::debug!(
                "`{}` exited with {} and {} bytes of output; treating as nothing to fix",
                self.program(),
                output.status,
                output.stdout.len()
            );
            return Ok(FixOutcome::default());
        }

        let fixed = String::from_utf8(output.stdout).map_err(|_| FixerError::NonUtf8Output {
            program: self.program(),
        })?;

        Ok(FixOutcome { output: Some(fixed) })
    }
}
