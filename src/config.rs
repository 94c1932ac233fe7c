//! Per-document settings driving validation and working-directory policy.
//!
//! These structures mirror the configuration payloads an editor sends for a
//! document: whether the document should be validated at all, and which
//! directory the lint engine must run under.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::WorkspaceFolder;

/// An explicitly configured working directory for lint engine invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingDirectory {
    /// Directory the engine should resolve relative paths against.
    pub directory: PathBuf,

    /// Also change the process-wide working directory for the duration of
    /// the invocation. Needed for engines whose plugins resolve paths from
    /// the ambient cwd instead of honoring an explicit option.
    #[serde(rename = "changeProcessCWD", default)]
    pub change_process_cwd: bool,
}

/// Effective settings for a single text document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDocumentSettings {
    /// Whether the document should be validated and fixed at all.
    pub validate: bool,

    /// Explicit working-directory policy. Takes precedence over the
    /// workspace folder.
    pub working_directory: Option<WorkingDirectory>,

    /// The workspace folder the document belongs to, if any.
    pub workspace_folder: Option<WorkspaceFolder>,
}

impl Default for TextDocumentSettings {
    fn default() -> Self {
        Self {
            validate: true,
            working_directory: None,
            workspace_folder: None,
        }
    }
}
