//! LSP-specific types and conversions.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::*;

use crate::config::WorkingDirectory;
use crate::diff::Change;
use crate::utils::range_utils::LineIndex;

/// Configuration for the language server, received as initialization options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchedLspConfig {
    /// Explicit path to the lint engine executable. Skips discovery.
    pub executable_path: Option<String>,

    /// Global packages directory to resolve the engine library from when it
    /// is not installed in the workspace.
    pub node_path: Option<String>,

    /// Enable/disable validation and fixing entirely.
    pub validate: bool,

    /// Apply fixes automatically when a document is saved.
    pub fix_on_save: bool,

    /// Working-directory policy for engine invocations.
    pub working_directory: Option<WorkingDirectory>,
}

impl Default for PatchedLspConfig {
    fn default() -> Self {
        Self {
            executable_path: None,
            node_path: None,
            validate: true,
            fix_on_save: false,
            working_directory: None,
        }
    }
}

/// Convert a computed change into an LSP text edit for the given document.
pub fn change_to_text_edit(index: &LineIndex, change: &Change) -> TextEdit {
    TextEdit {
        range: Range {
            start: index.offset_to_position(change.start),
            end: index.offset_to_position(change.end),
        },
        new_text: change.new_text.clone(),
    }
}

/// Build the fix-all code action carrying the document's edits.
pub fn fix_all_code_action(uri: &Url, edits: Vec<TextEdit>) -> CodeAction {
    let mut changes = std::collections::HashMap::new();
    changes.insert(uri.clone(), edits);

    CodeAction {
        title: "Fix all auto-fixable problems".to_string(),
        kind: Some(CodeActionKind::SOURCE_FIX_ALL),
        diagnostics: None,
        edit: Some(WorkspaceEdit {
            changes: Some(changes),
            document_changes: None,
            change_annotations: None,
        }),
        command: None,
        is_preferred: Some(true),
        disabled: None,
        data: None,
    }
}
