//! Language Server Protocol server wiring the fix pipeline to an editor.
//!
//! The server tracks open documents, discovers the lint engine once, and
//! answers formatting and code-action requests with the single minimal edit
//! computed from the engine's fixed output.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result as JsonRpcResult;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::config::TextDocumentSettings;
use crate::diff::compute_change;
use crate::fixer::{CliFixer, FixOptions, Fixer};
use crate::locate::{TOOL_NAME, find_patched, resolve_module};
use crate::lsp::types::{PatchedLspConfig, change_to_text_edit, fix_all_code_action};
use crate::utils::paths::file_system_path;
use crate::utils::range_utils::LineIndex;
use crate::workspace::execute_in_workspace_directory;

/// Language server for the `patched` lint engine.
pub struct PatchedLanguageServer {
    client: Client,
    /// Configuration received as initialization options
    config: Arc<RwLock<PatchedLspConfig>>,
    /// The workspace folder the server was opened on, if any
    workspace_folder: Arc<RwLock<Option<WorkspaceFolder>>>,
    /// Document store for open files
    documents: Arc<RwLock<HashMap<Url, String>>>,
    /// The lint engine, once discovered or injected
    fixer: Arc<RwLock<Option<Arc<dyn Fixer>>>>,
}

impl PatchedLanguageServer {
    /// Create a server. Passing a fixer skips engine discovery; tests use
    /// this to substitute a stub engine.
    pub fn new(client: Client, fixer: Option<Arc<dyn Fixer>>) -> Self {
        Self {
            client,
            config: Arc::new(RwLock::new(PatchedLspConfig::default())),
            workspace_folder: Arc::new(RwLock::new(None)),
            documents: Arc::new(RwLock::new(HashMap::new())),
            fixer: Arc::new(RwLock::new(fixer)),
        }
    }

    /// Root directory used for engine discovery and module resolution.
    async fn workspace_root(&self) -> Option<PathBuf> {
        let folder = self.workspace_folder.read().await;
        folder.as_ref().and_then(|f| file_system_path(&f.uri))
    }

    /// Discover the lint engine unless one is already present.
    ///
    /// Order: the configured executable path, the engine library under the
    /// configured global packages path, then the well-known executable
    /// locations. Coming up empty leaves fixing disabled; it is not an error.
    async fn ensure_fixer(&self) {
        if self.fixer.read().await.is_some() {
            return;
        }

        let config = self.config.read().await.clone();
        let root = self.workspace_root().await;

        let executable = if let Some(path) = &config.executable_path {
            Some(PathBuf::from(path))
        } else if let Some(node_path) = &config.node_path {
            match resolve_module(TOOL_NAME, root.as_deref(), Path::new(node_path)).await {
                Ok(library) => Some(library.join("bin").join("patched.js")),
                Err(e) => {
                    log::warn!("engine library resolution failed: {e}");
                    None
                }
            }
        } else {
            let root = root.unwrap_or_else(|| PathBuf::from("."));
            find_patched(&root).await
        };

        match executable {
            Some(executable) => {
                log::info!("using {TOOL_NAME} executable at {}", executable.display());
                *self.fixer.write().await = Some(Arc::new(CliFixer::new(executable)));
            }
            None => {
                log::warn!("no {TOOL_NAME} executable found; fixing is disabled");
                self.client
                    .log_message(
                        MessageType::WARNING,
                        format!("No {TOOL_NAME} executable found; fixes are unavailable"),
                    )
                    .await;
            }
        }
    }

    /// Settings in effect for any document of this workspace.
    async fn document_settings(&self) -> TextDocumentSettings {
        let config = self.config.read().await;
        TextDocumentSettings {
            validate: config.validate,
            working_directory: config.working_directory.clone(),
            workspace_folder: self.workspace_folder.read().await.clone(),
        }
    }

    /// Run the engine over a document and reduce its output to at most one
    /// text edit.
    async fn fix_document(&self, uri: &Url, text: &str) -> Result<Vec<TextEdit>> {
        let settings = self.document_settings().await;
        if !settings.validate {
            return Ok(Vec::new());
        }

        let Some(fixer) = self.fixer.read().await.clone() else {
            return Ok(Vec::new());
        };

        let mut options = FixOptions {
            fix: true,
            ..Default::default()
        };

        let content = text.to_string();
        let outcome =
            execute_in_workspace_directory(uri, &settings, &mut options, move |filename, options| {
                async move { fixer.fix_text(&content, filename.as_deref(), &options).await }
            })
            .await?;

        let Some(output) = outcome.output else {
            return Ok(Vec::new());
        };
        let Some(change) = compute_change(text, &output) else {
            return Ok(Vec::new());
        };

        let index = LineIndex::new(text.to_string());
        Ok(vec![change_to_text_edit(&index, &change)])
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for PatchedLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> JsonRpcResult<InitializeResult> {
        log::info!("initializing {TOOL_NAME} language server");

        if let Some(options) = params.initialization_options {
            match serde_json::from_value::<PatchedLspConfig>(options) {
                Ok(config) => *self.config.write().await = config,
                Err(e) => log::warn!("invalid initialization options: {e}"),
            }
        }

        if let Some(folders) = params.workspace_folders {
            *self.workspace_folder.write().await = folders.into_iter().next();
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                document_formatting_provider: Some(OneOf::Left(true)),
                code_action_provider: Some(CodeActionProviderCapability::Simple(true)),
                workspace: Some(WorkspaceServerCapabilities {
                    workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                        supported: Some(true),
                        change_notifications: Some(OneOf::Left(true)),
                    }),
                    file_operations: None,
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "patched-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.ensure_fixer().await;

        self.client
            .log_message(MessageType::INFO, "patched language server started")
            .await;
    }

    async fn shutdown(&self) -> JsonRpcResult<()> {
        log::info!("shutting down {TOOL_NAME} language server");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.documents
            .write()
            .await
            .insert(params.text_document.uri, params.text_document.text);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // Full sync: the last change carries the whole document.
        if let Some(change) = params.content_changes.into_iter().next() {
            self.documents
                .write()
                .await
                .insert(params.text_document.uri, change.text);
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        if !self.config.read().await.fix_on_save {
            return;
        }

        let uri = params.text_document.uri;
        let Some(text) = self.documents.read().await.get(&uri).cloned() else {
            return;
        };

        match self.fix_document(&uri, &text).await {
            Ok(edits) if !edits.is_empty() => {
                let mut changes = HashMap::new();
                changes.insert(uri, edits);
                let edit = WorkspaceEdit {
                    changes: Some(changes),
                    document_changes: None,
                    change_annotations: None,
                };
                if let Err(e) = self.client.apply_edit(edit).await {
                    log::error!("failed to apply fix on save: {e}");
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("fix on save failed: {e}"),
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.write().await.remove(&params.text_document.uri);
    }

    async fn formatting(
        &self,
        params: DocumentFormattingParams,
    ) -> JsonRpcResult<Option<Vec<TextEdit>>> {
        let uri = params.text_document.uri;
        let Some(text) = self.documents.read().await.get(&uri).cloned() else {
            return Ok(None);
        };

        match self.fix_document(&uri, &text).await {
            Ok(edits) if !edits.is_empty() => Ok(Some(edits)),
            Ok(_) => Ok(None),
            Err(e) => {
                log::error!("formatting failed for {uri}: {e}");
                Ok(None)
            }
        }
    }

    async fn code_action(
        &self,
        params: CodeActionParams,
    ) -> JsonRpcResult<Option<CodeActionResponse>> {
        let uri = params.text_document.uri;
        let Some(text) = self.documents.read().await.get(&uri).cloned() else {
            return Ok(None);
        };

        match self.fix_document(&uri, &text).await {
            Ok(edits) if !edits.is_empty() => {
                let action = fix_all_code_action(&uri, edits);
                Ok(Some(vec![CodeActionOrCommand::CodeAction(action)]))
            }
            Ok(_) => Ok(None),
            Err(e) => {
                log::error!("code action failed for {uri}: {e}");
                Ok(None)
            }
        }
    }
}
