pub mod config;
pub mod diff;
pub mod exit_codes;
pub mod fixer;
pub mod locate;
pub mod lsp;
pub mod utils;
pub mod workspace;

pub use crate::config::{TextDocumentSettings, WorkingDirectory};
pub use crate::diff::{Change, compute_change};
pub use crate::fixer::{CliFixer, FixOptions, FixOutcome, Fixer, FixerError};
pub use crate::locate::{LocateError, TOOL_NAME, find_patched, resolve_module};
pub use crate::utils::paths::{file_system_path, is_unc};
pub use crate::workspace::{ScopedCwd, WorkspaceError, execute_in_workspace_directory};
