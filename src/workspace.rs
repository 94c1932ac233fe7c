//! Working-directory scoping for lint engine invocations.
//!
//! The process-wide working directory is a single global slot. Some engine
//! configurations resolve relative paths from it, so an invocation may need
//! to run "as if" rooted at the document's workspace. [`ScopedCwd`] confines
//! that mutation: whatever happens inside the callback, the entry directory
//! is back in place before control returns to the caller.

use std::env;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use tower_lsp::lsp_types::Url;

use crate::config::TextDocumentSettings;
use crate::fixer::{FixOptions, FixerError};
use crate::utils::paths::{file_system_path, is_unc};

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("failed to read the current working directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("failed to change working directory to {path}: {source}")]
    Chdir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Fix(#[from] FixerError),
}

/// Restores the working directory captured at construction when dropped.
///
/// Restoration compares by value: the drop handler only chdirs when the
/// current directory differs from the captured one, so a guard that never
/// moved is free. Drop runs on success, error, and panic alike.
#[derive(Debug)]
pub struct ScopedCwd {
    original: PathBuf,
}

impl ScopedCwd {
    /// Capture the current working directory.
    pub fn capture() -> Result<Self, WorkspaceError> {
        let original = env::current_dir().map_err(WorkspaceError::CurrentDir)?;
        Ok(Self { original })
    }

    /// Change the process-wide working directory.
    pub fn change_to(&self, dir: &Path) -> Result<(), WorkspaceError> {
        env::set_current_dir(dir).map_err(|source| WorkspaceError::Chdir {
            path: dir.to_path_buf(),
            source,
        })
    }

    /// The directory that will be restored on drop.
    pub fn original(&self) -> &Path {
        &self.original
    }
}

impl Drop for ScopedCwd {
    fn drop(&mut self) {
        match env::current_dir() {
            Ok(current) if current == self.original => {}
            _ => {
                if let Err(e) = env::set_current_dir(&self.original) {
                    log::warn!(
                        "failed to restore working directory to {}: {e}",
                        self.original.display()
                    );
                }
            }
        }
    }
}

/// Run `callback` under the working directory the document's settings call
/// for, restoring the process-wide directory afterwards.
///
/// The directory decision, first match wins:
///
/// 1. The URI has no filesystem path: no directory handling at all.
/// 2. An explicit `workingDirectory` setting: `options.cwd` is set to it,
///    and the process chdirs there when `changeProcessCWD` is on.
/// 3. A `file:`-scheme workspace folder: `options.cwd` and the process
///    directory both move there.
/// 4. No workspace folder and a non-UNC filename: `options.cwd` becomes the
///    file's parent directory when that parent is absolute. No process chdir.
/// 5. A UNC filename with nothing else configured: no override. A UNC share
///    is not a usable process working directory on Windows.
///
/// The callback runs exactly once and its error propagates after the
/// directory is restored. The process working directory is global state, so
/// concurrent invocations must be serialized by the caller.
pub async fn execute_in_workspace_directory<T, F, Fut>(
    uri: &Url,
    settings: &TextDocumentSettings,
    options: &mut FixOptions,
    callback: F,
) -> Result<T, WorkspaceError>
where
    F: FnOnce(Option<PathBuf>, FixOptions) -> Fut,
    Fut: Future<Output = Result<T, FixerError>>,
{
    let Some(filename) = file_system_path(uri) else {
        return Ok(callback(None, options.clone()).await?);
    };

    let guard = ScopedCwd::capture()?;

    if let Some(working_directory) = &settings.working_directory {
        options.cwd = Some(working_directory.directory.clone());
        if working_directory.change_process_cwd {
            guard.change_to(&working_directory.directory)?;
        }
    } else if let Some(folder) = &settings.workspace_folder {
        if let Some(folder_path) = file_system_path(&folder.uri) {
            options.cwd = Some(folder_path.clone());
            guard.change_to(&folder_path)?;
        }
    } else if !is_unc(&filename.to_string_lossy()) {
        if let Some(parent) = filename.parent()
            && parent.is_absolute()
        {
            options.cwd = Some(parent.to_path_buf());
        }
    }

    let result = callback(Some(filename), options.clone()).await;
    drop(guard);
    Ok(result?)
}
