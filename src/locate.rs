//! Discovery of the `patched` executable and its library installation.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Name of the external lint engine's executable.
pub const TOOL_NAME: &str = "patched";

#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("module `{name}` not found under global packages path {global}")]
    ModuleNotFound { name: String, global: PathBuf },
}

/// Locate the `patched` executable for a project rooted at `root`.
///
/// Checked in order: the project-local `node_modules/.bin` launcher
/// (`patched.cmd` on Windows, `patched` elsewhere), the pnpify shim used by
/// virtual-filesystem package managers, and finally a `PATH` scan. `None`
/// means the tool is unavailable, which callers treat as a degraded mode
/// rather than an error.
pub async fn find_patched(root: &Path) -> Option<PathBuf> {
    let launcher = if cfg!(windows) { "patched.cmd" } else { TOOL_NAME };

    let candidates = [
        root.join("node_modules").join(".bin").join(launcher),
        root.join(".vscode")
            .join("pnpify")
            .join(TOOL_NAME)
            .join("bin")
            .join("patched.js"),
    ];

    for candidate in candidates {
        if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
            log::debug!("found {TOOL_NAME} at {}", candidate.display());
            return Some(candidate);
        }
    }

    find_in_path(TOOL_NAME, env::var_os("PATH")).await
}

/// Scan a `PATH`-style variable for an executable with the given name.
async fn find_in_path(name: &str, path_var: Option<OsString>) -> Option<PathBuf> {
    let path_var = path_var?;
    for dir in env::split_paths(&path_var) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        let candidate = dir.join(name);
        if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
            log::debug!("found {name} on PATH at {}", candidate.display());
            return Some(candidate);
        }
    }
    None
}

/// Resolve the installation directory of a named module.
///
/// The project-local `node_modules` tree is tried first; absence there is
/// expected and stays silent. The global packages path is the fallback, and
/// a miss there is an error the caller has to deal with.
pub async fn resolve_module(
    name: &str,
    local_root: Option<&Path>,
    global_root: &Path,
) -> Result<PathBuf, LocateError> {
    if let Some(local) = local_root {
        let candidate = local.join("node_modules").join(name);
        if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
            return Ok(candidate);
        }
        log::debug!("module `{name}` not installed under {}", local.display());
    }

    let candidate = global_root.join(name);
    if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
        return Ok(candidate);
    }

    Err(LocateError::ModuleNotFound {
        name: name.to_string(),
        global: global_root.to_path_buf(),
    })
}
