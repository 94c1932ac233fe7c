//! Filesystem path helpers for document URIs.

use std::path::PathBuf;

use url::Url;

/// Check whether a path is a Windows UNC share path (`\\host\share\...`).
///
/// Always false on non-Windows platforms.
pub fn is_unc(path: &str) -> bool {
    is_unc_path(path, cfg!(windows))
}

fn is_unc_path(path: &str, windows_like: bool) -> bool {
    if !windows_like {
        return false;
    }
    // Shortest possible UNC path is \\a\b (5 bytes).
    let bytes = path.as_bytes();
    if bytes.len() < 5 {
        return false;
    }
    if bytes[0] != b'\\' || bytes[1] != b'\\' {
        return false;
    }

    // Hostname segment must be non-empty and terminated by a separator.
    let mut pos = 2;
    while pos < bytes.len() && bytes[pos] != b'\\' {
        pos += 1;
    }
    if pos == 2 {
        return false;
    }

    // The share name must start with a non-separator character.
    match bytes.get(pos + 1) {
        Some(b'\\') | None => false,
        Some(_) => true,
    }
}

/// Convert a `file:`-scheme URI into a native filesystem path.
///
/// Returns `None` for any other scheme. On Windows a lowercase drive letter
/// is uppercased: editors may hand us `c:\foo` while the lint engine compares
/// paths by exact string equality, so `c:` and `C:` would otherwise read as
/// two different locations.
pub fn file_system_path(uri: &Url) -> Option<PathBuf> {
    if uri.scheme() != "file" {
        return None;
    }
    let path = uri.to_file_path().ok()?;
    Some(normalize_drive_letter(path, cfg!(windows)))
}

fn normalize_drive_letter(path: PathBuf, windows_like: bool) -> PathBuf {
    if !windows_like {
        return path;
    }
    let Some(s) = path.to_str() else {
        return path;
    };
    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_lowercase() {
        let mut normalized = s.to_string();
        normalized[..1].make_ascii_uppercase();
        return PathBuf::from(normalized);
    }
    path
}
