//! Path containment validation.
//!
//! Every script-supplied path must pass through [`validate`] before it is
//! joined with the installation root (destinations, symlink sources) or the
//! package source directory (copy sources). The check is a pure string
//! computation; it never consults the filesystem.

use std::path::PathBuf;

use crate::error::PathError;

/// Validate a script-supplied relative path and normalize it.
///
/// Backslash separators are rewritten to forward slashes and a single
/// leading separator is stripped, so `"\\bin\\tool"` and `"/bin/tool"` are
/// both treated as `"bin/tool"`. The path is then walked segment by
/// segment with a depth counter: every ordinary segment (including `.` and
/// empty segments from doubled separators) counts +1, every `..` counts
/// −1. The path is accepted only if the final depth is ≥ 0, and the
/// accepted output is the cleaned relative path with `.` and redundant
/// separators removed and `..` segments resolved.
///
/// Note the rule only constrains the *final* depth: a path like
/// `a/../../b` transiently escapes the root and comes back to depth 0, so
/// it is accepted and normalizes to `../b`. This matches the historical
/// behavior; callers must not treat acceptance as proof that every prefix
/// stays inside the root.
///
/// # Errors
///
/// Returns [`PathError::Escape`] when the cumulative parent references
/// outnumber the ordinary segments.
pub fn validate(path: &str) -> Result<PathBuf, PathError> {
    let unified = path.replace('\\', "/");
    let relative = unified.strip_prefix('/').unwrap_or(&unified);

    let mut depth: i64 = 0;
    let mut cleaned: Vec<&str> = Vec::new();
    for segment in relative.split('/') {
        if segment == ".." {
            depth -= 1;
            // Resolve against the last real segment; leading `..` survives.
            if matches!(cleaned.last(), None | Some(&"..")) {
                cleaned.push("..");
            } else {
                cleaned.pop();
            }
        } else {
            depth += 1;
            if !segment.is_empty() && segment != "." {
                cleaned.push(segment);
            }
        }
    }

    if depth < 0 {
        return Err(PathError::Escape(path.to_string()));
    }
    Ok(PathBuf::from(cleaned.join("/")))
}
