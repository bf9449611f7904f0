//! External command execution for `cmdlin`/`cmdwin`.
//!
//! The working directory is passed explicitly to the spawned process, so
//! no process-wide chdir save/restore is needed. Stdout is captured for
//! diagnostic logging; stderr passes straight through to the host's error
//! stream.

use anyhow::{Context as _, Result, bail};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::mode::Mode;

/// Result of a command execution.
#[derive(Debug)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Whether the command exited successfully.
    pub success: bool,
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Replace the mode-specific directory placeholders in a command line with
/// absolute paths.
///
/// Install: `$srcdir` (and the legacy `$srcDir` spelling) and `$destdir`.
/// Remove: `$pkg` for the installation root. Update: `$oldpkg` for the old
/// package source and `$newpkg` for the root.
#[must_use]
pub fn substitute(line: &str, mode: Mode, source_dir: Option<&Path>, root: &Path) -> String {
    let root = absolute(root);
    let src = source_dir.map(absolute).unwrap_or_default();
    let root = root.display().to_string();
    let src = src.display().to_string();
    match mode {
        Mode::Install => line
            .replace("$srcdir", &src)
            .replace("$srcDir", &src)
            .replace("$destdir", &root),
        Mode::Remove => line.replace("$pkg", &root),
        Mode::Update => line.replace("$oldpkg", &src).replace("$newpkg", &root),
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Run a whitespace-split command line in `workdir`, bailing on non-zero
/// exit. The first word is the program; the rest are its arguments.
///
/// # Errors
///
/// Returns an error if the line is empty, the program fails to launch, or
/// it exits non-zero.
pub fn run_line(line: &str, workdir: &Path) -> Result<ExecResult> {
    let mut words = line.split_whitespace();
    let Some(program) = words.next() else {
        bail!("empty command line");
    };
    let output = Command::new(program)
        .args(words)
        .current_dir(workdir)
        .stderr(Stdio::inherit())
        .output()
        .with_context(|| format!("failed to execute: {program}"))?;
    let result = ExecResult::from(output);
    if !result.success {
        bail!("{line:?} failed (exit {})", result.code.unwrap_or(-1));
    }
    Ok(result)
}
