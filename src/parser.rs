//! The script execution state machine.
//!
//! A [`Parser`] is bound to one script and one installation root. A call
//! to [`Parser::start`] streams tokens from the beginning of the script,
//! locates the section for the requested [`Mode`] (`flag <section>`), and
//! executes commands one by one until the next section marker or end of
//! input, failing fast on the first malformed command or failed side
//! effect. Already-applied effects are never rolled back; the command set
//! is idempotent enough ("create if absent", "remove if present") that
//! re-running a fixed script is safe for most commands.

use anyhow::{Context as _, Result, bail};
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::command::ScriptCommand;
use crate::error::{ConfigError, SyntaxError};
use crate::exec;
use crate::fsops;
use crate::mode::Mode;
use crate::paths;
use crate::scanner::{Scanner, Token};

/// Hidden directory under the installation root holding engine state.
const STATE_DIR: &str = ".ira";
/// Append-only activation audit log inside the state directory.
const ACTIVATE_LOG: &str = "activate.log";

/// Script execution engine bound to a script file and an installation root.
///
/// At most one [`start`](Self::start) or [`reset`](Self::reset) call may be
/// in flight per instance; a concurrent call fails immediately with
/// [`ConfigError::Busy`] instead of blocking.
#[derive(Debug)]
pub struct Parser {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    source: String,
    root: PathBuf,
}

impl Inner {
    fn load(script: &Path, root: &Path) -> Result<Self, ConfigError> {
        let source =
            fs::read_to_string(script).map_err(|source| ConfigError::ScriptUnreadable {
                path: script.display().to_string(),
                source,
            })?;
        if !root.exists() {
            return Err(ConfigError::RootMissing(root.display().to_string()));
        }
        Ok(Self {
            source,
            root: root.to_path_buf(),
        })
    }
}

impl Parser {
    /// Open `script` and bind the engine to `root`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the script cannot be read or the
    /// installation root does not exist.
    pub fn new(script: &Path, root: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Mutex::new(Inner::load(script, root)?),
        })
    }

    /// Point an idle instance at a new script and installation root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Busy`] if a run is in flight, or the same
    /// validation errors as [`Parser::new`].
    pub fn reset(&self, script: &Path, root: &Path) -> Result<(), ConfigError> {
        let mut guard = self.inner.try_lock().map_err(|_| ConfigError::Busy)?;
        *guard = Inner::load(script, root)?;
        Ok(())
    }

    /// Execute the script section for `mode`.
    ///
    /// Tokens are streamed from the beginning of the script; everything
    /// before `flag <section>` is ignored. A script without a matching
    /// section completes successfully with no commands executed.
    /// Re-encountering any `flag` marker while executing ends the section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Busy`] when another call holds the instance,
    /// a configuration error for source-directory precondition violations,
    /// and otherwise the first syntax, path-safety, filesystem, or process
    /// error encountered. Prior effects of the same run are not rolled
    /// back.
    pub fn start(&self, mode: Mode, source_dir: Option<&Path>) -> Result<()> {
        let inner = self.inner.try_lock().map_err(|_| ConfigError::Busy)?;
        mode.check_source(source_dir)?;

        let run = Run {
            root: &inner.root,
            mode,
            source_dir,
        };
        let mut scanner = Scanner::new(&inner.source);

        if !seek_section(&mut scanner, mode.section_name())? {
            return Ok(());
        }
        loop {
            match scanner.next_token()? {
                Token::Eof => return Ok(()),
                // Any further section marker ends this section.
                Token::Ident(name) if name == "flag" => return Ok(()),
                Token::Ident(name) => {
                    let command = ScriptCommand::parse(&name, &mut scanner)?;
                    if !command.allowed_in(mode) {
                        return Err(SyntaxError::NotAllowed {
                            command: command.name(),
                            mode,
                        }
                        .into());
                    }
                    run.execute(&command)?;
                }
                _ => {}
            }
        }
    }
}

/// Advance the scanner past `flag <section>`; `false` means the script has
/// no such section.
fn seek_section(scanner: &mut Scanner<'_>, section: &str) -> Result<bool> {
    loop {
        match scanner.next_token()? {
            Token::Eof => return Ok(false),
            Token::Ident(name) if name == "flag" => {
                if let Token::Ident(found) = scanner.next_token()? {
                    if found == section {
                        return Ok(true);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Per-run execution context: the validated configuration one `start`
/// call operates under.
struct Run<'a> {
    root: &'a Path,
    mode: Mode,
    source_dir: Option<&'a Path>,
}

impl Run<'_> {
    fn execute(&self, command: &ScriptCommand) -> Result<()> {
        match command {
            ScriptCommand::UnixShell(line) => {
                if cfg!(unix) {
                    self.shell(line)
                } else {
                    Ok(())
                }
            }
            ScriptCommand::WindowsShell(line) => {
                if cfg!(windows) {
                    self.shell(line)
                } else {
                    Ok(())
                }
            }
            ScriptCommand::Install { perm, dest, src } => self.install(*perm, dest, src),
            ScriptCommand::Activate { installed, target } => self.activate(installed, target),
            ScriptCommand::Remove(path) => {
                fsops::remove_all(&self.root.join(paths::validate(path)?))
            }
            ScriptCommand::Mkdir { path, perm } => {
                fsops::create_dir_if_absent(&self.root.join(paths::validate(path)?), *perm)
            }
            ScriptCommand::Print(text) => {
                tracing::info!("{text}");
                Ok(())
            }
        }
    }

    /// Run an external command in the mode's working directory: the package
    /// source for install/update, the installation root for remove.
    fn shell(&self, line: &str) -> Result<()> {
        let line = exec::substitute(line, self.mode, self.source_dir, self.root);
        let workdir = self.source_dir.unwrap_or(self.root);
        let result = exec::run_line(&line, workdir)?;
        if !result.stdout.is_empty() {
            tracing::info!("{}", result.stdout.trim_end());
        }
        Ok(())
    }

    fn install(&self, perm: u32, dest: &str, src: &str) -> Result<()> {
        let dest = self.root.join(paths::validate(dest)?);
        if let Some(parent) = dest.parent() {
            fsops::create_dir_if_absent(parent, perm)
                .with_context(|| format!("creating destination dir for {}", dest.display()))?;
        }

        let source_dir = self
            .source_dir
            .context("install command requires a source directory")?;
        let src = source_dir.join(paths::validate(src)?);
        let meta = src
            .symlink_metadata()
            .with_context(|| format!("source {} doesn't exist", src.display()))?;

        let copied = if meta.is_dir() {
            fsops::copy_dir_recursive(&src, &dest)
        } else if meta.file_type().is_symlink() {
            fsops::copy_symlink(&src, &dest)
        } else {
            fsops::copy_file(&src, &dest)
        };
        copied.with_context(|| format!("copying {} to {}", src.display(), dest.display()))
    }

    /// Append to the activation log, then create a symlink at the absolute
    /// `target` pointing to the installed path.
    fn activate(&self, installed: &str, target: &str) -> Result<()> {
        let installed = self.root.join(paths::validate(installed)?);
        let target_path = Path::new(target);
        if !target_path.is_absolute() {
            bail!("activation target {target:?} must be an absolute path");
        }

        let state_dir = self.root.join(STATE_DIR);
        fsops::create_dir_if_absent(&state_dir, 0o755)?;
        let log_path = state_dir.join(ACTIVATE_LOG);
        let mut log = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("opening activation log {}", log_path.display()))?;
        writeln!(log, "{}|{target}", installed.display())
            .with_context(|| format!("writing activation log {}", log_path.display()))?;

        fsops::create_symlink(&installed, target_path)
    }
}
