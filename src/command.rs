//! Token-to-command translation.
//!
//! Each script command is translated into a [`ScriptCommand`] variant
//! carrying its fixed-arity, fixed-type argument list before any handler
//! runs, so malformed scripts are rejected uniformly with a syntax error
//! naming the command and the offending token.

use crate::error::SyntaxError;
use crate::mode::Mode;
use crate::scanner::{Scanner, Token};

/// A fully parsed script command, ready for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// `cmdlin "<line>"` — shell command executed on Unix-like hosts only.
    UnixShell(String),
    /// `cmdwin "<line>"` — shell command executed on Windows only.
    WindowsShell(String),
    /// `install <octal> "<dest>" "<src>"` — copy a file, symlink, or
    /// directory tree from the package source into the installation root.
    Install {
        /// Permission bits for the destination's parent directory.
        perm: u32,
        /// Destination path, relative to the installation root.
        dest: String,
        /// Source path, relative to the package source directory.
        src: String,
    },
    /// `activate "<installed>" "<target>"` — symlink an installed path
    /// from an absolute location, recording it in the activation log.
    Activate {
        /// Installed path, relative to the installation root.
        installed: String,
        /// Absolute location at which the symlink is created.
        target: String,
    },
    /// `remove "<path>"` — recursively delete a root-relative path.
    Remove(String),
    /// `mkdir "<path>" <octal>` — create a root-relative directory.
    Mkdir {
        /// Directory path, relative to the installation root.
        path: String,
        /// Permission bits for the directory and missing ancestors.
        perm: u32,
    },
    /// `print "<text>"` — write text to the diagnostic output stream.
    Print(String),
}

impl ScriptCommand {
    /// Translate the command named `name` by consuming its arguments from
    /// the token stream.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnknownCommand`] for an unrecognized name and
    /// [`SyntaxError::UnexpectedToken`] / [`SyntaxError::BadOctal`] when an
    /// argument has the wrong kind.
    pub fn parse(name: &str, scanner: &mut Scanner<'_>) -> Result<Self, SyntaxError> {
        match name {
            "cmdlin" => Ok(Self::UnixShell(expect_string(scanner, "cmdlin")?)),
            "cmdwin" => Ok(Self::WindowsShell(expect_string(scanner, "cmdwin")?)),
            "install" => {
                let perm = expect_octal(scanner, "install")?;
                let dest = expect_string(scanner, "install")?;
                let src = expect_string(scanner, "install")?;
                Ok(Self::Install { perm, dest, src })
            }
            "activate" => {
                let installed = expect_string(scanner, "activate")?;
                let target = expect_string(scanner, "activate")?;
                Ok(Self::Activate { installed, target })
            }
            "remove" => Ok(Self::Remove(expect_string(scanner, "remove")?)),
            "mkdir" => {
                let path = expect_string(scanner, "mkdir")?;
                let perm = expect_octal(scanner, "mkdir")?;
                Ok(Self::Mkdir { path, perm })
            }
            "print" => Ok(Self::Print(expect_string(scanner, "print")?)),
            other => Err(SyntaxError::UnknownCommand(other.to_string())),
        }
    }

    /// The command's script-level name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UnixShell(_) => "cmdlin",
            Self::WindowsShell(_) => "cmdwin",
            Self::Install { .. } => "install",
            Self::Activate { .. } => "activate",
            Self::Remove(_) => "remove",
            Self::Mkdir { .. } => "mkdir",
            Self::Print(_) => "print",
        }
    }

    /// Whether this command is legal in `mode`.
    ///
    /// `install` and `activate` are install-only, `remove` is remove-only;
    /// shell commands, `mkdir`, and `print` run in any mode.
    #[must_use]
    pub const fn allowed_in(&self, mode: Mode) -> bool {
        match self {
            Self::Install { .. } | Self::Activate { .. } => matches!(mode, Mode::Install),
            Self::Remove(_) => matches!(mode, Mode::Remove),
            Self::UnixShell(_) | Self::WindowsShell(_) | Self::Mkdir { .. } | Self::Print(_) => {
                true
            }
        }
    }
}

/// Consume one token and require a quoted string.
fn expect_string(scanner: &mut Scanner<'_>, command: &'static str) -> Result<String, SyntaxError> {
    match scanner.next_token()? {
        Token::Str(text) => Ok(text),
        other => Err(SyntaxError::UnexpectedToken {
            command,
            want: "quoted string",
            got: other.text(),
        }),
    }
}

/// Consume one token and require an octal integer literal.
fn expect_octal(scanner: &mut Scanner<'_>, command: &'static str) -> Result<u32, SyntaxError> {
    match scanner.next_token()? {
        Token::Int(text) => {
            u32::from_str_radix(&text, 8).map_err(|_| SyntaxError::BadOctal { command, text })
        }
        other => Err(SyntaxError::UnexpectedToken {
            command,
            want: "octal integer",
            got: other.text(),
        }),
    }
}
