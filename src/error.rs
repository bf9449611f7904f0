//! Domain-specific error types for the script engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! The tokenizer, command translation, and path validation layers return
//! typed errors ([`SyntaxError`], [`PathError`]); parser configuration and
//! locking problems surface as [`ConfigError`]. Filesystem and process
//! failures inside command handlers are wrapped with [`anyhow::Context`]
//! naming the path or command involved, and everything converges on
//! [`anyhow::Error`] at the `start` boundary via the standard `?` operator.
//!
//! # Error kinds
//!
//! ```text
//! ConfigError — script unreadable, missing root/source dir, busy instance
//! SyntaxError — unexpected token, bad literal, unknown command, wrong mode
//! PathError   — a script path fails containment validation
//! (anyhow)    — filesystem and external-process failures, with context
//! ```

use thiserror::Error;

use crate::mode::Mode;

/// Errors that arise from engine configuration and instance state.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The script file could not be opened or read.
    #[error("opening script {path}: {source}")]
    ScriptUnreadable {
        /// Path to the script that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The installation root does not exist.
    #[error("installation root {0} doesn't exist")]
    RootMissing(String),

    /// The given source directory does not exist on disk.
    #[error("source directory {0} doesn't exist")]
    SourceMissing(String),

    /// The mode requires a source directory but none was given.
    #[error("{0} mode requires a source directory")]
    SourceRequired(Mode),

    /// The mode forbids a source directory but one was given.
    #[error("{0} mode does not take a source directory")]
    SourceForbidden(Mode),

    /// Another `start` or `reset` is already in flight on this instance.
    #[error("engine is busy: another start or reset is in progress")]
    Busy,
}

/// Errors that arise while tokenizing the script or translating tokens
/// into commands.
#[derive(Error, Debug)]
pub enum SyntaxError {
    /// A command argument had the wrong token kind.
    #[error("bad syntax after {command}: want {want}, got {got:?}")]
    UnexpectedToken {
        /// The command being parsed when the token was encountered.
        command: &'static str,
        /// Description of the expected token kind.
        want: &'static str,
        /// Raw text of the offending token.
        got: String,
    },

    /// An integer literal was not valid octal.
    #[error("bad octal literal {text:?} after {command}")]
    BadOctal {
        /// The command being parsed.
        command: &'static str,
        /// The offending literal text.
        text: String,
    },

    /// A string literal was still open at end of input.
    #[error("unterminated string literal on line {line}")]
    UnterminatedString {
        /// 1-based script line where the string started.
        line: u32,
    },

    /// An identifier inside a matched section is not a known command.
    #[error("invalid command {0:?}")]
    UnknownCommand(String),

    /// A recognized command appeared in a section where it is not legal.
    #[error("{command} is not allowed in {mode} mode")]
    NotAllowed {
        /// Name of the command.
        command: &'static str,
        /// The mode the engine was running in.
        mode: Mode,
    },
}

/// Errors that arise from path containment validation.
#[derive(Error, Debug)]
pub enum PathError {
    /// The path would resolve outside the installation root.
    #[error("incorrect path {0:?}: escapes the installation root")]
    Escape(String),
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn config_error_script_unreadable_display() {
        let e = ConfigError::ScriptUnreadable {
            path: "/pkg/iscript".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("/pkg/iscript"));
        assert!(e.to_string().contains("no such file"));
    }

    #[test]
    fn config_error_script_unreadable_has_source() {
        use std::error::Error as _;
        let e = ConfigError::ScriptUnreadable {
            path: "/pkg/iscript".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.source().is_some());
    }

    #[test]
    fn config_error_busy_display() {
        assert_eq!(
            ConfigError::Busy.to_string(),
            "engine is busy: another start or reset is in progress"
        );
    }

    #[test]
    fn config_error_source_required_display() {
        let e = ConfigError::SourceRequired(Mode::Install);
        assert_eq!(e.to_string(), "install mode requires a source directory");
    }

    #[test]
    fn config_error_source_forbidden_display() {
        let e = ConfigError::SourceForbidden(Mode::Remove);
        assert_eq!(
            e.to_string(),
            "remove mode does not take a source directory"
        );
    }

    #[test]
    fn syntax_error_unexpected_token_display() {
        let e = SyntaxError::UnexpectedToken {
            command: "install",
            want: "quoted string",
            got: "755".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "bad syntax after install: want quoted string, got \"755\""
        );
    }

    #[test]
    fn syntax_error_unknown_command_display() {
        let e = SyntaxError::UnknownCommand("frobnicate".to_string());
        assert_eq!(e.to_string(), "invalid command \"frobnicate\"");
    }

    #[test]
    fn syntax_error_not_allowed_display() {
        let e = SyntaxError::NotAllowed {
            command: "activate",
            mode: Mode::Remove,
        };
        assert_eq!(e.to_string(), "activate is not allowed in remove mode");
    }

    #[test]
    fn path_error_escape_display() {
        let e = PathError::Escape("../../etc/passwd".to_string());
        assert!(e.to_string().contains("../../etc/passwd"));
        assert!(e.to_string().contains("escapes"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<ConfigError>();
        assert_send_sync::<SyntaxError>();
        assert_send_sync::<PathError>();
    }

    #[test]
    fn errors_convert_to_anyhow() {
        let _e: anyhow::Error = ConfigError::Busy.into();
        let _e: anyhow::Error = SyntaxError::UnknownCommand("x".to_string()).into();
        let _e: anyhow::Error = PathError::Escape("../x".to_string()).into();
    }
}
