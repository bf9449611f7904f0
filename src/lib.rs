//! Execution engine for ira package install scripts.
//!
//! A small domain-specific script format describes how to install, remove,
//! or update a package inside a user-designated installation root. The
//! engine reads the script, locates the section for the requested
//! operation (`flag install` / `flag remove` / `flag update`), and executes
//! declarative and imperative commands — directory creation, file and
//! symlink copies, external programs — confined to the installation root
//! and the package source directory.
//!
//! The crate is organised in layers, leaves first:
//!
//! - **[`paths`]** — containment validation of script-supplied paths
//! - **[`fsops`]** — filesystem mutation primitives (copy, symlink, mkdir)
//! - **[`exec`]** — external command execution with placeholder substitution
//! - **[`mode`]** / **[`scanner`]** / **[`command`]** — mode registry,
//!   tokenizer, and token-to-command translation
//! - **[`parser`]** — the execution state machine tying it all together

pub mod cli;
pub mod command;
pub mod error;
pub mod exec;
pub mod fsops;
pub mod logging;
pub mod mode;
pub mod parser;
pub mod paths;
pub mod scanner;
