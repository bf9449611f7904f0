//! Operation modes and their script-section mapping.
//!
//! The mode registry maps the three operations to the section names a
//! script may declare (`flag install`, `flag remove`, `flag update`) and
//! validates the mode-specific source-directory preconditions before any
//! token is consumed.

use std::fmt;
use std::path::Path;

use crate::error::ConfigError;

/// Requested engine operation; selects which script section executes and
/// which commands are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Install a package from a source directory into the installation root.
    Install,
    /// Remove a previously installed package from the installation root.
    Remove,
    /// Update an installed package from a new source directory.
    Update,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section_name())
    }
}

impl Mode {
    /// The section name a script uses to introduce this mode's commands.
    #[must_use]
    pub const fn section_name(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Remove => "remove",
            Self::Update => "update",
        }
    }

    /// Whether `text` names any known script section.
    #[must_use]
    pub fn is_section_name(text: &str) -> bool {
        matches!(text, "install" | "remove" | "update")
    }

    /// Validate the source-directory precondition for this mode.
    ///
    /// Install and Update require an existing source directory; Remove
    /// requires that none is given.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the precondition is violated.
    pub fn check_source(self, source_dir: Option<&Path>) -> Result<(), ConfigError> {
        match (self, source_dir) {
            (Self::Install | Self::Update, None) => Err(ConfigError::SourceRequired(self)),
            (Self::Install | Self::Update, Some(dir)) => {
                if dir.exists() {
                    Ok(())
                } else {
                    Err(ConfigError::SourceMissing(dir.display().to_string()))
                }
            }
            (Self::Remove, Some(_)) => Err(ConfigError::SourceForbidden(self)),
            (Self::Remove, None) => Ok(()),
        }
    }
}
