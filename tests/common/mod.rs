// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed fixture (installation root, package
// source directory, script file) so each integration test can set up an
// isolated environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code, clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;

use iscript::parser::Parser;

/// An isolated engine environment: installation root, package source, and
/// a script file, all backed by [`tempfile::TempDir`]s.
pub struct Fixture {
    pub root: tempfile::TempDir,
    pub source: tempfile::TempDir,
    script: PathBuf,
}

impl Fixture {
    /// Create a fixture whose script file holds `script`.
    pub fn new(script: &str) -> Self {
        let root = tempfile::tempdir().expect("create root dir");
        let source = tempfile::tempdir().expect("create source dir");
        let path = source.path().join("iscript");
        std::fs::write(&path, script).expect("write script");
        Self {
            root,
            source,
            script: path,
        }
    }

    /// Write a file with `content` under the package source directory.
    pub fn source_file(&self, rel: &str, content: &[u8]) -> PathBuf {
        let path = self.source.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create source subdir");
        }
        std::fs::write(&path, content).expect("write source file");
        path
    }

    /// Construct a parser bound to the fixture's script and root.
    pub fn parser(&self) -> Parser {
        Parser::new(&self.script, self.root.path()).expect("construct parser")
    }

    /// Path under the installation root.
    pub fn installed(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Contents of the fixture's activation log, if present.
    pub fn activation_log(&self) -> Option<String> {
        std::fs::read_to_string(self.root.path().join(".ira/activate.log")).ok()
    }
}

/// Permission bits of `path` on Unix (`mode & 0o777`).
#[cfg(unix)]
pub fn mode_bits(path: &std::path::Path) -> u32 {
    use std::os::unix::fs::PermissionsExt as _;
    std::fs::metadata(path)
        .expect("stat path")
        .permissions()
        .mode()
        & 0o777
}
