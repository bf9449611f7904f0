//! Filesystem mutation primitives.
//!
//! These functions apply a script's effects once the paths involved have
//! been validated and joined with the installation root or source
//! directory; they perform no containment checks of their own. First error
//! aborts — there is no partial-failure cleanup, so a failed recursive copy
//! leaves already-copied entries in place.

use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;

/// Create `path` and any missing ancestors with the given permission bits.
///
/// A no-op if `path` already exists, regardless of its type. Permission
/// bits apply on Unix only (subject to the process umask, as usual).
///
/// # Errors
///
/// Returns an error naming the path on any creation failure.
pub fn create_dir_if_absent(path: &Path, perm: u32) -> Result<()> {
    if path.symlink_metadata().is_ok() {
        return Ok(());
    }
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt as _;
        builder.mode(perm);
    }
    #[cfg(not(unix))]
    let _ = perm;
    builder
        .create(path)
        .with_context(|| format!("creating directory {}", path.display()))
}

/// Copy a single file, creating `dst` and truncating it if present.
///
/// Streams bytes only; permissions are not carried over.
///
/// # Errors
///
/// Returns an error naming both paths if either open fails or the copy is
/// interrupted.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    let mut reader =
        fs::File::open(src).with_context(|| format!("opening {}", src.display()))?;
    let mut writer =
        fs::File::create(dst).with_context(|| format!("creating {}", dst.display()))?;
    std::io::copy(&mut reader, &mut writer)
        .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;
    Ok(())
}

/// Replicate the symlink at `src` as an equivalent symlink at `dst`.
///
/// # Errors
///
/// Returns an error if `src` is not a symlink or `dst` cannot be created.
pub fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    let target =
        fs::read_link(src).with_context(|| format!("reading link {}", src.display()))?;
    create_symlink(&target, dst)
}

/// Create a symlink at `link` pointing to `points_to` (platform-specific).
///
/// # Errors
///
/// Returns an error naming the link path on failure.
pub fn create_symlink(points_to: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    std::os::unix::fs::symlink(points_to, link)
        .with_context(|| format!("creating symlink {}", link.display()))?;

    #[cfg(windows)]
    {
        if points_to.is_dir() {
            std::os::windows::fs::symlink_dir(points_to, link)
                .with_context(|| format!("creating symlink {}", link.display()))?;
        } else {
            std::os::windows::fs::symlink_file(points_to, link)
                .with_context(|| format!("creating symlink {}", link.display()))?;
        }
    }

    Ok(())
}

/// Recursively copy the entries of `src` into `dst`.
///
/// Dispatches per entry type: directories recurse (creating the
/// destination subdirectory with mode `0755` first), symlinks are
/// replicated via [`copy_symlink`], everything else goes through
/// [`copy_file`]. Sibling order is unspecified.
///
/// # Errors
///
/// Returns an error naming the path that failed; the copy aborts there.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    create_dir_if_absent(dst, 0o755)?;
    for entry in
        fs::read_dir(src).with_context(|| format!("reading directory {}", src.display()))?
    {
        let entry = entry.with_context(|| format!("reading entry in {}", src.display()))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        let kind = entry
            .file_type()
            .with_context(|| format!("inspecting {}", src_path.display()))?;
        if kind.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else if kind.is_symlink() {
            copy_symlink(&src_path, &dst_path)?;
        } else {
            copy_file(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Recursively delete `path`. A missing path is not an error.
///
/// # Errors
///
/// Returns an error naming the path if an existing entry cannot be
/// removed.
pub fn remove_all(path: &Path) -> Result<()> {
    let Ok(meta) = path.symlink_metadata() else {
        return Ok(());
    };
    let result = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.with_context(|| format!("removing {}", path.display()))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn create_dir_if_absent_creates_ancestors() {
        let tmp = tempfile::tempdir().unwrap();
        let deep = tmp.path().join("a/b/c");
        create_dir_if_absent(&deep, 0o755).unwrap();
        assert!(deep.is_dir());
    }

    #[test]
    fn create_dir_if_absent_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("once");
        create_dir_if_absent(&dir, 0o755).unwrap();
        create_dir_if_absent(&dir, 0o755).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn create_dir_if_absent_noop_when_file_occupies_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("occupied");
        fs::write(&path, b"x").unwrap();
        // Existing entry of any type means no-op, not an error.
        create_dir_if_absent(&path, 0o755).unwrap();
        assert!(path.is_file());
    }

    #[cfg(unix)]
    #[test]
    fn create_dir_if_absent_applies_mode() {
        use std::os::unix::fs::PermissionsExt as _;
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("locked");
        create_dir_if_absent(&dir, 0o700).unwrap();
        let mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o700);
    }

    #[test]
    fn copy_file_truncates_existing_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src.txt");
        let dst = tmp.path().join("dst.txt");
        fs::write(&src, b"new").unwrap();
        fs::write(&dst, b"a much longer previous payload").unwrap();
        copy_file(&src, &dst).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), b"new");
    }

    #[test]
    fn copy_file_missing_source_names_path() {
        let tmp = tempfile::tempdir().unwrap();
        let err = copy_file(&tmp.path().join("ghost"), &tmp.path().join("out")).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[cfg(unix)]
    #[test]
    fn copy_symlink_replicates_target() {
        let tmp = tempfile::tempdir().unwrap();
        let original = tmp.path().join("data");
        fs::write(&original, b"payload").unwrap();
        let link = tmp.path().join("link");
        std::os::unix::fs::symlink(&original, &link).unwrap();

        let replica = tmp.path().join("replica");
        copy_symlink(&link, &replica).unwrap();
        assert_eq!(fs::read_link(&replica).unwrap(), original);
    }

    #[test]
    fn copy_symlink_rejects_regular_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("plain");
        fs::write(&file, b"x").unwrap();
        assert!(copy_symlink(&file, &tmp.path().join("out")).is_err());
    }

    #[test]
    fn copies_files_and_subdirectories() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();

        fs::write(src.path().join("a.txt"), b"aaa").unwrap();
        fs::create_dir(src.path().join("sub")).unwrap();
        fs::write(src.path().join("sub/b.txt"), b"bbb").unwrap();

        let target = dst.path().join("out");
        copy_dir_recursive(src.path(), &target).unwrap();

        assert_eq!(fs::read(target.join("a.txt")).unwrap(), b"aaa");
        assert_eq!(fs::read(target.join("sub/b.txt")).unwrap(), b"bbb");
    }

    #[cfg(unix)]
    #[test]
    fn copy_dir_replicates_symlinks_not_contents() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();

        fs::write(src.path().join("real.txt"), b"real").unwrap();
        std::os::unix::fs::symlink("real.txt", src.path().join("alias")).unwrap();

        let target = dst.path().join("out");
        copy_dir_recursive(src.path(), &target).unwrap();

        let meta = target.join("alias").symlink_metadata().unwrap();
        assert!(meta.is_symlink());
        assert_eq!(
            fs::read_link(target.join("alias")).unwrap(),
            std::path::PathBuf::from("real.txt")
        );
    }

    #[test]
    fn remove_all_missing_path_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        remove_all(&tmp.path().join("never/existed")).unwrap();
    }

    #[test]
    fn remove_all_deletes_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("tree/leaf");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("f.txt"), b"x").unwrap();
        remove_all(&tmp.path().join("tree")).unwrap();
        assert!(!tmp.path().join("tree").exists());
    }

    #[test]
    fn remove_all_deletes_single_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("solo.txt");
        fs::write(&file, b"x").unwrap();
        remove_all(&file).unwrap();
        assert!(!file.exists());
    }
}
