//! Legacy storage path resolution
//!
//! The legacy runtime kept its data one directory level above the
//! application's private `files` directory, under a runtime-specific
//! subtree. Nothing here reads file contents; these are existence
//! probes and path arithmetic only.

use std::path::{Path, PathBuf};
use tracing::debug;

/// Derives the storage root from an app-private files directory by
/// stripping the trailing `files` segment.
///
/// `/data/user/0/app/files` becomes `/data/user/0/app`. A path that
/// does not end in `files` is returned unchanged.
pub fn storage_root(files_dir: &Path) -> PathBuf {
    if files_dir.file_name().is_some_and(|name| name == "files") {
        match files_dir.parent() {
            Some(parent) => parent.to_path_buf(),
            None => files_dir.to_path_buf(),
        }
    } else {
        files_dir.to_path_buf()
    }
}

/// Joins `sub` onto `base` without doubling segments: if `sub` is
/// already rooted in `base` it is returned as-is.
pub fn join_rooted(base: &Path, sub: impl AsRef<Path>) -> PathBuf {
    let sub = sub.as_ref();
    if sub.starts_with(base) {
        sub.to_path_buf()
    } else {
        base.join(sub)
    }
}

/// Walks the candidate files directories in priority order and returns
/// the first storage root that contains the legacy runtime's data
/// directory. `None` means there is nothing to migrate.
pub fn locate_legacy_root<'a>(
    candidates: impl IntoIterator<Item = &'a Path>,
    legacy_data_dir: &str,
) -> Option<PathBuf> {
    for files_dir in candidates {
        let root = storage_root(files_dir);
        let probe = join_rooted(&root, legacy_data_dir);
        if probe.exists() {
            debug!(root = %root.display(), "found legacy runtime directory");
            return Some(root);
        }
        debug!(probe = %probe.display(), "no legacy data at candidate");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn storage_root_strips_trailing_files_segment() {
        let root = storage_root(Path::new("/data/user/0/app/files"));
        assert_eq!(root, Path::new("/data/user/0/app"));
    }

    #[test]
    fn storage_root_leaves_other_paths_alone() {
        let root = storage_root(Path::new("/data/user/0/app/cache"));
        assert_eq!(root, Path::new("/data/user/0/app/cache"));
    }

    #[test]
    fn join_rooted_avoids_duplicated_segments() {
        let joined = join_rooted(Path::new("/a/b"), "/a/b/c");
        assert_eq!(joined, Path::new("/a/b/c"));
    }

    #[test]
    fn join_rooted_appends_relative_paths() {
        let joined = join_rooted(Path::new("/a/b"), "c");
        assert_eq!(joined, Path::new("/a/b/c"));
    }

    #[test]
    fn locate_returns_first_matching_candidate() {
        let temp = TempDir::new().unwrap();
        let primary = temp.path().join("internal/app/files");
        let secondary = temp.path().join("external/app/files");
        std::fs::create_dir_all(&primary).unwrap();
        std::fs::create_dir_all(&secondary).unwrap();
        std::fs::create_dir_all(temp.path().join("external/app/app_xwalkcore/Default")).unwrap();

        let root = locate_legacy_root(
            [primary.as_path(), secondary.as_path()],
            "app_xwalkcore/Default",
        );
        assert_eq!(root, Some(temp.path().join("external/app")));
    }

    #[test]
    fn locate_prefers_primary_when_both_match() {
        let temp = TempDir::new().unwrap();
        let primary = temp.path().join("internal/app/files");
        let secondary = temp.path().join("external/app/files");
        std::fs::create_dir_all(temp.path().join("internal/app/app_xwalkcore/Default")).unwrap();
        std::fs::create_dir_all(temp.path().join("external/app/app_xwalkcore/Default")).unwrap();
        std::fs::create_dir_all(&primary).unwrap();
        std::fs::create_dir_all(&secondary).unwrap();

        let root = locate_legacy_root(
            [primary.as_path(), secondary.as_path()],
            "app_xwalkcore/Default",
        );
        assert_eq!(root, Some(temp.path().join("internal/app")));
    }

    #[test]
    fn locate_returns_none_without_legacy_data() {
        let temp = TempDir::new().unwrap();
        let primary = temp.path().join("app/files");
        std::fs::create_dir_all(&primary).unwrap();

        let root = locate_legacy_root([primary.as_path()], "app_xwalkcore/Default");
        assert_eq!(root, None);
    }
}
