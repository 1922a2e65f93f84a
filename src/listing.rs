use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// One child of a listed directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FsEntry {
    pub name: String,
    pub is_directory: bool,
    pub is_symlink: bool,
}

impl FsEntry {
    pub fn dir(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_directory: true,
            is_symlink: false,
        }
    }

    pub fn file(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_directory: false,
            is_symlink: false,
        }
    }

    pub fn symlink(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_directory: false,
            is_symlink: true,
        }
    }
}

/// Snapshot read of a directory's immediate children. No caching is implied:
/// every call reflects the filesystem at that moment.
pub trait FileSystemProvider {
    fn list_entries(&self, path: &Path) -> io::Result<Vec<FsEntry>>;
}

/// The real filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalFs;

impl FileSystemProvider for LocalFs {
    fn list_entries(&self, path: &Path) -> io::Result<Vec<FsEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            // file_type() does not follow symlinks, which is what we want here.
            let file_type = entry.file_type()?;
            let Ok(name) = entry.file_name().into_string() else {
                debug!(dir = %path.display(), "skipping entry with non UTF-8 name");
                continue;
            };
            entries.push(FsEntry {
                name,
                is_directory: file_type.is_dir(),
                is_symlink: file_type.is_symlink(),
            });
        }
        Ok(entries)
    }
}

/// Fixed directory tree held in memory. Paths that were never added fail
/// with `NotFound`, paths marked denied fail with `PermissionDenied`.
#[derive(Clone, Debug, Default)]
pub struct MemoryFs {
    dirs: HashMap<PathBuf, Vec<FsEntry>>,
    denied: Vec<PathBuf>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` with the given children. Child directories are not
    /// registered implicitly; listing one that was never added fails.
    pub fn with_dir(mut self, path: impl Into<PathBuf>, entries: Vec<FsEntry>) -> Self {
        self.dirs.insert(path.into(), entries);
        self
    }

    pub fn deny(mut self, path: impl Into<PathBuf>) -> Self {
        self.denied.push(path.into());
        self
    }

    pub fn remove_dir(&mut self, path: &Path) {
        self.dirs.remove(path);
    }
}

impl FileSystemProvider for MemoryFs {
    fn list_entries(&self, path: &Path) -> io::Result<Vec<FsEntry>> {
        if self.denied.iter().any(|p| p == path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        self.dirs.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no such directory")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_fs_reports_kinds() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();

        let mut entries = LocalFs.list_entries(dir.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(entries, vec![FsEntry::file("a.txt"), FsEntry::dir("sub")]);
    }

    #[cfg(unix)]
    #[test]
    fn local_fs_flags_symlinks_without_following() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let entries = LocalFs.list_entries(dir.path()).unwrap();
        let link = entries.iter().find(|e| e.name == "link").unwrap();
        assert!(link.is_symlink);
        assert!(!link.is_directory);
    }

    #[test]
    fn local_fs_missing_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFs.list_entries(&dir.path().join("gone")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn memory_fs_denied_and_missing() {
        let fs = MemoryFs::new()
            .with_dir("/a", vec![FsEntry::dir("b")])
            .deny("/secret");
        assert_eq!(fs.list_entries(Path::new("/a")).unwrap().len(), 1);
        assert_eq!(
            fs.list_entries(Path::new("/secret")).unwrap_err().kind(),
            io::ErrorKind::PermissionDenied
        );
        assert_eq!(
            fs.list_entries(Path::new("/a/b")).unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }
}
