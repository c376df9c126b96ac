//! Atomic file writer so a crash never leaves a half-written session file

use crate::traits::StorageResult;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes to `<path>.tmp` and renames over the target on commit
pub struct AtomicWriter {
    temp_path: PathBuf,
    final_path: PathBuf,
    file: File,
    committed: bool,
}

impl AtomicWriter {
    /// Create a new atomic writer for the given path
    ///
    /// On Unix the file is created readable by the owner only, since it holds
    /// a bearer token.
    pub fn new<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let final_path = path.as_ref().to_path_buf();

        if let Some(parent) = final_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = Self::temp_path(&final_path);

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let file = options.open(&temp_path)?;

        Ok(Self {
            temp_path,
            final_path,
            file,
            committed: false,
        })
    }

    pub fn write(&mut self, data: &[u8]) -> StorageResult<()> {
        self.file.write_all(data)?;
        Ok(())
    }

    /// Commit the write by renaming the temp file to the final path
    pub fn commit(mut self) -> StorageResult<()> {
        self.file.flush()?;
        self.file.sync_all()?;

        fs::rename(&self.temp_path, &self.final_path)?;
        self.committed = true;

        Ok(())
    }

    fn temp_path(final_path: &Path) -> PathBuf {
        let mut temp = final_path.as_os_str().to_owned();
        temp.push(".tmp");
        PathBuf::from(temp)
    }
}

impl Drop for AtomicWriter {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested/session.json");

        let mut writer = AtomicWriter::new(&file_path).unwrap();
        writer.write(b"{}").unwrap();
        writer.commit().unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "{}");
        assert!(!temp_dir.path().join("nested/session.json.tmp").exists());
    }

    #[test]
    fn test_atomic_write_rollback_on_drop() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("session.json");
        fs::write(&file_path, b"old").unwrap();

        {
            let mut writer = AtomicWriter::new(&file_path).unwrap();
            writer.write(b"never committed").unwrap();
        }

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "old");
        assert!(!temp_dir.path().join("session.json.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("session.json");

        let mut writer = AtomicWriter::new(&file_path).unwrap();
        writer.write(b"{}").unwrap();
        writer.commit().unwrap();

        let mode = fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
