use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{Backend, StorageError};

/// Backend storing each collection as `<dir>/<collection>.json`.
/// Writes go through a temp file and rename so a crash mid-write never
/// leaves a truncated collection behind.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(FileBackend { dir })
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }
}

impl Backend for FileBackend {
    fn get(&self, collection: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(collection)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, collection: &str, payload: &str) -> Result<(), StorageError> {
        let path = self.path_for(collection);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, collection: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(collection)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl AsRef<Path> for FileBackend {
    fn as_ref(&self) -> &Path {
        &self.dir
    }
}
