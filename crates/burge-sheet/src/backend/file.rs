use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{OwnerKey, RecordBackend};
use crate::character::Character;
use crate::error::{SheetError, SheetResult};

/// One pretty-printed JSON file per owner in a directory.
///
/// Writes go to a temporary sibling that is then renamed over the
/// record, so a failed write leaves the previous file untouched.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Use `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> SheetResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            SheetError::Persistence(format!("cannot create {}: {e}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    /// The directory records live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of an owner's record.
    pub fn path_for(&self, owner: &OwnerKey) -> PathBuf {
        self.dir.join(format!("{owner}.json"))
    }
}

/// Write `contents` to `path` through a temporary file and a rename.
pub fn write_atomic(path: &Path, contents: &[u8]) -> SheetResult<()> {
    let tmp = path.with_extension("json.tmp");
    if let Err(e) = write_then_rename(&tmp, path, contents) {
        let _ = fs::remove_file(&tmp);
        return Err(SheetError::Persistence(format!(
            "cannot write {}: {e}",
            path.display()
        )));
    }
    Ok(())
}

fn write_then_rename(tmp: &Path, path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(tmp)?;
    file.write_all(contents)?;
    file.sync_all()?;
    fs::rename(tmp, path)
}

impl RecordBackend for FileBackend {
    fn get(&self, owner: &OwnerKey) -> SheetResult<Option<Character>> {
        let path = self.path_for(owner);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(SheetError::Persistence(format!(
                    "cannot read {}: {e}",
                    path.display()
                )));
            }
        };
        match serde_json::from_str(&text) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable character record");
                Err(SheetError::Persistence(format!(
                    "{} is not a valid character record: {e}",
                    path.display()
                )))
            }
        }
    }

    fn put(&mut self, owner: &OwnerKey, record: &Character) -> SheetResult<()> {
        let path = self.path_for(owner);
        let json = serde_json::to_string_pretty(record)?;
        write_atomic(&path, json.as_bytes())?;
        tracing::debug!(owner = %owner, path = %path.display(), "record written");
        Ok(())
    }

    fn delete(&mut self, owner: &OwnerKey) -> SheetResult<bool> {
        match fs::remove_file(self.path_for(owner)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, owner: &OwnerKey) -> SheetResult<bool> {
        Ok(self.path_for(owner).is_file())
    }
}
