//! Record persistence behind a small key-value interface.
//!
//! The store never touches storage directly; it reads and fully rewrites
//! one record per [`OwnerKey`] through a [`RecordBackend`].

mod file;
mod memory;

pub use file::{FileBackend, write_atomic};
pub use memory::MemoryBackend;

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::error::{SheetError, SheetResult};

/// Longest accepted owner key.
pub const OWNER_KEY_MAX_LEN: usize = 64;

/// Identifies the owner of a record.
///
/// Restricted to ASCII letters, digits, `_` and `-` so every backend can
/// use it verbatim, including as a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerKey(String);

impl OwnerKey {
    /// Validate and wrap a key.
    pub fn new(raw: &str) -> SheetResult<Self> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(SheetError::validation("owner", "must not be empty"));
        }
        if key.len() > OWNER_KEY_MAX_LEN {
            return Err(SheetError::validation(
                "owner",
                format!("longer than {OWNER_KEY_MAX_LEN} characters"),
            ));
        }
        if let Some(bad) = key
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(SheetError::validation(
                "owner",
                format!("'{bad}' is not allowed; use letters, digits, '_' or '-'"),
            ));
        }
        Ok(Self(key.to_string()))
    }

    /// The key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for OwnerKey {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for OwnerKey {
    type Error = SheetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<OwnerKey> for String {
    fn from(key: OwnerKey) -> Self {
        key.0
    }
}

/// Storage for character records, one per owner.
///
/// `put` replaces the whole record. Implementations must leave the
/// previous record intact if a write fails.
pub trait RecordBackend {
    /// Load the record, or `None` if the owner has none.
    fn get(&self, owner: &OwnerKey) -> SheetResult<Option<Character>>;

    /// Write the record, replacing any existing one.
    fn put(&mut self, owner: &OwnerKey, record: &Character) -> SheetResult<()>;

    /// Remove the record. Returns whether one existed.
    fn delete(&mut self, owner: &OwnerKey) -> SheetResult<bool>;

    /// Whether the owner has a record.
    fn exists(&self, owner: &OwnerKey) -> SheetResult<bool> {
        Ok(self.get(owner)?.is_some())
    }
}
