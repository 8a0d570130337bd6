pub mod delete;
pub mod roll;
pub mod session;
pub mod sheet;
pub mod transfer;

use std::fs;
use std::path::{Path, PathBuf};

use burge_mechanics::RngRoller;
use burge_sheet::{CharacterStore, DeleteLedger, FileBackend, OwnerKey, write_atomic};

/// Delete requests survive between invocations in this file. Owner keys
/// cannot start with a dot, so it never collides with a record.
const LEDGER_FILE: &str = ".pending_deletes.json";

pub type Store = CharacterStore<FileBackend>;

/// Global options shared by every command.
pub struct Context {
    dir: PathBuf,
    owner: String,
    seed: Option<u64>,
}

impl Context {
    pub fn new(dir: PathBuf, owner: String, seed: Option<u64>) -> Self {
        Self { dir, owner, seed }
    }

    pub fn owner(&self) -> Result<OwnerKey, String> {
        OwnerKey::new(&self.owner).map_err(|e| e.to_string())
    }

    /// Open the record store in the character directory.
    pub fn store(&self) -> Result<Store, String> {
        let backend = FileBackend::open(&self.dir).map_err(|e| e.to_string())?;
        Ok(CharacterStore::new(backend).with_delete_ledger(self.load_ledger()))
    }

    /// Dice come from the seed if one was given, else from the OS.
    pub fn roller(&self) -> RngRoller {
        match self.seed {
            Some(seed) => RngRoller::seeded(seed),
            None => RngRoller::from_entropy(),
        }
    }

    fn ledger_path(&self) -> PathBuf {
        self.dir.join(LEDGER_FILE)
    }

    fn load_ledger(&self) -> DeleteLedger {
        let path = self.ledger_path();
        let Ok(text) = fs::read_to_string(&path) else {
            return DeleteLedger::new();
        };
        serde_json::from_str(&text).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable delete ledger");
            DeleteLedger::new()
        })
    }

    pub fn save_ledger(&self, store: &Store) -> Result<(), String> {
        let path = self.ledger_path();
        if store.delete_ledger().is_empty() {
            return remove_if_present(&path);
        }
        let json = serde_json::to_string_pretty(store.delete_ledger()).map_err(|e| e.to_string())?;
        write_atomic(&path, json.as_bytes()).map_err(|e| e.to_string())
    }
}

fn remove_if_present(path: &Path) -> Result<(), String> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(format!("cannot remove {}: {e}", path.display())),
    }
}

/// `1 skill`, `3 skills`.
fn plural(n: usize, word: &str) -> String {
    format!("{n} {word}{}", if n == 1 { "" } else { "s" })
}
