//! Investigator records for the burge percentile rules engine.
//!
//! [`Character`] is the persisted record: characteristics, resource pools,
//! skills with advancement flags, pending changes, and a versioned session
//! changelog. [`CharacterStore`] owns the record lifecycle over any
//! [`RecordBackend`], including two-phase deletion with a confirmation
//! window. Skill advancement, checks against a record, and Dhole's House
//! import/export build on the same record.

pub mod advancement;
pub mod backend;
pub mod character;
pub mod checks;
pub mod clock;
pub mod error;
pub mod interchange;
pub mod store;
pub mod summary;

pub use advancement::{AdvancementRoll, Spend};
pub use backend::{FileBackend, MemoryBackend, OwnerKey, RecordBackend, write_atomic};
pub use character::{
    Change, ChangelogEntry, Character, Conditions, HpSignal, Luck, Pool, ResourceChange,
    Resources, Sanity, SkillEntry, SkillSource,
};
pub use checks::{CheckReport, CheckTarget};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{SheetError, SheetResult};
pub use interchange::{export_character, import_character};
pub use store::{CharacterStore, DeleteLedger, DeleteRequest, StoreConfig};
