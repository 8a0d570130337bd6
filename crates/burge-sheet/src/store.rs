//! The character store: the only writer of persisted records.
//!
//! Each operation loads the owner's record, applies one mutation, and
//! rewrites the whole record through the backend. Callers serialize
//! operations per owner; the store does no locking of its own.

use std::collections::BTreeMap;

use burge_mechanics::{Adjustment, Characteristic, DiceRoller, Difficulty, ResourceKind};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::advancement::{self, AdvancementRoll, Spend};
use crate::backend::{OwnerKey, RecordBackend};
use crate::character::{Change, ChangelogEntry, Character, ResourceChange};
use crate::checks::{self, CheckReport};
use crate::clock::{Clock, SystemClock};
use crate::error::{SheetError, SheetResult};
use crate::interchange;

/// Word that confirms a pending delete (case-insensitive).
pub const CONFIRM_TOKEN: &str = "confirm";

/// Seconds a delete request stays open by default.
pub const DEFAULT_CONFIRM_WINDOW_SECS: i64 = 30;

/// Store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// How long a delete request waits for confirmation.
    pub confirm_window: TimeDelta,
    /// Session notes default to `"{prefix} {version}"`.
    pub default_note_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            confirm_window: TimeDelta::seconds(DEFAULT_CONFIRM_WINDOW_SECS),
            default_note_prefix: "Session".to_string(),
        }
    }
}

impl StoreConfig {
    /// Set the delete confirmation window.
    pub fn with_confirm_window(mut self, window: TimeDelta) -> Self {
        self.confirm_window = window;
        self
    }

    /// Set the default session note prefix.
    pub fn with_default_note_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.default_note_prefix = prefix.into();
        self
    }
}

/// Open delete requests by owner.
///
/// Serializable so a caller that runs one process per command can carry
/// it between invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteLedger {
    requests: BTreeMap<OwnerKey, DateTime<Utc>>,
}

impl DeleteLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// When the owner asked to delete, if they have an open request.
    pub fn requested_at(&self, owner: &OwnerKey) -> Option<DateTime<Utc>> {
        self.requests.get(owner).copied()
    }

    /// Number of open requests.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// True if no requests are open.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn open(&mut self, owner: &OwnerKey, at: DateTime<Utc>) {
        self.requests.insert(owner.clone(), at);
    }

    fn take(&mut self, owner: &OwnerKey) -> Option<DateTime<Utc>> {
        self.requests.remove(owner)
    }

    /// Drop requests older than `window`.
    fn prune(&mut self, now: DateTime<Utc>, window: TimeDelta) {
        self.requests.retain(|_, at| now - *at <= window);
    }
}

/// An open delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    /// Whose record.
    pub owner: OwnerKey,
    /// Name on the record, for the confirmation prompt.
    pub name: String,
    /// When the request was made.
    pub requested_at: DateTime<Utc>,
    /// Confirmation after this instant fails.
    pub expires_at: DateTime<Utc>,
}

/// Owns record lifecycle over a [`RecordBackend`].
#[derive(Debug)]
pub struct CharacterStore<B, C = SystemClock> {
    backend: B,
    clock: C,
    config: StoreConfig,
    deletes: DeleteLedger,
}

impl<B: RecordBackend> CharacterStore<B, SystemClock> {
    /// A store on wall-clock time with default settings.
    pub fn new(backend: B) -> Self {
        Self::with_clock(backend, SystemClock)
    }
}

impl<B: RecordBackend, C: Clock> CharacterStore<B, C> {
    /// A store with an explicit time source.
    pub fn with_clock(backend: B, clock: C) -> Self {
        Self {
            backend,
            clock,
            config: StoreConfig::default(),
            deletes: DeleteLedger::default(),
        }
    }

    /// Replace the settings.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Resume with previously saved delete requests.
    pub fn with_delete_ledger(mut self, ledger: DeleteLedger) -> Self {
        self.deletes = ledger;
        self
    }

    /// Open delete requests, for callers that persist them.
    pub fn delete_ledger(&self) -> &DeleteLedger {
        &self.deletes
    }

    /// The settings in use.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether the owner has a record.
    pub fn exists(&self, owner: &OwnerKey) -> SheetResult<bool> {
        self.backend.exists(owner)
    }

    /// Load the owner's record.
    pub fn load(&self, owner: &OwnerKey) -> SheetResult<Character> {
        self.backend
            .get(owner)?
            .ok_or_else(|| SheetError::not_found(format!("character for '{owner}'")))
    }

    fn persist(&mut self, owner: &OwnerKey, character: &mut Character) -> SheetResult<()> {
        character.last_updated = self.clock.now();
        self.backend.put(owner, character)
    }

    /// Load, apply `f`, and write back if `f` succeeds.
    fn mutate<T>(
        &mut self,
        owner: &OwnerKey,
        f: impl FnOnce(&mut Character) -> SheetResult<T>,
    ) -> SheetResult<T> {
        let mut character = self.load(owner)?;
        let out = f(&mut character)?;
        self.persist(owner, &mut character)?;
        Ok(out)
    }

    /// Start a new record. Fails if the owner already has one.
    pub fn create(
        &mut self,
        owner: &OwnerKey,
        name: &str,
        occupation: Option<&str>,
    ) -> SheetResult<Character> {
        if name.trim().is_empty() {
            return Err(SheetError::validation("name", "must not be empty"));
        }
        if self.backend.exists(owner)? {
            return Err(SheetError::AlreadyExists {
                owner: owner.to_string(),
            });
        }
        let mut character = Character::new(name, occupation, self.clock.now());
        self.persist(owner, &mut character)?;
        tracing::info!(owner = %owner, name = %character.name, "character created");
        Ok(character)
    }

    /// Set or shift one characteristic.
    pub fn set_characteristic(
        &mut self,
        owner: &OwnerKey,
        key: Characteristic,
        adjustment: &Adjustment,
    ) -> SheetResult<Change> {
        self.mutate(owner, |c| c.set_characteristic(key, adjustment))
    }

    /// Set all eight characteristics and reset the pools.
    pub fn set_characteristics(
        &mut self,
        owner: &OwnerKey,
        values: [i32; 8],
    ) -> SheetResult<Character> {
        self.mutate(owner, |c| {
            c.set_characteristics(values)?;
            Ok(c.clone())
        })
    }

    /// Adjust a resource pool.
    pub fn set_resource(
        &mut self,
        owner: &OwnerKey,
        kind: ResourceKind,
        adjustment: &Adjustment,
        roller: &mut impl DiceRoller,
    ) -> SheetResult<ResourceChange> {
        self.mutate(owner, |c| c.set_resource(kind, adjustment, roller))
    }

    /// Store a skill value. Returns the canonical name and the change.
    pub fn set_skill(
        &mut self,
        owner: &OwnerKey,
        name: &str,
        value: i32,
    ) -> SheetResult<(String, Change)> {
        self.mutate(owner, |c| c.set_skill(name, value))
    }

    /// Set, clear, or toggle the major wound.
    pub fn set_major_wound(&mut self, owner: &OwnerKey, state: Option<bool>) -> SheetResult<bool> {
        self.mutate(owner, |c| Ok(c.set_major_wound(state)))
    }

    /// Mark a skill for advancement.
    pub fn check_skill(&mut self, owner: &OwnerKey, name: &str) -> SheetResult<String> {
        self.mutate(owner, |c| advancement::check_skill(c, name))
    }

    /// Roll a skill check. A success is written back as an advancement check.
    pub fn roll_skill(
        &mut self,
        owner: &OwnerKey,
        name: &str,
        difficulty: Difficulty,
        bonus_dice: u32,
        penalty_dice: u32,
        roller: &mut impl DiceRoller,
    ) -> SheetResult<CheckReport> {
        let mut character = self.load(owner)?;
        let report = checks::skill_check(
            &mut character,
            name,
            difficulty,
            bonus_dice,
            penalty_dice,
            roller,
        );
        if report.outcome.is_success() {
            self.persist(owner, &mut character)?;
        }
        Ok(report)
    }

    /// Roll a characteristic check. Never writes.
    pub fn roll_characteristic(
        &self,
        owner: &OwnerKey,
        key: Characteristic,
        difficulty: Difficulty,
        bonus_dice: u32,
        penalty_dice: u32,
        roller: &mut impl DiceRoller,
    ) -> SheetResult<CheckReport> {
        let character = self.load(owner)?;
        Ok(checks::characteristic_check(
            &character,
            key,
            difficulty,
            bonus_dice,
            penalty_dice,
            roller,
        ))
    }

    /// Run advancement rolls for every checked skill.
    pub fn advance(
        &mut self,
        owner: &OwnerKey,
        roller: &mut impl DiceRoller,
    ) -> SheetResult<Vec<AdvancementRoll>> {
        let mut character = self.load(owner)?;
        let rolls = advancement::advance(&mut character, roller);
        if !rolls.is_empty() {
            self.persist(owner, &mut character)?;
        }
        Ok(rolls)
    }

    /// Spend XP on an eligible skill.
    pub fn spend_xp(&mut self, owner: &OwnerKey, name: &str, amount: i32) -> SheetResult<Spend> {
        self.mutate(owner, |c| advancement::spend_xp(c, name, amount))
    }

    /// Close the session: version the record and move pending changes into history.
    pub fn save_session(
        &mut self,
        owner: &OwnerKey,
        note: Option<&str>,
    ) -> SheetResult<ChangelogEntry> {
        let now = self.clock.now();
        let prefix = self.config.default_note_prefix.clone();
        let entry = self.mutate(owner, |c| c.save_session(note, &prefix, now))?;
        tracing::info!(
            owner = %owner,
            version = entry.version,
            changes = entry.changes.len(),
            "session saved"
        );
        Ok(entry)
    }

    /// The newest `count` changelog entries.
    pub fn history(&self, owner: &OwnerKey, count: usize) -> SheetResult<Vec<ChangelogEntry>> {
        Ok(self.load(owner)?.history(count).to_vec())
    }

    /// Create a record from an exported investigator document.
    pub fn import(&mut self, owner: &OwnerKey, raw: &str) -> SheetResult<(Character, usize)> {
        if self.backend.exists(owner)? {
            return Err(SheetError::AlreadyExists {
                owner: owner.to_string(),
            });
        }
        let (mut character, count) = interchange::import_character(raw, self.clock.now())?;
        self.persist(owner, &mut character)?;
        Ok((character, count))
    }

    /// Render the owner's record as an investigator document.
    pub fn export(&self, owner: &OwnerKey) -> SheetResult<String> {
        interchange::export_character(&self.load(owner)?)
    }

    /// Open a delete request; confirm it within the window to delete.
    pub fn request_delete(&mut self, owner: &OwnerKey) -> SheetResult<DeleteRequest> {
        let character = self.load(owner)?;
        let now = self.clock.now();
        self.deletes.prune(now, self.config.confirm_window);
        self.deletes.open(owner, now);
        tracing::info!(owner = %owner, "delete requested");
        Ok(DeleteRequest {
            owner: owner.clone(),
            name: character.name,
            requested_at: now,
            expires_at: now + self.config.confirm_window,
        })
    }

    /// Confirm an open delete request and remove the record.
    ///
    /// The request is consumed whether or not confirmation succeeds, so an
    /// expired attempt must start over.
    pub fn confirm_delete(&mut self, owner: &OwnerKey, token: &str) -> SheetResult<Character> {
        if !token.trim().eq_ignore_ascii_case(CONFIRM_TOKEN) {
            return Err(SheetError::validation(
                "confirmation",
                format!("type '{CONFIRM_TOKEN}' to delete"),
            ));
        }

        let now = self.clock.now();
        let Some(requested_at) = self.deletes.take(owner) else {
            tracing::warn!(owner = %owner, "delete confirmed without a request");
            return Err(SheetError::ExpiredConfirmation);
        };
        if now - requested_at > self.config.confirm_window {
            tracing::warn!(owner = %owner, "delete confirmation expired");
            return Err(SheetError::ExpiredConfirmation);
        }

        let character = self.load(owner)?;
        self.backend.delete(owner)?;
        tracing::info!(owner = %owner, name = %character.name, "character deleted");
        Ok(character)
    }
}

#[cfg(test)]
mod tests {
    use burge_mechanics::ScriptedRoller;

    use super::*;
    use crate::backend::MemoryBackend;
    use crate::clock::ManualClock;

    fn start() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn store() -> (CharacterStore<MemoryBackend, ManualClock>, ManualClock, OwnerKey) {
        let clock = ManualClock::new(start());
        let store = CharacterStore::with_clock(MemoryBackend::new(), clock.clone());
        (store, clock, OwnerKey::new("alice").unwrap())
    }

    #[test]
    fn create_twice_fails() {
        let (mut store, _, owner) = store();
        store.create(&owner, "Harvey Walters", Some("Professor")).unwrap();
        assert!(matches!(
            store.create(&owner, "Someone Else", None),
            Err(SheetError::AlreadyExists { .. })
        ));
        assert!(store.create(&OwnerKey::new("bob").unwrap(), "  ", None).is_err());
    }

    #[test]
    fn operations_on_missing_record_fail() {
        let (mut store, _, owner) = store();
        assert!(matches!(store.load(&owner), Err(SheetError::NotFound { .. })));
        assert!(matches!(
            store.set_skill(&owner, "Spot Hidden", 50),
            Err(SheetError::NotFound { .. })
        ));
        assert!(matches!(
            store.request_delete(&owner),
            Err(SheetError::NotFound { .. })
        ));
    }

    #[test]
    fn mutations_persist_and_stamp_time() {
        let (mut store, clock, owner) = store();
        store.create(&owner, "Harvey Walters", None).unwrap();
        clock.advance(TimeDelta::minutes(5));
        store.set_skill(&owner, "spot", 60).unwrap();

        let c = store.load(&owner).unwrap();
        assert_eq!(c.skills["Spot Hidden"].value, 60);
        assert_eq!(c.last_updated, start() + TimeDelta::minutes(5));
        assert_eq!(c.created_at, start());
    }

    #[test]
    fn failed_mutation_writes_nothing() {
        let (mut store, _, owner) = store();
        store.create(&owner, "Harvey Walters", None).unwrap();
        assert!(store.set_characteristics(&owner, [0; 8]).is_err());
        assert!(store.load(&owner).unwrap().pending.is_empty());
    }

    #[test]
    fn failed_roll_is_not_written() {
        let (mut store, clock, owner) = store();
        store.create(&owner, "Harvey Walters", None).unwrap();
        clock.advance(TimeDelta::minutes(1));
        let mut roller = ScriptedRoller::new([10, 9]);
        let report = store
            .roll_skill(&owner, "Spot Hidden", Difficulty::Regular, 0, 0, &mut roller)
            .unwrap();
        assert!(!report.outcome.is_success());
        assert_eq!(store.load(&owner).unwrap().last_updated, start());
    }

    #[test]
    fn save_session_uses_configured_prefix() {
        let (store, _, owner) = store();
        let mut store =
            store.with_config(StoreConfig::default().with_default_note_prefix("Scenario"));
        store.create(&owner, "Harvey Walters", None).unwrap();
        assert!(matches!(
            store.save_session(&owner, None),
            Err(SheetError::NoPendingChanges)
        ));
        store.set_skill(&owner, "Occult", 20).unwrap();
        let entry = store.save_session(&owner, None).unwrap();
        assert_eq!(entry.note, "Scenario 2");
        assert_eq!(entry.timestamp, start());
        assert_eq!(store.history(&owner, 5).unwrap(), vec![entry]);
    }

    #[test]
    fn delete_within_window() {
        let (mut store, clock, owner) = store();
        store.create(&owner, "Harvey Walters", None).unwrap();

        let request = store.request_delete(&owner).unwrap();
        assert_eq!(request.name, "Harvey Walters");
        assert_eq!(request.expires_at, start() + TimeDelta::seconds(30));

        clock.advance(TimeDelta::seconds(30));
        assert!(store.confirm_delete(&owner, "nope").is_err());
        let deleted = store.confirm_delete(&owner, "CONFIRM").unwrap();
        assert_eq!(deleted.name, "Harvey Walters");
        assert!(!store.exists(&owner).unwrap());
        assert!(store.delete_ledger().is_empty());
    }

    #[test]
    fn confirm_without_request_is_expired() {
        let (mut store, _, owner) = store();
        store.create(&owner, "Harvey Walters", None).unwrap();
        assert!(matches!(
            store.confirm_delete(&owner, "confirm"),
            Err(SheetError::ExpiredConfirmation)
        ));
        assert!(store.exists(&owner).unwrap());
    }

    #[test]
    fn ledger_survives_serialization() {
        let (mut store, clock, owner) = store();
        store.create(&owner, "Harvey Walters", None).unwrap();
        store.request_delete(&owner).unwrap();

        let saved = serde_json::to_string(store.delete_ledger()).unwrap();
        let ledger: DeleteLedger = serde_json::from_str(&saved).unwrap();
        assert_eq!(ledger.requested_at(&owner), Some(start()));

        let backend = store.backend().clone();
        let mut resumed = CharacterStore::with_clock(backend, clock.clone()).with_delete_ledger(ledger);
        clock.advance(TimeDelta::seconds(10));
        resumed.confirm_delete(&owner, "confirm").unwrap();
        assert!(!resumed.exists(&owner).unwrap());
    }

    #[test]
    fn stale_requests_are_pruned() {
        let (mut store, clock, owner) = store();
        let other = OwnerKey::new("bob").unwrap();
        store.create(&owner, "A", None).unwrap();
        store.create(&other, "B", None).unwrap();
        store.request_delete(&owner).unwrap();
        clock.advance(TimeDelta::seconds(45));
        store.request_delete(&other).unwrap();
        assert_eq!(store.delete_ledger().len(), 1);
        assert!(store.delete_ledger().requested_at(&owner).is_none());
    }

    #[test]
    fn import_refuses_to_overwrite() {
        let (mut store, _, owner) = store();
        let raw = r#"{"Investigator": {"PersonalDetails": {"Name": "Imported"}}}"#;
        let (c, _) = store.import(&owner, raw).unwrap();
        assert_eq!(c.name, "Imported");
        assert!(matches!(
            store.import(&owner, raw),
            Err(SheetError::AlreadyExists { .. })
        ));
        assert!(store.export(&owner).unwrap().contains("\"Imported\""));
    }
}
