//! The investigator record and its field-level mutations.
//!
//! Every mutation appends a human-readable line to [`Character::pending`];
//! only [`Character::save_session`] moves those lines into the changelog.
//! Derived maxima are recomputed after any change to their inputs.

use std::collections::BTreeMap;

use burge_mechanics::rules::derived;
use burge_mechanics::rules::skills::MYTHOS_SKILL;
use burge_mechanics::{
    Adjustment, Characteristic, Characteristics, DiceRoller, ResourceKind, is_standard_skill,
    normalize_skill_name, skill_base,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SheetError, SheetResult};

/// Lowest value a characteristic may hold once set.
pub const CHARACTERISTIC_MIN: i32 = 1;
/// Highest value a characteristic may hold.
pub const CHARACTERISTIC_MAX: i32 = 99;
/// Highest value a skill may hold.
pub const SKILL_MAX: i32 = 99;
/// Luck has no derived maximum; this is its ceiling.
pub const LUCK_MAX: i32 = 99;
/// Name given to records without one.
pub const DEFAULT_NAME: &str = "Unknown Investigator";

/// A pool with a current and a maximum value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pool {
    /// Current value.
    pub current: i32,
    /// Derived maximum.
    pub max: i32,
}

/// Luck tracks its starting value rather than a maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Luck {
    /// Current luck.
    pub current: i32,
    /// Luck rolled at creation.
    pub starting: i32,
}

/// Sanity, its ceiling, and the Mythos value that lowers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sanity {
    /// Current sanity.
    pub current: i32,
    /// `99 - mythos`.
    pub max: i32,
    /// Cached Cthulhu Mythos skill value.
    pub mythos: i32,
}

impl Default for Sanity {
    fn default() -> Self {
        Self {
            current: 0,
            max: derived::SANITY_CEILING,
            mythos: 0,
        }
    }
}

/// All resource pools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    /// Hit points.
    pub hp: Pool,
    /// Magic points.
    pub mp: Pool,
    /// Luck.
    pub luck: Luck,
    /// Sanity.
    pub sanity: Sanity,
    /// Unspent experience.
    pub xp: i32,
}

/// One skill the investigator has a stored value for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillEntry {
    /// Skill value, 0-99.
    pub value: i32,
    /// Used successfully since the last advancement.
    pub checked: bool,
    /// Passed an advancement roll; XP may be spent on it.
    pub eligible: bool,
    /// Not in the standard skill table.
    pub custom: bool,
    /// Last success was Extreme; the next advancement roll keeps the best of two.
    pub extreme: bool,
}

/// Persistent status conditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conditions {
    /// Set when HP drops to or below half CON; cleared only explicitly.
    pub major_wound: bool,
}

/// One saved session in the changelog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogEntry {
    /// Record version this session produced.
    #[serde(alias = "v")]
    pub version: u32,
    /// When the session was saved.
    #[serde(alias = "ts")]
    pub timestamp: DateTime<Utc>,
    /// Player note, or `Session N`.
    pub note: String,
    /// Pending lines moved in by the save.
    pub changes: Vec<String>,
}

impl Default for ChangelogEntry {
    fn default() -> Self {
        Self {
            version: 0,
            timestamp: DateTime::<Utc>::default(),
            note: String::new(),
            changes: Vec::new(),
        }
    }
}

/// An investigator.
///
/// Every field has a default, so records written by older versions load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    /// Display name.
    pub name: String,
    /// Occupation, free text.
    pub occupation: String,
    /// The eight characteristics.
    pub characteristics: Characteristics,
    /// Resource pools.
    pub resources: Resources,
    /// Skills with a stored entry, by canonical name.
    pub skills: BTreeMap<String, SkillEntry>,
    /// Status conditions.
    pub conditions: Conditions,
    /// Changes since the last session save, oldest first.
    pub pending: Vec<String>,
    /// Saved sessions, newest first.
    pub changelog: Vec<ChangelogEntry>,
    /// Incremented on each session save.
    pub version: u32,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last persisted mutation.
    pub last_updated: DateTime<Utc>,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            occupation: String::new(),
            characteristics: Characteristics::default(),
            resources: Resources::default(),
            skills: BTreeMap::new(),
            conditions: Conditions::default(),
            pending: Vec::new(),
            changelog: Vec::new(),
            version: 1,
            created_at: DateTime::<Utc>::default(),
            last_updated: DateTime::<Utc>::default(),
        }
    }
}

/// A before/after pair for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    /// Value before the mutation.
    pub old: i32,
    /// Value after the mutation.
    pub new: i32,
}

/// Status transitions reported when HP changes. Only the major wound is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HpSignal {
    /// HP crossed to or below half CON.
    MajorWound,
    /// HP is at or below 0.
    Unconscious,
    /// HP is below negative CON.
    Dead,
}

impl std::fmt::Display for HpSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::MajorWound => "Major wound!",
            Self::Unconscious => "Unconscious!",
            Self::Dead => "Dead!",
        })
    }
}

/// The effect of a resource adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceChange {
    /// Which pool.
    pub kind: ResourceKind,
    /// Before and after.
    pub change: Change,
    /// Pool maximum, if it has one.
    pub max: Option<i32>,
    /// How the new value came about, e.g. `-6` or `rolled 1d6: 4`.
    pub detail: Option<String>,
    /// HP transitions.
    pub signals: Vec<HpSignal>,
}

/// Where a skill value used for a roll came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillSource {
    /// A stored entry.
    Stored,
    /// The standard table's base value.
    Base,
    /// A custom skill with no entry; value 0.
    Unset,
}

impl Character {
    /// A fresh record with everything zeroed.
    pub fn new(name: &str, occupation: Option<&str>, now: DateTime<Utc>) -> Self {
        Self {
            name: name.trim().to_string(),
            occupation: occupation.map(str::trim).unwrap_or_default().to_string(),
            created_at: now,
            last_updated: now,
            ..Self::default()
        }
    }

    /// Refresh cached maxima from characteristics and the Mythos skill.
    ///
    /// Currents are pulled down to any lowered maximum.
    pub fn recompute_derived(&mut self) {
        let c = &self.characteristics;
        let mythos = self.skills.get(MYTHOS_SKILL).map_or(0, |s| s.value);
        let res = &mut self.resources;

        res.hp.max = derived::hp_max(c.constitution, c.size);
        res.mp.max = derived::mp_max(c.power);
        res.sanity.mythos = mythos;
        res.sanity.max = derived::sanity_max(mythos);
        self.clamp_currents();
    }

    /// Pull each current value into its pool's range.
    ///
    /// HP is only capped above; MP, sanity and luck stay within `[0, max]`.
    pub fn clamp_currents(&mut self) {
        let res = &mut self.resources;
        res.hp.current = res.hp.current.min(res.hp.max);
        res.mp.current = res.mp.current.clamp(0, res.mp.max.max(0));
        res.sanity.current = res.sanity.current.clamp(0, res.sanity.max.max(0));
        res.luck.current = res.luck.current.clamp(0, LUCK_MAX);
        res.luck.starting = res.luck.starting.clamp(0, LUCK_MAX);
        res.xp = res.xp.max(0);
    }

    /// Set one characteristic to an absolute value or by a delta, clamped to 1-99.
    pub fn set_characteristic(
        &mut self,
        key: Characteristic,
        adjustment: &Adjustment,
    ) -> SheetResult<Change> {
        let old = self.characteristics.get(key);
        let target = match adjustment {
            Adjustment::Set(n) => *n,
            Adjustment::Delta(d) => old.saturating_add(*d),
            Adjustment::Max | Adjustment::Roll { .. } => {
                return Err(SheetError::validation(
                    key.key(),
                    "use a number or a +/- delta",
                ));
            }
        };
        let new = target.clamp(CHARACTERISTIC_MIN, CHARACTERISTIC_MAX);

        self.characteristics.set(key, new);
        self.recompute_derived();
        self.pending.push(format!("{key}: {old}→{new}"));
        Ok(Change { old, new })
    }

    /// Set all eight characteristics (sheet order) and reset the pools.
    ///
    /// HP and MP refill, sanity starts at POW, and luck is zeroed.
    pub fn set_characteristics(&mut self, values: [i32; 8]) -> SheetResult<()> {
        for (key, value) in Characteristic::ALL.into_iter().zip(values) {
            if !(CHARACTERISTIC_MIN..=CHARACTERISTIC_MAX).contains(&value) {
                return Err(SheetError::validation(
                    key.key(),
                    format!("{value} is outside {CHARACTERISTIC_MIN}-{CHARACTERISTIC_MAX}"),
                ));
            }
        }

        let before = self.characteristics;
        self.characteristics = Characteristics::from_array(values);
        for (key, new) in self.characteristics.iter() {
            let old = before.get(key);
            if old != new {
                self.pending.push(format!("{key}: {old}→{new}"));
            }
        }

        self.recompute_derived();
        let res = &mut self.resources;
        res.hp.current = res.hp.max;
        res.mp.current = res.mp.max;
        res.sanity.current = self.characteristics.power.clamp(0, res.sanity.max.max(0));
        res.luck = Luck::default();
        Ok(())
    }

    /// Adjust a resource pool.
    ///
    /// HP is capped at its maximum but may go negative; the other pools
    /// are clamped to `[0, max]` and XP to `>= 0`.
    pub fn set_resource(
        &mut self,
        kind: ResourceKind,
        adjustment: &Adjustment,
        roller: &mut impl DiceRoller,
    ) -> SheetResult<ResourceChange> {
        let max = self.pool_max(kind);
        let old = self.resource(kind);
        let adjusted = adjustment.apply(old, max, roller)?;

        let new = match (kind, max) {
            (ResourceKind::Hp, Some(max)) => adjusted.value.min(max),
            (_, Some(max)) => adjusted.value.clamp(0, max.max(0)),
            (_, None) => adjusted.value.max(0),
        };
        self.write_resource(kind, new);

        let detail = match (&adjusted.throw, adjusted.delta) {
            (Some(throw), _) => Some(format!("rolled {adjustment}: {}", throw.total())),
            (None, Some(delta)) => Some(format!("{delta:+}")),
            (None, None) => None,
        };

        let mut signals = Vec::new();
        if kind == ResourceKind::Hp {
            let con = self.characteristics.constitution;
            let threshold = derived::major_wound_threshold(con);
            if new <= threshold && old > threshold {
                self.conditions.major_wound = true;
                signals.push(HpSignal::MajorWound);
            }
            if new <= 0 {
                signals.push(HpSignal::Unconscious);
            }
            if new < -con {
                signals.push(HpSignal::Dead);
            }
        }

        let mut line = format!("{}: {old}→{new}", kind.key());
        if let Some(detail) = &detail {
            line.push_str(&format!(" ({detail})"));
        }
        self.pending.push(line);

        Ok(ResourceChange {
            kind,
            change: Change { old, new },
            max,
            detail,
            signals,
        })
    }

    /// Store a skill value, clamped to 0-99, keeping its advancement flags.
    pub fn set_skill(&mut self, name: &str, value: i32) -> SheetResult<(String, Change)> {
        let canonical = normalize_skill_name(name);
        if canonical.is_empty() {
            return Err(SheetError::validation("skill", "name is empty"));
        }
        let new = value.clamp(0, SKILL_MAX);
        let custom = !is_standard_skill(&canonical);

        let entry = self.skills.entry(canonical.clone()).or_default();
        let old = entry.value;
        entry.value = new;
        entry.custom = custom;

        if canonical == MYTHOS_SKILL {
            self.recompute_derived();
        }
        self.pending.push(format!("{canonical}: {old}→{new}"));
        Ok((canonical, Change { old, new }))
    }

    /// Set, clear, or (with `None`) toggle the major-wound condition.
    pub fn set_major_wound(&mut self, state: Option<bool>) -> bool {
        let next = state.unwrap_or(!self.conditions.major_wound);
        self.conditions.major_wound = next;
        self.pending.push(format!(
            "major wound: {}",
            if next { "on" } else { "off" }
        ));
        next
    }

    /// The value a roll against `name` uses, and where it came from.
    pub fn skill_value(&self, name: &str) -> (String, i32, SkillSource) {
        let canonical = normalize_skill_name(name);
        if let Some(entry) = self.skills.get(&canonical) {
            return (canonical, entry.value, SkillSource::Stored);
        }
        if is_standard_skill(&canonical) {
            let base = skill_base(&canonical, Some(&self.characteristics));
            return (canonical, base as i32, SkillSource::Base);
        }
        (canonical, 0, SkillSource::Unset)
    }

    /// The entry for `name`, created at its base value if missing.
    pub(crate) fn skill_entry_or_base(&mut self, canonical: &str) -> &mut SkillEntry {
        let base = skill_base(canonical, Some(&self.characteristics)) as i32;
        let custom = !is_standard_skill(canonical);
        self.skills
            .entry(canonical.to_string())
            .or_insert(SkillEntry {
                value: base,
                custom,
                ..SkillEntry::default()
            })
    }

    /// Move pending changes into a new changelog head and bump the version.
    pub fn save_session(
        &mut self,
        note: Option<&str>,
        note_prefix: &str,
        now: DateTime<Utc>,
    ) -> SheetResult<ChangelogEntry> {
        if self.pending.is_empty() {
            return Err(SheetError::NoPendingChanges);
        }
        self.version += 1;
        let note = match note.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => format!("{note_prefix} {}", self.version),
        };
        let entry = ChangelogEntry {
            version: self.version,
            timestamp: now,
            note,
            changes: std::mem::take(&mut self.pending),
        };
        self.changelog.insert(0, entry.clone());
        Ok(entry)
    }

    /// The newest `count` sessions.
    pub fn history(&self, count: usize) -> &[ChangelogEntry] {
        &self.changelog[..count.min(self.changelog.len())]
    }

    /// Current value of a pool.
    pub fn resource(&self, kind: ResourceKind) -> i32 {
        let r = &self.resources;
        match kind {
            ResourceKind::Hp => r.hp.current,
            ResourceKind::Mp => r.mp.current,
            ResourceKind::Sanity => r.sanity.current,
            ResourceKind::Luck => r.luck.current,
            ResourceKind::Xp => r.xp,
        }
    }

    /// Ceiling of a pool; XP has none.
    pub fn pool_max(&self, kind: ResourceKind) -> Option<i32> {
        let r = &self.resources;
        match kind {
            ResourceKind::Hp => Some(r.hp.max),
            ResourceKind::Mp => Some(r.mp.max),
            ResourceKind::Sanity => Some(r.sanity.max),
            ResourceKind::Luck => Some(LUCK_MAX),
            ResourceKind::Xp => None,
        }
    }

    fn write_resource(&mut self, kind: ResourceKind, value: i32) {
        let r = &mut self.resources;
        match kind {
            ResourceKind::Hp => r.hp.current = value,
            ResourceKind::Mp => r.mp.current = value,
            ResourceKind::Sanity => r.sanity.current = value,
            ResourceKind::Luck => r.luck.current = value,
            ResourceKind::Xp => r.xp = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use burge_mechanics::ScriptedRoller;

    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn harvey() -> Character {
        let mut c = Character::new("Harvey Walters", Some("Professor"), now());
        c.set_characteristics([40, 50, 45, 60, 65, 55, 80, 85]).unwrap();
        c
    }

    fn adjust(c: &mut Character, kind: ResourceKind, text: &str) -> ResourceChange {
        let mut roller = ScriptedRoller::default();
        c.set_resource(kind, &Adjustment::parse(text).unwrap(), &mut roller)
            .unwrap()
    }

    #[test]
    fn new_record_is_zeroed() {
        let c = Character::new("  Harvey Walters ", None, now());
        assert_eq!(c.name, "Harvey Walters");
        assert_eq!(c.occupation, "");
        assert_eq!(c.characteristics, Characteristics::default());
        assert_eq!(c.resources.sanity.max, 99);
        assert_eq!(c.version, 1);
        assert!(c.skills.is_empty());
        assert_eq!(c.created_at, now());
    }

    #[test]
    fn bulk_characteristics_reset_pools() {
        let c = harvey();
        assert_eq!(c.resources.hp, Pool { current: 11, max: 11 });
        assert_eq!(c.resources.mp, Pool { current: 13, max: 13 });
        assert_eq!(c.resources.sanity.current, 65);
        assert_eq!(c.resources.luck, Luck::default());
        assert_eq!(c.pending.len(), 8);
        assert_eq!(c.pending[0], "STR: 0→40");
    }

    #[test]
    fn bulk_characteristics_reject_out_of_range() {
        let mut c = Character::new("X", None, now());
        let err = c
            .set_characteristics([40, 50, 45, 60, 0, 55, 80, 85])
            .unwrap_err();
        assert!(matches!(err, SheetError::Validation { ref field, .. } if field == "POW"));
        assert_eq!(c.characteristics, Characteristics::default());
        assert!(c.pending.is_empty());
    }

    #[test]
    fn characteristic_clamps_and_recomputes() {
        let mut c = harvey();
        let change = c
            .set_characteristic(Characteristic::Con, &Adjustment::Delta(200))
            .unwrap();
        assert_eq!(change, Change { old: 50, new: 99 });
        assert_eq!(c.resources.hp.max, 15);
        assert_eq!(c.pending.last().unwrap(), "CON: 50→99");

        c.set_characteristic(Characteristic::Pow, &Adjustment::Set(-5))
            .unwrap();
        assert_eq!(c.characteristics.power, 1);
        assert_eq!(c.resources.mp.max, 0);
        assert_eq!(c.resources.mp.current, 0);
    }

    #[test]
    fn characteristic_rejects_max_keyword() {
        let mut c = harvey();
        assert!(
            c.set_characteristic(Characteristic::Str, &Adjustment::Max)
                .is_err()
        );
    }

    #[test]
    fn major_wound_latches() {
        let mut c = Character::new("X", None, now());
        c.set_characteristics([50, 20, 50, 90, 50, 50, 50, 50]).unwrap();
        assert_eq!(c.resources.hp.max, 11);

        let first = adjust(&mut c, ResourceKind::Hp, "-6");
        assert_eq!(first.change, Change { old: 11, new: 5 });
        assert_eq!(first.signals, vec![HpSignal::MajorWound]);
        assert!(c.conditions.major_wound);

        let second = adjust(&mut c, ResourceKind::Hp, "-6");
        assert_eq!(second.change.new, -1);
        assert_eq!(second.signals, vec![HpSignal::Unconscious]);

        adjust(&mut c, ResourceKind::Hp, "+10");
        assert!(c.conditions.major_wound);
        assert_eq!(c.resources.hp.current, 9);
    }

    #[test]
    fn hp_capped_at_max_and_death_below_negative_con() {
        let mut c = harvey();
        let r = adjust(&mut c, ResourceKind::Hp, "+50");
        assert_eq!(r.change.new, 11);

        let r = adjust(&mut c, ResourceKind::Hp, "-62");
        assert_eq!(r.change.new, -51);
        assert_eq!(r.signals, vec![HpSignal::Unconscious, HpSignal::Dead]);
    }

    #[test]
    fn clamp_currents_pulls_pools_into_range() {
        let mut c = harvey();
        c.resources.hp.current = 40;
        c.resources.mp.current = -2;
        c.resources.sanity.current = 120;
        c.resources.luck = Luck { current: 250, starting: -1 };
        c.clamp_currents();
        assert_eq!(c.resources.hp.current, 11);
        assert_eq!(c.resources.mp.current, 0);
        assert_eq!(c.resources.sanity.current, 99);
        assert_eq!(c.resources.luck, Luck { current: 99, starting: 0 });
    }

    #[test]
    fn pools_clamp_to_range() {
        let mut c = harvey();
        assert_eq!(adjust(&mut c, ResourceKind::Mp, "-40").change.new, 0);
        assert_eq!(adjust(&mut c, ResourceKind::Mp, "max").change.new, 13);
        assert_eq!(adjust(&mut c, ResourceKind::Sanity, "150").change.new, 99);
        assert_eq!(adjust(&mut c, ResourceKind::Luck, "120").change.new, 99);
        assert_eq!(adjust(&mut c, ResourceKind::Xp, "-3").change.new, 0);
        assert_eq!(adjust(&mut c, ResourceKind::Xp, "500").change.new, 500);
    }

    #[test]
    fn xp_has_no_max() {
        let mut c = harvey();
        let mut roller = ScriptedRoller::default();
        assert!(
            c.set_resource(ResourceKind::Xp, &Adjustment::Max, &mut roller)
                .is_err()
        );
    }

    #[test]
    fn dice_loss_is_recorded() {
        let mut c = harvey();
        let mut roller = ScriptedRoller::new([4]);
        let r = c
            .set_resource(
                ResourceKind::Sanity,
                &Adjustment::parse("-1d6").unwrap(),
                &mut roller,
            )
            .unwrap();
        assert_eq!(r.change, Change { old: 65, new: 61 });
        assert_eq!(c.pending.last().unwrap(), "san: 65→61 (rolled -1d6: 4)");
    }

    #[test]
    fn custom_skill_has_no_base() {
        let mut c = harvey();
        let (name, change) = c.set_skill("Wizardry", 35).unwrap();
        assert_eq!(name, "Wizardry");
        assert_eq!(change, Change { old: 0, new: 35 });
        assert!(c.skills["Wizardry"].custom);
        assert_eq!(skill_base("Wizardry", None), 0);
        assert_eq!(c.set_skill("wizardry", -4).unwrap().1.new, 0);
    }

    #[test]
    fn aliases_resolve_and_flags_are_kept() {
        let mut c = harvey();
        c.set_skill("spot", 50).unwrap();
        c.skills.get_mut("Spot Hidden").unwrap().checked = true;
        let (name, change) = c.set_skill("SPOT HIDDEN", 140).unwrap();
        assert_eq!(name, "Spot Hidden");
        assert_eq!(change.new, 99);
        let entry = c.skills["Spot Hidden"];
        assert!(entry.checked);
        assert!(!entry.custom);
    }

    #[test]
    fn mythos_lowers_sanity_ceiling() {
        let mut c = harvey();
        c.set_skill("mythos", 40).unwrap();
        assert_eq!(c.resources.sanity.mythos, 40);
        assert_eq!(c.resources.sanity.max, 59);
        assert_eq!(c.resources.sanity.current, 59);
    }

    #[test]
    fn skill_value_sources() {
        let mut c = harvey();
        c.set_skill("Library Use", 60).unwrap();
        assert_eq!(c.skill_value("library").1, 60);
        assert_eq!(c.skill_value("library").2, SkillSource::Stored);

        let (name, value, source) = c.skill_value("dodge");
        assert_eq!(name, "Dodge");
        assert_eq!(value, 22);
        assert_eq!(source, SkillSource::Base);

        assert_eq!(c.skill_value("Wizardry"), ("Wizardry".into(), 0, SkillSource::Unset));
    }

    #[test]
    fn wound_toggle() {
        let mut c = harvey();
        assert!(c.set_major_wound(None));
        assert!(!c.set_major_wound(None));
        assert!(!c.set_major_wound(Some(false)));
        assert!(c.set_major_wound(Some(true)));
        assert_eq!(c.pending.last().unwrap(), "major wound: on");
    }

    #[test]
    fn save_session_moves_pending() {
        let mut c = harvey();
        let pending = c.pending.clone();
        let entry = c.save_session(None, "Session", now()).unwrap();
        assert_eq!(entry.version, 2);
        assert_eq!(entry.note, "Session 2");
        assert_eq!(entry.changes, pending);
        assert!(c.pending.is_empty());
        assert_eq!(c.version, 2);

        assert!(matches!(
            c.save_session(None, "Session", now()),
            Err(SheetError::NoPendingChanges)
        ));

        c.set_major_wound(Some(true));
        c.save_session(Some("  The Haunting "), "Session", now())
            .unwrap();
        assert_eq!(c.changelog[0].note, "The Haunting");
        assert_eq!(c.changelog[1].note, "Session 2");
        assert_eq!(c.history(1).len(), 1);
        assert_eq!(c.history(10).len(), 2);
    }

    #[test]
    fn legacy_record_loads_with_defaults() {
        let json = r#"{
            "name": "Old Timer",
            "characteristics": {"STR": 50},
            "changelog": [{"v": 3, "ts": "2023-01-05T12:00:00+00:00", "note": "Session 3", "changes": ["STR: 40→50"]}],
            "version": 3
        }"#;
        let c: Character = serde_json::from_str(json).unwrap();
        assert_eq!(c.characteristics.strength, 50);
        assert_eq!(c.resources.sanity.max, 99);
        assert_eq!(c.changelog[0].version, 3);
        assert_eq!(c.changelog[0].timestamp.to_rfc3339(), "2023-01-05T12:00:00+00:00");
        assert!(!c.conditions.major_wound);
    }
}
