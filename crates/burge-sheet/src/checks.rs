//! Checks made against a character record.
//!
//! A skill check uses the stored value, the table base, or 0 for an unset
//! custom skill. A major wound adds one penalty die to every check, and a
//! successful skill check marks the skill for advancement.

use burge_mechanics::{Characteristic, DiceRoller, Difficulty, RollOutcome, roll_check};

use crate::advancement;
use crate::character::{Character, SkillSource};

/// What a check was rolled against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckTarget {
    /// A skill, with where its value came from.
    Skill {
        /// Canonical name.
        name: String,
        /// Stored, base, or unset.
        source: SkillSource,
    },
    /// A characteristic.
    Characteristic(Characteristic),
}

/// A resolved check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// The skill or characteristic.
    pub target: CheckTarget,
    /// The roll and its tier.
    pub outcome: RollOutcome,
    /// One of the penalty dice came from a major wound.
    pub wound_penalty: bool,
    /// The check marked its skill for advancement.
    pub marked: bool,
}

impl CheckReport {
    /// Display name of the target.
    pub fn name(&self) -> String {
        match &self.target {
            CheckTarget::Skill { name, .. } => name.clone(),
            CheckTarget::Characteristic(c) => c.key().to_string(),
        }
    }

    /// Multi-line text for the player.
    pub fn render(&self) -> String {
        let o = &self.outcome;
        let suffix = match self.target {
            CheckTarget::Skill {
                source: SkillSource::Base,
                ..
            } => " (base)",
            CheckTarget::Skill {
                source: SkillSource::Unset,
                ..
            } => " (unset)",
            _ => "",
        };

        let mut lines = Vec::new();
        if o.difficulty == Difficulty::Regular {
            lines.push(format!("{} ({}){suffix}", self.name(), o.threshold));
        } else {
            let title = match o.difficulty {
                Difficulty::Hard => "Hard",
                _ => "Extreme",
            };
            lines.push(format!("{} ({title}: {}){suffix}", self.name(), o.threshold));
        }
        lines.push(format!("Roll: {} - {}", o.roll, o.tier.label()));

        let tens = || {
            o.dice
                .tens
                .iter()
                .map(|t| if *t == 0 { "00".to_string() } else { (t * 10).to_string() })
                .collect::<Vec<_>>()
                .join(", ")
        };
        if o.bonus_dice > 0 {
            lines.push(format!("Bonus dice: {} (tens: {})", o.bonus_dice, tens()));
        } else if o.penalty_dice > 0 {
            let wound = if self.wound_penalty { ", major wound" } else { "" };
            lines.push(format!(
                "Penalty dice: {}{wound} (tens: {})",
                o.penalty_dice,
                tens()
            ));
        }
        if self.marked {
            lines.push(format!("{} checked for advancement", self.name()));
        }
        lines.join("\n")
    }
}

/// Roll a skill check and mark the skill on success.
pub fn skill_check(
    character: &mut Character,
    name: &str,
    difficulty: Difficulty,
    bonus_dice: u32,
    penalty_dice: u32,
    roller: &mut impl DiceRoller,
) -> CheckReport {
    let (canonical, value, source) = character.skill_value(name);
    let wound_penalty = character.conditions.major_wound;
    let penalty = penalty_dice + u32::from(wound_penalty);

    let outcome = roll_check(value.max(0) as u32, difficulty, bonus_dice, penalty, roller);
    let newly_checked = outcome.is_success()
        && !character
            .skills
            .get(&canonical)
            .is_some_and(|s| s.checked);
    advancement::record_success(character, &canonical, outcome.tier);

    CheckReport {
        target: CheckTarget::Skill {
            name: canonical,
            source,
        },
        outcome,
        wound_penalty,
        marked: newly_checked,
    }
}

/// Roll against a characteristic. Never marks anything.
pub fn characteristic_check(
    character: &Character,
    key: Characteristic,
    difficulty: Difficulty,
    bonus_dice: u32,
    penalty_dice: u32,
    roller: &mut impl DiceRoller,
) -> CheckReport {
    let value = character.characteristics.get(key).max(0) as u32;
    let wound_penalty = character.conditions.major_wound;
    let penalty = penalty_dice + u32::from(wound_penalty);

    CheckReport {
        target: CheckTarget::Characteristic(key),
        outcome: roll_check(value, difficulty, bonus_dice, penalty, roller),
        wound_penalty,
        marked: false,
    }
}
