//! Skill advancement: checked → eligible → improved with XP.
//!
//! A successful roll (or an explicit mark) checks a skill. At session end
//! each checked skill gets one advancement roll, which passes when it
//! exceeds the current value. A pass makes the skill eligible; spending XP
//! on an eligible skill raises it point for point.

use burge_mechanics::{DiceExpr, DiceRoller, Die, Keep, SuccessTier, normalize_skill_name};

use crate::character::{Change, Character, SKILL_MAX};
use crate::error::{SheetError, SheetResult};

/// One skill's advancement roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvancementRoll {
    /// Canonical skill name.
    pub skill: String,
    /// Skill value at the time of the roll.
    pub value: i32,
    /// The kept d100 face.
    pub roll: u32,
    /// Every d100 thrown (two when the skill had an Extreme success).
    pub dice: Vec<u32>,
    /// The roll exceeded the value.
    pub passed: bool,
}

/// The result of spending XP on a skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spend {
    /// Canonical skill name.
    pub skill: String,
    /// Skill value before and after.
    pub change: Change,
    /// XP actually deducted (less than requested when capped at 99).
    pub xp_spent: i32,
    /// XP left in the pool.
    pub xp_remaining: i32,
}

/// Mark a skill as used, creating its entry at the base value if needed.
pub fn check_skill(character: &mut Character, name: &str) -> SheetResult<String> {
    let canonical = normalize_skill_name(name);
    if canonical.is_empty() {
        return Err(SheetError::validation("skill", "name is empty"));
    }
    character.skill_entry_or_base(&canonical).checked = true;
    character.pending.push(format!("{canonical}: checked"));
    Ok(canonical)
}

/// Record a roll's tier against a skill. Returns true if the skill was checked.
///
/// Any success checks the skill; an Extreme success also flags it for the
/// better advancement roll.
pub fn record_success(character: &mut Character, canonical: &str, tier: SuccessTier) -> bool {
    if !tier.is_success() {
        return false;
    }
    let entry = character.skill_entry_or_base(canonical);
    let newly_checked = !entry.checked;
    entry.checked = true;
    if tier == SuccessTier::Extreme {
        entry.extreme = true;
    }
    if newly_checked {
        character.pending.push(format!("{canonical}: checked"));
    }
    true
}

/// Roll advancement for every checked skill, in name order.
///
/// Flags are cleared whatever the outcome. Returns an empty list when no
/// skill was checked.
pub fn advance(character: &mut Character, roller: &mut impl DiceRoller) -> Vec<AdvancementRoll> {
    let single = DiceExpr::new(1, Die::D100);
    let best_of_two = DiceExpr::new(2, Die::D100).keep(Keep::Highest(1));

    let mut results = Vec::new();
    for (name, entry) in character.skills.iter_mut().filter(|(_, e)| e.checked) {
        let expr = if entry.extreme { &best_of_two } else { &single };
        let throw = expr.throw(roller);
        let roll = throw.first_kept();
        let passed = i64::from(roll) > i64::from(entry.value);

        if passed {
            entry.eligible = true;
        }
        entry.checked = false;
        entry.extreme = false;

        tracing::debug!(skill = %name, value = entry.value, roll, passed, "advancement roll");
        results.push(AdvancementRoll {
            skill: name.clone(),
            value: entry.value,
            roll,
            dice: throw.natural,
            passed,
        });
    }

    for r in &results {
        character.pending.push(format!(
            "{}: advancement {} vs {} → {}",
            r.skill,
            r.roll,
            r.value,
            if r.passed { "eligible" } else { "no change" }
        ));
    }
    results
}

/// Spend XP on an eligible skill, one point of skill per XP.
///
/// The increase is capped so the skill does not pass 99; only the XP
/// actually applied is deducted.
pub fn spend_xp(character: &mut Character, name: &str, amount: i32) -> SheetResult<Spend> {
    if amount < 1 {
        return Err(SheetError::validation("amount", "must be at least 1"));
    }
    let canonical = normalize_skill_name(name);
    let available = character.resources.xp;
    let Some(entry) = character.skills.get_mut(&canonical) else {
        return Err(SheetError::not_found(format!("skill '{canonical}'")));
    };
    if !entry.eligible {
        return Err(SheetError::validation(
            canonical,
            "not eligible for improvement; it needs a passed advancement roll",
        ));
    }
    if available < amount {
        return Err(SheetError::InsufficientXp {
            required: amount,
            available,
        });
    }

    let old = entry.value;
    let new = old.saturating_add(amount).min(SKILL_MAX);
    let spent = new - old;
    entry.value = new;
    entry.eligible = false;
    character.resources.xp -= spent;

    if canonical == burge_mechanics::rules::skills::MYTHOS_SKILL {
        character.recompute_derived();
    }
    character
        .pending
        .push(format!("{canonical}: {old}→{new} (advanced, {spent} XP)"));

    Ok(Spend {
        skill: canonical,
        change: Change { old, new },
        xp_spent: spent,
        xp_remaining: character.resources.xp,
    })
}
