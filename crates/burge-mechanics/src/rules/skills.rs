//! Standard skills, their base values, and name aliasing.
//!
//! Skills outside the table are custom and start at 0. Parameterized
//! families such as `Firearms (...)` or `Science (...)` fall back to the
//! family's table entry when the exact specialization is not listed.

use super::Characteristics;

/// The skill whose value reduces maximum sanity.
pub const MYTHOS_SKILL: &str = "Cthulhu Mythos";

/// Dodge; its base is half DEX.
pub const DODGE_SKILL: &str = "Dodge";

/// Own language; its base is EDU.
pub const OWN_LANGUAGE_SKILL: &str = "Language (Own)";

/// Standard skills and base values, in table order.
pub const STANDARD_SKILLS: &[(&str, u32)] = &[
    // Combat
    (DODGE_SKILL, 0),
    ("Fighting (Brawl)", 25),
    ("Firearms (Handgun)", 20),
    ("Firearms (Rifle/Shotgun)", 25),
    ("Throw", 20),
    // Investigation
    ("Library Use", 20),
    ("Listen", 20),
    ("Spot Hidden", 25),
    ("Track", 10),
    // Social
    ("Charm", 15),
    ("Fast Talk", 5),
    ("Intimidate", 15),
    ("Persuade", 10),
    ("Psychology", 10),
    // Technical
    ("Art/Craft (Any)", 5),
    ("Electrical Repair", 10),
    ("First Aid", 30),
    ("Locksmith", 1),
    ("Mechanical Repair", 10),
    ("Medicine", 1),
    ("Operate Heavy Machinery", 1),
    // Knowledge
    ("Accounting", 5),
    ("Anthropology", 1),
    ("Appraise", 5),
    ("Archaeology", 1),
    (MYTHOS_SKILL, 0),
    ("History", 5),
    ("Law", 5),
    ("Natural World", 10),
    ("Occult", 5),
    ("Science (Any)", 1),
    // Languages
    (OWN_LANGUAGE_SKILL, 0),
    ("Language (Other)", 1),
    // Physical
    ("Climb", 20),
    ("Drive Auto", 20),
    ("Jump", 20),
    ("Pilot (Any)", 1),
    ("Ride", 5),
    ("Stealth", 20),
    ("Swim", 20),
    // Other
    ("Credit Rating", 0),
    ("Disguise", 5),
    ("Navigate", 10),
    ("Sleight of Hand", 10),
    ("Survival (Any)", 10),
];

/// Lower-case short names and their canonical skill.
pub const SKILL_ALIASES: &[(&str, &str)] = &[
    ("brawl", "Fighting (Brawl)"),
    ("fight", "Fighting (Brawl)"),
    ("handgun", "Firearms (Handgun)"),
    ("pistol", "Firearms (Handgun)"),
    ("rifle", "Firearms (Rifle/Shotgun)"),
    ("shotgun", "Firearms (Rifle/Shotgun)"),
    ("spot", "Spot Hidden"),
    ("library", "Library Use"),
    ("firstaid", "First Aid"),
    ("first-aid", "First Aid"),
    ("mythos", MYTHOS_SKILL),
    ("elec repair", "Electrical Repair"),
    ("mech repair", "Mechanical Repair"),
    ("heavy machinery", "Operate Heavy Machinery"),
    ("own language", OWN_LANGUAGE_SKILL),
    ("native language", OWN_LANGUAGE_SKILL),
];

/// Resolve aliases and standard-name casing to the canonical skill name.
///
/// Unknown names come back trimmed but otherwise unchanged.
pub fn normalize_skill_name(name: &str) -> String {
    let trimmed = name.trim();
    let lower = trimmed.to_lowercase();

    if let Some((_, canonical)) = SKILL_ALIASES.iter().find(|(alias, _)| *alias == lower) {
        return (*canonical).to_string();
    }
    if let Some((canonical, _)) = STANDARD_SKILLS
        .iter()
        .find(|(skill, _)| skill.to_lowercase() == lower)
    {
        return (*canonical).to_string();
    }
    trimmed.to_string()
}

/// The table entry for a name: exact match first, then its family.
fn table_entry(normalized: &str) -> Option<(&'static str, u32)> {
    if let Some(&entry) = STANDARD_SKILLS.iter().find(|(s, _)| *s == normalized) {
        return Some(entry);
    }

    let family = family_name(normalized);
    if family.is_empty() {
        return None;
    }
    let members: Vec<(&'static str, u32)> = STANDARD_SKILLS
        .iter()
        .filter(|(s, _)| s.starts_with(family))
        .copied()
        .collect();
    // prefer the catch-all specialization when the family has one
    members
        .iter()
        .find(|(s, _)| s.ends_with("(Any)") || s.ends_with("(Other)"))
        .or(members.first())
        .copied()
}

/// The part of a skill name before any parenthesized specialization.
fn family_name(name: &str) -> &str {
    name.split('(').next().unwrap_or("").trim()
}

/// True if the name (after aliasing) is a standard skill or a member of a
/// standard family.
pub fn is_standard_skill(name: &str) -> bool {
    table_entry(&normalize_skill_name(name)).is_some()
}

/// Base value for a skill the character has no entry for.
///
/// With characteristics, Dodge resolves to half DEX and own language to
/// EDU. Custom skills are 0.
pub fn skill_base(name: &str, characteristics: Option<&Characteristics>) -> u32 {
    let normalized = normalize_skill_name(name);
    let Some((canonical, base)) = table_entry(&normalized) else {
        return 0;
    };

    match characteristics {
        Some(chars) if canonical == normalized && canonical == DODGE_SKILL => {
            super::derived::dodge_base(chars.dexterity)
        }
        Some(chars) if canonical == normalized && canonical == OWN_LANGUAGE_SKILL => {
            super::derived::own_language_base(chars.education)
        }
        _ => base,
    }
}
