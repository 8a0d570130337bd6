//! Plain-text views of a record: the sheet summary and the skill list.

use burge_mechanics::rules::derived;

use crate::character::{Character, ChangelogEntry, SkillEntry};

/// How many skills the sheet summary shows.
pub const SUMMARY_SKILLS: usize = 10;

/// One row of the skill list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillLine {
    /// Canonical name.
    pub name: String,
    /// Stored value.
    pub value: i32,
    /// Marker characters: `*` custom, `✓` checked, `↑` eligible.
    pub markers: String,
}

impl std::fmt::Display for SkillLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.value)?;
        if !self.markers.is_empty() {
            write!(f, " {}", self.markers)?;
        }
        Ok(())
    }
}

fn markers(entry: &SkillEntry) -> String {
    let mut out = String::new();
    if entry.custom {
        out.push('*');
    }
    if entry.checked {
        out.push('✓');
    }
    if entry.eligible {
        out.push('↑');
    }
    out
}

/// Stored skills, highest value first, then by name.
pub fn skill_lines(character: &Character) -> Vec<SkillLine> {
    let mut lines: Vec<SkillLine> = character
        .skills
        .iter()
        .map(|(name, entry)| SkillLine {
            name: name.clone(),
            value: entry.value,
            markers: markers(entry),
        })
        .collect();
    lines.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    lines
}

/// A compact multi-line character sheet.
pub fn sheet_text(character: &Character) -> String {
    let c = &character.characteristics;
    let r = &character.resources;
    let mut out = Vec::new();

    if character.occupation.is_empty() {
        out.push(character.name.clone());
    } else {
        out.push(format!("{} ({})", character.name, character.occupation));
    }
    out.push(format!(
        "STR {}  CON {}  DEX {}  SIZ {}",
        c.strength, c.constitution, c.dexterity, c.size
    ));
    out.push(format!(
        "POW {}  APP {}  INT {}  EDU {}",
        c.power, c.appearance, c.intelligence, c.education
    ));
    out.push(format!(
        "HP {}/{}  MP {}/{}  SAN {}/{}  Luck {}  XP {}",
        r.hp.current,
        r.hp.max,
        r.mp.current,
        r.mp.max,
        r.sanity.current,
        r.sanity.max,
        r.luck.current,
        r.xp
    ));

    if character.conditions.major_wound {
        out.push(format!(
            "Major wound (threshold {})",
            derived::major_wound_threshold(c.constitution)
        ));
    }

    let skills = skill_lines(character);
    if !skills.is_empty() {
        let shown: Vec<String> = skills
            .iter()
            .take(SUMMARY_SKILLS)
            .map(ToString::to_string)
            .collect();
        out.push(format!("Skills: {}", shown.join(", ")));
        if skills.len() > SUMMARY_SKILLS {
            out.push(format!("(+{} more)", skills.len() - SUMMARY_SKILLS));
        }
    }

    out.push(format!(
        "Version {}  ({} pending change{})",
        character.version,
        character.pending.len(),
        if character.pending.len() == 1 { "" } else { "s" }
    ));
    out.join("\n")
}

/// One changelog entry as a heading line plus indented changes.
pub fn history_text(entry: &ChangelogEntry) -> String {
    let mut out = vec![format!(
        "v{} {} {}",
        entry.version,
        entry.timestamp.format("%Y-%m-%d %H:%M"),
        entry.note
    )];
    out.extend(entry.changes.iter().map(|c| format!("  {c}")));
    out.join("\n")
}
