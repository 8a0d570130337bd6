//! Import and export in the Dhole's House investigator JSON format.
//!
//! The external schema stores every number as a decimal string and splits
//! skill specializations into a separate `subskill` field. Import is
//! lenient about value types and always produces a fresh version-1 record.

mod lenient;
mod schema;

pub use lenient::safe_int;

use std::collections::BTreeMap;

use burge_mechanics::rules::derived;
use burge_mechanics::rules::skills::MYTHOS_SKILL;
use burge_mechanics::{Characteristic, Characteristics, is_standard_skill};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::character::{
    CHARACTERISTIC_MAX, Character, DEFAULT_NAME, Luck, Pool, Resources, SKILL_MAX, Sanity,
    SkillEntry,
};
use crate::error::{SheetError, SheetResult};
use schema::{Document, Header, Investigator, PersonalDetails, SheetStats, SkillList, SkillRow};

/// Build a record from an exported investigator document.
///
/// Returns the record and the number of skills imported. Skills with a
/// value of 0 or less are skipped; missing HP and MP maxima are derived
/// from the characteristics.
pub fn import_character(raw: &str, now: DateTime<Utc>) -> SheetResult<(Character, usize)> {
    let data: Value = serde_json::from_str(raw)
        .map_err(|e| SheetError::Import(format!("could not parse JSON: {e}")))?;
    let inv = data
        .get("Investigator")
        .filter(|v| v.is_object())
        .ok_or_else(|| SheetError::Import("missing Investigator section".into()))?;

    let personal = inv.get("PersonalDetails");
    let detail = |key: &str| {
        personal
            .and_then(|p| p.get(key))
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default()
    };
    let name = match detail("Name") {
        "" => DEFAULT_NAME,
        n => n,
    };
    let occupation = detail("Occupation");

    let stats = inv.get("Characteristics");
    let stat = |key: &str, default: i32| safe_int(stats.and_then(|s| s.get(key)), default);

    let mut characteristics = Characteristics::default();
    for key in Characteristic::ALL {
        characteristics.set(key, stat(key.key(), 0).clamp(0, CHARACTERISTIC_MAX));
    }

    let mut skills = BTreeMap::new();
    let mut mythos = 0;
    for row in skill_rows(inv.get("Skills")) {
        let Some(base) = row.get("name").and_then(Value::as_str).map(str::trim) else {
            continue;
        };
        if base.is_empty() {
            continue;
        }
        let value = safe_int(row.get("value"), 0).min(SKILL_MAX);
        let full_name = match row.get("subskill").and_then(Value::as_str).map(str::trim) {
            Some(sub) if !sub.is_empty() && sub != "None" => format!("{base} ({sub})"),
            _ => base.to_string(),
        };

        if base == MYTHOS_SKILL {
            mythos = value.max(0);
        }
        if value > 0 {
            skills.insert(
                full_name.clone(),
                SkillEntry {
                    value,
                    custom: !is_standard_skill(&full_name),
                    ..SkillEntry::default()
                },
            );
        }
    }

    let mut hp = Pool {
        current: stat("HitPts", 0),
        max: stat("HitPtsMax", 0),
    };
    if hp.max <= 0 {
        hp.max = derived::hp_max(characteristics.constitution, characteristics.size);
    }
    if hp.current == 0 {
        hp.current = hp.max;
    }
    let mut mp = Pool {
        current: stat("MagicPts", 0),
        max: stat("MagicPtsMax", 0),
    };
    if mp.max <= 0 {
        mp.max = derived::mp_max(characteristics.power);
    }
    if mp.current == 0 {
        mp.current = mp.max;
    }

    let mut sanity_max =
        stat("SanityMax", derived::SANITY_CEILING).clamp(0, derived::SANITY_CEILING);
    if mythos > 0 {
        sanity_max = sanity_max.min(derived::sanity_max(mythos));
    }
    let luck = stat("Luck", 0);

    let count = skills.len();
    let mut character = Character {
        name: name.to_string(),
        occupation: occupation.to_string(),
        characteristics,
        resources: Resources {
            hp,
            mp,
            luck: Luck {
                current: luck,
                starting: luck,
            },
            sanity: Sanity {
                current: stat("Sanity", 0),
                max: sanity_max,
                mythos,
            },
            xp: 0,
        },
        skills,
        created_at: now,
        last_updated: now,
        ..Character::default()
    };
    character.clamp_currents();

    tracing::info!(name = %character.name, skills = count, "imported investigator");
    Ok((character, count))
}

/// The skill list, from `{"Skill": [...]}` or a bare array.
fn skill_rows(container: Option<&Value>) -> impl Iterator<Item = &Value> {
    let rows = match container {
        Some(Value::Object(map)) => map.get("Skill").and_then(Value::as_array),
        Some(Value::Array(rows)) => Some(rows),
        _ => None,
    };
    rows.into_iter().flatten().filter(|row| row.is_object())
}

/// Split `"Science (Chemistry)"` into `("Science", Some("Chemistry"))`.
///
/// Only splits when import would join the parts back into the same name;
/// anything else is exported whole.
fn split_specialization(name: &str) -> (String, Option<String>) {
    let split = name
        .split_once('(')
        .and_then(|(base, rest)| Some((base.trim(), rest.strip_suffix(')')?.trim())))
        .filter(|(base, sub)| !base.is_empty() && !sub.is_empty() && *sub != "None")
        .filter(|(base, sub)| format!("{base} ({sub})") == name);
    match split {
        Some((base, sub)) => (base.to_string(), Some(sub.to_string())),
        None => (name.to_string(), None),
    }
}

/// Render a record as a pretty-printed investigator document.
pub fn export_character(character: &Character) -> SheetResult<String> {
    let c = &character.characteristics;
    let r = &character.resources;

    let skill = character
        .skills
        .iter()
        .map(|(full_name, entry)| {
            let (name, subskill) = split_specialization(full_name);
            SkillRow {
                name,
                subskill,
                value: entry.value.to_string(),
                half: (entry.value / 2).to_string(),
                fifth: (entry.value / 5).to_string(),
            }
        })
        .collect();

    let document = Document {
        investigator: Investigator {
            header: Header::default(),
            personal_details: PersonalDetails {
                name: character.name.clone(),
                occupation: character.occupation.clone(),
            },
            characteristics: SheetStats {
                strength: c.strength.to_string(),
                constitution: c.constitution.to_string(),
                dexterity: c.dexterity.to_string(),
                size: c.size.to_string(),
                power: c.power.to_string(),
                appearance: c.appearance.to_string(),
                intelligence: c.intelligence.to_string(),
                education: c.education.to_string(),
                hit_pts: r.hp.current.to_string(),
                hit_pts_max: r.hp.max.to_string(),
                magic_pts: r.mp.current.to_string(),
                magic_pts_max: r.mp.max.to_string(),
                luck: r.luck.current.to_string(),
                sanity: r.sanity.current.to_string(),
                sanity_max: r.sanity.max.to_string(),
            },
            skills: SkillList { skill },
        },
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn sample() -> String {
        json!({
            "Investigator": {
                "PersonalDetails": {"Name": "Harvey Walters", "Occupation": "Professor"},
                "Characteristics": {
                    "STR": "40", "CON": "50", "DEX": "45", "SIZ": "60",
                    "POW": "65", "APP": "55", "INT": "80", "EDU": "85",
                    "Luck": "50", "Sanity": "55", "SanityMax": "99"
                },
                "Skills": {"Skill": [
                    {"name": "Library Use", "value": "70", "half": "35", "fifth": "14"},
                    {"name": "Science", "subskill": "Chemistry", "value": "41"},
                    {"name": "Language", "subskill": "None", "value": "30"},
                    {"name": "Cthulhu Mythos", "value": "12"},
                    {"name": "Credit Rating", "value": "0"},
                    {"name": "Wizardry", "value": 35},
                    {"name": "", "value": "50"},
                    "not a skill"
                ]}
            }
        })
        .to_string()
    }

    #[test]
    fn imports_sample_document() {
        let (c, count) = import_character(&sample(), now()).unwrap();
        assert_eq!(c.name, "Harvey Walters");
        assert_eq!(c.occupation, "Professor");
        assert_eq!(c.characteristics.education, 85);
        assert_eq!(c.resources.hp, Pool { current: 11, max: 11 });
        assert_eq!(c.resources.mp, Pool { current: 13, max: 13 });
        assert_eq!(c.resources.luck, Luck { current: 50, starting: 50 });
        assert_eq!(c.resources.sanity.max, 87);
        assert_eq!(c.resources.sanity.mythos, 12);
        assert_eq!(c.version, 1);
        assert!(c.changelog.is_empty());

        assert_eq!(count, 5);
        assert_eq!(c.skills["Science (Chemistry)"].value, 41);
        assert!(!c.skills["Science (Chemistry)"].custom);
        assert!(c.skills.contains_key("Language"));
        assert!(!c.skills.contains_key("Credit Rating"));
        assert!(c.skills["Wizardry"].custom);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let (c, count) = import_character(r#"{"Investigator": {}}"#, now()).unwrap();
        assert_eq!(c.name, DEFAULT_NAME);
        assert_eq!(c.resources.sanity.max, 99);
        assert_eq!(count, 0);
    }

    #[test]
    fn out_of_range_currents_are_clamped() {
        let raw = json!({
            "Investigator": {
                "Characteristics": {
                    "CON": "50", "SIZ": "60", "POW": "50",
                    "HitPts": "40", "HitPtsMax": "11",
                    "MagicPts": "-3", "MagicPtsMax": "10",
                    "Luck": "250", "Sanity": "90", "SanityMax": "150"
                },
                "Skills": {"Skill": [{"name": "Cthulhu Mythos", "value": "20"}]}
            }
        })
        .to_string();
        let (c, _) = import_character(&raw, now()).unwrap();
        assert_eq!(c.resources.hp, Pool { current: 11, max: 11 });
        assert_eq!(c.resources.mp, Pool { current: 0, max: 10 });
        assert_eq!(c.resources.sanity.max, 79);
        assert_eq!(c.resources.sanity.current, 79);
        assert_eq!(c.resources.luck, Luck { current: 99, starting: 99 });
    }

    #[test]
    fn negative_hp_survives_import() {
        let raw = r#"{"Investigator": {"Characteristics": {"CON": "50", "SIZ": "60", "HitPts": "-4"}}}"#;
        let (c, _) = import_character(raw, now()).unwrap();
        assert_eq!(c.resources.hp, Pool { current: -4, max: 11 });
    }

    #[test]
    fn flat_skill_list_is_accepted() {
        let raw = r#"{"Investigator": {"Skills": [{"name": "Spot Hidden", "value": "60"}]}}"#;
        let (c, count) = import_character(raw, now()).unwrap();
        assert_eq!(count, 1);
        assert_eq!(c.skills["Spot Hidden"].value, 60);
    }

    #[test]
    fn rejects_bad_documents() {
        for raw in ["not json", "{}", r#"{"Investigator": 3}"#, "[]"] {
            assert!(
                matches!(import_character(raw, now()), Err(SheetError::Import(_))),
                "{raw} should fail"
            );
        }
    }

    #[test]
    fn export_uses_strings_and_splits_specializations() {
        let (c, _) = import_character(&sample(), now()).unwrap();
        let out: Value = serde_json::from_str(&export_character(&c).unwrap()).unwrap();
        let inv = &out["Investigator"];

        assert_eq!(inv["Header"]["Creator"], "burge");
        assert_eq!(inv["PersonalDetails"]["Name"], "Harvey Walters");
        assert_eq!(inv["Characteristics"]["STR"], "40");
        assert_eq!(inv["Characteristics"]["HitPtsMax"], "11");
        assert_eq!(inv["Characteristics"]["SanityMax"], "87");

        let skills = inv["Skills"]["Skill"].as_array().unwrap();
        let science = skills.iter().find(|s| s["name"] == "Science").unwrap();
        assert_eq!(science["subskill"], "Chemistry");
        assert_eq!(science["value"], "41");
        assert_eq!(science["half"], "20");
        assert_eq!(science["fifth"], "8");

        let library = skills.iter().find(|s| s["name"] == "Library Use").unwrap();
        assert!(library.get("subskill").is_none());
    }

    #[test]
    fn specialization_split() {
        assert_eq!(
            split_specialization("Fighting (Brawl)"),
            ("Fighting".into(), Some("Brawl".into()))
        );
        assert_eq!(
            split_specialization("Art/Craft (Any (Sculpture))"),
            ("Art/Craft".into(), Some("Any (Sculpture)".into()))
        );
        assert_eq!(split_specialization("Dodge"), ("Dodge".into(), None));
    }

    #[test]
    fn odd_names_export_whole() {
        for name in ["(Bar)", "Foo ()", "Foo (Bar) baz", "Foo  (Bar)", "Foo (None)"] {
            assert_eq!(split_specialization(name), (name.to_string(), None), "{name}");
        }
    }

    #[test]
    fn odd_names_survive_a_round_trip() {
        let mut c = Character::new("Harvey Walters", None, now());
        for name in ["(Bar)", "Foo ()", "Foo (Bar) baz"] {
            c.skills.insert(
                name.to_string(),
                SkillEntry {
                    value: 30,
                    custom: true,
                    ..SkillEntry::default()
                },
            );
        }
        let (back, count) = import_character(&export_character(&c).unwrap(), now()).unwrap();
        assert_eq!(count, 3);
        for name in ["(Bar)", "Foo ()", "Foo (Bar) baz"] {
            assert_eq!(back.skills[name].value, 30, "{name}");
        }
    }
}
