//! Serialized shape of a Dhole's House investigator export.

use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Document {
    pub investigator: Investigator,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Investigator {
    pub header: Header,
    pub personal_details: PersonalDetails,
    pub characteristics: SheetStats,
    pub skills: SkillList,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Header {
    pub title: &'static str,
    pub creator: &'static str,
    pub game_name: &'static str,
    pub game_version: &'static str,
    pub version: &'static str,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            title: "Investigator Export: Character Sheet",
            creator: "burge",
            game_name: "Call of Cthulhu TM",
            game_version: "7th Edition",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct PersonalDetails {
    pub name: String,
    pub occupation: String,
}

/// Characteristics and pools, all as decimal strings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SheetStats {
    #[serde(rename = "STR")]
    pub strength: String,
    #[serde(rename = "CON")]
    pub constitution: String,
    #[serde(rename = "DEX")]
    pub dexterity: String,
    #[serde(rename = "SIZ")]
    pub size: String,
    #[serde(rename = "POW")]
    pub power: String,
    #[serde(rename = "APP")]
    pub appearance: String,
    #[serde(rename = "INT")]
    pub intelligence: String,
    #[serde(rename = "EDU")]
    pub education: String,
    pub hit_pts: String,
    pub hit_pts_max: String,
    pub magic_pts: String,
    pub magic_pts_max: String,
    pub luck: String,
    pub sanity: String,
    pub sanity_max: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SkillList {
    pub skill: Vec<SkillRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SkillRow {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subskill: Option<String>,
    pub value: String,
    pub half: String,
    pub fifth: String,
}
