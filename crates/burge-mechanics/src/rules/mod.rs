//! Static rules data: characteristics, resource pools, standard skills,
//! and the derived-value formulas built on them.

pub mod derived;
pub mod skills;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// One of the eight investigator characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Characteristic {
    /// Strength.
    #[serde(rename = "STR")]
    Str,
    /// Constitution.
    #[serde(rename = "CON")]
    Con,
    /// Dexterity.
    #[serde(rename = "DEX")]
    Dex,
    /// Size.
    #[serde(rename = "SIZ")]
    Siz,
    /// Power.
    #[serde(rename = "POW")]
    Pow,
    /// Appearance.
    #[serde(rename = "APP")]
    App,
    /// Intelligence.
    #[serde(rename = "INT")]
    Int,
    /// Education.
    #[serde(rename = "EDU")]
    Edu,
}

impl Characteristic {
    /// All characteristics in sheet order.
    pub const ALL: [Characteristic; 8] = [
        Self::Str,
        Self::Con,
        Self::Dex,
        Self::Siz,
        Self::Pow,
        Self::App,
        Self::Int,
        Self::Edu,
    ];

    /// The upper-case abbreviation used on sheets and in exports.
    pub fn key(self) -> &'static str {
        match self {
            Self::Str => "STR",
            Self::Con => "CON",
            Self::Dex => "DEX",
            Self::Siz => "SIZ",
            Self::Pow => "POW",
            Self::App => "APP",
            Self::Int => "INT",
            Self::Edu => "EDU",
        }
    }

    /// Parse an abbreviation, case-insensitive.
    pub fn parse(s: &str) -> MechResult<Self> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.key() == upper)
            .ok_or_else(|| MechError::UnknownCharacteristic(s.to_string()))
    }
}

impl std::fmt::Display for Characteristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Characteristic {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The eight characteristic scores of one investigator.
///
/// Missing keys deserialize as 0 so records written before a field existed
/// still load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Characteristics {
    /// Strength.
    #[serde(rename = "STR")]
    pub strength: i32,
    /// Constitution.
    #[serde(rename = "CON")]
    pub constitution: i32,
    /// Dexterity.
    #[serde(rename = "DEX")]
    pub dexterity: i32,
    /// Size.
    #[serde(rename = "SIZ")]
    pub size: i32,
    /// Power.
    #[serde(rename = "POW")]
    pub power: i32,
    /// Appearance.
    #[serde(rename = "APP")]
    pub appearance: i32,
    /// Intelligence.
    #[serde(rename = "INT")]
    pub intelligence: i32,
    /// Education.
    #[serde(rename = "EDU")]
    pub education: i32,
}

impl Characteristics {
    /// Build from values in sheet order (STR CON DEX SIZ POW APP INT EDU).
    pub fn from_array(values: [i32; 8]) -> Self {
        let mut out = Self::default();
        for (c, v) in Characteristic::ALL.into_iter().zip(values) {
            out.set(c, v);
        }
        out
    }

    /// Read one score.
    pub fn get(&self, c: Characteristic) -> i32 {
        match c {
            Characteristic::Str => self.strength,
            Characteristic::Con => self.constitution,
            Characteristic::Dex => self.dexterity,
            Characteristic::Siz => self.size,
            Characteristic::Pow => self.power,
            Characteristic::App => self.appearance,
            Characteristic::Int => self.intelligence,
            Characteristic::Edu => self.education,
        }
    }

    /// Overwrite one score.
    pub fn set(&mut self, c: Characteristic, value: i32) {
        let slot = match c {
            Characteristic::Str => &mut self.strength,
            Characteristic::Con => &mut self.constitution,
            Characteristic::Dex => &mut self.dexterity,
            Characteristic::Siz => &mut self.size,
            Characteristic::Pow => &mut self.power,
            Characteristic::App => &mut self.appearance,
            Characteristic::Int => &mut self.intelligence,
            Characteristic::Edu => &mut self.education,
        };
        *slot = value;
    }

    /// Iterate `(characteristic, score)` in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Characteristic, i32)> + '_ {
        Characteristic::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// A mutable resource pool on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Hit points; may go negative.
    Hp,
    /// Magic points.
    Mp,
    /// Sanity.
    Sanity,
    /// Luck.
    Luck,
    /// Experience points, an uncapped pool of at least 0.
    Xp,
}

impl ResourceKind {
    /// All resource pools.
    pub const ALL: [ResourceKind; 5] = [Self::Hp, Self::Mp, Self::Sanity, Self::Luck, Self::Xp];

    /// Short key used in change descriptions.
    pub fn key(self) -> &'static str {
        match self {
            Self::Hp => "hp",
            Self::Mp => "mp",
            Self::Sanity => "san",
            Self::Luck => "luck",
            Self::Xp => "xp",
        }
    }

    /// Parse `hp`, `mp`, `san`/`sanity`, `luck` or `xp` (case-insensitive).
    pub fn parse(s: &str) -> MechResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "hp" => Ok(Self::Hp),
            "mp" => Ok(Self::Mp),
            "san" | "sanity" => Ok(Self::Sanity),
            "luck" => Ok(Self::Luck),
            "xp" => Ok(Self::Xp),
            _ => Err(MechError::UnknownResource(s.to_string())),
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
