//! Success tiers and percentile resolution.
//!
//! A d100 roll is read against a threshold and classified into one of six
//! ordered tiers:
//! - **Critical**: a roll of 01, always
//! - **Fumble**: 100, or 96-99 against a threshold below 50
//! - **Extreme**: at or under a fifth of the threshold
//! - **Hard**: at or under half the threshold
//! - **Regular**: at or under the threshold
//! - **Failure**: anything else

pub mod percentile;

pub use percentile::{PercentileRoll, RollOutcome, parse_modifier, roll_check, roll_d100};

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// The classified outcome of a percentile roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessTier {
    /// A roll of 01.
    Critical,
    /// At or under one fifth of the threshold.
    Extreme,
    /// At or under half the threshold.
    Hard,
    /// At or under the threshold.
    Regular,
    /// Over the threshold.
    Failure,
    /// 100, or 96-99 against a low threshold.
    Fumble,
}

impl SuccessTier {
    /// True for every tier that counts as a success.
    pub fn is_success(self) -> bool {
        matches!(
            self,
            Self::Critical | Self::Extreme | Self::Hard | Self::Regular
        )
    }

    /// Position in the tier ladder; higher is better.
    fn rank(self) -> u8 {
        match self {
            Self::Fumble => 0,
            Self::Failure => 1,
            Self::Regular => 2,
            Self::Hard => 3,
            Self::Extreme => 4,
            Self::Critical => 5,
        }
    }

    /// Text shown to players.
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical Success!",
            Self::Extreme => "Extreme Success!",
            Self::Hard => "Hard Success",
            Self::Regular => "Success",
            Self::Failure => "Failure",
            Self::Fumble => "Fumble!",
        }
    }
}

impl PartialOrd for SuccessTier {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SuccessTier {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl std::fmt::Display for SuccessTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How demanding a check is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Roll against the full value.
    #[default]
    Regular,
    /// Roll against half the value.
    Hard,
    /// Roll against a fifth of the value.
    Extreme,
}

impl Difficulty {
    /// The threshold a check at this difficulty is classified against.
    pub fn threshold(self, value: u32) -> u32 {
        match self {
            Self::Regular => value,
            Self::Hard => (value / 2).max(1),
            Self::Extreme => (value / 5).max(1),
        }
    }

    /// Parse `regular`, `hard` or `extreme` (case-insensitive).
    pub fn parse(s: &str) -> MechResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(Self::Regular),
            "hard" => Ok(Self::Hard),
            "extreme" => Ok(Self::Extreme),
            _ => Err(MechError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regular => write!(f, "regular"),
            Self::Hard => write!(f, "hard"),
            Self::Extreme => write!(f, "extreme"),
        }
    }
}

/// Classify a d100 roll (1-100) against a threshold.
pub fn classify(roll: u32, threshold: u32) -> SuccessTier {
    if roll == 1 {
        return SuccessTier::Critical;
    }
    if roll == 100 || (threshold < 50 && roll >= 96) {
        return SuccessTier::Fumble;
    }

    let extreme = (threshold / 5).max(1);
    let hard = (threshold / 2).max(1);

    if roll <= extreme {
        SuccessTier::Extreme
    } else if roll <= hard {
        SuccessTier::Hard
    } else if roll <= threshold {
        SuccessTier::Regular
    } else {
        SuccessTier::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_on_one() {
        assert_eq!(classify(1, 0), SuccessTier::Critical);
        assert_eq!(classify(1, 50), SuccessTier::Critical);
    }

    #[test]
    fn fumble_rules() {
        assert_eq!(classify(100, 99), SuccessTier::Fumble);
        assert_eq!(classify(96, 49), SuccessTier::Fumble);
        assert_eq!(classify(99, 10), SuccessTier::Fumble);
        assert_eq!(classify(96, 50), SuccessTier::Failure);
        assert_eq!(classify(99, 99), SuccessTier::Regular);
    }

    #[test]
    fn tier_boundaries_at_fifty() {
        assert_eq!(classify(10, 50), SuccessTier::Extreme);
        assert_eq!(classify(11, 50), SuccessTier::Hard);
        assert_eq!(classify(25, 50), SuccessTier::Hard);
        assert_eq!(classify(26, 50), SuccessTier::Regular);
        assert_eq!(classify(50, 50), SuccessTier::Regular);
        assert_eq!(classify(51, 50), SuccessTier::Failure);
    }

    #[test]
    fn tiny_thresholds_floor_at_one() {
        // extreme and hard both floor at 1, but 1 is already a critical
        assert_eq!(classify(2, 3), SuccessTier::Regular);
        assert_eq!(classify(4, 3), SuccessTier::Failure);
    }

    #[test]
    fn tier_ordering() {
        assert!(SuccessTier::Critical > SuccessTier::Extreme);
        assert!(SuccessTier::Extreme > SuccessTier::Hard);
        assert!(SuccessTier::Hard > SuccessTier::Regular);
        assert!(SuccessTier::Regular > SuccessTier::Failure);
        assert!(SuccessTier::Failure > SuccessTier::Fumble);
    }

    #[test]
    fn success_flags() {
        assert!(SuccessTier::Regular.is_success());
        assert!(SuccessTier::Critical.is_success());
        assert!(!SuccessTier::Failure.is_success());
        assert!(!SuccessTier::Fumble.is_success());
    }

    #[test]
    fn difficulty_thresholds() {
        assert_eq!(Difficulty::Regular.threshold(60), 60);
        assert_eq!(Difficulty::Hard.threshold(60), 30);
        assert_eq!(Difficulty::Extreme.threshold(60), 12);
        assert_eq!(Difficulty::Hard.threshold(1), 1);
        assert_eq!(Difficulty::Extreme.threshold(4), 1);
    }

    #[test]
    fn difficulty_parse() {
        assert_eq!(Difficulty::parse("HARD").unwrap(), Difficulty::Hard);
        assert_eq!("extreme".parse::<Difficulty>().unwrap(), Difficulty::Extreme);
        assert!(Difficulty::parse("heroic").is_err());
    }

    #[test]
    fn tier_display() {
        assert_eq!(SuccessTier::Critical.to_string(), "Critical Success!");
        assert_eq!(SuccessTier::Fumble.to_string(), "Fumble!");
    }
}
