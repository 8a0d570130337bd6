//! Dice types, notation, and rolling.
//!
//! A [`DiceExpr`] is the parsed form of `[N]dM[kh|kl[K]][+|-X]` notation.
//! Throwing one against a [`DiceRoller`] yields a [`Throw`] carrying every
//! natural face, the subset kept after a keep-highest/keep-lowest filter,
//! and the kept sum.

pub mod roll;
pub mod roller;

pub use roll::{DiceRoll, Throw, roll_dice};
pub use roller::{DiceRoller, RngRoller, ScriptedRoller};

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Largest number of dice a single expression may throw.
pub const MAX_DICE: u32 = 100;

/// Largest die size accepted in notation.
pub const MAX_SIDES: u32 = 1000;

/// Largest flat modifier accepted in notation, either sign.
pub const MAX_MODIFIER: i32 = 10_000;

/// A die with a fixed number of faces, numbered `1..=sides`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die(u32);

impl Die {
    /// Ten-sided die used for both percentile digits.
    pub const D10: Die = Die(10);
    /// Percentile die (1-100), used for advancement rolls.
    pub const D100: Die = Die(100);

    /// Create a die with the given number of sides, if it has at least two.
    pub fn new(sides: u32) -> Option<Self> {
        (sides >= 2).then_some(Self(sides))
    }

    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.0)
    }
}

/// Which dice survive a keep filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keep {
    /// Keep the `n` highest faces (`kh`).
    Highest(u32),
    /// Keep the `n` lowest faces (`kl`).
    Lowest(u32),
}

/// A parsed dice expression such as `2d100kh1` or `1d6+1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpr {
    /// Number of dice thrown.
    pub count: u32,
    /// The die thrown.
    pub die: Die,
    /// Optional keep filter; without one every die is kept.
    pub keep: Option<Keep>,
    /// Flat modifier added after summing the kept dice.
    pub modifier: i32,
}

impl DiceExpr {
    /// `count` dice of one type, all kept, no modifier.
    pub fn new(count: u32, die: Die) -> Self {
        Self {
            count,
            die,
            keep: None,
            modifier: 0,
        }
    }

    /// Attach a keep filter.
    pub fn keep(mut self, keep: Keep) -> Self {
        self.keep = Some(keep);
        self
    }

    /// Parse notation like `1d6`, `d20`, `2d4+1`, `3d10kl1`, `2d100kh1-5`.
    pub fn parse(input: &str) -> MechResult<Self> {
        let text = input.trim().to_lowercase();
        let invalid = |reason: &str| MechError::InvalidNotation {
            notation: input.to_string(),
            reason: reason.to_string(),
        };

        if text.is_empty() {
            return Err(invalid("empty expression"));
        }

        let d_pos = text.find('d').ok_or_else(|| invalid("missing 'd' separator"))?;
        let count_str = &text[..d_pos];
        let count: u32 = if count_str.is_empty() {
            1
        } else {
            count_str
                .parse()
                .map_err(|_| invalid("dice count is not a number"))?
        };
        if count == 0 || count > MAX_DICE {
            return Err(invalid(&format!("dice count must be 1-{MAX_DICE}")));
        }

        let rest = &text[d_pos + 1..];
        let sides_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let sides: u32 = rest[..sides_end]
            .parse()
            .map_err(|_| invalid("die size is not a number"))?;
        if sides > MAX_SIDES {
            return Err(invalid(&format!("die size must be 2-{MAX_SIDES}")));
        }
        let die = Die::new(sides).ok_or_else(|| invalid("die size must be at least 2"))?;

        let mut tail = &rest[sides_end..];

        let mut keep = None;
        let keep_highest = if let Some(t) = tail.strip_prefix("kh") {
            tail = t;
            Some(true)
        } else if let Some(t) = tail.strip_prefix("kl") {
            tail = t;
            Some(false)
        } else {
            None
        };
        if let Some(highest) = keep_highest {
            let digits_end = tail
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(tail.len());
            let n: u32 = if digits_end == 0 {
                1
            } else {
                tail[..digits_end]
                    .parse()
                    .map_err(|_| invalid("keep count is not a number"))?
            };
            if n == 0 || n > count {
                return Err(invalid("keep count must be between 1 and the dice count"));
            }
            keep = Some(if highest {
                Keep::Highest(n)
            } else {
                Keep::Lowest(n)
            });
            tail = &tail[digits_end..];
        }

        let modifier = if tail.is_empty() {
            0
        } else {
            let (sign, digits) = if let Some(d) = tail.strip_prefix('+') {
                (1, d)
            } else if let Some(d) = tail.strip_prefix('-') {
                (-1, d)
            } else {
                return Err(invalid("unexpected trailing input"));
            };
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid("modifier is not a number"));
            }
            let value: i32 = digits
                .parse()
                .ok()
                .filter(|v| *v <= MAX_MODIFIER)
                .ok_or_else(|| {
                    invalid(&format!("modifier must be at most {MAX_MODIFIER}"))
                })?;
            sign * value
        };

        Ok(Self {
            count,
            die,
            keep,
            modifier,
        })
    }

    /// Throw every die and apply the keep filter.
    pub fn throw(&self, roller: &mut impl DiceRoller) -> Throw {
        let natural: Vec<u32> = (0..self.count).map(|_| roller.face(self.die)).collect();

        let kept = match self.keep {
            None => natural.clone(),
            Some(Keep::Highest(n)) => {
                let mut sorted = natural.clone();
                sorted.sort_unstable_by(|a, b| b.cmp(a));
                sorted.truncate(n as usize);
                sorted
            }
            Some(Keep::Lowest(n)) => {
                let mut sorted = natural.clone();
                sorted.sort_unstable();
                sorted.truncate(n as usize);
                sorted
            }
        };

        Throw {
            natural,
            kept,
            modifier: self.modifier,
        }
    }
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.count, self.die)?;
        match self.keep {
            Some(Keep::Highest(n)) => write!(f, "kh{n}")?,
            Some(Keep::Lowest(n)) => write!(f, "kl{n}")?,
            None => {}
        }
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

impl std::str::FromStr for DiceExpr {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn die_sides() {
        assert_eq!(Die::D10.sides(), 10);
        assert_eq!(Die::D100.sides(), 100);
        assert_eq!(Die::new(6).map(Die::sides), Some(6));
        assert_eq!(Die::new(1), None);
    }

    #[test]
    fn parse_plain() {
        let e = DiceExpr::parse("1d6").unwrap();
        assert_eq!(e.count, 1);
        assert_eq!(e.die.sides(), 6);
        assert_eq!(e.keep, None);
        assert_eq!(e.modifier, 0);
    }

    #[test]
    fn parse_shorthand_and_case() {
        let e = DiceExpr::parse(" D20 ").unwrap();
        assert_eq!(e.count, 1);
        assert_eq!(e.die.sides(), 20);
    }

    #[test]
    fn parse_modifiers() {
        assert_eq!(DiceExpr::parse("2d4+1").unwrap().modifier, 1);
        assert_eq!(DiceExpr::parse("2d4-3").unwrap().modifier, -3);
    }

    #[test]
    fn parse_keep_rules() {
        let e = DiceExpr::parse("2d100kh1").unwrap();
        assert_eq!(e.keep, Some(Keep::Highest(1)));
        let e = DiceExpr::parse("3d10kl").unwrap();
        assert_eq!(e.keep, Some(Keep::Lowest(1)));
        let e = DiceExpr::parse("4d6kh3+2").unwrap();
        assert_eq!(e.keep, Some(Keep::Highest(3)));
        assert_eq!(e.modifier, 2);
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in [
            "", "d", "abc", "0d6", "1d1", "1d", "1d6+", "1d6x", "2d6kh3", "1d6kh0", "1d6++1",
            "101d6", "1d1001", "1d6+10001", "1d6-2147483648", "1d6+99999999999",
        ] {
            assert!(DiceExpr::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn modifier_bound_is_inclusive() {
        assert_eq!(DiceExpr::parse("1d6+10000").unwrap().modifier, MAX_MODIFIER);
        assert_eq!(DiceExpr::parse("1d6-10000").unwrap().modifier, -MAX_MODIFIER);
    }

    #[test]
    fn display_round_trips() {
        for text in ["1d6", "2d100kh1", "3d10kl1", "2d4+1", "1d8-2"] {
            assert_eq!(DiceExpr::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn throw_keep_lowest() {
        let mut roller = ScriptedRoller::new([7, 2, 9]);
        let t = DiceExpr::parse("3d10kl1").unwrap().throw(&mut roller);
        assert_eq!(t.natural, vec![7, 2, 9]);
        assert_eq!(t.kept, vec![2]);
        assert_eq!(t.sum(), 2);
    }

    #[test]
    fn throw_keep_highest() {
        let mut roller = ScriptedRoller::new([41, 88]);
        let t = DiceExpr::parse("2d100kh1").unwrap().throw(&mut roller);
        assert_eq!(t.kept, vec![88]);
    }

    #[test]
    fn throw_applies_modifier_to_total_only() {
        let mut roller = ScriptedRoller::new([3, 4]);
        let t = DiceExpr::parse("2d4+1").unwrap().throw(&mut roller);
        assert_eq!(t.sum(), 7);
        assert_eq!(t.total(), 8);
    }
}
