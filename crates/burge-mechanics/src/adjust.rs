//! Value adjustments as typed by a player: `55`, `+5`, `-3`, `max`, `-1d6`.

use serde::{Deserialize, Serialize};

use crate::dice::{DiceExpr, DiceRoller, Throw};
use crate::error::{MechError, MechResult};

/// How to change a numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adjustment {
    /// Replace the value outright.
    Set(i32),
    /// Add a signed amount.
    Delta(i32),
    /// Restore to the pool maximum.
    Max,
    /// Add (or subtract) the total of a dice roll.
    Roll {
        /// Dice to throw.
        expr: DiceExpr,
        /// Subtract the roll instead of adding it.
        negative: bool,
    },
}

/// The result of applying an [`Adjustment`] to a current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjusted {
    /// The new, unclamped value.
    pub value: i32,
    /// The signed change, for relative adjustments.
    pub delta: Option<i32>,
    /// The dice thrown, for dice adjustments.
    pub throw: Option<Throw>,
}

impl Adjustment {
    /// Parse an adjustment string.
    ///
    /// A leading sign makes a number a delta. Anything containing `d` is
    /// dice notation; without a sign it is added.
    pub fn parse(input: &str) -> MechResult<Self> {
        let text = input.trim();
        if text.eq_ignore_ascii_case("max") {
            return Ok(Self::Max);
        }

        let (signed, negative, body) = if let Some(rest) = text.strip_prefix('-') {
            (true, true, rest)
        } else if let Some(rest) = text.strip_prefix('+') {
            (true, false, rest)
        } else {
            (false, false, text)
        };

        if body.contains(['d', 'D']) {
            let expr = DiceExpr::parse(body)?;
            return Ok(Self::Roll { expr, negative });
        }

        if body.is_empty() || !body.chars().all(|c| c.is_ascii_digit()) {
            return Err(MechError::InvalidAdjustment(input.to_string()));
        }
        let n: i32 = body
            .parse()
            .map_err(|_| MechError::InvalidAdjustment(input.to_string()))?;

        Ok(match (signed, negative) {
            (false, _) => Self::Set(n),
            (true, false) => Self::Delta(n),
            (true, true) => Self::Delta(-n),
        })
    }

    /// Apply to `current`. `max` is the pool ceiling, if the value has one.
    ///
    /// The result is not clamped; range rules belong to the caller.
    pub fn apply(
        &self,
        current: i32,
        max: Option<i32>,
        roller: &mut impl DiceRoller,
    ) -> MechResult<Adjusted> {
        Ok(match self {
            Self::Set(n) => Adjusted {
                value: *n,
                delta: None,
                throw: None,
            },
            Self::Delta(d) => Adjusted {
                value: current.saturating_add(*d),
                delta: Some(*d),
                throw: None,
            },
            Self::Max => {
                let Some(max) = max else {
                    return Err(MechError::InvalidAdjustment(
                        "'max' only applies to pools with a maximum".into(),
                    ));
                };
                Adjusted {
                    value: max,
                    delta: None,
                    throw: None,
                }
            }
            Self::Roll { expr, negative } => {
                let throw = expr.throw(roller);
                let delta = if *negative {
                    throw.total().saturating_neg()
                } else {
                    throw.total()
                };
                Adjusted {
                    value: current.saturating_add(delta),
                    delta: Some(delta),
                    throw: Some(throw),
                }
            }
        })
    }
}

impl std::fmt::Display for Adjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Set(n) => write!(f, "{n}"),
            Self::Delta(d) => write!(f, "{d:+}"),
            Self::Max => f.write_str("max"),
            Self::Roll { expr, negative } => {
                write!(f, "{}{expr}", if *negative { '-' } else { '+' })
            }
        }
    }
}

impl std::str::FromStr for Adjustment {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRoller;

    #[test]
    fn parse_forms() {
        assert_eq!(Adjustment::parse("55").unwrap(), Adjustment::Set(55));
        assert_eq!(Adjustment::parse("+5").unwrap(), Adjustment::Delta(5));
        assert_eq!(Adjustment::parse(" -3 ").unwrap(), Adjustment::Delta(-3));
        assert_eq!(Adjustment::parse("MAX").unwrap(), Adjustment::Max);

        let Adjustment::Roll { expr, negative } = Adjustment::parse("-1d6").unwrap() else {
            panic!("expected a dice adjustment");
        };
        assert!(negative);
        assert_eq!(expr.to_string(), "1d6");

        let Adjustment::Roll { negative, .. } = Adjustment::parse("1d3").unwrap() else {
            panic!("expected a dice adjustment");
        };
        assert!(!negative);
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in [
            "", "+", "abc", "+-5", "5.5", "1d", "--1d6", "+1d6+2147483647", "-1d6-99999",
        ] {
            assert!(Adjustment::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn apply_delta_and_set() {
        let mut r = ScriptedRoller::default();
        let a = Adjustment::Delta(-6).apply(11, Some(11), &mut r).unwrap();
        assert_eq!(a.value, 5);
        assert_eq!(a.delta, Some(-6));

        let a = Adjustment::Set(40).apply(11, None, &mut r).unwrap();
        assert_eq!(a.value, 40);
        assert_eq!(a.delta, None);
    }

    #[test]
    fn apply_max_needs_a_ceiling() {
        let mut r = ScriptedRoller::default();
        assert_eq!(Adjustment::Max.apply(3, Some(13), &mut r).unwrap().value, 13);
        assert!(Adjustment::Max.apply(3, None, &mut r).is_err());
    }

    #[test]
    fn apply_dice_loss() {
        let mut r = ScriptedRoller::new([4]);
        let a = Adjustment::parse("-1d6")
            .unwrap()
            .apply(65, Some(99), &mut r)
            .unwrap();
        assert_eq!(a.value, 61);
        assert_eq!(a.delta, Some(-4));
        assert_eq!(a.throw.unwrap().kept, vec![4]);
    }

    #[test]
    fn display_round_trips() {
        for text in ["55", "+5", "-3", "max", "-1d6", "+2d4+1"] {
            let adj = Adjustment::parse(text).unwrap();
            assert_eq!(Adjustment::parse(&adj.to_string()).unwrap(), adj);
        }
    }
}
