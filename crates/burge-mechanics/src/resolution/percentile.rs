//! The percentile (d100) mechanic with bonus and penalty dice.
//!
//! Two ten-sided dice are read as tens and units. Bonus and penalty dice
//! cancel one for one; whatever remains adds extra tens dice, keeping the
//! lowest for bonus dice and the highest for penalty dice. A face of 10
//! reads as 0, and 00 + 0 reads as 100.

use serde::{Deserialize, Serialize};

use crate::dice::{DiceExpr, DiceRoller, Die, Keep};
use crate::resolution::{Difficulty, SuccessTier, classify};

/// The dice behind one percentile result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentileRoll {
    /// Final result, 1-100.
    pub value: u32,
    /// Units digit, 0-9.
    pub units: u32,
    /// Every tens digit thrown, 0-9, in throw order.
    pub tens: Vec<u32>,
    /// The tens digit that was kept, 0-9.
    pub kept_tens: u32,
}

/// Roll d100 with the given number of bonus and penalty dice.
pub fn roll_d100(roller: &mut impl DiceRoller, bonus_dice: u32, penalty_dice: u32) -> PercentileRoll {
    let units = roller.face(Die::D10) % 10;

    let net = i64::from(bonus_dice) - i64::from(penalty_dice);
    let extra = net.unsigned_abs().min(u64::from(crate::dice::MAX_DICE - 1)) as u32;
    let tens_expr = match net {
        n if n > 0 => DiceExpr::new(1 + extra, Die::D10).keep(Keep::Lowest(1)),
        n if n < 0 => DiceExpr::new(1 + extra, Die::D10).keep(Keep::Highest(1)),
        _ => DiceExpr::new(1, Die::D10),
    };
    let throw = tens_expr.throw(roller);

    let kept_tens = throw.first_kept() % 10;
    let tens = throw.natural.iter().map(|t| t % 10).collect();

    let value = if kept_tens == 0 && units == 0 {
        100
    } else {
        kept_tens * 10 + units
    };

    PercentileRoll {
        value,
        units,
        tens,
        kept_tens,
    }
}

/// The result of a check against a skill or characteristic value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// The d100 result.
    pub roll: u32,
    /// Classified tier.
    pub tier: SuccessTier,
    /// Requested difficulty.
    pub difficulty: Difficulty,
    /// The nominal skill or characteristic value.
    pub value: u32,
    /// The difficulty-adjusted threshold used for classification.
    pub threshold: u32,
    /// Bonus dice requested.
    pub bonus_dice: u32,
    /// Penalty dice requested.
    pub penalty_dice: u32,
    /// The individual dice.
    pub dice: PercentileRoll,
}

impl RollOutcome {
    /// True if the check succeeded at any tier.
    pub fn is_success(&self) -> bool {
        self.tier.is_success()
    }
}

/// Roll a check against `value` at the given difficulty.
///
/// The tier is classified against the difficulty-adjusted threshold, so
/// hard and extreme checks derive their own hard/extreme sub-thresholds
/// from the already reduced value.
pub fn roll_check(
    value: u32,
    difficulty: Difficulty,
    bonus_dice: u32,
    penalty_dice: u32,
    roller: &mut impl DiceRoller,
) -> RollOutcome {
    let threshold = difficulty.threshold(value);
    let dice = roll_d100(roller, bonus_dice, penalty_dice);
    let tier = classify(dice.value, threshold);

    tracing::debug!(
        value,
        threshold,
        %difficulty,
        bonus_dice,
        penalty_dice,
        roll = dice.value,
        ?tier,
        "percentile check"
    );

    RollOutcome {
        roll: dice.value,
        tier,
        difficulty,
        value,
        threshold,
        bonus_dice,
        penalty_dice,
        dice,
    }
}

/// Parse a modifier such as `+2` or `-1` into `(bonus, penalty)` dice.
///
/// Anything unrecognized means no modifier.
pub fn parse_modifier(modifier: &str) -> (u32, u32) {
    let text = modifier.trim();
    let (sign, digits) = if let Some(d) = text.strip_prefix('+') {
        ('+', d)
    } else if let Some(d) = text.strip_prefix('-') {
        ('-', d)
    } else {
        return (0, 0);
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return (0, 0);
    }
    let Ok(count) = digits.parse::<u32>() else {
        return (0, 0);
    };
    if sign == '+' { (count, 0) } else { (0, count) }
}
