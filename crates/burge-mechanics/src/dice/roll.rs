//! Dice throw results and the generic roll primitive.

use serde::{Deserialize, Serialize};

use super::{DiceExpr, DiceRoller};

/// The result of throwing a [`DiceExpr`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Throw {
    /// Every face thrown, in throw order.
    pub natural: Vec<u32>,
    /// The faces retained after the keep filter (all of them without one).
    pub kept: Vec<u32>,
    /// Flat modifier from the expression.
    pub modifier: i32,
}

impl Throw {
    /// Sum of the kept faces.
    pub fn sum(&self) -> u32 {
        self.kept.iter().fold(0, |acc, face| acc.saturating_add(*face))
    }

    /// Sum of the kept faces plus the modifier, saturating at the `i32` range.
    pub fn total(&self) -> i32 {
        i32::try_from(self.sum())
            .unwrap_or(i32::MAX)
            .saturating_add(self.modifier)
    }

    /// The first kept face, or 0 if nothing was kept.
    pub fn first_kept(&self) -> u32 {
        self.kept.first().copied().unwrap_or(0)
    }
}

impl std::fmt::Display for Throw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.natural.iter().map(|d| d.to_string()).collect();
        write!(f, "[{}] = {}", values.join(", "), self.total())
    }
}

/// Summary of a free-form roll such as a sanity loss of `1d6`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// The normalized notation that was rolled.
    pub notation: String,
    /// Every natural face thrown.
    pub rolls: Vec<u32>,
    /// Sum of the kept faces before the modifier.
    pub natural: u32,
    /// Sum after the modifier.
    pub total: i32,
}

/// Roll arbitrary dice notation.
///
/// Malformed notation yields `None`; callers treat that as invalid input.
pub fn roll_dice(notation: &str, roller: &mut impl DiceRoller) -> Option<DiceRoll> {
    let expr = match DiceExpr::parse(notation) {
        Ok(expr) => expr,
        Err(e) => {
            tracing::error!(%notation, error = %e, "dice roll error");
            return None;
        }
    };
    let throw = expr.throw(roller);
    tracing::debug!(notation = %expr, natural = ?throw.natural, total = throw.total(), "rolled dice");
    Some(DiceRoll {
        notation: expr.to_string(),
        natural: throw.sum(),
        total: throw.total(),
        rolls: throw.natural,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRoller;

    fn make_throw(natural: &[u32], kept: &[u32], modifier: i32) -> Throw {
        Throw {
            natural: natural.to_vec(),
            kept: kept.to_vec(),
            modifier,
        }
    }

    #[test]
    fn sum_counts_only_kept() {
        let t = make_throw(&[3, 9], &[9], 0);
        assert_eq!(t.sum(), 9);
        assert_eq!(t.first_kept(), 9);
    }

    #[test]
    fn negative_total() {
        let t = make_throw(&[1], &[1], -3);
        assert_eq!(t.total(), -2);
    }

    #[test]
    fn empty_throw() {
        let t = Throw::default();
        assert_eq!(t.sum(), 0);
        assert_eq!(t.first_kept(), 0);
    }

    #[test]
    fn total_saturates() {
        let t = make_throw(&[6], &[6], i32::MAX);
        assert_eq!(t.total(), i32::MAX);
        let t = make_throw(&[], &[], i32::MIN);
        assert_eq!(t.total(), i32::MIN);
    }

    #[test]
    fn huge_modifier_yields_no_result() {
        let mut roller = ScriptedRoller::new([6]);
        assert!(roll_dice("1d6+2147483647", &mut roller).is_none());
        assert_eq!(roller.rolled(), 0);
    }

    #[test]
    fn display() {
        let t = make_throw(&[3, 5], &[3, 5], 1);
        assert_eq!(t.to_string(), "[3, 5] = 9");
    }

    #[test]
    fn roll_dice_reports_natural_and_total() {
        let mut roller = ScriptedRoller::new([2, 3]);
        let r = roll_dice("2d4+1", &mut roller).unwrap();
        assert_eq!(r.rolls, vec![2, 3]);
        assert_eq!(r.natural, 5);
        assert_eq!(r.total, 6);
        assert_eq!(r.notation, "2d4+1");
    }

    #[test]
    fn roll_dice_malformed_is_none() {
        let mut roller = ScriptedRoller::new([1]);
        assert!(roll_dice("banana", &mut roller).is_none());
        assert!(roll_dice("1d6+", &mut roller).is_none());
    }
}
