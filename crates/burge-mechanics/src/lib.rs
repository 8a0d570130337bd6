//! Rules mechanics for the burge investigator engine.
//!
//! Provides a dice primitive with keep-highest/keep-lowest notation, the
//! percentile (d100) check with bonus and penalty dice, success-tier
//! classification, the adjustment grammar used to change resource pools,
//! and the static rules tables: characteristics, resource
//! pools, standard skills with aliasing, and derived-value formulas.

pub mod adjust;
pub mod dice;
pub mod error;
pub mod resolution;
pub mod rules;

pub use adjust::{Adjusted, Adjustment};
pub use dice::{DiceExpr, DiceRoll, DiceRoller, Die, Keep, RngRoller, ScriptedRoller, Throw, roll_dice};
pub use error::{MechError, MechResult};
pub use resolution::{
    Difficulty, PercentileRoll, RollOutcome, SuccessTier, classify, parse_modifier, roll_check,
    roll_d100,
};
pub use rules::skills::{is_standard_skill, normalize_skill_name, skill_base};
pub use rules::{Characteristic, Characteristics, ResourceKind};
