//! Derived-value formulas.
//!
//! All divisions are integer divisions. These are pure; the character
//! record caches `hp.max`, `mp.max` and `sanity.max` and recomputes them
//! whenever an input changes.

/// Sanity can never exceed this, before Mythos reductions.
pub const SANITY_CEILING: i32 = 99;

/// Maximum hit points: `(CON + SIZ) / 10`.
pub fn hp_max(con: i32, siz: i32) -> i32 {
    (con + siz) / 10
}

/// Maximum magic points: `POW / 5`.
pub fn mp_max(pow: i32) -> i32 {
    pow / 5
}

/// Maximum sanity: `99 - Cthulhu Mythos`.
pub fn sanity_max(mythos: i32) -> i32 {
    SANITY_CEILING - mythos
}

/// Damage at or below this many remaining hit points is a major wound: `CON / 2`.
pub fn major_wound_threshold(con: i32) -> i32 {
    con / 2
}

/// Dodge base: `DEX / 2`.
pub fn dodge_base(dex: i32) -> u32 {
    (dex / 2).max(0) as u32
}

/// Own-language base: `EDU`.
pub fn own_language_base(edu: i32) -> u32 {
    edu.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_values() {
        assert_eq!(hp_max(50, 60), 11);
        assert_eq!(mp_max(65), 13);
        assert_eq!(sanity_max(12), 87);
        assert_eq!(sanity_max(0), 99);
        assert_eq!(major_wound_threshold(60), 30);
    }

    #[test]
    fn integer_division_truncates() {
        assert_eq!(hp_max(45, 59), 10);
        assert_eq!(mp_max(4), 0);
        assert_eq!(major_wound_threshold(21), 10);
    }

    #[test]
    fn skill_bases() {
        assert_eq!(dodge_base(45), 22);
        assert_eq!(own_language_base(85), 85);
        assert_eq!(dodge_base(-4), 0);
    }
}
