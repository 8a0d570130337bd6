//! Defensive number parsing for externally produced documents.

use serde_json::Value;

/// Read an integer that may be a JSON number or a decimal string.
///
/// Floats truncate toward zero. Strings must hold a whole number
/// (`"12.5"` is rejected). Anything else, including a missing value,
/// yields `default`.
pub fn safe_int(value: Option<&Value>, default: i32) -> i32 {
    match value {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                clamp_i64(i)
            } else if let Some(f) = n.as_f64() {
                // `as` saturates out-of-range floats
                f.trunc() as i32
            } else {
                default
            }
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().map_or(default, clamp_i64),
        _ => default,
    }
}

fn clamp_i64(i: i64) -> i32 {
    i.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(safe_int(Some(&json!(42)), 0), 42);
        assert_eq!(safe_int(Some(&json!("42")), 0), 42);
        assert_eq!(safe_int(Some(&json!(" 7 ")), 0), 7);
        assert_eq!(safe_int(Some(&json!("-3")), 0), -3);
        assert_eq!(safe_int(Some(&json!(12.9)), 0), 12);
    }

    #[test]
    fn falls_back_to_default() {
        assert_eq!(safe_int(None, 99), 99);
        assert_eq!(safe_int(Some(&json!("12.5")), 0), 0);
        assert_eq!(safe_int(Some(&json!("abc")), 5), 5);
        assert_eq!(safe_int(Some(&json!(null)), 1), 1);
        assert_eq!(safe_int(Some(&json!([1])), 1), 1);
        assert_eq!(safe_int(Some(&json!(true)), 0), 0);
    }

    #[test]
    fn huge_values_saturate() {
        assert_eq!(safe_int(Some(&json!(10_000_000_000_i64)), 0), i32::MAX);
    }
}
