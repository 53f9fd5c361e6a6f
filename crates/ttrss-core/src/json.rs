//! Small helpers over loosely typed JSON values.

use serde_json::Value;

/// Integer value of a JSON number, accepting integral floats like `1.0`.
pub(crate) fn integral(v: &Value) -> Option<i64> {
    if let Some(i) = v.as_i64() {
        return Some(i);
    }
    let f = v.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}
