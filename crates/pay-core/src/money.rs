//! # Amounts
//!
//! Conversion from the major-unit amounts clients send (e.g. `19.99`)
//! to the minor units the processor expects (e.g. `1999`).

use serde_json::Value;

/// Default currency when a request omits one
pub const DEFAULT_CURRENCY: &str = "usd";

/// Minor units per major unit
const MINOR_PER_MAJOR: f64 = 100.0;

/// Convert a decimal amount to the smallest currency unit.
///
/// Rounds to the nearest integer with ties going toward positive infinity,
/// so `-0.125` becomes `-12` and `0.125` becomes `13`. Non-finite input
/// saturates the way an `f64 as i64` cast does (NaN becomes 0).
pub fn to_minor_units(amount: f64) -> i64 {
    let scaled = amount * MINOR_PER_MAJOR;
    let floor = scaled.floor();
    // `scaled - floor` is exact, so 0.49999999999999994 stays below the tie
    if scaled - floor >= 0.5 {
        (floor + 1.0) as i64
    } else {
        floor as i64
    }
}

/// Read a major-unit amount from loosely typed JSON.
///
/// Numbers are taken as-is and numeric strings are parsed. Anything else
/// (null, booleans, text, arrays, objects) has no amount.
pub fn amount_from_json(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|a| a.is_finite()),
        _ => None,
    }
}

/// Minor units for an optional JSON amount
pub fn minor_units_from_json(value: Option<&Value>) -> Option<i64> {
    value.and_then(amount_from_json).map(to_minor_units)
}

/// Read a currency code from loosely typed JSON.
///
/// Missing or `null` falls back to `usd`; non-string values are sent as
/// their JSON text.
pub fn currency_from_json(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => DEFAULT_CURRENCY.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
