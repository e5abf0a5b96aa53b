//! Directional rounding operators used by the valuation formula.
//!
//! Every operator scales by `10^digits`, rounds, and scales back. Non-finite
//! input is not special-cased: NaN and infinities pass straight through.
//!
//! Scaling happens in binary floating point. A value that is aligned only in
//! decimal can land just past a step (`0.07 * 100 = 7.000000000000001`), so
//! [`round_away_from_zero`] moves it up one step. Values exact in binary,
//! such as quarter steps, are left unchanged.

fn scale(digits: u32) -> f64 {
    10f64.powi(digits as i32)
}

/// Round toward the larger magnitude at `digits` decimal places.
///
/// Positive values round up, negative values round down, and zero stays zero.
pub fn round_away_from_zero(value: f64, digits: u32) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    let factor = scale(digits);
    if value > 0.0 {
        (value * factor).ceil() / factor
    } else {
        (value * factor).floor() / factor
    }
}

/// Truncate toward negative infinity at `digits` decimal places.
pub fn truncate_down(value: f64, digits: u32) -> f64 {
    let factor = scale(digits);
    (value * factor).floor() / factor
}

/// Round half up (toward positive infinity on a tie) at `digits` decimal places.
pub fn round_half_up(value: f64, digits: u32) -> f64 {
    let factor = scale(digits);
    (value * factor + 0.5).floor() / factor
}
