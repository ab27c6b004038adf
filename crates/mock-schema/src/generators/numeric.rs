//! Numeric value generators.

use mock_core::Value;
use rand::Rng;

/// Generate a random integer in the given range (inclusive).
///
/// Returns `min` when the range is empty.
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> Value {
    if min >= max {
        return Value::Int64(min);
    }
    Value::Int64(rng.gen_range(min..=max))
}

/// Generate a random float in the given range (inclusive).
///
/// Returns `min` when the range is empty or its width is not finite.
pub fn generate_float_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> Value {
    if !float_range_is_valid(min, max) || min >= max {
        return Value::Float64(min);
    }
    Value::Float64(rng.gen_range(min..=max))
}

/// Whether `min..=max` can be sampled: both bounds and the width are finite.
pub fn float_range_is_valid(min: f64, max: f64) -> bool {
    min.is_finite() && max.is_finite() && (max - min).is_finite()
}

/// Generate a boolean that is true with probability `true_weight`.
///
/// NaN weights count as 0.
pub fn generate_weighted_bool<R: Rng>(rng: &mut R, true_weight: f64) -> Value {
    let p = if true_weight.is_nan() {
        0.0
    } else {
        true_weight.clamp(0.0, 1.0)
    };
    Value::Bool(rng.gen_bool(p))
}
