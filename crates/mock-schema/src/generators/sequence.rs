//! Next-value functions for YAML-declared sequence attributes.

use anyhow::anyhow;
use mock_core::Value;
use mock_factory::FactoryError;

/// Add `step` to the most recent value.
///
/// With an empty history (the factory never produced identity 1) the step is
/// applied to `initial`.
pub fn increment_next(
    initial: Value,
    step: i64,
) -> impl Fn(&[Value]) -> Result<Value, FactoryError> {
    move |prev: &[Value]| {
        let last = prev.last().unwrap_or(&initial);
        match last {
            Value::Int64(i) => i
                .checked_add(step)
                .map(Value::Int64)
                .ok_or_else(|| {
                    FactoryError::Callback(anyhow!("sequence value {i} + {step} overflows i64"))
                }),
            Value::Float64(f) => Ok(Value::Float64(f + step as f64)),
            other => Err(anyhow!("sequence value {other:?} is not numeric").into()),
        }
    }
}

/// Fill `{n}` with the 1-based position of the value being generated.
///
/// Only the history length is read, so the sequence can use an empty window.
pub fn pattern_next(pattern: String) -> impl Fn(&[Value], usize) -> Result<Value, FactoryError> {
    move |_: &[Value], history_len: usize| {
        let position = history_len + 1;
        Ok(Value::String(pattern.replace("{n}", &position.to_string())))
    }
}
