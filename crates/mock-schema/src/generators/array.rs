//! Selection and array generators.

use super::static_value::yaml_to_value;
use mock_core::Value;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_yaml::Value as YamlValue;

/// Pick one value from a pool, or null when the pool is empty.
pub fn generate_one_of<R: Rng>(rng: &mut R, values: &[YamlValue]) -> Value {
    values.choose(rng).map(yaml_to_value).unwrap_or(Value::Null)
}

/// Generate an array by sampling from a pool of values (with repetition).
pub fn generate_sample_array<R: Rng>(
    rng: &mut R,
    pool: &[YamlValue],
    min_length: usize,
    max_length: usize,
) -> Value {
    if pool.is_empty() || max_length == 0 {
        return Value::empty_array();
    }

    let length = if min_length >= max_length {
        max_length
    } else {
        rng.gen_range(min_length..=max_length)
    };

    let items: Vec<Value> = (0..length)
        .filter_map(|_| pool.choose(rng).map(yaml_to_value))
        .collect();

    Value::Array(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool() -> Vec<YamlValue> {
        serde_yaml::from_str("[red, green, blue]").unwrap()
    }

    #[test]
    fn test_one_of() {
        let mut rng = StdRng::seed_from_u64(42);
        let choices = pool();
        for _ in 0..20 {
            let value = generate_one_of(&mut rng, &choices);
            assert!(["red", "green", "blue"].contains(&value.as_str().unwrap()));
        }
        assert_eq!(generate_one_of(&mut rng, &[]), Value::Null);
    }

    #[test]
    fn test_sample_array_length() {
        let mut rng = StdRng::seed_from_u64(42);
        let choices = pool();
        for _ in 0..20 {
            let value = generate_sample_array(&mut rng, &choices, 1, 4);
            let len = value.as_array().unwrap().len();
            assert!((1..=4).contains(&len));
        }
    }

    #[test]
    fn test_sample_array_empty_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(generate_sample_array(&mut rng, &[], 1, 3), Value::empty_array());
        assert_eq!(
            generate_sample_array(&mut rng, &pool(), 0, 0),
            Value::empty_array()
        );
    }
}
