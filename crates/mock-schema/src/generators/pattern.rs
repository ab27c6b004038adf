//! Pattern-based string generator.
//!
//! Supports placeholders:
//! - `{index}` / `{id}` - record identity
//! - `{uuid}` - random UUID drawn from the record RNG
//! - `{rand:N}` - random N-digit number, N at most [`MAX_RAND_DIGITS`]

use super::uuid::generate_uuid_v4;
use mock_core::Value;
use rand::Rng;

/// Largest digit count accepted in a `{rand:N}` placeholder.
pub const MAX_RAND_DIGITS: usize = 32;

/// Check the `{rand:N}` placeholders of a pattern.
pub fn validate_pattern(pattern: &str) -> Result<(), String> {
    let mut rest = pattern;
    while let Some(start) = rest.find("{rand:") {
        let tail = &rest[start + 6..];
        let Some(end) = tail.find('}') else {
            return Ok(());
        };
        if let Ok(digits) = tail[..end].parse::<usize>() {
            if digits > MAX_RAND_DIGITS {
                return Err(format!(
                    "{{rand:{digits}}} exceeds the maximum of {MAX_RAND_DIGITS} digits"
                ));
            }
        }
        rest = &tail[end + 1..];
    }
    Ok(())
}

/// Generate a string based on a pattern with placeholders.
pub fn generate_pattern<R: Rng>(pattern: &str, rng: &mut R, id: u64) -> Value {
    let id = id.to_string();
    let mut result = pattern.replace("{index}", &id).replace("{id}", &id);

    while result.contains("{uuid}") {
        result = result.replacen("{uuid}", &generate_uuid_v4(rng).to_string(), 1);
    }

    while let Some(start) = result.find("{rand:") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let end = start + end;
        let digits = match result[start + 6..end].parse::<usize>() {
            Ok(digits) if digits <= MAX_RAND_DIGITS => digits,
            // Invalid format, leave the rest untouched
            _ => break,
        };
        let random_num = generate_random_digits(rng, digits);
        result = format!("{}{}{}", &result[..start], random_num, &result[end + 1..]);
    }

    Value::String(result)
}

/// Generate a random number with exactly N digits.
fn generate_random_digits<R: Rng>(rng: &mut R, digits: usize) -> String {
    let mut result = String::with_capacity(digits);
    for position in 0..digits {
        // No leading zero
        let low = if position == 0 { 1 } else { 0 };
        let digit: u8 = rng.gen_range(low..10);
        result.push(char::from(b'0' + digit));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_pattern_index() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_pattern("user_{index}@example.com", &mut rng, 123);
        assert_eq!(value, Value::from("user_123@example.com"));

        let value = generate_pattern("post-{id}", &mut rng, 9);
        assert_eq!(value, Value::from("post-9"));
    }

    #[test]
    fn test_generate_pattern_uuid() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_pattern("id-{uuid}", &mut rng, 0);

        let s = value.as_str().expect("Expected String value");
        assert!(s.starts_with("id-"));
        assert_eq!(s.len(), 3 + 36);
    }

    #[test]
    fn test_generate_pattern_random_digits() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_pattern("code-{rand:6}", &mut rng, 0);

        let s = value.as_str().expect("Expected String value");
        assert!(s.starts_with("code-"));
        assert_eq!(s.len(), 5 + 6);
        assert!(s[5..].chars().all(|c| c.is_ascii_digit()));
        assert_ne!(&s[5..6], "0");
    }

    #[test]
    fn test_generate_pattern_multiple_placeholders() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_pattern("user_{index}_code_{rand:4}", &mut rng, 42);

        let s = value.as_str().expect("Expected String value");
        assert!(s.starts_with("user_42_code_"));
        assert_eq!(s.len(), 13 + 4);
    }

    #[test]
    fn test_rand_digit_limit() {
        assert!(validate_pattern("code-{rand:6}-{index}").is_ok());
        assert!(validate_pattern("code-{rand:32}").is_ok());
        assert!(validate_pattern("a-{rand:4}-b-{rand:999999999}").is_err());

        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_pattern("x-{rand:999999999}", &mut rng, 1);
        assert_eq!(value, Value::from("x-{rand:999999999}"));
    }

    #[test]
    fn test_generate_pattern_invalid_rand() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_pattern("x-{rand:abc}", &mut rng, 1);
        assert_eq!(value, Value::from("x-{rand:abc}"));
    }
}
