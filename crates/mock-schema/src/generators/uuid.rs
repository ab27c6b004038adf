//! UUID value generator.

use mock_core::Value;
use rand::Rng;
use uuid::Uuid;

/// Generate a random UUID v4 from the provided RNG.
pub fn generate_uuid_v4<R: Rng>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    // Version 4, RFC 4122 variant
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes)
}

/// Generate a UUID v4 value.
pub fn generate_uuid_value<R: Rng>(rng: &mut R) -> Value {
    Value::Uuid(generate_uuid_v4(rng))
}
