//! Value generators for YAML-declared attributes.
//!
//! Each generated value draws from an RNG derived from the schema seed, the
//! record identity and the attribute position, so a record's values do not
//! depend on which records were generated before it.

pub mod array;
pub mod numeric;
pub mod pattern;
pub mod sequence;
pub mod static_value;
pub mod timestamp;
pub mod uuid;

use crate::schema::GeneratorConfig;
use mock_core::Value;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build the RNG for one attribute of one record.
pub fn rng_for(seed: u64, id: u64, position: usize) -> StdRng {
    let record_seed = seed.wrapping_add(id.wrapping_mul(0x9E3779B97F4A7C15));
    let attr_seed = record_seed ^ (position as u64).wrapping_mul(0xBF58476D1CE4E5B9);
    StdRng::seed_from_u64(attr_seed)
}

/// Generate a value based on the generator configuration.
///
/// Sequence and relationship kinds become factory descriptors and are never
/// generated here; they yield null.
pub fn generate_value<R: Rng>(config: &GeneratorConfig, rng: &mut R, id: u64) -> Value {
    match config {
        GeneratorConfig::UuidV4 => uuid::generate_uuid_value(rng),

        GeneratorConfig::Sequential { start } => {
            Value::Int64(start.wrapping_add(id as i64).wrapping_sub(1))
        }

        GeneratorConfig::Pattern { pattern } => pattern::generate_pattern(pattern, rng, id),

        GeneratorConfig::IntRange { min, max } => numeric::generate_int_range(rng, *min, *max),

        GeneratorConfig::FloatRange { min, max } => numeric::generate_float_range(rng, *min, *max),

        GeneratorConfig::TimestampRange { start, end } => {
            timestamp::generate_timestamp_range(rng, start, end)
        }

        GeneratorConfig::WeightedBool { true_weight } => {
            numeric::generate_weighted_bool(rng, *true_weight)
        }

        GeneratorConfig::OneOf { values } => array::generate_one_of(rng, values),

        GeneratorConfig::SampleArray {
            pool,
            min_length,
            max_length,
        } => array::generate_sample_array(rng, pool, *min_length, *max_length),

        GeneratorConfig::Static { value } => static_value::yaml_to_value(value),

        GeneratorConfig::Null
        | GeneratorConfig::Sequence { .. }
        | GeneratorConfig::HasOne { .. }
        | GeneratorConfig::HasMany { .. } => Value::Null,
    }
}
