//! YAML factory definitions for the mockdata framework.
//!
//! This crate loads factory declarations from YAML and turns them into
//! [`mock_factory::Factory`] instances. Random generators are seeded from the
//! schema seed, the record identity and the attribute position, so the same
//! schema and seed always produce the same records.
//!
//! # Example
//!
//! ```rust
//! use mock_core::Value;
//! use mock_schema::FactorySchema;
//!
//! let schema = FactorySchema::from_yaml(r#"
//! version: 1
//! seed: 42
//! factories:
//!   - name: user
//!     attrs:
//!       - name: login
//!         generator:
//!           type: sequence
//!           initial: admin
//!           pattern: "user-{n}"
//!       - name: email
//!         generator:
//!           type: pattern
//!           pattern: "user_{index}@example.com"
//! "#).unwrap();
//!
//! let users = schema.build_factory("user").unwrap();
//! let record = users.create_record(1).unwrap();
//! assert_eq!(record.get_field("login"), Some(&Value::from("admin")));
//! ```
//!
//! # Generators
//!
//! - `uuid_v4` - Random UUID v4
//! - `sequential` - Integers counting up from `start` (identity 1)
//! - `pattern` - Pattern strings with placeholders (`{index}`, `{id}`, `{uuid}`, `{rand:N}`)
//! - `int_range` / `float_range` - Random numbers in a range
//! - `timestamp_range` - Random timestamps in a date range
//! - `weighted_bool` - Boolean with configurable true probability
//! - `one_of` - Random selection from a list
//! - `sample_array` - Array of random samples from a pool
//! - `static` / `null` - Constant values
//! - `sequence` - Values derived from the previous ones (`step` or `pattern`)
//! - `has_one` / `has_many` - Relationship descriptors

pub mod generators;
pub mod schema;

// Re-exports for convenience
pub use schema::{AttributeDefinition, FactoryDefinition, FactorySchema, GeneratorConfig, SchemaError};
