//! Mockdata Library
//!
//! A library for generating synthetic records for tests.
//!
//! # Features
//!
//! - Factories: declare attributes as constants, computed values, sequences
//!   or relationships, then create any number of records on demand
//! - Lazy, memoized attributes: each attribute of a record is computed once
//! - Sequences: values derived from the values generated before them
//! - YAML schemas: declare factories in files, with deterministic seeding
//!
//! # Crates
//!
//! - `mock_core` - `Value` and `Record`
//! - `mock_factory` - descriptors, `Factory` and lazy record generation
//! - `mock_schema` - YAML factory definitions
//!
//! # CLI Usage
//!
//! ```bash
//! # Write 100 users as JSON Lines
//! mockdata generate --schema schema.yaml --factory user --count 100 --output users.jsonl
//!
//! # Check every factory in a schema
//! mockdata validate --schema schema.yaml
//! ```

pub mod args;
pub mod jsonl;

pub use args::GenerateArgs;
pub use jsonl::{JsonlWriter, JsonlWriterError, PopulateMetrics};

// Re-export the workspace crates for convenience
pub use mock_core as model;
pub use mock_factory as factory;
pub use mock_schema as schema;
