//! Core types for the mockdata framework.
//!
//! This crate provides the foundational types shared by the factory,
//! the YAML schema layer and the CLI:
//!
//! - [`Value`] - Type-agnostic generated attribute value
//! - [`Record`] - A generated record (`id` plus ordered attribute values)
//!
//! # Architecture
//!
//! ```text
//! mock-core (this crate)
//!    │
//!    ├─── mock-factory   (attribute descriptors, lazy record generation)
//!    │
//!    └─── mock-schema    (YAML factory definitions)
//! ```
//!
//! # Example
//!
//! ```rust
//! use mock_core::{Record, Value};
//!
//! let record = Record::builder("1")
//!     .field("name", "admin")
//!     .field("posts", Value::empty_array())
//!     .build();
//!
//! assert_eq!(record.get_field("name"), Some(&Value::from("admin")));
//! ```

pub mod record;
pub mod values;

// Re-exports for convenience
pub use indexmap::IndexMap;
pub use record::{Record, RecordBuilder};
pub use values::Value;
