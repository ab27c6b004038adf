//! Record factories for the mockdata framework.
//!
//! A [`Factory`] turns a declared attribute map into records on demand.
//! Attributes are static values, per-record computed values, sequence
//! values derived from previously generated ones, or relationship
//! descriptors that an orchestrator fills in later.
//!
//! # Architecture
//!
//! ```text
//! FactoryConfig { attrs, create_related, after_create, .. }
//!        │
//!        ▼
//! ┌─────────────────┐  meta()   ┌──────────────────────────────┐
//! │     Factory     │ ────────▶ │ IndexMap<name, Descriptor>   │
//! └────────┬────────┘           └──────────────┬───────────────┘
//!          │ init()                            │
//!          ▼                                   ▼
//!   RecordGenerator ── generate(id) ──▶ LazyRecord (memoized reads)
//!                                              │ to_record()
//!                                              ▼
//!                                   Record { id, fields }
//! ```
//!
//! # Example
//!
//! ```rust
//! use mock_core::Value;
//! use mock_factory::{has_many, sequence_item, Factory, FactoryConfig};
//! use mock_factory::{RelationshipOptions, SequenceOptions};
//!
//! let users = Factory::create(
//!     FactoryConfig::new()
//!         .attr(
//!             "login",
//!             sequence_item(
//!                 "admin",
//!                 |prev: &[Value]| Ok(Value::from(format!("user-{}", prev.len() + 1))),
//!                 SequenceOptions::default(),
//!             ),
//!         )
//!         .computed("email", |record| {
//!             let login = record.get("login")?;
//!             Ok(Value::from(format!("{}@example.com", login.as_str().unwrap_or_default())))
//!         })
//!         .attr("posts", has_many("post", "author", RelationshipOptions::default())),
//! );
//!
//! let first = users.create_record(1).unwrap();
//! let second = users.create_record(2).unwrap();
//! assert_eq!(first.get_field("login"), Some(&Value::from("admin")));
//! assert_eq!(second.get_field("email"), Some(&Value::from("user-2@example.com")));
//! ```

pub mod descriptor;
pub mod error;
pub mod factory;
pub mod generator;

// Re-exports for convenience
pub use descriptor::{
    computed, has_many, has_one, sequence_item, sequence_item_counted, sequence_item_with, AttrValue,
    AttributeDescriptor, ComputeFn, Field, NextValueFn, Relationship, RelationshipOptions,
    SequenceItem, SequenceOptions, DEFAULT_REFLEXIVE_DEPTH,
};
pub use error::FactoryError;
pub use factory::{
    AfterCreateFn, CreateRelated, Factory, FactoryConfig, Meta, RelatedCountFn,
    RESERVED_ATTRIBUTE,
};
pub use generator::{LazyRecord, RecordGenerator, FIRST_IDENTITY};
