//! YAML factory definitions.
//!
//! A schema file declares one or more factories. Each attribute names a
//! generator; value generators become computed attributes, while
//! `sequence`, `has_one` and `has_many` become factory descriptors.
//!
//! ```yaml
//! version: 1
//! seed: 42
//! factories:
//!   - name: user
//!     attrs:
//!       - name: login
//!         generator: { type: sequence, initial: admin, pattern: "user-{n}" }
//!       - name: age
//!         generator: { type: int_range, min: 18, max: 80 }
//!       - name: posts
//!         generator: { type: has_many, factory: post, inverse: author }
//!     create_related:
//!       posts: 3
//! ```

use crate::generators::numeric::float_range_is_valid;
use crate::generators::pattern::validate_pattern;
use crate::generators::sequence::{increment_next, pattern_next};
use crate::generators::static_value::yaml_to_value;
use crate::generators::{generate_value, rng_for};
use indexmap::IndexMap;
use mock_core::Value;
use mock_factory::{
    computed, has_many, has_one, sequence_item, sequence_item_counted, AttrValue, CreateRelated,
    Factory, FactoryConfig, FactoryError, RelationshipOptions, SequenceOptions,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Factory not found in schema
    #[error("Factory not found: {0}")]
    FactoryNotFound(String),

    /// Generator configuration that can't produce values
    #[error("Invalid generator for '{factory}.{attr}': {reason}")]
    InvalidGenerator {
        factory: String,
        attr: String,
        reason: String,
    },

    /// Factory definition rejected when preparing it for generation
    #[error("Invalid factory '{factory}': {source}")]
    Factory {
        factory: String,
        #[source]
        source: FactoryError,
    },
}

// ============================================================================
// Generator Types
// ============================================================================

/// Generator configuration for an attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratorConfig {
    /// Generate UUIDs (v4)
    UuidV4,

    /// Generate sequential integers; identity 1 gets `start`
    Sequential {
        /// Starting value
        #[serde(default = "default_sequential_start")]
        start: i64,
    },

    /// Generate values using a pattern with placeholders
    Pattern {
        /// Pattern string (supports {index}, {id}, {uuid}, {rand:N})
        pattern: String,
    },

    /// Generate random integers in a range
    IntRange {
        /// Minimum value (inclusive)
        min: i64,
        /// Maximum value (inclusive)
        max: i64,
    },

    /// Generate random floats in a range
    FloatRange {
        /// Minimum value (inclusive)
        min: f64,
        /// Maximum value (inclusive)
        max: f64,
    },

    /// Generate timestamps in a range
    TimestampRange {
        /// Start timestamp (RFC 3339 or YYYY-MM-DD)
        start: String,
        /// End timestamp (RFC 3339 or YYYY-MM-DD)
        end: String,
    },

    /// Generate weighted boolean values
    WeightedBool {
        /// Weight for true value (0.0 to 1.0)
        true_weight: f64,
    },

    /// Generate random selection from a pool of values
    OneOf {
        /// Pool of values to select from
        values: Vec<serde_yaml::Value>,
    },

    /// Generate arrays by sampling from a pool
    SampleArray {
        /// Pool of values to sample from
        pool: Vec<serde_yaml::Value>,
        /// Minimum array length
        #[serde(default)]
        min_length: usize,
        /// Maximum array length
        max_length: usize,
    },

    /// Generate a static value
    Static {
        /// The static value to use
        value: serde_yaml::Value,
    },

    /// Generate null values
    Null,

    /// Value derived from the previously generated values
    Sequence {
        /// Value of the first record
        initial: serde_yaml::Value,
        /// Added to the previous value (default 1); ignored with `pattern`
        #[serde(default)]
        step: Option<i64>,
        /// String pattern where `{n}` is the record's 1-based position
        #[serde(default)]
        pattern: Option<String>,
    },

    /// Single related record
    HasOne {
        /// Related factory name
        factory: String,
        /// Inverse attribute on the related factory
        inverse: String,
        /// Whether the relationship targets the declaring factory
        #[serde(default)]
        reflexive: bool,
        /// Reflexive expansion depth
        #[serde(default)]
        depth: Option<u32>,
    },

    /// Ordered collection of related records
    HasMany {
        /// Related factory name
        factory: String,
        /// Inverse attribute on the related factory
        inverse: String,
        /// Whether the relationship targets the declaring factory
        #[serde(default)]
        reflexive: bool,
        /// Reflexive expansion depth
        #[serde(default)]
        depth: Option<u32>,
    },
}

impl GeneratorConfig {
    /// Reject configurations that would fail or panic while generating.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            GeneratorConfig::FloatRange { min, max } if !float_range_is_valid(*min, *max) => {
                Err(format!("float_range bounds must be finite, got {min}..={max}"))
            }
            GeneratorConfig::WeightedBool { true_weight } if !true_weight.is_finite() => {
                Err(format!("true_weight must be finite, got {true_weight}"))
            }
            GeneratorConfig::Pattern { pattern } => validate_pattern(pattern),
            _ => Ok(()),
        }
    }
}

fn default_sequential_start() -> i64 {
    1
}

/// Attribute with its generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// Attribute name
    pub name: String,

    /// Generator configuration for this attribute
    pub generator: GeneratorConfig,
}

/// Factory declared in YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactoryDefinition {
    /// Factory name
    pub name: String,

    /// Attributes in declaration order
    #[serde(default)]
    pub attrs: Vec<AttributeDefinition>,

    /// Related records to pre-create per relationship attribute
    #[serde(default)]
    pub create_related: IndexMap<String, usize>,

    /// How many relationship levels after-create hooks cascade through
    #[serde(default)]
    pub after_create_relationships_depth: Option<u32>,
}

impl FactoryDefinition {
    /// Get an attribute by name.
    pub fn get_attr(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attrs.iter().find(|a| a.name == name)
    }

    /// Get all attribute names.
    pub fn attr_names(&self) -> Vec<&str> {
        self.attrs.iter().map(|a| a.name.as_str()).collect()
    }

    /// Check every attribute's generator configuration.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for attr in &self.attrs {
            attr.generator
                .validate()
                .map_err(|reason| SchemaError::InvalidGenerator {
                    factory: self.name.clone(),
                    attr: attr.name.clone(),
                    reason,
                })?;
        }
        Ok(())
    }

    /// Build a factory from this definition.
    ///
    /// Random generators are seeded from `seed`, the record identity and the
    /// attribute position.
    pub fn to_factory(&self, seed: u64) -> Factory {
        let mut config = FactoryConfig::new();

        for (position, attr) in self.attrs.iter().enumerate() {
            config = config.attr(attr.name.clone(), attr_value(&attr.generator, seed, position));
        }
        for (name, count) in &self.create_related {
            config = config.create_related(name.clone(), CreateRelated::Count(*count));
        }
        if let Some(depth) = self.after_create_relationships_depth {
            config = config.after_create_relationships_depth(depth);
        }

        debug!(factory = %self.name, attributes = self.attrs.len(), "Built factory from schema");
        Factory::create(config)
    }
}

/// Turn a generator configuration into a raw factory attribute.
fn attr_value(generator: &GeneratorConfig, seed: u64, position: usize) -> AttrValue {
    match generator {
        GeneratorConfig::Static { value } => AttrValue::Static(yaml_to_value(value)),

        GeneratorConfig::Null => AttrValue::Static(Value::Null),

        GeneratorConfig::Sequence {
            initial,
            step,
            pattern,
        } => {
            let initial = yaml_to_value(initial);
            let descriptor = match pattern {
                Some(pattern) => sequence_item_counted(
                    initial,
                    pattern_next(pattern.clone()),
                    SequenceOptions::last_values(0),
                ),
                None => sequence_item(
                    initial.clone(),
                    increment_next(initial, step.unwrap_or(1)),
                    SequenceOptions::last_values(1),
                ),
            };
            descriptor.into()
        }

        GeneratorConfig::HasOne {
            factory,
            inverse,
            reflexive,
            depth,
        } => has_one(
            factory.clone(),
            inverse.clone(),
            RelationshipOptions {
                reflexive: *reflexive,
                depth: *depth,
            },
        )
        .into(),

        GeneratorConfig::HasMany {
            factory,
            inverse,
            reflexive,
            depth,
        } => has_many(
            factory.clone(),
            inverse.clone(),
            RelationshipOptions {
                reflexive: *reflexive,
                depth: *depth,
            },
        )
        .into(),

        other => {
            let config = other.clone();
            computed(move |record| {
                let mut rng = rng_for(seed, record.id(), position);
                Ok(generate_value(&config, &mut rng, record.id()))
            })
        }
    }
}

fn default_version() -> u32 {
    1
}

/// Full schema with factory definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorySchema {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Seed for random generators (0 when unset)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Factory definitions
    pub factories: Vec<FactoryDefinition>,

    /// Cached factory lookup (not serialized)
    #[serde(skip)]
    factory_map: HashMap<String, usize>,
}

impl FactorySchema {
    /// Load schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let mut schema: FactorySchema = serde_yaml::from_str(yaml)?;
        schema.build_factory_map();
        Ok(schema)
    }

    /// Build the internal factory lookup map.
    fn build_factory_map(&mut self) {
        self.factory_map = self
            .factories
            .iter()
            .enumerate()
            .map(|(idx, factory)| (factory.name.clone(), idx))
            .collect();
    }

    /// Get a factory definition by name.
    pub fn get_factory(&self, name: &str) -> Option<&FactoryDefinition> {
        self.factory_map
            .get(name)
            .and_then(|&idx| self.factories.get(idx))
    }

    /// Get all factory names in the schema.
    pub fn factory_names(&self) -> Vec<&str> {
        self.factories.iter().map(|f| f.name.as_str()).collect()
    }

    /// Override the seed used by random generators.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate, build and initialize the named factory.
    pub fn build_factory(&self, name: &str) -> Result<Factory, SchemaError> {
        let definition = self
            .get_factory(name)
            .ok_or_else(|| SchemaError::FactoryNotFound(name.to_string()))?;
        definition.validate()?;

        let factory = definition.to_factory(self.seed.unwrap_or(0));
        factory.init().map_err(|source| SchemaError::Factory {
            factory: name.to_string(),
            source,
        })?;
        Ok(factory)
    }

    /// Build and initialize every factory, failing on the first invalid one.
    pub fn build_all(&self) -> Result<IndexMap<String, Factory>, SchemaError> {
        self.factories
            .iter()
            .map(|definition| {
                let factory = self.build_factory(&definition.name)?;
                Ok((definition.name.clone(), factory))
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
