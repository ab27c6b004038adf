//! Factory definition, metadata compilation and record creation.

use crate::descriptor::{computed, AttrValue, AttributeDescriptor, Field};
use crate::error::FactoryError;
use crate::generator::{LazyRecord, RecordGenerator};
use indexmap::IndexMap;
use mock_core::{Record, Value};
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

/// Attribute name no factory may declare; every record carries it already.
pub const RESERVED_ATTRIBUTE: &str = "id";

/// Compiled metadata: attribute name -> descriptor, in declaration order.
pub type Meta = IndexMap<String, AttributeDescriptor>;

/// Hook applied to a record once its relationships are materialized.
pub type AfterCreateFn = Rc<dyn Fn(Record) -> Record>;

/// Function computing how many related records to create for an identity.
pub type RelatedCountFn = Rc<dyn Fn(u64) -> usize>;

/// How many related records an orchestrator should pre-create for a
/// relationship attribute.
#[derive(Clone)]
pub enum CreateRelated {
    /// Same count for every record
    Count(usize),
    /// Count computed from the record identity
    PerRecord(RelatedCountFn),
}

impl CreateRelated {
    /// Resolve the count for a record identity.
    pub fn count_for(&self, id: u64) -> usize {
        match self {
            Self::Count(count) => *count,
            Self::PerRecord(f) => f(id),
        }
    }
}

impl fmt::Debug for CreateRelated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => f.debug_tuple("Count").field(count).finish(),
            Self::PerRecord(_) => f.write_str("PerRecord(<fn>)"),
        }
    }
}

impl From<usize> for CreateRelated {
    fn from(count: usize) -> Self {
        Self::Count(count)
    }
}

/// Factory configuration. Every part is optional.
#[derive(Clone, Default)]
pub struct FactoryConfig {
    /// Raw attributes in declaration order
    pub attrs: IndexMap<String, AttrValue>,
    /// Materialization hints for relationship attributes
    pub create_related: IndexMap<String, CreateRelated>,
    /// Hook run by the orchestrator after relationships are wired; identity when unset
    pub after_create: Option<AfterCreateFn>,
    /// How many relationship levels `after_create` cascades through; unbounded when unset
    pub after_create_relationships_depth: Option<u32>,
}

impl FactoryConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an attribute (static value or descriptor).
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Declare an attribute computed once per record.
    pub fn computed<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&LazyRecord<'_>) -> Result<Value, FactoryError> + 'static,
    {
        self.attr(name, computed(f))
    }

    /// Add a materialization hint for a relationship attribute.
    pub fn create_related(mut self, name: impl Into<String>, related: impl Into<CreateRelated>) -> Self {
        self.create_related.insert(name.into(), related.into());
        self
    }

    /// Set the after-create hook.
    pub fn after_create<F>(mut self, f: F) -> Self
    where
        F: Fn(Record) -> Record + 'static,
    {
        self.after_create = Some(Rc::new(f));
        self
    }

    /// Limit how many relationship levels the after-create hook cascades through.
    pub fn after_create_relationships_depth(mut self, depth: u32) -> Self {
        self.after_create_relationships_depth = Some(depth);
        self
    }
}

/// A record factory.
///
/// Metadata and the record generator are compiled once, either explicitly
/// through [`Factory::init`] or on first use. The factory is single-threaded:
/// sequence history lives in shared, non-synchronized buffers.
pub struct Factory {
    attrs: IndexMap<String, AttrValue>,
    create_related: IndexMap<String, CreateRelated>,
    after_create: AfterCreateFn,
    after_create_relationships_depth: Option<u32>,
    meta: OnceCell<Rc<Meta>>,
    generator: OnceCell<RecordGenerator>,
}

impl Factory {
    /// Create a factory from its configuration.
    pub fn create(config: FactoryConfig) -> Self {
        let after_create: AfterCreateFn = match config.after_create {
            Some(hook) => hook,
            None => Rc::new(|record: Record| record),
        };
        Self {
            attrs: config.attrs,
            create_related: config.create_related,
            after_create,
            after_create_relationships_depth: config.after_create_relationships_depth,
            meta: OnceCell::new(),
            generator: OnceCell::new(),
        }
    }

    /// Compiled attribute metadata.
    ///
    /// Descriptors are kept as declared; static values and functions become
    /// [`Field`]s. Computed on first call and cached afterwards.
    pub fn meta(&self) -> &Meta {
        self.compiled_meta()
    }

    fn compiled_meta(&self) -> &Rc<Meta> {
        self.meta.get_or_init(|| {
            let meta: Meta = self
                .attrs
                .iter()
                .map(|(name, value)| {
                    let descriptor = match value {
                        AttrValue::Descriptor(descriptor) => descriptor.clone(),
                        AttrValue::Static(value) => AttributeDescriptor::Field(Field::Constant(value.clone())),
                        AttrValue::Dynamic(f) => AttributeDescriptor::Field(Field::Computed(Rc::clone(f))),
                    };
                    (name.clone(), descriptor)
                })
                .collect();
            debug!(attributes = meta.len(), "Compiled factory metadata");
            Rc::new(meta)
        })
    }

    fn validate(&self) -> Result<(), FactoryError> {
        if self.attrs.contains_key(RESERVED_ATTRIBUTE) {
            return Err(FactoryError::ReservedAttribute(RESERVED_ATTRIBUTE.to_string()));
        }
        Ok(())
    }

    /// Prepare the factory for generation. Idempotent.
    ///
    /// Fails if the factory declares a reserved attribute.
    pub fn init(&self) -> Result<&RecordGenerator, FactoryError> {
        self.validate()?;
        Ok(self
            .generator
            .get_or_init(|| RecordGenerator::new(Rc::clone(self.compiled_meta()))))
    }

    /// Produce a lazily-evaluated record for the given identity.
    pub fn generate(&self, id: u64) -> Result<LazyRecord<'_>, FactoryError> {
        Ok(self.init()?.generate(id))
    }

    /// Create a record with every declared attribute resolved.
    ///
    /// The after-create hook is not applied; see [`Factory::after_create`].
    pub fn create_record(&self, id: u64) -> Result<Record, FactoryError> {
        let record = self.generate(id)?.to_record()?;
        trace!(id, fields = record.field_count(), "Created record");
        Ok(record)
    }

    /// Declared attribute names, in declaration order.
    pub fn attr_names(&self) -> Vec<&str> {
        self.attrs.keys().map(String::as_str).collect()
    }

    /// Materialization hints for relationship attributes.
    pub fn create_related(&self) -> &IndexMap<String, CreateRelated> {
        &self.create_related
    }

    /// How many related records to create for `attr` on record `id`.
    pub fn related_count(&self, attr: &str, id: u64) -> Option<usize> {
        self.create_related.get(attr).map(|related| related.count_for(id))
    }

    /// Apply the after-create hook to a record.
    pub fn after_create(&self, record: Record) -> Record {
        (self.after_create)(record)
    }

    /// The after-create hook itself.
    pub fn after_create_hook(&self) -> &AfterCreateFn {
        &self.after_create
    }

    /// Relationship depth the after-create hook cascades through, `None` when unbounded.
    pub fn after_create_relationships_depth(&self) -> Option<u32> {
        self.after_create_relationships_depth
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::create(FactoryConfig::default())
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("attrs", &self.attrs)
            .field("create_related", &self.create_related)
            .field(
                "after_create_relationships_depth",
                &self.after_create_relationships_depth,
            )
            .finish_non_exhaustive()
    }
}
