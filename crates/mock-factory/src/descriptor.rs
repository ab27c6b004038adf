//! Attribute descriptors and the functions that build them.
//!
//! A factory's attribute map mixes plain values, computed values and tagged
//! descriptors. The tagged kinds are built here:
//!
//! - [`has_one`] / [`has_many`] - relationship descriptors
//! - [`sequence_item`] / [`sequence_item_with`] / [`sequence_item_counted`] -
//!   values derived from the history of previously generated values
//!
//! Plain values and computed values become [`Field`]s when the factory
//! compiles its metadata.

use crate::error::FactoryError;
use crate::generator::LazyRecord;
use mock_core::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Default expansion depth for reflexive relationships.
pub const DEFAULT_REFLEXIVE_DEPTH: u32 = 2;

/// Function computing an attribute from the record being generated.
pub type ComputeFn = Rc<dyn Fn(&LazyRecord<'_>) -> Result<Value, FactoryError>>;

/// Function producing the next sequence value from the recent history
/// (most recent last) and the total number of values recorded so far.
pub type NextValueFn = Rc<dyn Fn(&[Value], usize) -> Result<Value, FactoryError>>;

/// Attribute value as supplied by the caller, before compilation.
#[derive(Clone)]
pub enum AttrValue {
    /// Constant value stored verbatim on every record
    Static(Value),
    /// Function evaluated once per record
    Dynamic(ComputeFn),
    /// Relationship or sequence descriptor, kept unchanged by compilation
    Descriptor(AttributeDescriptor),
}

impl fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(<fn>)"),
            Self::Descriptor(descriptor) => f.debug_tuple("Descriptor").field(descriptor).finish(),
        }
    }
}

impl From<Value> for AttrValue {
    fn from(value: Value) -> Self {
        Self::Static(value)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Static(Value::from(s))
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Static(Value::from(s))
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        Self::Static(Value::from(i))
    }
}

impl From<f64> for AttrValue {
    fn from(f: f64) -> Self {
        Self::Static(Value::from(f))
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Static(Value::from(b))
    }
}

impl From<AttributeDescriptor> for AttrValue {
    fn from(descriptor: AttributeDescriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

/// Wrap a function as a computed attribute.
///
/// The function receives the record being generated, so it can read other
/// attributes of the same record.
pub fn computed<F>(f: F) -> AttrValue
where
    F: Fn(&LazyRecord<'_>) -> Result<Value, FactoryError> + 'static,
{
    AttrValue::Dynamic(Rc::new(f))
}

/// Compiled attribute metadata.
#[derive(Clone, Debug)]
pub enum AttributeDescriptor {
    /// Attribute without a special tag
    Field(Field),
    /// Single related record
    HasOne(Relationship),
    /// Ordered collection of related records
    HasMany(Relationship),
    /// Value derived from previously generated values
    SequenceItem(SequenceItem),
}

impl AttributeDescriptor {
    /// Relationship metadata, if this is a has-one or has-many attribute.
    pub fn relationship(&self) -> Option<&Relationship> {
        match self {
            Self::HasOne(rel) | Self::HasMany(rel) => Some(rel),
            _ => None,
        }
    }

    /// Sequence metadata, if this is a sequence attribute.
    pub fn sequence(&self) -> Option<&SequenceItem> {
        match self {
            Self::SequenceItem(seq) => Some(seq),
            _ => None,
        }
    }

    /// Short name of the attribute kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Field(Field::Constant(_)) => "constant",
            Self::Field(Field::Computed(_)) => "computed",
            Self::HasOne(_) => "has_one",
            Self::HasMany(_) => "has_many",
            Self::SequenceItem(_) => "sequence_item",
        }
    }
}

/// Plain attribute: either a constant or a per-record computed value.
#[derive(Clone)]
pub enum Field {
    Constant(Value),
    Computed(ComputeFn),
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(<fn>)"),
        }
    }
}

/// Options for [`has_one`] and [`has_many`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelationshipOptions {
    /// Whether the relationship targets the declaring factory
    pub reflexive: bool,
    /// Expansion depth for reflexive relationships (default 2)
    pub depth: Option<u32>,
}

impl RelationshipOptions {
    /// Options for a reflexive relationship with the default depth.
    pub fn reflexive() -> Self {
        Self {
            reflexive: true,
            depth: None,
        }
    }

    /// Set the reflexive expansion depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }
}

/// Relationship descriptor shared by has-one and has-many attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Name of the related factory
    pub factory_name: String,
    /// Name of the inverse attribute on the related factory
    pub inverse_attr_name: String,
    /// Whether the related factory is the declaring factory
    pub reflexive: bool,
    depth: u32,
}

impl Relationship {
    fn new(
        factory_name: impl Into<String>,
        inverse_attr_name: impl Into<String>,
        options: RelationshipOptions,
    ) -> Self {
        Self {
            factory_name: factory_name.into(),
            inverse_attr_name: inverse_attr_name.into(),
            reflexive: options.reflexive,
            depth: options.depth.unwrap_or(DEFAULT_REFLEXIVE_DEPTH),
        }
    }

    /// How many levels a reflexive relationship expands.
    ///
    /// Always `None` for non-reflexive relationships, whatever depth was given.
    pub fn reflexive_depth(&self) -> Option<u32> {
        self.reflexive.then_some(self.depth)
    }
}

/// Describe a single related record.
pub fn has_one(
    factory_name: impl Into<String>,
    inverse_attr_name: impl Into<String>,
    options: RelationshipOptions,
) -> AttributeDescriptor {
    AttributeDescriptor::HasOne(Relationship::new(
        factory_name,
        inverse_attr_name,
        options,
    ))
}

/// Describe an ordered collection of related records.
pub fn has_many(
    factory_name: impl Into<String>,
    inverse_attr_name: impl Into<String>,
    options: RelationshipOptions,
) -> AttributeDescriptor {
    AttributeDescriptor::HasMany(Relationship::new(
        factory_name,
        inverse_attr_name,
        options,
    ))
}

/// Options for [`sequence_item`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceOptions {
    /// Maximum number of recent values passed to the next-value function.
    /// `None` passes the whole history.
    pub last_values_count: Option<usize>,
}

impl SequenceOptions {
    /// Pass at most `count` recent values to the next-value function.
    pub fn last_values(count: usize) -> Self {
        Self {
            last_values_count: Some(count),
        }
    }
}

/// Sequence descriptor.
///
/// The history buffer is shared by every clone of the descriptor, so all
/// records generated from one factory see the same history. Two separate
/// calls to [`sequence_item`] never share a buffer.
#[derive(Clone)]
pub struct SequenceItem {
    initial_value: Value,
    next_value: NextValueFn,
    prev_values: Rc<RefCell<Vec<Value>>>,
    last_values_count: Option<usize>,
}

impl SequenceItem {
    /// Value given to the first record (identity 1).
    pub fn initial_value(&self) -> &Value {
        &self.initial_value
    }

    /// History window size, `None` when unbounded.
    pub fn last_values_count(&self) -> Option<usize> {
        self.last_values_count
    }

    /// Snapshot of the whole history, oldest first.
    pub fn prev_values(&self) -> Vec<Value> {
        self.prev_values.borrow().clone()
    }

    /// Number of values recorded so far.
    pub fn history_len(&self) -> usize {
        self.prev_values.borrow().len()
    }

    /// Copy of the last `last_values_count` history entries, most recent last.
    pub fn recent_values(&self) -> Vec<Value> {
        window(&self.prev_values.borrow(), self.last_values_count).to_vec()
    }

    /// Compute the next value from the recent history.
    ///
    /// Only the window is copied. The history is not touched; see
    /// [`SequenceItem::record`].
    pub(crate) fn compute_next(&self) -> Result<Value, FactoryError> {
        let (recent, history_len) = {
            let history = self.prev_values.borrow();
            (window(&history, self.last_values_count).to_vec(), history.len())
        };
        (self.next_value)(&recent, history_len)
    }

    /// Append a generated value to the shared history.
    pub(crate) fn record(&self, value: Value) {
        let mut history = self.prev_values.borrow_mut();
        history.push(value);
        debug!(history_len = history.len(), "Recorded sequence value");
    }
}

fn window(history: &[Value], count: Option<usize>) -> &[Value] {
    let start = match count {
        Some(count) => history.len().saturating_sub(count),
        None => 0,
    };
    &history[start..]
}

impl fmt::Debug for SequenceItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceItem")
            .field("initial_value", &self.initial_value)
            .field("prev_values", &self.prev_values.borrow())
            .field("last_values_count", &self.last_values_count)
            .finish_non_exhaustive()
    }
}

/// Describe a sequence attribute with a fixed initial value.
pub fn sequence_item<F>(
    initial_value: impl Into<Value>,
    next_value: F,
    options: SequenceOptions,
) -> AttributeDescriptor
where
    F: Fn(&[Value]) -> Result<Value, FactoryError> + 'static,
{
    sequence_item_counted(
        initial_value,
        move |prev: &[Value], _: usize| next_value(prev),
        options,
    )
}

/// Describe a sequence attribute whose next-value function also receives
/// the total history length.
///
/// Pair it with `SequenceOptions::last_values(0)` when only the position
/// matters, so no history is copied per record.
pub fn sequence_item_counted<F>(
    initial_value: impl Into<Value>,
    next_value: F,
    options: SequenceOptions,
) -> AttributeDescriptor
where
    F: Fn(&[Value], usize) -> Result<Value, FactoryError> + 'static,
{
    AttributeDescriptor::SequenceItem(SequenceItem {
        initial_value: initial_value.into(),
        next_value: Rc::new(next_value),
        prev_values: Rc::new(RefCell::new(Vec::new())),
        last_values_count: options.last_values_count,
    })
}

/// Describe a sequence attribute whose initial value is computed now.
///
/// `initial_value` runs immediately, not when the first record is generated.
pub fn sequence_item_with<I, F>(
    initial_value: I,
    next_value: F,
    options: SequenceOptions,
) -> AttributeDescriptor
where
    I: FnOnce() -> Value,
    F: Fn(&[Value]) -> Result<Value, FactoryError> + 'static,
{
    sequence_item(initial_value(), next_value, options)
}
