//! Lazy record generation.
//!
//! A [`RecordGenerator`] is built once per factory from its compiled
//! metadata. Each call to [`RecordGenerator::generate`] yields a
//! [`LazyRecord`] whose attributes are resolved on first read and memoized
//! for the lifetime of that record instance.

use crate::descriptor::{AttributeDescriptor, Field};
use crate::error::FactoryError;
use crate::factory::Meta;
use mock_core::{IndexMap, Record, Value};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Identity of the first record a factory produces. Sequence attributes
/// return their initial value for it.
pub const FIRST_IDENTITY: u64 = 1;

/// Record constructor built from compiled factory metadata.
#[derive(Debug, Clone)]
pub struct RecordGenerator {
    meta: Rc<Meta>,
}

impl RecordGenerator {
    /// Create a generator over compiled metadata.
    pub fn new(meta: Rc<Meta>) -> Self {
        Self { meta }
    }

    /// Produce a lazily-evaluated record for the given identity.
    pub fn generate(&self, id: u64) -> LazyRecord<'_> {
        LazyRecord {
            id,
            meta: &self.meta,
            cache: RefCell::new(HashMap::new()),
            resolving: RefCell::new(HashSet::new()),
        }
    }

    /// Attribute names in declaration order.
    pub fn attr_names(&self) -> impl Iterator<Item = &str> {
        self.meta.keys().map(String::as_str)
    }
}

/// A record whose attributes are computed on first read.
///
/// The memo cache is private to this instance: generating the same identity
/// twice yields two independent records, and sequence attributes advance
/// their shared history once for each.
pub struct LazyRecord<'g> {
    id: u64,
    meta: &'g Meta,
    cache: RefCell<HashMap<String, Value>>,
    resolving: RefCell<HashSet<String>>,
}

impl LazyRecord<'_> {
    /// Numeric identity of this record.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Read an attribute, computing and memoizing it on first access.
    pub fn get(&self, name: &str) -> Result<Value, FactoryError> {
        let descriptor = self
            .meta
            .get(name)
            .ok_or_else(|| FactoryError::UnknownAttribute(name.to_string()))?;

        match descriptor {
            AttributeDescriptor::HasOne(_) => Ok(Value::Null),
            AttributeDescriptor::HasMany(_) => Ok(Value::empty_array()),
            AttributeDescriptor::Field(Field::Constant(value)) => Ok(value.clone()),
            AttributeDescriptor::Field(Field::Computed(compute)) => {
                self.memoized(name, || compute(self))
            }
            AttributeDescriptor::SequenceItem(seq) => self.memoized(name, || {
                let value = if self.id == FIRST_IDENTITY {
                    seq.initial_value().clone()
                } else {
                    seq.compute_next()?
                };
                seq.record(value.clone());
                Ok(value)
            }),
        }
    }

    /// Whether a memoized attribute has already been computed.
    pub fn is_resolved(&self, name: &str) -> bool {
        self.cache.borrow().contains_key(name)
    }

    /// Resolve every declared attribute, in declaration order, into a record.
    pub fn to_record(&self) -> Result<Record, FactoryError> {
        let mut fields = IndexMap::with_capacity(self.meta.len());
        for name in self.meta.keys() {
            fields.insert(name.clone(), self.get(name)?);
        }
        Ok(Record::new(self.id.to_string(), fields))
    }

    fn memoized<F>(&self, name: &str, compute: F) -> Result<Value, FactoryError>
    where
        F: FnOnce() -> Result<Value, FactoryError>,
    {
        if let Some(value) = self.cache.borrow().get(name) {
            return Ok(value.clone());
        }

        if !self.resolving.borrow_mut().insert(name.to_string()) {
            return Err(FactoryError::CyclicAttribute(name.to_string()));
        }
        let result = compute();
        self.resolving.borrow_mut().remove(name);

        let value = result?;
        self.cache
            .borrow_mut()
            .insert(name.to_string(), value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{
        has_many, has_one, sequence_item, sequence_item_counted, RelationshipOptions,
        SequenceOptions,
    };
    use std::cell::Cell;

    fn meta_of(attrs: Vec<(&str, AttributeDescriptor)>) -> Rc<Meta> {
        Rc::new(
            attrs
                .into_iter()
                .map(|(name, descriptor)| (name.to_string(), descriptor))
                .collect(),
        )
    }

    #[test]
    fn test_relationship_placeholders() {
        let generator = RecordGenerator::new(meta_of(vec![
            ("author", has_one("user", "posts", RelationshipOptions::default())),
            ("comments", has_many("comment", "post", RelationshipOptions::default())),
        ]));

        for id in [1, 2, 10] {
            let record = generator.generate(id);
            assert_eq!(record.get("author").unwrap(), Value::Null);
            assert_eq!(record.get("comments").unwrap(), Value::empty_array());
        }
    }

    #[test]
    fn test_computed_field_invoked_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let generator = RecordGenerator::new(meta_of(vec![(
            "token",
            AttributeDescriptor::Field(Field::Computed(Rc::new(move |_: &LazyRecord<'_>| {
                counter.set(counter.get() + 1);
                Ok(Value::from(counter.get() as i64 * 100))
            }))),
        )]));

        let record = generator.generate(4);
        assert!(!record.is_resolved("token"));
        let first = record.get("token").unwrap();
        let second = record.get("token").unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
        assert!(record.is_resolved("token"));
    }

    #[test]
    fn test_cache_is_per_record() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let generator = RecordGenerator::new(meta_of(vec![(
            "n",
            AttributeDescriptor::Field(Field::Computed(Rc::new(move |_: &LazyRecord<'_>| {
                counter.set(counter.get() + 1);
                Ok(Value::from(counter.get() as i64))
            }))),
        )]));

        let a = generator.generate(2);
        let b = generator.generate(2);
        assert_eq!(a.get("n").unwrap(), Value::Int64(1));
        assert_eq!(b.get("n").unwrap(), Value::Int64(2));
        assert_eq!(a.get("n").unwrap(), Value::Int64(1));
    }

    #[test]
    fn test_computed_reads_other_attributes() {
        let generator = RecordGenerator::new(meta_of(vec![
            ("first", AttributeDescriptor::Field(Field::Constant(Value::from("Ada")))),
            (
                "greeting",
                AttributeDescriptor::Field(Field::Computed(Rc::new(|record: &LazyRecord<'_>| {
                    let first = record.get("first")?;
                    Ok(Value::from(format!(
                        "hello {} #{}",
                        first.as_str().unwrap_or_default(),
                        record.id()
                    )))
                }))),
            ),
        ]));

        let record = generator.generate(7);
        assert_eq!(record.get("greeting").unwrap(), Value::from("hello Ada #7"));
    }

    #[test]
    fn test_cyclic_attribute() {
        let generator = RecordGenerator::new(meta_of(vec![
            (
                "a",
                AttributeDescriptor::Field(Field::Computed(Rc::new(|record: &LazyRecord<'_>| record.get("b")))),
            ),
            (
                "b",
                AttributeDescriptor::Field(Field::Computed(Rc::new(|record: &LazyRecord<'_>| record.get("a")))),
            ),
        ]));

        let record = generator.generate(1);
        assert!(matches!(
            record.get("a"),
            Err(FactoryError::CyclicAttribute(name)) if name == "a"
        ));
        // A failed resolution is not cached
        assert!(!record.is_resolved("a"));
    }

    #[test]
    fn test_unknown_attribute() {
        let generator = RecordGenerator::new(meta_of(vec![]));
        let record = generator.generate(1);
        assert!(matches!(
            record.get("missing"),
            Err(FactoryError::UnknownAttribute(_))
        ));
    }

    #[test]
    fn test_sequence_first_identity_uses_initial_value() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let descriptor = sequence_item(
            "admin",
            move |prev: &[Value]| {
                counter.set(counter.get() + 1);
                Ok(Value::from(format!("user-{}", prev.len() + 1)))
            },
            SequenceOptions::default(),
        );
        let generator = RecordGenerator::new(meta_of(vec![("login", descriptor.clone())]));

        assert_eq!(generator.generate(1).get("login").unwrap(), Value::from("admin"));
        assert_eq!(calls.get(), 0);
        assert_eq!(generator.generate(2).get("login").unwrap(), Value::from("user-2"));
        assert_eq!(generator.generate(3).get("login").unwrap(), Value::from("user-3"));
        assert_eq!(calls.get(), 2);
        assert_eq!(
            descriptor.sequence().unwrap().prev_values(),
            vec![
                Value::from("admin"),
                Value::from("user-2"),
                Value::from("user-3")
            ]
        );
    }

    #[test]
    fn test_sequence_memoized_within_record() {
        let descriptor = sequence_item(
            0i64,
            |prev: &[Value]| Ok(Value::from(prev.len())),
            SequenceOptions::default(),
        );
        let generator = RecordGenerator::new(meta_of(vec![("n", descriptor.clone())]));

        let record = generator.generate(2);
        record.get("n").unwrap();
        record.get("n").unwrap();
        assert_eq!(descriptor.sequence().unwrap().history_len(), 1);
    }

    #[test]
    fn test_sequence_failure_leaves_history_untouched() {
        let descriptor = sequence_item(
            0i64,
            |_: &[Value]| Err(FactoryError::Callback(anyhow::anyhow!("exhausted"))),
            SequenceOptions::default(),
        );
        let generator = RecordGenerator::new(meta_of(vec![("n", descriptor.clone())]));

        let err = generator.generate(2).get("n").unwrap_err();
        assert_eq!(err.to_string(), "exhausted");
        assert_eq!(descriptor.sequence().unwrap().history_len(), 0);
    }

    #[test]
    fn test_next_value_receives_window() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let descriptor = sequence_item(
            1i64,
            move |prev: &[Value]| {
                log.borrow_mut().push(prev.to_vec());
                let last = prev.last().and_then(Value::as_i64).unwrap_or(0);
                Ok(Value::from(last + 1))
            },
            SequenceOptions::last_values(1),
        );
        let generator = RecordGenerator::new(meta_of(vec![("n", descriptor)]));

        let values: Vec<Value> = (1..=4)
            .map(|id| generator.generate(id).get("n").unwrap())
            .collect();

        assert_eq!(values, vec![1i64, 2, 3, 4].into_iter().map(Value::from).collect::<Vec<_>>());
        assert_eq!(
            *seen.borrow(),
            vec![
                vec![Value::from(1i64)],
                vec![Value::from(2i64)],
                vec![Value::from(3i64)]
            ]
        );
    }

    #[test]
    fn test_counted_sequence_receives_empty_window() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let descriptor = sequence_item_counted(
            "admin",
            move |prev: &[Value], len: usize| {
                log.borrow_mut().push((prev.len(), len));
                Ok(Value::from(format!("user-{}", len + 1)))
            },
            SequenceOptions::last_values(0),
        );
        let generator = RecordGenerator::new(meta_of(vec![("login", descriptor.clone())]));

        let values: Vec<Value> = (1..=4)
            .map(|id| generator.generate(id).get("login").unwrap())
            .collect();

        assert_eq!(
            values,
            vec![
                Value::from("admin"),
                Value::from("user-2"),
                Value::from("user-3"),
                Value::from("user-4")
            ]
        );
        // Window stays empty while the history keeps growing
        assert_eq!(*seen.borrow(), vec![(0, 1), (0, 2), (0, 3)]);
        assert_eq!(descriptor.sequence().unwrap().history_len(), 4);
    }

    #[test]
    fn test_to_record_declaration_order() {
        let generator = RecordGenerator::new(meta_of(vec![
            ("zeta", AttributeDescriptor::Field(Field::Constant(Value::from(1i64)))),
            ("alpha", has_many("post", "author", RelationshipOptions::default())),
            ("mid", AttributeDescriptor::Field(Field::Constant(Value::from("m")))),
        ]));

        let record = generator.generate(9).to_record().unwrap();
        assert_eq!(record.id, "9");
        assert_eq!(record.field_names(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(generator.attr_names().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }
}
