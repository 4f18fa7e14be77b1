//! Per-class metadata written by decorators and read by the compiler.

use crate::{
    decorator::ClassBuilder,
    node::{ClassKey, ClassRef, PropertyDescriptor, SchemaOptions},
    prelude::*,
};
use std::collections::{HashMap, HashSet};

/// Name of the schema-options metadata key.
pub const SCHEMA_METADATA: &str = "redis_om:schema_metadata";

/// Name of the property-list metadata key.
pub const PROP_METADATA: &str = "redis_om:prop_metadata";

///
/// MetadataKey
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum MetadataKey {
    Schema,
    Props,
}

impl MetadataKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Schema => SCHEMA_METADATA,
            Self::Props => PROP_METADATA,
        }
    }
}

///
/// MetadataValue
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum MetadataValue {
    Schema(SchemaOptions),
    Props(Vec<PropertyDescriptor>),
}

impl MetadataValue {
    #[must_use]
    pub const fn key(&self) -> MetadataKey {
        match self {
            Self::Schema(_) => MetadataKey::Schema,
            Self::Props(_) => MetadataKey::Props,
        }
    }
}

///
/// MetadataStore
///
/// Metadata keyed by (class, key). Built fresh for each compilation and
/// passed explicitly; nothing here is process-wide.
///

#[derive(Debug, Default)]
pub struct MetadataStore {
    entries: HashMap<(ClassKey, MetadataKey), MetadataValue>,
    described: HashSet<ClassKey>,
}

impl MetadataStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under its own key for `class`, replacing any previous one.
    pub fn set_class_metadata(&mut self, class: ClassKey, value: MetadataValue) {
        self.entries.insert((class, value.key()), value);
    }

    /// Metadata for `class` under `key`; `None` when never written.
    #[must_use]
    pub fn get_class_metadata(&self, class: ClassKey, key: MetadataKey) -> Option<&MetadataValue> {
        self.entries.get(&(class, key))
    }

    #[must_use]
    pub fn schema_options(&self, class: ClassKey) -> Option<&SchemaOptions> {
        match self.get_class_metadata(class, MetadataKey::Schema) {
            Some(MetadataValue::Schema(options)) => Some(options),
            _ => None,
        }
    }

    #[must_use]
    pub fn props(&self, class: ClassKey) -> Option<&[PropertyDescriptor]> {
        match self.get_class_metadata(class, MetadataKey::Props) {
            Some(MetadataValue::Props(props)) => Some(props.as_slice()),
            _ => None,
        }
    }

    /// Start decorating `class` by hand.
    pub fn class(&mut self, class: ClassKey) -> ClassBuilder<'_> {
        ClassBuilder::new(self, class)
    }

    /// Run the class's `describe` unless it already ran against this store.
    pub fn ensure_described(&mut self, class: &ClassRef) {
        if self.described.insert(class.key()) {
            class.describe_into(self);
        }
    }

    #[must_use]
    pub fn is_described(&self, class: ClassKey) -> bool {
        self.described.contains(&class)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Model, PropOptions};

    struct Plain;

    struct Counted;

    impl Model for Counted {
        const CLASS_NAME: &'static str = "Counted";

        fn describe(store: &mut MetadataStore) {
            let props = store
                .props(ClassKey::of::<Self>())
                .map_or(0, <[_]>::len);
            store
                .class(ClassKey::of::<Self>())
                .prop(format!("p{props}"), PropOptions::new());
        }
    }

    #[test]
    fn undecorated_class_reads_as_absent() {
        let store = MetadataStore::new();
        let class = ClassKey::of::<Plain>();

        assert!(store.get_class_metadata(class, MetadataKey::Schema).is_none());
        assert!(store.schema_options(class).is_none());
        assert!(store.props(class).is_none());
    }

    #[test]
    fn schema_and_props_are_independent_keys() {
        let mut store = MetadataStore::new();
        let class = ClassKey::of::<Plain>();

        store.set_class_metadata(class, MetadataValue::Schema(SchemaOptions::new()));

        assert_eq!(store.schema_options(class), Some(&SchemaOptions::default()));
        assert!(store.props(class).is_none());
    }

    #[test]
    fn describe_runs_once_per_store() {
        let mut store = MetadataStore::new();
        let class = ClassRef::of::<Counted>();

        store.ensure_described(&class);
        store.ensure_described(&class);

        assert!(store.is_described(class.key()));
        assert_eq!(store.props(class.key()).map(<[_]>::len), Some(1));
    }

    #[test]
    fn metadata_key_names() {
        assert_eq!(MetadataKey::Schema.as_str(), "redis_om:schema_metadata");
        assert_eq!(MetadataKey::Props.as_str(), "redis_om:prop_metadata");
    }
}
