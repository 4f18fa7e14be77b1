//! Schema and Prop decorators.
//!
//! A decorator is built from its options and then applied to a class (and
//! property) in a [`MetadataStore`]. Neither decorator validates anything.

use crate::{
    metadata::{MetadataStore, MetadataValue},
    node::{ClassKey, PropOptions, PropertyDescriptor, SchemaOptions},
};

/// Build a Schema decorator.
#[must_use]
pub const fn schema(options: SchemaOptions) -> SchemaDecorator {
    SchemaDecorator { options }
}

/// Build a Prop decorator.
#[must_use]
pub const fn prop(options: PropOptions) -> PropDecorator {
    PropDecorator { options }
}

///
/// SchemaDecorator
///
/// Marks a class as an entity. Applying it again replaces the options.
///

#[derive(Clone, Debug, Default)]
pub struct SchemaDecorator {
    options: SchemaOptions,
}

impl SchemaDecorator {
    pub fn decorate(self, store: &mut MetadataStore, class: ClassKey) {
        store.set_class_metadata(class, MetadataValue::Schema(self.options));
    }
}

///
/// PropDecorator
///
/// Appends one property descriptor to the class's list. Decorating the
/// same property twice appends twice.
///

#[derive(Clone, Debug, Default)]
pub struct PropDecorator {
    options: PropOptions,
}

impl PropDecorator {
    pub fn decorate(
        self,
        store: &mut MetadataStore,
        class: ClassKey,
        property_key: impl Into<String>,
    ) {
        let mut props = store.props(class).map(<[_]>::to_vec).unwrap_or_default();
        props.push(PropertyDescriptor::new(property_key, self.options));

        store.set_class_metadata(class, MetadataValue::Props(props));
    }
}

///
/// ClassBuilder
///
/// Chains decorator applications for one class.
///

pub struct ClassBuilder<'a> {
    store: &'a mut MetadataStore,
    class: ClassKey,
}

impl<'a> ClassBuilder<'a> {
    pub(crate) const fn new(store: &'a mut MetadataStore, class: ClassKey) -> Self {
        Self { store, class }
    }

    pub fn schema(self, options: SchemaOptions) -> Self {
        schema(options).decorate(self.store, self.class);
        self
    }

    pub fn prop(self, property_key: impl Into<String>, options: PropOptions) -> Self {
        prop(options).decorate(self.store, self.class, property_key);
        self
    }
}

///
/// TESTS
///
