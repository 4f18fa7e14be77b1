use crate::{metadata::MetadataStore, prelude::*};
use std::{
    any::TypeId,
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

///
/// Model
///
/// A type that can describe its schema and property metadata into a
/// [`MetadataStore`]. Usually implemented by `#[derive(Model)]`.
///

pub trait Model: 'static {
    /// Name used for the entity when the schema does not set one.
    const CLASS_NAME: &'static str;

    /// Apply this type's Schema and Prop decorators to `store`.
    fn describe(store: &mut MetadataStore);
}

///
/// ClassKey
///
/// Identity of a model type for metadata lookup. Equality and hashing
/// only consider the `TypeId`; the name is carried for messages.
///

#[derive(Clone, Copy, Debug)]
pub struct ClassKey {
    id: TypeId,
    name: &'static str,
}

impl ClassKey {
    /// Key for any `'static` type, named after its last path segment.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self::named::<T>(short_type_name(std::any::type_name::<T>()))
    }

    /// Key for a `'static` type with an explicit display name.
    #[must_use]
    pub fn named<T: 'static>(name: &'static str) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ClassKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ClassKey {}

impl Hash for ClassKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for ClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

///
/// ClassRef
///
/// A reference to a model class: its key plus the function that
/// describes it. Used as a nested property type and as the compile target.
///

#[derive(Clone, Copy)]
pub struct ClassRef {
    key: ClassKey,
    describe: fn(&mut MetadataStore),
}

impl ClassRef {
    #[must_use]
    pub fn of<T: Model>() -> Self {
        Self {
            key: ClassKey::named::<T>(T::CLASS_NAME),
            describe: T::describe,
        }
    }

    /// Reference a class whose metadata is written to the store by hand.
    #[must_use]
    pub fn from_key(key: ClassKey) -> Self {
        Self {
            key,
            describe: |_| {},
        }
    }

    #[must_use]
    pub const fn key(&self) -> ClassKey {
        self.key
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.key.name
    }

    pub(crate) fn describe_into(&self, store: &mut MetadataStore) {
        (self.describe)(store);
    }
}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClassRef").field(&self.key.name).finish()
    }
}

impl PartialEq for ClassRef {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Serialize for ClassRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key.name)
    }
}

// strip module path and generic arguments: `a::b::Foo<T>` -> `Foo`
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);

    base.rsplit("::").next().unwrap_or(base)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    struct Address;
    struct Other;

    mod nested {
        pub struct Wrapper<T>(pub T);
    }

    #[test]
    fn class_key_uses_type_identity() {
        assert_eq!(ClassKey::of::<Address>(), ClassKey::of::<Address>());
        assert_ne!(ClassKey::of::<Address>(), ClassKey::of::<Other>());

        // display name does not take part in equality
        assert_eq!(
            ClassKey::named::<Address>("Renamed"),
            ClassKey::of::<Address>()
        );
    }

    #[test]
    fn class_key_name_is_short() {
        assert_eq!(ClassKey::of::<Address>().name(), "Address");
        assert_eq!(
            ClassKey::of::<nested::Wrapper<Address>>().name(),
            "Wrapper"
        );
    }
}
