use crate::{node::PropOptions, prelude::*, types::FieldType};
use serde::ser::SerializeMap;
use std::slice::Iter;

///
/// FieldDefinition
///
/// The compiled description of one flattened field: its scalar type, its
/// JSON path (nested fields only, unless set explicitly) and every other
/// option of the property that produced it.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldDefinition {
    pub ty: FieldType,
    pub path: Option<String>,
    pub indexed: Option<bool>,
    pub sortable: Option<bool>,
    pub text_search: Option<bool>,
    pub normalized: Option<bool>,
    pub case_sensitive: Option<bool>,
    pub stemming: Option<bool>,
    pub weight: Option<f64>,
    pub matcher: Option<String>,
    pub separator: Option<String>,
    pub field: Option<String>,

    // indexed fields always carry a `sortable` entry, even when unset
    sortable_declared: bool,
}

impl FieldDefinition {
    #[must_use]
    pub fn new(ty: FieldType) -> Self {
        Self {
            ty,
            ..Self::default()
        }
    }

    /// Merge a property's options onto a definition of type `ty`.
    ///
    /// Indexed properties establish the `sortable` entry first; explicit
    /// option values are then copied over and win.
    #[must_use]
    pub fn from_options(ty: FieldType, options: &PropOptions) -> Self {
        let mut def = Self::new(ty);

        if options.is_indexed() {
            def.sortable_declared = true;
            def.sortable = options.sortable;
        }

        def.merge(options);
        def
    }

    fn merge(&mut self, options: &PropOptions) {
        macro_rules! assign {
            ($($name:ident),* $(,)?) => {
                $(
                    if let Some(value) = &options.$name {
                        self.$name = Some(value.clone());
                    }
                )*
            };
        }

        assign!(
            path,
            indexed,
            sortable,
            text_search,
            normalized,
            case_sensitive,
            stemming,
            weight,
            matcher,
            separator,
            field,
        );
    }

    /// Whether the definition has a `sortable` entry (possibly unset).
    #[must_use]
    pub const fn has_sortable_entry(&self) -> bool {
        self.sortable_declared || self.sortable.is_some()
    }

    #[must_use]
    pub fn is_indexed(&self) -> bool {
        self.indexed.unwrap_or(false)
    }
}

impl Serialize for FieldDefinition {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.ty)?;

        if self.has_sortable_entry() {
            map.serialize_entry("sortable", &self.sortable)?;
        }

        macro_rules! entry {
            ($($name:ident => $key:literal),* $(,)?) => {
                $(
                    if let Some(value) = &self.$name {
                        map.serialize_entry($key, value)?;
                    }
                )*
            };
        }

        entry!(
            indexed => "indexed",
            text_search => "textSearch",
            normalized => "normalized",
            case_sensitive => "caseSensitive",
            stemming => "stemming",
            weight => "weight",
            matcher => "matcher",
            separator => "separator",
            field => "field",
            path => "path",
        );

        map.end()
    }
}

///
/// FieldCollision
///
/// Two properties flattened to the same field key; the later one won.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FieldCollision {
    pub key: String,
    pub previous_path: Option<String>,
    pub path: Option<String>,
}

///
/// SchemaDefinition
///
/// Ordered mapping from field key to field definition. Keys are unique;
/// re-inserting a key replaces the definition in place.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SchemaDefinition {
    fields: Vec<(String, FieldDefinition)>,
    collisions: Vec<FieldCollision>,
}

impl SchemaDefinition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, returning the definition it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        def: FieldDefinition,
    ) -> Option<FieldDefinition> {
        let key = key.into();

        if let Some((_, slot)) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            self.collisions.push(FieldCollision {
                key,
                previous_path: slot.path.clone(),
                path: def.path.clone(),
            });

            return Some(std::mem::replace(slot, def));
        }

        self.fields.push((key, def));

        None
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, def)| def)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> Iter<'_, (String, FieldDefinition)> {
        self.fields.iter()
    }

    /// Key collisions seen while building, in the order they happened.
    #[must_use]
    pub fn collisions(&self) -> &[FieldCollision] {
        &self.collisions
    }
}

impl<'a> IntoIterator for &'a SchemaDefinition {
    type Item = &'a (String, FieldDefinition);
    type IntoIter = Iter<'a, (String, FieldDefinition)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl Serialize for SchemaDefinition {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, def) in &self.fields {
            map.serialize_entry(key, def)?;
        }

        map.end()
    }
}

///
/// TESTS
///
