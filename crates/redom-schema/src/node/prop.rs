use crate::{
    node::ClassRef,
    prelude::*,
    types::FieldType,
};
use std::fmt;

///
/// PropType
///
/// What a property holds: a scalar kind, a nested model, or a function
/// returning a nested model (for self and forward references).
///

#[derive(Clone, Copy)]
pub enum PropType {
    Scalar(FieldType),
    Nested(ClassRef),
    NestedLazy(fn() -> ClassRef),
}

impl PropType {
    /// The nested class this type refers to, invoking a lazy reference once.
    #[must_use]
    pub fn resolve_class(&self) -> Option<ClassRef> {
        match self {
            Self::Scalar(_) => None,
            Self::Nested(class) => Some(*class),
            Self::NestedLazy(factory) => Some(factory()),
        }
    }

    #[must_use]
    pub const fn scalar(&self) -> Option<FieldType> {
        match self {
            Self::Scalar(ty) => Some(*ty),
            _ => None,
        }
    }
}

impl From<FieldType> for PropType {
    fn from(ty: FieldType) -> Self {
        Self::Scalar(ty)
    }
}

impl fmt::Debug for PropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(ty) => f.debug_tuple("Scalar").field(ty).finish(),
            Self::Nested(class) => f.debug_tuple("Nested").field(class).finish(),
            Self::NestedLazy(_) => f.write_str("NestedLazy(..)"),
        }
    }
}

// lazy references compare by the class they produce
impl PartialEq for PropType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            (Self::Nested(a), Self::Nested(b)) => a == b,
            (Self::NestedLazy(a), Self::NestedLazy(b)) => a() == b(),
            _ => false,
        }
    }
}

impl Serialize for PropType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(ty) => ty.serialize(serializer),
            Self::Nested(class) => class.serialize(serializer),
            Self::NestedLazy(factory) => factory().serialize(serializer),
        }
    }
}

///
/// PropOptions
///
/// Per-property configuration attached by the Prop decorator.
/// Unset options stay `None` so the compiler can tell "absent" from "false".
///

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropOptions {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<PropType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortable: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_search: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stemming: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,

    /// Alias: the field name in Redis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Explicit JSON path; replaces the computed one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl PropOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ty(mut self, ty: impl Into<PropType>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    #[must_use]
    pub fn nested(self, class: ClassRef) -> Self {
        self.ty(PropType::Nested(class))
    }

    #[must_use]
    pub fn nested_lazy(self, factory: fn() -> ClassRef) -> Self {
        self.ty(PropType::NestedLazy(factory))
    }

    #[must_use]
    pub const fn indexed(mut self, indexed: bool) -> Self {
        self.indexed = Some(indexed);
        self
    }

    #[must_use]
    pub const fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = Some(sortable);
        self
    }

    #[must_use]
    pub const fn text_search(mut self, text_search: bool) -> Self {
        self.text_search = Some(text_search);
        self
    }

    #[must_use]
    pub const fn normalized(mut self, normalized: bool) -> Self {
        self.normalized = Some(normalized);
        self
    }

    #[must_use]
    pub const fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }

    #[must_use]
    pub const fn stemming(mut self, stemming: bool) -> Self {
        self.stemming = Some(stemming);
        self
    }

    #[must_use]
    pub const fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    #[must_use]
    pub fn matcher(mut self, matcher: impl Into<String>) -> Self {
        self.matcher = Some(matcher.into());
        self
    }

    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    #[must_use]
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn is_indexed(&self) -> bool {
        self.indexed.unwrap_or(false)
    }
}

///
/// PropertyDescriptor
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub property_key: String,
    pub options: PropOptions,
}

impl PropertyDescriptor {
    pub fn new(property_key: impl Into<String>, options: PropOptions) -> Self {
        Self {
            property_key: property_key.into(),
            options,
        }
    }
}
