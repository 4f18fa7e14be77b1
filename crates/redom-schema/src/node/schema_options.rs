use crate::{prelude::*, types::DataStructure};

///
/// SchemaOptions
///
/// Class-level configuration attached by the Schema decorator.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaOptions {
    /// Underlying data structure in Redis. Defaults to JSON.
    #[serde(default)]
    pub data_structure: DataStructure,

    /// Custom name for the search index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,

    /// Entity name used as key prefix (`Person` -> `Person:<id>`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SchemaOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn data_structure(mut self, data_structure: DataStructure) -> Self {
        self.data_structure = data_structure;
        self
    }

    #[must_use]
    pub fn index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = Some(index_name.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Entity name, falling back to the class name when unset or empty.
    #[must_use]
    pub fn resolved_name<'a>(&'a self, class_name: &'a str) -> &'a str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(class_name)
    }
}
