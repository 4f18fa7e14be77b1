//! The object-mapping schema object built from a compiled definition.
//!
//! `Schema` resolves each field definition into its storage location (JSON
//! path or hash field) and renders the arguments of the search index that
//! backs the entity.

mod field;

pub use field::Field;

use crate::{
    node::{SchemaDefinition, SchemaOptions},
    prelude::*,
    types::DataStructure,
};

///
/// SchemaError
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error(
        "the field '{field}' is configured with a type of '{ty}'; \
         this type is only valid with a data structure of 'JSON'"
    )]
    JsonOnlyType { field: String, ty: String },

    #[error("the field '{field}' has path '{path}', which is not a JSON path starting with '$'")]
    InvalidPath { field: String, path: String },

    #[error("schema name must not be empty")]
    EmptyName,
}

///
/// Schema
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    schema_name: String,
    data_structure: DataStructure,
    index_name: String,
    fields: Vec<Field>,
    options: SchemaOptions,
    definition: SchemaDefinition,
}

impl Schema {
    pub fn new(
        schema_name: impl Into<String>,
        definition: SchemaDefinition,
        options: SchemaOptions,
    ) -> Result<Self, SchemaError> {
        let schema_name = schema_name.into();
        if schema_name.is_empty() {
            return Err(SchemaError::EmptyName);
        }

        let data_structure = options.data_structure;
        let index_name = options
            .index_name
            .clone()
            .unwrap_or_else(|| format!("{schema_name}:index"));

        let fields = definition
            .iter()
            .map(|(name, def)| Field::new(name, def))
            .collect::<Vec<_>>();

        for field in &fields {
            Self::validate_field(field, data_structure)?;
        }

        Ok(Self {
            schema_name,
            data_structure,
            index_name,
            fields,
            options,
            definition,
        })
    }

    fn validate_field(field: &Field, data_structure: DataStructure) -> Result<(), SchemaError> {
        if data_structure == DataStructure::Hash && field.field_type().is_json_only() {
            return Err(SchemaError::JsonOnlyType {
                field: field.name().to_string(),
                ty: field.field_type().to_string(),
            });
        }

        if let Some(path) = field.explicit_path()
            && !path.starts_with('$')
        {
            return Err(SchemaError::InvalidPath {
                field: field.name().to_string(),
                path: path.to_string(),
            });
        }

        Ok(())
    }

    #[must_use]
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    #[must_use]
    pub const fn data_structure(&self) -> DataStructure {
        self.data_structure
    }

    #[must_use]
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Prefix of every entity key (`Person:`).
    #[must_use]
    pub fn key_prefix(&self) -> String {
        format!("{}:", self.schema_name)
    }

    /// Full Redis key of the entity with id `id`.
    #[must_use]
    pub fn key_for(&self, id: &str) -> String {
        format!("{}:{id}", self.schema_name)
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    #[must_use]
    pub const fn options(&self) -> &SchemaOptions {
        &self.options
    }

    /// The flattened definition this schema was built from.
    #[must_use]
    pub const fn definition(&self) -> &SchemaDefinition {
        &self.definition
    }

    /// Arguments of `FT.CREATE` for this schema's index.
    #[must_use]
    pub fn index_arguments(&self) -> Vec<String> {
        let mut args = vec![
            self.index_name.clone(),
            "ON".to_string(),
            self.data_structure.to_string(),
            "PREFIX".to_string(),
            "1".to_string(),
            self.key_prefix(),
            "SCHEMA".to_string(),
        ];

        for field in &self.fields {
            args.extend(field.index_arguments(self.data_structure));
        }

        args
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        node::{FieldDefinition, PropOptions},
        types::FieldType,
    };

    fn definition(fields: &[(&str, FieldType, PropOptions)]) -> SchemaDefinition {
        let mut defs = SchemaDefinition::new();
        for (key, ty, options) in fields {
            defs.insert(*key, FieldDefinition::from_options(*ty, options));
        }

        defs
    }

    #[test]
    fn defaults_follow_schema_name() {
        let schema = Schema::new("Person", SchemaDefinition::new(), SchemaOptions::new()).unwrap();

        assert_eq!(schema.index_name(), "Person:index");
        assert_eq!(schema.data_structure(), DataStructure::Json);
        assert_eq!(schema.key_for("01H"), "Person:01H");
        assert!(schema.fields().is_empty());
    }

    #[test]
    fn explicit_index_name_is_kept() {
        let options = SchemaOptions::new().index_name("people-idx");
        let schema = Schema::new("Person", SchemaDefinition::new(), options).unwrap();

        assert_eq!(schema.index_name(), "people-idx");
    }

    #[test]
    fn number_array_is_json_only() {
        let defs = definition(&[("scores", FieldType::NumberArray, PropOptions::new())]);
        let options = SchemaOptions::new().data_structure(DataStructure::Hash);

        let err = Schema::new("Player", defs, options).unwrap_err();
        assert!(matches!(err, SchemaError::JsonOnlyType { ref field, .. } if field == "scores"));
    }

    #[test]
    fn explicit_path_must_be_json_path() {
        let defs = definition(&[(
            "model",
            FieldType::String,
            PropOptions::new().path("deviceInfo.model"),
        )]);

        let err = Schema::new("Session", defs, SchemaOptions::new()).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPath { .. }));
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Schema::new("", SchemaDefinition::new(), SchemaOptions::new()).unwrap_err();

        assert!(matches!(err, SchemaError::EmptyName));
    }

    #[test]
    fn index_arguments_render_json_schema() {
        let defs = definition(&[
            ("name", FieldType::String, PropOptions::new().indexed(true)),
            (
                "score",
                FieldType::Number,
                PropOptions::new().indexed(true).sortable(true),
            ),
            ("tags", FieldType::StringArray, PropOptions::new().separator(",")),
            ("bio", FieldType::Text, PropOptions::new().weight(2.0).stemming(false)),
        ]);
        let schema = Schema::new("Customer", defs, SchemaOptions::new()).unwrap();

        assert_eq!(
            schema.index_arguments(),
            [
                "Customer:index", "ON", "JSON", "PREFIX", "1", "Customer:", "SCHEMA",
                "$.name", "AS", "name", "TAG", "SEPARATOR", "|",
                "$.score", "AS", "score", "NUMERIC", "SORTABLE",
                "$.tags[*]", "AS", "tags", "TAG", "SEPARATOR", ",",
                "$.bio", "AS", "bio", "TEXT", "NOSTEM", "WEIGHT", "2",
            ]
        );
    }

    #[test]
    fn index_arguments_render_hash_schema_with_alias() {
        let defs = definition(&[
            ("email", FieldType::String, PropOptions::new().field("mail").case_sensitive(true)),
            ("active", FieldType::Boolean, PropOptions::new().indexed(false)),
        ]);
        let options = SchemaOptions::new().data_structure(DataStructure::Hash);
        let schema = Schema::new("User", defs, options).unwrap();

        assert_eq!(
            schema.index_arguments(),
            [
                "User:index", "ON", "HASH", "PREFIX", "1", "User:", "SCHEMA",
                "mail", "AS", "email", "TAG", "SEPARATOR", "|", "CASESENSITIVE",
                "active", "AS", "active", "TAG", "NOINDEX",
            ]
        );
    }
}
