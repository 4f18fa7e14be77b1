use crate::{
    node::FieldDefinition,
    prelude::*,
    types::{DataStructure, FieldType},
};

/// Tag separator used when a field does not set one.
pub const DEFAULT_SEPARATOR: &str = "|";

///
/// Field
///
/// One field of a [`Schema`](super::Schema), resolved to where it lives in
/// a JSON document and in a hash.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    name: String,
    field_type: FieldType,
    json_path: String,
    hash_field: String,

    #[serde(skip)]
    definition: FieldDefinition,
}

impl Field {
    #[must_use]
    pub fn new(name: &str, definition: &FieldDefinition) -> Self {
        let json_path = match definition.path.as_deref().filter(|path| !path.is_empty()) {
            Some(path) => path.to_string(),
            None if definition.ty.is_array() => format!("$.{name}[*]"),
            None => format!("$.{name}"),
        };
        let hash_field = definition
            .field
            .clone()
            .unwrap_or_else(|| name.to_string());

        Self {
            name: name.to_string(),
            field_type: definition.ty,
            json_path,
            hash_field,
            definition: definition.clone(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.field_type
    }

    #[must_use]
    pub fn json_path(&self) -> &str {
        &self.json_path
    }

    #[must_use]
    pub fn hash_field(&self) -> &str {
        &self.hash_field
    }

    #[must_use]
    pub fn explicit_path(&self) -> Option<&str> {
        self.definition
            .path
            .as_deref()
            .filter(|path| !path.is_empty())
    }

    #[must_use]
    pub const fn definition(&self) -> &FieldDefinition {
        &self.definition
    }

    #[must_use]
    pub fn is_sortable(&self) -> bool {
        self.definition.sortable.unwrap_or(false)
    }

    // string fields flagged for full-text search index as TEXT
    const fn is_text(&self) -> bool {
        matches!(self.field_type, FieldType::Text)
            || (matches!(self.field_type, FieldType::String)
                && matches!(self.definition.text_search, Some(true)))
    }

    fn push_text_arguments(&self, args: &mut Vec<String>) {
        let def = &self.definition;

        args.push("TEXT".to_string());
        if def.stemming == Some(false) {
            args.push("NOSTEM".to_string());
        }
        if let Some(weight) = def.weight {
            args.extend(["WEIGHT".to_string(), weight.to_string()]);
        }
        if let Some(matcher) = &def.matcher {
            args.extend(["PHONETIC".to_string(), matcher.clone()]);
        }
    }

    /// This field's part of the `FT.CREATE ... SCHEMA` arguments.
    #[must_use]
    pub fn index_arguments(&self, data_structure: DataStructure) -> Vec<String> {
        let def = &self.definition;
        let location = match data_structure {
            DataStructure::Json => &self.json_path,
            DataStructure::Hash => &self.hash_field,
        };

        let mut args = vec![location.clone(), "AS".to_string(), self.name.clone()];

        match self.field_type {
            _ if self.is_text() => self.push_text_arguments(&mut args),
            FieldType::String | FieldType::StringArray => {
                let separator = def.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR);
                args.extend(["TAG".to_string(), "SEPARATOR".to_string(), separator.to_string()]);
                if def.case_sensitive == Some(true) {
                    args.push("CASESENSITIVE".to_string());
                }
            }
            FieldType::Boolean => args.push("TAG".to_string()),
            FieldType::Number | FieldType::NumberArray | FieldType::Date => {
                args.push("NUMERIC".to_string());
            }
            FieldType::Point => args.push("GEO".to_string()),
            FieldType::Text => self.push_text_arguments(&mut args),
        }

        if self.is_sortable() {
            args.push("SORTABLE".to_string());
            if def.normalized == Some(false) {
                args.push("UNF".to_string());
            }
        }

        if def.indexed == Some(false) {
            args.push("NOINDEX".to_string());
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
    use crate::node::PropOptions;

    #[test]
    fn array_fields_get_wildcard_path() {
        let def = FieldDefinition::new(FieldType::StringArray);
        let field = Field::new("interests", &def);

        assert_eq!(field.json_path(), "$.interests[*]");
        assert_eq!(field.hash_field(), "interests");
    }

    #[test]
    fn explicit_path_is_used_verbatim() {
        let options = PropOptions::new().path("$.deviceInfo.model").indexed(true);
        let def = FieldDefinition::from_options(FieldType::String, &options);
        let field = Field::new("deviceModel", &def);

        assert_eq!(field.json_path(), "$.deviceInfo.model");
        assert_eq!(field.explicit_path(), Some("$.deviceInfo.model"));
    }

    #[test]
    fn empty_explicit_path_is_ignored() {
        let def = FieldDefinition::from_options(FieldType::String, &PropOptions::new().path(""));
        let field = Field::new("name", &def);

        assert_eq!(field.json_path(), "$.name");
        assert_eq!(field.explicit_path(), None);
    }

    #[test]
    fn text_search_string_renders_as_text() {
        let options = PropOptions::new().text_search(true).matcher("dm:en");
        let def = FieldDefinition::from_options(FieldType::String, &options);
        let field = Field::new("name", &def);

        assert_eq!(
            field.index_arguments(DataStructure::Json),
            ["$.name", "AS", "name", "TEXT", "PHONETIC", "dm:en"]
        );
    }

    #[test]
    fn point_and_date_fields() {
        let point = Field::new("location", &FieldDefinition::new(FieldType::Point));
        let options = PropOptions::new().sortable(true).normalized(false);
        let date = Field::new(
            "lastActive",
            &FieldDefinition::from_options(FieldType::Date, &options),
        );

        assert_eq!(
            point.index_arguments(DataStructure::Json),
            ["$.location", "AS", "location", "GEO"]
        );
        assert_eq!(
            date.index_arguments(DataStructure::Hash),
            ["lastActive", "AS", "lastActive", "NUMERIC", "SORTABLE", "UNF"]
        );
    }
}
