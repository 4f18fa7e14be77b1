//! Schema compilation: flattens a model's property metadata, recursing into
//! nested models, into one [`SchemaDefinition`] and builds the [`Schema`].


use crate::{
    Error,
    metadata::MetadataStore,
    node::{
        ClassKey, ClassRef, FieldDefinition, Model, PropType, PropertyDescriptor,
        SchemaDefinition, SchemaOptions,
    },
    om::Schema,
    prelude::*,
};
use tracing::{debug, warn};

/// JSON path of the document root.
pub const ROOT_PATH: &str = "$";

///
/// FactoryError
///

#[derive(Debug, ThisError)]
pub enum FactoryError {
    #[error("class {class} is not decorated with the Schema decorator")]
    MissingSchema { class: String },

    #[error("field key '{key}' is defined more than once in the schema of class {class}")]
    FieldKeyCollision { class: String, key: String },

    #[error("class {class} is nested inside itself at '{path}'")]
    RecursiveModel { class: String, path: String },
}

///
/// CollisionPolicy
///
/// What to do when two properties flatten to the same field key.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CollisionPolicy {
    /// Keep the later definition in the earlier one's position.
    #[default]
    Overwrite,

    /// Fail the compilation.
    Reject,
}

///
/// CompileOptions
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CompileOptions {
    pub on_collision: CollisionPolicy,
}

impl CompileOptions {
    #[must_use]
    pub const fn reject_collisions() -> Self {
        Self {
            on_collision: CollisionPolicy::Reject,
        }
    }
}

///
/// CompiledSchema
///
/// The flattened definition plus the class-level options it was built with.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompiledSchema {
    pub class_name: &'static str,
    pub options: SchemaOptions,
    pub definition: SchemaDefinition,
}

impl CompiledSchema {
    /// Entity name: the schema's `name` option or the class name.
    #[must_use]
    pub fn entity_name(&self) -> &str {
        self.options.resolved_name(self.class_name)
    }

    /// Snapshot of the definition as a JSON object, keys in field order.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(&self.definition)
    }

    pub fn into_schema(self) -> Result<Schema, Error> {
        let name = self.entity_name().to_string();

        Ok(Schema::new(name, self.definition, self.options)?)
    }
}

///
/// SchemaFactory
///

pub struct SchemaFactory;

impl SchemaFactory {
    /// Compile `T` against a fresh metadata store and build its schema.
    pub fn create_for_class<T: Model>() -> Result<Schema, Error> {
        let mut store = MetadataStore::new();

        Self::create_for(&mut store, ClassRef::of::<T>())
    }

    /// Compile `class` against `store` and build its schema.
    pub fn create_for(store: &mut MetadataStore, class: ClassRef) -> Result<Schema, Error> {
        Self::compile(store, class)?.into_schema()
    }

    pub fn create_for_with(
        store: &mut MetadataStore,
        class: ClassRef,
        options: CompileOptions,
    ) -> Result<Schema, Error> {
        Self::compile_with(store, class, options)?.into_schema()
    }

    /// Flatten `class` into a definition without building the schema object.
    pub fn compile(store: &mut MetadataStore, class: ClassRef) -> Result<CompiledSchema, Error> {
        Self::compile_with(store, class, CompileOptions::default())
    }

    pub fn compile_with(
        store: &mut MetadataStore,
        class: ClassRef,
        options: CompileOptions,
    ) -> Result<CompiledSchema, Error> {
        store.ensure_described(&class);

        let Some(schema_options) = store.schema_options(class.key()).cloned() else {
            return Err(FactoryError::MissingSchema {
                class: class.name().to_string(),
            }
            .into());
        };

        let mut builder = DefinitionBuilder {
            store,
            options,
            root: class.key(),
            chain: vec![class.key()],
            definition: SchemaDefinition::new(),
        };
        builder.build_schema_properties(class.key(), ROOT_PATH, "")?;

        let definition = builder.definition;
        debug!(
            class = class.name(),
            fields = definition.len(),
            collisions = definition.collisions().len(),
            "compiled schema definition"
        );

        Ok(CompiledSchema {
            class_name: class.name(),
            options: schema_options,
            definition,
        })
    }
}

// Joins a field key onto a prefix with `_`.
fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}_{key}")
    }
}

///
/// DefinitionBuilder
///
/// State for one compilation. `chain` holds the classes currently being
/// expanded, root first.
///

struct DefinitionBuilder<'a> {
    store: &'a mut MetadataStore,
    options: CompileOptions,
    root: ClassKey,
    chain: Vec<ClassKey>,
    definition: SchemaDefinition,
}

impl DefinitionBuilder<'_> {
    fn build_schema_properties(
        &mut self,
        class: ClassKey,
        path_prefix: &str,
        key_prefix: &str,
    ) -> Result<(), FactoryError> {
        // nested describes write to the store while we walk
        let props = self
            .store
            .props(class)
            .map(<[_]>::to_vec)
            .unwrap_or_default();

        for prop in &props {
            self.process_property(prop, path_prefix, key_prefix)?;
        }

        Ok(())
    }

    fn process_property(
        &mut self,
        prop: &PropertyDescriptor,
        path_prefix: &str,
        key_prefix: &str,
    ) -> Result<(), FactoryError> {
        match prop.options.ty.as_ref().and_then(PropType::resolve_class) {
            Some(nested) => {
                self.process_nested_class(nested, &prop.property_key, path_prefix, key_prefix)
            }
            None => self.process_standard_field(prop, path_prefix, key_prefix),
        }
    }

    fn process_nested_class(
        &mut self,
        nested: ClassRef,
        property_key: &str,
        path_prefix: &str,
        key_prefix: &str,
    ) -> Result<(), FactoryError> {
        let nested_path = format!("{path_prefix}.{property_key}");
        let nested_key = join_key(key_prefix, property_key);

        if self.chain.contains(&nested.key()) {
            return Err(FactoryError::RecursiveModel {
                class: nested.name().to_string(),
                path: nested_path,
            });
        }

        self.store.ensure_described(&nested);

        self.chain.push(nested.key());
        self.build_schema_properties(nested.key(), &nested_path, &nested_key)?;
        self.chain.pop();

        Ok(())
    }

    fn process_standard_field(
        &mut self,
        prop: &PropertyDescriptor,
        path_prefix: &str,
        key_prefix: &str,
    ) -> Result<(), FactoryError> {
        let options = &prop.options;
        let ty = options
            .ty
            .as_ref()
            .and_then(PropType::scalar)
            .unwrap_or_default();

        let mut def = FieldDefinition::from_options(ty, options);
        // an empty explicit path counts as unset
        if def.path.as_deref().is_none_or(str::is_empty) && path_prefix != ROOT_PATH {
            def.path = Some(format!("{path_prefix}.{}", prop.property_key));
        }

        let field_key = join_key(key_prefix, &prop.property_key);
        self.insert(field_key, def)
    }

    fn insert(&mut self, field_key: String, def: FieldDefinition) -> Result<(), FactoryError> {
        if self.definition.contains_key(&field_key) {
            if self.options.on_collision == CollisionPolicy::Reject {
                return Err(FactoryError::FieldKeyCollision {
                    class: self.root.name().to_string(),
                    key: field_key,
                });
            }

            warn!(
                class = self.root.name(),
                key = %field_key,
                "field key defined more than once; keeping the later definition"
            );
        }

        self.definition.insert(field_key, def);

        Ok(())
    }
}
