use crate::{
    ModuleError, connection::Connection, container::Container, tokens::repository_token_for,
};
use redom_schema::{entity::EntityId, node::Model, om::Schema};
use std::{fmt, marker::PhantomData, sync::Arc};

///
/// Repository
///
/// The compiled schema of entity `T` bound to the module's connection.
///

pub struct Repository<T> {
    schema: Schema,
    connection: Arc<dyn Connection>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Model> Repository<T> {
    #[must_use]
    pub fn new(schema: Schema, connection: Arc<dyn Connection>) -> Self {
        Self {
            schema,
            connection,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    #[must_use]
    pub fn connection(&self) -> Arc<dyn Connection> {
        Arc::clone(&self.connection)
    }

    /// Full key of the entity stored under `id`.
    #[must_use]
    pub fn key_for(&self, id: &EntityId) -> String {
        self.schema.key_for(id.as_str())
    }

    pub async fn create_index(&self) -> Result<(), ModuleError> {
        self.connection.create_index(&self.schema).await
    }
}

impl<T> fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("schema", &self.schema.schema_name())
            .finish_non_exhaustive()
    }
}

/// The repository registered for model `T`.
pub fn inject_repository<T: Model>(
    container: &Container,
) -> Result<Arc<Repository<T>>, ModuleError> {
    container.resolve::<Repository<T>>(&repository_token_for::<T>())
}
