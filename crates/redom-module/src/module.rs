//! Root and feature modules.
//!
//! The root module resolves [`ModuleOptions`], opens the connection and
//! provides both. A feature module compiles each of its models, binds the
//! resulting schema to that connection as a [`Repository`] and creates the
//! entity's search index.

use crate::{
    ModuleError,
    connection::{Connection, Connector},
    container::{Container, Provider},
    options::{AsyncModuleOptions, ModuleOptions},
    repository::Repository,
    tokens::{MODULE_OPTIONS_TOKEN, connection_token, repository_token},
};
use redom_schema::{
    factory::SchemaFactory,
    metadata::MetadataStore,
    node::{ClassRef, Model},
    om::Schema,
};
use std::{fmt, sync::Arc};
use tracing::{debug, info};

///
/// RedisOmModule
///

pub struct RedisOmModule;

impl RedisOmModule {
    /// Root module connecting with fixed options.
    pub fn for_root(options: ModuleOptions, connector: impl Connector + 'static) -> DynamicModule {
        DynamicModule::Core(CoreModule {
            options: RootOptions::Static(options),
            connector: Arc::new(connector),
        })
    }

    /// Root module whose options are produced at registration time.
    pub fn for_root_async(
        options: AsyncModuleOptions,
        connector: impl Connector + 'static,
    ) -> DynamicModule {
        DynamicModule::Core(CoreModule {
            options: RootOptions::Async(options),
            connector: Arc::new(connector),
        })
    }

    /// Feature module providing one repository per model.
    pub fn for_feature(models: impl IntoIterator<Item = FeatureModel>) -> DynamicModule {
        DynamicModule::Feature(FeatureModule {
            models: models.into_iter().collect(),
            connection_name: None,
        })
    }
}

///
/// DynamicModule
///

#[derive(Debug)]
pub enum DynamicModule {
    Core(CoreModule),
    Feature(FeatureModule),
}

impl DynamicModule {
    /// Resolve this module's providers into `container`.
    pub async fn register(self, container: &mut Container) -> Result<(), ModuleError> {
        match self {
            Self::Core(core) => core.register(container).await,
            Self::Feature(feature) => feature.register(container).await,
        }
    }

    /// Bind a feature module to the connection called `name`.
    #[must_use]
    pub fn with_connection(self, name: impl Into<String>) -> Self {
        match self {
            Self::Feature(mut feature) => {
                feature.connection_name = Some(name.into());
                Self::Feature(feature)
            }
            core @ Self::Core(_) => core,
        }
    }
}

///
/// CoreModule
///
/// Owns the connection; registered once per connection name.
///

pub struct CoreModule {
    options: RootOptions,
    connector: Arc<dyn Connector>,
}

enum RootOptions {
    Static(ModuleOptions),
    Async(AsyncModuleOptions),
}

impl CoreModule {
    async fn register(self, container: &mut Container) -> Result<(), ModuleError> {
        let options = match self.options {
            RootOptions::Static(options) => options,
            RootOptions::Async(options) => options.resolve().await?,
        };

        let token = connection_token(options.name.as_deref());
        let info = options.connection_info();
        let connection = self.connector.connect(&info).await?;
        info!(token = %token, connection = ?info, "store connection opened");

        container.provide(MODULE_OPTIONS_TOKEN, options);
        container.provide(token, connection);

        Ok(())
    }

    /// The connection registered under `name`.
    pub fn connection(
        container: &Container,
        name: Option<&str>,
    ) -> Result<Arc<dyn Connection>, ModuleError> {
        let shared = container.resolve::<Arc<dyn Connection>>(&connection_token(name))?;

        Ok(Arc::clone(&*shared))
    }

    /// Close the connection registered under `name`.
    pub async fn shutdown(container: &Container, name: Option<&str>) -> Result<(), ModuleError> {
        let token = connection_token(name);
        let connection = Self::connection(container, name)?;

        connection.close().await?;
        info!(token = %token, "store connection closed");

        Ok(())
    }
}

impl fmt::Debug for CoreModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.options {
            RootOptions::Static(_) => "static",
            RootOptions::Async(_) => "async",
        };

        f.debug_struct("CoreModule")
            .field("options", &kind)
            .finish_non_exhaustive()
    }
}

///
/// FeatureModel
///
/// A model registered with a feature module, plus how to build its typed
/// repository.
///

#[derive(Clone, Copy)]
pub struct FeatureModel {
    class: ClassRef,
    repository: fn(Schema, Arc<dyn Connection>) -> Provider,
}

impl FeatureModel {
    #[must_use]
    pub fn of<T: Model>() -> Self {
        Self {
            class: ClassRef::of::<T>(),
            repository: |schema, connection| -> Provider {
                Arc::new(Repository::<T>::new(schema, connection))
            },
        }
    }

    #[must_use]
    pub const fn class(&self) -> ClassRef {
        self.class
    }
}

impl fmt::Debug for FeatureModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FeatureModel").field(&self.class).finish()
    }
}

///
/// FeatureModule
///

#[derive(Debug)]
pub struct FeatureModule {
    models: Vec<FeatureModel>,
    connection_name: Option<String>,
}

impl FeatureModule {
    async fn register(self, container: &mut Container) -> Result<(), ModuleError> {
        let connection = CoreModule::connection(container, self.connection_name.as_deref())?;

        for model in &self.models {
            let class = model.class();
            let token = repository_token(class.name())?;

            let mut store = MetadataStore::new();
            let schema = SchemaFactory::create_for(&mut store, class)?;

            connection.create_index(&schema).await?;
            debug!(
                token = %token,
                index = schema.index_name(),
                "repository registered"
            );

            container.provide_shared(token, (model.repository)(schema, Arc::clone(&connection)));
        }

        Ok(())
    }
}
