//! Module wiring for `redom`: connection options, a shared store connection
//! and one repository per registered entity, provided through a
//! token-keyed [`Container`](container::Container).

pub mod connection;
pub mod container;
pub mod module;
pub mod options;
pub mod repository;
pub mod tokens;

use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        ModuleError,
        connection::{Connection, Connector, MemoryConnection, MemoryConnector},
        container::Container,
        module::{CoreModule, DynamicModule, FeatureModel, RedisOmModule},
        options::{AsyncModuleOptions, ConnectionInfo, ModuleOptions, OptionsFactory},
        repository::{Repository, inject_repository},
        tokens::{connection_token, repository_token, repository_token_for},
    };
}

///
/// ModuleError
///

#[derive(Debug, ThisError)]
pub enum ModuleError {
    #[error(transparent)]
    Schema(#[from] redom_schema::Error),

    #[error("invalid injection token: {0}")]
    InvalidToken(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("no provider registered for token '{token}'")]
    MissingProvider { token: String },

    #[error("provider for token '{token}' is not a {expected}")]
    ProviderType { token: String, expected: &'static str },

    #[error(transparent)]
    Config(#[from] toml::de::Error),
}
