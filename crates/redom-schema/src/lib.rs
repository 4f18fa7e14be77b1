//! Schema metadata and compilation for `redom` entities.
//!
//! Models describe themselves into a [`metadata::MetadataStore`] through the
//! Schema and Prop decorators; [`factory::SchemaFactory`] flattens that
//! metadata (recursing into nested models) into a
//! [`node::SchemaDefinition`] and builds the [`om::Schema`].

pub mod decorator;
pub mod entity;
pub mod factory;
pub mod metadata;
pub mod node;
pub mod om;
pub mod types;

use crate::{factory::FactoryError, om::SchemaError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        decorator::{prop, schema},
        entity::{BaseEntity, EntityId, get_id},
        factory::{CollisionPolicy, CompileOptions, SchemaFactory},
        metadata::MetadataStore,
        node::*,
        om::Schema,
        types::{DataStructure, FieldType},
    };
    pub use serde::{Deserialize, Serialize};
    pub(crate) use thiserror::Error as ThisError;
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    FactoryError(#[from] FactoryError),

    #[error(transparent)]
    SchemaError(#[from] SchemaError),
}
