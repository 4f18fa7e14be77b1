//! ## Crate layout
//! - `schema`: metadata store, Schema/Prop decorators, schema compiler and
//!   the object-mapping schema object.
//! - `module`: connection options, container, repositories and the
//!   root/feature modules.
//! - `Model`: the derive that writes a model's decorators for it.
//!
//! ```ignore
//! use redom::prelude::*;
//!
//! #[derive(Model)]
//! #[schema]
//! struct Cat {
//!     #[prop(indexed)]
//!     name: String,
//! }
//!
//! let schema = SchemaFactory::create_for_class::<Cat>()?;
//! ```

pub use redom_derive::Model;
pub use redom_module as module;
pub use redom_schema as schema;

// lets the derive's `::redom` paths resolve inside this crate
extern crate self as redom;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use schema::Error;

///
/// Prelude
///

pub mod prelude {
    pub use crate::Model;
    pub use crate::module::prelude::*;
    pub use crate::schema::{
        decorator::{prop, schema},
        entity::{BaseEntity, EntityId, get_id},
        factory::{CollisionPolicy, CompileOptions, SchemaFactory},
        metadata::MetadataStore,
        node::{ClassKey, ClassRef, Model, PropOptions, PropType, SchemaOptions},
        om::Schema,
        types::{DataStructure, FieldType},
    };
}

///
/// TESTS
///
