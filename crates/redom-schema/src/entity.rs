use crate::prelude::*;
use derive_more::{Display, From};
use std::borrow::Borrow;

///
/// EntityId
///
/// The id part of an entity's key (`Person:<id>`).
///

#[derive(Clone, Debug, Deserialize, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

///
/// BaseEntity
///
/// Implemented by entity types that expose the id they were stored under.
/// An entity that has not been saved yet has no id.
///

pub trait BaseEntity {
    fn entity_id(&self) -> Option<&EntityId>;
}

/// The id of `entity`, or `None` when there is no entity or it has no id.
#[must_use]
pub fn get_id<E: BaseEntity + ?Sized>(entity: Option<&E>) -> Option<&EntityId> {
    entity.and_then(BaseEntity::entity_id)
}

///
/// TESTS
///
