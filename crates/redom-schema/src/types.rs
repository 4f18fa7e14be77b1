use crate::prelude::*;
use derive_more::{Display, FromStr};

///
/// DataStructure
///
/// How an entity is stored in Redis: a RedisJSON document or a flat hash.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
pub enum DataStructure {
    #[default]
    #[display("JSON")]
    #[serde(rename = "JSON")]
    Json,

    #[display("HASH")]
    #[serde(rename = "HASH")]
    Hash,
}

///
/// FieldType
///
/// Scalar kinds a property can be indexed as.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum FieldType {
    #[display("boolean")]
    #[serde(rename = "boolean")]
    Boolean,

    #[display("date")]
    #[serde(rename = "date")]
    Date,

    #[display("number")]
    #[serde(rename = "number")]
    Number,

    #[display("number[]")]
    #[serde(rename = "number[]")]
    NumberArray,

    #[display("point")]
    #[serde(rename = "point")]
    Point,

    #[default]
    #[display("string")]
    #[serde(rename = "string")]
    String,

    #[display("string[]")]
    #[serde(rename = "string[]")]
    StringArray,

    #[display("text")]
    #[serde(rename = "text")]
    Text,
}

impl FieldType {
    pub const ALL: [Self; 8] = [
        Self::Boolean,
        Self::Date,
        Self::Number,
        Self::NumberArray,
        Self::Point,
        Self::String,
        Self::StringArray,
        Self::Text,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Number => "number",
            Self::NumberArray => "number[]",
            Self::Point => "point",
            Self::String => "string",
            Self::StringArray => "string[]",
            Self::Text => "text",
        }
    }

    #[must_use]
    pub const fn is_array(self) -> bool {
        matches!(self, Self::NumberArray | Self::StringArray)
    }

    // number[] has no hash representation
    #[must_use]
    pub const fn is_json_only(self) -> bool {
        matches!(self, Self::NumberArray)
    }
}

impl std::str::FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| UnknownFieldType(s.to_string()))
    }
}

///
/// UnknownFieldType
///

#[derive(Debug, ThisError)]
#[error("unknown field type '{0}'")]
pub struct UnknownFieldType(pub String);

///
/// TESTS
///
