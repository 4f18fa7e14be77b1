//! Injection tokens: the string keys providers are registered under.

use crate::ModuleError;
use redom_schema::node::Model;

/// Token of the default store connection.
pub const CONNECTION_TOKEN: &str = "REDIS_OM_CONNECTION";

/// Connection name treated the same as no name.
pub const DEFAULT_CONNECTION_NAME: &str = "default";

/// Token of the resolved [`ModuleOptions`](crate::options::ModuleOptions).
pub const MODULE_OPTIONS_TOKEN: &str = "redis_om:module_options";

/// Token of the repository for the entity named `name` (`PersonRepository`).
pub fn repository_token(name: &str) -> Result<String, ModuleError> {
    if name.is_empty() {
        return Err(ModuleError::InvalidToken(
            "entity name cannot be empty".to_string(),
        ));
    }

    Ok(format!("{name}Repository"))
}

/// Token of the repository for model `T`, named after its class.
#[must_use]
pub fn repository_token_for<T: Model>() -> String {
    format!("{}Repository", T::CLASS_NAME)
}

/// Token of the connection called `name`; unnamed and `"default"` share
/// [`CONNECTION_TOKEN`].
#[must_use]
pub fn connection_token(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() && name != DEFAULT_CONNECTION_NAME => {
            format!("{CONNECTION_TOKEN}_{name}")
        }
        _ => CONNECTION_TOKEN.to_string(),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use redom_schema::metadata::MetadataStore;

    struct Cat;

    impl Model for Cat {
        const CLASS_NAME: &'static str = "Cat";

        fn describe(_: &mut MetadataStore) {}
    }

    #[test]
    fn repository_tokens() {
        assert_eq!(repository_token("Person").unwrap(), "PersonRepository");
        assert_eq!(repository_token_for::<Cat>(), "CatRepository");
        assert!(matches!(
            repository_token(""),
            Err(ModuleError::InvalidToken(_))
        ));
    }

    #[test]
    fn connection_tokens() {
        assert_eq!(connection_token(None), "REDIS_OM_CONNECTION");
        assert_eq!(connection_token(Some("default")), "REDIS_OM_CONNECTION");
        assert_eq!(connection_token(Some("")), "REDIS_OM_CONNECTION");
        assert_eq!(
            connection_token(Some("cache")),
            "REDIS_OM_CONNECTION_cache"
        );
    }
}
