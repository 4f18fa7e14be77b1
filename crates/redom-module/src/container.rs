use crate::ModuleError;
use std::{
    any::{Any, type_name},
    collections::HashMap,
    sync::Arc,
};

/// A provider instance as stored in the container.
pub type Provider = Arc<dyn Any + Send + Sync>;

///
/// Container
///
/// Provider instances keyed by injection token. Registering a token again
/// replaces the earlier provider.
///

#[derive(Default)]
pub struct Container {
    providers: HashMap<String, Provider>,
}

impl Container {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provide<T: Any + Send + Sync>(&mut self, token: impl Into<String>, value: T) {
        self.provide_shared(token, Arc::new(value));
    }

    pub fn provide_shared(&mut self, token: impl Into<String>, provider: Provider) {
        self.providers.insert(token.into(), provider);
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.providers.contains_key(token)
    }

    /// Registered tokens, sorted.
    #[must_use]
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<_> = self.providers.keys().map(String::as_str).collect();
        tokens.sort_unstable();

        tokens
    }

    pub fn resolve<T: Any + Send + Sync>(&self, token: &str) -> Result<Arc<T>, ModuleError> {
        let provider = self
            .providers
            .get(token)
            .ok_or_else(|| ModuleError::MissingProvider {
                token: token.to_string(),
            })?;

        Arc::clone(provider)
            .downcast::<T>()
            .map_err(|_| ModuleError::ProviderType {
                token: token.to_string(),
                expected: type_name::<T>(),
            })
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_returns_shared_instance() {
        let mut container = Container::new();
        container.provide("answer", 42_u32);

        let a = container.resolve::<u32>("answer").unwrap();
        let b = container.resolve::<u32>("answer").unwrap();

        assert_eq!(*a, 42);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(container.tokens(), ["answer"]);
    }

    #[test]
    fn resolve_errors() {
        let mut container = Container::new();
        container.provide("name", "redom".to_string());

        assert!(matches!(
            container.resolve::<String>("missing"),
            Err(ModuleError::MissingProvider { .. })
        ));
        assert!(matches!(
            container.resolve::<u32>("name"),
            Err(ModuleError::ProviderType { .. })
        ));
    }
}
