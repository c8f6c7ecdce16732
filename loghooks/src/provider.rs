//! Named hook factory registry

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::HookError;
use crate::hook::{Creator, Hook, HookFactory};

/// A registry of named hook constructors.
///
/// Registration is first-wins: `register` refuses to overwrite an existing
/// name; use `replace` to do that deliberately. The provider is safe to
/// share across threads.
#[derive(Default)]
pub struct HookProvider {
    drivers: RwLock<HashMap<String, Creator>>,
}

impl HookProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under `key`; returns false if the name is taken.
    pub fn register(&self, key: impl Into<String>, creator: Creator) -> bool {
        let key = key.into();
        let mut drivers = self.drivers.write();
        if drivers.contains_key(&key) {
            return false;
        }
        drivers.insert(key, creator);
        true
    }

    /// Register or overwrite a constructor under `key`.
    pub fn replace(&self, key: impl Into<String>, creator: Creator) -> bool {
        self.drivers.write().insert(key.into(), creator);
        true
    }

    pub fn remove(&self, key: &str) -> bool {
        self.drivers.write().remove(key);
        true
    }

    pub fn exists(&self, key: &str) -> bool {
        self.drivers.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.drivers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.read().is_empty()
    }

    pub fn get(&self, key: &str) -> Option<Creator> {
        self.drivers.read().get(key).cloned()
    }

    /// Registered names, unordered.
    pub fn hooks(&self) -> Vec<String> {
        self.drivers.read().keys().cloned().collect()
    }

    /// Build a hook from the factory registered under `key`.
    pub fn resolve(&self, key: &str, args: &[String]) -> Result<Box<dyn Hook>, HookError> {
        let creator = self.get(key).ok_or(HookError::NotExists)?;
        creator(args)
    }

    /// Register a [`HookFactory`] under its own face name.
    pub fn add<F: HookFactory + 'static>(&self, factory: F) -> bool {
        let face = factory.face().to_string();
        if face.is_empty() {
            return false;
        }
        let factory = Arc::new(factory);
        self.register(face, Arc::new(move |args: &[String]| factory.create(args)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook::Entry;
    use crate::level::Severity;

    struct NullHook;

    impl Hook for NullHook {
        fn levels(&self) -> Vec<Severity> {
            Severity::ALL.to_vec()
        }

        fn fire(&self, _entry: &Entry) -> Result<(), HookError> {
            Ok(())
        }
    }

    fn null_creator() -> Creator {
        Arc::new(|_args: &[String]| Ok(Box::new(NullHook) as Box<dyn Hook>))
    }

    #[test]
    fn test_register_is_first_wins() {
        let provider = HookProvider::new();
        assert!(provider.register("null", null_creator()));
        assert!(!provider.register("null", null_creator()));
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn test_replace_and_remove() {
        let provider = HookProvider::new();
        assert!(provider.replace("null", null_creator()));
        assert!(provider.exists("null"));
        assert!(provider.remove("null"));
        assert!(!provider.exists("null"));
    }

    #[test]
    fn test_resolve_unknown_name() {
        let provider = HookProvider::new();
        let err = provider.resolve("missing", &[]).err().unwrap();
        assert!(err.is_not_exists());
    }

    #[test]
    fn test_resolve_builds_hook() {
        let provider = HookProvider::new();
        provider.register("null", null_creator());
        let hook = provider.resolve("null", &[]).unwrap();
        assert_eq!(hook.levels().len(), 7);
    }

    struct NamedFactory(&'static str);

    impl HookFactory for NamedFactory {
        fn face(&self) -> &str {
            self.0
        }

        fn create(&self, _args: &[String]) -> Result<Box<dyn Hook>, HookError> {
            Ok(Box::new(NullHook))
        }
    }

    #[test]
    fn test_add_factory_uses_face_name() {
        let provider = HookProvider::new();
        assert!(provider.add(NamedFactory("named")));
        assert!(provider.exists("named"));
        assert!(!provider.add(NamedFactory("")));
    }
}
