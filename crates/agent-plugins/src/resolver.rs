//! Name-to-constructor resolution for capabilities
//!
//! A capability named `web_search` is looked up as the type `WebSearchPlugin`
//! inside a namespace. Namespaces are explicit maps populated at startup, so
//! resolution never depends on reflection.

use crate::Capability;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Suffix appended to the title-cased capability name
pub const CAPABILITY_TYPE_SUFFIX: &str = "Plugin";

/// Constructor producing a fresh capability instance
pub type CapabilityFactory =
    Arc<dyn Fn() -> agent_core::Result<Box<dyn Capability>> + Send + Sync>;

/// Why a capability could not be loaded
#[derive(Error, Debug)]
pub enum LoadError {
    /// The namespace is not known to the resolver
    #[error("namespace '{0}' is not registered")]
    UnknownNamespace(String),

    /// The namespace has no type matching the derived name
    #[error("no type '{type_name}' in namespace '{namespace}'")]
    UnknownCapability {
        namespace: String,
        type_name: String,
    },

    /// The constructor ran and failed
    #[error("failed to instantiate '{type_name}': {source}")]
    Instantiation {
        type_name: String,
        #[source]
        source: agent_core::Error,
    },
}

/// Maps `(namespace, name)` to a capability constructor
///
/// Any `Fn(&str, &str) -> Result<CapabilityFactory, LoadError>` closure is a
/// resolver too, which keeps test doubles short.
pub trait CapabilityResolver: Send + Sync {
    fn resolve(&self, namespace: &str, name: &str) -> Result<CapabilityFactory, LoadError>;
}

impl<F> CapabilityResolver for F
where
    F: Fn(&str, &str) -> Result<CapabilityFactory, LoadError> + Send + Sync,
{
    fn resolve(&self, namespace: &str, name: &str) -> Result<CapabilityFactory, LoadError> {
        self(namespace, name)
    }
}

/// Derive the type name a capability is registered under
///
/// Letters following a non-letter (or at the start) are upper-cased, other
/// letters lower-cased, underscores removed, and the `Plugin` suffix
/// appended.
///
/// ```
/// use agent_plugins::type_name_for;
///
/// assert_eq!(type_name_for("web_search"), "WebSearchPlugin");
/// assert_eq!(type_name_for("calculator"), "CalculatorPlugin");
/// ```
pub fn type_name_for(name: &str) -> String {
    let mut type_name = String::with_capacity(name.len() + CAPABILITY_TYPE_SUFFIX.len());
    let mut after_letter = false;

    for ch in name.chars() {
        if ch.is_alphabetic() {
            if after_letter {
                type_name.extend(ch.to_lowercase());
            } else {
                type_name.extend(ch.to_uppercase());
            }
            after_letter = true;
        } else {
            after_letter = false;
            if ch != '_' {
                type_name.push(ch);
            }
        }
    }

    type_name.push_str(CAPABILITY_TYPE_SUFFIX);
    type_name
}

/// A named group of capability constructors keyed by type name
#[derive(Clone)]
pub struct Namespace {
    name: String,
    constructors: HashMap<String, CapabilityFactory>,
}

impl Namespace {
    /// Create an empty namespace
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constructors: HashMap::new(),
        }
    }

    /// Register a constructor under a type name (e.g. `"WebSearchPlugin"`)
    pub fn register<F>(mut self, type_name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> agent_core::Result<Box<dyn Capability>> + Send + Sync + 'static,
    {
        self.constructors
            .insert(type_name.into(), Arc::new(constructor));
        self
    }

    /// Register a type that can be built with `Default`
    pub fn register_default<T>(self, type_name: impl Into<String>) -> Self
    where
        T: Capability + Default + 'static,
    {
        self.register(type_name, || Ok(Box::new(T::default()) as Box<dyn Capability>))
    }

    /// Namespace name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a constructor by type name
    pub fn get(&self, type_name: &str) -> Option<CapabilityFactory> {
        self.constructors.get(type_name).cloned()
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("name", &self.name)
            .field("types", &self.type_names())
            .finish()
    }
}

/// Resolver backed by namespaces registered at startup
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    namespaces: HashMap<String, Namespace>,
}

impl StaticResolver {
    /// Create a resolver with no namespaces
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver preloaded with the built-in `plugins` namespace
    pub fn builtin() -> Self {
        Self::new().with_namespace(crate::builtin::namespace())
    }

    /// Add a namespace, replacing any previous one with the same name
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.add_namespace(namespace);
        self
    }

    /// Add a namespace (mutable reference version)
    pub fn add_namespace(&mut self, namespace: Namespace) {
        self.namespaces
            .insert(namespace.name().to_string(), namespace);
    }

    /// Look up a namespace by name
    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(name)
    }
}

impl CapabilityResolver for StaticResolver {
    fn resolve(&self, namespace: &str, name: &str) -> Result<CapabilityFactory, LoadError> {
        let ns = self
            .namespaces
            .get(namespace)
            .ok_or_else(|| LoadError::UnknownNamespace(namespace.to_string()))?;

        let type_name = type_name_for(name);
        ns.get(&type_name).ok_or(LoadError::UnknownCapability {
            namespace: namespace.to_string(),
            type_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EchoPlugin;

    #[test]
    fn test_type_name_convention() {
        assert_eq!(type_name_for("web_search"), "WebSearchPlugin");
        assert_eq!(type_name_for("calculator"), "CalculatorPlugin");
        assert_eq!(type_name_for("word_count"), "WordCountPlugin");
        assert_eq!(type_name_for("webSearch"), "WebsearchPlugin");
        assert_eq!(type_name_for("calc2x"), "Calc2XPlugin");
        assert_eq!(type_name_for(""), "Plugin");
    }

    #[test]
    fn test_namespace_registration() {
        let ns = Namespace::new("custom")
            .register_default::<EchoPlugin>("EchoPlugin")
            .register("LoudEchoPlugin", || Ok(Box::new(EchoPlugin) as Box<dyn Capability>));

        assert_eq!(ns.name(), "custom");
        assert_eq!(ns.type_names(), vec!["EchoPlugin", "LoudEchoPlugin"]);
        assert!(ns.get("EchoPlugin").is_some());
        assert!(ns.get("Echo").is_none());
    }

    #[test]
    fn test_static_resolver_lookup() {
        let resolver = StaticResolver::new()
            .with_namespace(Namespace::new("custom").register_default::<EchoPlugin>("EchoPlugin"));

        assert!(resolver.resolve("custom", "echo").is_ok());
        assert!(matches!(
            resolver.resolve("missing", "echo"),
            Err(LoadError::UnknownNamespace(ns)) if ns == "missing"
        ));
        assert!(matches!(
            resolver.resolve("custom", "web_search"),
            Err(LoadError::UnknownCapability { type_name, .. }) if type_name == "WebSearchPlugin"
        ));
    }

    #[test]
    fn test_builtin_resolver() {
        let resolver = StaticResolver::builtin();
        let ns = resolver.namespace(crate::DEFAULT_NAMESPACE).unwrap();
        assert!(ns.type_names().contains(&"EchoPlugin"));
        assert!(resolver.resolve(crate::DEFAULT_NAMESPACE, "word_count").is_ok());
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |_: &str, name: &str| -> Result<CapabilityFactory, LoadError> {
            Err(LoadError::UnknownNamespace(name.to_string()))
        };
        assert!(resolver.resolve("any", "thing").is_err());
    }
}
