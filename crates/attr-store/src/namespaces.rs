//! Attributes partitioned into named namespaces, plus a parameter facet.

use param_store::ParameterStore;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Namespace used when an attribute operation does not name one.
pub const DEFAULT_NAMESPACE: &str = "org.attrstore";

type NamespaceMap<A> = HashMap<String, HashMap<String, A>>;

/// Attribute store: each namespace holds its own flat map of attributes, and
/// an owned [`ParameterStore`] carries the unnamespaced parameter facet.
///
/// The default namespace always exists. It is created with the store, survives
/// [`AttributeStore::remove_attribute_namespace`] (which only empties it), and
/// is reinstated by [`AttributeStore::clear_attributes`] and on deserialization.
/// Other namespaces are created lazily on first write and removed outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "P: serde::Serialize, A: serde::Serialize",
    deserialize = "P: serde::de::Deserialize<'de>, A: serde::de::Deserialize<'de>"
))]
pub struct AttributeStore<P, A> {
    parameters: ParameterStore<P>,
    #[serde(deserialize_with = "namespaces_with_default")]
    attributes: NamespaceMap<A>,
}

fn namespaces_with_default<'de, D, A>(deserializer: D) -> Result<NamespaceMap<A>, D::Error>
where
    D: Deserializer<'de>,
    A: Deserialize<'de>,
{
    let mut attributes = NamespaceMap::<A>::deserialize(deserializer)?;
    attributes.entry(DEFAULT_NAMESPACE.to_string()).or_default();
    Ok(attributes)
}

impl<P, A> AttributeStore<P, A> {
    /// Creates a store with no parameters and one empty default namespace.
    pub fn new() -> Self {
        Self {
            parameters: ParameterStore::new(),
            attributes: Self::initial_namespaces(),
        }
    }

    /// Creates a store seeded with parameters, copied from `initial`.
    pub fn with_parameters<I, K>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
    {
        Self {
            parameters: ParameterStore::with_parameters(initial),
            attributes: Self::initial_namespaces(),
        }
    }

    fn initial_namespaces() -> NamespaceMap<A> {
        HashMap::from([(DEFAULT_NAMESPACE.to_string(), HashMap::new())])
    }

    /// `None` and the empty string both resolve to the default namespace; any
    /// other value is used verbatim.
    fn namespace_or_default(namespace: Option<&str>) -> &str {
        match namespace {
            Some(ns) if !ns.is_empty() => ns,
            _ => DEFAULT_NAMESPACE,
        }
    }

    fn namespace_mut(&mut self, ns: &str) -> &mut HashMap<String, A> {
        if !self.attributes.contains_key(ns) {
            tracing::trace!(namespace = ns, "creating attribute namespace");
        }
        self.attributes.entry(ns.to_string()).or_default()
    }

    /// Name of the default namespace.
    pub fn default_namespace(&self) -> &str {
        DEFAULT_NAMESPACE
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.attributes.contains_key(namespace)
    }

    /// Current namespace names; the default namespace is always among them.
    pub fn namespaces(&self) -> Vec<&str> {
        self.attributes.keys().map(String::as_str).collect()
    }

    /// A fresh copy of the namespace's attributes, or an empty map when the
    /// namespace does not exist. Never creates the namespace.
    pub fn get_attributes(&self, namespace: Option<&str>) -> HashMap<String, A>
    where
        A: Clone,
    {
        let ns = Self::namespace_or_default(namespace);
        self.attributes.get(ns).cloned().unwrap_or_default()
    }

    /// Attribute names in the namespace, or empty when it does not exist.
    pub fn get_attribute_names(&self, namespace: Option<&str>) -> Vec<&str> {
        let ns = Self::namespace_or_default(namespace);
        self.attributes
            .get(ns)
            .map(|attrs| attrs.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Returns the stored value, or `None` when the namespace or the attribute
    /// is not set. A key holding an in-band "no value" marker returns `Some`.
    pub fn get_attribute(&self, name: &str, namespace: Option<&str>) -> Option<&A> {
        let ns = Self::namespace_or_default(namespace);
        self.attributes.get(ns).and_then(|attrs| attrs.get(name))
    }

    /// Returns the stored value when present, else `default`.
    pub fn get_attribute_or<'a>(
        &'a self,
        name: &str,
        namespace: Option<&str>,
        default: &'a A,
    ) -> &'a A {
        self.get_attribute(name, namespace).unwrap_or(default)
    }

    pub fn has_attribute(&self, name: &str, namespace: Option<&str>) -> bool {
        let ns = Self::namespace_or_default(namespace);
        self.attributes
            .get(ns)
            .map_or(false, |attrs| attrs.contains_key(name))
    }

    /// Inserts or overwrites an attribute, creating the namespace if needed.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: A, namespace: Option<&str>) {
        let ns = Self::namespace_or_default(namespace);
        self.namespace_mut(ns).insert(name.into(), value);
    }

    /// Merges `attributes` into the namespace, creating it if needed; last
    /// writer wins on key collision, as in [`ParameterStore::set_parameters`].
    pub fn set_attributes<I, K>(&mut self, attributes: I, namespace: Option<&str>)
    where
        I: IntoIterator<Item = (K, A)>,
        K: Into<String>,
    {
        let ns = Self::namespace_or_default(namespace);
        self.namespace_mut(ns)
            .extend(attributes.into_iter().map(|(k, v)| (k.into(), v)));
    }

    /// Removes an attribute and returns its value; the namespace stays in
    /// place even when this empties it.
    pub fn remove_attribute(&mut self, name: &str, namespace: Option<&str>) -> Option<A> {
        let ns = Self::namespace_or_default(namespace);
        self.attributes
            .get_mut(ns)
            .and_then(|attrs| attrs.remove(name))
    }

    /// Removes a namespace and returns its attributes.
    ///
    /// The default namespace is never removed, only swapped for a fresh empty
    /// map. A namespace that does not exist yields an empty map and no change.
    pub fn remove_attribute_namespace(&mut self, namespace: &str) -> HashMap<String, A> {
        if namespace == DEFAULT_NAMESPACE {
            return self
                .attributes
                .insert(DEFAULT_NAMESPACE.to_string(), HashMap::new())
                .unwrap_or_default();
        }
        match self.attributes.remove(namespace) {
            Some(attrs) => {
                tracing::debug!(namespace = namespace, "removed attribute namespace");
                attrs
            }
            None => HashMap::new(),
        }
    }

    /// Discards every namespace and reinstates an empty default namespace.
    pub fn clear_attributes(&mut self) {
        tracing::debug!("clearing attribute namespaces");
        self.attributes = Self::initial_namespaces();
    }

    // Parameter facet, delegated to the owned store.

    pub fn get_parameter(&self, name: &str) -> Option<&P> {
        self.parameters.get_parameter(name)
    }

    pub fn get_parameter_or<'a>(&'a self, name: &str, default: &'a P) -> &'a P {
        self.parameters.get_parameter_or(name, default)
    }

    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.parameter_names()
    }

    pub fn parameters(&self) -> HashMap<String, P>
    where
        P: Clone,
    {
        self.parameters.parameters()
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.has_parameter(name)
    }

    pub fn remove_parameter(&mut self, name: &str) -> Option<P> {
        self.parameters.remove_parameter(name)
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: P) {
        self.parameters.set_parameter(name, value);
    }

    pub fn set_parameters<I, K>(&mut self, parameters: I)
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
    {
        self.parameters.set_parameters(parameters);
    }

    pub fn clear_parameters(&mut self) {
        self.parameters.clear_parameters();
    }

    /// The underlying parameter store.
    pub fn parameter_store(&self) -> &ParameterStore<P> {
        &self.parameters
    }

    pub fn parameter_store_mut(&mut self) -> &mut ParameterStore<P> {
        &mut self.parameters
    }
}

impl<P, A> Default for AttributeStore<P, A> {
    fn default() -> Self {
        Self::new()
    }
}
