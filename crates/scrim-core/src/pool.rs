#![forbid(unsafe_code)]

//! Instance provider contract and registry-backed pooling.
//!
//! Overlay managers never construct their visual instances directly. They
//! lease them from an [`InstancePool`] by logical key and return them through
//! [`InstancePool::despawn`] once the exit transition has finished. The pool
//! is the single owner of the underlying resources; the managers only hold a
//! lease for the lifetime of one presentation.
//!
//! [`PoolRegistry`] is the default implementation: an explicit enumerated-key
//! registry mapping each key to a [`TemplateSpec`] plus a factory closure,
//! with a per-key free list so reclaimed instances are reused instead of
//! rebuilt.

use std::collections::HashMap;

/// Static per-type configuration, readable before instantiation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateSpec {
    /// Logical key the template is registered under.
    pub key: String,
    /// Nominal width of instances, in points.
    pub width: f32,
    /// Nominal height of instances, in points.
    pub height: f32,
}

impl TemplateSpec {
    /// Create a template spec.
    pub fn new(key: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            key: key.into(),
            width,
            height,
        }
    }
}

/// Supplies ready-to-present instances by logical key and reclaims them.
///
/// `T` is the behavioral contract the instances expose (`dyn OverlayUnit`,
/// `dyn ToastView`, ...). `spawn` returning `None` means the key is unknown
/// or the provider cannot produce an instance; callers surface that once and
/// never retry.
pub trait InstancePool<T: ?Sized> {
    /// Look up the static template for `key`, if registered.
    fn find_template(&self, key: &str) -> Option<&TemplateSpec>;

    /// Lease an instance for `key`.
    fn spawn(&mut self, key: &str) -> Option<Box<T>>;

    /// Return a leased instance. The pool may cache it for reuse.
    fn despawn(&mut self, key: &str, instance: Box<T>);
}

type Factory<T> = Box<dyn FnMut() -> Box<T>>;

/// Enumerated-key registry of templates and factories with free-list reuse.
///
/// Keys are registered up front; there is no fallback lookup. Spawning an
/// unregistered key yields `None`, and despawning under an unregistered key
/// drops the instance.
pub struct PoolRegistry<T: ?Sized> {
    templates: HashMap<String, TemplateSpec>,
    factories: HashMap<String, Factory<T>>,
    free: HashMap<String, Vec<Box<T>>>,
}

impl<T: ?Sized> PoolRegistry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
            factories: HashMap::new(),
            free: HashMap::new(),
        }
    }

    /// Register a template and its factory. Re-registering a key replaces
    /// the previous template, factory, and any cached free instances.
    pub fn register(&mut self, spec: TemplateSpec, factory: impl FnMut() -> Box<T> + 'static) {
        let key = spec.key.clone();
        self.templates.insert(key.clone(), spec);
        self.factories.insert(key.clone(), Box::new(factory));
        self.free.remove(&key);
    }

    /// Whether `key` has been registered.
    pub fn is_registered(&self, key: &str) -> bool {
        self.templates.contains_key(key)
    }

    /// Number of reclaimed instances currently cached for `key`.
    pub fn idle_count(&self, key: &str) -> usize {
        self.free.get(key).map(Vec::len).unwrap_or(0)
    }
}

impl<T: ?Sized> Default for PoolRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> InstancePool<T> for PoolRegistry<T> {
    fn find_template(&self, key: &str) -> Option<&TemplateSpec> {
        self.templates.get(key)
    }

    fn spawn(&mut self, key: &str) -> Option<Box<T>> {
        if let Some(free) = self.free.get_mut(key)
            && let Some(instance) = free.pop()
        {
            return Some(instance);
        }
        self.factories.get_mut(key).map(|factory| factory())
    }

    fn despawn(&mut self, key: &str, instance: Box<T>) {
        if self.factories.contains_key(key) {
            self.free.entry(key.to_string()).or_default().push(instance);
        }
        // Unknown key: the instance is simply dropped.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Counter {
        fn serial(&self) -> u32;
    }

    struct Probe(u32);

    impl Counter for Probe {
        fn serial(&self) -> u32 {
            self.0
        }
    }

    fn registry() -> PoolRegistry<dyn Counter> {
        let mut pool: PoolRegistry<dyn Counter> = PoolRegistry::new();
        let mut serial = 0u32;
        pool.register(TemplateSpec::new("probe", 100.0, 40.0), move || {
            serial += 1;
            Box::new(Probe(serial))
        });
        pool
    }

    #[test]
    fn test_find_template_known_and_unknown() {
        let pool = registry();
        let spec = pool.find_template("probe").unwrap();
        assert_eq!(spec.height, 40.0);
        assert!(pool.find_template("missing").is_none());
    }

    #[test]
    fn test_spawn_unknown_key_is_none() {
        let mut pool = registry();
        assert!(pool.spawn("missing").is_none());
    }

    #[test]
    fn test_despawned_instance_is_reused() {
        let mut pool = registry();
        let first = pool.spawn("probe").unwrap();
        assert_eq!(first.serial(), 1);
        pool.despawn("probe", first);
        assert_eq!(pool.idle_count("probe"), 1);

        // Reuse, not a fresh build.
        let again = pool.spawn("probe").unwrap();
        assert_eq!(again.serial(), 1);
        assert_eq!(pool.idle_count("probe"), 0);

        // Free list exhausted: back to the factory.
        let fresh = pool.spawn("probe").unwrap();
        assert_eq!(fresh.serial(), 2);
    }

    #[test]
    fn test_despawn_unknown_key_drops() {
        let mut pool = registry();
        let instance = pool.spawn("probe").unwrap();
        pool.despawn("other", instance);
        assert_eq!(pool.idle_count("other"), 0);
        assert_eq!(pool.idle_count("probe"), 0);
    }

    #[test]
    fn test_reregister_clears_free_list() {
        let mut pool = registry();
        let instance = pool.spawn("probe").unwrap();
        pool.despawn("probe", instance);
        assert_eq!(pool.idle_count("probe"), 1);

        pool.register(TemplateSpec::new("probe", 100.0, 40.0), || Box::new(Probe(99)));
        assert_eq!(pool.idle_count("probe"), 0);
        assert_eq!(pool.spawn("probe").unwrap().serial(), 99);
    }
}
