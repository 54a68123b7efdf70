use std::collections::BTreeMap;

use crate::models::RouteKey;

/// Lookup from route key to a bespoke layout.
///
/// "Not registered" is `None`, not an error. The static registry below is the
/// only implementation today; the trait leaves room for one that loads
/// layouts at runtime.
pub trait LayoutRegistry {
    type Layout;

    fn lookup(&self, key: &RouteKey) -> Option<&Self::Layout>;

    fn contains(&self, key: &RouteKey) -> bool {
        self.lookup(key).is_some()
    }
}

/// Registry fixed when the site is built
#[derive(Clone, Debug)]
pub struct StaticRegistry<L> {
    layouts: BTreeMap<RouteKey, L>,
}

impl<L> Default for StaticRegistry<L> {
    fn default() -> Self {
        Self {
            layouts: BTreeMap::new(),
        }
    }
}

impl<L> StaticRegistry<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`StaticRegistry::register`]
    pub fn with(mut self, key: RouteKey, layout: L) -> Self {
        self.register(key, layout);
        self
    }

    /// Add a layout. A second registration for the same key replaces the
    /// first and returns it.
    pub fn register(&mut self, key: RouteKey, layout: L) -> Option<L> {
        let previous = self.layouts.insert(key.clone(), layout);
        if previous.is_some() {
            log::warn!("Bespoke layout {key} registered twice; keeping the later one");
        }
        previous
    }

    pub fn keys(&self) -> impl Iterator<Item = &RouteKey> {
        self.layouts.keys()
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

impl<L> LayoutRegistry for StaticRegistry<L> {
    type Layout = L;

    fn lookup(&self, key: &RouteKey) -> Option<&L> {
        self.layouts.get(key)
    }
}

impl<L> FromIterator<(RouteKey, L)> for StaticRegistry<L> {
    fn from_iter<I: IntoIterator<Item = (RouteKey, L)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (key, layout) in iter {
            registry.register(key, layout);
        }
        registry
    }
}
