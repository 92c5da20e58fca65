use std::{cell::RefCell, collections::BTreeMap};

use crate::{
    binding::property::PropertyKey,
    foundation::core::ObjectId,
    observe::notifier::{KeyedNotifier, Subscription},
};

/// Change of one stored property value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PropertyChange {
    pub key: PropertyKey,
    pub value: f32,
}

/// Capability the binding layer needs from the scene's object system.
pub trait PropertyStore {
    /// Current value, or `None` if the object does not carry the property.
    fn value(&self, key: PropertyKey) -> Option<f32>;

    fn set_value(&self, key: PropertyKey, value: f32);

    /// Remove the property from its object. Observers are not notified.
    fn clear_value(&self, key: PropertyKey);

    /// Observe changes of one property. Observers run before the value is stored.
    fn subscribe<F>(&self, key: PropertyKey, f: F) -> Subscription
    where
        F: Fn(&PropertyChange) + 'static;
}

/// In-memory property store keyed by object and property.
#[derive(Debug, Default)]
pub struct SceneProperties {
    values: RefCell<BTreeMap<PropertyKey, f32>>,
    will_change: KeyedNotifier<PropertyKey, PropertyChange>,
}

impl SceneProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored properties of `object`, ordered by property.
    pub fn object_values(&self, object: ObjectId) -> Vec<(PropertyKey, f32)> {
        self.values
            .borrow()
            .iter()
            .filter(|(k, _)| k.object == object)
            .map(|(k, v)| (*k, *v))
            .collect()
    }

    /// Snapshot of every stored value, ordered by key.
    pub fn snapshot(&self) -> Vec<(PropertyKey, f32)> {
        self.values.borrow().iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Catch-all observer for every property change.
    pub fn subscribe_all<F>(&self, f: F) -> Subscription
    where
        F: Fn(&PropertyChange) + 'static,
    {
        self.will_change.subscribe_all(f)
    }
}

impl PropertyStore for SceneProperties {
    fn value(&self, key: PropertyKey) -> Option<f32> {
        self.values.borrow().get(&key).copied()
    }

    fn set_value(&self, key: PropertyKey, value: f32) {
        self.will_change.notify(&key, &PropertyChange { key, value });
        self.values.borrow_mut().insert(key, value);
    }

    fn clear_value(&self, key: PropertyKey) {
        self.values.borrow_mut().remove(&key);
    }

    fn subscribe<F>(&self, key: PropertyKey, f: F) -> Subscription
    where
        F: Fn(&PropertyChange) + 'static,
    {
        self.will_change.subscribe_key(key, f)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/store.rs"]
mod tests;
