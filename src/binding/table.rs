use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use crate::{
    animator::registry::AnimatorRegistry,
    binding::model::AnimatorBinding,
    binding::property::{PropertyKey, Representation},
    foundation::core::{AnimatorId, ObjectId},
    foundation::error::{AnimatorError, AnimatorResult},
    observe::notifier::{KeyedNotifier, Subscription},
    signal::context::EvaluationContext,
};

/// Payload of every binding notification.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BindingEvent {
    pub key: PropertyKey,
    /// The incoming binding for will-emerge and will-change, the outgoing one
    /// for will-perish.
    pub binding: AnimatorBinding,
}

/// Owner of every [`AnimatorBinding`], at most one per [`PropertyKey`].
///
/// Per key the table is a two-state machine: unbound, or bound to one
/// animator. `bind_or_update` moves unbound to bound (will-emerge) or replaces
/// the binding (will-change); `unbind_animator` and animator destruction move
/// bound to unbound (will-perish). Every notification fires before the
/// storage changes, with no internal borrow held.
pub struct BindingTable {
    bindings: RefCell<BTreeMap<PropertyKey, AnimatorBinding>>,
    registry: Weak<AnimatorRegistry>,
    will_emerge: KeyedNotifier<PropertyKey, BindingEvent>,
    will_change: KeyedNotifier<PropertyKey, BindingEvent>,
    will_perish: KeyedNotifier<PropertyKey, BindingEvent>,
    cascade: RefCell<Option<Subscription>>,
}

impl BindingTable {
    /// A table that is not attached to any registry. Bindings are neither
    /// checked against live animators nor cascaded on destruction.
    pub fn detached() -> Self {
        Self {
            bindings: RefCell::new(BTreeMap::new()),
            registry: Weak::new(),
            will_emerge: KeyedNotifier::new(),
            will_change: KeyedNotifier::new(),
            will_perish: KeyedNotifier::new(),
            cascade: RefCell::new(None),
        }
    }

    /// A table bound to `registry`: binding requires the animator to exist,
    /// and destroying an animator unbinds every property it drives before the
    /// animator leaves the registry.
    pub fn attached(registry: &Rc<AnimatorRegistry>) -> Rc<Self> {
        Rc::new_cyclic(|weak: &Weak<Self>| {
            let table = weak.clone();
            let cascade = registry.on_any_will_perish(move |animator| {
                if let Some(table) = table.upgrade() {
                    table.unbind_all_for_animator(animator.id);
                }
            });
            Self {
                registry: Rc::downgrade(registry),
                cascade: RefCell::new(Some(cascade)),
                ..Self::detached()
            }
        })
    }

    pub fn is_animator_bound(&self, key: PropertyKey) -> bool {
        self.bindings.borrow().contains_key(&key)
    }

    /// Current binding, or `None` while unbound.
    pub fn animator_binding(&self, key: PropertyKey) -> Option<AnimatorBinding> {
        self.bindings.borrow().get(&key).copied()
    }

    /// Current binding, or `NotFound` while unbound.
    pub fn require_binding(&self, key: PropertyKey) -> AnimatorResult<AnimatorBinding> {
        self.animator_binding(key)
            .ok_or_else(|| AnimatorError::not_found(format!("{key} has no animator binding")))
    }

    /// Create or replace the binding of `key`.
    ///
    /// Fires will-emerge on the unbound to bound transition and will-change on
    /// every later call, including calls with an identical binding.
    #[tracing::instrument(skip(self), fields(key = %key))]
    pub fn bind_or_update(&self, key: PropertyKey, binding: AnimatorBinding) -> AnimatorResult<()> {
        binding.validate()?;
        if let Some(registry) = self.registry.upgrade() {
            if !registry.exists(binding.animator_id) {
                return Err(AnimatorError::not_found(format!(
                    "cannot bind {key} to unknown {}",
                    binding.animator_id
                )));
            }
        }

        let event = BindingEvent { key, binding };
        if self.is_animator_bound(key) {
            self.will_change.notify(&key, &event);
            tracing::trace!(animator = %binding.animator_id, "binding will change");
        } else {
            self.will_emerge.notify(&key, &event);
            tracing::debug!(animator = %binding.animator_id, "binding will emerge");
        }
        self.bindings.borrow_mut().insert(key, binding);
        Ok(())
    }

    /// Remove the binding of `key`, firing will-perish first. No-op when unbound.
    #[tracing::instrument(skip(self), fields(key = %key))]
    pub fn unbind_animator(&self, key: PropertyKey) -> Option<AnimatorBinding> {
        let binding = self.animator_binding(key)?;
        self.will_perish.notify(&key, &BindingEvent { key, binding });
        tracing::debug!(animator = %binding.animator_id, "binding will perish");
        self.bindings.borrow_mut().remove(&key)
    }

    /// Unbind `key` if it is bound. Returns whether a binding was removed.
    pub fn unbind_animator_if_bound(&self, key: PropertyKey) -> bool {
        self.unbind_animator(key).is_some()
    }

    /// Tear down every binding of `object` whose property belongs to
    /// `representation`, e.g. when the object switches from RGB to HSB colour.
    pub fn unbind_representation(&self, object: ObjectId, representation: Representation) -> usize {
        representation
            .properties()
            .filter(|&property| self.unbind_animator_if_bound(PropertyKey::new(object, property)))
            .count()
    }

    /// Unbind every property driven by `animator`. Returns the number removed.
    #[tracing::instrument(skip(self))]
    pub fn unbind_all_for_animator(&self, animator: AnimatorId) -> usize {
        let keys: Vec<PropertyKey> = self
            .bindings_for_animator(animator)
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        let removed = keys
            .into_iter()
            .filter(|&key| self.unbind_animator_if_bound(key))
            .count();
        if removed > 0 {
            tracing::debug!(%animator, removed, "cascaded unbind");
        }
        removed
    }

    pub fn bindings_for_animator(&self, animator: AnimatorId) -> Vec<(PropertyKey, AnimatorBinding)> {
        self.bindings
            .borrow()
            .iter()
            .filter(|(_, b)| b.animator_id == animator)
            .map(|(k, b)| (*k, *b))
            .collect()
    }

    /// Snapshot of all bindings, ordered by key.
    pub fn bindings(&self) -> Vec<(PropertyKey, AnimatorBinding)> {
        self.bindings
            .borrow()
            .iter()
            .map(|(k, b)| (*k, *b))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.borrow().is_empty()
    }

    /// Effective value of `key` for `ctx`, computed on demand.
    ///
    /// `None` when the key is unbound, the animator no longer exists, or the
    /// animator has no value for this context.
    pub fn evaluate(
        &self,
        key: PropertyKey,
        registry: &AnimatorRegistry,
        ctx: &EvaluationContext,
    ) -> Option<f32> {
        let binding = self.animator_binding(key)?;
        let t = registry.evaluate(binding.animator_id, ctx)?;
        Some(binding.remap(t))
    }

    pub fn on_will_emerge<F>(&self, key: PropertyKey, f: F) -> Subscription
    where
        F: Fn(&BindingEvent) + 'static,
    {
        self.will_emerge.subscribe_key(key, f)
    }

    pub fn on_will_change<F>(&self, key: PropertyKey, f: F) -> Subscription
    where
        F: Fn(&BindingEvent) + 'static,
    {
        self.will_change.subscribe_key(key, f)
    }

    pub fn on_will_perish<F>(&self, key: PropertyKey, f: F) -> Subscription
    where
        F: Fn(&BindingEvent) + 'static,
    {
        self.will_perish.subscribe_key(key, f)
    }

    pub fn on_any_will_emerge<F>(&self, f: F) -> Subscription
    where
        F: Fn(&BindingEvent) + 'static,
    {
        self.will_emerge.subscribe_all(f)
    }

    pub fn on_any_will_change<F>(&self, f: F) -> Subscription
    where
        F: Fn(&BindingEvent) + 'static,
    {
        self.will_change.subscribe_all(f)
    }

    pub fn on_any_will_perish<F>(&self, f: F) -> Subscription
    where
        F: Fn(&BindingEvent) + 'static,
    {
        self.will_perish.subscribe_all(f)
    }

    /// Whether destroying an animator cascades into this table.
    pub fn is_attached(&self) -> bool {
        self.cascade.borrow().is_some()
    }
}

impl Default for BindingTable {
    fn default() -> Self {
        Self::detached()
    }
}

impl std::fmt::Debug for BindingTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingTable")
            .field("bindings", &self.len())
            .field("attached", &self.is_attached())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/binding/table.rs"]
mod tests;
