use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
};

use crate::{
    animator::model::Animator,
    foundation::core::AnimatorId,
    foundation::error::{AnimatorError, AnimatorResult},
    observe::notifier::{KeyedNotifier, Notifier, Subscription},
    signal::{context::EvaluationContext, source::Source},
};

/// Sole owner of animator values, keyed by [`AnimatorId`].
///
/// All methods take `&self`; the registry is meant to be shared through `Rc`
/// by every consumer of one scene session. Notifications run synchronously
/// with no internal borrow held, so observers may query the registry while
/// being notified. Mutating the registry from inside a callback is unsupported.
///
/// Ordering guarantees:
/// - `update`/`reset`: will-change (carrying the new value) fires before the
///   value is committed; `get` still returns the old value inside the callback.
/// - `destroy`: will-perish fires before removal; `get` still returns the
///   animator inside the callback. Count-changed fires after removal.
pub struct AnimatorRegistry {
    next_id: Cell<u64>,
    // Ids are monotonic, so key order is insertion order.
    animators: RefCell<BTreeMap<AnimatorId, Animator>>,
    count_changed: Notifier<usize>,
    will_change: KeyedNotifier<AnimatorId, Animator>,
    will_perish: KeyedNotifier<AnimatorId, Animator>,
}

impl AnimatorRegistry {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            animators: RefCell::new(BTreeMap::new()),
            count_changed: Notifier::new(),
            will_change: KeyedNotifier::new(),
            will_perish: KeyedNotifier::new(),
        }
    }

    /// Validate `source`, store a new animator and fire count-changed.
    #[tracing::instrument(skip(self, name))]
    pub fn create(&self, name: impl Into<String>, source: Source) -> AnimatorResult<AnimatorId> {
        source.validate()?;
        let id = AnimatorId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let animator = Animator::new(id, name.into(), source);
        tracing::debug!(%id, name = %animator.name, kind = %source.kind(), "animator created");
        self.animators.borrow_mut().insert(id, animator);

        self.count_changed.notify(&self.len());
        Ok(id)
    }

    /// Remove an animator. Returns the removed value, or `None` if `id` is unknown.
    ///
    /// Will-perish observers (keyed first, then registry-wide, which is where
    /// binding tables cascade their unbinds) run before the entry is removed.
    #[tracing::instrument(skip(self))]
    pub fn destroy(&self, id: AnimatorId) -> Option<Animator> {
        let Some(animator) = self.get(id) else {
            tracing::trace!(%id, "destroy of unknown animator ignored");
            return None;
        };

        let notified = self.will_perish.notify(&id, &animator);
        tracing::debug!(%id, observers = notified, "animator will perish");

        let removed = self.animators.borrow_mut().remove(&id);
        self.count_changed.notify(&self.len());
        removed
    }

    /// Replace the stored value for `animator.id`.
    ///
    /// The source tag is fixed at creation; changing it is `InvalidState`.
    #[tracing::instrument(skip(self, animator), fields(id = %animator.id))]
    pub fn update(&self, animator: Animator) -> AnimatorResult<()> {
        animator.validate()?;
        let current = self
            .get(animator.id)
            .ok_or_else(|| AnimatorError::not_found(format!("{} is not registered", animator.id)))?;
        if current.source.kind() != animator.source.kind() {
            return Err(AnimatorError::invalid_state(format!(
                "{} is a {} animator and cannot become {}",
                animator.id,
                current.source.kind(),
                animator.source.kind()
            )));
        }
        self.commit(animator);
        Ok(())
    }

    /// Restart the animator's local clock at driver time `now`.
    ///
    /// Parameters and id are unchanged; observers see the same will-change
    /// notification as for [`AnimatorRegistry::update`].
    #[tracing::instrument(skip(self))]
    pub fn reset(&self, id: AnimatorId, now: f64) -> AnimatorResult<()> {
        let mut animator = self
            .get(id)
            .ok_or_else(|| AnimatorError::not_found(format!("{id} is not registered")))?;
        animator.time_origin = now;
        self.commit(animator);
        Ok(())
    }

    fn commit(&self, animator: Animator) {
        let notified = self.will_change.notify(&animator.id, &animator);
        tracing::trace!(id = %animator.id, observers = notified, "animator will change");
        self.animators.borrow_mut().insert(animator.id, animator);
    }

    pub fn get(&self, id: AnimatorId) -> Option<Animator> {
        self.animators.borrow().get(&id).cloned()
    }

    pub fn exists(&self, id: AnimatorId) -> bool {
        self.animators.borrow().contains_key(&id)
    }

    /// Snapshot of every animator in insertion order.
    pub fn get_all(&self) -> Vec<Animator> {
        self.animators.borrow().values().cloned().collect()
    }

    pub fn ids(&self) -> Vec<AnimatorId> {
        self.animators.borrow().keys().copied().collect()
    }

    /// First animator with the given display name, in insertion order.
    pub fn find_by_name(&self, name: &str) -> Option<Animator> {
        self.animators
            .borrow()
            .values()
            .find(|a| a.name == name)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.animators.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.animators.borrow().is_empty()
    }

    /// Evaluate an animator at its local time. Unknown ids yield `None`.
    pub fn evaluate(&self, id: AnimatorId, ctx: &EvaluationContext) -> Option<f32> {
        self.animators.borrow().get(&id)?.evaluate(ctx)
    }

    /// Called with the new animator count after every create and destroy.
    pub fn on_count_changed<F>(&self, f: F) -> Subscription
    where
        F: Fn(&usize) + 'static,
    {
        self.count_changed.subscribe(f)
    }

    /// Called with the incoming value before `id` is updated or reset.
    pub fn on_will_change<F>(&self, id: AnimatorId, f: F) -> Subscription
    where
        F: Fn(&Animator) + 'static,
    {
        self.will_change.subscribe_key(id, f)
    }

    pub fn on_any_will_change<F>(&self, f: F) -> Subscription
    where
        F: Fn(&Animator) + 'static,
    {
        self.will_change.subscribe_all(f)
    }

    /// Called with the last value before `id` is removed.
    pub fn on_will_perish<F>(&self, id: AnimatorId, f: F) -> Subscription
    where
        F: Fn(&Animator) + 'static,
    {
        self.will_perish.subscribe_key(id, f)
    }

    pub fn on_any_will_perish<F>(&self, f: F) -> Subscription
    where
        F: Fn(&Animator) + 'static,
    {
        self.will_perish.subscribe_all(f)
    }
}

impl Default for AnimatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnimatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatorRegistry")
            .field("animators", &self.len())
            .field("next_id", &self.next_id.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animator/registry.rs"]
mod tests;
