//! Evaluation driver applying animator bindings to a property store.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    rc::Rc,
};

use crate::{
    animator::registry::AnimatorRegistry,
    binding::property::PropertyKey,
    binding::table::BindingTable,
    foundation::core::AnimatorId,
    foundation::error::{AnimatorError, AnimatorResult},
    observe::notifier::Subscription,
    scene::store::{PropertyChange, PropertyStore},
    signal::{
        context::EvaluationContext,
        sampler::{Sample, SignalSampler},
    },
};

/// Outcome of one [`AnimationSession::tick`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct TickReport {
    pub elapsed: f64,
    /// One sample per animator that produced a value this tick.
    pub samples: Vec<(AnimatorId, Sample)>,
    /// Properties written to the store, in key order.
    pub applied: Vec<PropertyChange>,
    /// Bound properties left untouched because their animator had no value.
    pub held: Vec<PropertyKey>,
}

#[derive(Debug, Default)]
struct Playback {
    active: bool,
    /// Pre-playback value per bound key; `None` for properties the object
    /// did not carry.
    base_values: BTreeMap<PropertyKey, Option<f32>>,
    samplers: HashMap<AnimatorId, SignalSampler>,
}

/// Drives bound properties from their animators while playback is active.
///
/// `start` records the current value of every bound property, `tick` writes
/// evaluated values, and `stop` writes the recorded values back. A binding
/// that perishes during playback, directly or through animator destruction,
/// has its property restored immediately; a binding that emerges during
/// playback has its property recorded first.
pub struct AnimationSession<S: PropertyStore + 'static> {
    registry: Rc<AnimatorRegistry>,
    bindings: Rc<BindingTable>,
    store: Rc<S>,
    playback: Rc<RefCell<Playback>>,
    _subscriptions: Vec<Subscription>,
}

impl<S: PropertyStore + 'static> AnimationSession<S> {
    pub fn new(registry: Rc<AnimatorRegistry>, bindings: Rc<BindingTable>, store: Rc<S>) -> Self {
        let playback = Rc::new(RefCell::new(Playback::default()));

        let on_emerge = {
            let playback = Rc::clone(&playback);
            let store = Rc::clone(&store);
            bindings.on_any_will_emerge(move |event| {
                let mut playback = playback.borrow_mut();
                if !playback.active {
                    return;
                }
                let value = store.value(event.key);
                playback.base_values.entry(event.key).or_insert(value);
            })
        };

        let on_perish = {
            let playback = Rc::clone(&playback);
            let store = Rc::clone(&store);
            bindings.on_any_will_perish(move |event| {
                let base = {
                    let mut playback = playback.borrow_mut();
                    if !playback.active {
                        return;
                    }
                    playback.base_values.remove(&event.key)
                };
                if let Some(base) = base {
                    tracing::debug!(key = %event.key, ?base, "restoring unbound property");
                    restore(store.as_ref(), event.key, base);
                }
            })
        };

        let on_animator_change = {
            let playback = Rc::clone(&playback);
            registry.on_any_will_change(move |animator| {
                if let Some(sampler) = playback.borrow_mut().samplers.get_mut(&animator.id) {
                    sampler.reset();
                }
            })
        };

        let on_animator_perish = {
            let playback = Rc::clone(&playback);
            registry.on_any_will_perish(move |animator| {
                playback.borrow_mut().samplers.remove(&animator.id);
            })
        };

        Self {
            registry,
            bindings,
            store,
            playback,
            _subscriptions: vec![on_emerge, on_perish, on_animator_change, on_animator_perish],
        }
    }

    pub fn registry(&self) -> &Rc<AnimatorRegistry> {
        &self.registry
    }

    pub fn bindings(&self) -> &Rc<BindingTable> {
        &self.bindings
    }

    pub fn store(&self) -> &Rc<S> {
        &self.store
    }

    pub fn is_active(&self) -> bool {
        self.playback.borrow().active
    }

    /// Begin playback, recording the current value of every bound property.
    #[tracing::instrument(skip(self))]
    pub fn start(&self) -> AnimatorResult<()> {
        let mut playback = self.playback.borrow_mut();
        if playback.active {
            return Err(AnimatorError::invalid_state("session is already playing"));
        }
        playback.active = true;
        playback.base_values.clear();
        playback.samplers.clear();
        for (key, _) in self.bindings.bindings() {
            playback.base_values.insert(key, self.store.value(key));
        }
        tracing::debug!(recorded = playback.base_values.len(), "playback started");
        Ok(())
    }

    /// Evaluate every binding for `ctx` and write the results to the store.
    ///
    /// Each animator is sampled once per tick, however many properties it drives.
    #[tracing::instrument(skip(self, ctx), fields(elapsed = ctx.elapsed))]
    pub fn tick(&self, ctx: &EvaluationContext) -> AnimatorResult<TickReport> {
        if !self.is_active() {
            return Err(AnimatorError::invalid_state("tick requires an active session"));
        }

        let mut report = TickReport {
            elapsed: ctx.elapsed,
            ..TickReport::default()
        };
        let mut values: BTreeMap<AnimatorId, Option<f32>> = BTreeMap::new();

        for (key, binding) in self.bindings.bindings() {
            let t = *values
                .entry(binding.animator_id)
                .or_insert_with(|| self.sample_animator(binding.animator_id, ctx, &mut report));
            match t {
                Some(t) => {
                    let value = binding.remap(t);
                    self.store.set_value(key, value);
                    report.applied.push(PropertyChange { key, value });
                }
                None => report.held.push(key),
            }
        }

        tracing::trace!(
            applied = report.applied.len(),
            held = report.held.len(),
            "tick"
        );
        Ok(report)
    }

    fn sample_animator(
        &self,
        id: AnimatorId,
        ctx: &EvaluationContext,
        report: &mut TickReport,
    ) -> Option<f32> {
        let animator = self.registry.get(id)?;
        let sample = self
            .playback
            .borrow_mut()
            .samplers
            .entry(id)
            .or_default()
            .sample(&animator.source, ctx, animator.local_time(ctx))?;
        report.samples.push((id, sample));
        Some(sample.value)
    }

    /// Sample the animator driving `key` without writing to the store.
    ///
    /// Shares the per-animator stream state with `tick`, so the interpolate
    /// flag reflects every earlier sample of that animator.
    pub fn sample(&self, key: PropertyKey, ctx: &EvaluationContext) -> Option<Sample> {
        let binding = self.bindings.animator_binding(key)?;
        let animator = self.registry.get(binding.animator_id)?;
        self.playback
            .borrow_mut()
            .samplers
            .entry(animator.id)
            .or_default()
            .sample(&animator.source, ctx, animator.local_time(ctx))
    }

    /// Most recent raw value sampled for `id` during this playback.
    pub fn last_value(&self, id: AnimatorId) -> Option<f32> {
        self.playback
            .borrow()
            .samplers
            .get(&id)
            .and_then(SignalSampler::last_value)
    }

    /// End playback and write back every recorded value. Returns how many
    /// properties were restored.
    #[tracing::instrument(skip(self))]
    pub fn stop(&self) -> AnimatorResult<usize> {
        let base_values = {
            let mut playback = self.playback.borrow_mut();
            if !playback.active {
                return Err(AnimatorError::invalid_state("session is not playing"));
            }
            playback.active = false;
            playback.samplers.clear();
            std::mem::take(&mut playback.base_values)
        };
        let restored = base_values.len();
        for (key, base) in base_values {
            restore(self.store.as_ref(), key, base);
        }
        tracing::debug!(restored, "playback stopped");
        Ok(restored)
    }
}

fn restore<S: PropertyStore>(store: &S, key: PropertyKey, base: Option<f32>) {
    match base {
        Some(value) => store.set_value(key, value),
        None => store.clear_value(key),
    }
}

impl<S: PropertyStore + 'static> std::fmt::Debug for AnimationSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationSession")
            .field("registry", &self.registry)
            .field("bindings", &self.bindings)
            .field("playback", &self.playback.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../tests/unit/session/session.rs"]
mod tests;
