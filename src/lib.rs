//! Signal-driven animators and property bindings for interactive scene editors.
//!
//! The crate evaluates small signal generators (pan gestures, oscillators,
//! value noise, stepped random) and maps their `[0, 1]` output onto scalar
//! object properties through a linear `value_at_0`/`value_at_1` remap.
//!
//! # Pipeline overview
//!
//! 1. **Sources**: [`Source`] is a pure function of an [`EvaluationContext`]
//!    and a local time.
//! 2. **Registry**: [`AnimatorRegistry`] owns named [`Animator`] values by
//!    [`AnimatorId`] and notifies observers before every change.
//! 3. **Bindings**: [`BindingTable`] owns at most one [`AnimatorBinding`] per
//!    [`PropertyKey`] and unbinds automatically when an animator is destroyed.
//! 4. **Driver**: [`AnimationSession`] applies evaluated bindings to a
//!    [`PropertyStore`] each tick and restores the original values on stop.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded**: shared state is `Rc`/`RefCell`; nothing is `Send`.
//! - **Notify before commit**: observers always run before storage changes,
//!   and may query the old state from inside a callback.
//! - **Absence is not an error**: evaluation yields `Option`, never a failure.
//! - **No globals**: registries and tables are explicit objects passed by `Rc`.
#![forbid(unsafe_code)]

mod animator;
mod binding;
mod document;
mod foundation;
mod observe;
mod scene;
mod session;
mod signal;

pub use animator::model::Animator;
pub use animator::registry::AnimatorRegistry;
pub use binding::model::AnimatorBinding;
pub use binding::property::{AnimatableProperty, PropertyKey, Representation};
pub use binding::table::{BindingEvent, BindingTable};
pub use document::{AnimatorSpec, BindingSpec, LoadedScene, ObjectSpec, SceneDocument};
pub use foundation::core::{AnimatorId, Lerp, ObjectId, Point};
pub use foundation::error::{AnimatorError, AnimatorResult};
pub use observe::notifier::{KeyedNotifier, Notifier, Subscription};
pub use scene::store::{PropertyChange, PropertyStore, SceneProperties};
pub use session::{AnimationSession, TickReport};
pub use signal::context::EvaluationContext;
pub use signal::ease::Ease;
pub use signal::sampler::{Sample, SignalSampler, preview};
pub use signal::source::{
    Axis, NoiseSource, OscillatorSource, PanSource, RandomSource, Source, SourceKind,
};
