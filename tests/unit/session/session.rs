use super::*;
use crate::{
    binding::{model::AnimatorBinding, property::AnimatableProperty},
    foundation::core::{ObjectId, Point},
    scene::store::SceneProperties,
    signal::source::{OscillatorSource, PanSource, RandomSource, Source},
};

struct Fixture {
    session: AnimationSession<SceneProperties>,
    pan: AnimatorId,
    key: PropertyKey,
}

fn fixture() -> Fixture {
    let registry = Rc::new(AnimatorRegistry::new());
    let bindings = BindingTable::attached(&registry);
    let store = Rc::new(SceneProperties::new());
    let pan = registry
        .create("pan", Source::Pan(PanSource::default()))
        .unwrap();
    let key = PropertyKey::new(ObjectId(1), AnimatableProperty::PositionX);
    store.set_value(key, 7.0);
    bindings
        .bind_or_update(key, AnimatorBinding::new(pan, 0.0, 10.0))
        .unwrap();
    Fixture {
        session: AnimationSession::new(registry, bindings, store),
        pan,
        key,
    }
}

fn pan_ctx(x: f64) -> EvaluationContext {
    EvaluationContext::default().with_pan(Point::new(x, 0.0))
}

#[test]
fn tick_requires_start() {
    let f = fixture();
    assert!(matches!(
        f.session.tick(&pan_ctx(0.5)).unwrap_err(),
        AnimatorError::InvalidState(_)
    ));
}

#[test]
fn tick_applies_and_stop_restores() {
    let f = fixture();
    f.session.start().unwrap();

    let report = f.session.tick(&pan_ctx(0.25)).unwrap();
    assert_eq!(
        report.applied,
        vec![PropertyChange {
            key: f.key,
            value: 2.5
        }]
    );
    assert_eq!(f.session.store().value(f.key), Some(2.5));
    assert_eq!(f.session.last_value(f.pan), Some(0.25));

    assert_eq!(f.session.stop().unwrap(), 1);
    assert_eq!(f.session.store().value(f.key), Some(7.0));
    assert!(!f.session.is_active());
}

#[test]
fn missing_pan_holds_previous_value() {
    let f = fixture();
    f.session.start().unwrap();
    f.session.tick(&pan_ctx(1.0)).unwrap();

    let report = f.session.tick(&EvaluationContext::at(0.5)).unwrap();
    assert!(report.applied.is_empty());
    assert_eq!(report.held, vec![f.key]);
    assert_eq!(f.session.store().value(f.key), Some(10.0));
}

#[test]
fn destroying_animator_during_playback_restores_property() {
    let f = fixture();
    f.session.start().unwrap();
    f.session.tick(&pan_ctx(0.5)).unwrap();
    assert_eq!(f.session.store().value(f.key), Some(5.0));

    f.session.registry().destroy(f.pan).unwrap();

    assert!(!f.session.bindings().is_animator_bound(f.key));
    assert_eq!(f.session.store().value(f.key), Some(7.0));
    assert_eq!(f.session.stop().unwrap(), 0);
}

#[test]
fn binding_added_during_playback_is_restored_on_stop() {
    let f = fixture();
    let scale = PropertyKey::new(ObjectId(1), AnimatableProperty::UniformScale);
    f.session.store().set_value(scale, 1.0);
    f.session.start().unwrap();

    let osc = f
        .session
        .registry()
        .create("osc", Source::Oscillator(OscillatorSource::default()))
        .unwrap();
    f.session
        .bindings()
        .bind_or_update(scale, AnimatorBinding::new(osc, 2.0, 4.0))
        .unwrap();
    f.session.tick(&pan_ctx(0.0).with_elapsed(0.25)).unwrap();
    assert_eq!(f.session.store().value(scale), Some(4.0));

    assert_eq!(f.session.stop().unwrap(), 2);
    assert_eq!(f.session.store().value(scale), Some(1.0));
}

#[test]
fn animator_is_sampled_once_per_tick() {
    let f = fixture();
    let other = PropertyKey::new(ObjectId(2), AnimatableProperty::Red);
    f.session
        .bindings()
        .bind_or_update(other, AnimatorBinding::new(f.pan, 0.0, 1.0))
        .unwrap();
    f.session.start().unwrap();

    let report = f.session.tick(&pan_ctx(0.5)).unwrap();
    assert_eq!(report.samples.len(), 1);
    assert_eq!(report.applied.len(), 2);
}

#[test]
fn random_steps_report_interpolation_flag() {
    let f = fixture();
    let random = f
        .session
        .registry()
        .create(
            "rand",
            Source::Random(RandomSource {
                seed: 4,
                frequency: 1.0,
            }),
        )
        .unwrap();
    let key = PropertyKey::new(ObjectId(3), AnimatableProperty::Hue);
    f.session
        .bindings()
        .bind_or_update(key, AnimatorBinding::new(random, 0.0, 1.0))
        .unwrap();
    f.session.start().unwrap();

    let first = f.session.tick(&EvaluationContext::at(0.1)).unwrap();
    let second = f.session.tick(&EvaluationContext::at(0.6)).unwrap();
    let flag = |report: &TickReport| {
        report
            .samples
            .iter()
            .find(|(id, _)| *id == random)
            .map(|(_, s)| s.interpolate)
            .unwrap()
    };
    assert!(flag(&first));
    assert!(!flag(&second));
}

#[test]
fn start_twice_is_invalid() {
    let f = fixture();
    f.session.start().unwrap();
    assert!(f.session.start().is_err());
    f.session.stop().unwrap();
    assert!(f.session.stop().is_err());
}

#[test]
fn sample_reads_binding_without_writing() {
    let f = fixture();
    let sample = f.session.sample(f.key, &pan_ctx(0.75)).unwrap();
    assert_eq!(sample.value, 0.75);
    assert!(sample.interpolate);
    assert_eq!(f.session.store().value(f.key), Some(7.0));

    let unbound = PropertyKey::new(ObjectId(9), AnimatableProperty::Red);
    assert!(f.session.sample(unbound, &pan_ctx(0.75)).is_none());
    assert!(f.session.sample(f.key, &EvaluationContext::default()).is_none());
}

#[test]
fn property_absent_before_start_is_cleared_on_stop() {
    let f = fixture();
    let red = PropertyKey::new(ObjectId(4), AnimatableProperty::Red);
    let osc = f
        .session
        .registry()
        .create("osc", Source::Oscillator(OscillatorSource::default()))
        .unwrap();
    f.session
        .bindings()
        .bind_or_update(red, AnimatorBinding::new(osc, 0.0, 1.0))
        .unwrap();
    assert_eq!(f.session.store().value(red), None);

    f.session.start().unwrap();
    f.session.tick(&EvaluationContext::at(0.25)).unwrap();
    assert_eq!(f.session.store().value(red), Some(1.0));

    assert_eq!(f.session.stop().unwrap(), 2);
    assert_eq!(f.session.store().value(red), None);
    assert_eq!(f.session.store().value(f.key), Some(7.0));
}

#[test]
fn unbinding_property_absent_before_start_clears_it() {
    let f = fixture();
    let red = PropertyKey::new(ObjectId(4), AnimatableProperty::Red);
    f.session.start().unwrap();
    f.session
        .bindings()
        .bind_or_update(red, AnimatorBinding::new(f.pan, 0.0, 1.0))
        .unwrap();
    f.session.tick(&pan_ctx(0.5)).unwrap();
    assert_eq!(f.session.store().value(red), Some(0.5));

    f.session.bindings().unbind_animator(red).unwrap();
    assert_eq!(f.session.store().value(red), None);
    assert_eq!(f.session.stop().unwrap(), 1);
}
