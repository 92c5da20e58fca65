use super::*;

fn unit_pan(axis: Axis) -> Source {
    Source::Pan(PanSource {
        axis,
        bottom_left: Point::new(0.0, 0.0),
        top_right: Point::new(1.0, 1.0),
    })
}

fn pan_at(x: f64, y: f64) -> EvaluationContext {
    EvaluationContext::default().with_pan(Point::new(x, y))
}

#[test]
fn pan_remaps_unit_bounds() {
    let pan = unit_pan(Axis::Horizontal);
    assert_eq!(pan.evaluate(&pan_at(0.0, 0.9), 0.0), Some(0.0));
    assert_eq!(pan.evaluate(&pan_at(1.0, 0.9), 0.0), Some(1.0));
    assert_eq!(pan.evaluate(&pan_at(0.5, 0.9), 0.0), Some(0.5));
}

#[test]
fn pan_vertical_reads_y_and_clamps() {
    let pan = Source::Pan(PanSource {
        axis: Axis::Vertical,
        bottom_left: Point::new(-1.0, -1.0),
        top_right: Point::new(1.0, 1.0),
    });
    assert_eq!(pan.evaluate(&pan_at(0.7, 0.0), 0.0), Some(0.5));
    assert_eq!(pan.evaluate(&pan_at(0.7, 4.0), 0.0), Some(1.0));
    assert_eq!(pan.evaluate(&pan_at(0.7, -4.0), 0.0), Some(0.0));
}

#[test]
fn pan_without_location_has_no_value() {
    let pan = unit_pan(Axis::Horizontal);
    assert_eq!(pan.evaluate(&EvaluationContext::default(), 3.0), None);
}

#[test]
fn pan_with_non_finite_location_has_no_value() {
    let pan = unit_pan(Axis::Horizontal);
    assert_eq!(pan.evaluate(&pan_at(f64::NAN, 0.5), 0.0), None);
    assert_eq!(pan.evaluate(&pan_at(f64::INFINITY, 0.5), 0.0), None);
    assert_eq!(pan.evaluate(&pan_at(0.5, f64::NAN), 0.0), Some(0.5));
}

#[test]
fn pan_with_degenerate_bounds_fails_validation() {
    let pan = Source::Pan(PanSource {
        axis: Axis::Horizontal,
        bottom_left: Point::new(0.5, 0.0),
        top_right: Point::new(0.5, 1.0),
    });
    assert!(pan.validate().is_err());
    assert_eq!(pan.evaluate(&pan_at(0.5, 0.5), 0.0), None);
}

#[test]
fn oscillator_follows_shifted_sine() {
    let osc = Source::Oscillator(OscillatorSource {
        frequency: 1.0,
        ease: Ease::Linear,
    });
    let ctx = EvaluationContext::default();
    let at = |t: f64| osc.evaluate(&ctx, t).unwrap();
    assert!((at(0.0) - 0.5).abs() < 1e-6);
    assert!((at(0.25) - 1.0).abs() < 1e-6);
    assert!((at(0.75) - 0.0).abs() < 1e-6);
    assert!((at(1.0) - 0.5).abs() < 1e-5);
}

#[test]
fn oscillator_applies_ease() {
    let osc = OscillatorSource {
        frequency: 2.0,
        ease: Ease::InQuad,
    };
    // Quarter period of 2 Hz hits the sine peak.
    assert!((osc.evaluate(0.125) - 1.0).abs() < 1e-6);
    assert!((osc.evaluate(0.0) - 0.25).abs() < 1e-6);
}

#[test]
fn noise_is_bit_identical_for_same_seed_and_time() {
    let noise = Source::Noise(NoiseSource {
        seed: 1234,
        frequency: 3.0,
    });
    let ctx = EvaluationContext::default();
    for t in [0.0, 0.1, 1.37, 42.5, -2.25] {
        let a = noise.evaluate(&ctx, t).unwrap();
        let b = noise.evaluate(&ctx, t).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
        assert!((0.0..=1.0).contains(&a));
    }
}

#[test]
fn noise_is_continuous_across_lattice_points() {
    let noise = NoiseSource {
        seed: 9,
        frequency: 1.0,
    };
    let before = noise.evaluate(2.0 - 1e-6);
    let at = noise.evaluate(2.0);
    assert!((before - at).abs() < 1e-3);
}

#[test]
fn noise_differs_between_seeds() {
    let a = NoiseSource {
        seed: 1,
        frequency: 1.0,
    };
    let b = NoiseSource {
        seed: 2,
        frequency: 1.0,
    };
    assert_ne!(a.evaluate(0.5), b.evaluate(0.5));
}

#[test]
fn random_holds_within_an_interval() {
    let random = RandomSource {
        seed: 77,
        frequency: 4.0,
    };
    assert_eq!(random.interval(0.26), random.interval(0.49));
    assert_eq!(random.evaluate(0.26), random.evaluate(0.49));
    assert_ne!(random.interval(0.24), random.interval(0.26));
}

#[test]
fn only_random_is_stepped() {
    assert!(Source::Random(RandomSource::default()).is_stepped());
    assert!(!Source::Noise(NoiseSource::default()).is_stepped());
    assert!(!Source::Oscillator(OscillatorSource::default()).is_stepped());
    assert!(!unit_pan(Axis::Vertical).is_stepped());
}

#[test]
fn non_positive_frequency_is_rejected() {
    for frequency in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        let src = Source::Noise(NoiseSource { seed: 0, frequency });
        let err = src.validate().unwrap_err();
        assert!(err.to_string().contains("noise frequency"));
    }
}

#[test]
fn serde_uses_kind_and_params() {
    let src = Source::Random(RandomSource {
        seed: 5,
        frequency: 2.0,
    });
    let json = serde_json::to_value(src).unwrap();
    assert_eq!(json["kind"], "Random");
    assert_eq!(json["params"]["seed"], 5);
    let back: Source = serde_json::from_value(json).unwrap();
    assert_eq!(back, src);
}
