use std::{f64::consts::TAU, fmt};

use crate::{
    foundation::core::Point,
    foundation::error::{AnimatorError, AnimatorResult},
    foundation::math::{hash01, lattice_index, smoothstep},
    signal::{context::EvaluationContext, ease::Ease},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl Axis {
    fn component(self, p: Point) -> f64 {
        match self {
            Self::Horizontal => p.x,
            Self::Vertical => p.y,
        }
    }
}

/// Gesture-driven source: the pan location projected onto one axis of a
/// normalized rectangle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanSource {
    pub axis: Axis,
    pub bottom_left: Point,
    pub top_right: Point,
}

impl PanSource {
    pub fn evaluate(&self, ctx: &EvaluationContext) -> Option<f32> {
        let location = ctx.pan_location?;
        let lo = self.axis.component(self.bottom_left);
        let hi = self.axis.component(self.top_right);
        let extent = hi - lo;
        if extent == 0.0 || !extent.is_finite() {
            return None;
        }
        let t = (self.axis.component(location) - lo) / extent;
        if !t.is_finite() {
            return None;
        }
        Some(t.clamp(0.0, 1.0) as f32)
    }

    fn validate(&self) -> AnimatorResult<()> {
        let lo = self.axis.component(self.bottom_left);
        let hi = self.axis.component(self.top_right);
        if !lo.is_finite() || !hi.is_finite() {
            return Err(AnimatorError::validation("Pan bounds must be finite"));
        }
        if lo == hi {
            return Err(AnimatorError::validation(
                "Pan bounds must have non-zero extent on the configured axis",
            ));
        }
        Ok(())
    }
}

impl Default for PanSource {
    fn default() -> Self {
        Self {
            axis: Axis::Horizontal,
            bottom_left: Point::new(0.0, 0.0),
            top_right: Point::new(1.0, 1.0),
        }
    }
}

/// Sine oscillator remapped to `[0, 1]` and shaped by `ease`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OscillatorSource {
    pub frequency: f32,
    pub ease: Ease,
}

impl OscillatorSource {
    pub fn evaluate(&self, t: f64) -> f32 {
        let phase = TAU * f64::from(self.frequency) * t;
        let raw = 0.5 + 0.5 * phase.sin();
        self.ease.apply(raw as f32)
    }
}

impl Default for OscillatorSource {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            ease: Ease::Linear,
        }
    }
}

/// Seeded 1D value noise, smoothly blended between lattice points.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NoiseSource {
    pub seed: u32,
    pub frequency: f32,
}

impl NoiseSource {
    pub fn evaluate(&self, t: f64) -> f32 {
        let x = t * f64::from(self.frequency);
        let i0 = lattice_index(x);
        let frac = (x - x.floor()) as f32;
        let a = hash01(self.seed, i0);
        let b = hash01(self.seed, i0.wrapping_add(1));
        a + (b - a) * smoothstep(frac)
    }
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: 1.0,
        }
    }
}

/// Seeded step signal: one new value per `1 / frequency` seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RandomSource {
    pub seed: u32,
    pub frequency: f32,
}

impl RandomSource {
    pub fn evaluate(&self, t: f64) -> f32 {
        hash01(self.seed, self.interval(t))
    }

    /// Index of the quantized interval containing `t`.
    pub fn interval(&self, t: f64) -> i64 {
        lattice_index(t * f64::from(self.frequency))
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: 1.0,
        }
    }
}

/// Tag of a [`Source`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SourceKind {
    Pan,
    Oscillator,
    Noise,
    Random,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pan => "pan",
            Self::Oscillator => "oscillator",
            Self::Noise => "noise",
            Self::Random => "random",
        };
        f.write_str(name)
    }
}

/// Signal generator driving an animator. Every variant outputs values in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "params")]
pub enum Source {
    Pan(PanSource),
    Oscillator(OscillatorSource),
    Noise(NoiseSource),
    Random(RandomSource),
}

impl Source {
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Pan(_) => SourceKind::Pan,
            Self::Oscillator(_) => SourceKind::Oscillator,
            Self::Noise(_) => SourceKind::Noise,
            Self::Random(_) => SourceKind::Random,
        }
    }

    /// Evaluate at `local_time` seconds on the animator's own clock.
    ///
    /// `None` means "no value": a pan source without a pan location, or a pan
    /// source with degenerate bounds. Callers hold the previous value.
    pub fn evaluate(&self, ctx: &EvaluationContext, local_time: f64) -> Option<f32> {
        match self {
            Self::Pan(pan) => pan.evaluate(ctx),
            Self::Oscillator(osc) => Some(osc.evaluate(local_time)),
            Self::Noise(noise) => Some(noise.evaluate(local_time)),
            Self::Random(random) => Some(random.evaluate(local_time)),
        }
    }

    /// Whether the signal holds constant values between discontinuities.
    pub fn is_stepped(&self) -> bool {
        matches!(self, Self::Random(_))
    }

    pub fn validate(&self) -> AnimatorResult<()> {
        match self {
            Self::Pan(pan) => pan.validate(),
            Self::Oscillator(OscillatorSource { frequency, .. })
            | Self::Noise(NoiseSource { frequency, .. })
            | Self::Random(RandomSource { frequency, .. }) => {
                if !frequency.is_finite() || *frequency <= 0.0 {
                    return Err(AnimatorError::validation(format!(
                        "{} frequency must be finite and > 0, got {frequency}",
                        self.kind()
                    )));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/signal/source.rs"]
mod tests;
