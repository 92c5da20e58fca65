use crate::signal::{context::EvaluationContext, source::Source};

/// One evaluated value of a signal stream.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sample {
    /// Local time of the sample, in seconds.
    pub time: f64,
    /// Raw source output, nominally in `[0, 1]`.
    pub value: f32,
    /// Whether consumers should smooth between the previous sample and this one.
    pub interpolate: bool,
}

/// Tracks consecutive samples of one stream to derive the interpolate flag.
///
/// Stepped sources report `interpolate = false` when the raw value repeats the
/// previous one, so a held step is not drawn as a ramp. Continuous sources
/// always interpolate.
#[derive(Clone, Copy, Debug, Default)]
pub struct SignalSampler {
    previous: Option<f32>,
}

impl SignalSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate `source` and update the stream state. `None` leaves the state
    /// untouched, so the next value is compared against the last one seen.
    pub fn sample(
        &mut self,
        source: &Source,
        ctx: &EvaluationContext,
        local_time: f64,
    ) -> Option<Sample> {
        let value = source.evaluate(ctx, local_time)?;
        Some(self.push(source.is_stepped(), local_time, value))
    }

    pub fn push(&mut self, stepped: bool, time: f64, value: f32) -> Sample {
        let interpolate = !stepped || self.previous != Some(value);
        self.previous = Some(value);
        Sample {
            time,
            value,
            interpolate,
        }
    }

    pub fn last_value(&self) -> Option<f32> {
        self.previous
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}

/// Sample `source` over `[0, duration]` at `base.sampling_rate`.
///
/// Time-based sources ignore `base.elapsed`; pan sources read
/// `base.pan_location` and produce no samples without one. A non-finite
/// `duration` yields no samples.
pub fn preview(source: &Source, base: &EvaluationContext, duration: f64) -> Vec<Sample> {
    if !duration.is_finite() {
        return Vec::new();
    }
    let rate = f64::from(base.sampling_rate.max(1));
    let steps = (duration.max(0.0) * rate).round() as usize;
    let mut sampler = SignalSampler::new();
    (0..=steps)
        .filter_map(|i| {
            let t = i as f64 / rate;
            sampler.sample(source, &base.with_elapsed(t), t)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/signal/sampler.rs"]
mod tests;
