use crate::foundation::core::Point;

/// Inputs for one evaluation tick or gesture sample.
///
/// Sources read only the fields they depend on: pan sources read
/// `pan_location`, time-based sources read `elapsed`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EvaluationContext {
    /// Driver sampling rate in Hz.
    pub sampling_rate: u32,
    /// Seconds since the driver's start event.
    pub elapsed: f64,
    /// Normalized pointer location, when a gesture is active.
    pub pan_location: Option<Point>,
}

impl EvaluationContext {
    pub const DEFAULT_SAMPLING_RATE: u32 = 60;

    pub fn new(sampling_rate: u32, elapsed: f64) -> Self {
        Self {
            sampling_rate,
            elapsed,
            pan_location: None,
        }
    }

    pub fn at(elapsed: f64) -> Self {
        Self::new(Self::DEFAULT_SAMPLING_RATE, elapsed)
    }

    pub fn with_elapsed(mut self, elapsed: f64) -> Self {
        self.elapsed = elapsed;
        self
    }

    pub fn with_pan(mut self, location: Point) -> Self {
        self.pan_location = Some(location);
        self
    }

    pub fn without_pan(mut self) -> Self {
        self.pan_location = None;
        self
    }
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self::at(0.0)
    }
}
