use crate::{
    binding::property::AnimatableProperty,
    foundation::core::{AnimatorId, Lerp},
    foundation::error::{AnimatorError, AnimatorResult},
};

/// Link from a scalar property to an animator, by id.
///
/// The animator output `t` maps to `value_at_0 + t * (value_at_1 - value_at_0)`.
/// The remap is unclamped: outputs outside `[0, 1]` extrapolate.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimatorBinding {
    pub animator_id: AnimatorId,
    pub value_at_0: f32,
    pub value_at_1: f32,
}

impl AnimatorBinding {
    pub fn new(animator_id: AnimatorId, value_at_0: f32, value_at_1: f32) -> Self {
        Self {
            animator_id,
            value_at_0,
            value_at_1,
        }
    }

    /// Binding with the property's default range.
    pub fn with_default_range(animator_id: AnimatorId, property: AnimatableProperty) -> Self {
        let (value_at_0, value_at_1) = property.default_range();
        Self::new(animator_id, value_at_0, value_at_1)
    }

    pub fn remap(&self, t: f32) -> f32 {
        <f32 as Lerp>::lerp(&self.value_at_0, &self.value_at_1, t)
    }

    pub fn validate(&self) -> AnimatorResult<()> {
        if !self.value_at_0.is_finite() || !self.value_at_1.is_finite() {
            return Err(AnimatorError::validation(
                "binding values must be finite",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/binding/model.rs"]
mod tests;
