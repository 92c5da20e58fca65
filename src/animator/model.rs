use crate::{
    foundation::core::AnimatorId,
    foundation::error::AnimatorResult,
    signal::{context::EvaluationContext, source::Source},
};

/// A named signal source with identity, owned by an [`AnimatorRegistry`].
///
/// [`AnimatorRegistry`]: crate::AnimatorRegistry
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Animator {
    pub id: AnimatorId,
    pub name: String,
    pub source: Source,
    /// Driver time at which this animator's local clock reads zero.
    #[serde(default)]
    pub time_origin: f64,
}

impl Animator {
    pub(crate) fn new(id: AnimatorId, name: String, source: Source) -> Self {
        Self {
            id,
            name,
            source,
            time_origin: 0.0,
        }
    }

    /// Local time for a driver context.
    pub fn local_time(&self, ctx: &EvaluationContext) -> f64 {
        ctx.elapsed - self.time_origin
    }

    pub fn evaluate(&self, ctx: &EvaluationContext) -> Option<f32> {
        self.source.evaluate(ctx, self.local_time(ctx))
    }

    pub fn validate(&self) -> AnimatorResult<()> {
        self.source.validate()
    }
}
