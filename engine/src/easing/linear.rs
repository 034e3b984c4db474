use super::EasingCurve;
use serde_json::Value;

pub(crate) const NAME: &str = "linear";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Linear;

impl EasingCurve for Linear {
    fn name(&self) -> &str {
        NAME
    }

    fn parameters(&self) -> Value {
        serde_json::json!({})
    }

    #[inline]
    fn ease(&self, progress: f64) -> f64 {
        progress.clamp(0.0, 1.0)
    }
}
