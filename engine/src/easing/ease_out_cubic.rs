// Ease-out-cubic curve: f(p) = 1 - (1 - p)^3
use super::EasingCurve;
use serde_json::Value;

pub(crate) const NAME: &str = "ease-out-cubic";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EaseOutCubic;

impl EasingCurve for EaseOutCubic {
    fn name(&self) -> &str {
        NAME
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "exponent": 3 })
    }

    #[inline]
    fn ease(&self, progress: f64) -> f64 {
        let inv = 1.0 - progress.clamp(0.0, 1.0);
        1.0 - inv * inv * inv
    }
}
