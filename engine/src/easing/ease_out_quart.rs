// Ease-out-quartic curve: f(p) = 1 - (1 - p)^4
use super::EasingCurve;
use serde_json::Value;

pub(crate) const NAME: &str = "ease-out-quart";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EaseOutQuart;

impl EasingCurve for EaseOutQuart {
    fn name(&self) -> &str {
        NAME
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "exponent": 4 })
    }

    #[inline]
    fn ease(&self, progress: f64) -> f64 {
        let inv = 1.0 - progress.clamp(0.0, 1.0);
        1.0 - inv * inv * inv * inv
    }
}
