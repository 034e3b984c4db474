// Easing curves used by the count-up animator
pub mod ease_out_cubic;
pub mod ease_out_quart;
pub mod linear;

use crate::error::{DisplayError, Result};
use serde_json::Value;

pub use ease_out_cubic::EaseOutCubic;
pub use ease_out_quart::EaseOutQuart;
pub use linear::Linear;

// Common trait for all easing curves
pub trait EasingCurve: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value;
    /// Maps progress in [0, 1] to an eased value in [0, 1].
    ///
    /// Implementations clamp their input and must be non-decreasing with
    /// `ease(0.0) == 0.0` and `ease(1.0) == 1.0`.
    fn ease(&self, progress: f64) -> f64;
}

/// Resolves an easing curve by its configuration name.
pub fn from_name(name: &str) -> Result<Box<dyn EasingCurve>> {
    match name.trim().to_ascii_lowercase().as_str() {
        ease_out_quart::NAME => Ok(Box::new(EaseOutQuart)),
        ease_out_cubic::NAME => Ok(Box::new(EaseOutCubic)),
        linear::NAME => Ok(Box::new(Linear)),
        other => Err(DisplayError::ConfigError(format!(
            "Unknown easing '{}', expected one of: {}, {}, {}",
            other,
            ease_out_quart::NAME,
            ease_out_cubic::NAME,
            linear::NAME
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_curves() -> Vec<Box<dyn EasingCurve>> {
        vec![Box::new(EaseOutQuart), Box::new(EaseOutCubic), Box::new(Linear)]
    }

    #[test]
    fn test_curve_boundaries() {
        for curve in all_curves() {
            assert_eq!(curve.ease(0.0), 0.0, "{} at 0", curve.name());
            assert_eq!(curve.ease(1.0), 1.0, "{} at 1", curve.name());
            // Out-of-range progress is clamped.
            assert_eq!(curve.ease(-0.5), 0.0, "{} below 0", curve.name());
            assert_eq!(curve.ease(3.0), 1.0, "{} above 1", curve.name());
        }
    }

    #[test]
    fn test_curves_monotonic() {
        for curve in all_curves() {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = curve.ease(i as f64 / 100.0);
                assert!(v >= prev, "{} not monotonic at step {}", curve.name(), i);
                prev = v;
            }
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(from_name("ease-out-quart").unwrap().name(), "ease-out-quart");
        assert_eq!(from_name(" Ease-Out-Cubic ").unwrap().name(), "ease-out-cubic");
        assert_eq!(from_name("linear").unwrap().name(), "linear");
        assert!(matches!(from_name("bounce"), Err(DisplayError::ConfigError(_))));
    }
}
