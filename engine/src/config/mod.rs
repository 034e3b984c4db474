// Display configuration
pub mod settings;

pub use settings::{AnimationSettings, DisplaySettings, SUPPORTED_LOCALE};
