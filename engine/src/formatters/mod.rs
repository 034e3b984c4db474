// Currency formatters for display
pub mod yen;

pub use yen::{decompose, format, format_axis_label, YenFormatter};
