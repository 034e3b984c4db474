pub mod models;
pub mod utils;

// Shared between the display engine and any host UI layer:
// models.rs holds the formatter output types, utils.rs the ja-JP digit grouping.
