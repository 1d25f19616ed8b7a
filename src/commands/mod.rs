//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod parse;
pub mod serialize;
pub mod summarize;
pub mod utils;

// Re-export main command functions
pub use models::ChartArgs;
pub use parse::execute_parse;
pub use serialize::execute_serialize;
pub use summarize::execute_summarize;
pub use utils::{display_schema, display_version, load_chart, validate_args, validate_summary_file};
