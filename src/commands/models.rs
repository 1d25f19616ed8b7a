use crate::parser::RecordFormat;
use std::path::PathBuf;

/// Arguments shared by the parse, serialize and summarize commands
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ChartArgs {
    /// Extracted `.bin` chart
    pub bin_file: PathBuf,

    /// Record layout of the chart
    pub format: RecordFormat,

    /// Write here instead of stdout
    pub output: Option<PathBuf>,
}

impl Default for ChartArgs {
    fn default() -> Self {
        Self {
            bin_file: PathBuf::new(),
            format: RecordFormat::New,
            output: None,
        }
    }
}
