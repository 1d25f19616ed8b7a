//! Chart Studio
//!
//! Decoding, serialization and summaries for extracted rhythm-game `.bin`
//! chart files.
//!
//! The pipeline is:
//! 1. [`parser`] decodes fixed-size records into [`parser::DecodedEvent`]s
//! 2. [`aggregator::build_timeline`] folds them into a timestamp-ordered timeline
//! 3. [`aggregator::summarize`] computes note counts, BPM profile, duration
//!    and timing-window classification
//!
//! Steps 2 and 3 both borrow the decoded event list and are independent.
//!
//! ## Getting Started
//!
//! ```bash
//! cargo install chart-studio
//! chart-studio summarize --bin-file charts/song_op.bin --format new
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
