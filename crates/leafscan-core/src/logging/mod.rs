//! Logging setup and the JSONL diagnostics file.
//!
//! Console output goes through `tracing_subscriber::fmt`. Upload failures are
//! swallowed by the widget, so warnings and errors can also be appended to a
//! JSONL file for later inspection:
//!
//! ```text
//! <log_dir>/
//! ├── 2026-10-19_desktop.jsonl
//! └── 2026-10-19_cli.jsonl
//! ```
//!
//! ```bash
//! # Every failed upload
//! jq 'select(.msg == "Upload failed")' <log_dir>/*.jsonl
//! ```

pub mod entry;
pub mod layer;
pub mod writer;

pub use entry::JsonLogEntry;
pub use layer::{JsonlLayer, LoggingBuilder};
pub use writer::{read_entries, DiagnosticsWriter};
