//! Tracing layer that mirrors warnings and errors into a JSONL file.

use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use super::entry::JsonLogEntry;
use super::writer::DiagnosticsWriter;

/// Writes events at or above `min_level` to a [`DiagnosticsWriter`].
pub struct JsonlLayer {
    writer: Arc<DiagnosticsWriter>,
    min_level: Level,
}

impl JsonlLayer {
    /// Defaults to recording `warn` and `error`.
    pub fn new(logs_dir: impl AsRef<Path>, instance: impl Into<String>) -> std::io::Result<Self> {
        Ok(Self {
            writer: Arc::new(DiagnosticsWriter::new(logs_dir, instance)?),
            min_level: Level::WARN,
        })
    }

    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    pub fn log_path(&self) -> &Path {
        self.writer.path()
    }
}

impl<S> Layer<S> for JsonlLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        // Level ordering: ERROR < WARN < ... < TRACE
        if *metadata.level() > self.min_level {
            return;
        }

        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let level = metadata.level().as_str().to_lowercase();
        let mut entry = JsonLogEntry::new(
            level,
            self.writer.instance(),
            metadata.target(),
            visitor.message.unwrap_or_default(),
        );
        if !visitor.fields.is_empty() {
            entry = entry.with_fields(serde_json::Value::Object(visitor.fields));
        }

        // Logging must never take the app down
        let _ = self.writer.write(&entry);
    }
}

#[derive(Default)]
struct JsonVisitor {
    message: Option<String>,
    fields: serde_json::Map<String, serde_json::Value>,
}

impl JsonVisitor {
    fn put(&mut self, field: &Field, value: serde_json::Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for JsonVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let mut buf = String::new();
        let _ = write!(&mut buf, "{:?}", value);
        if field.name() == "message" {
            self.message = Some(buf);
        } else {
            self.put(field, serde_json::Value::String(buf));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.put(field, serde_json::Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if let Some(n) = serde_json::Number::from_f64(value) {
            self.put(field, serde_json::Value::Number(n));
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.put(field, serde_json::Value::String(value.to_string()));
    }
}

/// Sets up console logging plus the optional JSONL diagnostics file.
pub struct LoggingBuilder {
    instance: String,
    verbosity: u8,
    logs_dir: Option<PathBuf>,
    default_directive: &'static str,
}

impl LoggingBuilder {
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            verbosity: 0,
            logs_dir: None,
            default_directive: "warn",
        }
    }

    /// Number of `-v` flags given.
    pub fn verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Level used when no `-v` is given (desktop defaults louder than CLI).
    pub fn default_level(mut self, directive: &'static str) -> Self {
        self.default_directive = directive;
        self
    }

    pub fn logs_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.logs_dir = dir;
        self
    }

    /// Filter directive for the configured verbosity. `RUST_LOG` wins if set.
    pub fn filter_directive(&self) -> &'static str {
        match self.verbosity {
            0 => self.default_directive,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Install the global subscriber. Returns the diagnostics file, if any.
    pub fn init(self) -> std::io::Result<Option<PathBuf>> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.filter_directive()));

        let jsonl = match &self.logs_dir {
            Some(dir) => Some(JsonlLayer::new(dir, &self.instance)?),
            None => None,
        };
        let path = jsonl.as_ref().map(|l| l.log_path().to_path_buf());

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(jsonl)
            .init();

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::read_entries;
    use tempfile::TempDir;

    #[test]
    fn test_layer_keeps_warnings_and_errors_only() {
        let temp = TempDir::new().unwrap();
        let layer = JsonlLayer::new(temp.path(), "test").unwrap();
        let log_path = layer.log_path().to_path_buf();

        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Image selected");
            tracing::warn!(count = 2, "Multiple files dropped, ignoring");
            tracing::error!(ticket = 7u64, error = "connection refused", "Upload failed");
        });

        let entries = read_entries(&log_path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, "warn");
        assert_eq!(entries[1].msg, "Upload failed");
        let fields = entries[1].fields.as_ref().unwrap();
        assert_eq!(fields["ticket"], 7);
        assert_eq!(fields["error"], "connection refused");
    }

    #[test]
    fn test_min_level_can_be_lowered() {
        let temp = TempDir::new().unwrap();
        let layer = JsonlLayer::new(temp.path(), "test")
            .unwrap()
            .with_min_level(Level::INFO);
        let log_path = layer.log_path().to_path_buf();

        tracing::subscriber::with_default(tracing_subscriber::registry().with(layer), || {
            tracing::info!("kept");
            tracing::debug!("dropped");
        });

        assert_eq!(read_entries(&log_path).unwrap().len(), 1);
    }

    #[test]
    fn test_verbosity_directives() {
        let b = LoggingBuilder::new("cli");
        assert_eq!(b.filter_directive(), "warn");
        assert_eq!(LoggingBuilder::new("cli").verbosity(1).filter_directive(), "info");
        assert_eq!(LoggingBuilder::new("cli").verbosity(2).filter_directive(), "debug");
        assert_eq!(LoggingBuilder::new("cli").verbosity(9).filter_directive(), "trace");
        assert_eq!(
            LoggingBuilder::new("desktop").default_level("info").filter_directive(),
            "info"
        );
    }
}
