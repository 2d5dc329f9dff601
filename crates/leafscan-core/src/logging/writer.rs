//! Append-only JSONL file writer.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::entry::JsonLogEntry;

/// Appends entries to `<logs_dir>/<date>_<instance>.jsonl`.
pub struct DiagnosticsWriter {
    instance: String,
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl DiagnosticsWriter {
    pub fn new(logs_dir: impl AsRef<Path>, instance: impl Into<String>) -> std::io::Result<Self> {
        let instance = instance.into();
        let logs_dir = logs_dir.as_ref();
        fs::create_dir_all(logs_dir)?;

        let date = chrono::Local::now().format("%Y-%m-%d");
        let path = logs_dir.join(format!("{}_{}.jsonl", date, instance));

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            instance,
            writer: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one entry and flush, so a crash never loses a recorded failure.
    pub fn write(&self, entry: &JsonLogEntry) -> std::io::Result<()> {
        let json = entry
            .to_json_line()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let mut writer = self.writer.lock();
        writeln!(writer, "{}", json)?;
        writer.flush()
    }
}

impl Drop for DiagnosticsWriter {
    fn drop(&mut self) {
        let _ = self.writer.lock().flush();
    }
}

/// Read back every entry in a JSONL file, skipping lines that fail to parse.
pub fn read_entries(path: impl AsRef<Path>) -> std::io::Result<Vec<JsonLogEntry>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match JsonLogEntry::from_json_line(line) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping unreadable log line: {}", e);
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writer_appends_lines() {
        let temp = TempDir::new().unwrap();
        let writer = DiagnosticsWriter::new(temp.path().join("logs"), "cli").unwrap();

        writer.write(&JsonLogEntry::new("warn", "cli", "t", "first")).unwrap();
        writer.write(&JsonLogEntry::new("error", "cli", "t", "second")).unwrap();

        let name = writer.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.ends_with("_cli.jsonl"));

        let entries = read_entries(writer.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].msg, "second");
    }

    #[test]
    fn test_reopen_appends() {
        let temp = TempDir::new().unwrap();
        let path = {
            let writer = DiagnosticsWriter::new(temp.path(), "desktop").unwrap();
            writer.write(&JsonLogEntry::new("error", "desktop", "t", "one")).unwrap();
            writer.path().to_path_buf()
        };
        let writer = DiagnosticsWriter::new(temp.path(), "desktop").unwrap();
        writer.write(&JsonLogEntry::new("error", "desktop", "t", "two")).unwrap();

        assert_eq!(read_entries(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_read_skips_garbage() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mixed.jsonl");
        let good = JsonLogEntry::new("error", "cli", "t", "ok").to_json_line().unwrap();
        std::fs::write(&path, format!("{good}\nnot json\n\n")).unwrap();

        assert_eq!(read_entries(&path).unwrap().len(), 1);
    }
}
