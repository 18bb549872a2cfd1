//! JSONL transcript writer for reasoning exchanges.
//!
//! Each [`ConversationEvent`] becomes one JSON line carrying its payload plus
//! `type` and `timestamp` fields.

use chrono::Local;
use coscientist_application::{ConversationEvent, ConversationLogger};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL conversation logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create conversation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not create conversation log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Create `research_transcript_<timestamp>.jsonl` inside `directory`.
    pub fn in_directory(directory: impl AsRef<Path>) -> Option<Self> {
        let name = format!(
            "research_transcript_{}.jsonl",
            Local::now().format("%Y%m%d_%H%M%S")
        );
        Self::new(directory.as_ref().join(name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        // Build the record: merge payload with type + timestamp
        let record = if let serde_json::Value::Object(mut map) = event.payload {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(event.event_type.to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
            serde_json::Value::Object(map)
        } else {
            serde_json::json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": event.payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // A crashed run still leaves every completed exchange on disk
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coscientist_domain::{AgentRole, HypothesisId};

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_exchange() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        let id = HypothesisId::new("H-0002");
        logger.log(ConversationEvent::exchange(
            AgentRole::Reflection,
            Some(&id),
            "Review this hypothesis",
            "Strengths: clear mechanism",
        ));
        logger.log(ConversationEvent::failure(
            AgentRole::Ranking,
            None,
            "Compare A and B",
            "Timeout",
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record["timestamp"].is_string());
        }

        assert_eq!(records[0]["type"], "reasoning_exchange");
        assert_eq!(records[0]["role"], "Reflection");
        assert_eq!(records[0]["hypothesis_id"], "H-0002");
        assert_eq!(records[0]["response"], "Strengths: clear mechanism");

        assert_eq!(records[1]["type"], "reasoning_failure");
        assert!(records[1]["hypothesis_id"].is_null());
        assert_eq!(records[1]["error"], "Timeout");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wrapped.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new("note", serde_json::json!([1, 2])));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "note");
        assert_eq!(records[0]["data"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_in_directory_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs").join("transcripts");
        let logger = JsonlConversationLogger::in_directory(&nested).unwrap();

        assert!(logger.path().starts_with(&nested));
        let name = logger.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("research_transcript_"));
        assert!(name.ends_with(".jsonl"));
    }
}
