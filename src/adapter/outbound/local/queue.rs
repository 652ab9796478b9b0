//! Spool-directory message queue.
//!
//! Each message is one JSON file named `{sequence}-{uuid}.json`. The
//! sequence is a microsecond timestamp bumped past the last one issued in
//! this process, so a sorted directory listing is enqueue order. Receiving does not hide messages;
//! a message stays visible until deleted.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::port::{MessageQueue, OutgoingMessage, QueueMessage};

const MESSAGE_EXTENSION: &str = "json";

static LAST_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Strictly increasing spool sequence shared by every queue in the process.
fn next_sequence() -> u64 {
    let now = u64::try_from(Utc::now().timestamp_micros()).unwrap_or_default();
    let mut issued = now;
    let _ = LAST_SEQUENCE.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        issued = now.max(last + 1);
        Some(issued)
    });
    issued
}

#[derive(Debug, Serialize, Deserialize)]
struct SpoolEnvelope {
    message_id: String,
    sent_at: i64,
    body: String,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
}

/// Queue backed by a directory of message files.
#[derive(Debug, Clone)]
pub struct SpoolQueue {
    url: String,
    dir: PathBuf,
}

impl SpoolQueue {
    /// Create a queue identified by `url` whose messages live in `dir`.
    pub fn new(url: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            dir: dir.into(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn message_files(&self) -> Result<Vec<String>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(queue_error(&self.dir, &e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| queue_error(&self.dir, &e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(MESSAGE_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

fn queue_error(path: &Path, error: &std::io::Error) -> Error {
    Error::Queue(format!("{}: {error}", path.display()))
}

#[async_trait]
impl MessageQueue for SpoolQueue {
    async fn send_message(&self, message: OutgoingMessage) -> Result<String> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| queue_error(&self.dir, &e))?;

        let message_id = Uuid::new_v4().to_string();
        let sent_at = Utc::now().timestamp_millis();
        let envelope = SpoolEnvelope {
            message_id: message_id.clone(),
            sent_at,
            body: message.body,
            attributes: message.attributes,
        };

        let name = format!("{:020}-{message_id}.{MESSAGE_EXTENSION}", next_sequence());
        let path = self.dir.join(&name);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, serde_json::to_vec(&envelope)?)
            .await
            .map_err(|e| queue_error(&temp_path, &e))?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| queue_error(&path, &e))?;

        debug!(queue = %self.url, message_id = %message_id, "Spooled message");
        Ok(message_id)
    }

    async fn receive_messages(&self, max_messages: usize) -> Result<Vec<QueueMessage>> {
        let mut messages = Vec::new();
        for name in self.message_files().await?.into_iter().take(max_messages) {
            let path = self.dir.join(&name);
            let bytes = fs::read(&path).await.map_err(|e| queue_error(&path, &e))?;
            let envelope: SpoolEnvelope = serde_json::from_slice(&bytes)
                .map_err(|e| Error::Queue(format!("{}: invalid envelope: {e}", path.display())))?;

            messages.push(QueueMessage {
                message_id: envelope.message_id,
                receipt_handle: name,
                source: self.url.clone(),
                body: envelope.body,
                attributes: envelope.attributes,
            });
        }
        debug!(queue = %self.url, count = messages.len(), "Received messages");
        Ok(messages)
    }

    async fn delete_message(&self, message: &QueueMessage) -> Result<()> {
        let handle = Path::new(&message.receipt_handle);
        if handle.file_name() != Some(handle.as_os_str()) {
            return Err(Error::Queue(format!(
                "invalid receipt handle for message {}",
                message.message_id
            )));
        }

        let path = self.dir.join(handle);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(message_id = %message.message_id, "Message already deleted");
                Ok(())
            }
            Err(e) => Err(queue_error(&path, &e)),
        }
    }
}
