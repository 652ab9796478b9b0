//! Port doubles that record every call.
//!
//! Each double keeps its state behind a mutex so tests can hold an `Arc` to
//! it, hand a clone to the code under test, and inspect calls afterwards.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{ArchiveLocation, DcaOrderSpec, JobRunId, SettledOrder, SubmitOutcome, TransactionId};
use crate::error::{Error, Result};
use crate::port::{ArchiveStore, CredentialStore, JobLauncher, MessageQueue, Orderer, OutgoingMessage, QueueMessage};

/// In-memory archive that records every write.
#[derive(Default)]
pub struct RecordingArchive {
    objects: Mutex<HashMap<ArchiveLocation, Vec<u8>>>,
    puts: Mutex<Vec<(ArchiveLocation, Vec<u8>)>>,
    fail_puts: AtomicBool,
}

impl RecordingArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object without recording a write.
    pub fn insert(&self, location: ArchiveLocation, bytes: Vec<u8>) {
        self.objects.lock().insert(location, bytes);
    }

    /// Every write, in call order.
    pub fn puts(&self) -> Vec<(ArchiveLocation, Vec<u8>)> {
        self.puts.lock().clone()
    }

    /// Current object at `location`.
    pub fn object(&self, location: &ArchiveLocation) -> Option<Vec<u8>> {
        self.objects.lock().get(location).cloned()
    }

    /// Make every subsequent write fail.
    pub fn fail_puts(&self) {
        self.fail_puts.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ArchiveStore for RecordingArchive {
    async fn put_object(&self, location: &ArchiveLocation, bytes: Vec<u8>) -> Result<()> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(Error::Archive {
                location: location.to_string(),
                reason: "write refused".to_string(),
            });
        }
        self.puts.lock().push((location.clone(), bytes.clone()));
        self.objects.lock().insert(location.clone(), bytes);
        Ok(())
    }

    async fn get_object(&self, location: &ArchiveLocation) -> Result<Vec<u8>> {
        self.object(location).ok_or_else(|| Error::Archive {
            location: location.to_string(),
            reason: "object not found".to_string(),
        })
    }
}

/// In-memory queue that records sends and deletes.
#[derive(Default)]
pub struct RecordingQueue {
    incoming: Mutex<VecDeque<QueueMessage>>,
    sent: Mutex<Vec<OutgoingMessage>>,
    deleted: Mutex<Vec<String>>,
    next_id: AtomicUsize,
    fail_sends: AtomicBool,
}

impl RecordingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make messages available to `receive_messages`.
    pub fn push_incoming(&self, messages: Vec<QueueMessage>) {
        self.incoming.lock().extend(messages);
    }

    /// Move every sent message onto the receive side, as a real queue would
    /// deliver it.
    pub fn deliver_sent(&self) {
        let sent = self.sent.lock().clone();
        let mut incoming = self.incoming.lock();
        for (index, message) in sent.into_iter().enumerate() {
            incoming.push_back(QueueMessage {
                message_id: format!("msg-{}", index + 1),
                receipt_handle: format!("receipt-{}", index + 1),
                source: "recording-queue".to_string(),
                body: message.body,
                attributes: message.attributes,
            });
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().clone()
    }

    /// Ids of deleted messages, in call order.
    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().clone()
    }

    /// Make every subsequent send fail.
    pub fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl MessageQueue for RecordingQueue {
    async fn send_message(&self, message: OutgoingMessage) -> Result<String> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(Error::Queue("send refused".to_string()));
        }
        self.sent.lock().push(message);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("msg-{id}"))
    }

    async fn receive_messages(&self, max_messages: usize) -> Result<Vec<QueueMessage>> {
        let mut incoming = self.incoming.lock();
        let count = max_messages.min(incoming.len());
        Ok(incoming.drain(..count).collect())
    }

    async fn delete_message(&self, message: &QueueMessage) -> Result<()> {
        self.deleted.lock().push(message.message_id.clone());
        Ok(())
    }
}

/// Job launcher that records runs instead of starting them.
#[derive(Default)]
pub struct RecordingJobLauncher {
    runs: Mutex<Vec<(String, BTreeMap<String, String>)>>,
    fail_runs: AtomicBool,
}

impl RecordingJobLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Job name and arguments of every run, in call order.
    pub fn runs(&self) -> Vec<(String, BTreeMap<String, String>)> {
        self.runs.lock().clone()
    }

    pub fn fail_runs(&self) {
        self.fail_runs.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl JobLauncher for RecordingJobLauncher {
    async fn start_job_run(
        &self,
        job_name: &str,
        arguments: &BTreeMap<String, String>,
    ) -> Result<JobRunId> {
        if self.fail_runs.load(Ordering::SeqCst) {
            return Err(Error::JobSubmission {
                job: job_name.to_string(),
                reason: "run refused".to_string(),
            });
        }
        let mut runs = self.runs.lock();
        runs.push((job_name.to_string(), arguments.clone()));
        Ok(JobRunId::new(format!("jr-{}", runs.len())))
    }
}

/// Credential store with fixed values that records lookups.
#[derive(Default)]
pub struct StaticCredentials {
    values: HashMap<String, String>,
    requests: Mutex<Vec<(String, bool)>>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, path: &str, value: &str) -> Self {
        self.values.insert(path.to_string(), value.to_string());
        self
    }

    /// Path and decrypt flag of every lookup, in call order.
    pub fn requests(&self) -> Vec<(String, bool)> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl CredentialStore for StaticCredentials {
    async fn get_parameter(&self, path: &str, decrypt: bool) -> Result<String> {
        self.requests.lock().push((path.to_string(), decrypt));
        self.values.get(path).cloned().ok_or_else(|| Error::Credential {
            path: path.to_string(),
            reason: "parameter not found".to_string(),
        })
    }
}

/// Orderer that replays scripted results.
///
/// Once a script runs out, submissions report `Skipped` and queries return
/// no settlements.
pub struct ScriptedOrderer {
    name: &'static str,
    submissions: Mutex<VecDeque<Result<SubmitOutcome>>>,
    settlements: Mutex<VecDeque<Result<Vec<SettledOrder>>>>,
    submitted_specs: Mutex<Vec<DcaOrderSpec>>,
    queried_ids: Mutex<Vec<Vec<TransactionId>>>,
}

impl ScriptedOrderer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            submissions: Mutex::new(VecDeque::new()),
            settlements: Mutex::new(VecDeque::new()),
            submitted_specs: Mutex::new(Vec::new()),
            queried_ids: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_submissions(self, submissions: Vec<Result<SubmitOutcome>>) -> Self {
        self.submissions.lock().extend(submissions);
        self
    }

    #[must_use]
    pub fn with_settlements(self, settlements: Vec<Result<Vec<SettledOrder>>>) -> Self {
        self.settlements.lock().extend(settlements);
        self
    }

    pub fn submitted_specs(&self) -> Vec<DcaOrderSpec> {
        self.submitted_specs.lock().clone()
    }

    pub fn queried_ids(&self) -> Vec<Vec<TransactionId>> {
        self.queried_ids.lock().clone()
    }
}

#[async_trait]
impl Orderer for ScriptedOrderer {
    async fn submit_order(&self, spec: &DcaOrderSpec) -> Result<SubmitOutcome> {
        self.submitted_specs.lock().push(spec.clone());
        self.submissions
            .lock()
            .pop_front()
            .unwrap_or(Ok(SubmitOutcome::Skipped))
    }

    async fn query_orders(&self, transaction_ids: &[TransactionId]) -> Result<Vec<SettledOrder>> {
        self.queried_ids.lock().push(transaction_ids.to_vec());
        self.settlements
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn exchange_name(&self) -> &'static str {
        self.name
    }
}
