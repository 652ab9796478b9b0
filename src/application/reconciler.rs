//! Settlement reconciliation: drain pending orders, archive their settled
//! state and hand each settlement to the downstream ingestion job.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::registry::OrdererRegistry;
use crate::domain::{ArchiveLocation, JobRunId, PendingOrderRecord};
use crate::error::{Error, Result};
use crate::port::outbound::queue::{ATTR_EXCHANGE, ATTR_REAL};
use crate::port::{ArchiveStore, JobLauncher, MessageQueue, QueueMessage};

/// Job argument naming the archived settlement to ingest.
pub const ARG_INPUT_PATH: &str = "--input_path";
/// Job argument selecting how the ingestion job writes rows.
pub const ARG_WRITE_OPERATION: &str = "--write_operation";
/// Job argument with extra constant columns, as a JSON object.
pub const ARG_ADDITIONAL_COLUMNS: &str = "--additional_columns";

/// Where settlements are archived and which job ingests them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilerSettings {
    pub bucket: String,
    pub processed_prefix: String,
    pub job_name: String,
    pub write_operation: String,
    /// URI scheme the ingestion job reads archive objects with.
    pub input_uri_scheme: String,
    /// Maximum messages taken from the queue per invocation.
    pub receive_batch_size: usize,
}

/// One archived settlement and the job run started for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettlementHandoff {
    pub transaction_id: String,
    pub exchange: String,
    pub location: String,
    pub job_run_id: String,
}

/// Summary of a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Messages received from the queue.
    pub received: usize,
    /// Messages dropped because they carried simulated orders.
    pub discarded: usize,
    /// Messages fully processed and deleted.
    pub processed: usize,
    pub settlements: Vec<SettlementHandoff>,
}

/// Reconciles pending orders with their exchanges.
pub struct TransactionReconciler {
    queue: Arc<dyn MessageQueue>,
    archive: Arc<dyn ArchiveStore>,
    jobs: Arc<dyn JobLauncher>,
    settings: ReconcilerSettings,
}

impl TransactionReconciler {
    pub fn new(
        queue: Arc<dyn MessageQueue>,
        archive: Arc<dyn ArchiveStore>,
        jobs: Arc<dyn JobLauncher>,
        settings: ReconcilerSettings,
    ) -> Self {
        Self {
            queue,
            archive,
            jobs,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &ReconcilerSettings {
        &self.settings
    }

    /// Arguments for the ingestion job run of one archived settlement.
    ///
    /// # Errors
    ///
    /// Fails only if the extra-columns object cannot be serialized.
    pub fn job_arguments(
        &self,
        location: &ArchiveLocation,
        exchange: &str,
    ) -> Result<BTreeMap<String, String>> {
        let mut columns = BTreeMap::new();
        columns.insert("exchange", exchange.to_lowercase());

        let mut arguments = BTreeMap::new();
        arguments.insert(
            ARG_INPUT_PATH.to_string(),
            location.uri(&self.settings.input_uri_scheme),
        );
        arguments.insert(
            ARG_WRITE_OPERATION.to_string(),
            self.settings.write_operation.clone(),
        );
        arguments.insert(
            ARG_ADDITIONAL_COLUMNS.to_string(),
            serde_json::to_string(&columns)?,
        );
        Ok(arguments)
    }

    /// Receive a batch of pending-order messages and reconcile each in turn.
    ///
    /// A message is deleted only after every settlement it produced has been
    /// archived and its job started, so an aborted pass leaves unfinished
    /// messages on the queue for redelivery.
    ///
    /// # Errors
    ///
    /// [`Error::NoMessages`] for an empty queue; otherwise the first
    /// malformed-message, unknown-exchange, query, archive, job or queue error.
    pub async fn reconcile(&self, registry: &OrdererRegistry) -> Result<ReconcileReport> {
        let messages = self
            .queue
            .receive_messages(self.settings.receive_batch_size)
            .await?;
        if messages.is_empty() {
            return Err(Error::NoMessages);
        }

        let mut report = ReconcileReport {
            received: messages.len(),
            ..ReconcileReport::default()
        };

        for message in &messages {
            info!(
                message_id = %message.message_id,
                source = %message.source,
                "Processing queue message"
            );

            if message.attribute(ATTR_REAL) == Some("false") {
                warn!(
                    message_id = %message.message_id,
                    source = %message.source,
                    "Received message for a simulated order, deleting"
                );
                self.queue.delete_message(message).await?;
                report.discarded += 1;
                continue;
            }

            let settlements = self.process_message(registry, message).await?;
            self.queue.delete_message(message).await?;
            debug!(message_id = %message.message_id, "Deleted processed message");

            report.processed += 1;
            report.settlements.extend(settlements);
        }

        info!(
            received = report.received,
            processed = report.processed,
            discarded = report.discarded,
            settlements = report.settlements.len(),
            "Reconciliation pass complete"
        );
        Ok(report)
    }

    async fn process_message(
        &self,
        registry: &OrdererRegistry,
        message: &QueueMessage,
    ) -> Result<Vec<SettlementHandoff>> {
        let exchange = message
            .attribute(ATTR_EXCHANGE)
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| Error::MalformedMessage {
                message_id: message.message_id.clone(),
                reason: "no exchange attribute set".to_string(),
            })?;

        let record: PendingOrderRecord = serde_json::from_str(&message.body)?;
        info!(
            exchange,
            transaction_id = %record.transaction_id,
            "Reconciling transaction"
        );

        let orderer = registry
            .get(exchange)
            .ok_or_else(|| Error::UnknownExchange(exchange.to_string()))?;
        let settled = orderer
            .query_orders(std::slice::from_ref(&record.transaction_id))
            .await?;
        debug!(count = settled.len(), "Settled orders returned");

        let mut handoffs = Vec::with_capacity(settled.len());
        for order in settled {
            if order.is_placeholder() {
                warn!(
                    exchange,
                    pair = %order.pair,
                    "Found an order with no transaction id, skipping"
                );
                continue;
            }

            let location = ArchiveLocation::new(
                self.settings.bucket.clone(),
                ArchiveLocation::transaction_key(
                    &self.settings.processed_prefix,
                    exchange,
                    &order.transaction_id,
                ),
            );
            self.archive
                .put_object(&location, serde_json::to_vec(&order)?)
                .await?;

            let arguments = self.job_arguments(&location, exchange)?;
            let run_id: JobRunId = self
                .jobs
                .start_job_run(&self.settings.job_name, &arguments)
                .await?;
            info!(
                transaction_id = %order.transaction_id,
                location = %location,
                run_id = %run_id,
                "Archived settlement and started ingestion job"
            );

            handoffs.push(SettlementHandoff {
                transaction_id: order.transaction_id.to_string(),
                exchange: exchange.to_lowercase(),
                location: location.to_string(),
                job_run_id: run_id.to_string(),
            });
        }
        Ok(handoffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SettledOrder, TransactionId};
    use crate::error::ExchangeError;
    use crate::testkit::doubles::{RecordingArchive, RecordingJobLauncher, RecordingQueue, ScriptedOrderer};
    use crate::testkit::domain::{pending_message, settled_order};

    struct Fixture {
        queue: Arc<RecordingQueue>,
        archive: Arc<RecordingArchive>,
        jobs: Arc<RecordingJobLauncher>,
    }

    impl Fixture {
        fn new(messages: Vec<QueueMessage>) -> Self {
            let queue = Arc::new(RecordingQueue::new());
            queue.push_incoming(messages);
            Self {
                queue,
                archive: Arc::new(RecordingArchive::new()),
                jobs: Arc::new(RecordingJobLauncher::new()),
            }
        }

        fn reconciler(&self) -> TransactionReconciler {
            TransactionReconciler::new(
                self.queue.clone(),
                self.archive.clone(),
                self.jobs.clone(),
                ReconcilerSettings {
                    bucket: "bucket".into(),
                    processed_prefix: "processed".into(),
                    job_name: "process-transactions".into(),
                    write_operation: "upsert".into(),
                    input_uri_scheme: "s3a".into(),
                    receive_batch_size: 10,
                },
            )
        }
    }

    fn registry_with(orderer: Arc<ScriptedOrderer>) -> OrdererRegistry {
        let mut registry = OrdererRegistry::new();
        registry.register("kraken", orderer);
        registry
    }

    #[tokio::test]
    async fn empty_queue_is_an_error() {
        let fixture = Fixture::new(Vec::new());
        let err = fixture
            .reconciler()
            .reconcile(&OrdererRegistry::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoMessages));
    }

    #[tokio::test]
    async fn simulated_messages_are_deleted_without_side_effects() {
        let fixture = Fixture::new(vec![pending_message("m-1", Some("kraken"), "false", "TX1")]);
        let orderer = Arc::new(ScriptedOrderer::new("kraken"));

        let report = fixture
            .reconciler()
            .reconcile(&registry_with(orderer.clone()))
            .await
            .unwrap();

        assert_eq!(report.discarded, 1);
        assert_eq!(report.processed, 0);
        assert_eq!(fixture.queue.deleted(), vec!["m-1".to_string()]);
        assert!(orderer.queried_ids().is_empty());
        assert!(fixture.archive.puts().is_empty());
        assert!(fixture.jobs.runs().is_empty());
    }

    #[tokio::test]
    async fn missing_exchange_names_the_message() {
        for exchange in [None, Some(""), Some("  ")] {
            let fixture = Fixture::new(vec![pending_message("m-7", exchange, "true", "TX1")]);

            let err = fixture
                .reconciler()
                .reconcile(&OrdererRegistry::new())
                .await
                .unwrap_err();

            assert!(matches!(err, Error::MalformedMessage { ref message_id, .. } if message_id == "m-7"));
            assert!(fixture.queue.deleted().is_empty());
        }
    }

    #[tokio::test]
    async fn unparseable_body_is_a_serialization_error() {
        let mut message = pending_message("m-1", Some("kraken"), "true", "TX1");
        message.body = "not json".into();
        let fixture = Fixture::new(vec![message]);

        let err = fixture
            .reconciler()
            .reconcile(&OrdererRegistry::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[tokio::test]
    async fn unknown_exchange_is_reported() {
        let fixture = Fixture::new(vec![pending_message("m-1", Some("binance"), "true", "TX1")]);
        let err = fixture
            .reconciler()
            .reconcile(&registry_with(Arc::new(ScriptedOrderer::new("kraken"))))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnknownExchange(ref name) if name == "binance"));
    }

    #[tokio::test]
    async fn settled_orders_are_archived_and_ingested() {
        let fixture = Fixture::new(vec![pending_message("m-1", Some("Kraken"), "true", "TX1")]);
        let orderer = Arc::new(
            ScriptedOrderer::new("kraken").with_settlements(vec![Ok(vec![settled_order("TX1")])]),
        );
        let mut registry = OrdererRegistry::new();
        registry.register("Kraken", orderer.clone());

        let report = fixture.reconciler().reconcile(&registry).await.unwrap();

        assert_eq!(orderer.queried_ids(), vec![vec![TransactionId::new("TX1")]]);

        let puts = fixture.archive.puts();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].0, ArchiveLocation::new("bucket", "processed/exchange=kraken/TX1.json"));
        let archived: SettledOrder = serde_json::from_slice(&puts[0].1).unwrap();
        assert_eq!(archived, settled_order("TX1"));

        let runs = fixture.jobs.runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].0, "process-transactions");
        assert_eq!(
            runs[0].1[ARG_INPUT_PATH],
            "s3a://bucket/processed/exchange=kraken/TX1.json"
        );
        assert_eq!(runs[0].1[ARG_WRITE_OPERATION], "upsert");
        assert_eq!(runs[0].1[ARG_ADDITIONAL_COLUMNS], r#"{"exchange":"kraken"}"#);

        assert_eq!(fixture.queue.deleted(), vec!["m-1".to_string()]);
        assert_eq!(report.processed, 1);
        assert_eq!(report.settlements.len(), 1);
        assert_eq!(report.settlements[0].exchange, "kraken");
    }

    #[tokio::test]
    async fn placeholder_settlements_are_skipped() {
        let fixture = Fixture::new(vec![pending_message("m-1", Some("kraken"), "true", "TX1")]);
        let orderer = Arc::new(ScriptedOrderer::new("kraken").with_settlements(vec![Ok(vec![
            settled_order(""),
            settled_order("TX1"),
        ])]));

        let report = fixture
            .reconciler()
            .reconcile(&registry_with(orderer))
            .await
            .unwrap();

        assert_eq!(fixture.archive.puts().len(), 1);
        assert_eq!(fixture.jobs.runs().len(), 1);
        assert_eq!(report.settlements[0].transaction_id, "TX1");
    }

    #[tokio::test]
    async fn message_with_no_settlements_is_still_deleted() {
        let fixture = Fixture::new(vec![pending_message("m-1", Some("kraken"), "true", "TX1")]);
        let orderer = Arc::new(ScriptedOrderer::new("kraken"));

        fixture
            .reconciler()
            .reconcile(&registry_with(orderer))
            .await
            .unwrap();

        assert!(fixture.archive.puts().is_empty());
        assert_eq!(fixture.queue.deleted(), vec!["m-1".to_string()]);
    }

    #[tokio::test]
    async fn job_failure_leaves_message_on_queue() {
        let fixture = Fixture::new(vec![pending_message("m-1", Some("kraken"), "true", "TX1")]);
        fixture.jobs.fail_runs();
        let orderer = Arc::new(
            ScriptedOrderer::new("kraken").with_settlements(vec![Ok(vec![settled_order("TX1")])]),
        );

        let err = fixture
            .reconciler()
            .reconcile(&registry_with(orderer))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::JobSubmission { .. }));
        assert_eq!(fixture.archive.puts().len(), 1);
        assert!(fixture.queue.deleted().is_empty());
    }

    #[tokio::test]
    async fn query_failure_aborts_remaining_messages() {
        let fixture = Fixture::new(vec![
            pending_message("m-1", Some("kraken"), "true", "TX1"),
            pending_message("m-2", Some("kraken"), "true", "TX2"),
        ]);
        let orderer = Arc::new(ScriptedOrderer::new("kraken").with_settlements(vec![Err(
            ExchangeError::Query("unavailable".into()).into(),
        )]));

        let err = fixture
            .reconciler()
            .reconcile(&registry_with(orderer.clone()))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Exchange(ExchangeError::Query(_))));
        assert_eq!(orderer.queried_ids().len(), 1);
        assert!(fixture.queue.deleted().is_empty());
    }

    #[tokio::test]
    async fn messages_are_processed_in_order() {
        let fixture = Fixture::new(vec![
            pending_message("m-1", Some("kraken"), "false", "TX0"),
            pending_message("m-2", Some("kraken"), "true", "TX1"),
            pending_message("m-3", Some("kraken"), "true", "TX2"),
        ]);
        let orderer = Arc::new(ScriptedOrderer::new("kraken").with_settlements(vec![
            Ok(vec![settled_order("TX1")]),
            Ok(vec![settled_order("TX2")]),
        ]));

        let report = fixture
            .reconciler()
            .reconcile(&registry_with(orderer))
            .await
            .unwrap();

        assert_eq!(report.received, 3);
        assert_eq!(report.discarded, 1);
        assert_eq!(report.processed, 2);
        assert_eq!(
            fixture.queue.deleted(),
            vec!["m-1".to_string(), "m-2".to_string(), "m-3".to_string()]
        );
    }
}
