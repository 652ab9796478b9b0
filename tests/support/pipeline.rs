use std::sync::Arc;

use dca_pipeline::domain::ArchiveLocation;
use dca_pipeline::infrastructure::bootstrap::{Pipeline, Services};
use dca_pipeline::infrastructure::config::Config;
use dca_pipeline::testkit::doubles::{
    RecordingArchive, RecordingJobLauncher, RecordingQueue, StaticCredentials,
};

/// One order, enabled, on Kraken.
pub const SINGLE_ORDER: &str = r#"{
    "orders": [
        {
            "exchange": "kraken",
            "pair": "BTCGBP",
            "direction": "buy",
            "ordertype": "market",
            "volume": "0.0001",
            "validate": false,
            "enabled": true
        }
    ]
}"#;

/// A pipeline wired to recording doubles, with handles kept for assertions.
pub struct Harness {
    pub archive: Arc<RecordingArchive>,
    pub queue: Arc<RecordingQueue>,
    pub jobs: Arc<RecordingJobLauncher>,
    pub credentials: Arc<StaticCredentials>,
    pub pipeline: Pipeline,
}

impl Harness {
    pub fn new(config: Config) -> Self {
        Self::with_credentials(config, StaticCredentials::new())
    }

    pub fn with_credentials(config: Config, credentials: StaticCredentials) -> Self {
        let archive = Arc::new(RecordingArchive::new());
        let queue = Arc::new(RecordingQueue::new());
        let jobs = Arc::new(RecordingJobLauncher::new());
        let credentials = Arc::new(credentials);

        let services = Services {
            archive: archive.clone(),
            queue: queue.clone(),
            jobs: jobs.clone(),
            credentials: credentials.clone(),
        };

        Self {
            archive,
            queue,
            jobs,
            credentials,
            pipeline: Pipeline::new(config, services),
        }
    }

    /// Store the order document where the pipeline will look for it.
    pub fn seed_orders(&self, document: &str) {
        let location: ArchiveLocation = self.pipeline.config().order_document();
        self.archive.insert(location, document.as_bytes().to_vec());
    }
}
