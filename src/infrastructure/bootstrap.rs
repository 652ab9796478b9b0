//! Infrastructure bootstrap helpers for runtime wiring.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::config::Config;
use super::orderers::resolve_orderers;
use crate::adapter::outbound::local::{
    EnvCredentialStore, FileArchiveStore, LoggingJobLauncher, ProcessJobLauncher, SpoolQueue,
};
use crate::adapter::outbound::simulated::SimulatedOrderer;
use crate::application::{
    ArchiveConfigurationSource, OrderExecutor, OrdererRegistry, PendingOrderSubmitter,
    ReconcileReport, TransactionReconciler,
};
use crate::domain::{DcaOrderSpec, PendingOrderRecord};
use crate::error::{Error, Result};
use crate::port::{ArchiveStore, ConfigurationSource, CredentialStore, JobLauncher, MessageQueue};

/// The adapters one invocation runs against.
#[derive(Clone)]
pub struct Services {
    pub archive: Arc<dyn ArchiveStore>,
    pub queue: Arc<dyn MessageQueue>,
    pub jobs: Arc<dyn JobLauncher>,
    pub credentials: Arc<dyn CredentialStore>,
}

impl Services {
    /// Local adapters: filesystem archive, spool queue, environment
    /// credentials, and a process or logging job launcher.
    #[must_use]
    pub fn local(config: &Config) -> Self {
        let jobs: Arc<dyn JobLauncher> = match &config.job.command {
            Some(command) if !command.trim().is_empty() => {
                Arc::new(ProcessJobLauncher::new(command.clone()))
            }
            _ => Arc::new(LoggingJobLauncher),
        };

        Self {
            archive: Arc::new(FileArchiveStore::new(config.archive.root.clone())),
            queue: Arc::new(SpoolQueue::new(
                config.queue.url.clone(),
                config.queue.spool_dir.clone(),
            )),
            jobs,
            credentials: Arc::new(EnvCredentialStore::new()),
        }
    }
}

/// A configured pipeline ready to run either stage.
pub struct Pipeline {
    config: Config,
    services: Services,
}

impl Pipeline {
    pub fn new(config: Config, services: Services) -> Self {
        Self { config, services }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve exchange orderers from the credential store.
    ///
    /// # Errors
    ///
    /// Fails if any exchange credential is missing.
    pub async fn registry(&self) -> Result<OrdererRegistry> {
        resolve_orderers(self.services.credentials.as_ref(), &self.config.kraken).await
    }

    /// Load the configured orders.
    ///
    /// # Errors
    ///
    /// Fails if the order document is missing or invalid.
    pub async fn load_orders(&self) -> Result<Vec<DcaOrderSpec>> {
        ArchiveConfigurationSource::new(self.services.archive.clone())
            .load_orders(&self.config.order_document())
            .await
    }

    #[must_use]
    pub fn executor(&self) -> OrderExecutor {
        let executor = OrderExecutor::new(
            self.services.archive.clone(),
            PendingOrderSubmitter::new(self.services.queue.clone()),
            self.config.executor_settings(),
        );
        if self.config.simulate {
            executor.simulate_with(Arc::new(SimulatedOrderer::new()))
        } else {
            executor
        }
    }

    #[must_use]
    pub fn reconciler(&self) -> TransactionReconciler {
        TransactionReconciler::new(
            self.services.queue.clone(),
            self.services.archive.clone(),
            self.services.jobs.clone(),
            self.config.reconciler_settings(),
        )
    }

    /// Run the execution stage.
    ///
    /// Simulated runs never touch the credential store.
    ///
    /// # Errors
    ///
    /// Returns the first error of the pass.
    pub async fn execute(&self) -> Result<Vec<PendingOrderRecord>> {
        let orders = self.load_orders().await?;
        let registry = if self.config.simulate {
            warn!("Simulate mode: no orders will reach an exchange");
            OrdererRegistry::new()
        } else {
            self.registry().await?
        };

        info!(orders = orders.len(), simulate = self.config.simulate, "Executing orders");
        self.executor().execute_orders(&registry, &orders).await
    }

    /// Run the reconciliation stage.
    ///
    /// # Errors
    ///
    /// Returns the first error of the pass, including
    /// [`Error::NoMessages`] for an empty queue.
    pub async fn reconcile(&self) -> Result<ReconcileReport> {
        let registry = self.registry().await?;
        self.reconciler().reconcile(&registry).await
    }
}

/// Run `task`, failing with [`Error::DeadlineExceeded`] if it outlives
/// `deadline_secs`. The task is dropped on expiry; completed steps stay done.
///
/// # Errors
///
/// Returns the task's own error or the deadline error.
pub async fn with_deadline<T, F>(deadline_secs: Option<u64>, task: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match deadline_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), task)
            .await
            .map_err(|_| Error::DeadlineExceeded(secs))?,
        None => task.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn deadline_passes_through_results() {
        let value = with_deadline(Some(5), async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn deadline_expiry_is_an_error() {
        let result: Result<()> = with_deadline(Some(1), async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(Error::DeadlineExceeded(1))));
    }
}
