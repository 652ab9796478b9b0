//! Orderer registry construction.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::kraken::{KrakenClient, KrakenConfig, KrakenCredentials, KrakenOrderer};
use crate::application::OrdererRegistry;
use crate::error::Result;
use crate::port::CredentialStore;

/// Registry key of the Kraken orderer.
pub const KRAKEN: &str = "kraken";

/// Fetch exchange credentials and build one orderer per supported exchange.
///
/// All credentials are fetched before any orderer is built; a single
/// missing parameter fails the whole call.
///
/// # Errors
///
/// Returns the credential store's error for the first parameter that cannot
/// be resolved.
pub async fn resolve_orderers(
    credentials: &dyn CredentialStore,
    kraken: &KrakenConfig,
) -> Result<OrdererRegistry> {
    let api_key = credentials.get_parameter(&kraken.key_parameter, true).await?;
    let secret = credentials
        .get_parameter(&kraken.secret_parameter, true)
        .await?;

    let client = KrakenClient::from_config(kraken, KrakenCredentials::new(api_key, secret));

    let mut registry = OrdererRegistry::new();
    registry.register(KRAKEN, Arc::new(KrakenOrderer::new(Arc::new(client))));

    info!(exchanges = ?registry.exchanges(), "Resolved orderers");
    Ok(registry)
}
