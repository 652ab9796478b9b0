//! Order configuration loaded from archival storage.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::{ArchiveLocation, DcaOrderSpec, OrderList};
use crate::error::{ConfigError, Result};
use crate::port::{ArchiveStore, ConfigurationSource};

/// Reads the `{"orders": [...]}` document through an [`ArchiveStore`].
pub struct ArchiveConfigurationSource {
    archive: Arc<dyn ArchiveStore>,
}

impl ArchiveConfigurationSource {
    pub fn new(archive: Arc<dyn ArchiveStore>) -> Self {
        Self { archive }
    }

    /// Parse and check an order document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OrderDocument`] for malformed JSON or an enabled
    /// order that fails validation. Disabled orders are never submitted and
    /// are not checked.
    pub fn parse(location: &ArchiveLocation, bytes: &[u8]) -> Result<Vec<DcaOrderSpec>> {
        let document_error = |reason: String| ConfigError::OrderDocument {
            location: location.to_string(),
            reason,
        };

        let list: OrderList =
            serde_json::from_slice(bytes).map_err(|e| document_error(e.to_string()))?;
        for (index, order) in list.orders.iter().enumerate().filter(|(_, o)| o.enabled) {
            order
                .ensure_valid()
                .map_err(|e| document_error(format!("order {index}: {e}")))?;
        }
        Ok(list.orders)
    }
}

#[async_trait]
impl ConfigurationSource for ArchiveConfigurationSource {
    async fn load_orders(&self, location: &ArchiveLocation) -> Result<Vec<DcaOrderSpec>> {
        let bytes = self.archive.get_object(location).await?;
        let orders = Self::parse(location, &bytes)?;
        info!(location = %location, count = orders.len(), "Loaded order configuration");
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
    use crate::error::Error;
    use crate::testkit::doubles::RecordingArchive;
    use rust_decimal_macros::dec;

    fn location() -> ArchiveLocation {
        ArchiveLocation::new("bucket", "config/dca.json")
    }

    #[tokio::test]
    async fn loads_orders_in_document_order() {
        let archive = Arc::new(RecordingArchive::new());
        archive.insert(
            location(),
            br#"{"orders": [
                {"exchange": "kraken", "pair": "BTCGBP", "direction": "buy", "ordertype": "market", "volume": "0.0001", "validate": false, "enabled": true},
                {"exchange": "kraken", "pair": "ETHGBP", "direction": "sell", "ordertype": "market", "volume": 0.5, "enabled": false}
            ]}"#
            .to_vec(),
        );

        let orders = ArchiveConfigurationSource::new(archive)
            .load_orders(&location())
            .await
            .unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].pair, "BTCGBP");
        assert_eq!(orders[0].volume, dec!(0.0001));
        assert_eq!(orders[1].direction, Direction::Sell);
        assert!(!orders[1].enabled);
    }

    #[tokio::test]
    async fn missing_document_is_an_archive_error() {
        let source = ArchiveConfigurationSource::new(Arc::new(RecordingArchive::new()));
        let err = source.load_orders(&location()).await.unwrap_err();
        assert!(matches!(err, Error::Archive { .. }));
    }

    #[test]
    fn malformed_json_is_an_order_document_error() {
        let err = ArchiveConfigurationSource::parse(&location(), b"{\"orders\": [").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::OrderDocument { ref location, .. }) if location == "bucket/config/dca.json"
        ));
    }

    #[test]
    fn invalid_order_is_rejected() {
        let doc = br#"{"orders": [{"exchange": "kraken", "pair": "BTCGBP", "direction": "buy", "volume": "0", "enabled": true}]}"#;
        let err = ArchiveConfigurationSource::parse(&location(), doc).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::OrderDocument { .. })));
    }

    #[test]
    fn disabled_order_with_zero_volume_does_not_block_the_document() {
        let doc = br#"{"orders": [
            {"exchange": "kraken", "pair": "ETHGBP", "direction": "buy", "volume": "0", "enabled": false},
            {"exchange": "kraken", "pair": "BTCGBP", "direction": "buy", "volume": "1", "enabled": true}
        ]}"#;

        let orders = ArchiveConfigurationSource::parse(&location(), doc).unwrap();

        assert_eq!(orders.len(), 2);
        assert!(!orders[0].enabled);
        assert_eq!(orders[1].volume, dec!(1));
    }
}
