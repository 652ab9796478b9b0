//! Order configuration source port.

use async_trait::async_trait;

use crate::domain::{ArchiveLocation, DcaOrderSpec};
use crate::error::Result;

/// Loads the declarative order list.
#[async_trait]
pub trait ConfigurationSource: Send + Sync {
    /// Load the orders stored at `location`, in configured order.
    ///
    /// # Errors
    ///
    /// Fails if the document is missing or malformed.
    async fn load_orders(&self, location: &ArchiveLocation) -> Result<Vec<DcaOrderSpec>>;
}
