//! Archival object storage port.

use async_trait::async_trait;

use crate::domain::ArchiveLocation;
use crate::error::Result;

/// Object storage with overwrite semantics.
///
/// Writing the same key twice replaces the object; no versioning is assumed.
#[async_trait]
pub trait ArchiveStore: Send + Sync {
    /// Write an object, replacing any existing one.
    async fn put_object(&self, location: &ArchiveLocation, bytes: Vec<u8>) -> Result<()>;

    /// Read an object.
    async fn get_object(&self, location: &ArchiveLocation) -> Result<Vec<u8>>;
}
