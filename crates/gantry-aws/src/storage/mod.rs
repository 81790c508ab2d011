//! Object-storage bucket listing.

mod s3;
mod service;

use gantry_core::types::Bucket;

pub use self::s3::S3Storage;
pub use self::service::StorageService;
use crate::Result;

/// Lists the buckets visible to the current credentials.
#[async_trait::async_trait]
pub trait StorageProvider: Send + Sync {
    /// Returns every visible bucket in the order reported by the store.
    async fn list_buckets(&self) -> Result<Vec<Bucket>>;
}
