use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use gantry_core::types::Bucket;

use super::StorageProvider;
use crate::{Result, TRACING_TARGET_STORAGE};

/// Storage service wrapper with observability.
///
/// The provider is shared behind an `Arc`, so clones are cheap.
#[derive(Clone)]
pub struct StorageService {
    inner: Arc<dyn StorageProvider>,
}

impl fmt::Debug for StorageService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageService").finish_non_exhaustive()
    }
}

impl StorageService {
    /// Wraps a storage provider.
    pub fn new<P>(provider: P) -> Self
    where
        P: StorageProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Lists every bucket visible to the current credentials.
    pub async fn list_buckets(&self) -> Result<Vec<Bucket>> {
        let started_at = Instant::now();
        tracing::debug!(target: TRACING_TARGET_STORAGE, "Listing buckets");

        let result = self.inner.list_buckets().await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(buckets) => {
                tracing::info!(
                    target: TRACING_TARGET_STORAGE,
                    count = buckets.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Listed buckets"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_STORAGE,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Failed to list buckets"
                );
            }
        }

        result
    }
}
