use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use gantry_core::types::{ParameterName, ParameterSummary};

use super::{ParameterLookup, ParameterProvider};
use crate::{Result, TRACING_TARGET_PARAMETERS};

/// Parameter service wrapper with observability.
#[derive(Clone)]
pub struct ParameterService {
    inner: Arc<dyn ParameterProvider>,
}

impl fmt::Debug for ParameterService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterService").finish_non_exhaustive()
    }
}

impl ParameterService {
    /// Wraps a parameter provider.
    pub fn new<P>(provider: P) -> Self
    where
        P: ParameterProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Lists metadata for every parameter across all pages.
    pub async fn list_all_parameters(&self) -> Result<Vec<ParameterSummary>> {
        let started_at = Instant::now();
        tracing::debug!(target: TRACING_TARGET_PARAMETERS, "Listing parameters");

        let result = self.inner.list_all_parameters().await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(parameters) => {
                tracing::info!(
                    target: TRACING_TARGET_PARAMETERS,
                    count = parameters.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Listed parameters"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_PARAMETERS,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Failed to list parameters"
                );
            }
        }

        result
    }

    /// Fetches a decrypted parameter value.
    pub async fn get_parameter(&self, name: &ParameterName) -> Result<ParameterLookup> {
        self.get_parameter_with(name, true).await
    }

    /// Fetches a parameter value, optionally leaving it encrypted.
    ///
    /// The value itself is never logged.
    pub async fn get_parameter_with(
        &self,
        name: &ParameterName,
        with_decryption: bool,
    ) -> Result<ParameterLookup> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET_PARAMETERS,
            name = %name,
            with_decryption,
            "Fetching parameter"
        );

        let result = self.inner.get_parameter(name, with_decryption).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(ParameterLookup::Found(_)) => {
                tracing::info!(
                    target: TRACING_TARGET_PARAMETERS,
                    name = %name,
                    elapsed_ms = elapsed.as_millis(),
                    "Fetched parameter"
                );
            }
            Ok(ParameterLookup::NotFound) => {
                tracing::warn!(
                    target: TRACING_TARGET_PARAMETERS,
                    name = %name,
                    elapsed_ms = elapsed.as_millis(),
                    "Parameter not found"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_PARAMETERS,
                    name = %name,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Failed to fetch parameter"
                );
            }
        }

        result
    }
}
