//! In-memory providers for tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use gantry_core::types::{Bucket, ParameterName, ParameterSummary};
use jiff::Timestamp;

use crate::{
    Error, ParameterLookup, ParameterProvider, ParameterService, Result, StorageProvider,
    StorageService,
};

/// In-memory [`StorageProvider`].
#[derive(Debug, Clone, Default)]
pub struct MockStorage {
    buckets: Vec<Bucket>,
    failure: Option<String>,
}

impl MockStorage {
    /// Creates a store with the given buckets.
    pub fn new(buckets: Vec<Bucket>) -> Self {
        Self {
            buckets,
            failure: None,
        }
    }

    /// Creates a store whose every call fails with an internal error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            buckets: Vec::new(),
            failure: Some(message.into()),
        }
    }

    /// Adds a bucket created at the given time.
    pub fn with_bucket(mut self, name: impl Into<String>, created: Option<Timestamp>) -> Self {
        self.buckets.push(Bucket::new(name, created));
        self
    }

    /// Wraps this provider in a [`StorageService`].
    pub fn into_service(self) -> StorageService {
        StorageService::new(self)
    }
}

#[async_trait::async_trait]
impl StorageProvider for MockStorage {
    async fn list_buckets(&self) -> Result<Vec<Bucket>> {
        match &self.failure {
            Some(message) => Err(Error::internal().with_message(message.clone())),
            None => Ok(self.buckets.clone()),
        }
    }
}

/// In-memory [`ParameterProvider`].
///
/// Parameters are listed in insertion order, split into pages of
/// `page_size` to exercise the same cursor handling as the real store.
/// Clones share the record of decryption flags seen by lookups.
#[derive(Debug, Clone)]
pub struct MockParameters {
    parameters: Vec<(ParameterSummary, String)>,
    page_size: usize,
    failure: Option<String>,
    decryption_requests: Arc<Mutex<Vec<bool>>>,
}

impl Default for MockParameters {
    fn default() -> Self {
        Self {
            parameters: Vec::new(),
            page_size: 50,
            failure: None,
            decryption_requests: Arc::default(),
        }
    }
}

impl MockParameters {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose every call fails with an internal error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Adds a parameter. The name is normalized.
    pub fn with_parameter(
        mut self,
        name: impl AsRef<str>,
        kind: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let summary = ParameterSummary {
            name: ParameterName::new(name).into_inner(),
            kind: kind.into(),
            last_modified: None,
        };
        self.parameters.push((summary, value.into()));
        self
    }

    /// Sets the listing page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Returns the decryption flag of every lookup so far, in call order.
    pub fn decryption_requests(&self) -> Vec<bool> {
        self.decryption_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Wraps this provider in a [`ParameterService`].
    pub fn into_service(self) -> ParameterService {
        ParameterService::new(self)
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(Error::internal().with_message(message.clone())),
            None => Ok(()),
        }
    }

    fn page(&self, cursor: Option<&str>) -> crate::pagination::Page<ParameterSummary> {
        let start = cursor.and_then(|c| c.parse().ok()).unwrap_or(0usize);
        let end = (start + self.page_size).min(self.parameters.len());
        let items = self.parameters[start..end]
            .iter()
            .map(|(summary, _)| summary.clone())
            .collect();
        let next_token = (end < self.parameters.len()).then(|| end.to_string());
        crate::pagination::Page::new(items, next_token)
    }
}

#[async_trait::async_trait]
impl ParameterProvider for MockParameters {
    async fn list_all_parameters(&self) -> Result<Vec<ParameterSummary>> {
        self.check()?;
        crate::pagination::collect_pages(|cursor| {
            let page = self.page(cursor.as_deref());
            async move { Ok(page) }
        })
        .await
    }

    async fn get_parameter(
        &self,
        name: &ParameterName,
        with_decryption: bool,
    ) -> Result<ParameterLookup> {
        self.decryption_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(with_decryption);
        self.check()?;
        let values: BTreeMap<&str, &str> = self
            .parameters
            .iter()
            .map(|(summary, value)| (summary.name.as_str(), value.as_str()))
            .collect();

        Ok(values
            .get(name.as_str())
            .map_or(ParameterLookup::NotFound, |value| {
                ParameterLookup::Found((*value).to_owned())
            }))
    }
}
