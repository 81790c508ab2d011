//! Pooled HTTP client for the auxiliary service.

use std::sync::Arc;
use std::time::Instant;

use gantry_core::types::ParameterName;
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

use crate::error::{from_reqwest, from_serde};
use crate::{AuxClientConfig, Error, Result};

/// Tracing target for auxiliary client operations.
pub const TRACING_TARGET: &str = "gantry_reqwest::client";

struct AuxClientInner {
    http: Client,
    config: AuxClientConfig,
}

/// HTTP client for the auxiliary service.
///
/// Connections are pooled and reused across requests. Clones share the pool.
/// Dropping an in-flight request future aborts the outbound call.
#[derive(Clone)]
pub struct AuxClient {
    inner: Arc<AuxClientInner>,
}

impl std::fmt::Debug for AuxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuxClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl AuxClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: AuxClientConfig) -> Result<Self> {
        config.validate()?;

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %config.base_url,
            connect_timeout_ms = config.connect_timeout().as_millis(),
            request_timeout_ms = config.request_timeout().as_millis(),
            "Creating auxiliary service client"
        );

        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(|error| {
                Error::configuration()
                    .with_message("failed to build HTTP client")
                    .with_source(error)
            })?;

        tracing::info!(
            target: TRACING_TARGET,
            base_url = %config.base_url,
            "Auxiliary service client created"
        );

        Ok(Self {
            inner: Arc::new(AuxClientInner { http, config }),
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &AuxClientConfig {
        &self.inner.config
    }

    /// Lists buckets through the auxiliary service.
    pub async fn list_buckets(&self) -> Result<Value> {
        self.get("/s3/buckets").await
    }

    /// Lists parameter metadata through the auxiliary service.
    pub async fn list_parameters(&self) -> Result<Value> {
        self.get("/parameters").await
    }

    /// Fetches a single parameter through the auxiliary service.
    ///
    /// Every segment of the name is percent-encoded, so `?`, `#` and `%`
    /// reach the auxiliary service as part of the name. Names with `.` or
    /// `..` segments cannot exist upstream and are rejected as not found.
    pub async fn get_parameter(&self, name: &ParameterName) -> Result<Value> {
        let relative = name.as_str().strip_prefix('/').unwrap_or(name.as_str());
        let segments: Vec<&str> = relative.split('/').collect();
        if segments.iter().any(|segment| matches!(*segment, "." | "..")) {
            return Err(Error::not_found().with_message(format!("Parameter '{name}' not found")));
        }

        let url = self.endpoint(std::iter::once("parameters").chain(segments))?;
        self.call(Method::GET, url).await
    }

    /// Issues a `GET` request against the auxiliary service.
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.request(Method::GET, path).await
    }

    /// Issues a request against the auxiliary service and returns the parsed
    /// JSON body.
    ///
    /// The path is split on `/` and each segment is percent-encoded before it
    /// is appended to the base URL. Object key order of the upstream body is
    /// preserved.
    pub async fn request(&self, method: Method, path: &str) -> Result<Value> {
        let url = self.endpoint(path.split('/').filter(|segment| !segment.is_empty()))?;
        self.call(method, url).await
    }

    async fn call(&self, method: Method, url: Url) -> Result<Value> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            method = %method,
            url = %url,
            "Calling auxiliary service"
        );

        let result = self.send(method.clone(), url.clone()).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(_) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    method = %method,
                    url = %url,
                    elapsed_ms = elapsed.as_millis(),
                    "Auxiliary service call succeeded"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    method = %method,
                    url = %url,
                    kind = error.kind_str(),
                    status = ?error.status(),
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Auxiliary service call failed"
                );
            }
        }

        result
    }

    async fn send(&self, method: Method, url: Url) -> Result<Value> {
        let response = self
            .inner
            .http
            .request(method, url)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream(status.as_u16(), body));
        }

        let body = response.bytes().await.map_err(from_reqwest)?;
        serde_json::from_slice(&body).map_err(from_serde)
    }

    /// Appends encoded path segments to the base URL, keeping any base path
    /// prefix.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = self.inner.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::configuration().with_message(format!(
                    "auxiliary service URL '{}' cannot carry a path",
                    self.inner.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
