//! Liveness, version and descriptor payloads.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{BuildInfo, Settings};

/// Liveness payload. Always reported while the process is up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always `healthy`.
    pub status: String,
    /// Configured service name.
    pub service: String,
    /// Configured environment.
    pub environment: String,
    /// Time of the check.
    pub timestamp: Timestamp,
}

impl HealthStatus {
    /// Creates a healthy report stamped with the current time.
    pub fn healthy(settings: &Settings) -> Self {
        Self {
            status: "healthy".to_owned(),
            service: settings.service_name.clone(),
            environment: settings.environment.clone(),
            timestamp: Timestamp::now(),
        }
    }
}

/// Static build and runtime metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    /// Same as `version`; builds are tagged with the git SHA.
    pub git_sha: String,
    pub build_time: String,
    pub service: String,
    pub environment: String,
    pub region: String,
}

impl VersionInfo {
    /// Combines build metadata with the effective runtime settings.
    ///
    /// Unset environment and region show their configured defaults.
    pub fn new(build: &BuildInfo, settings: &Settings) -> Self {
        Self {
            version: build.version.clone(),
            git_sha: build.version.clone(),
            build_time: build.build_time.clone(),
            service: settings.service_name.clone(),
            environment: settings.environment.clone(),
            region: settings.region.clone(),
        }
    }
}

/// Static descriptor served at `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Human-readable service title.
    pub service: String,
    /// API version of the descriptor.
    pub version: String,
    /// Configured environment.
    pub environment: String,
    /// Operations the service can perform.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,
    /// Endpoint name to path map.
    pub endpoints: BTreeMap<String, String>,
}

impl ServiceDescriptor {
    /// Creates a descriptor with no endpoints.
    pub fn new(service: impl Into<String>, settings: &Settings) -> Self {
        Self {
            service: service.into(),
            version: "1.0.0".to_owned(),
            environment: settings.environment.clone(),
            capabilities: Vec::new(),
            endpoints: BTreeMap::new(),
        }
    }

    /// Adds a capability.
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.push(capability.into());
        self
    }

    /// Adds an endpoint.
    pub fn with_endpoint(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.endpoints.insert(name.into(), path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_mirrors_git_sha() {
        let build = BuildInfo {
            version: "abc123".to_owned(),
            build_time: "2024-01-01T00:00:00Z".to_owned(),
        };
        let info = VersionInfo::new(&build, &Settings::default());

        assert_eq!(info.version, "abc123");
        assert_eq!(info.git_sha, "abc123");
        assert_eq!(info.region, "eu-west-1");
    }

    #[test]
    fn version_reports_effective_defaults() {
        let info = VersionInfo::new(&BuildInfo::default(), &Settings::default());

        assert_eq!(info.version, "unknown");
        assert_eq!(info.build_time, "unknown");
        assert_eq!(info.service, "unknown");
        assert_eq!(info.environment, "dev");
        assert_eq!(info.region, "eu-west-1");
    }

    #[test]
    fn health_reports_settings() {
        let settings = Settings {
            service_name: "gateway".to_owned(),
            ..Settings::default()
        };
        let health = HealthStatus::healthy(&settings);

        assert_eq!(health.status, "healthy");
        assert_eq!(health.service, "gateway");
        assert_eq!(health.environment, "dev");
    }

    #[test]
    fn descriptor_skips_empty_capabilities() {
        let descriptor = ServiceDescriptor::new("Gateway", &Settings::default())
            .with_endpoint("health", "/health");

        let json = serde_json::to_value(&descriptor).unwrap();
        assert!(json.get("capabilities").is_none());
        assert_eq!(json["endpoints"]["health"], "/health");
    }
}
