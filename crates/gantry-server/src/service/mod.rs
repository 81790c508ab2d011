//! Application state and dependency injection.
//!
//! Every client is constructed once at startup and shared read-only by all
//! requests. Handlers pull what they need through [`State`].
//!
//! [`State`]: axum::extract::State

use gantry_aws::{ParameterService, StorageService};
use gantry_core::{BuildInfo, Settings};
use gantry_reqwest::AuxClient;

/// State of the auxiliary service.
///
/// Holds the only cloud-facing clients of the system.
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct AuxiliaryState {
    pub settings: Settings,
    pub build: BuildInfo,

    // External services:
    pub storage: StorageService,
    pub parameters: ParameterService,
}

impl AuxiliaryState {
    /// Creates the state from already constructed services.
    pub fn new(
        settings: Settings,
        build: BuildInfo,
        storage: StorageService,
        parameters: ParameterService,
    ) -> Self {
        Self {
            settings,
            build,
            storage,
            parameters,
        }
    }
}

/// State of the gateway service. Holds no cloud credentials.
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct GatewayState {
    pub settings: Settings,
    pub build: BuildInfo,

    // External services:
    pub aux_client: AuxClient,
}

impl GatewayState {
    /// Creates the state from an auxiliary service client.
    pub fn new(settings: Settings, build: BuildInfo, aux_client: AuxClient) -> Self {
        Self {
            settings,
            build,
            aux_client,
        }
    }
}

macro_rules! impl_di {
    ($s:ty => $($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<$s> for $t {
            fn from_ref(state: &$s) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(AuxiliaryState => settings: Settings, build: BuildInfo);
impl_di!(AuxiliaryState => storage: StorageService, parameters: ParameterService);

impl_di!(GatewayState => settings: Settings, build: BuildInfo);
impl_di!(GatewayState => aux_client: AuxClient);
