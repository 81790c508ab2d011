//! Parameter-store listing and lookup.

mod service;
mod ssm;

use gantry_core::types::{ParameterName, ParameterSummary};

pub use self::service::ParameterService;
pub use self::ssm::SsmParameters;
use crate::Result;

/// Outcome of a single-parameter lookup.
///
/// A missing parameter is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterLookup {
    /// Parameter exists; holds the plaintext value.
    Found(String),
    /// No parameter with this name.
    NotFound,
}

impl ParameterLookup {
    /// Returns the value if the parameter exists.
    pub fn into_value(self) -> Option<String> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }

    /// Returns `true` when the parameter exists.
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Read access to a hierarchical parameter store.
#[async_trait::async_trait]
pub trait ParameterProvider: Send + Sync {
    /// Returns metadata for every parameter, following pagination to the end.
    async fn list_all_parameters(&self) -> Result<Vec<ParameterSummary>>;

    /// Fetches a single parameter value.
    async fn get_parameter(
        &self,
        name: &ParameterName,
        with_decryption: bool,
    ) -> Result<ParameterLookup>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_into_value() {
        assert_eq!(
            ParameterLookup::Found("v".to_owned()).into_value(),
            Some("v".to_owned())
        );
        assert_eq!(ParameterLookup::NotFound.into_value(), None);
        assert!(!ParameterLookup::NotFound.is_found());
    }
}
