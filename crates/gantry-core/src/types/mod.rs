//! JSON wire models exchanged between callers, the gateway and the auxiliary service.

mod monitor;
mod parameter;
mod storage;

pub use monitor::{HealthStatus, ServiceDescriptor, VersionInfo};
pub use parameter::{ParameterList, ParameterName, ParameterSummary, ParameterValue};
pub use storage::{Bucket, BucketList};
