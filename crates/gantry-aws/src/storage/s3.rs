use aws_config::SdkConfig;
use aws_sdk_s3::Client;
use aws_sdk_s3::types::Bucket as S3Bucket;
use gantry_core::types::Bucket;

use super::StorageProvider;
use crate::Result;
use crate::error::{cloud_error, to_timestamp};

/// [`StorageProvider`] backed by S3.
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: Client,
}

impl S3Storage {
    /// Creates a client from a resolved SDK configuration.
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait::async_trait]
impl StorageProvider for S3Storage {
    async fn list_buckets(&self) -> Result<Vec<Bucket>> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|error| cloud_error("ListBuckets", error))?;

        Ok(output.buckets().iter().map(bucket_from_sdk).collect())
    }
}

fn bucket_from_sdk(bucket: &S3Bucket) -> Bucket {
    Bucket::new(
        bucket.name().unwrap_or_default(),
        bucket.creation_date().and_then(to_timestamp),
    )
}

#[cfg(test)]
mod tests {
    use aws_smithy_types::DateTime;

    use super::*;

    #[test]
    fn converts_sdk_bucket() {
        let bucket = S3Bucket::builder()
            .name("logs")
            .creation_date(DateTime::from_secs(1_704_067_200))
            .build();

        let bucket = bucket_from_sdk(&bucket);
        assert_eq!(bucket.name, "logs");
        assert_eq!(
            bucket.creation_date.map(|date| date.to_string()),
            Some("2024-01-01T00:00:00Z".to_owned())
        );
    }

    #[test]
    fn missing_creation_date_is_none() {
        let bucket = bucket_from_sdk(&S3Bucket::builder().name("tmp").build());
        assert!(bucket.creation_date.is_none());
    }
}
