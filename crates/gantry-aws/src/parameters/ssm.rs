use aws_config::SdkConfig;
use aws_sdk_ssm::Client;
use aws_sdk_ssm::operation::get_parameter::GetParameterError;
use aws_sdk_ssm::types::ParameterMetadata;
use gantry_core::types::{ParameterName, ParameterSummary};

use super::{ParameterLookup, ParameterProvider};
use crate::Result;
use crate::error::{cloud_error, to_timestamp};

/// [`ParameterProvider`] backed by SSM Parameter Store.
#[derive(Debug, Clone)]
pub struct SsmParameters {
    client: Client,
}

impl SsmParameters {
    /// Creates a client from a resolved SDK configuration.
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait::async_trait]
impl ParameterProvider for SsmParameters {
    async fn list_all_parameters(&self) -> Result<Vec<ParameterSummary>> {
        let parameters: Vec<ParameterMetadata> = self
            .client
            .describe_parameters()
            .into_paginator()
            .send()
            .try_collect()
            .await
            .map_err(|error| cloud_error("DescribeParameters", error))?
            .into_iter()
            .flat_map(|page| page.parameters.unwrap_or_default())
            .collect();

        Ok(parameters.iter().map(summary_from_sdk).collect())
    }

    async fn get_parameter(
        &self,
        name: &ParameterName,
        with_decryption: bool,
    ) -> Result<ParameterLookup> {
        let result = self
            .client
            .get_parameter()
            .name(name.as_str())
            .with_decryption(with_decryption)
            .send()
            .await;

        match result {
            Ok(output) => Ok(output
                .parameter()
                .and_then(|parameter| parameter.value())
                .map_or(ParameterLookup::NotFound, |value| {
                    ParameterLookup::Found(value.to_owned())
                })),
            Err(error)
                if error
                    .as_service_error()
                    .is_some_and(GetParameterError::is_parameter_not_found) =>
            {
                Ok(ParameterLookup::NotFound)
            }
            Err(error) => Err(cloud_error("GetParameter", error)),
        }
    }
}

fn summary_from_sdk(metadata: &ParameterMetadata) -> ParameterSummary {
    ParameterSummary {
        name: metadata.name().unwrap_or_default().to_owned(),
        kind: metadata
            .r#type()
            .map(|kind| kind.as_str().to_owned())
            .unwrap_or_default(),
        last_modified: metadata.last_modified_date().and_then(to_timestamp),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use aws_config::BehaviorVersion;
    use aws_credential_types::Credentials;
    use aws_sdk_ssm::types::ParameterType;
    use aws_smithy_types::DateTime;
    use axum::Router;
    use axum::http::{HeaderMap, header};
    use axum::response::IntoResponse;
    use serde_json::{Value, json};

    use super::*;

    /// Serves `DescribeParameters` in two pages and records the cursors it saw.
    async fn spawn_parameter_store(cursors: Arc<Mutex<Vec<Option<String>>>>) -> String {
        let app = Router::new().fallback(move |headers: HeaderMap, body: String| {
            let cursors = cursors.clone();
            async move {
                let target = headers
                    .get("x-amz-target")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default();
                assert_eq!(target, "AmazonSSM.DescribeParameters");

                let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
                let cursor = request["NextToken"].as_str().map(str::to_owned);
                cursors.lock().unwrap().push(cursor.clone());

                let page = match cursor.as_deref() {
                    None => json!({
                        "Parameters": [
                            { "Name": "/app/a", "Type": "String" },
                            { "Name": "/app/b", "Type": "StringList" }
                        ],
                        "NextToken": "page-2"
                    }),
                    Some(_) => json!({
                        "Parameters": [
                            { "Name": "/app/c", "Type": "SecureString", "LastModifiedDate": 1704067200 }
                        ]
                    }),
                };

                (
                    [(header::CONTENT_TYPE, "application/x-amz-json-1.1")],
                    page.to_string(),
                )
                    .into_response()
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });
        format!("http://{address}")
    }

    #[tokio::test]
    async fn lists_across_store_pages() {
        let cursors = Arc::new(Mutex::new(Vec::new()));
        let endpoint = spawn_parameter_store(cursors.clone()).await;

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new("eu-west-1"))
            .credentials_provider(Credentials::new("AKID", "SECRET", None, None, "test"))
            .endpoint_url(endpoint)
            .load()
            .await;

        let parameters = SsmParameters::new(&config)
            .list_all_parameters()
            .await
            .unwrap();

        let names: Vec<_> = parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["/app/a", "/app/b", "/app/c"]);
        assert_eq!(parameters[2].kind, "SecureString");
        assert!(parameters[2].last_modified.is_some());
        assert_eq!(
            *cursors.lock().unwrap(),
            vec![None, Some("page-2".to_owned())]
        );
    }

    #[test]
    fn converts_sdk_metadata() {
        let metadata = ParameterMetadata::builder()
            .name("/app/db/password")
            .r#type(ParameterType::SecureString)
            .last_modified_date(DateTime::from_secs(1_704_067_200))
            .build();

        let summary = summary_from_sdk(&metadata);
        assert_eq!(summary.name, "/app/db/password");
        assert_eq!(summary.kind, "SecureString");
        assert!(summary.last_modified.is_some());
    }

    #[test]
    fn missing_fields_default() {
        let summary = summary_from_sdk(&ParameterMetadata::builder().build());
        assert_eq!(summary.name, "");
        assert_eq!(summary.kind, "");
        assert!(summary.last_modified.is_none());
    }
}
