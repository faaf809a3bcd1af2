use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::{Map, Value};

use super::constants::{self, fields, headers};
use super::error::ApiError;
use super::models::{check_errcode, ExtensionRecord, SystemInfo, TokenRequest};
use crate::auth::Credentials;

/// Yeastar PBX OpenAPI client
///
/// Every call is a single request with no retry; the timeout policy is
/// whatever reqwest defaults to.
#[derive(Clone)]
pub struct PbxClient {
    credentials: Credentials,
    http_client: reqwest::Client,
}

impl PbxClient {
    pub fn new(credentials: Credentials) -> Result<Self, ApiError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(headers::CONTENT_TYPE_JSON),
        );

        let http_client = reqwest::Client::builder()
            .user_agent(headers::USER_AGENT)
            .default_headers(default_headers)
            .build()?;

        Ok(Self::with_custom_client(credentials, http_client))
    }

    /// Create a new client with custom HTTP client configuration
    pub fn with_custom_client(credentials: Credentials, http_client: reqwest::Client) -> Self {
        Self {
            credentials,
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.credentials.base_url
    }

    /// Exchange the configured credentials for an access token
    pub async fn get_token(&self) -> Result<String, ApiError> {
        let url = constants::endpoint(&self.credentials.base_url, constants::GET_TOKEN_ENDPOINT);
        log::debug!("POST {}", url);

        let payload = TokenRequest {
            username: &self.credentials.username,
            password: &self.credentials.password,
        };

        let response = self.http_client.post(&url).json(&payload).send().await?;
        let body = Self::read_body(response).await?;

        let access_token = body
            .get(fields::ACCESS_TOKEN)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Malformed("No access token in response".to_string()))?;

        Ok(access_token.to_string())
    }

    /// Fetch system information; the returned map still holds errcode/errmsg
    pub async fn fetch_system_info(&self, token: &str) -> Result<SystemInfo, ApiError> {
        self.get(constants::SYSTEM_INFORMATION_ENDPOINT, token).await
    }

    /// Fetch the extension list
    pub async fn fetch_extensions(&self, token: &str) -> Result<Vec<ExtensionRecord>, ApiError> {
        let mut body = self.get(constants::EXTENSION_LIST_ENDPOINT, token).await?;

        match body.remove(fields::EXTENSION) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(record) => Ok(record),
                    other => Err(ApiError::Malformed(format!(
                        "extension entry is not an object: {}",
                        other
                    ))),
                })
                .collect(),
            Some(other) => Err(ApiError::Malformed(format!(
                "extension field is not a list: {}",
                other
            ))),
        }
    }

    async fn get(&self, path: &str, token: &str) -> Result<Map<String, Value>, ApiError> {
        let url = constants::endpoint(&self.credentials.base_url, path);
        log::debug!("GET {}", url);

        // The PBX takes the raw token, no Bearer scheme
        let response = self
            .http_client
            .get(&url)
            .header(header::AUTHORIZATION, token)
            .send()
            .await?;

        Self::read_body(response).await
    }

    async fn read_body(response: reqwest::Response) -> Result<Map<String, Value>, ApiError> {
        log::debug!("Response status: {}", response.status());

        let body: Value = response.error_for_status()?.json().await?;
        match body {
            Value::Object(map) => check_errcode(map),
            other => Err(ApiError::Malformed(format!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }
}
