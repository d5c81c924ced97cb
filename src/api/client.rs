use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, error, info};

use super::{ApiClient, ApiRequest, Method};
use crate::config::BackendConfig;
use crate::errors::RequestError;

/// 基于 reqwest 的后端客户端
#[derive(Clone)]
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(config: &BackendConfig) -> Result<Self, RequestError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn execute(&self, request: ApiRequest) -> Result<Value, RequestError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!("{} {}", request.method, url);

        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
        };
        if let Some(authorization) = &request.authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        if let Some(body) = &request.body {
            let encoded = serde_json::to_vec(body)
                .map_err(|e| RequestError::transport(format!("Failed to encode body: {e}")))?;
            builder = builder.header(CONTENT_TYPE, "application/json").body(encoded);
        }

        let response = builder.send().await.map_err(|e| {
            error!("Backend request {} {} failed: {}", request.method, url, e);
            RequestError::transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            info!(
                "Backend responded {} to {} {}",
                status.as_u16(),
                request.method,
                request.path
            );
            return Err(RequestError::status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            error!("Backend returned invalid JSON for {}: {}", request.path, e);
            RequestError::transport(format!("Invalid JSON from {}: {e}", request.path))
        })
    }
}
