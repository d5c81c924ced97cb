//! API 访问层
//!
//! 所有发往后端源站的调用都经过 [`Api`]。这一层不做重试、超时和取消，
//! 失败统一归一为 [`RequestError`]。

pub mod client;
#[cfg(test)]
pub mod mock;

pub use client::HttpApiClient;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::config::BackendConfig;
use crate::errors::RequestError;
use crate::session::Credential;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// 一次已经决定好凭证的出站请求
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    /// 完整的 Authorization 头值
    pub authorization: Option<String>,
}

/// 出站 HTTP 的抽象，测试中替换为内存实现
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<Value, RequestError>;
}

/// POST 是否携带凭证
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialPolicy {
    Attach,
    Omit,
}

impl CredentialPolicy {
    fn from_flag(attach: bool) -> Self {
        if attach {
            CredentialPolicy::Attach
        } else {
            CredentialPolicy::Omit
        }
    }
}

/// 路径必须是后端相对路径，例如 `/students/summary`
pub fn ensure_relative(path: &str) -> Result<(), RequestError> {
    let relative = path.starts_with('/') && !path.starts_with("//") && !path.contains("://");
    if relative {
        Ok(())
    } else {
        Err(RequestError::invalid_path(path))
    }
}

#[derive(Clone)]
pub struct Api {
    client: Arc<dyn ApiClient>,
    post_policy: CredentialPolicy,
}

impl Api {
    pub fn new(client: Arc<dyn ApiClient>, config: &BackendConfig) -> Self {
        Self {
            client,
            post_policy: CredentialPolicy::from_flag(config.post_attaches_credential),
        }
    }

    /// GET，存在凭证时附带 `Authorization: Bearer <token>`
    pub async fn get(
        &self,
        path: &str,
        credential: Option<&Credential>,
    ) -> Result<Value, RequestError> {
        ensure_relative(path)?;
        self.client
            .execute(ApiRequest {
                method: Method::Get,
                path: path.to_string(),
                body: None,
                authorization: credential.map(Credential::bearer_header),
            })
            .await
    }

    pub async fn get_as<T: DeserializeOwned>(
        &self,
        path: &str,
        credential: Option<&Credential>,
    ) -> Result<T, RequestError> {
        let value = self.get(path, credential).await?;
        decode(path, value)
    }

    /// POST JSON，按配置的默认策略决定是否携带凭证
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        credential: Option<&Credential>,
    ) -> Result<Value, RequestError> {
        self.post_with(path, body, credential, self.post_policy).await
    }

    pub async fn post_with<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        credential: Option<&Credential>,
        policy: CredentialPolicy,
    ) -> Result<Value, RequestError> {
        ensure_relative(path)?;
        let body = serde_json::to_value(body)
            .map_err(|e| RequestError::transport(format!("Failed to encode request body: {e}")))?;
        let authorization = match policy {
            CredentialPolicy::Attach => credential.map(Credential::bearer_header),
            CredentialPolicy::Omit => None,
        };

        self.client
            .execute(ApiRequest {
                method: Method::Post,
                path: path.to_string(),
                body: Some(body),
                authorization,
            })
            .await
    }
}

/// 把响应 JSON 解码为目标类型；形状不符按传输失败处理
pub fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, RequestError> {
    serde_json::from_value(value)
        .map_err(|e| RequestError::transport(format!("Unexpected response from {path}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::mock::MockApiClient;
    use super::*;
    use serde_json::json;

    fn api(mock: &Arc<MockApiClient>) -> Api {
        Api::new(mock.clone(), &BackendConfig::default())
    }

    fn credential() -> Credential {
        Credential::new("abc.def.ghi").unwrap()
    }

    #[test]
    fn test_ensure_relative() {
        assert!(ensure_relative("/students/summary").is_ok());
        assert!(ensure_relative("/subscriptions/students?status=active").is_ok());
        assert!(ensure_relative("students").is_err());
        assert!(ensure_relative("//evil.example.com/x").is_err());
        assert!(ensure_relative("http://evil.example.com/x").is_err());
        assert!(ensure_relative("").is_err());
    }

    #[actix_web::test]
    async fn test_get_attaches_bearer() {
        let mock = Arc::new(MockApiClient::new());
        mock.on_get("/classes", json!([]));

        let result = api(&mock).get("/classes", Some(&credential())).await;
        assert_eq!(result, Ok(json!([])));

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].authorization.as_deref(), Some("Bearer abc.def.ghi"));
    }

    #[actix_web::test]
    async fn test_post_omits_credential_by_default() {
        let mock = Arc::new(MockApiClient::new());
        mock.on_post("/students", json!({ "id": 1 }));

        let body = json!({ "name": "Alice" });
        api(&mock)
            .post("/students", &body, Some(&credential()))
            .await
            .unwrap();

        let calls = mock.calls();
        assert_eq!(calls[0].method, Method::Post);
        assert_eq!(calls[0].authorization, None);
        assert_eq!(calls[0].body, Some(body));
    }

    #[actix_web::test]
    async fn test_post_policy_override_and_config_default() {
        let mock = Arc::new(MockApiClient::new());
        mock.on_post("/students", json!(null));

        api(&mock)
            .post_with("/students", &json!({}), Some(&credential()), CredentialPolicy::Attach)
            .await
            .unwrap();
        assert!(mock.calls()[0].authorization.is_some());

        let config = BackendConfig {
            post_attaches_credential: true,
            ..BackendConfig::default()
        };
        let attaching = Api::new(mock.clone(), &config);
        attaching
            .post("/students", &json!({}), Some(&credential()))
            .await
            .unwrap();
        assert!(mock.calls()[1].authorization.is_some());
    }

    #[actix_web::test]
    async fn test_invalid_path_never_reaches_client() {
        let mock = Arc::new(MockApiClient::new());
        let err = api(&mock).get("https://elsewhere/x", None).await.unwrap_err();
        assert_eq!(err.status_code(), None);
        assert!(mock.calls().is_empty());
    }

    #[actix_web::test]
    async fn test_get_as_reports_shape_mismatch() {
        let mock = Arc::new(MockApiClient::new());
        mock.on_get("/teachers", json!({ "unexpected": true }));

        let result: Result<Vec<String>, _> = api(&mock).get_as("/teachers", None).await;
        let err = result.unwrap_err();
        assert_eq!(err.status_code(), None);
        assert!(err.message().contains("/teachers"));
    }
}
