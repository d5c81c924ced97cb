use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use super::Session;
use crate::api::Api;
use crate::config::SessionConfig;

/// 一次导航的授权状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/session.ts")]
pub enum AuthState {
    Checking,
    Authorized,
    Unauthorized,
}

/// 授权状态对应的渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// 中性的加载占位
    Loading,
    /// 跳转，替换当前历史记录
    Redirect { location: String },
    Render,
}

/// 路由守卫
///
/// 每次导航都重新判定，不缓存之前的结果。
#[derive(Clone)]
pub struct AuthGuard {
    api: Api,
    config: SessionConfig,
}

/// 统一路径形式：去掉末尾斜杠并转为小写
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_lowercase()
    }
}

impl AuthGuard {
    pub fn new(api: Api, config: SessionConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.config.is_public(&normalize_path(path))
    }

    /// 判定当前会话能否访问 `path`
    ///
    /// 公开路径直接放行，不发起网络请求；其余路径调用自省接口，
    /// 任何失败（包括网络失败）都视为未授权。
    pub async fn authorize(&self, path: &str, session: &Session) -> AuthState {
        debug!("Auth guard checking {}", path);

        if self.is_public(path) {
            return AuthState::Authorized;
        }

        match self
            .api
            .get(&self.config.introspection_path, session.credential())
            .await
        {
            Ok(_) => AuthState::Authorized,
            Err(err) => {
                info!("Credential introspection failed for {}: {}", path, err);
                AuthState::Unauthorized
            }
        }
    }

    pub fn outcome(&self, state: AuthState) -> GuardOutcome {
        match state {
            AuthState::Checking => GuardOutcome::Loading,
            AuthState::Authorized => GuardOutcome::Render,
            AuthState::Unauthorized => GuardOutcome::Redirect {
                location: self.config.login_path.clone(),
            },
        }
    }

    /// authorize + outcome
    pub async fn navigate(&self, path: &str, session: &Session) -> GuardOutcome {
        let state = self.authorize(path, session).await;
        self.outcome(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::api::mock::MockApiClient;
    use crate::config::BackendConfig;
    use serde_json::json;
    use std::sync::Arc;

    fn guard(mock: &Arc<MockApiClient>) -> AuthGuard {
        AuthGuard::new(
            Api::new(mock.clone(), &BackendConfig::default()),
            SessionConfig::default(),
        )
    }

    #[actix_web::test]
    async fn test_public_paths_skip_network() {
        let mock = Arc::new(MockApiClient::new());
        let guard = guard(&mock);
        let session = Session::anonymous();

        for path in ["/", "/login", "/register", "/session-expired", "/Login/"] {
            assert_eq!(
                guard.authorize(path, &session).await,
                AuthState::Authorized,
                "{path} should be public"
            );
        }
        assert!(mock.calls().is_empty());
    }

    #[actix_web::test]
    async fn test_failed_introspection_redirects_once() {
        let mock = Arc::new(MockApiClient::new());
        mock.fail_get("/auth/token", 401);
        let guard = guard(&mock);
        let session = Session::from_cookie_value(Some("expired.token.value"));

        let outcome = guard.navigate("/classes", &session).await;
        assert_eq!(
            outcome,
            GuardOutcome::Redirect {
                location: "/login".to_string()
            }
        );
        assert_eq!(mock.calls_to(Method::Get, "/auth/token"), 1);
    }

    #[actix_web::test]
    async fn test_transport_failure_is_unauthorized() {
        let mock = Arc::new(MockApiClient::new());
        mock.fail_get_transport("/auth/token");
        let guard = guard(&mock);

        let state = guard
            .authorize("/dashboard", &Session::from_cookie_value(Some("t")))
            .await;
        assert_eq!(state, AuthState::Unauthorized);
    }

    #[actix_web::test]
    async fn test_successful_introspection_renders() {
        let mock = Arc::new(MockApiClient::new());
        mock.on_get("/auth/token", json!({ "valid": true }));
        let guard = guard(&mock);
        let session = Session::from_cookie_value(Some("good.token.value"));

        assert_eq!(guard.navigate("/students", &session).await, GuardOutcome::Render);
        assert_eq!(
            mock.calls()[0].authorization.as_deref(),
            Some("Bearer good.token.value")
        );
    }

    #[actix_web::test]
    async fn test_every_navigation_re_evaluates() {
        let mock = Arc::new(MockApiClient::new());
        mock.on_get("/auth/token", json!({}));
        let guard = guard(&mock);
        let session = Session::from_cookie_value(Some("good.token.value"));

        guard.authorize("/classes", &session).await;
        guard.authorize("/classes", &session).await;
        assert_eq!(mock.calls_to(Method::Get, "/auth/token"), 2);
    }

    #[test]
    fn test_checking_renders_placeholder() {
        let mock = Arc::new(MockApiClient::new());
        assert_eq!(guard(&mock).outcome(AuthState::Checking), GuardOutcome::Loading);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/Students/"), "/students");
    }
}
