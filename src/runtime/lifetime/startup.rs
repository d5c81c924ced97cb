use actix_web::web;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::{Api, ApiClient, HttpApiClient};
use crate::config::{AppConfig, SessionConfig};
use crate::errors::PortalError;
use crate::pages::PageService;
use crate::query::QueryClient;
use crate::routes;
use crate::session::AuthGuard;
use crate::view_state::UiStateStore;

/// 启动后所有 worker 共享的上下文
#[derive(Clone)]
pub struct StartupContext {
    pub guard: AuthGuard,
    pub pages: PageService,
    pub session: SessionConfig,
}

impl StartupContext {
    /// 基于任意后端客户端构建上下文，测试中传入内存实现
    pub fn with_client(config: &AppConfig, client: Arc<dyn ApiClient>) -> Self {
        let api = Api::new(client, &config.backend);
        let guard = AuthGuard::new(api.clone(), config.session.clone());
        let query = QueryClient::new(api, &config.query);
        let ui_state = UiStateStore::new(&config.ui_state);

        Self {
            guard,
            pages: PageService::new(query, ui_state, config.session.clone()),
            session: config.session.clone(),
        }
    }

    /// 注册共享数据与全部路由，前端路由放在最后作为 fallback
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.guard.clone()))
            .app_data(web::Data::new(self.pages.clone()))
            .app_data(web::Data::new(self.session.clone()))
            .configure(routes::configure_session_routes) // 会话状态与登出
            .configure(routes::configure_page_routes) // 页面视图与交互
            .configure(routes::configure_form_routes) // 表单提交
            .configure(routes::configure_frontend_routes); // 前端路由（放在最后作为 fallback）
    }
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> Result<StartupContext, PortalError> {
    let config = AppConfig::get();

    let client = HttpApiClient::new(&config.backend)?;
    warn!("Backend API client targeting {}", client.base_url());

    let context = StartupContext::with_client(config, Arc::new(client));
    debug!(
        "Auth guard ready, {} public routes, introspection via {}",
        config.session.public_routes.len(),
        config.session.introspection_path
    );

    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::api::mock::MockApiClient;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_registered_app_serves_pages_and_guard() {
        let mock = Arc::new(MockApiClient::new());
        mock.on_get("/teachers", json!([{ "id": 1, "name": "Ana", "email": "ana@x.com" }]));
        // 第一次自省通过，之后全部拒绝
        mock.on_get("/auth/token", json!({ "valid": true }));
        mock.fail_get("/auth/token", 401);
        let context = StartupContext::with_client(&AppConfig::default(), mock.clone());
        let app = test::init_service(App::new().configure(|cfg| context.register(cfg))).await;

        let req = test::TestRequest::get()
            .uri("/api/pages/teachers")
            .cookie(Cookie::new("token", "a.b.c"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["total"], 1);

        let req = test::TestRequest::get().uri("/schedule").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(mock.calls_to(Method::Get, "/auth/token"), 2);

        let req = test::TestRequest::get().uri("/api/unknown").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
