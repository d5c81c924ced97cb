use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use crate::config::SessionConfig;
use crate::models::ApiResponse;
use crate::session::{AuthGuard, AuthState, GuardOutcome, Session};

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    // 即将进入的前端路由
    pub path: Option<String>,
}

/// 前端加载占位时查询的守卫状态
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/session.ts")]
pub struct SessionStatus {
    pub state: AuthState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

pub async fn get_session(
    guard: web::Data<AuthGuard>,
    session: Session,
    query: web::Query<SessionQuery>,
) -> ActixResult<HttpResponse> {
    let path = query.path.as_deref().unwrap_or("/dashboard");
    let state = guard.authorize(path, &session).await;
    let location = match guard.outcome(state) {
        GuardOutcome::Redirect { location } => Some(location),
        GuardOutcome::Loading | GuardOutcome::Render => None,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SessionStatus { state, location },
        "Session state evaluated",
    )))
}

pub async fn logout(config: web::Data<SessionConfig>, session: Session) -> HttpResponse {
    info!("Session of subject {} logged out", session.subject_label());
    Session::teardown_response(&config)
}

// 配置路由
pub fn configure_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/session")
            .service(web::resource("").route(web::get().to(get_session)))
            .service(web::resource("/logout").route(web::post().to(logout))),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApiClient;
    use crate::api::{Api, Method};
    use crate::config::BackendConfig;
    use crate::session::CLEAR_SITE_DATA_HEADER;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::http::header::LOCATION;
    use actix_web::{App, test};
    use serde_json::Value;
    use std::sync::Arc;

    fn guard(mock: &Arc<MockApiClient>) -> AuthGuard {
        AuthGuard::new(
            Api::new(mock.clone(), &BackendConfig::default()),
            SessionConfig::default(),
        )
    }

    #[actix_web::test]
    async fn test_logout_then_guard_rejects() {
        let mock = Arc::new(MockApiClient::new());
        // 后端拒绝没有凭证的自省请求
        mock.fail_get("/auth/token", 401);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(SessionConfig::default()))
                .app_data(web::Data::new(guard(&mock)))
                .configure(configure_session_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/session/logout")
            .cookie(Cookie::new("token", "a.b.c"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(LOCATION).unwrap(), "/login");
        assert!(resp.headers().contains_key(CLEAR_SITE_DATA_HEADER));
        let removed = resp
            .response()
            .cookies()
            .find(|c| c.name() == "token")
            .unwrap();
        assert_eq!(removed.value(), "");

        // 浏览器已清除 cookie，下一次检查没有凭证
        let req = test::TestRequest::get()
            .uri("/api/session?path=/classes")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["state"], "unauthorized");
        assert_eq!(body["data"]["location"], "/login");
        assert_eq!(mock.calls_to(Method::Get, "/auth/token"), 1);
        assert!(mock.calls()[0].authorization.is_none());
    }

    #[actix_web::test]
    async fn test_rejected_credential_reports_login_redirect() {
        let mock = Arc::new(MockApiClient::new());
        mock.fail_get("/auth/token", 401);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(SessionConfig::default()))
                .app_data(web::Data::new(guard(&mock)))
                .configure(configure_session_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/session?path=/students")
            .cookie(Cookie::new("token", "a.b.c"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["state"], "unauthorized");
        assert_eq!(body["data"]["location"], "/login");
    }
}
