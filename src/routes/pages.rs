use actix_web::{HttpResponse, Result as ActixResult, web};
use chrono::Utc;
use serde::Serialize;
use ts_rs::TS;

use super::error_response;
use crate::middlewares;
use crate::models::subscriptions::requests::SubscriptionFilters;
use crate::models::{ApiResponse, ErrorCode};
use crate::pages::{self, PageOutcome, PageService, RedirectTarget};
use crate::session::Session;
use crate::view_state::{PageIntent, PageKind};

fn render<T: Serialize + TS>(outcome: PageOutcome<T>) -> HttpResponse {
    match outcome {
        PageOutcome::Ready(view) => {
            HttpResponse::Ok().json(ApiResponse::success(view, "Page loaded successfully"))
        }
        PageOutcome::Redirect { location } => HttpResponse::Unauthorized().json(ApiResponse::error(
            ErrorCode::SessionExpired,
            RedirectTarget { location },
            "Session expired",
        )),
    }
}

fn unknown_page(slug: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::NotFound,
        format!("Unknown page: {slug}"),
    ))
}

// HTTP处理程序
pub async fn get_page(
    service: web::Data<PageService>,
    session: Session,
    slug: web::Path<String>,
    filters: web::Query<SubscriptionFilters>,
) -> ActixResult<HttpResponse> {
    let Some(page) = PageKind::from_slug(&slug) else {
        return Ok(unknown_page(&slug));
    };

    let response = match page {
        PageKind::Dashboard => render(pages::dashboard::dashboard(&service, &session).await),
        PageKind::Classes => render(pages::classes::classes(&service, &session).await),
        PageKind::Students => render(pages::students::students(&service, &session).await),
        PageKind::StudentSubscriptions => render(
            pages::subscriptions::student_subscriptions(
                &service,
                &session,
                filters.into_inner(),
                Utc::now(),
            )
            .await,
        ),
        PageKind::Schedule => render(pages::schedule::schedule(&service, &session).await),
        PageKind::Subscriptions => {
            render(pages::subscriptions::subscriptions(&service, &session).await)
        }
        PageKind::Instructors => render(pages::staff::instructors(&service, &session).await),
        PageKind::Teachers => render(pages::staff::teachers(&service, &session).await),
    };
    Ok(response)
}

pub async fn get_checkout(
    service: web::Data<PageService>,
    session: Session,
    plan_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    match pages::subscriptions::checkout(&service, &session, &plan_id).await {
        Ok(view) => Ok(HttpResponse::Ok().json(ApiResponse::success(view, "Plan found"))),
        Err(err) => Ok(error_response(&err)),
    }
}

pub async fn post_intent(
    service: web::Data<PageService>,
    session: Session,
    slug: web::Path<String>,
    intent: web::Json<PageIntent>,
) -> ActixResult<HttpResponse> {
    let Some(page) = PageKind::from_slug(&slug) else {
        return Ok(unknown_page(&slug));
    };

    match pages::intents::dispatch(&service, &session, page, intent.into_inner()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Intent applied"))),
        Err(err) => Ok(error_response(&err)),
    }
}

pub async fn delete_state(
    service: web::Data<PageService>,
    session: Session,
    slug: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let Some(page) = PageKind::from_slug(&slug) else {
        return Ok(unknown_page(&slug));
    };

    service.ui_state().unmount(&session, page).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Page state cleared")))
}

// 配置路由
pub fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/pages")
            .wrap(middlewares::RequireSession)
            // 放在 /{page} 之前
            .service(web::resource("/checkout/{plan_id}").route(web::get().to(get_checkout)))
            .service(web::resource("/{page}").route(web::get().to(get_page)))
            .service(web::resource("/{page}/intents").route(web::post().to(post_intent)))
            .service(web::resource("/{page}/state").route(web::delete().to(delete_state))),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApiClient;
    use crate::pages::testing::{accepting_guard, guard, service};
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn token() -> Cookie<'static> {
        Cookie::new("token", "header.payload.signature")
    }

    #[actix_web::test]
    async fn test_students_page_session_expired() {
        let mock = Arc::new(MockApiClient::new());
        mock.fail_get("/students/summary", 403);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(service(&mock)))
                .app_data(web::Data::new(accepting_guard(&mock)))
                .configure(configure_page_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/pages/students")
            .cookie(token())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 2001);
        assert_eq!(body["data"]["location"], "/session-expired");
    }

    #[actix_web::test]
    async fn test_intent_then_page_reflects_search() {
        let mock = Arc::new(MockApiClient::new());
        mock.on_get(
            "/students/summary",
            json!([
                { "id": 1, "name": "Alice", "email": "alice@x.com", "status": "Active" },
                { "id": 2, "name": "Bob", "email": "bob@x.com", "status": "Active" },
            ]),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(service(&mock)))
                .app_data(web::Data::new(accepting_guard(&mock)))
                .configure(configure_page_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/pages/students/intents")
            .cookie(token())
            .set_json(json!({ "type": "setSearch", "term": "BOB" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["state"]["search"], "BOB");

        let req = test::TestRequest::get()
            .uri("/api/pages/students")
            .cookie(token())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let students = body["data"]["students"].as_array().unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0]["name"], "Bob");
        assert_eq!(body["data"]["stats"]["totalStudents"], 2);

        let req = test::TestRequest::delete()
            .uri("/api/pages/students/state")
            .cookie(token())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_unknown_page_and_plan() {
        let mock = Arc::new(MockApiClient::new());
        mock.on_get("/subscription/plans", json!([{ "id": "starter", "name": "Starter" }]));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(service(&mock)))
                .app_data(web::Data::new(accepting_guard(&mock)))
                .configure(configure_page_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/pages/grades")
            .cookie(token())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/api/pages/checkout/platinum")
            .cookie(token())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/api/pages/checkout/starter")
            .cookie(token())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["plan"]["name"], "Starter");
    }

    #[actix_web::test]
    async fn test_pages_require_cookie() {
        let mock = Arc::new(MockApiClient::new());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(service(&mock)))
                .app_data(web::Data::new(accepting_guard(&mock)))
                .configure(configure_page_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/pages/classes").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
        assert!(mock.calls().is_empty());
    }

    #[actix_web::test]
    async fn test_rejected_token_cannot_read_pages() {
        let mock = Arc::new(MockApiClient::new());
        mock.fail_get("/auth/token", 401);
        mock.on_get("/classes/summary", json!([{ "id": 1, "title": "Yoga" }]));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(service(&mock)))
                .app_data(web::Data::new(guard(&mock)))
                .configure(configure_page_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/pages/classes")
            .cookie(Cookie::new("token", "h.forged.sig"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(mock.calls_to(crate::api::Method::Get, "/classes/summary"), 0);
    }
}
