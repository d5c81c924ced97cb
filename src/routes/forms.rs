use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

use crate::middlewares;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::schedule::requests::ScheduleEventRequest;
use crate::models::staff::requests::{CreateInstructorRequest, CreateTeacherRequest};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::subscriptions::requests::RegisterSubscriptionRequest;
use crate::models::{ApiResponse, ErrorCode, Notification};
use crate::pages::PageService;
use crate::pages::forms::{self, FormOutcome};
use crate::session::Session;

/// 提交成功后返回给前端的内容
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/form.ts")]
pub struct FormReceipt {
    pub data: Value,
    pub notification: Notification,
}

fn respond(outcome: FormOutcome) -> HttpResponse {
    match outcome {
        FormOutcome::Invalid(errors) => HttpResponse::UnprocessableEntity().json(ApiResponse::error(
            ErrorCode::ValidationFailed,
            errors,
            "Validation failed",
        )),
        FormOutcome::Saved { data, notification } => HttpResponse::Created().json(
            ApiResponse::success(FormReceipt { data, notification }, "Submitted successfully"),
        ),
        FormOutcome::Failed {
            error,
            notification,
        } if error.is_unauthorized() => HttpResponse::Unauthorized().json(ApiResponse::error(
            ErrorCode::SessionExpired,
            notification,
            error.message(),
        )),
        FormOutcome::Failed {
            error,
            notification,
        } => HttpResponse::BadGateway().json(ApiResponse::error(
            ErrorCode::UpstreamFailed,
            notification,
            error.message(),
        )),
    }
}

// HTTP处理程序
pub async fn create_class(
    service: web::Data<PageService>,
    session: Session,
    form: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    Ok(respond(
        forms::create_class(&service, &session, form.into_inner()).await,
    ))
}

pub async fn create_student(
    service: web::Data<PageService>,
    session: Session,
    form: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    Ok(respond(
        forms::create_student(&service, &session, form.into_inner()).await,
    ))
}

pub async fn create_instructor(
    service: web::Data<PageService>,
    session: Session,
    form: web::Json<CreateInstructorRequest>,
) -> ActixResult<HttpResponse> {
    Ok(respond(
        forms::create_instructor(&service, &session, form.into_inner()).await,
    ))
}

pub async fn create_teacher(
    service: web::Data<PageService>,
    session: Session,
    form: web::Json<CreateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    Ok(respond(
        forms::create_teacher(&service, &session, form.into_inner()).await,
    ))
}

pub async fn register_subscription(
    service: web::Data<PageService>,
    session: Session,
    form: web::Json<RegisterSubscriptionRequest>,
) -> ActixResult<HttpResponse> {
    Ok(respond(
        forms::register_subscription(&service, &session, form.into_inner()).await,
    ))
}

pub async fn schedule_event(
    service: web::Data<PageService>,
    session: Session,
    form: web::Json<ScheduleEventRequest>,
) -> ActixResult<HttpResponse> {
    Ok(respond(
        forms::schedule_event(&service, &session, form.into_inner()).await,
    ))
}

// 配置路由
pub fn configure_form_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/forms")
            .wrap(middlewares::RequireSession)
            .route("/classes", web::post().to(create_class))
            .route("/students", web::post().to(create_student))
            .route("/instructors", web::post().to(create_instructor))
            .route("/teachers", web::post().to(create_teacher))
            .route("/student-subscriptions", web::post().to(register_subscription))
            .route("/schedule", web::post().to(schedule_event)),
    );
}
