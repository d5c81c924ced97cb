//! 表单提交
//!
//! 先在本地校验，校验失败不会发出任何请求；提交成功后作废相关查询。
//! 写操作从不重试，成功提示只在后端确认之后给出。

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use super::PageService;
use crate::errors::RequestError;
use crate::models::Notification;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::schedule::requests::ScheduleEventRequest;
use crate::models::staff::requests::{CreateInstructorRequest, CreateTeacherRequest};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::subscriptions::requests::RegisterSubscriptionRequest;
use crate::session::Session;
use crate::utils::FieldErrors;

#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// 本地校验失败，未发出请求
    Invalid(FieldErrors),
    Saved {
        data: Value,
        notification: Notification,
    },
    /// 后端拒绝或不可达
    Failed {
        error: RequestError,
        notification: Notification,
    },
}

struct Submission<'a, B: Serialize> {
    endpoint: &'a str,
    body: B,
    invalidates: &'a [&'a str],
    success: Notification,
    failure: &'a str,
}

async fn submit<B: Serialize>(
    service: &PageService,
    session: &Session,
    submission: Submission<'_, B>,
) -> FormOutcome {
    let result = service
        .query()
        .api()
        .post(submission.endpoint, &submission.body, session.credential())
        .await;

    match result {
        Ok(data) => {
            info!("Form submitted to {}", submission.endpoint);
            for prefix in submission.invalidates {
                service.query().invalidate(session, prefix);
            }
            FormOutcome::Saved {
                data,
                notification: submission.success,
            }
        }
        Err(err) => {
            error!("Form submission to {} failed: {}", submission.endpoint, err);
            FormOutcome::Failed {
                notification: Notification::error(submission.failure),
                error: err,
            }
        }
    }
}

pub async fn create_class(
    service: &PageService,
    session: &Session,
    form: CreateClassRequest,
) -> FormOutcome {
    let body = match form.validate() {
        Ok(body) => body,
        Err(errors) => return FormOutcome::Invalid(errors),
    };
    submit(
        service,
        session,
        Submission {
            endpoint: "/classes",
            body,
            invalidates: &["/classes"],
            success: Notification::success("Success", "Class created successfully!"),
            failure: "Failed to create class",
        },
    )
    .await
}

pub async fn create_student(
    service: &PageService,
    session: &Session,
    form: CreateStudentRequest,
) -> FormOutcome {
    let body = match form.validate() {
        Ok(body) => body,
        Err(errors) => return FormOutcome::Invalid(errors),
    };
    submit(
        service,
        session,
        Submission {
            endpoint: "/students",
            body,
            invalidates: &["/students"],
            success: Notification::success("Success", "Student created successfully!"),
            failure: "Failed to create student. Please try again.",
        },
    )
    .await
}

pub async fn create_instructor(
    service: &PageService,
    session: &Session,
    form: CreateInstructorRequest,
) -> FormOutcome {
    let body = match form.validate() {
        Ok(body) => body,
        Err(errors) => return FormOutcome::Invalid(errors),
    };
    submit(
        service,
        session,
        Submission {
            endpoint: "/instructors",
            body,
            invalidates: &["/instructors"],
            success: Notification::success("Success", "Instructor added successfully"),
            failure: "Failed to add instructor",
        },
    )
    .await
}

pub async fn create_teacher(
    service: &PageService,
    session: &Session,
    form: CreateTeacherRequest,
) -> FormOutcome {
    let body = match form.validate() {
        Ok(body) => body,
        Err(errors) => return FormOutcome::Invalid(errors),
    };
    submit(
        service,
        session,
        Submission {
            endpoint: "/teachers",
            body,
            invalidates: &["/teachers"],
            success: Notification::success("Success", "Teacher added successfully"),
            failure: "Failed to add teacher",
        },
    )
    .await
}

pub async fn register_subscription(
    service: &PageService,
    session: &Session,
    form: RegisterSubscriptionRequest,
) -> FormOutcome {
    let body = match form.validate() {
        Ok(body) => body,
        Err(errors) => return FormOutcome::Invalid(errors),
    };
    submit(
        service,
        session,
        Submission {
            endpoint: "/subscriptions/students",
            body,
            invalidates: &["/subscriptions/students"],
            success: Notification::success(
                "Success!",
                "New subscription has been created successfully.",
            ),
            failure: "There was an error creating the subscription. Please try again.",
        },
    )
    .await
}

pub async fn schedule_event(
    service: &PageService,
    session: &Session,
    form: ScheduleEventRequest,
) -> FormOutcome {
    let (target, body) = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => return FormOutcome::Invalid(errors),
    };
    submit(
        service,
        session,
        Submission {
            endpoint: target.endpoint(),
            body,
            invalidates: &["/classes"],
            success: Notification::success("Success", "Event registered successfully"),
            failure: "Failed to register event",
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::api::mock::MockApiClient;
    use crate::pages::testing::{service, session};
    use crate::query::Freshness;
    use serde_json::json;
    use std::sync::Arc;

    fn class_form(duration: f64) -> CreateClassRequest {
        CreateClassRequest {
            title: "Algebra".to_string(),
            date: "2025-03-10T14:00:00Z".to_string(),
            description: "Linear equations".to_string(),
            duration: Some(duration),
            main_instructor_id: "3f1c7d0e-8a2b-4c3d-9e4f-5a6b7c8d9e0f".to_string(),
        }
    }

    #[actix_web::test]
    async fn test_negative_duration_never_reaches_network() {
        let mock = Arc::new(MockApiClient::new());

        let outcome = create_class(&service(&mock), &session(), class_form(-5.0)).await;
        match outcome {
            FormOutcome::Invalid(errors) => assert!(errors.get("duration").is_some()),
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert!(mock.calls().is_empty());
    }

    #[actix_web::test]
    async fn test_created_class_invalidates_class_queries() {
        let mock = Arc::new(MockApiClient::new());
        mock.on_get("/classes/summary", json!([]));
        mock.on_post("/classes", json!({ "id": 10 }));
        let service = service(&mock);
        let session = session();

        service
            .query()
            .fetch(&session, "/classes/summary", Freshness::Standard)
            .await
            .unwrap();
        let outcome = create_class(&service, &session, class_form(60.0)).await;
        match outcome {
            FormOutcome::Saved { data, notification } => {
                assert_eq!(data["id"], 10);
                assert_eq!(
                    notification.description.as_deref(),
                    Some("Class created successfully!")
                );
            }
            other => panic!("expected success, got {other:?}"),
        }

        service
            .query()
            .fetch(&session, "/classes/summary", Freshness::Standard)
            .await
            .unwrap();
        assert_eq!(mock.calls_to(Method::Get, "/classes/summary"), 2);

        let posted = mock
            .calls()
            .into_iter()
            .find(|c| c.method == Method::Post)
            .unwrap();
        assert_eq!(posted.body.unwrap()["duration"], 60);
    }

    #[actix_web::test]
    async fn test_failed_submission_is_not_retried() {
        let mock = Arc::new(MockApiClient::new());
        mock.fail_post("/teachers", 500);

        let form = CreateTeacherRequest {
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
        };
        match create_teacher(&service(&mock), &session(), form).await {
            FormOutcome::Failed {
                error,
                notification,
            } => {
                assert_eq!(error.status_code(), Some(500));
                assert!(notification.is_error());
                assert_eq!(notification.description.as_deref(), Some("Failed to add teacher"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(mock.calls_to(Method::Post, "/teachers"), 1);
    }

    #[actix_web::test]
    async fn test_schedule_event_targets_endpoint() {
        let mock = Arc::new(MockApiClient::new());
        mock.on_post("/schedule/class", json!({}));

        let form = ScheduleEventRequest {
            target: "class".to_string(),
            entity_id: "c1".to_string(),
            date: "2025-04-01".to_string(),
        };
        let outcome = schedule_event(&service(&mock), &session(), form).await;
        assert!(matches!(outcome, FormOutcome::Saved { .. }));

        let call = &mock.calls()[0];
        assert_eq!(call.path, "/schedule/class");
        assert_eq!(
            call.body.clone().unwrap(),
            json!({ "entityId": "c1", "date": "2025-04-01T00:00:00.000Z" })
        );
    }
}
