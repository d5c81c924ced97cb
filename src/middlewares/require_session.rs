/*!
 * 会话中间件
 *
 * 保护门户自身的 JSON 接口：请求必须带有凭证 cookie，并通过 [`AuthGuard`]
 * 的自省检查，否则返回 401。凭证签名由远端 API 验证。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireSession;
 *
 * App::new().app_data(web::Data::new(guard)).service(
 *     web::scope("/api/pages")
 *         .wrap(RequireSession)
 *         .route("/{page}", web::get().to(get_page)),
 * );
 * ```
 *
 * 处理程序可直接使用 `Session` 提取器，中间件已把会话放入请求扩展。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, error, info};

use super::create_error_response;
use crate::config::SessionConfig;
use crate::session::{AuthGuard, AuthState, Session};

#[derive(Clone)]
pub struct RequireSession;

fn session_of(req: &ServiceRequest) -> Session {
    match req.app_data::<web::Data<SessionConfig>>() {
        Some(config) => Session::from_request(req.request(), config),
        None => Session::from_request(req.request(), &SessionConfig::default()),
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, "").map_into_right_body(),
                ));
            }

            let session = session_of(&req);
            if session.is_anonymous() {
                info!("Rejected request to {} without a session", req.path());
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        "Unauthorized: missing session credential",
                    )
                    .map_into_right_body(),
                ));
            }

            let Some(guard) = req.app_data::<web::Data<AuthGuard>>().cloned() else {
                error!("AuthGuard is not registered, rejecting {}", req.path());
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Session guard is not configured",
                    )
                    .map_into_right_body(),
                ));
            };

            if guard.authorize(req.path(), &session).await != AuthState::Authorized {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        "Unauthorized: session rejected",
                    )
                    .map_into_right_body(),
                ));
            }

            debug!(
                "Session of subject {} accepted for {}",
                session.subject_label(),
                req.path()
            );
            req.extensions_mut().insert(session);
            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}
