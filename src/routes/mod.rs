pub mod forms;

pub mod frontend;

pub mod pages;

pub mod session;

pub use forms::configure_form_routes;
pub use frontend::configure_frontend_routes;
pub use pages::configure_page_routes;
pub use session::configure_session_routes;

use actix_web::HttpResponse;

use crate::errors::PortalError;
use crate::models::{ApiResponse, ErrorCode};

/// 门户错误转为统一响应
pub(crate) fn error_response(err: &PortalError) -> HttpResponse {
    match err {
        PortalError::Validation(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)),
        PortalError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        PortalError::Authentication(msg) => {
            HttpResponse::Unauthorized().json(ApiResponse::error_empty(ErrorCode::Unauthorized, msg))
        }
        PortalError::Request(msg) => HttpResponse::BadGateway()
            .json(ApiResponse::error_empty(ErrorCode::UpstreamFailed, msg)),
        _ => HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            err.format_simple(),
        )),
    }
}
