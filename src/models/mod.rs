pub mod classes;
pub mod common;
pub mod dashboard;
pub mod schedule;
pub mod staff;
pub mod students;
pub mod subscriptions;

pub use common::entity_id::EntityId;
pub use common::notification::{Notification, NotificationVariant};
pub use common::response::ApiResponse;

use serde::{Deserialize, Serialize};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务响应码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 2000,
    SessionExpired = 2001,
    NotFound = 4004,
    UpstreamFailed = 5002,
    InternalServerError = 5000,
}
