//! 页面交互
//!
//! 前端把每个用户操作作为 `PageIntent` 发来，交给页面 reducer 处理；
//! 确认后的状态切换在这里发往后端。

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};
use ts_rs::TS;

use super::PageService;
use crate::errors::PortalError;
use crate::models::{EntityId, Notification};
use crate::models::classes::entities::ClassStatus;
use crate::models::classes::requests::StatusChange;
use crate::models::students::entities::StudentStatus;
use crate::session::Session;
use crate::view_state::{Effect, PageIntent, PageKind, PageStateView, PendingStatusChange};

/// 一次交互之后的页面状态
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/page.ts")]
pub struct IntentResult {
    pub state: PageStateView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

fn check_status(page: PageKind, status: &str) -> Result<(), PortalError> {
    let value = Value::String(status.to_string());
    let valid = match page {
        PageKind::Classes => serde_json::from_value::<ClassStatus>(value).is_ok(),
        PageKind::Students => serde_json::from_value::<StudentStatus>(value).is_ok(),
        _ => {
            return Err(PortalError::validation(format!(
                "Page {} does not support status changes",
                page.as_str()
            )));
        }
    };
    if valid {
        Ok(())
    } else {
        Err(PortalError::validation(format!("Unknown status: {status}")))
    }
}

/// 拼进后端路径前的 ID 检查，点段会被 URL 规范化吃掉
fn check_entity_id(id: &EntityId) -> Result<(), PortalError> {
    match id.as_str().trim() {
        "" | "." | ".." => Err(PortalError::validation(format!("Invalid entity id: {id}"))),
        _ => Ok(()),
    }
}

pub async fn dispatch(
    service: &PageService,
    session: &Session,
    page: PageKind,
    intent: PageIntent,
) -> Result<IntentResult, PortalError> {
    match &intent {
        PageIntent::RequestStatusToggle { id, new_status, .. } => {
            check_entity_id(id)?;
            check_status(page, new_status)?
        }
        PageIntent::ConfirmStatusToggle | PageIntent::CancelStatusToggle
            if !page.supports_status_toggle() =>
        {
            return Err(PortalError::validation(format!(
                "Page {} does not support status changes",
                page.as_str()
            )));
        }
        _ => {}
    }

    let (effect, state) = service.ui_state().dispatch(session, page, intent).await;
    let notification = match effect {
        Some(Effect::ChangeStatus(change)) => Some(change_status(service, session, page, change).await),
        None => None,
    };

    Ok(IntentResult {
        state,
        notification,
    })
}

/// 执行已确认的状态切换，成功提示只在后端确认后给出
async fn change_status(
    service: &PageService,
    session: &Session,
    page: PageKind,
    change: PendingStatusChange,
) -> Notification {
    let collection = format!("/{}", page.as_str());
    let path = format!(
        "{collection}/{}/status",
        urlencoding::encode(change.id.as_str())
    );
    let body = StatusChange {
        status: change.new_status.clone(),
    };

    match service
        .query()
        .api()
        .post(&path, &body, session.credential())
        .await
    {
        Ok(_) => {
            info!("Status of {} changed to {}", path, change.new_status);
            service.query().invalidate(session, &collection);
            status_changed(page, &change)
        }
        Err(err) => {
            error!("Failed to change status via {}: {}", path, err);
            match page {
                PageKind::Students => Notification::error("Failed to change student status"),
                _ => Notification::error("Failed to change class status"),
            }
        }
    }
}

fn status_changed(page: PageKind, change: &PendingStatusChange) -> Notification {
    match page {
        PageKind::Students => {
            let (title, verb) = if change.new_status == StudentStatus::Active.as_str() {
                ("Student Activated", "activated")
            } else {
                ("Student Deactivated", "deactivated")
            };
            Notification::success(title, format!("Student has been {verb} successfully."))
        }
        _ => {
            let label = change.label.as_deref().unwrap_or("Class");
            Notification::success(
                format!("Class {}", change.new_status),
                format!("{label} has been marked as {}", change.new_status),
            )
        }
    }
}
