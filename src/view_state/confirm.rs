use serde::Serialize;
use ts_rs::TS;

use crate::models::EntityId;

/// 等待用户确认的状态切换
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/page.ts")]
pub struct PendingStatusChange {
    pub id: EntityId,
    pub label: Option<String>,
    pub new_status: String,
}

/// 两步提交：先请求，再确认；只有确认才会产生写操作
#[derive(Debug, Clone, Default)]
pub struct StatusToggle {
    pending: Option<PendingStatusChange>,
}

impl StatusToggle {
    /// 发起请求，覆盖之前未确认的请求
    pub fn request(&mut self, change: PendingStatusChange) {
        self.pending = Some(change);
    }

    /// 确认并取出待执行的切换
    pub fn confirm(&mut self) -> Option<PendingStatusChange> {
        self.pending.take()
    }

    /// 取消，丢弃待确认的切换
    pub fn cancel(&mut self) -> Option<PendingStatusChange> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<&PendingStatusChange> {
        self.pending.as_ref()
    }
}
