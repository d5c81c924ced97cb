use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

use crate::models::Notification;

// 仪表盘视图
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardView {
    // GET /dashboard 原样透传
    pub summary: Value,
    // 顶栏显示的机构名称
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}
