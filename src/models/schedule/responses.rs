use serde::Serialize;
use ts_rs::TS;

use super::entities::ScheduleEvent;
use crate::models::Notification;
use crate::models::classes::entities::ClassRecord;
use crate::models::students::entities::StudentRecord;

// 日程页视图
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleView {
    pub events: Vec<ScheduleEvent>,
    // 排课弹窗的候选项
    pub class_options: Vec<ClassRecord>,
    pub student_options: Vec<StudentRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}
