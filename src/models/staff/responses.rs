use serde::Serialize;
use ts_rs::TS;

use super::entities::{Instructor, Teacher};
use crate::models::Notification;

// 讲师页视图
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct InstructorsView {
    pub instructors: Vec<Instructor>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

// 教师页视图
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct TeachersView {
    pub teachers: Vec<Teacher>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}
