use serde::Serialize;
use ts_rs::TS;

use super::entities::{StudentStatus, StudentSummary};
use crate::models::Notification;
use crate::view_state::PageStateView;
use crate::view_state::aggregate::{count_where, sum_by};

// 学生页统计卡片（基于完整列表，不受搜索影响）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentStats {
    pub total_students: usize,
    pub active_students: usize,
    pub total_enrollments: i64,
}

impl StudentStats {
    pub fn from_students(students: &[StudentSummary]) -> Self {
        Self {
            total_students: students.len(),
            active_students: count_where(students, |s| s.status == StudentStatus::Active),
            total_enrollments: sum_by(students, |s| s.enrolled_classes),
        }
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentRow {
    #[serde(flatten)]
    #[ts(flatten)]
    pub student: StudentSummary,
    pub selected: bool,
}

// 学生页视图
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentsView {
    // 按搜索词过滤后的学生
    pub students: Vec<StudentRow>,
    pub stats: StudentStats,
    pub state: PageStateView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}
