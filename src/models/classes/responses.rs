use serde::Serialize;
use ts_rs::TS;

use super::entities::{ClassStatus, ClassSummary};
use crate::models::Notification;
use crate::view_state::PageStateView;
use crate::view_state::aggregate::{average_rounded, count_where, sum_by};

// 班级页统计卡片
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassStats {
    pub total_classes: usize,
    pub total_students: i64,
    // 平均时长 (分钟)，四舍五入
    pub avg_duration: i64,
    pub this_week_sessions: i64,
    pub active_classes: usize,
}

impl ClassStats {
    pub fn from_classes(classes: &[ClassSummary]) -> Self {
        Self {
            total_classes: classes.len(),
            total_students: sum_by(classes, |c| c.students),
            avg_duration: average_rounded(classes, |c| c.duration),
            this_week_sessions: sum_by(classes, |c| c.scheduled_sessions),
            active_classes: count_where(classes, |c| c.status == ClassStatus::Active),
        }
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassCard {
    #[serde(flatten)]
    #[ts(flatten)]
    pub class: ClassSummary,
    pub expanded: bool,
}

// 班级页视图
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassesView {
    pub classes: Vec<ClassCard>,
    pub stats: ClassStats,
    pub state: PageStateView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classes() -> Vec<ClassSummary> {
        serde_json::from_value(json!([
            { "id": 1, "title": "A", "students": 10, "duration": 45, "status": "active", "scheduledSessions": 2 },
            { "id": 2, "title": "B", "students": 5, "duration": 60, "status": "inactive", "scheduledSessions": 1 },
        ]))
        .unwrap()
    }

    #[test]
    fn test_stats() {
        let stats = ClassStats::from_classes(&classes());
        assert_eq!(
            stats,
            ClassStats {
                total_classes: 2,
                total_students: 15,
                avg_duration: 53,
                this_week_sessions: 3,
                active_classes: 1,
            }
        );
    }

    #[test]
    fn test_empty_stats_are_zero() {
        assert_eq!(ClassStats::from_classes(&[]), ClassStats::default());
    }
}
