use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::models::EntityId;
use crate::models::classes::entities::ClassRecord;
use crate::utils::validate::parse_timestamp;

// 日历中的一个班级事件
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleEvent {
    pub id: EntityId,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
}

impl ScheduleEvent {
    /// 结束时间 = 开始时间 + 时长 (分钟)
    ///
    /// 日期无法解析或结束时间超出可表示范围时返回 None。
    pub fn from_class(class: &ClassRecord) -> Option<Self> {
        let start = parse_timestamp(&class.date).ok()?;
        let duration = TimeDelta::try_minutes(class.duration.max(0))?;
        let end = start.checked_add_signed(duration)?;
        Some(Self {
            id: class.id.clone(),
            title: class.title.clone(),
            start,
            end,
            description: class.description.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_end_adds_duration() {
        let class: ClassRecord = serde_json::from_value(json!({
            "id": "c1", "title": "Algebra", "date": "2025-03-10T14:00:00Z", "description": "", "duration": 90
        }))
        .unwrap();
        let event = ScheduleEvent::from_class(&class).unwrap();
        assert_eq!(event.end - event.start, TimeDelta::minutes(90));
    }

    #[test]
    fn test_out_of_range_duration_is_skipped() {
        let huge: ClassRecord = serde_json::from_value(json!({
            "id": "c3", "title": "Forever", "date": "2025-03-10T14:00:00Z", "duration": i64::MAX / 2
        }))
        .unwrap();
        assert!(ScheduleEvent::from_class(&huge).is_none());

        let late: ClassRecord = serde_json::from_value(json!({
            "id": "c4", "title": "Late", "date": "9999-12-31T23:00:00Z", "duration": 1_000_000_000_000_i64
        }))
        .unwrap();
        assert!(ScheduleEvent::from_class(&late).is_none());
    }

    #[test]
    fn test_unparsable_date_is_skipped() {
        let class: ClassRecord =
            serde_json::from_value(json!({ "id": "c2", "title": "Broken", "date": "soon" })).unwrap();
        assert!(ScheduleEvent::from_class(&class).is_none());
    }
}
