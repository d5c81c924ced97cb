use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::lenient::null_as_default;
use crate::utils::validate::{FieldErrors, parse_timestamp, to_iso_string};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleTarget {
    Class,
    Student,
}

impl ScheduleTarget {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ScheduleTarget::Class => "/schedule/class",
            ScheduleTarget::Student => "/schedule/student",
        }
    }
}

// 排课表单
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleEventRequest {
    // class | student
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub target: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entity_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduleEntry {
    pub entity_id: String,
    pub date: String,
}

impl ScheduleEventRequest {
    pub fn validate(&self) -> Result<(ScheduleTarget, NewScheduleEntry), FieldErrors> {
        let mut errors = FieldErrors::new();

        let target = match self.target.trim() {
            "class" => Some(ScheduleTarget::Class),
            "student" => Some(ScheduleTarget::Student),
            _ => {
                errors.add("type", "Type must be class or student");
                None
            }
        };

        let entity_id = self.entity_id.trim().to_string();
        if entity_id.is_empty() {
            errors.add("entityId", "Please select an option");
        }

        let date = match parse_timestamp(&self.date) {
            Ok(date) => to_iso_string(&date),
            Err(_) if self.date.trim().is_empty() => {
                errors.add("date", "Please select a date");
                String::new()
            }
            Err(msg) => {
                errors.add("date", msg);
                String::new()
            }
        };

        match target {
            Some(target) if errors.is_empty() => Ok((target, NewScheduleEntry { entity_id, date })),
            _ => Err(errors),
        }
    }
}
