use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::EntityId;
use crate::models::common::lenient::{lenient_i64, null_as_default};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub enum ClassStatus {
    #[default]
    Active,
    Inactive,
}

// GET /classes/summary 的单个班级
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassSummary {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    // 旧版接口字段名为 instructor
    #[serde(default, alias = "instructor")]
    pub teacher: Option<String>,
    // 学生人数
    #[serde(default, deserialize_with = "lenient_i64")]
    pub students: i64,
    // 时长 (分钟)
    #[serde(default, deserialize_with = "lenient_i64")]
    pub duration: i64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ClassStatus,
    // 本周排课次数
    #[serde(default, deserialize_with = "lenient_i64")]
    pub scheduled_sessions: i64,
}

// GET /classes 的单个班级，用于日程
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassRecord {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub duration: i64,
}
