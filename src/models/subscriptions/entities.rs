use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::EntityId;
use crate::models::common::lenient::{lenient_f64, null_as_default, string_or_number};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Inactive,
}

// 学生订阅记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct SubscriptionRecord {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub student_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub student_email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subscription_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: SubscriptionStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

// 订阅类型字典
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct SubscriptionType {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

// 机构自身可购买的套餐
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct SubscriptionPlan {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    // 展示用价格，例如 "$29"
    #[serde(default, deserialize_with = "string_or_number")]
    pub price: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub period: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popular: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<String>,
}

// 当前套餐
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct CurrentSubscription {
    #[serde(default)]
    pub plan_id: Option<EntityId>,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub next_billing: Option<String>,
    #[serde(default)]
    pub access_until: Option<String>,
}
