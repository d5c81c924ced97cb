use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use ts_rs::TS;

use super::entities::{
    CurrentSubscription, SubscriptionPlan, SubscriptionRecord, SubscriptionStatus,
    SubscriptionType,
};
use super::requests::SubscriptionFilters;
use crate::models::Notification;
use crate::utils::validate::parse_timestamp;
use crate::view_state::aggregate::{count_where, round_currency, sum_by_f64};

// 学生订阅页统计卡片
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct SubscriptionStats {
    pub total_subscriptions: usize,
    pub active_subscriptions: usize,
    // 所有 active 订阅金额之和
    pub monthly_revenue: f64,
    // createdAt 与 now 处于同一年同一月 (UTC)
    pub new_this_month: usize,
}

impl SubscriptionStats {
    pub fn from_records(records: &[SubscriptionRecord], now: DateTime<Utc>) -> Self {
        let is_active = |r: &SubscriptionRecord| r.status == SubscriptionStatus::Active;
        let active: Vec<SubscriptionRecord> =
            records.iter().filter(|r| is_active(r)).cloned().collect();

        Self {
            total_subscriptions: records.len(),
            active_subscriptions: active.len(),
            monthly_revenue: round_currency(sum_by_f64(&active, |r| r.amount)),
            new_this_month: count_where(records, |r| {
                parse_timestamp(&r.created_at)
                    .map(|created| created.year() == now.year() && created.month() == now.month())
                    .unwrap_or(false)
            }),
        }
    }
}

// 学生订阅页视图
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct StudentSubscriptionsView {
    pub subscriptions: Vec<SubscriptionRecord>,
    pub stats: SubscriptionStats,
    pub subscription_types: Vec<SubscriptionType>,
    pub filters: SubscriptionFilters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct PlanCard {
    #[serde(flatten)]
    #[ts(flatten)]
    pub plan: SubscriptionPlan,
    pub is_current: bool,
}

// 套餐页视图
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct SubscriptionsView {
    pub plans: Vec<PlanCard>,
    pub current: Option<CurrentSubscription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

// 结算页视图
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct CheckoutView {
    pub plan: SubscriptionPlan,
}
