use chrono::{DateTime, Utc};
use tracing::debug;

use super::{PageOutcome, PageService, load_failed};
use crate::errors::PortalError;
use crate::models::subscriptions::entities::{
    CurrentSubscription, SubscriptionPlan, SubscriptionRecord, SubscriptionType,
};
use crate::models::subscriptions::requests::SubscriptionFilters;
use crate::models::subscriptions::responses::{
    CheckoutView, PlanCard, StudentSubscriptionsView, SubscriptionStats, SubscriptionsView,
};
use crate::query::Freshness;
use crate::session::Session;

pub const STUDENT_SUBSCRIPTIONS_PATH: &str = "/subscriptions/students";
pub const SUBSCRIPTION_TYPES_PATH: &str = "/subscriptions/types";
pub const PLANS_PATH: &str = "/subscription/plans";
pub const CURRENT_PLAN_PATH: &str = "/subscription/current";

/// 学生订阅页，`now` 用于计算本月新增
pub async fn student_subscriptions(
    service: &PageService,
    session: &Session,
    filters: SubscriptionFilters,
    now: DateTime<Utc>,
) -> PageOutcome<StudentSubscriptionsView> {
    let query = service.query();
    let path = filters.to_path();
    let (records, types) = tokio::join!(
        query.fetch_as::<Vec<SubscriptionRecord>>(session, &path, Freshness::Standard),
        query.fetch_as::<Vec<SubscriptionType>>(session, SUBSCRIPTION_TYPES_PATH, Freshness::Long),
    );

    let (subscriptions, notification) = match records {
        Ok(records) => (records, None),
        Err(err) => (Vec::new(), Some(load_failed("student subscriptions", &err))),
    };
    // 类型字典只用于下拉框
    let subscription_types = types.unwrap_or_default();

    PageOutcome::Ready(StudentSubscriptionsView {
        stats: SubscriptionStats::from_records(&subscriptions, now),
        subscriptions,
        subscription_types,
        filters,
        notification,
    })
}

/// 套餐页
pub async fn subscriptions(
    service: &PageService,
    session: &Session,
) -> PageOutcome<SubscriptionsView> {
    let query = service.query();
    let (plans, current) = tokio::join!(
        query.fetch_as::<Vec<SubscriptionPlan>>(session, PLANS_PATH, Freshness::Long),
        query.fetch_as::<CurrentSubscription>(session, CURRENT_PLAN_PATH, Freshness::Standard),
    );

    let (plans, notification) = match plans {
        Ok(plans) => (plans, None),
        Err(err) => (Vec::new(), Some(load_failed("subscription plans", &err))),
    };
    // 没有当前套餐时后端返回 404
    let current = current
        .map_err(|err| debug!("No current subscription: {}", err))
        .ok();
    let current_id = current.as_ref().and_then(|c| c.plan_id.clone());

    PageOutcome::Ready(SubscriptionsView {
        plans: plans
            .into_iter()
            .map(|plan| PlanCard {
                is_current: current_id.as_ref() == Some(&plan.id),
                plan,
            })
            .collect(),
        current,
        notification,
    })
}

/// 结算页，套餐不存在时返回 NotFound
pub async fn checkout(
    service: &PageService,
    session: &Session,
    plan_id: &str,
) -> Result<CheckoutView, PortalError> {
    let plans = service
        .query()
        .fetch_as::<Vec<SubscriptionPlan>>(session, PLANS_PATH, Freshness::Long)
        .await?;

    plans
        .into_iter()
        .find(|plan| plan.id.as_str() == plan_id)
        .map(|plan| CheckoutView { plan })
        .ok_or_else(|| PortalError::not_found(format!("Subscription plan {plan_id} not found")))
}
