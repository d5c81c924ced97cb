use serde_json::Value;

use super::{PageOutcome, PageService, load_failed};
use crate::models::dashboard::entities::CustomerName;
use crate::models::dashboard::responses::DashboardView;
use crate::query::Freshness;
use crate::session::Session;

pub async fn dashboard(service: &PageService, session: &Session) -> PageOutcome<DashboardView> {
    let query = service.query();
    let (summary, name) = tokio::join!(
        query.fetch(session, "/dashboard", Freshness::Standard),
        query.fetch(session, "/customer/name", Freshness::Standard),
    );

    let mut notification = None;
    let summary = summary.unwrap_or_else(|err| {
        notification = Some(load_failed("dashboard", &err));
        Value::Null
    });
    // 名称只用于顶栏，失败时静默
    let display_name = name.ok().and_then(CustomerName::from_value);

    PageOutcome::Ready(DashboardView {
        summary,
        display_name,
        notification,
    })
}
