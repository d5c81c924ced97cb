//! 页面服务层
//!
//! 每个页面一个构建函数：通过查询层取数，结合页面交互状态计算出
//! 可直接渲染的视图模型。表单提交与状态切换也在这里完成。

pub mod classes;
pub mod dashboard;
pub mod forms;
pub mod intents;
pub mod schedule;
pub mod staff;
pub mod students;
pub mod subscriptions;

use serde::Serialize;
use tracing::warn;
use ts_rs::TS;

use crate::config::SessionConfig;
use crate::errors::RequestError;
use crate::models::Notification;
use crate::query::QueryClient;
use crate::view_state::UiStateStore;

/// 页面构建结果
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome<T> {
    Ready(T),
    /// 需要前端跳转，例如会话过期
    Redirect { location: String },
}

impl<T> PageOutcome<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            PageOutcome::Ready(view) => Some(view),
            PageOutcome::Redirect { .. } => None,
        }
    }
}

/// 重定向响应的数据部分
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/page.ts")]
pub struct RedirectTarget {
    pub location: String,
}

#[derive(Clone)]
pub struct PageService {
    query: QueryClient,
    ui_state: UiStateStore,
    session: SessionConfig,
}

impl PageService {
    pub fn new(query: QueryClient, ui_state: UiStateStore, session: SessionConfig) -> Self {
        Self {
            query,
            ui_state,
            session,
        }
    }

    pub fn query(&self) -> &QueryClient {
        &self.query
    }

    pub fn ui_state(&self) -> &UiStateStore {
        &self.ui_state
    }

    pub fn session_config(&self) -> &SessionConfig {
        &self.session
    }
}

/// 列表加载失败时的提示，页面退回空数据
pub(crate) fn load_failed(what: &str, err: &RequestError) -> Notification {
    warn!("Failed to load {}: {}", what, err);
    Notification::error(format!("Failed to load {what}. Please try again."))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use super::PageService;
    use crate::api::Api;
    use crate::api::mock::MockApiClient;
    use crate::config::{BackendConfig, QueryConfig, SessionConfig, UiStateConfig};
    use crate::query::QueryClient;
    use crate::session::{AuthGuard, Credential, Session};
    use crate::view_state::UiStateStore;
    use serde_json::json;

    pub fn service(mock: &Arc<MockApiClient>) -> PageService {
        let api = Api::new(mock.clone(), &BackendConfig::default());
        let query = QueryClient::new(
            api,
            &QueryConfig {
                retry: 0,
                ..QueryConfig::default()
            },
        );
        PageService::new(
            query,
            UiStateStore::new(&UiStateConfig::default()),
            SessionConfig::default(),
        )
    }

    pub fn guard(mock: &Arc<MockApiClient>) -> AuthGuard {
        AuthGuard::new(
            Api::new(mock.clone(), &BackendConfig::default()),
            SessionConfig::default(),
        )
    }

    /// 自省接口始终通过的守卫
    pub fn accepting_guard(mock: &Arc<MockApiClient>) -> AuthGuard {
        mock.on_get("/auth/token", json!({ "valid": true }));
        guard(mock)
    }

    pub fn session() -> Session {
        Session::with_credential(Credential::new("header.payload.signature").unwrap())
    }
}
