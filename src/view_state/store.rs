//! 页面交互状态存储
//!
//! 每个会话、每个页面一份 `PageState`，生命周期从页面挂载到卸载，
//! 长时间无访问时自动过期。

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;
use ts_rs::TS;

use super::reducer::{Effect, PageIntent, PageState, PageStateView};
use crate::config::UiStateConfig;
use crate::session::Session;

/// 带有交互状态的页面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "../frontend/src/types/generated/page.ts")]
pub enum PageKind {
    Dashboard,
    Classes,
    Students,
    StudentSubscriptions,
    Schedule,
    Subscriptions,
    Instructors,
    Teachers,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Dashboard => "dashboard",
            PageKind::Classes => "classes",
            PageKind::Students => "students",
            PageKind::StudentSubscriptions => "student-subscriptions",
            PageKind::Schedule => "schedule",
            PageKind::Subscriptions => "subscriptions",
            PageKind::Instructors => "instructors",
            PageKind::Teachers => "teachers",
        }
    }

    /// 路径段 (大小写不敏感) 对应的页面
    pub fn from_slug(slug: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(slug.to_lowercase())).ok()
    }

    /// 支持确认式状态切换的页面
    pub fn supports_status_toggle(&self) -> bool {
        matches!(self, PageKind::Classes | PageKind::Students)
    }
}

#[derive(Clone)]
pub struct UiStateStore {
    inner: Cache<String, Arc<Mutex<PageState>>>,
}

impl UiStateStore {
    pub fn new(config: &UiStateConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_idle(Duration::from_secs(config.idle_timeout))
            .build();
        debug!(
            "UiStateStore initialized with max capacity: {}",
            config.max_capacity
        );
        Self { inner }
    }

    fn key(session: &Session, page: PageKind) -> String {
        format!("{}:{}", session.state_key(), page.as_str())
    }

    async fn entry(&self, session: &Session, page: PageKind) -> Arc<Mutex<PageState>> {
        self.inner
            .get_with(Self::key(session, page), async {
                Arc::new(Mutex::new(PageState::default()))
            })
            .await
    }

    /// 当前状态快照；未挂载的页面返回默认状态
    pub async fn snapshot(&self, session: &Session, page: PageKind) -> PageStateView {
        match self.inner.get(&Self::key(session, page)).await {
            Some(state) => state
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .snapshot(),
            None => PageStateView::default(),
        }
    }

    /// 读取完整状态（用于计算过滤、展开等派生值）
    pub async fn read<R>(
        &self,
        session: &Session,
        page: PageKind,
        f: impl FnOnce(&PageState) -> R,
    ) -> R {
        match self.inner.get(&Self::key(session, page)).await {
            Some(state) => f(&state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())),
            None => f(&PageState::default()),
        }
    }

    /// 交给 reducer 处理一次操作，返回副作用和新的快照
    pub async fn dispatch(
        &self,
        session: &Session,
        page: PageKind,
        intent: PageIntent,
    ) -> (Option<Effect>, PageStateView) {
        let entry = self.entry(session, page).await;
        let mut state = entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let effect = state.apply(intent);
        (effect, state.snapshot())
    }

    /// 页面卸载
    pub async fn unmount(&self, session: &Session, page: PageKind) {
        self.inner.invalidate(&Self::key(session, page)).await;
    }
}
