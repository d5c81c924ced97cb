use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::confirm::{PendingStatusChange, StatusToggle};
use super::toggle::ToggleSet;
use crate::models::EntityId;

/// 页面上的一次用户操作
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/page.ts")]
pub enum PageIntent {
    SetSearch {
        term: String,
    },
    ToggleExpanded {
        id: EntityId,
    },
    ToggleSelected {
        id: EntityId,
    },
    ClearSelection,
    RequestStatusToggle {
        id: EntityId,
        #[serde(default)]
        label: Option<String>,
        #[serde(rename = "newStatus")]
        new_status: String,
    },
    ConfirmStatusToggle,
    CancelStatusToggle,
}

/// reducer 产生的副作用，由页面处理器执行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ChangeStatus(PendingStatusChange),
}

/// 单个页面的交互状态
#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub search: String,
    pub expanded: ToggleSet<EntityId>,
    pub selected: ToggleSet<EntityId>,
    pub status_toggle: StatusToggle,
}

/// 返回给前端的状态快照
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/page.ts")]
pub struct PageStateView {
    pub search: String,
    pub expanded: Vec<EntityId>,
    pub selected: Vec<EntityId>,
    pub pending_status_change: Option<PendingStatusChange>,
}

impl PageState {
    pub fn apply(&mut self, intent: PageIntent) -> Option<Effect> {
        match intent {
            PageIntent::SetSearch { term } => {
                self.search = term;
                None
            }
            PageIntent::ToggleExpanded { id } => {
                self.expanded.toggle(id);
                None
            }
            PageIntent::ToggleSelected { id } => {
                self.selected.toggle(id);
                None
            }
            PageIntent::ClearSelection => {
                self.selected.clear();
                None
            }
            PageIntent::RequestStatusToggle {
                id,
                label,
                new_status,
            } => {
                self.status_toggle.request(PendingStatusChange {
                    id,
                    label,
                    new_status,
                });
                None
            }
            PageIntent::ConfirmStatusToggle => self.status_toggle.confirm().map(Effect::ChangeStatus),
            PageIntent::CancelStatusToggle => {
                self.status_toggle.cancel();
                None
            }
        }
    }

    pub fn snapshot(&self) -> PageStateView {
        PageStateView {
            search: self.search.clone(),
            expanded: self.expanded.to_sorted_vec(),
            selected: self.selected.to_sorted_vec(),
            pending_status_change: self.status_toggle.pending().cloned(),
        }
    }
}
