//! 页面派生状态：统计、搜索过滤、展开/选中集合、确认式状态切换

pub mod aggregate;
pub mod confirm;
pub mod filter;
pub mod reducer;
pub mod store;
pub mod toggle;

pub use confirm::{PendingStatusChange, StatusToggle};
pub use filter::{Searchable, filter_by_search};
pub use reducer::{Effect, PageIntent, PageState, PageStateView};
pub use store::{PageKind, UiStateStore};
pub use toggle::ToggleSet;
