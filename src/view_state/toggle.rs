use std::collections::HashSet;
use std::hash::Hash;

/// 展开 / 选中状态集合
///
/// 成员存在即表示卡片已展开或学生已选中；只保证成员判断，不保证顺序。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSet<T: Eq + Hash> {
    members: HashSet<T>,
}

impl<T: Eq + Hash> Default for ToggleSet<T> {
    fn default() -> Self {
        Self {
            members: HashSet::new(),
        }
    }
}

impl<T: Eq + Hash + Clone + Ord> ToggleSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 存在则移除，不存在则加入；返回操作后的成员状态
    pub fn toggle(&mut self, id: T) -> bool {
        if self.members.remove(&id) {
            false
        } else {
            self.members.insert(id);
            true
        }
    }

    pub fn contains(&self, id: &T) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// 排序后的快照，用于稳定输出
    pub fn to_sorted_vec(&self) -> Vec<T> {
        let mut items: Vec<T> = self.members.iter().cloned().collect();
        items.sort();
        items
    }
}
