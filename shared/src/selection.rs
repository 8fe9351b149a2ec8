//! 批量选择
//!
//! 批量模式的每次切换都会清空已选项；切换标签页时整体复位。

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkSelection {
    active: bool,
    selected: BTreeSet<i64>,
}

impl BulkSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn toggle_mode(&mut self) {
        self.active = !self.active;
        self.selected.clear();
    }

    /// 退出批量模式并清空
    pub fn reset(&mut self) {
        self.active = false;
        self.selected.clear();
    }

    pub fn toggle(&mut self, id: i64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    /// 已全选时取消全选，否则选中全部
    pub fn toggle_all(&mut self, ids: impl IntoIterator<Item = i64>) {
        let ids: BTreeSet<i64> = ids.into_iter().collect();
        if !ids.is_empty() && ids.is_subset(&self.selected) {
            self.selected.retain(|id| !ids.contains(id));
        } else {
            self.selected.extend(ids);
        }
    }

    pub fn all_selected(&self, ids: impl IntoIterator<Item = i64>) -> bool {
        let mut any = false;
        for id in ids {
            any = true;
            if !self.selected.contains(&id) {
                return false;
            }
        }
        any
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggling_mode_clears_selection() {
        let mut sel = BulkSelection::new();
        sel.toggle_mode();
        sel.toggle(1);
        sel.toggle(2);
        assert_eq!(sel.len(), 2);

        sel.toggle_mode();
        assert!(!sel.is_active());
        assert!(sel.is_empty());

        sel.toggle(5);
        sel.toggle_mode();
        assert!(sel.is_active());
        assert!(sel.is_empty());
    }

    #[test]
    fn test_toggle_all() {
        let mut sel = BulkSelection::new();
        sel.toggle(2);
        sel.toggle_all([1, 2, 3]);
        assert!(sel.all_selected([1, 2, 3]));
        sel.toggle_all([1, 2, 3]);
        assert!(sel.is_empty());
        assert!(!sel.all_selected(Vec::<i64>::new()));
    }

    #[test]
    fn test_toggle_single() {
        let mut sel = BulkSelection::new();
        sel.toggle(4);
        assert!(sel.is_selected(4));
        sel.toggle(4);
        assert!(!sel.is_selected(4));
    }
}
