//! 列排序模块
//!
//! 三态排序：未排序 -> 升序 -> 降序 -> 未排序。
//! 优先级列使用序数比较（高 > 中 > 低，土耳其语与英语标签均可，不区分大小写），
//! 其他列数字按数值、字符串按小写比较，缺失值最小。

use crate::Task;
use std::cmp::Ordering;

// =========================================================
// 优先级 (Priority)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriorityLevel {
    Unknown = 0,
    Low = 1,
    Medium = 2,
    High = 3,
}

impl PriorityLevel {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "yüksek" | "high" => PriorityLevel::High,
            "orta" | "medium" => PriorityLevel::Medium,
            "düşük" | "low" => PriorityLevel::Low,
            _ => PriorityLevel::Unknown,
        }
    }

    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            PriorityLevel::High => "Yüksek",
            PriorityLevel::Medium => "Orta",
            PriorityLevel::Low => "Düşük",
            PriorityLevel::Unknown => "Belirsiz",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            PriorityLevel::High => "badge badge-error",
            PriorityLevel::Medium => "badge badge-warning",
            PriorityLevel::Low => "badge badge-success",
            PriorityLevel::Unknown => "badge badge-ghost",
        }
    }
}

/// 按优先级比较两个标签
pub fn compare_priority(a: &str, b: &str) -> Ordering {
    PriorityLevel::parse(a).cmp(&PriorityLevel::parse(b))
}

// =========================================================
// 排序键 (Sort Keys)
// =========================================================

/// 变体顺序即跨类型顺序，Missing 最小
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Missing,
    Number(i64),
    Rank(u8),
    Text(String),
}

impl SortKey {
    pub fn text(value: &str) -> Self {
        if value.is_empty() {
            SortKey::Missing
        } else {
            SortKey::Text(value.to_lowercase())
        }
    }
}

pub trait Sortable {
    type Column: Copy + PartialEq;

    fn sort_key(&self, column: Self::Column) -> SortKey;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskColumn {
    Id,
    Name,
    Description,
    Assignee,
    Priority,
    Status,
}

impl Sortable for Task {
    type Column = TaskColumn;

    fn sort_key(&self, column: TaskColumn) -> SortKey {
        match column {
            TaskColumn::Id => SortKey::Number(self.id),
            TaskColumn::Name => SortKey::text(&self.name),
            TaskColumn::Description => SortKey::text(&self.description),
            TaskColumn::Assignee => SortKey::Number(self.assignee_id),
            TaskColumn::Priority => SortKey::Rank(PriorityLevel::parse(&self.priority).rank()),
            TaskColumn::Status => SortKey::text(self.status.as_str()),
        }
    }
}

// =========================================================
// 排序状态 (Sort State)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    None,
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<C> {
    column: Option<C>,
    direction: SortDirection,
}

impl<C> Default for SortState<C> {
    fn default() -> Self {
        Self {
            column: None,
            direction: SortDirection::None,
        }
    }
}

impl<C: Copy + PartialEq> SortState<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(&self) -> Option<C> {
        self.column
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// 点击表头：新列从升序开始，同一列依次 升序 -> 降序 -> 未排序
    pub fn toggle(&mut self, column: C) {
        if self.column != Some(column) {
            self.column = Some(column);
            self.direction = SortDirection::Asc;
            return;
        }
        self.direction = match self.direction {
            SortDirection::None => SortDirection::Asc,
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::None,
        };
        if self.direction == SortDirection::None {
            self.column = None;
        }
    }

    pub fn icon(&self, column: C) -> &'static str {
        if self.column != Some(column) {
            return "↕️";
        }
        match self.direction {
            SortDirection::Asc => "⬆️",
            SortDirection::Desc => "⬇️",
            SortDirection::None => "↕️",
        }
    }

    /// 稳定排序；未排序时保持原顺序
    pub fn apply<T: Sortable<Column = C>>(&self, items: &mut [T]) {
        let Some(column) = self.column else {
            return;
        };
        match self.direction {
            SortDirection::None => {}
            SortDirection::Asc => {
                items.sort_by(|a, b| a.sort_key(column).cmp(&b.sort_key(column)))
            }
            SortDirection::Desc => {
                items.sort_by(|a, b| b.sort_key(column).cmp(&a.sort_key(column)))
            }
        }
    }

    pub fn sorted<T: Sortable<Column = C> + Clone>(&self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        self.apply(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, name: &str, priority: &str) -> Task {
        Task {
            id,
            name: name.into(),
            priority: priority.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_priority_order_ignores_case_and_language() {
        assert_eq!(compare_priority("YÜKSEK", "orta"), Ordering::Greater);
        assert_eq!(compare_priority("Orta", "düşük"), Ordering::Greater);
        assert_eq!(compare_priority("DÜŞÜK", "low"), Ordering::Equal);
        assert_eq!(compare_priority("High", "yüksek"), Ordering::Equal);
        assert_eq!(compare_priority("???", "low"), Ordering::Less);
    }

    #[test]
    fn test_three_state_cycle() {
        let mut state = SortState::new();
        state.toggle(TaskColumn::Name);
        assert_eq!(state.direction(), SortDirection::Asc);
        assert_eq!(state.icon(TaskColumn::Name), "⬆️");
        state.toggle(TaskColumn::Name);
        assert_eq!(state.direction(), SortDirection::Desc);
        assert_eq!(state.icon(TaskColumn::Name), "⬇️");
        state.toggle(TaskColumn::Name);
        assert_eq!(state.direction(), SortDirection::None);
        assert_eq!(state.column(), None);
        assert_eq!(state.icon(TaskColumn::Name), "↕️");
    }

    #[test]
    fn test_new_column_starts_ascending() {
        let mut state = SortState::new();
        state.toggle(TaskColumn::Name);
        state.toggle(TaskColumn::Name);
        state.toggle(TaskColumn::Priority);
        assert_eq!(state.column(), Some(TaskColumn::Priority));
        assert_eq!(state.direction(), SortDirection::Asc);
    }

    #[test]
    fn test_priority_column_sort() {
        let tasks = vec![
            task(1, "a", "düşük"),
            task(2, "b", "YÜKSEK"),
            task(3, "c", "Orta"),
        ];
        let mut state = SortState::new();
        state.toggle(TaskColumn::Priority);
        state.toggle(TaskColumn::Priority);
        let ids: Vec<i64> = state.sorted(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_text_sort_is_case_insensitive_and_missing_first() {
        let tasks = vec![task(1, "beta", ""), task(2, "", ""), task(3, "Alfa", "")];
        let mut state = SortState::new();
        state.toggle(TaskColumn::Name);
        let ids: Vec<i64> = state.sorted(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_none_keeps_fetch_order() {
        let tasks = vec![task(3, "c", ""), task(1, "a", "")];
        let state: SortState<TaskColumn> = SortState::new();
        let ids: Vec<i64> = state.sorted(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
