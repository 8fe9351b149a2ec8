//! 列表过滤与统计

use crate::{PriorityLevel, Role, Task, TaskStatus, User};
use std::collections::HashSet;

// =========================================================
// 优先级统计 (Priority Counts)
// =========================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub unknown: usize,
}

pub fn count_by_priority(tasks: &[Task]) -> PriorityCounts {
    tasks
        .iter()
        .fold(PriorityCounts::default(), |mut acc, task| {
            match PriorityLevel::parse(&task.priority) {
                PriorityLevel::High => acc.high += 1,
                PriorityLevel::Medium => acc.medium += 1,
                PriorityLevel::Low => acc.low += 1,
                PriorityLevel::Unknown => acc.unknown += 1,
            }
            acc
        })
}

// =========================================================
// 任务过滤 (Task Filters)
// =========================================================

/// 成员任务页的视图过滤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    Active,
    All,
    Completed,
}

impl TaskFilter {
    pub const ALL: [TaskFilter; 3] = [TaskFilter::Active, TaskFilter::All, TaskFilter::Completed];

    pub fn label(&self) -> &'static str {
        match self {
            TaskFilter::Active => "Aktif",
            TaskFilter::All => "Tümü",
            TaskFilter::Completed => "Tamamlanan",
        }
    }
}

pub fn active_tasks(tasks: &[Task]) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| !t.status.is_completed())
        .cloned()
        .collect()
}

pub fn completed_tasks(tasks: &[Task]) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| t.status.is_completed())
        .cloned()
        .collect()
}

/// 可作为上级任务的任务：PENDING / IN_PROGRESS / ASSIGNED
pub fn available_parent_tasks(tasks: &[Task]) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| {
            matches!(
                t.status,
                TaskStatus::Pending | TaskStatus::InProgress | TaskStatus::Assigned
            )
        })
        .cloned()
        .collect()
}

/// 只保留列表中成员的任务；成员列表为空时不过滤
pub fn tasks_of_members(tasks: Vec<Task>, members: &[User]) -> Vec<Task> {
    if members.is_empty() {
        return tasks;
    }
    let ids: HashSet<i64> = members.iter().map(|m| m.id).collect();
    tasks
        .into_iter()
        .filter(|t| ids.contains(&t.assignee_id))
        .collect()
}

pub fn task_count_for(tasks: &[Task], user_id: i64) -> usize {
    tasks.iter().filter(|t| t.assignee_id == user_id).count()
}

// =========================================================
// 用户过滤 (User Filters)
// =========================================================

/// 隐藏演示账号和停用成员
pub fn visible_team_members(members: Vec<User>) -> Vec<User> {
    members
        .into_iter()
        .filter(|m| !m.is_demo() && m.is_active())
        .collect()
}

/// 用户管理列表隐藏演示成员账号
pub fn without_demo_members(users: Vec<User>) -> Vec<User> {
    users
        .into_iter()
        .filter(|u| !(u.role == Role::TeamMember && u.is_demo()))
        .collect()
}

/// 总监的候选人：下属经理，若层级尚未建立则为全部经理
pub fn director_candidates(director_id: i64, managers: Vec<User>) -> Vec<User> {
    let assigned: Vec<User> = managers
        .iter()
        .filter(|m| m.manager_id == Some(director_id))
        .cloned()
        .collect();
    if assigned.is_empty() { managers } else { assigned }
}

/// 经理的候选人：自己团队的成员
pub fn manager_candidates(manager_id: i64, users: Vec<User>) -> Vec<User> {
    users
        .into_iter()
        .filter(|u| u.role == Role::TeamMember && u.manager_id == Some(manager_id))
        .collect()
}

/// 用户所属经理的显示名，带经理类型
pub fn manager_name(user: &User, users: &[User]) -> String {
    let Some(manager_id) = user.manager_id else {
        return "-".to_string();
    };
    match users.iter().find(|u| u.id == manager_id) {
        Some(manager) => match &manager.manager_type {
            Some(kind) if !kind.is_empty() => format!("{} ({})", manager.display_name(), kind),
            _ => manager.display_name().to_string(),
        },
        None => "Bilinmiyor".to_string(),
    }
}

/// 成员显示名，找不到时视为已删除
pub fn member_name(user_id: i64, members: &[User]) -> String {
    members
        .iter()
        .find(|m| m.id == user_id)
        .map(|m| m.display_name().to_string())
        .unwrap_or_else(|| "Silinmiş Kullanıcı".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, username: &str, role: Role) -> User {
        User {
            id,
            username: username.into(),
            email: String::new(),
            full_name: String::new(),
            role,
            active: None,
            manager_type: None,
            manager_id: None,
        }
    }

    fn task(id: i64, assignee: i64, priority: &str, status: TaskStatus) -> Task {
        Task {
            id,
            assignee_id: assignee,
            priority: priority.into(),
            status,
            ..Default::default()
        }
    }

    #[test]
    fn test_count_by_priority() {
        let tasks = vec![
            task(1, 1, "Yüksek", TaskStatus::Pending),
            task(2, 1, "high", TaskStatus::Pending),
            task(3, 1, "orta", TaskStatus::Pending),
            task(4, 1, "?", TaskStatus::Pending),
        ];
        let counts = count_by_priority(&tasks);
        assert_eq!(counts.high, 2);
        assert_eq!(counts.medium, 1);
        assert_eq!(counts.low, 0);
        assert_eq!(counts.unknown, 1);
    }

    #[test]
    fn test_members_hide_demo_and_inactive() {
        let mut inactive = user(3, "can", Role::TeamMember);
        inactive.active = Some(false);
        let mut demo_by_name = user(4, "x", Role::TeamMember);
        demo_by_name.full_name = "TeamMember".into();
        let members = vec![
            user(1, "TEAMMEMBER", Role::TeamMember),
            user(2, "elif", Role::TeamMember),
            inactive,
            demo_by_name,
        ];
        let visible = visible_team_members(members);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);
    }

    #[test]
    fn test_tasks_of_members_skips_when_empty() {
        let tasks = vec![
            task(1, 2, "", TaskStatus::Pending),
            task(2, 9, "", TaskStatus::Pending),
        ];
        assert_eq!(tasks_of_members(tasks.clone(), &[]).len(), 2);
        let kept = tasks_of_members(tasks, &[user(2, "elif", Role::TeamMember)]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }

    #[test]
    fn test_available_parent_tasks() {
        let tasks = vec![
            task(1, 1, "", TaskStatus::Pending),
            task(2, 1, "", TaskStatus::Completed),
            task(3, 1, "", TaskStatus::Assigned),
            task(4, 1, "", TaskStatus::Archived),
            task(5, 1, "", TaskStatus::InProgress),
        ];
        let ids: Vec<i64> = available_parent_tasks(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn test_director_candidates_fallback() {
        let mut mine = user(5, "m1", Role::Manager);
        mine.manager_id = Some(1);
        let other = user(6, "m2", Role::Manager);

        let only_mine = director_candidates(1, vec![mine.clone(), other.clone()]);
        assert_eq!(only_mine.len(), 1);

        let fallback = director_candidates(99, vec![mine, other]);
        assert_eq!(fallback.len(), 2);
    }

    #[test]
    fn test_manager_candidates() {
        let mut member = user(7, "ece", Role::TeamMember);
        member.manager_id = Some(5);
        let mut other_manager = user(8, "m3", Role::Manager);
        other_manager.manager_id = Some(5);
        let found = manager_candidates(5, vec![member, other_manager]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 7);
    }

    #[test]
    fn test_manager_name() {
        let mut manager = user(5, "ahmet", Role::Manager);
        manager.full_name = "Ahmet Kaya".into();
        manager.manager_type = Some("Satış".into());
        let mut member = user(7, "ece", Role::TeamMember);
        member.manager_id = Some(5);

        let users = vec![manager, member.clone()];
        assert_eq!(manager_name(&member, &users), "Ahmet Kaya (Satış)");
        member.manager_id = Some(42);
        assert_eq!(manager_name(&member, &users), "Bilinmiyor");
        member.manager_id = None;
        assert_eq!(manager_name(&member, &users), "-");
    }
}
