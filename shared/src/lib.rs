//! Görev Takip 共享模块
//!
//! 前端与平台无关核心共用的纯逻辑：
//! - 领域模型与 DTO（与后端 JSON 字段一一对应）
//! - 路由表与守卫决策表
//! - 排序、过滤、表单校验、批量选择
//! - 本地存储补偿（软删除台账、报告注释）

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod compensation;
pub mod date;
pub mod filter;
pub mod form;
pub mod guard;
pub mod notice;
pub mod protocol;
pub mod route;
pub mod selection;
pub mod sort;
pub mod store;

pub use sort::PriorityLevel;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const TOKEN_STORAGE_KEY: &str = "auth_token";
pub const DELETED_TASKS_KEY: &str = "deleted_tasks";
pub const REPORT_NOTE_PREFIX: &str = "task_report_";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const DEFAULT_PRIORITY: &str = "orta";
/// 演示账号，不在成员列表中展示
pub const DEMO_USERNAME: &str = "teammember";

// =========================================================
// 角色 (Role)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Director,
    Manager,
    TeamMember,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Director, Role::Manager, Role::TeamMember];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Director => "DIRECTOR",
            Role::Manager => "MANAGER",
            Role::TeamMember => "TEAM_MEMBER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            Role::Director => "Direktör",
            Role::Manager => "Müdür",
            Role::TeamMember => "Ekip Üyesi",
        }
    }

    pub fn avatar(&self) -> &'static str {
        match self {
            Role::Director => "🏢",
            Role::Manager => "👨‍💼",
            Role::TeamMember => "👤",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            Role::Director => "badge badge-error",
            Role::Manager => "badge badge-warning",
            Role::TeamMember => "badge badge-info",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =========================================================
// 任务状态 (TaskStatus)
// =========================================================

/// 任务状态
///
/// 后端只保证 PENDING / IN_PROGRESS / COMPLETED，其余取值原样保留。
/// 解析不区分大小写。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Assigned,
    Archived,
    Cancelled,
    Other(String),
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Assigned => "ASSIGNED",
            TaskStatus::Archived => "ARCHIVED",
            TaskStatus::Cancelled => "CANCELLED",
            TaskStatus::Other(s) => s,
        }
    }

    pub fn display_text(&self) -> &str {
        match self {
            TaskStatus::Pending => "Bekliyor",
            TaskStatus::InProgress => "Devam Ediyor",
            TaskStatus::Completed => "Tamamlandı",
            TaskStatus::Assigned => "Atandı",
            TaskStatus::Archived => "Arşivlendi",
            TaskStatus::Cancelled => "İptal Edildi",
            TaskStatus::Other(s) => s,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "badge badge-warning",
            TaskStatus::InProgress => "badge badge-info",
            TaskStatus::Completed => "badge badge-success",
            _ => "badge badge-ghost",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => TaskStatus::Pending,
            "IN_PROGRESS" => TaskStatus::InProgress,
            "COMPLETED" => TaskStatus::Completed,
            "ASSIGNED" => TaskStatus::Assigned,
            "ARCHIVED" => TaskStatus::Archived,
            "CANCELLED" => TaskStatus::Cancelled,
            _ => TaskStatus::Other(s),
        }
    }
}

impl From<&str> for TaskStatus {
    fn from(s: &str) -> Self {
        TaskStatus::from(s.to_string())
    }
}

impl From<TaskStatus> for String {
    fn from(s: TaskStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 任务（后端 GorevDto）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "gorevid", default)]
    pub id: i64,
    #[serde(rename = "isim")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "userid", default)]
    pub assignee_id: i64,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_to_director: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_by_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<i64>,
    // 以下两个字段仅由本地报告注释填充
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_at: Option<String>,
}

impl Task {
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            assignee_id: self.assignee_id,
            priority: self.priority.clone(),
            status: self.status.clone(),
            parent_task_id: self.parent_task_id,
        }
    }

    /// 用草稿覆盖可编辑字段，保留 id 与报告信息
    pub fn apply_draft(&mut self, draft: TaskDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.assignee_id = draft.assignee_id;
        self.priority = draft.priority;
        self.status = draft.status;
        self.parent_task_id = draft.parent_task_id;
    }
}

/// 新建/更新任务时提交的请求体（不含 gorevid）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    #[serde(rename = "isim")]
    pub name: String,
    pub description: String,
    #[serde(rename = "userid")]
    pub assignee_id: i64,
    pub priority: String,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<i64>,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            assignee_id: 0,
            priority: DEFAULT_PRIORITY.to_string(),
            status: TaskStatus::Pending,
            parent_task_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    pub role: Role,
    /// 缺省视为激活
    #[serde(rename = "isActive", default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(true)
    }

    /// 用户名或全名为演示账号（不区分大小写）
    pub fn is_demo(&self) -> bool {
        self.username.to_lowercase() == DEMO_USERNAME
            || self.full_name.to_lowercase() == DEMO_USERNAME
    }

    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }

    pub fn status_text(&self) -> &'static str {
        if self.is_active() { "Aktif" } else { "Pasif" }
    }
}

// =========================================================
// 认证 DTO (Auth DTOs)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// 登录/注册响应，出错时只有 message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    /// 拆分为 (token, user)；缺少任一必要字段返回 None
    pub fn into_session(self) -> Option<(String, User)> {
        let token = self.token.filter(|t| !t.is_empty())?;
        let user = User {
            id: self.user_id?,
            username: self.username?,
            email: self.email.unwrap_or_default(),
            full_name: self.full_name.unwrap_or_default(),
            role: self.role?,
            active: Some(true),
            manager_type: None,
            manager_id: None,
        };
        Some((token, user))
    }
}

// =========================================================
// 用户管理 DTO (Admin DTOs)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
}

/// 更新用户，password 为空表示不修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub full_name: String,
    pub role: Role,
    #[serde(rename = "isActive", default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
}

// =========================================================
// 经理/成员 DTO (Manager & Member DTOs)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssignmentRequest {
    #[serde(rename = "isim")]
    pub name: String,
    pub description: String,
    #[serde(rename = "userid")]
    pub assignee_id: i64,
    pub priority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOperationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub task: Option<Task>,
}

/// 向总监报告；后端目前拒绝 description，注释另存本地
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub task_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reported_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTaskStats {
    #[serde(default)]
    pub total_tasks: u32,
    #[serde(default)]
    pub active_tasks: u32,
    #[serde(default)]
    pub completed_tasks: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPerformance {
    #[serde(default)]
    pub total_team_members: u32,
    #[serde(default)]
    pub total_tasks: u32,
    #[serde(default)]
    pub completed_tasks: u32,
    #[serde(default)]
    pub in_progress_tasks: u32,
    #[serde(default)]
    pub pending_tasks: u32,
    #[serde(default)]
    pub completion_rate: f64,
}

// =========================================================
// 单元测试 (Unit Tests)
// =========================================================
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_wire_names() {
        let task: Task = serde_json::from_value(json!({
            "gorevid": 7,
            "isim": "Rapor hazırla",
            "description": "Aylık satış raporu",
            "userid": 3,
            "priority": "yüksek",
            "status": "in_progress",
            "reportedToDirector": true
        }))
        .unwrap();

        assert_eq!(task.id, 7);
        assert_eq!(task.name, "Rapor hazırla");
        assert_eq!(task.assignee_id, 3);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.reported_to_director, Some(true));

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["status"], "IN_PROGRESS");
        assert_eq!(value["isim"], "Rapor hazırla");
        assert!(value.get("reportDescription").is_none());
    }

    #[test]
    fn test_unknown_status_kept_verbatim() {
        let status = TaskStatus::from("ON_HOLD");
        assert_eq!(status, TaskStatus::Other("ON_HOLD".into()));
        assert_eq!(String::from(status), "ON_HOLD");
    }

    #[test]
    fn test_user_active_defaults_to_true() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "username": "ayse",
            "role": "MANAGER"
        }))
        .unwrap();
        assert!(user.is_active());
        assert_eq!(user.display_name(), "ayse");
        assert_eq!(Role::parse("team_member"), Some(Role::TeamMember));
    }

    #[test]
    fn test_login_response_into_session() {
        let ok: LoginResponse = serde_json::from_value(json!({
            "userId": 5,
            "username": "mehmet",
            "email": "m@x.com",
            "fullName": "Mehmet Y",
            "role": "DIRECTOR",
            "token": "abc",
            "message": "ok"
        }))
        .unwrap();
        let (token, user) = ok.into_session().unwrap();
        assert_eq!(token, "abc");
        assert_eq!(user.role, Role::Director);

        let failed: LoginResponse =
            serde_json::from_value(json!({ "message": "Hatalı giriş" })).unwrap();
        assert!(failed.into_session().is_none());
    }

    #[test]
    fn test_report_request_omits_empty_description() {
        let req = ReportRequest {
            task_ids: vec![1, 2],
            description: None,
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({ "taskIds": [1, 2] }));
    }
}
