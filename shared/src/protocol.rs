//! 接口定义模块
//!
//! 集中描述后端 REST 接口：路径与 HTTP 方法。
//! 服务层只拼接 base URL，不再手写路径字符串。

use crate::TaskStatus;
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

pub const AUTH_BASE: &str = "/api/auth";
pub const TASK_BASE: &str = "/api/gorev";
pub const USER_TASK_BASE: &str = "/api/user/gorev";
pub const DIRECTOR_BASE: &str = "/api/director";
pub const MANAGER_BASE: &str = "/api/manager";
pub const ADMIN_BASE: &str = "/api/admin";

/// 后端接口枚举
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    // /api/auth
    Login,
    Register,
    Logout,
    Me,
    Validate,
    IsAdmin,

    // /api/gorev
    AllTasks,
    AddTask,
    DeleteTask(i64),
    UpdateTask(i64),

    // /api/user/gorev
    UserTasks(i64),
    UserActiveTasks(i64),
    UserTasksByStatus(i64, TaskStatus),
    CompleteTask { task_id: i64, user_id: i64 },
    UpdateTaskStatus { task_id: i64, user_id: i64 },
    UserTaskStats(i64),

    // /api/director
    DirectorTasks(i64),

    // /api/manager
    TeamMembers(i64),
    TeamTasks(i64),
    ManagerOwnTasks(i64),
    AssignTask,
    TeamPerformance(i64),
    ManagerUpdateTask(i64),
    ManagerDeleteTask(i64),
    CompletedTasks(i64),
    ReportToDirector(i64),

    // /api/admin
    CreateUser,
    ListUsers,
    GetUser(i64),
    UpdateUser(i64),
    DeleteUser(i64),
    Managers,
    ReportedTasks,
}

impl Endpoint {
    pub fn method(&self) -> HttpMethod {
        use Endpoint::*;
        match self {
            Login | Register | Logout | AddTask | AssignTask | ReportToDirector(_)
            | CreateUser => HttpMethod::Post,
            UpdateTask(_) | CompleteTask { .. } | UpdateTaskStatus { .. }
            | ManagerUpdateTask(_) | UpdateUser(_) => HttpMethod::Put,
            DeleteTask(_) | ManagerDeleteTask(_) | DeleteUser(_) => HttpMethod::Delete,
            _ => HttpMethod::Get,
        }
    }

    pub fn path(&self) -> String {
        use Endpoint::*;
        match self {
            Login => format!("{AUTH_BASE}/login"),
            Register => format!("{AUTH_BASE}/register"),
            Logout => format!("{AUTH_BASE}/logout"),
            Me => format!("{AUTH_BASE}/me"),
            Validate => format!("{AUTH_BASE}/validate"),
            IsAdmin => format!("{AUTH_BASE}/is-admin"),

            AllTasks => format!("{TASK_BASE}/tumunu-getir"),
            AddTask => format!("{TASK_BASE}/ekle"),
            DeleteTask(id) => format!("{TASK_BASE}/sil/{id}"),
            UpdateTask(id) => format!("{TASK_BASE}/guncelle/{id}"),

            UserTasks(uid) => format!("{USER_TASK_BASE}/{uid}"),
            UserActiveTasks(uid) => format!("{USER_TASK_BASE}/{uid}/active"),
            UserTasksByStatus(uid, status) => {
                format!("{USER_TASK_BASE}/{uid}/status/{}", status.as_str())
            }
            CompleteTask { task_id, user_id } => {
                format!("{USER_TASK_BASE}/{task_id}/complete/{user_id}")
            }
            UpdateTaskStatus { task_id, user_id } => {
                format!("{USER_TASK_BASE}/{task_id}/status/{user_id}")
            }
            UserTaskStats(uid) => format!("{USER_TASK_BASE}/{uid}/stats"),

            DirectorTasks(id) => format!("{DIRECTOR_BASE}/tasks/{id}"),

            TeamMembers(id) => format!("{MANAGER_BASE}/team-members/{id}"),
            TeamTasks(id) => format!("{MANAGER_BASE}/team-tasks/{id}"),
            ManagerOwnTasks(id) => format!("{MANAGER_BASE}/my-tasks/{id}"),
            AssignTask => format!("{MANAGER_BASE}/assign-task"),
            TeamPerformance(id) => format!("{MANAGER_BASE}/team-performance/{id}"),
            ManagerUpdateTask(id) => format!("{MANAGER_BASE}/update-task/{id}"),
            ManagerDeleteTask(id) => format!("{MANAGER_BASE}/delete-task/{id}"),
            CompletedTasks(id) => format!("{MANAGER_BASE}/completed-tasks/{id}"),
            ReportToDirector(id) => format!("{MANAGER_BASE}/report-to-director/{id}"),

            CreateUser | ListUsers => format!("{ADMIN_BASE}/users"),
            GetUser(id) | UpdateUser(id) | DeleteUser(id) => format!("{ADMIN_BASE}/users/{id}"),
            Managers => format!("{ADMIN_BASE}/managers"),
            ReportedTasks => format!("{ADMIN_BASE}/reported-tasks"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_and_methods() {
        assert_eq!(Endpoint::AllTasks.path(), "/api/gorev/tumunu-getir");
        assert_eq!(Endpoint::DeleteTask(4).method(), HttpMethod::Delete);
        assert_eq!(
            Endpoint::CompleteTask { task_id: 9, user_id: 2 }.path(),
            "/api/user/gorev/9/complete/2"
        );
        assert_eq!(
            Endpoint::UserTasksByStatus(2, TaskStatus::InProgress).path(),
            "/api/user/gorev/2/status/IN_PROGRESS"
        );
        assert_eq!(Endpoint::CreateUser.method(), HttpMethod::Post);
        assert_eq!(Endpoint::ListUsers.method(), HttpMethod::Get);
        assert_eq!(Endpoint::UpdateUser(3).path(), "/api/admin/users/3");
        assert_eq!(Endpoint::ReportToDirector(5).method(), HttpMethod::Post);
    }
}
