//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其访问规则。

use crate::Role;
use std::fmt::Display;

const MANAGER_OR_MEMBER: &[Role] = &[Role::Manager, Role::TeamMember];

/// 路由访问规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// 任何人可访问
    Public,
    /// 角色必须完全相等
    Role(Role),
    /// 角色属于允许集合
    AnyRole(&'static [Role]),
}

impl RouteAccess {
    pub fn permits(&self, role: Role) -> bool {
        match self {
            RouteAccess::Public => true,
            RouteAccess::Role(required) => *required == role,
            RouteAccess::AnyRole(allowed) => allowed.contains(&role),
        }
    }
}

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由，也是兜底路由)
    #[default]
    Login,
    AllTasks,
    AddTask,
    EditTask(i64),
    UserManagement,
    DirectorPanel,
    ManagerPanel,
    UserTasks,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举，未知路径回到登录页
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        match path {
            "" | "/login" => Self::Login,
            "/all-tasks" => Self::AllTasks,
            "/add-task" => Self::AddTask,
            "/user-management" => Self::UserManagement,
            "/director-panel" => Self::DirectorPanel,
            "/manager-panel" => Self::ManagerPanel,
            "/user-tasks" => Self::UserTasks,
            other => other
                .strip_prefix("/edit-task/")
                .and_then(|id| id.parse().ok())
                .map(Self::EditTask)
                .unwrap_or_default(),
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::AllTasks => "/all-tasks".to_string(),
            Self::AddTask => "/add-task".to_string(),
            Self::EditTask(id) => format!("/edit-task/{id}"),
            Self::UserManagement => "/user-management".to_string(),
            Self::DirectorPanel => "/director-panel".to_string(),
            Self::ManagerPanel => "/manager-panel".to_string(),
            Self::UserTasks => "/user-tasks".to_string(),
        }
    }

    /// **核心守卫规则：定义该路由的访问条件**
    pub fn access(&self) -> RouteAccess {
        match self {
            Self::Login => RouteAccess::Public,
            Self::AllTasks
            | Self::AddTask
            | Self::EditTask(_)
            | Self::UserManagement
            | Self::DirectorPanel => RouteAccess::Role(Role::Director),
            Self::ManagerPanel => RouteAccess::Role(Role::Manager),
            Self::UserTasks => RouteAccess::AnyRole(MANAGER_OR_MEMBER),
        }
    }

    pub fn requires_auth(&self) -> bool {
        self.access() != RouteAccess::Public
    }

    /// 已登录用户访问登录页时应离开
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 导航栏菜单，每一项都必须能通过该角色的守卫
    pub fn menu(role: Role) -> &'static [(AppRoute, &'static str)] {
        match role {
            Role::Director => &[
                (Self::AllTasks, "Tüm Görevler"),
                (Self::AddTask, "Görev Ekle"),
                (Self::DirectorPanel, "Direktör Paneli"),
                (Self::UserManagement, "Kullanıcı Yönetimi"),
            ],
            Role::Manager => &[
                (Self::ManagerPanel, "Müdür Paneli"),
                (Self::UserTasks, "Görevlerim"),
            ],
            Role::TeamMember => &[(Self::UserTasks, "Görevlerim")],
        }
    }

    /// 各角色的落地页
    pub fn landing(role: Role) -> Self {
        match role {
            Role::Director => Self::AllTasks,
            Role::Manager => Self::ManagerPanel,
            Role::TeamMember => Self::UserTasks,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/all-tasks/"), AppRoute::AllTasks);
        assert_eq!(AppRoute::from_path("/edit-task/42"), AppRoute::EditTask(42));
        assert_eq!(AppRoute::from_path("/edit-task/abc"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/user-tasks?x=1"), AppRoute::UserTasks);
        assert_eq!(AppRoute::from_path("/nowhere"), AppRoute::Login);
    }

    #[test]
    fn test_paths_round_trip() {
        for route in [
            AppRoute::AllTasks,
            AppRoute::EditTask(3),
            AppRoute::ManagerPanel,
            AppRoute::DirectorPanel,
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn test_access_rules() {
        assert!(!AppRoute::Login.requires_auth());
        assert!(AppRoute::UserTasks.access().permits(Role::Manager));
        assert!(AppRoute::UserTasks.access().permits(Role::TeamMember));
        assert!(!AppRoute::UserTasks.access().permits(Role::Director));
        assert!(!AppRoute::AddTask.access().permits(Role::Manager));
        assert_eq!(AppRoute::landing(Role::Manager), AppRoute::ManagerPanel);
    }
}
