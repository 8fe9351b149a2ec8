//! 路由守卫决策表
//!
//! 只做判定，不做 I/O。取用户、清会话、改 History 由调用方完成。

use crate::User;
use crate::route::{AppRoute, RouteAccess};

/// 守卫执行时会话的探测结果
#[derive(Debug, Clone, Copy)]
pub enum SessionProbe<'a> {
    /// 没有存储的 token
    Anonymous,
    /// 有 token，但获取当前用户失败
    Unresolved,
    /// 有 token，且已拿到当前用户
    Resolved(&'a User),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(AppRoute),
    /// 清除会话并回到登录页
    ForceLogout,
}

impl GuardDecision {
    /// 最终落到的路由
    pub fn target(&self, requested: &AppRoute) -> AppRoute {
        match self {
            GuardDecision::Allow => requested.clone(),
            GuardDecision::Redirect(route) => route.clone(),
            GuardDecision::ForceLogout => AppRoute::auth_failure_redirect(),
        }
    }
}

pub fn decide(route: &AppRoute, probe: SessionProbe<'_>) -> GuardDecision {
    let access = route.access();

    if access == RouteAccess::Public {
        return match probe {
            SessionProbe::Resolved(user) if route.should_redirect_when_authenticated() => {
                GuardDecision::Redirect(AppRoute::landing(user.role))
            }
            _ => GuardDecision::Allow,
        };
    }

    match probe {
        SessionProbe::Anonymous => GuardDecision::Redirect(AppRoute::auth_failure_redirect()),
        SessionProbe::Unresolved => GuardDecision::ForceLogout,
        SessionProbe::Resolved(user) if access.permits(user.role) => GuardDecision::Allow,
        SessionProbe::Resolved(user) => GuardDecision::Redirect(AppRoute::landing(user.role)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    fn user(role: Role) -> User {
        User {
            id: 1,
            username: "u".into(),
            email: String::new(),
            full_name: String::new(),
            role,
            active: None,
            manager_type: None,
            manager_id: None,
        }
    }

    #[test]
    fn test_denies_without_token() {
        assert_eq!(
            decide(&AppRoute::AllTasks, SessionProbe::Anonymous),
            GuardDecision::Redirect(AppRoute::Login)
        );
    }

    #[test]
    fn test_manager_redirected_from_director_route() {
        let manager = user(Role::Manager);
        assert_eq!(
            decide(&AppRoute::AddTask, SessionProbe::Resolved(&manager)),
            GuardDecision::Redirect(AppRoute::ManagerPanel)
        );
    }

    #[test]
    fn test_member_redirected_from_manager_panel() {
        let member = user(Role::TeamMember);
        assert_eq!(
            decide(&AppRoute::ManagerPanel, SessionProbe::Resolved(&member)),
            GuardDecision::Redirect(AppRoute::UserTasks)
        );
    }

    #[test]
    fn test_fetch_failure_forces_logout() {
        let decision = decide(&AppRoute::UserTasks, SessionProbe::Unresolved);
        assert_eq!(decision, GuardDecision::ForceLogout);
        assert_eq!(decision.target(&AppRoute::UserTasks), AppRoute::Login);
    }

    #[test]
    fn test_allowed_roles() {
        let manager = user(Role::Manager);
        let director = user(Role::Director);
        assert_eq!(
            decide(&AppRoute::UserTasks, SessionProbe::Resolved(&manager)),
            GuardDecision::Allow
        );
        assert_eq!(
            decide(&AppRoute::EditTask(1), SessionProbe::Resolved(&director)),
            GuardDecision::Allow
        );
    }

    #[test]
    fn test_login_page_sends_known_user_home() {
        let director = user(Role::Director);
        assert_eq!(
            decide(&AppRoute::Login, SessionProbe::Resolved(&director)),
            GuardDecision::Redirect(AppRoute::AllTasks)
        );
        assert_eq!(
            decide(&AppRoute::Login, SessionProbe::Unresolved),
            GuardDecision::Allow
        );
    }

    #[test]
    fn test_menu_links_pass_guard_for_their_role() {
        for role in Role::ALL {
            let me = user(role);
            for (route, label) in AppRoute::menu(role) {
                assert_eq!(
                    decide(route, SessionProbe::Resolved(&me)),
                    GuardDecision::Allow,
                    "{label} ({route}) is not reachable for {role:?}"
                );
            }
        }
        assert!(!AppRoute::menu(Role::Manager).iter().any(|(r, _)| *r == AppRoute::AddTask));
    }
}
