//! Görev Takip 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web`: 浏览器 HTTP、LocalStorage、定时器与 History 路由
//! - `auth`: 唯一的 API 客户端与用户信号
//! - `components`: UI 组件层
//!
//! 业务流程全部在 `gorev_takip::workflow` 中，组件只负责把结果写进信号。

mod auth;
mod config;
mod logger;
mod components {
    pub mod all_tasks;
    pub mod director_panel;
    mod fields;
    mod icons;
    mod layout;
    pub mod login;
    pub mod manager_panel;
    pub mod task_form;
    pub mod user_management;
    pub mod user_tasks;
}
mod web;

use crate::auth::{AuthContext, init_auth};
use crate::components::all_tasks::AllTasksPage;
use crate::components::director_panel::DirectorPanelPage;
use crate::components::login::LoginPage;
use crate::components::manager_panel::ManagerPanelPage;
use crate::components::task_form::TaskFormPage;
use crate::components::user_management::UserManagementPage;
use crate::components::user_tasks::UserTasksPage;

use gorev_takip::shared::route::AppRoute;
use leptos::prelude::*;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 守卫已在路由服务中执行，这里只负责映射。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::AllTasks => view! { <AllTasksPage /> }.into_any(),
        AppRoute::AddTask => view! { <TaskFormPage /> }.into_any(),
        AppRoute::EditTask(id) => view! { <TaskFormPage edit_id=id /> }.into_any(),
        AppRoute::UserManagement => view! { <UserManagementPage /> }.into_any(),
        AppRoute::DirectorPanel => view! { <DirectorPanelPage /> }.into_any(),
        AppRoute::ManagerPanel => view! { <ManagerPanelPage /> }.into_any(),
        AppRoute::UserTasks => view! { <UserTasksPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文（同时加载配置并初始化日志）
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 用已存储的 token 恢复会话
    init_auth(&auth_ctx);

    // 3. 用户信号与就绪信号注入路由服务
    view! {
        <Router api=auth_ctx.api() user=auth_ctx.user_signal() ready=auth_ctx.ready_signal()>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
