//! 路由服务模块 - 核心引擎
//!
//! 封装 web_sys 的 History API，所有对 window.history 的操作都集中在此。
//! 导航流程："请求 -> 异步守卫 -> 写入 History -> 加载页面"。

use std::rc::Rc;

use gorev_takip::guard::can_activate;
use gorev_takip::shared::User;
use gorev_takip::shared::route::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;

use crate::auth::Api;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// History 写入方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Replace,
    /// popstate 已经改过地址栏，只有重定向时才替换
    Keep,
}

/// 本次导航实际要做的 History 写入
///
/// 地址栏已经是目标路径时不写入，避免守卫重定向与登出重定向叠加出重复记录。
fn history_write(
    mode: HistoryMode,
    current: &str,
    requested: &AppRoute,
    target: &AppRoute,
) -> Option<HistoryMode> {
    if current == target.to_path() {
        return None;
    }
    match mode {
        HistoryMode::Keep if target == requested => None,
        HistoryMode::Keep => Some(HistoryMode::Replace),
        other => Some(other),
    }
}

fn write_history(mode: HistoryMode, requested: &AppRoute, target: &AppRoute) {
    let path = target.to_path();
    match history_write(mode, &current_path(), requested, target) {
        Some(HistoryMode::Push) => push_history_state(&path),
        Some(HistoryMode::Replace) => replace_history_state(&path),
        Some(HistoryMode::Keep) | None => {}
    }
}

/// 路由器服务
///
/// 当前路由为 `None` 表示首次守卫尚未完成。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<Option<AppRoute>>,
    set_route: WriteSignal<Option<AppRoute>>,
    api: StoredValue<Rc<Api>, LocalStorage>,
    /// 注入的用户信号
    user: Signal<Option<User>>,
}

impl RouterService {
    fn new(api: Rc<Api>, user: Signal<Option<User>>) -> Self {
        let (current_route, set_route) = signal(None);
        Self {
            current_route,
            set_route,
            api: StoredValue::new_local(api),
            user,
        }
    }

    pub fn current_route(&self) -> ReadSignal<Option<AppRoute>> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, route: AppRoute) {
        self.navigate_to_route(route, HistoryMode::Push);
    }

    fn navigate_to_route(&self, requested: AppRoute, mode: HistoryMode) {
        let api = self.api.get_value();
        let set_route = self.set_route;

        spawn_local(async move {
            // --- Step 1: 守卫 ---
            let decision = can_activate(&api, &requested).await;
            let target = decision.target(&requested);
            if target != requested {
                log::info!("[Router] {} -> {} ({:?})", requested, target, decision);
            }

            // --- Step 2: 写入 History 并加载页面 ---
            write_history(mode, &requested, &target);
            set_route.set(Some(target));
        });
    }

    /// 浏览器后退/前进同样经过守卫
    fn init_popstate_listener(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            router.navigate_to_route(AppRoute::from_path(&current_path()), HistoryMode::Keep);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话恢复完成后解析首个路由
    fn setup_initial_route(&self, ready: Signal<bool>) {
        let router = *self;
        Effect::new(move |done: Option<bool>| {
            if done == Some(true) {
                return true;
            }
            if !ready.get() {
                return false;
            }
            router.navigate_to_route(AppRoute::from_path(&current_path()), HistoryMode::Replace);
            true
        });
    }

    /// 用户登录或登出后自动重定向
    fn setup_auth_redirect(&self) {
        let router = *self;
        Effect::new(move |_| {
            let logged_in = router.user.with(Option::is_some);
            let Some(route) = router.current_route.get_untracked() else {
                return;
            };

            if logged_in && route.should_redirect_when_authenticated() {
                log::info!("[Router] Auth state changed: logged in, leaving {}", route);
                router.navigate_to_route(route, HistoryMode::Push);
            } else if !logged_in && route.requires_auth() {
                log::info!("[Router] Auth state changed: logged out, redirecting to login.");
                let redirect = AppRoute::auth_failure_redirect();
                write_history(HistoryMode::Push, &route, &redirect);
                router.set_route.set(Some(redirect));
            }
        });
    }
}

fn provide_router(api: Rc<Api>, user: Signal<Option<User>>, ready: Signal<bool>) -> RouterService {
    let router = RouterService::new(api, user);

    router.init_popstate_listener();
    router.setup_initial_route(ready);
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(AppRoute) + Clone + Copy {
    let router = use_router();
    move |to: AppRoute| router.navigate(to)
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    api: Rc<Api>,
    user: Signal<Option<User>>,
    ready: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(api, user, ready);

    children()
}

/// 路由出口组件
///
/// 首次守卫完成前显示加载动画。
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || match router.current_route().get() {
        Some(route) => matcher(route),
        None => view! {
            <div class="flex items-center justify-center min-h-screen">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
    }
}

/// 站内链接，点击时走路由守卫
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = to.to_path();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(to.clone());
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_second_entry_when_already_at_target() {
        // 强制登出时，用户信号的重定向已把地址栏改成 /login
        assert_eq!(
            history_write(HistoryMode::Push, "/login", &AppRoute::UserTasks, &AppRoute::Login),
            None
        );
        assert_eq!(
            history_write(HistoryMode::Push, "/user-tasks", &AppRoute::UserTasks, &AppRoute::Login),
            Some(HistoryMode::Push)
        );
    }

    #[test]
    fn test_popstate_replaces_only_on_redirect() {
        let requested = AppRoute::AllTasks;
        assert_eq!(
            history_write(HistoryMode::Keep, "/all-tasks", &requested, &requested),
            None
        );
        assert_eq!(
            history_write(HistoryMode::Keep, "/all-tasks", &requested, &AppRoute::ManagerPanel),
            Some(HistoryMode::Replace)
        );
    }

    #[test]
    fn test_initial_route_replaces() {
        assert_eq!(
            history_write(HistoryMode::Replace, "/", &AppRoute::Login, &AppRoute::Login),
            Some(HistoryMode::Replace)
        );
    }
}
