//! 认证模块
//!
//! 持有唯一的 `ApiClient`，并把核心库会话镜像到 Leptos 信号。
//! 路由服务只拿到注入的用户信号，不直接依赖本模块。

use crate::config;
use crate::web::{BrowserHttpClient, BrowserStore};
use gorev_takip::ApiClient;
use gorev_takip::shared::User;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

pub type Api = ApiClient<BrowserHttpClient, BrowserStore>;

/// 认证上下文
///
/// `ApiClient` 内部用 `RefCell`，只能存放在线程本地的 `StoredValue` 中。
#[derive(Clone, Copy)]
pub struct AuthContext {
    api: StoredValue<Rc<Api>, LocalStorage>,
    /// 当前用户（由会话订阅写入）
    pub user: RwSignal<Option<User>>,
    /// 启动时的会话恢复是否已完成
    pub ready: RwSignal<bool>,
}

impl AuthContext {
    pub fn new() -> Self {
        let config = config::load();
        crate::logger::init(config.log_level);
        log::info!("[Auth] API base: {}", config.api_base_url);

        let api = Rc::new(ApiClient::new(BrowserHttpClient, BrowserStore, config));
        let user = RwSignal::new(None);
        api.session().subscribe(move |u| user.set(u.cloned()));

        Self {
            api: StoredValue::new_local(api),
            user,
            ready: RwSignal::new(false),
        }
    }

    pub fn api(&self) -> Rc<Api> {
        self.api.get_value()
    }

    pub fn user_signal(&self) -> Signal<Option<User>> {
        self.user.into()
    }

    pub fn ready_signal(&self) -> Signal<bool> {
        self.ready.into()
    }

    /// 当前用户 id，未登录时为 0
    pub fn user_id(&self) -> i64 {
        self.user.get_untracked().map(|u| u.id).unwrap_or_default()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 用已存储的 token 恢复会话，结束后标记 ready
pub fn init_auth(ctx: &AuthContext) {
    let api = ctx.api();
    let ready = ctx.ready;
    spawn_local(async move {
        api.auth().restore_session().await;
        ready.set(true);
    });
}

/// 注销；导航由路由服务监听用户信号自动处理
pub fn logout(ctx: &AuthContext) {
    let api = ctx.api();
    spawn_local(async move {
        api.auth().logout().await;
    });
}
