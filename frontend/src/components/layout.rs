//! 页面公共部件：导航栏、通知、表头排序、徽章

use crate::auth::{logout, use_auth};
use crate::components::icons::*;
use crate::web::router::Link;
use gorev_takip::shared::notice::Notice;
use gorev_takip::shared::route::AppRoute;
use gorev_takip::shared::sort::SortState;
use gorev_takip::shared::filter::count_by_priority;
use gorev_takip::shared::{PriorityLevel, Task, TaskStatus};
use leptos::prelude::*;

// ============================================================================
// 通知 (Notice)
// ============================================================================

/// 通知信号；到期后自动清除，期间被新通知替换则不清除
pub fn use_notice() -> RwSignal<Option<Notice>> {
    let notice = RwSignal::new(None::<Notice>);
    Effect::new(move |_| {
        if let Some(current) = notice.get() {
            let ttl = current.ttl;
            set_timeout(
                move || {
                    if notice.get_untracked().as_ref() == Some(&current) {
                        notice.set(None);
                    }
                },
                ttl,
            );
        }
    });
    notice
}

#[component]
pub fn NoticeToast(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    view! {
        <Show when=move || notice.with(Option::is_some)>
            <div class="toast toast-top toast-end z-50">
                <div class=move || notice.with(|n| n.as_ref().map(Notice::alert_class).unwrap_or_default())>
                    <span>{move || notice.with(|n| n.as_ref().map(|n| n.text.clone()).unwrap_or_default())}</span>
                    <button class="btn btn-ghost btn-xs" on:click=move |_| notice.set(None)>"✕"</button>
                </div>
            </div>
        </Show>
    }
}

/// 浏览器确认框；无法弹出时视为取消
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

// ============================================================================
// 导航栏 (Navbar)
// ============================================================================

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let user = auth.user;

    let on_logout = move |_| logout(&auth);

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl">
            <div class="flex-1 gap-2">
                <ClipboardList attr:class="text-primary h-6 w-6" />
                <span class="btn btn-ghost text-xl">"Görev Takip Sistemi"</span>
                {move || user.get().map(|u| {
                    AppRoute::menu(u.role)
                        .iter()
                        .map(|(route, label)| view! {
                            <Link to=route.clone() class="btn btn-ghost btn-sm">{*label}</Link>
                        })
                        .collect_view()
                })}
            </div>
            <div class="flex-none gap-2">
                {move || user.get().map(|u| view! {
                    <span class=u.role.badge_class()>
                        {u.role.avatar()} " " {u.display_name().to_string()}
                    </span>
                })}
                <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                    <LogOut attr:class="h-4 w-4" /> "Çıkış Yap"
                </button>
            </div>
        </div>
    }
}

/// 带导航栏与通知的页面外壳
#[component]
pub fn Page(notice: RwSignal<Option<Notice>>, children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <NoticeToast notice=notice />
                <Navbar />
                {children()}
            </div>
        </div>
    }
}

#[component]
pub fn Loading(#[prop(optional, into)] text: String) -> impl IntoView {
    view! {
        <div class="text-center py-8 text-base-content/50">
            <span class="loading loading-spinner loading-md"></span> " " {text}
        </div>
    }
}

// ============================================================================
// 表格部件 (Table Parts)
// ============================================================================

/// 可排序表头；点击依次切换 升序 -> 降序 -> 未排序
#[component]
pub fn SortHeader<C>(sort: RwSignal<SortState<C>>, column: C, label: &'static str) -> impl IntoView
where
    C: Copy + PartialEq + Send + Sync + 'static,
{
    view! {
        <th class="cursor-pointer select-none" on:click=move |_| sort.update(|s| s.toggle(column))>
            {label} " " {move || sort.with(|s| s.icon(column))}
        </th>
    }
}

#[component]
pub fn PriorityBadge(priority: String) -> impl IntoView {
    let level = PriorityLevel::parse(&priority);
    let text = if priority.trim().is_empty() {
        level.display_text().to_string()
    } else {
        priority
    };
    view! { <span class=level.css_class()>{text}</span> }
}

#[component]
pub fn StatusBadge(status: TaskStatus) -> impl IntoView {
    view! { <span class=status.css_class()>{status.display_text().to_string()}</span> }
}

/// 列表的优先级计数
#[component]
pub fn PriorityStats(#[prop(into)] tasks: Signal<Vec<Task>>) -> impl IntoView {
    let counts = Memo::new(move |_| tasks.with(|t| count_by_priority(t)));
    view! {
        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <div class="stat">
                <div class="stat-title">"Toplam"</div>
                <div class="stat-value text-primary">{move || tasks.with(Vec::len)}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Yüksek Öncelik"</div>
                <div class="stat-value text-error">{move || counts.get().high}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Orta Öncelik"</div>
                <div class="stat-value text-warning">{move || counts.get().medium}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Düşük Öncelik"</div>
                <div class="stat-value text-success">{move || counts.get().low}</div>
            </div>
        </div>
    }
}
