//! 成员任务页（经理与团队成员）
//!
//! 按固定间隔自动刷新，加载中跳过；手动刷新会重启定时器。

use crate::auth::use_auth;
use crate::components::icons::RefreshCw;
use crate::components::layout::*;
use crate::web::{Interval, delay};
use gorev_takip::shared::filter::TaskFilter;
use gorev_takip::shared::notice::Notice;
use gorev_takip::shared::sort::{SortState, TaskColumn};
use gorev_takip::shared::{Task, TaskStatus, UserTaskStats};
use gorev_takip::workflow::member;
use leptos::prelude::*;
use leptos::task::spawn_local;

const STATUS_CHOICES: [TaskStatus; 3] =
    [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Completed];

#[component]
pub fn UserTasksPage() -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();

    let tasks = RwSignal::new(Vec::<Task>::new());
    let stats = RwSignal::new(None::<UserTaskStats>);
    let filter = RwSignal::new(TaskFilter::default());
    let (loading, set_loading) = signal(false);
    let sort = RwSignal::new(SortState::<TaskColumn>::new());
    let timer = StoredValue::new_local(None::<Interval>);

    let refresh = move || {
        let api = auth.api();
        let user_id = auth.user_id();
        let current = filter.get_untracked();
        set_loading.set(true);
        spawn_local(async move {
            let (list, summary) = member::refresh(&api, user_id, current).await;
            match list {
                Ok(list) => tasks.set(list),
                Err(_) => notice.set(Some(Notice::error(member::LOAD_FAILED))),
            }
            if let Ok(summary) = summary {
                stats.set(Some(summary));
            }
            set_loading.set(false);
        });
    };

    let restart_timer = move || {
        let period = auth.api().config().refresh_interval;
        let interval = Interval::new(period, move || {
            if loading.get_untracked() {
                log::debug!("[UserTasks] Auto refresh skipped, still loading");
                return;
            }
            refresh();
        });
        // 旧定时器在替换时被 drop 并清除
        timer.set_value(Some(interval));
    };

    refresh();
    restart_timer();
    on_cleanup(move || timer.set_value(None));

    let manual_refresh = move |_| {
        refresh();
        restart_timer();
    };

    let switch_filter = move |to: TaskFilter| {
        filter.set(to);
        refresh();
    };

    let complete = move |task: Task| {
        if !confirm(&format!(
            "\"{}\" görevini tamamlandı olarak işaretlemek istiyor musunuz?",
            task.name
        )) {
            return;
        }
        let api = auth.api();
        let user_id = auth.user_id();
        spawn_local(async move {
            let mut list = tasks.get_untracked();
            match member::complete(&api, user_id, &mut list, task.id).await {
                Ok(message) => {
                    tasks.set(list);
                    notice.set(Some(Notice::success(message)));
                    refresh();
                }
                Err(failure) => {
                    notice.set(Some(Notice::error(failure.message)));
                    if failure.reload {
                        delay(api.config().redirect_delay, refresh);
                    }
                }
            }
        });
    };

    let change_status = move |task_id: i64, raw: String| {
        let status = TaskStatus::from(raw);
        let api = auth.api();
        let user_id = auth.user_id();
        spawn_local(async move {
            let mut list = tasks.get_untracked();
            match member::update_status(&api, user_id, &mut list, task_id, status).await {
                Ok(message) => {
                    tasks.set(list);
                    notice.set(Some(Notice::success(message)));
                }
                Err(message) => notice.set(Some(Notice::error(message))),
            }
        });
    };

    let visible = Signal::derive(move || tasks.with(|list| sort.with(|s| s.sorted(list))));

    view! {
        <Page notice=notice>
            {move || stats.get().map(|s| view! {
                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-title">"Toplam Görev"</div>
                        <div class="stat-value text-primary">{s.total_tasks}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Aktif"</div>
                        <div class="stat-value text-info">{s.active_tasks}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Tamamlanan"</div>
                        <div class="stat-value text-success">{s.completed_tasks}</div>
                    </div>
                </div>
            })}

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="flex items-center justify-between p-6 pb-2">
                        <div role="tablist" class="tabs tabs-boxed">
                            {TaskFilter::ALL.into_iter().map(|f| view! {
                                <a role="tab"
                                    class=move || if filter.get() == f { "tab tab-active" } else { "tab" }
                                    on:click=move |_| switch_filter(f)>
                                    {f.label()}
                                </a>
                            }).collect_view()}
                        </div>
                        <button on:click=manual_refresh disabled=move || loading.get() class="btn btn-ghost btn-circle">
                            <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                    </div>

                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <SortHeader sort=sort column=TaskColumn::Id label="ID" />
                                    <SortHeader sort=sort column=TaskColumn::Name label="Görev Adı" />
                                    <SortHeader sort=sort column=TaskColumn::Description label="Açıklama" />
                                    <SortHeader sort=sort column=TaskColumn::Priority label="Öncelik" />
                                    <SortHeader sort=sort column=TaskColumn::Status label="Durum" />
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || !loading.get() && visible.with(Vec::is_empty)>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/50">
                                            "Bu filtrede görev bulunmuyor."
                                        </td>
                                    </tr>
                                </Show>
                                {move || visible.get().into_iter().map(|task| {
                                    let id = task.id;
                                    let done = task.status.is_completed();
                                    let current = task.status.as_str().to_string();
                                    let for_complete = task.clone();
                                    view! {
                                        <tr>
                                            <td class="font-mono">{id}</td>
                                            <td class="font-bold">{task.name.clone()}</td>
                                            <td class="max-w-md truncate">{task.description.clone()}</td>
                                            <td><PriorityBadge priority=task.priority.clone() /></td>
                                            <td>
                                                <select class="select select-bordered select-xs"
                                                    disabled=done
                                                    on:change=move |ev| change_status(id, event_target_value(&ev))>
                                                    {STATUS_CHOICES.into_iter().map(|s| {
                                                        let selected = s.as_str() == current;
                                                        view! {
                                                            <option value=s.as_str().to_string() selected=selected>
                                                                {s.display_text().to_string()}
                                                            </option>
                                                        }
                                                    }).collect_view()}
                                                </select>
                                            </td>
                                            <td>
                                                <Show when=move || !done>
                                                    <button class="btn btn-xs btn-success" on:click={
                                                        let task = for_complete.clone();
                                                        move |_| complete(task.clone())
                                                    }>
                                                        "Tamamla"
                                                    </button>
                                                </Show>
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()}
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </Page>
    }
}
