//! 总监的全部任务页
//!
//! 两个标签页：分配出去的任务（可软删除、批量删除、编辑）与经理报告上来的已完成任务。

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::components::layout::*;
use crate::web::router::use_navigate;
use gorev_takip::ErrorText;
use gorev_takip::shared::notice::Notice;
use gorev_takip::shared::route::AppRoute;
use gorev_takip::shared::selection::BulkSelection;
use gorev_takip::shared::sort::{SortState, TaskColumn};
use gorev_takip::shared::{Task, date};
use gorev_takip::workflow::director;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Assigned,
    Reports,
}

#[component]
pub fn AllTasksPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let notice = use_notice();

    let assigned = RwSignal::new(Vec::<Task>::new());
    let reports = RwSignal::new(Vec::<Task>::new());
    let (loading, set_loading) = signal(true);
    let tab = RwSignal::new(Tab::Assigned);
    let sort = RwSignal::new(SortState::<TaskColumn>::new());
    let selection = RwSignal::new(BulkSelection::new());

    let current = move || match tab.get() {
        Tab::Assigned => assigned,
        Tab::Reports => reports,
    };
    let visible = Signal::derive(move || {
        let list = current();
        list.with(|tasks| sort.with(|s| s.sorted(tasks)))
    });

    let load = move || {
        let api = auth.api();
        let director_id = auth.user_id();
        set_loading.set(true);
        spawn_local(async move {
            let board = director::load_board(&api, director_id).await;
            match board.assigned {
                Ok(tasks) => assigned.set(tasks),
                Err(e) => notice.set(Some(Notice::error(e.user_message(&ErrorText::LOAD)))),
            }
            match board.reports {
                Ok(tasks) => reports.set(tasks),
                Err(e) => notice.set(Some(Notice::error(e.user_message(&ErrorText::LOAD)))),
            }
            set_loading.set(false);
        });
    };
    load();

    let switch_tab = move |to: Tab| {
        tab.set(to);
        selection.update(BulkSelection::reset);
    };

    let delete_one = move |task: Task| {
        let confirmed = match tab.get_untracked() {
            Tab::Assigned => confirm(&format!(
                "\"{}\" görevini silmek istediğinizden emin misiniz?",
                task.name
            )),
            Tab::Reports => confirm(&format!(
                "\"{}\" raporlanan görevini listeden kaldırmak istediğinizden emin misiniz?",
                task.name
            )),
        };
        if !confirmed {
            return;
        }
        let api = auth.api();
        let result = match tab.get_untracked() {
            Tab::Assigned => assigned
                .try_update(|list| director::soft_delete(&api, list, task.id))
                .map(|r| r.map_err(|e| e.user_message(&director::DELETE_ERRORS))),
            Tab::Reports => reports
                .try_update(|list| director::remove_report(&api, list, task.id))
                .map(Ok),
        };
        notice.set(Some(match result {
            Some(Ok(message)) => Notice::success(message),
            Some(Err(message)) => Notice::error(message),
            None => Notice::error(director::DELETE_ERRORS.fallback),
        }));
    };

    let delete_selected = move |_| {
        let ids = selection.with_untracked(BulkSelection::ids);
        if ids.is_empty() {
            notice.set(Some(Notice::info("Lütfen silinecek görevleri seçin.")));
            return;
        }
        if !confirm(&format!(
            "Seçili {} görevi silmek istediğinizden emin misiniz?",
            ids.len()
        )) {
            return;
        }
        let api = auth.api();
        match assigned.try_update(|list| director::soft_delete_many(&api, list, &ids)) {
            Some(Ok(message)) => {
                selection.update(BulkSelection::reset);
                notice.set(Some(Notice::success(message)));
            }
            Some(Err(e)) => {
                log::error!("[AllTasks] Bulk delete failed: {}", e);
                notice.set(Some(Notice::error("Görevler silinirken bir hata oluştu.")));
            }
            None => {}
        }
    };

    let visible_ids = move || visible.with(|list| list.iter().map(|t| t.id).collect::<Vec<_>>());
    let bulk_active = move || selection.with(BulkSelection::is_active);

    view! {
        <Page notice=notice>
            <PriorityStats tasks=visible />

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="flex flex-wrap items-center justify-between gap-2 p-6 pb-2">
                        <div role="tablist" class="tabs tabs-boxed">
                            <a role="tab"
                                class=move || if tab.get() == Tab::Assigned { "tab tab-active" } else { "tab" }
                                on:click=move |_| switch_tab(Tab::Assigned)>
                                "Atadığım Görevler (" {move || assigned.with(Vec::len)} ")"
                            </a>
                            <a role="tab"
                                class=move || if tab.get() == Tab::Reports { "tab tab-active" } else { "tab" }
                                on:click=move |_| switch_tab(Tab::Reports)>
                                "Raporlanan Görevler (" {move || reports.with(Vec::len)} ")"
                            </a>
                        </div>
                        <div class="flex gap-2">
                            <Show when=move || tab.get() == Tab::Assigned>
                                <button class="btn btn-sm btn-outline"
                                    on:click=move |_| selection.update(BulkSelection::toggle_mode)>
                                    {move || if bulk_active() { "Toplu Silmeyi Kapat" } else { "Toplu Sil" }}
                                </button>
                                <Show when=bulk_active>
                                    <button class="btn btn-sm btn-error gap-2" on:click=delete_selected
                                        disabled=move || selection.with(BulkSelection::is_empty)>
                                        <Trash2 attr:class="h-4 w-4" />
                                        "Seçilenleri Sil (" {move || selection.with(BulkSelection::len)} ")"
                                    </button>
                                </Show>
                            </Show>
                            <button class="btn btn-sm btn-primary gap-2" on:click=move |_| navigate(AppRoute::AddTask)>
                                <Plus attr:class="h-4 w-4" /> "Yeni Görev"
                            </button>
                            <button on:click=move |_| load() disabled=move || loading.get() class="btn btn-ghost btn-circle btn-sm">
                                <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                            </button>
                        </div>
                    </div>

                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <Show when=bulk_active>
                                        <th>
                                            <input type="checkbox" class="checkbox checkbox-sm"
                                                prop:checked=move || selection.with(|s| s.all_selected(visible_ids()))
                                                on:change=move |_| {
                                                    let ids = visible_ids();
                                                    selection.update(|s| s.toggle_all(ids));
                                                } />
                                        </th>
                                    </Show>
                                    <SortHeader sort=sort column=TaskColumn::Id label="ID" />
                                    <SortHeader sort=sort column=TaskColumn::Name label="Görev Adı" />
                                    <SortHeader sort=sort column=TaskColumn::Description label="Açıklama" />
                                    <SortHeader sort=sort column=TaskColumn::Assignee label="Kullanıcı" />
                                    <SortHeader sort=sort column=TaskColumn::Priority label="Öncelik" />
                                    <SortHeader sort=sort column=TaskColumn::Status label="Durum" />
                                    <Show when=move || tab.get() == Tab::Reports>
                                        <th>"Rapor Notu"</th>
                                    </Show>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || loading.get()>
                                    <tr><td colspan="9"><Loading text="Yükleniyor..." /></td></tr>
                                </Show>
                                <Show when=move || !loading.get() && visible.with(Vec::is_empty)>
                                    <tr>
                                        <td colspan="9" class="text-center py-8 text-base-content/50">
                                            "Gösterilecek görev yok."
                                        </td>
                                    </tr>
                                </Show>
                                {move || visible.get().into_iter().map(|task| {
                                    let id = task.id;
                                    let for_delete = task.clone();
                                    let note = task.report_description.clone().map(|d| {
                                        (d, task.reported_at.as_deref().map(date::display).unwrap_or_default())
                                    });
                                    view! {
                                        <tr>
                                            <Show when=bulk_active>
                                                <td>
                                                    <input type="checkbox" class="checkbox checkbox-sm"
                                                        prop:checked=move || selection.with(|s| s.is_selected(id))
                                                        on:change=move |_| selection.update(|s| s.toggle(id)) />
                                                </td>
                                            </Show>
                                            <td class="font-mono">{id}</td>
                                            <td class="font-bold">{task.name.clone()}</td>
                                            <td class="max-w-xs truncate">{task.description.clone()}</td>
                                            <td class="font-mono">{task.assignee_id}</td>
                                            <td><PriorityBadge priority=task.priority.clone() /></td>
                                            <td><StatusBadge status=task.status.clone() /></td>
                                            <Show when=move || tab.get() == Tab::Reports>
                                                <td>
                                                    {note.clone().map(|(text, at)| view! {
                                                        <div class="text-sm">{text}</div>
                                                        <div class="text-xs opacity-50">{at}</div>
                                                    })}
                                                </td>
                                            </Show>
                                            <td class="flex gap-1">
                                                <Show when=move || tab.get() == Tab::Assigned>
                                                    <button class="btn btn-ghost btn-sm btn-square"
                                                        on:click=move |_| navigate(AppRoute::EditTask(id))>
                                                        <Pencil attr:class="h-4 w-4" />
                                                    </button>
                                                </Show>
                                                <button class="btn btn-ghost btn-sm btn-square text-error"
                                                    on:click=move |_| delete_one(for_delete.clone())>
                                                    <Trash2 attr:class="h-4 w-4" />
                                                </button>
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
