//! 经理面板
//!
//! 团队成员、团队任务、自己的任务、已完成任务与团队绩效。
//! 支持分配任务、编辑、状态切换、删除、带说明的报告和批量报告。

use crate::auth::use_auth;
use crate::components::fields::*;
use crate::components::icons::*;
use crate::components::layout::*;
use gorev_takip::ErrorText;
use gorev_takip::shared::filter::{available_parent_tasks, member_name, task_count_for};
use gorev_takip::shared::form::{AssignField, Form, ReportField, TaskField};
use gorev_takip::shared::notice::Notice;
use gorev_takip::shared::selection::BulkSelection;
use gorev_takip::shared::sort::{SortState, TaskColumn};
use gorev_takip::shared::{Task, TaskStatus};
use gorev_takip::workflow::manager::{self, ManagerPanel, StatusAction};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 当前状态下可用的状态操作
fn actions_for(status: &TaskStatus) -> &'static [StatusAction] {
    match status {
        TaskStatus::InProgress => &[StatusAction::Pause, StatusAction::Complete],
        TaskStatus::Completed => &[],
        _ => &[StatusAction::Start, StatusAction::Complete],
    }
}

fn action_button(action: StatusAction) -> (&'static str, &'static str) {
    match action {
        StatusAction::Pause => ("Beklet", "btn btn-xs btn-warning"),
        StatusAction::Start => ("Başlat", "btn btn-xs btn-info"),
        StatusAction::Complete => ("Tamamla", "btn btn-xs btn-success"),
    }
}

#[component]
pub fn ManagerPanelPage() -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();

    let panel = RwSignal::new(ManagerPanel::default());
    let (loading, set_loading) = signal(true);
    let sort = RwSignal::new(SortState::<TaskColumn>::new());
    let selection = RwSignal::new(BulkSelection::new());

    let assign_form = RwSignal::new(Form::for_assignment());
    let (assigning, set_assigning) = signal(false);

    let editing = RwSignal::new(None::<Task>);
    let edit_form = RwSignal::new(Form::<TaskField>::default());

    let reporting = RwSignal::new(None::<Task>);
    let report_form = RwSignal::new(Form::<ReportField>::default());

    // ------------------------------------------------------------------
    // 加载
    // ------------------------------------------------------------------

    let load = move || {
        let api = auth.api();
        let manager_id = auth.user_id();
        set_loading.set(true);
        spawn_local(async move {
            let data = manager::load_panel(&api, manager_id).await;
            if data.failed > 0 {
                notice.set(Some(Notice::error(format!(
                    "{} liste yüklenemedi. Lütfen sayfayı yenileyin.",
                    data.failed
                ))));
            }
            panel.set(data);
            set_loading.set(false);
        });
    };
    load();

    let reload_team = move || {
        let api = auth.api();
        let manager_id = auth.user_id();
        let members = panel.with_untracked(|p| p.members.clone());
        spawn_local(async move {
            match manager::reload_team_tasks(&api, manager_id, &members).await {
                Ok(tasks) => panel.update(|p| p.team_tasks = tasks),
                Err(e) => log::error!("[ManagerPanel] Team task reload failed: {}", e),
            }
        });
    };

    let fail = move |e: gorev_takip::ApiError| {
        notice.set(Some(Notice::error(e.user_message(&ErrorText::TASK))));
    };

    // ------------------------------------------------------------------
    // 操作
    // ------------------------------------------------------------------

    let on_assign = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if assign_form.try_update(|f| f.submit().is_ok()) != Some(true) {
            return;
        }
        let req = assign_form.with_untracked(|f| f.to_request());
        let api = auth.api();
        set_assigning.set(true);
        spawn_local(async move {
            match manager::assign(&api, &req).await {
                Ok(message) => {
                    notice.set(Some(Notice::success(message)));
                    assign_form.set(Form::for_assignment());
                    reload_team();
                }
                Err(e) => fail(e),
            }
            set_assigning.set(false);
        });
    };

    let open_edit = move |task: Task| {
        edit_form.set(Form::from_task(&task));
        editing.set(Some(task));
    };

    let save_edit = move |_| {
        let Some(task) = editing.get_untracked() else {
            return;
        };
        if edit_form.try_update(|f| f.submit().is_ok()) != Some(true) {
            return;
        }
        let draft = edit_form.with_untracked(|f| f.to_draft(task.status.clone()));
        let api = auth.api();
        spawn_local(async move {
            match manager::edit(&api, &task, draft).await {
                Ok(message) => {
                    editing.set(None);
                    notice.set(Some(Notice::success(message)));
                    reload_team();
                }
                Err(e) => fail(e),
            }
        });
    };

    let change_status = move |task: Task, action: StatusAction| {
        if !confirm(&action.confirm_text(&task.name)) {
            return;
        }
        let api = auth.api();
        let manager_id = auth.user_id();
        spawn_local(async move {
            match manager::set_status(&api, manager_id, &task, action).await {
                Ok(message) => {
                    notice.set(Some(Notice::success(message)));
                    load();
                }
                Err(e) => fail(e),
            }
        });
    };

    let delete_task = move |task: Task| {
        if !confirm(&format!(
            "\"{}\" görevini silmek istediğinizden emin misiniz?",
            task.name
        )) {
            return;
        }
        let api = auth.api();
        spawn_local(async move {
            match manager::delete(&api, &task).await {
                Ok(message) => {
                    panel.update(|p| p.team_tasks.retain(|t| t.id != task.id));
                    notice.set(Some(Notice::success(message)));
                }
                Err(e) => fail(e),
            }
        });
    };

    let open_report = move |task: Task| {
        report_form.set(Form::default());
        reporting.set(Some(task));
    };

    let send_report = move |_| {
        let Some(task) = reporting.get_untracked() else {
            return;
        };
        if report_form.try_update(|f| f.submit().is_ok()) != Some(true) {
            return;
        }
        let description = report_form.with_untracked(|f| f.get(ReportField::Description).to_string());
        let api = auth.api();
        let manager_id = auth.user_id();
        spawn_local(async move {
            match manager::report_with_note(&api, manager_id, &task, &description).await {
                Ok(message) => {
                    reporting.set(None);
                    notice.set(Some(Notice::success(message)));
                }
                Err(e) => fail(e),
            }
        });
    };

    let report_selected = move |_| {
        let ids = selection.with_untracked(BulkSelection::ids);
        if ids.is_empty() {
            notice.set(Some(Notice::info("Lütfen raporlanacak görevleri seçin.")));
            return;
        }
        let api = auth.api();
        let manager_id = auth.user_id();
        spawn_local(async move {
            let tally = manager::report_many(&api, manager_id, &ids).await;
            let summary = tally.summary("raporlandı");
            notice.set(Some(if tally.is_clean() {
                Notice::success(summary)
            } else {
                let detail = tally.first_error(&ErrorText::TASK).unwrap_or_default();
                Notice::error(format!("{summary}. {detail}"))
            }));
            selection.update(BulkSelection::reset);
        });
    };

    // ------------------------------------------------------------------
    // 派生数据
    // ------------------------------------------------------------------

    let team_tasks = Signal::derive(move || panel.with(|p| sort.with(|s| s.sorted(&p.team_tasks))));
    let member_options = Signal::derive(move || {
        panel.with(|p| {
            p.members
                .iter()
                .map(|m| (m.id.to_string(), format!("{} (ID: {})", m.display_name(), m.id)))
                .collect::<Vec<_>>()
        })
    });
    let parent_options = Signal::derive(move || {
        panel.with(|p| {
            available_parent_tasks(&p.own_tasks)
                .into_iter()
                .map(|t| (t.id.to_string(), format!("#{} {}", t.id, t.name)))
                .collect::<Vec<_>>()
        })
    });
    let completed_ids = move || panel.with(|p| p.completed.iter().map(|t| t.id).collect::<Vec<_>>());
    let bulk_active = move || selection.with(BulkSelection::is_active);

    let status_buttons = move |task: Task| {
        actions_for(&task.status)
            .iter()
            .map(|action| {
                let action = *action;
                let (label, class) = action_button(action);
                let task = task.clone();
                view! {
                    <button class=class on:click=move |_| change_status(task.clone(), action)>{label}</button>
                }
            })
            .collect_view()
    };

    view! {
        <Page notice=notice>
            // 绩效
            {move || panel.with(|p| p.performance.clone()).map(|perf| view! {
                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-title">"Ekip Üyeleri"</div>
                        <div class="stat-value text-primary">{perf.total_team_members}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Toplam Görev"</div>
                        <div class="stat-value">{perf.total_tasks}</div>
                        <div class="stat-desc">
                            {format!("{} bekliyor, {} devam ediyor", perf.pending_tasks, perf.in_progress_tasks)}
                        </div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Tamamlanan"</div>
                        <div class="stat-value text-success">{perf.completed_tasks}</div>
                        <div class="stat-desc">{format!("%{:.0} tamamlanma", perf.completion_rate)}</div>
                    </div>
                </div>
            })}

            <div class="grid grid-cols-1 lg:grid-cols-3 gap-8">
                // 团队成员
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title"><Users attr:class="h-5 w-5" /> "Ekibim"</h3>
                        <Show when=move || loading.get()>
                            <Loading />
                        </Show>
                        <ul class="menu">
                            {move || panel.with(|p| p.members.iter().map(|m| {
                                let count = task_count_for(&p.team_tasks, m.id);
                                view! {
                                    <li>
                                        <span>
                                            {m.role.avatar()} " " {m.display_name().to_string()}
                                            <span class="badge badge-neutral">{count}</span>
                                        </span>
                                    </li>
                                }
                            }).collect_view())}
                        </ul>
                    </div>
                </div>

                // 分配任务
                <div class="card bg-base-100 shadow-xl lg:col-span-2">
                    <form class="card-body" on:submit=on_assign novalidate>
                        <h3 class="card-title"><Plus attr:class="h-5 w-5" /> "Görev Ata"</h3>
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                            <SelectField form=assign_form field=AssignField::TeamMember options=member_options placeholder="Ekip üyesi seçin" />
                            <SelectField form=assign_form field=AssignField::Priority options=Signal::stored(priority_options()) />
                        </div>
                        <TextField form=assign_form field=AssignField::Name />
                        <TextArea form=assign_form field=AssignField::Description />
                        <SelectField form=assign_form field=AssignField::ParentTask options=parent_options placeholder="Yok" />
                        <div class="card-actions justify-end">
                            <button class="btn btn-primary" disabled=move || assigning.get()>"Görevi Ata"</button>
                        </div>
                    </form>
                </div>
            </div>

            // 团队任务
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="flex items-center justify-between p-6 pb-2">
                        <h3 class="card-title">"Ekip Görevleri"</h3>
                        <button on:click=move |_| load() disabled=move || loading.get() class="btn btn-ghost btn-circle">
                            <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                    </div>
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <SortHeader sort=sort column=TaskColumn::Id label="ID" />
                                    <SortHeader sort=sort column=TaskColumn::Name label="Görev Adı" />
                                    <SortHeader sort=sort column=TaskColumn::Assignee label="Ekip Üyesi" />
                                    <SortHeader sort=sort column=TaskColumn::Priority label="Öncelik" />
                                    <SortHeader sort=sort column=TaskColumn::Status label="Durum" />
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    let members = panel.with(|p| p.members.clone());
                                    team_tasks.get().into_iter().map(|task| {
                                        let assignee = member_name(task.assignee_id, &members);
                                        let for_edit = task.clone();
                                        let for_delete = task.clone();
                                        view! {
                                            <tr>
                                                <td class="font-mono">{task.id}</td>
                                                <td>
                                                    <div class="font-bold">{task.name.clone()}</div>
                                                    <div class="text-sm opacity-50 max-w-md truncate">{task.description.clone()}</div>
                                                </td>
                                                <td>{assignee}</td>
                                                <td><PriorityBadge priority=task.priority.clone() /></td>
                                                <td><StatusBadge status=task.status.clone() /></td>
                                                <td class="flex flex-wrap gap-1">
                                                    {status_buttons(task.clone())}
                                                    <button class="btn btn-ghost btn-xs btn-square" on:click=move |_| open_edit(for_edit.clone())>
                                                        <Pencil attr:class="h-4 w-4" />
                                                    </button>
                                                    <button class="btn btn-ghost btn-xs btn-square text-error" on:click=move |_| delete_task(for_delete.clone())>
                                                        <Trash2 attr:class="h-4 w-4" />
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }).collect_view()
                                }}
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>

            // 自己的任务
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Bana Atanan Görevler"</h3>
                    <table class="table w-full">
                        <tbody>
                            {move || panel.with(|p| p.own_tasks.clone()).into_iter().map(|task| view! {
                                <tr>
                                    <td class="font-mono">{task.id}</td>
                                    <td class="font-bold">{task.name.clone()}</td>
                                    <td><PriorityBadge priority=task.priority.clone() /></td>
                                    <td><StatusBadge status=task.status.clone() /></td>
                                    <td class="flex gap-1">{status_buttons(task.clone())}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                </div>
            </div>

            // 已完成任务与报告
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <h3 class="card-title">"Tamamlanan Görevler"</h3>
                        <div class="flex gap-2">
                            <button class="btn btn-sm btn-outline" on:click=move |_| selection.update(BulkSelection::toggle_mode)>
                                {move || if bulk_active() { "Toplu Raporu Kapat" } else { "Toplu Raporla" }}
                            </button>
                            <Show when=bulk_active>
                                <button class="btn btn-sm btn-primary gap-2" on:click=report_selected
                                    disabled=move || selection.with(BulkSelection::is_empty)>
                                    <Send attr:class="h-4 w-4" />
                                    "Seçilenleri Raporla (" {move || selection.with(BulkSelection::len)} ")"
                                </button>
                            </Show>
                        </div>
                    </div>
                    <table class="table w-full">
                        <thead>
                            <tr>
                                <Show when=bulk_active>
                                    <th>
                                        <input type="checkbox" class="checkbox checkbox-sm"
                                            prop:checked=move || selection.with(|s| s.all_selected(completed_ids()))
                                            on:change=move |_| {
                                                let ids = completed_ids();
                                                selection.update(|s| s.toggle_all(ids));
                                            } />
                                    </th>
                                </Show>
                                <th>"ID"</th>
                                <th>"Görev Adı"</th>
                                <th>"Ekip Üyesi"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let members = panel.with(|p| p.members.clone());
                                panel.with(|p| p.completed.clone()).into_iter().map(|task| {
                                    let id = task.id;
                                    let assignee = member_name(task.assignee_id, &members);
                                    let name = task.name.clone();
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
                                            <td class="font-bold">{name}</td>
                                            <td>{assignee}</td>
                                            <td>
                                                <button class="btn btn-xs btn-outline gap-1" on:click=move |_| open_report(task.clone())>
                                                    <Send attr:class="h-3 w-3" /> "Raporla"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()
                            }}
                        </tbody>
                    </table>
                </div>
            </div>

            // 编辑弹窗
            <dialog class=move || if editing.with(Option::is_some) { "modal modal-open" } else { "modal" }>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">"Görevi Düzenle"</h3>
                    <TextField form=edit_form field=TaskField::Name />
                    <TextArea form=edit_form field=TaskField::Description />
                    <SelectField form=edit_form field=TaskField::Priority options=Signal::stored(priority_options()) />
                    <p class="text-xs opacity-60 mt-2">"Kaydedildiğinde görev durumu \"Beklemede\" olarak sıfırlanır."</p>
                    <div class="modal-action">
                        <button class="btn btn-ghost" on:click=move |_| editing.set(None)>"İptal"</button>
                        <button class="btn btn-primary" on:click=save_edit>"Kaydet"</button>
                    </div>
                </div>
            </dialog>

            // 报告弹窗
            <dialog class=move || if reporting.with(Option::is_some) { "modal modal-open" } else { "modal" }>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">
                        "Direktöre Raporla: " {move || reporting.with(|t| t.as_ref().map(|t| t.name.clone()))}
                    </h3>
                    <TextArea form=report_form field=ReportField::Description rows=4 />
                    <div class="modal-action">
                        <button class="btn btn-ghost" on:click=move |_| reporting.set(None)>"İptal"</button>
                        <button class="btn btn-primary gap-2" on:click=send_report>
                            <Send attr:class="h-4 w-4" /> "Rapor Gönder"
                        </button>
                    </div>
                </div>
            </dialog>
        </Page>
    }
}
