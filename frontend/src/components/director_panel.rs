use crate::auth::use_auth;
use crate::components::icons::RefreshCw;
use crate::components::layout::*;
use gorev_takip::ErrorText;
use gorev_takip::shared::Task;
use gorev_takip::shared::notice::Notice;
use gorev_takip::shared::sort::{SortState, TaskColumn};
use gorev_takip::workflow::director::{self, DirectorPanel};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn DirectorPanelPage() -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();

    let panel = RwSignal::new(DirectorPanel::default());
    let (loading, set_loading) = signal(true);
    let show_completed = RwSignal::new(false);
    let sort = RwSignal::new(SortState::<TaskColumn>::new());

    let load = move || {
        let api = auth.api();
        let director_id = auth.user_id();
        set_loading.set(true);
        spawn_local(async move {
            match director::load_panel(&api, director_id).await {
                Ok(data) => panel.set(data),
                Err(e) => {
                    log::error!("[DirectorPanel] Load failed: {}", e);
                    notice.set(Some(Notice::error(e.user_message(&ErrorText::LOAD))));
                }
            }
            set_loading.set(false);
        });
    };
    load();

    let visible = Signal::derive(move || {
        panel.with(|p| {
            let list: &[Task] = if show_completed.get() { &p.completed } else { &p.active };
            sort.with(|s| s.sorted(list))
        })
    });

    let tab_class = move |completed: bool| {
        move || if show_completed.get() == completed { "tab tab-active" } else { "tab" }
    };

    view! {
        <Page notice=notice>
            <PriorityStats tasks=visible />
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="flex items-center justify-between p-6 pb-2">
                        <div role="tablist" class="tabs tabs-boxed">
                            <a role="tab" class=tab_class(false) on:click=move |_| show_completed.set(false)>
                                "Aktif (" {move || panel.with(|p| p.active.len())} ")"
                            </a>
                            <a role="tab" class=tab_class(true) on:click=move |_| show_completed.set(true)>
                                "Tamamlanan (" {move || panel.with(|p| p.completed.len())} ")"
                            </a>
                        </div>
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
                                    <SortHeader sort=sort column=TaskColumn::Assignee label="Kullanıcı" />
                                    <SortHeader sort=sort column=TaskColumn::Priority label="Öncelik" />
                                    <SortHeader sort=sort column=TaskColumn::Status label="Durum" />
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || loading.get()>
                                    <tr><td colspan="5"><Loading text="Yükleniyor..." /></td></tr>
                                </Show>
                                {move || visible.get().into_iter().map(|task| view! {
                                    <tr>
                                        <td class="font-mono">{task.id}</td>
                                        <td>
                                            <div class="font-bold">{task.name}</div>
                                            <div class="text-sm opacity-50 max-w-md truncate">{task.description}</div>
                                        </td>
                                        <td class="font-mono">{task.assignee_id}</td>
                                        <td><PriorityBadge priority=task.priority /></td>
                                        <td><StatusBadge status=task.status /></td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </Page>
    }
}
