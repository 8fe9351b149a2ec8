//! 用户管理（总监）

use crate::auth::use_auth;
use crate::components::fields::*;
use crate::components::icons::*;
use crate::components::layout::*;
use gorev_takip::ErrorText;
use gorev_takip::shared::filter::manager_name;
use gorev_takip::shared::form::{Form, FormMode, UserField};
use gorev_takip::shared::notice::Notice;
use gorev_takip::shared::{Role, Task, User};
use gorev_takip::workflow::users;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn UserManagementPage() -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();

    let user_list = RwSignal::new(Vec::<User>::new());
    let managers = RwSignal::new(Vec::<User>::new());
    let reported = RwSignal::new(Vec::<Task>::new());
    let (loading, set_loading) = signal(true);

    let form_open = RwSignal::new(false);
    let editing = RwSignal::new(None::<User>);
    let form = RwSignal::new(Form::<UserField>::new(FormMode::Create));
    let (saving, set_saving) = signal(false);
    let deleting = RwSignal::new(None::<User>);

    let load = move || {
        let api = auth.api();
        set_loading.set(true);
        spawn_local(async move {
            let dir = users::load(&api).await;
            match dir.users {
                Ok(list) => user_list.set(list),
                Err(e) => notice.set(Some(Notice::error(e.user_message(&ErrorText::LOAD)))),
            }
            managers.set(dir.managers);
            reported.set(dir.reported);
            set_loading.set(false);
        });
    };
    load();

    let open_create = move |_| {
        editing.set(None);
        form.set(Form::new(FormMode::Create));
        form_open.set(true);
    };

    let open_edit = move |row: User| {
        form.set(Form::from_user(&row));
        editing.set(Some(row.clone()));
        form_open.set(true);
        let api = auth.api();
        spawn_local(async move {
            let fresh = users::fetch_for_edit(&api, &row).await;
            if fresh != row && editing.with_untracked(|e| e.as_ref().map(|u| u.id)) == Some(row.id) {
                form.set(Form::from_user(&fresh));
                editing.set(Some(fresh));
            }
        });
    };

    let on_save = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if form.try_update(|f| f.submit().is_ok()) != Some(true) {
            return;
        }
        let api = auth.api();
        let current = editing.get_untracked();
        let snapshot = form.get_untracked();
        set_saving.set(true);
        spawn_local(async move {
            let mut list = user_list.get_untracked();
            match users::save(&api, current.as_ref(), &snapshot, &mut list).await {
                Ok(message) => {
                    user_list.set(list);
                    form_open.set(false);
                    notice.set(Some(Notice::success(message)));
                }
                Err(message) => notice.set(Some(Notice::error(message))),
            }
            set_saving.set(false);
        });
    };

    let confirm_delete = move |_| {
        let Some(user) = deleting.get_untracked() else {
            return;
        };
        let api = auth.api();
        spawn_local(async move {
            let mut list = user_list.get_untracked();
            match users::delete(&api, &user, &mut list).await {
                Ok(message) => {
                    user_list.set(list);
                    notice.set(Some(Notice::success(message)));
                }
                Err(message) => notice.set(Some(Notice::error(message))),
            }
            deleting.set(None);
        });
    };

    let role_options = Signal::stored(
        Role::ALL
            .iter()
            .map(|r| (r.as_str().to_string(), format!("{} {}", r.avatar(), r.display_text())))
            .collect::<Vec<_>>(),
    );
    let manager_options = Signal::derive(move || {
        managers.with(|list| {
            list.iter()
                .map(|m| (m.id.to_string(), format!("{} (ID: {})", m.display_name(), m.id)))
                .collect::<Vec<_>>()
        })
    });
    let selected_role = move || form.with(Form::role);

    view! {
        <Page notice=notice>
            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-title">"Kullanıcılar"</div>
                    <div class="stat-value text-primary">{move || user_list.with(Vec::len)}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Müdürler"</div>
                    <div class="stat-value">{move || managers.with(Vec::len)}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Raporlanan Görevler"</div>
                    <div class="stat-value text-success">{move || reported.with(Vec::len)}</div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="flex items-center justify-between p-6 pb-2">
                        <h3 class="card-title"><Users attr:class="h-5 w-5" /> "Kullanıcı Yönetimi"</h3>
                        <div class="flex gap-2">
                            <button class="btn btn-primary btn-sm gap-2" on:click=open_create>
                                <Plus attr:class="h-4 w-4" /> "Yeni Kullanıcı"
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
                                    <th>"ID"</th>
                                    <th>"Kullanıcı"</th>
                                    <th>"E-posta"</th>
                                    <th>"Rol"</th>
                                    <th>"Bağlı Müdür"</th>
                                    <th>"Durum"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || loading.get()>
                                    <tr><td colspan="7"><Loading text="Yükleniyor..." /></td></tr>
                                </Show>
                                {move || {
                                    let lookup: Vec<User> = user_list.with(|u| {
                                        managers.with(|m| u.iter().chain(m.iter()).cloned().collect())
                                    });
                                    user_list.get().into_iter().map(|user| {
                                        let manager = manager_name(&user, &lookup);
                                        let for_edit = user.clone();
                                        let for_delete = user.clone();
                                        view! {
                                            <tr>
                                                <td class="font-mono">{user.id}</td>
                                                <td>
                                                    <div class="font-bold">{user.display_name().to_string()}</div>
                                                    <div class="text-sm opacity-50">{user.username.clone()}</div>
                                                </td>
                                                <td>{user.email.clone()}</td>
                                                <td>
                                                    <span class=user.role.badge_class()>
                                                        {user.role.avatar()} " " {user.role.display_text()}
                                                    </span>
                                                </td>
                                                <td>{manager}</td>
                                                <td>
                                                    <span class=if user.is_active() { "badge badge-success" } else { "badge badge-ghost" }>
                                                        {user.status_text()}
                                                    </span>
                                                </td>
                                                <td class="flex gap-1">
                                                    <button class="btn btn-ghost btn-xs btn-square" on:click=move |_| open_edit(for_edit.clone())>
                                                        <Pencil attr:class="h-4 w-4" />
                                                    </button>
                                                    <button class="btn btn-ghost btn-xs btn-square text-error" on:click=move |_| deleting.set(Some(for_delete.clone()))>
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

            // 创建 / 编辑弹窗
            <dialog class=move || if form_open.get() { "modal modal-open" } else { "modal" }>
                <div class="modal-box max-w-2xl">
                    <form on:submit=on_save novalidate>
                        <h3 class="font-bold text-lg">
                            {move || if editing.with(Option::is_some) { "Kullanıcıyı Düzenle" } else { "Yeni Kullanıcı" }}
                        </h3>
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                            <TextField form=form field=UserField::Username />
                            <TextField form=form field=UserField::Email kind="email" />
                            <TextField form=form field=UserField::FullName />
                            <TextField form=form field=UserField::Password kind="password" />
                            <SelectField form=form field=UserField::Role options=role_options placeholder="Rol seçin" />
                            <Show when=move || selected_role() == Some(Role::Manager)>
                                <TextField form=form field=UserField::ManagerType placeholder="Örn. Yazılım Müdürü" />
                            </Show>
                            <Show when=move || selected_role() == Some(Role::TeamMember)>
                                <SelectField form=form field=UserField::ManagerId options=manager_options placeholder="Müdür seçin" />
                            </Show>
                        </div>
                        <Show when=move || editing.with(Option::is_some)>
                            <p class="text-xs opacity-60 mt-2">"Şifreyi değiştirmek istemiyorsanız boş bırakın."</p>
                        </Show>
                        <div class="modal-action">
                            <button type="button" class="btn btn-ghost" on:click=move |_| form_open.set(false)>"İptal"</button>
                            <button class="btn btn-primary" disabled=move || saving.get()>"Kaydet"</button>
                        </div>
                    </form>
                </div>
            </dialog>

            // 删除确认
            <dialog class=move || if deleting.with(Option::is_some) { "modal modal-open" } else { "modal" }>
                <div class="modal-box">
                    <h3 class="font-bold text-lg text-error">"Kullanıcıyı Sil"</h3>
                    <p class="py-4">
                        {move || deleting.with(|u| u.as_ref().map(|u| format!(
                            "\"{}\" kullanıcısını silmek istediğinizden emin misiniz? Bu işlem geri alınamaz.",
                            u.username
                        )))}
                    </p>
                    <div class="modal-action">
                        <button class="btn btn-ghost" on:click=move |_| deleting.set(None)>"İptal"</button>
                        <button class="btn btn-error" on:click=confirm_delete>"Sil"</button>
                    </div>
                </div>
            </dialog>
        </Page>
    }
}
