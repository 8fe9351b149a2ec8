//! 新建 / 编辑任务页
//!
//! 受理人通过弹窗从候选用户中选择，也可直接输入 ID。
//! 保存成功后延迟跳回全部任务页。

use crate::auth::use_auth;
use crate::components::fields::*;
use crate::components::icons::Users;
use crate::components::layout::*;
use crate::web::delay;
use crate::web::router::use_navigate;
use gorev_takip::ErrorText;
use gorev_takip::shared::User;
use gorev_takip::shared::form::{Form, TaskField};
use gorev_takip::shared::notice::Notice;
use gorev_takip::shared::route::AppRoute;
use gorev_takip::workflow::task_form::{self, TaskTarget};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn TaskFormPage(#[prop(optional)] edit_id: Option<i64>) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let notice = use_notice();

    let form = RwSignal::new(Form::for_new_task());
    let target = RwSignal::new(edit_id.is_none().then_some(TaskTarget::Create));
    let candidates = RwSignal::new(Vec::<User>::new());
    let (modal_open, set_modal_open) = signal(false);
    let (not_found, set_not_found) = signal(false);
    let (saving, set_saving) = signal(false);

    let role = auth.user.get_untracked().map(|u| u.role);
    let selection_label = role.map(task_form::selection_label).unwrap_or("Kullanıcı");

    // 候选用户
    if let Some(me) = auth.user.get_untracked() {
        let api = auth.api();
        spawn_local(async move {
            match task_form::candidates(&api, &me).await {
                Ok(list) => candidates.set(list),
                Err(e) => log::warn!("[TaskForm] Candidates unavailable: {}", e),
            }
        });
    }

    // 编辑模式：按 id 加载任务
    if let Some(id) = edit_id {
        let api = auth.api();
        spawn_local(async move {
            match task_form::load_for_edit(&api, id).await {
                Ok((loaded, edit)) => {
                    form.set(loaded);
                    target.set(Some(edit));
                }
                Err(e) if e.is_not_found() => set_not_found.set(true),
                Err(e) => notice.set(Some(Notice::error(e.user_message(&ErrorText::TASK)))),
            }
        });
    }

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(to) = target.get_untracked() else {
            return;
        };
        if form.try_update(|f| f.submit().is_ok()) != Some(true) {
            return;
        }

        set_saving.set(true);
        let api = auth.api();
        let snapshot = form.get_untracked();
        spawn_local(async move {
            match task_form::save(&api, &to, &snapshot).await {
                Ok(_) => {
                    let text = match to {
                        TaskTarget::Create => "Görev başarıyla eklendi!",
                        TaskTarget::Edit { .. } => "Görev başarıyla güncellendi!",
                    };
                    notice.set(Some(Notice::success(text)));
                    delay(api.config().redirect_delay, move || navigate(AppRoute::AllTasks));
                }
                Err(e) => {
                    log::error!("[TaskForm] Save failed: {}", e);
                    notice.set(Some(Notice::error(e.user_message(&ErrorText::TASK))));
                    set_saving.set(false);
                }
            }
        });
    };

    let choose = move |user_id: i64| {
        form.update(|f| {
            f.set(TaskField::Assignee, user_id.to_string());
            f.touch(TaskField::Assignee);
        });
        set_modal_open.set(false);
    };

    let title = if edit_id.is_some() { "Görevi Düzenle" } else { "Yeni Görev Ekle" };

    view! {
        <Page notice=notice>
            <div class="card bg-base-100 shadow-xl max-w-2xl mx-auto">
                <Show
                    when=move || !not_found.get()
                    fallback=move || view! {
                        <div class="card-body items-center text-center">
                            <h2 class="card-title text-error">"Görev bulunamadı"</h2>
                            <p>"İstenen görev mevcut değil veya silinmiş olabilir."</p>
                            <button class="btn btn-primary" on:click=move |_| navigate(AppRoute::AllTasks)>
                                "Görev Listesine Dön"
                            </button>
                        </div>
                    }
                >
                    <Show when=move || target.with(Option::is_some) fallback=|| view! { <Loading text="Görev yükleniyor..." /> }>
                        <form class="card-body" on:submit=on_submit novalidate>
                            <h2 class="card-title">{title}</h2>

                            <TextField form=form field=TaskField::Name placeholder="Görev adı" />
                            <TextArea form=form field=TaskField::Description rows=4 />

                            <div class="form-control">
                                <label class="label">
                                    <span class="label-text">{selection_label} " (" {TaskField::Assignee.label()} ")"</span>
                                </label>
                                <div class="join w-full">
                                    <input type="number" min="1"
                                        class="input input-bordered join-item w-full"
                                        prop:value=move || form.with(|f| f.get(TaskField::Assignee).to_string())
                                        on:input=move |ev| form.update(|f| f.set(TaskField::Assignee, event_target_value(&ev)))
                                        on:blur=move |_| form.update(|f| f.touch(TaskField::Assignee)) />
                                    <button type="button" class="btn join-item gap-2" on:click=move |_| set_modal_open.set(true)>
                                        <Users attr:class="h-4 w-4" /> "Seç"
                                    </button>
                                </div>
                                <label class="label">
                                    <span class="label-text-alt">
                                        {move || candidates.with(|list| form.with(|f| task_form::selected_user_display(f, list)))}
                                    </span>
                                    <span class="label-text-alt text-error">
                                        {move || form.with(|f| f.visible_error(TaskField::Assignee))}
                                    </span>
                                </label>
                            </div>

                            <SelectField form=form field=TaskField::Priority options=Signal::stored(priority_options()) />

                            <div class="card-actions justify-end mt-4">
                                <button type="button" class="btn btn-ghost" on:click=move |_| navigate(AppRoute::AllTasks)>
                                    "İptal"
                                </button>
                                <button class="btn btn-primary" disabled=move || saving.get()>
                                    {move || saving.get().then(|| view! { <span class="loading loading-spinner"></span> })}
                                    "Kaydet"
                                </button>
                            </div>
                        </form>
                    </Show>
                </Show>
            </div>

            <dialog class=move || if modal_open.get() { "modal modal-open" } else { "modal" }>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">{selection_label} " Seç"</h3>
                    <Show when=move || candidates.with(Vec::is_empty)>
                        <p class="py-4 text-base-content/50">"Seçilebilecek kullanıcı bulunamadı."</p>
                    </Show>
                    <ul class="menu bg-base-200 rounded-box mt-4">
                        {move || candidates.get().into_iter().map(|u| {
                            let id = u.id;
                            view! {
                                <li>
                                    <a on:click=move |_| choose(id)>
                                        <span class=u.role.badge_class()>{u.role.avatar()}</span>
                                        {u.display_name().to_string()}
                                        <span class="opacity-50">"(ID: " {id} ")"</span>
                                    </a>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                    <div class="modal-action">
                        <button class="btn" on:click=move |_| set_modal_open.set(false)>"Kapat"</button>
                    </div>
                </div>
            </dialog>
        </Page>
    }
}
