use crate::auth::use_auth;
use crate::components::fields::TextField;
use crate::components::icons::ClipboardList;
use gorev_takip::ErrorText;
use gorev_takip::shared::form::{Form, LoginField};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();

    let form = RwSignal::new(Form::<LoginField>::default());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if form.try_update(|f| f.submit().is_ok()) != Some(true) {
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let req = form.with_untracked(|f| f.to_request());
        let api = auth.api();
        spawn_local(async move {
            // 成功后由路由服务根据角色跳转
            if let Err(e) = api.auth().login(&req).await {
                log::warn!("[Login] Failed: {}", e);
                set_error_msg.set(Some(e.user_message(&ErrorText::LOGIN)));
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ClipboardList attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Görev Takip Sistemi"</h1>
                        <p class="text-base-content/70">"Devam etmek için giriş yapın"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        {move || error_msg.get().map(|msg| view! {
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{msg}</span>
                            </div>
                        })}

                        <TextField form=form field=LoginField::UsernameOrEmail placeholder="kullanici@ornek.com" />
                        <TextField form=form field=LoginField::Password kind="password" placeholder="••••••••" />

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Giriş yapılıyor..." }.into_any()
                                } else {
                                    "Giriş Yap".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
