//! 绑定到 `Form<F>` 信号的输入控件
//!
//! 输入时写值，失焦时标记 touched；错误只在 touched 后显示。

use gorev_takip::shared::PriorityLevel;
use gorev_takip::shared::form::{Form, FormField};
use leptos::prelude::*;

fn error_view<F>(form: RwSignal<Form<F>>, field: F) -> impl IntoView
where
    F: FormField + Send + Sync,
{
    move || {
        form.with(|f| f.visible_error(field)).map(|msg| {
            view! {
                <label class="label">
                    <span class="label-text-alt text-error">{msg}</span>
                </label>
            }
        })
    }
}

fn input_class<F>(form: RwSignal<Form<F>>, field: F, base: &'static str) -> impl Fn() -> String
where
    F: FormField + Send + Sync,
{
    move || {
        if form.with(|f| f.visible_error(field).is_some()) {
            format!("{base} {base}-error w-full")
        } else {
            format!("{base} w-full")
        }
    }
}

#[component]
pub fn TextField<F>(
    form: RwSignal<Form<F>>,
    field: F,
    #[prop(default = "text")] kind: &'static str,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView
where
    F: FormField + Send + Sync,
{
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{field.label()}</span>
            </label>
            <input
                type=kind
                placeholder=placeholder
                class=input_class(form, field, "input input-bordered")
                prop:value=move || form.with(|f| f.get(field).to_string())
                on:input=move |ev| form.update(|f| f.set(field, event_target_value(&ev)))
                on:blur=move |_| form.update(|f| f.touch(field))
            />
            {error_view(form, field)}
        </div>
    }
}

#[component]
pub fn TextArea<F>(form: RwSignal<Form<F>>, field: F, #[prop(default = 3)] rows: u32) -> impl IntoView
where
    F: FormField + Send + Sync,
{
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{field.label()}</span>
            </label>
            <textarea
                rows=rows
                class=input_class(form, field, "textarea textarea-bordered")
                prop:value=move || form.with(|f| f.get(field).to_string())
                on:input=move |ev| form.update(|f| f.set(field, event_target_value(&ev)))
                on:blur=move |_| form.update(|f| f.touch(field))
            ></textarea>
            {error_view(form, field)}
        </div>
    }
}

/// 下拉框；`options` 为 (值, 显示文本)，首项为空占位
#[component]
pub fn SelectField<F>(
    form: RwSignal<Form<F>>,
    field: F,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(optional)] placeholder: Option<&'static str>,
) -> impl IntoView
where
    F: FormField + Send + Sync,
{
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{field.label()}</span>
            </label>
            <select
                class=input_class(form, field, "select select-bordered")
                prop:value=move || form.with(|f| f.get(field).to_string())
                on:change=move |ev| {
                    form.update(|f| {
                        f.set(field, event_target_value(&ev));
                        f.touch(field);
                    })
                }
            >
                {placeholder.map(|text| view! { <option value="">{text}</option> })}
                {move || {
                    let selected = form.with(|f| f.get(field).to_string());
                    options
                        .get()
                        .into_iter()
                        .map(|(value, text)| {
                            let is_selected = value == selected;
                            view! { <option value=value selected=is_selected>{text}</option> }
                        })
                        .collect_view()
                }}
            </select>
            {error_view(form, field)}
        </div>
    }
}

/// 优先级下拉框的固定选项
pub fn priority_options() -> Vec<(String, String)> {
    ["yüksek", "orta", "düşük"]
        .iter()
        .map(|p| (p.to_string(), PriorityLevel::parse(p).display_text().to_string()))
        .collect()
}
