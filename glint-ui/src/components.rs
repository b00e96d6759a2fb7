//! Small building blocks shared by the pages.

use crate::api::ApiError;
use crate::toast::use_toasts;
use api_structs::log::SeverityCategory;
use api_structs::trace::StatusCode;
use api_structs::ui::formatters::format_duration_compact;
use api_structs::ui::pagination::{Pagination, PAGE_SIZES};
use api_structs::Attributes;
use leptos::logging::error;
use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["navigator", "clipboard"], js_name = writeText, catch)]
    fn clipboard_write_text(text: &str) -> Result<js_sys::Promise, JsValue>;
}

/// Renders the tri-state of a fetch: loading, failed with retry, or `content`.
pub fn fetched_view<T, V>(
    fetched: Option<Result<T, ApiError>>,
    on_retry: Callback<()>,
    content: impl FnOnce(T) -> V,
) -> View
where
    V: IntoView,
{
    match fetched {
        None => view! { <LoadingState/> }.into_view(),
        Some(Err(e)) => view! { <ErrorState error=e on_retry=on_retry/> }.into_view(),
        Some(Ok(data)) => content(data).into_view(),
    }
}

#[component]
pub fn LoadingState(#[prop(default = "Loading...")] message: &'static str) -> impl IntoView {
    view! {
        <div class="placeholder">
            <p>{message}</p>
        </div>
    }
}

#[component]
pub fn ErrorState(error: ApiError, #[prop(into)] on_retry: Callback<()>) -> impl IntoView {
    error!("{error}");
    view! {
        <div class="placeholder placeholder--error">
            <p>"Failed to load data"</p>
            <p class="placeholder__detail">{error.to_string()}</p>
            <button class="button" on:click=move |_| on_retry.call(())>"Retry"</button>
        </div>
    }
}

#[component]
pub fn EmptyState(message: &'static str) -> impl IntoView {
    view! {
        <div class="placeholder">
            <p>{message}</p>
        </div>
    }
}

#[component]
pub fn CopyButton(
    #[prop(into)] text: String,
    #[prop(default = "Copy")] label: &'static str,
) -> impl IntoView {
    let toasts = use_toasts();
    let on_click = move |_| {
        let text = text.clone();
        spawn_local(async move {
            let copied = match clipboard_write_text(&text) {
                Ok(promise) => JsFuture::from(promise).await.is_ok(),
                Err(_) => false,
            };
            if copied {
                toasts.success("Copied to clipboard");
            } else {
                toasts.error("Failed to copy to clipboard");
            }
        });
    };
    view! { <button class="button button--small" on:click=on_click>{label}</button> }
}

#[component]
pub fn StatusBadge(code: StatusCode) -> impl IntoView {
    let class = match code {
        StatusCode::Error => "badge badge--error",
        StatusCode::Ok => "badge badge--ok",
        StatusCode::Unset => "badge",
    };
    view! { <span class=class>{code.label()}</span> }
}

#[component]
pub fn SeverityBadge(category: SeverityCategory) -> impl IntoView {
    let class = match category {
        SeverityCategory::Error | SeverityCategory::Fatal => "badge badge--error",
        SeverityCategory::Warn => "badge badge--warn",
        SeverityCategory::Info => "badge badge--info",
        _ => "badge",
    };
    view! { <span class=class>{category.as_str()}</span> }
}

#[component]
pub fn DurationBadge(ms: f64) -> impl IntoView {
    let class = if ms >= 1000. {
        "badge badge--error"
    } else if ms >= 100. {
        "badge badge--warn"
    } else {
        "badge"
    };
    view! { <span class=class>{format_duration_compact(ms)}</span> }
}

#[component]
pub fn AttributesTable(attributes: Attributes) -> impl IntoView {
    if attributes.is_empty() {
        return view! { <p class="muted">"No attributes"</p> }.into_view();
    }
    let rows = attributes
        .iter()
        .map(|(key, value)| {
            view! {
                <tr>
                    <td class="attributes__key">{key.clone()}</td>
                    <td class="attributes__value">{value.to_string()}</td>
                    <td class="attributes__type">{value.type_name()}</td>
                </tr>
            }
        })
        .collect_view();
    view! { <table class="attributes">{rows}</table> }.into_view()
}

#[component]
pub fn PaginationControls(pagination: RwSignal<Pagination>) -> impl IntoView {
    let on_page_size = move |ev: ev::Event| {
        if let Ok(page_size) = event_target_value(&ev).parse::<usize>() {
            pagination.update(|p| *p = p.with_page_size(page_size));
        }
    };
    let page_size_options = PAGE_SIZES
        .into_iter()
        .map(|size| {
            view! {
                <option value=size.to_string() selected=move || pagination.get().page_size() == size>
                    {size.to_string()}
                </option>
            }
        })
        .collect_view();
    view! {
        <div class="pagination">
            <span>{move || pagination.get().range_label()}</span>
            <select on:change=on_page_size>{page_size_options}</select>
            <button
                disabled=move || !pagination.get().has_previous()
                on:click=move |_| pagination.update(|p| *p = p.go_to(1))
            >"First"</button>
            <button
                disabled=move || !pagination.get().has_previous()
                on:click=move |_| pagination.update(|p| *p = p.previous())
            >"Previous"</button>
            <span>
                {move || {
                    let p = pagination.get();
                    format!("Page {} of {}", p.page(), p.total_pages())
                }}
            </span>
            <button
                disabled=move || !pagination.get().has_next()
                on:click=move |_| pagination.update(|p| *p = p.next())
            >"Next"</button>
            <button
                disabled=move || !pagination.get().has_next()
                on:click=move |_| pagination.update(|p| *p = p.go_to(p.total_pages()))
            >"Last"</button>
        </div>
    }
}
