use super::span_tree::SpanTreeList;
use super::waterfall::SpanWaterfall;
use crate::api;
use crate::components::{fetched_view, CopyButton};
use api_structs::ui::formatters::{format_duration, pluralize};
use api_structs::Trace;
use leptos::*;
use leptos_router::*;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TraceTab {
    Waterfall,
    Tree,
}

#[component]
pub fn TraceDetailsPage() -> impl IntoView {
    let params = use_params_map();
    let trace_id = move || params.with(|p| p.get("trace_id").cloned().unwrap_or_default());
    let trace = create_local_resource(trace_id, api::get_trace);
    let on_retry = Callback::new(move |_| trace.refetch());
    view! {
        <div class="main">
            <A href="/traces">"← Back to traces"</A>
            {move || fetched_view(trace.get(), on_retry, |trace| view! { <TraceDetails trace=trace/> })}
        </div>
    }
}

#[component]
fn TraceDetails(trace: Trace) -> impl IntoView {
    let (tab_r, tab_w) = create_signal(TraceTab::Waterfall);
    let service = trace
        .display_service_name()
        .map(|service| {
            let href = format!("/services/{service}");
            let service = service.to_string();
            view! {
                <div>
                    <span class="muted">"Service: "</span>
                    <A href=href>{service.clone()}</A>
                </div>
            }
        });
    let error_badge = trace
        .has_errors()
        .then(|| view! { <span class="badge badge--error">"Has errors"</span> });
    let summary = format!(
        "{}, {}",
        pluralize(trace.spans.len(), "span", "spans"),
        format_duration(trace.duration_ms())
    );
    let trace_id = trace.trace_id.clone();
    let spans = Rc::new(trace.spans);
    let content = move || match tab_r.get() {
        TraceTab::Waterfall => view! { <SpanWaterfall spans=Rc::clone(&spans)/> }.into_view(),
        TraceTab::Tree => view! { <SpanTreeList spans=Rc::clone(&spans)/> }.into_view(),
    };
    let tab_class = move |tab: TraceTab| {
        if tab_r.get() == tab {
            "tabs__tab tabs__tab--active"
        } else {
            "tabs__tab"
        }
    };
    view! {
        <section class="trace-details">
            <h2>"Trace Details"</h2>
            <div class="trace-details__header">
                <div>
                    <span class="muted">"ID: "</span>
                    <span class="detail__id">{trace_id.clone()}</span>
                    <CopyButton text=trace_id label="Copy ID"/>
                </div>
                {service}
                <div>
                    <span class="muted">{summary}</span>
                    {error_badge}
                </div>
            </div>
            <div class="tabs">
                <button class=move || tab_class(TraceTab::Waterfall) on:click=move |_| tab_w.set(TraceTab::Waterfall)>
                    "Waterfall"
                </button>
                <button class=move || tab_class(TraceTab::Tree) on:click=move |_| tab_w.set(TraceTab::Tree)>
                    "Tree"
                </button>
            </div>
            {content}
        </section>
    }
}
