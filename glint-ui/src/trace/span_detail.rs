use crate::components::{AttributesTable, CopyButton, StatusBadge};
use crate::datetime::printable_local_date_time;
use api_structs::ui::formatters::format_nano_duration;
use api_structs::Span;
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailTab {
    Attributes,
    Json,
}

#[component]
fn IdField(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="detail__field">
            <div class="detail__field-header">
                <h4>{label}</h4>
                <CopyButton text=value.clone()/>
            </div>
            <p class="detail__id">{value}</p>
        </div>
    }
}

/// Side panel describing one span.
#[component]
pub fn SpanDetailPanel(span: Span, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let (tab_r, tab_w) = create_signal(DetailTab::Attributes);
    let json_tab = {
        let span = span.clone();
        move || -> Result<View, serde_json::Error> {
            let json = serde_json::to_string_pretty(&span)?;
            Ok(view! {
                <div class="detail__json">
                    <CopyButton text=json.clone() label="Copy JSON"/>
                    <pre>{json}</pre>
                </div>
            }
            .into_view())
        }
    };
    let attributes = span.attributes.clone();
    let attribute_count = attributes.len();
    let tab_content = move || match tab_r.get() {
        DetailTab::Attributes => view! { <AttributesTable attributes=attributes.clone()/> }.into_view(),
        DetailTab::Json => json_tab.clone().into_view(),
    };
    let tab_class = move |tab: DetailTab| {
        if tab_r.get() == tab {
            "tabs__tab tabs__tab--active"
        } else {
            "tabs__tab"
        }
    };
    let parent = span
        .parent_id()
        .map(|parent_id| view! { <IdField label="Parent Span ID" value=parent_id.to_string()/> });
    let service = span.service_name.clone().map(|service| {
        view! {
            <div class="detail__field">
                <h4>"Service"</h4>
                <p>{service}</p>
            </div>
        }
    });
    let status_message = span.status.message.clone().map(|message| {
        view! {
            <div class="detail__field">
                <h4>"Status Message"</h4>
                <p class="detail__error">{message}</p>
            </div>
        }
    });
    view! {
        <aside class="detail">
            <div class="detail__header">
                <h3>"Span Details"</h3>
                <button class="button button--link" on:click=move |_| on_close.call(())>"Close"</button>
            </div>
            <div class="detail__field">
                <h4>"Name"</h4>
                <p>{span.name.clone()}</p>
            </div>
            <div class="detail__grid">
                <div class="detail__field">
                    <h4>"Kind"</h4>
                    <p>{span.kind.label()}</p>
                </div>
                <div class="detail__field">
                    <h4>"Status"</h4>
                    <StatusBadge code=span.status.code/>
                </div>
            </div>
            <div class="detail__field">
                <h4>"Duration"</h4>
                <p>{format_nano_duration(span.start_time_unix_nano, span.end_time_unix_nano)}</p>
            </div>
            <IdField label="Span ID" value=span.span_id.clone()/>
            <IdField label="Trace ID" value=span.trace_id.clone()/>
            {parent}
            {service}
            <div class="detail__grid">
                <div class="detail__field">
                    <h4>"Start Time"</h4>
                    <p>{printable_local_date_time(span.start_time_unix_nano)}</p>
                </div>
                <div class="detail__field">
                    <h4>"End Time"</h4>
                    <p>{printable_local_date_time(span.end_time_unix_nano)}</p>
                </div>
            </div>
            {status_message}
            <div class="tabs">
                <button class=move || tab_class(DetailTab::Attributes) on:click=move |_| tab_w.set(DetailTab::Attributes)>
                    {format!("Attributes ({attribute_count})")}
                </button>
                <button class=move || tab_class(DetailTab::Json) on:click=move |_| tab_w.set(DetailTab::Json)>
                    "JSON"
                </button>
            </div>
            {tab_content}
        </aside>
    }
}
