use crate::api;
use crate::components::{fetched_view, AttributesTable, EmptyState, SeverityBadge};
use crate::datetime::printable_local_date_time;
use crate::refresh::use_auto_refresh;
use api_structs::log::SeverityCategory;
use api_structs::{Log, LogFilters};
use leptos::logging::log;
use leptos::*;
use leptos_router::*;

pub const LOGS_PAGE_LIMIT: usize = 100;

#[component]
pub fn LogEntry(log: Log) -> impl IntoView {
    let (expanded_r, expanded_w) = create_signal(false);
    let category = log.severity_level.category();
    let trace_link = log.trace_id.clone().map(|trace_id| {
        let href = format!("/traces/{trace_id}");
        view! { <A class="log-entry__trace" href=href>"View trace"</A> }
    });
    let attributes = log.attributes.clone();
    let has_attributes = !attributes.is_empty();
    let details = move || {
        (expanded_r.get() && has_attributes)
            .then(|| view! { <AttributesTable attributes=attributes.clone()/> })
    };
    view! {
        <div class="log-entry" on:click=move |_| expanded_w.update(|e| *e = !*e)>
            <span class="log-entry__time">{printable_local_date_time(log.time_unix_nano)}</span>
            <SeverityBadge category=category/>
            <span class="log-entry__service">{log.service_name.clone().unwrap_or_default()}</span>
            <span class="log-entry__body">{log.body.clone()}</span>
            {trace_link}
            {details}
        </div>
    }
}

#[component]
pub fn LogsList(logs: Vec<Log>) -> impl IntoView {
    if logs.is_empty() {
        return view! { <EmptyState message="No logs found"/> }.into_view();
    }
    logs.into_iter()
        .map(|log| view! { <LogEntry log=log/> })
        .collect_view()
}

#[component]
pub fn Logs() -> impl IntoView {
    let filters = create_rw_signal(LogFilters {
        limit: Some(LOGS_PAGE_LIMIT),
        ..LogFilters::default()
    });
    let services = create_local_resource(|| (), |_| api::get_services());
    let logs = create_local_resource(move || filters.get(), api::get_logs);
    use_auto_refresh(move || logs.refetch());
    let on_service = move |ev: ev::Event| {
        let service = event_target_value(&ev);
        log!("Log service filter changed to: {service}");
        filters.update(|f| f.service = Some(service).filter(|s| !s.is_empty()));
    };
    let on_level = move |ev: ev::Event| {
        let level = event_target_value(&ev).parse::<SeverityCategory>().ok();
        filters.update(|f| f.level = level);
    };
    let service_options = move || {
        services
            .get()
            .and_then(Result::ok)
            .unwrap_or_default()
            .into_iter()
            .map(|name| view! { <option value=name.clone()>{name}</option> })
            .collect_view()
    };
    let level_options = SeverityCategory::SELECTABLE
        .into_iter()
        .map(|level| view! { <option value=level.as_str()>{level.as_str()}</option> })
        .collect_view();
    let on_retry = Callback::new(move |_| logs.refetch());
    view! {
        <div class="main">
            <div class="page-header">
                <h2>"Logs"</h2>
                <button class="button" on:click=move |_| logs.refetch()>"Refresh"</button>
            </div>
            <div class="search-panel">
                <label class="search-panel__label">
                    "Service"
                    <select class="search-panel__input" on:change=on_service>
                        <option value="">"All services"</option>
                        {service_options}
                    </select>
                </label>
                <label class="search-panel__label">
                    "Level"
                    <select class="search-panel__input" on:change=on_level>
                        <option value="">"All levels"</option>
                        {level_options}
                    </select>
                </label>
            </div>
            {move || fetched_view(logs.get(), on_retry, |logs| view! { <LogsList logs=logs/> })}
        </div>
    }
}
