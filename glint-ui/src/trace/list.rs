use crate::api;
use crate::components::{fetched_view, DurationBadge, EmptyState, PaginationControls};
use crate::datetime::printable_time_ago;
use crate::refresh::use_auto_refresh;
use api_structs::ui::formatters::short_id;
use api_structs::ui::pagination::Pagination;
use api_structs::ui::search_grid::TraceFilters;
use api_structs::TraceInfo;
use leptos::logging::log;
use leptos::*;
use leptos_router::*;

#[component]
pub fn TracesTable(traces: Vec<TraceInfo>) -> impl IntoView {
    if traces.is_empty() {
        return view! { <EmptyState message="No traces found"/> }.into_view();
    }
    let rows = traces
        .into_iter()
        .map(|trace| {
            let href = format!("/traces/{}", trace.trace_id);
            let status = if trace.has_errors {
                view! { <span class="badge badge--error">"Error"</span> }
            } else {
                view! { <span class="badge badge--ok">"OK"</span> }
            };
            view! {
                <tr class="trace-table__row">
                    <td class="trace-table__cell">
                        <A href=href>{short_id(&trace.trace_id, 16).to_string()}</A>
                    </td>
                    <td class="trace-table__cell">{trace.root_span_name.unwrap_or_default()}</td>
                    <td class="trace-table__cell">{trace.service_name.unwrap_or_default()}</td>
                    <td class="trace-table__cell">{trace.span_count}</td>
                    <td class="trace-table__cell"><DurationBadge ms=trace.duration_ms/></td>
                    <td class="trace-table__cell">{status}</td>
                    <td class="trace-table__cell">{trace.start_time.map(printable_time_ago).unwrap_or_default()}</td>
                </tr>
            }
        })
        .collect_view();
    view! {
        <table class="trace-table">
            <tr class="trace-table__row">
                <th class="trace-table__cell">"Trace ID"</th>
                <th class="trace-table__cell">"Root Span"</th>
                <th class="trace-table__cell">"Service"</th>
                <th class="trace-table__cell">"Spans"</th>
                <th class="trace-table__cell">"Duration"</th>
                <th class="trace-table__cell">"Status"</th>
                <th class="trace-table__cell">"Started"</th>
            </tr>
            {rows}
        </table>
    }
    .into_view()
}

#[component]
pub fn TraceList() -> impl IntoView {
    let filters = create_rw_signal(TraceFilters::default());
    let pagination = create_rw_signal(Pagination::default());
    let services = create_local_resource(|| (), |_| api::get_services());
    let query = move || {
        let mut query = filters.get();
        let page = pagination.with(|p| (p.page_size(), p.offset()));
        query.limit = Some(page.0);
        query.offset = Some(page.1);
        query
    };
    let traces = create_local_resource(query, api::get_traces);
    use_auto_refresh(move || traces.refetch());
    create_effect(move |_| {
        if let Some(Ok(resp)) = traces.get() {
            let total = resp.total;
            if pagination.with_untracked(|p| p.total_items() != total) {
                pagination.update(|p| *p = p.with_total_items(total));
            }
        }
    });

    let reset_page = move || pagination.update(|p| *p = p.go_to(1));
    let on_service = move |ev: ev::Event| {
        let service = event_target_value(&ev);
        log!("Service filter changed to: {service}");
        filters.update(|f| f.service = Some(service).filter(|s| !s.is_empty()));
        reset_page();
    };
    let on_min_duration = move |ev: ev::Event| {
        let min_duration = TraceFilters::parse_duration_input(&event_target_value(&ev));
        filters.update(|f| f.min_duration = min_duration);
        reset_page();
    };
    let on_max_duration = move |ev: ev::Event| {
        let max_duration = TraceFilters::parse_duration_input(&event_target_value(&ev));
        filters.update(|f| f.max_duration = max_duration);
        reset_page();
    };
    let service_options = move || {
        let names = services
            .get()
            .and_then(Result::ok)
            .unwrap_or_default();
        names
            .into_iter()
            .map(|name| view! { <option value=name.clone()>{name}</option> })
            .collect_view()
    };
    let on_retry = Callback::new(move |_| traces.refetch());
    let on_refresh = move |_| traces.refetch();
    view! {
        <div class="main">
            <div class="page-header">
                <h2>"Traces"</h2>
                <button class="button" on:click=on_refresh>"Refresh"</button>
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
                    "Min duration (ms)"
                    <input class="search-panel__input" type="number" min="0" on:change=on_min_duration/>
                </label>
                <label class="search-panel__label">
                    "Max duration (ms)"
                    <input class="search-panel__input" type="number" min="0" on:change=on_max_duration/>
                </label>
            </div>
            {move || fetched_view(traces.get(), on_retry, |resp| view! { <TracesTable traces=resp.traces/> })}
            <PaginationControls pagination=pagination/>
        </div>
    }
}
