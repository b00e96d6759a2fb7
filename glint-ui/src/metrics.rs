use crate::api;
use crate::components::{fetched_view, EmptyState};
use crate::datetime::printable_time_ago;
use crate::refresh::use_auto_refresh;
use api_structs::ui::formatters::pluralize;
use api_structs::{Metric, MetricFilters};
use leptos::*;

#[component]
fn MetricCard(metric: Metric) -> impl IntoView {
    let latest = metric
        .display_latest_value()
        .unwrap_or_else(|| "No data".to_string());
    let updated = metric
        .latest_data_point()
        .map(|point| printable_time_ago(point.time_unix_nano))
        .unwrap_or_default();
    let points = pluralize(metric.data_points.len(), "data point", "data points");
    view! {
        <div class="card">
            <div class="card__header">
                <h3>{metric.name.clone()}</h3>
                <span class="badge">{format!("{:?}", metric.metric_type)}</span>
            </div>
            <p class="muted">{metric.description.clone().unwrap_or_default()}</p>
            <p class="card__value">{latest}</p>
            <p class="muted">{format!("{points}, updated {updated}")}</p>
            <p class="muted">{metric.service_name.clone().unwrap_or_default()}</p>
        </div>
    }
}

#[component]
pub fn MetricsGrid(metrics: Vec<Metric>) -> impl IntoView {
    if metrics.is_empty() {
        return view! { <EmptyState message="No metrics found"/> }.into_view();
    }
    let cards = metrics
        .into_iter()
        .map(|metric| view! { <MetricCard metric=metric/> })
        .collect_view();
    view! { <div class="card-grid">{cards}</div> }.into_view()
}

#[component]
pub fn Metrics() -> impl IntoView {
    let filters = create_rw_signal(MetricFilters::default());
    let services = create_local_resource(|| (), |_| api::get_services());
    let metrics = create_local_resource(move || filters.get(), api::get_metrics);
    use_auto_refresh(move || metrics.refetch());
    let on_service = move |ev: ev::Event| {
        let service = event_target_value(&ev);
        filters.update(|f| f.service = Some(service).filter(|s| !s.is_empty()));
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
    let on_retry = Callback::new(move |_| metrics.refetch());
    view! {
        <div class="main">
            <div class="page-header">
                <h2>"Metrics"</h2>
                <button class="button" on:click=move |_| metrics.refetch()>"Refresh"</button>
            </div>
            <div class="search-panel">
                <label class="search-panel__label">
                    "Service"
                    <select class="search-panel__input" on:change=on_service>
                        <option value="">"All services"</option>
                        {service_options}
                    </select>
                </label>
            </div>
            {move || fetched_view(metrics.get(), on_retry, |metrics| view! { <MetricsGrid metrics=metrics/> })}
        </div>
    }
}
