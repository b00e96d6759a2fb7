use crate::api::{self, ApiError};
use crate::components::{fetched_view, EmptyState};
use crate::dashboard::StatCard;
use crate::logs::{LogsList, LOGS_PAGE_LIMIT};
use crate::metrics::MetricsGrid;
use crate::refresh::use_auto_refresh;
use crate::trace::TracesTable;
use api_structs::ui::formatters::{format_duration, format_duration_compact};
use api_structs::ui::search_grid::TraceFilters;
use api_structs::ui::service::{ResponseTimeChart, ServiceStats};
use api_structs::{Log, LogFilters, Metric, MetricFilters, ServiceName, TraceInfo};
use leptos::*;
use leptos_router::*;

const SERVICE_TRACES_LIMIT: usize = 100;
const SERVICE_RECENT_ROWS: usize = 10;

#[component]
pub fn Services() -> impl IntoView {
    let services = create_local_resource(|| (), |_| api::get_services());
    use_auto_refresh(move || services.refetch());
    let on_retry = Callback::new(move |_| services.refetch());
    let content = |services: Vec<ServiceName>| {
        if services.is_empty() {
            return view! { <EmptyState message="No services reporting yet"/> }.into_view();
        }
        let cards = services
            .into_iter()
            .map(|service| {
                let href = format!("/services/{service}");
                view! {
                    <A class="card card--link" href=href>
                        <h3>{service}</h3>
                    </A>
                }
            })
            .collect_view();
        view! { <div class="card-grid">{cards}</div> }.into_view()
    };
    view! {
        <div class="main">
            <h2>"Services"</h2>
            {move || fetched_view(services.get(), on_retry, content)}
        </div>
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ServiceOverview {
    stats: ServiceStats,
    traces: Vec<TraceInfo>,
    logs: Vec<Log>,
    metrics: Vec<Metric>,
}

async fn get_service_overview(service: ServiceName) -> Result<ServiceOverview, ApiError> {
    let traces = api::get_traces(TraceFilters {
        service: Some(service.clone()),
        limit: Some(SERVICE_TRACES_LIMIT),
        ..TraceFilters::default()
    })
    .await?;
    let logs = api::get_logs(LogFilters {
        service: Some(service.clone()),
        level: None,
        limit: Some(LOGS_PAGE_LIMIT),
    })
    .await?;
    let metrics = api::get_metrics(MetricFilters {
        service: Some(service),
        limit: None,
    })
    .await?;
    Ok(ServiceOverview {
        stats: ServiceStats::from_data(&traces.traces, &logs, metrics.len()),
        traces: traces.traces,
        logs,
        metrics,
    })
}

#[component]
pub fn ServiceDetails() -> impl IntoView {
    let params = use_params_map();
    let service = move || params.with(|p| p.get("service_name").cloned().unwrap_or_default());
    let overview = create_local_resource(service, get_service_overview);
    use_auto_refresh(move || overview.refetch());
    let on_retry = Callback::new(move |_| overview.refetch());
    view! {
        <div class="main">
            <A href="/services">"← Back to services"</A>
            <h2>{service}</h2>
            {move || fetched_view(overview.get(), on_retry, |overview| view! { <ServiceOverviewView overview=overview/> })}
        </div>
    }
}

#[component]
fn ServiceOverviewView(overview: ServiceOverview) -> impl IntoView {
    let ServiceOverview {
        stats,
        traces,
        logs,
        metrics,
    } = overview;
    let chart = ResponseTimeChart::from_traces(&traces);
    let recent_traces: Vec<TraceInfo> = traces.into_iter().take(SERVICE_RECENT_ROWS).collect();
    let error_logs: Vec<Log> = ServiceStats::error_logs(&logs)
        .take(SERVICE_RECENT_ROWS)
        .cloned()
        .collect();
    view! {
        <div class="stat-grid">
            <StatCard title="Traces" value=stats.total_traces.to_string()/>
            <StatCard
                title="Error Rate"
                value=format!("{:.1}%", stats.error_rate_percent)
                error={stats.error_rate_percent > 0.}
            />
            <StatCard title="Avg Duration" value=format_duration(stats.avg_duration_ms)/>
            <StatCard title="P95 Duration" value=format_duration(stats.p95_duration_ms)/>
            <StatCard title="Logs" value=stats.total_logs.to_string()/>
            <StatCard title="Error Logs" value=stats.error_logs.to_string() error={stats.error_logs > 0}/>
            <StatCard title="Metrics" value=stats.total_metrics.to_string()/>
        </div>
        <ServiceChart chart=chart/>
        <h3>"Recent Traces"</h3>
        <TracesTable traces=recent_traces/>
        <h3>"Recent Errors"</h3>
        <LogsList logs=error_logs/>
        <h3>"Metrics"</h3>
        <MetricsGrid metrics=metrics/>
    }
}

#[component]
fn ServiceChart(chart: ResponseTimeChart) -> impl IntoView {
    if chart.is_empty() {
        return view! {
            <div class="card">
                <h3>"Response Time"</h3>
                <p class="muted">"No data available"</p>
            </div>
        }
        .into_view();
    }
    let drawn = chart.bars.len();
    let bars = chart
        .bars
        .into_iter()
        .map(|bar| {
            let class = if bar.has_errors {
                "chart__bar chart__bar--error"
            } else {
                "chart__bar"
            };
            let href = format!("/traces/{}", bar.trace_id);
            view! {
                <A class="chart__column" href=href>
                    <div
                        class=class
                        style=format!("height: {:.1}%", bar.height_percent)
                        title=format_duration_compact(bar.duration_ms)
                    ></div>
                </A>
            }
        })
        .collect_view();
    view! {
        <div class="card">
            <div class="card__header">
                <h3>"Response Time"</h3>
                <span class="muted">
                    {format!(
                        "Avg: {} Max: {}",
                        format_duration_compact(chart.avg_duration_ms),
                        format_duration_compact(chart.max_duration_ms),
                    )}
                </span>
            </div>
            <div class="chart">{bars}</div>
            <p class="muted">{format!("Last {drawn} traces")}</p>
        </div>
    }
    .into_view()
}
