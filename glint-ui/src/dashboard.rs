use crate::api::{self, ApiError};
use crate::components::fetched_view;
use crate::refresh::use_auto_refresh;
use crate::trace::TracesTable;
use api_structs::ui::formatters::format_duration;
use api_structs::ui::search_grid::TraceFilters;
use api_structs::ui::service::{DashboardStats, DASHBOARD_RECENT_TRACES};
use api_structs::TraceInfo;
use leptos::*;
use leptos_router::*;

#[component]
pub fn StatCard(
    title: &'static str,
    #[prop(into)] value: String,
    #[prop(optional)] error: bool,
) -> impl IntoView {
    let value_class = if error {
        "stat-card__value stat-card__value--error"
    } else {
        "stat-card__value"
    };
    view! {
        <div class="stat-card">
            <p class="stat-card__title">{title}</p>
            <p class=value_class>{value}</p>
        </div>
    }
}

#[derive(Debug, Clone, PartialEq)]
struct DashboardData {
    stats: DashboardStats,
    recent: Vec<TraceInfo>,
}

async fn get_dashboard_data() -> Result<DashboardData, ApiError> {
    let services = api::get_services().await?;
    let traces = api::get_traces(TraceFilters {
        limit: Some(DASHBOARD_RECENT_TRACES),
        ..TraceFilters::default()
    })
    .await?;
    Ok(DashboardData {
        stats: DashboardStats::from_data(services.len(), &traces.traces, traces.total),
        recent: traces.traces,
    })
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let data = create_local_resource(|| (), |_| get_dashboard_data());
    use_auto_refresh(move || data.refetch());
    let on_retry = Callback::new(move |_| data.refetch());
    let content = |data: DashboardData| {
        let stats = data.stats;
        view! {
            <div class="stat-grid">
                <StatCard title="Services" value=stats.service_count.to_string()/>
                <StatCard title="Total Traces" value=stats.total_traces.to_string()/>
                <StatCard
                    title="Error Rate"
                    value=format!("{:.1}%", stats.error_rate_percent)
                    error={stats.error_rate_percent > 0.}
                />
                <StatCard title="Avg Duration" value=format_duration(stats.avg_duration_ms)/>
            </div>
            <div class="page-header">
                <h3>"Recent Traces"</h3>
                <A href="/traces">"View all"</A>
            </div>
            <TracesTable traces=data.recent/>
        }
    };
    view! {
        <div class="main">
            <h2>"Dashboard"</h2>
            {move || fetched_view(data.get(), on_retry, content)}
        </div>
    }
}
