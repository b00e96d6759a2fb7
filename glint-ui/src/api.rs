use crate::API_SERVER_URL_NO_TRAILING_SLASH;
use api_structs::trace::TraceValidationError;
use api_structs::ui::search_grid::TraceFilters;
use api_structs::{
    Log, LogFilters, Metric, MetricFilters, MetricsResponse, ServiceName, ServicesResponse, Trace,
    TraceListResponse,
};
use leptos::logging::{log, warn};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Could not reach {url}: {message}")]
    Network { url: String, message: String },
    #[error("{url} answered {status} {status_text}")]
    Status {
        url: String,
        status: u16,
        status_text: String,
    },
    #[error("Unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
    #[error("Trace can't be displayed: {0}")]
    InvalidTrace(#[from] TraceValidationError),
}

async fn get_json<T: DeserializeOwned>(
    path: &str,
    query: Vec<(&'static str, String)>,
) -> Result<T, ApiError> {
    let url = format!("{API_SERVER_URL_NO_TRAILING_SLASH}{path}");
    log!("Sending req to {url} {query:?}");
    let resp = gloo_net::http::Request::get(&url)
        .query(query)
        .send()
        .await
        .map_err(|e| ApiError::Network {
            url: url.clone(),
            message: e.to_string(),
        })?;
    if !resp.ok() {
        warn!("{url} returned {}", resp.status());
        return Err(ApiError::Status {
            url,
            status: resp.status(),
            status_text: resp.status_text(),
        });
    }
    resp.json::<T>().await.map_err(|e| ApiError::Decode {
        url,
        message: e.to_string(),
    })
}

pub async fn get_traces(filters: TraceFilters) -> Result<TraceListResponse, ApiError> {
    get_json("/traces", filters.to_query_parameters()).await
}

pub async fn get_trace(trace_id: String) -> Result<Trace, ApiError> {
    let trace: Trace = get_json(&format!("/traces/{trace_id}"), vec![]).await?;
    trace.validate()?;
    log!("Got trace {} with {} spans", trace.trace_id, trace.spans.len());
    Ok(trace)
}

pub async fn get_logs(filters: LogFilters) -> Result<Vec<Log>, ApiError> {
    get_json("/logs", filters.to_query_parameters()).await
}

pub async fn get_metrics(filters: MetricFilters) -> Result<Vec<Metric>, ApiError> {
    let resp: MetricsResponse = get_json("/metrics", filters.to_query_parameters()).await?;
    Ok(resp.metrics)
}

pub async fn get_services() -> Result<Vec<ServiceName>, ApiError> {
    let mut resp: ServicesResponse = get_json("/services", vec![]).await?;
    resp.services.sort();
    Ok(resp.services)
}
