use crate::error::CliError;
use api_structs::ui::search_grid::TraceFilters;
use api_structs::{
    Log, LogFilters, Metric, MetricFilters, MetricsResponse, ServiceName, ServicesResponse, Trace,
    TraceListResponse,
};
use backtraced_error::{ReqwestError, SerdeJsonError};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, CliError> {
        let client = reqwest::ClientBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ReqwestError::from_reqwest_error(e, "building reqwest client"))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, CliError> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ReqwestError::from_reqwest_error(e, format!("sending GET {url}")))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ReqwestError::from_reqwest_error(e, format!("reading body of {url}")))?;
        debug!(status = status.as_u16(), bytes = body.len(), "response");
        if !status.is_success() {
            return Err(CliError::status(url, status.as_u16(), &body));
        }
        let parsed = serde_json::from_str(&body).map_err(|e| {
            SerdeJsonError::from_serde_json_error(e, format!("parsing response of {url}"), &body)
        })?;
        Ok(parsed)
    }

    pub async fn traces(&self, filters: &TraceFilters) -> Result<TraceListResponse, CliError> {
        self.get_json("/traces", &filters.to_query_parameters())
            .await
    }

    /// Fetches a trace and rejects it when the waterfall can't draw it unambiguously.
    pub async fn trace(&self, trace_id: &str) -> Result<Trace, CliError> {
        let trace: Trace = self.get_json(&format!("/traces/{trace_id}"), &[]).await?;
        trace.validate().map_err(|source| CliError::InvalidTrace {
            trace_id: trace_id.to_string(),
            source,
        })?;
        Ok(trace)
    }

    pub async fn logs(&self, filters: &LogFilters) -> Result<Vec<Log>, CliError> {
        self.get_json("/logs", &filters.to_query_parameters()).await
    }

    pub async fn metrics(&self, filters: &MetricFilters) -> Result<Vec<Metric>, CliError> {
        let resp: MetricsResponse = self
            .get_json("/metrics", &filters.to_query_parameters())
            .await?;
        Ok(resp.metrics)
    }

    /// Service names, sorted.
    pub async fn services(&self) -> Result<Vec<ServiceName>, CliError> {
        let resp: ServicesResponse = self.get_json("/services", &[]).await?;
        let mut services = resp.services;
        services.sort();
        Ok(services)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let client = ApiClient::new("http://localhost:7070/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:7070/api");
    }
}
