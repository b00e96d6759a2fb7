pub mod attributes;
pub mod log;
pub mod metric;
pub mod time_conversion;
pub mod trace;
pub mod ui;
pub mod waterfall;

pub use attributes::{AttributeValue, Attributes};
pub use log::{Log, LogFilters, SeverityCategory, SeverityLevel};
pub use metric::{AggregationTemporality, Metric, MetricDataPoint, MetricFilters, MetricType};
pub use trace::{Span, SpanKind, Status, StatusCode, Trace, TraceInfo, TraceListResponse};

pub type ServiceName = String;

#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct ServicesResponse {
    pub services: Vec<ServiceName>,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct MetricsResponse {
    pub metrics: Vec<Metric>,
}
