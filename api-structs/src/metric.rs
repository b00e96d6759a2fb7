use crate::attributes::Attributes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricType {
    #[serde(alias = "GAUGE")]
    Gauge,
    #[serde(alias = "SUM")]
    Sum,
    #[serde(alias = "HISTOGRAM")]
    Histogram,
    #[serde(alias = "SUMMARY")]
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AggregationTemporality {
    #[default]
    #[serde(alias = "UNSPECIFIED")]
    Unspecified,
    #[serde(alias = "DELTA")]
    Delta,
    #[serde(alias = "CUMULATIVE")]
    Cumulative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDataPoint {
    pub time_unix_nano: i64,
    #[serde(default)]
    pub start_time_unix_nano: Option<i64>,
    pub value: f64,
    #[serde(default)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    pub metric_type: MetricType,
    #[serde(default)]
    pub temporality: AggregationTemporality,
    #[serde(default)]
    pub data_points: Vec<MetricDataPoint>,
    #[serde(default)]
    pub service_name: Option<String>,
}

impl Metric {
    pub fn latest_data_point(&self) -> Option<&MetricDataPoint> {
        self.data_points.iter().max_by_key(|p| p.time_unix_nano)
    }

    /// Latest value with its unit, e.g. `12.50 ms`.
    pub fn display_latest_value(&self) -> Option<String> {
        let point = self.latest_data_point()?;
        let value = format!("{:.2}", point.value);
        Some(match self.unit.as_deref().filter(|u| !u.is_empty()) {
            Some(unit) => format!("{value} {unit}"),
            None => value,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricFilters {
    pub service: Option<String>,
    pub limit: Option<usize>,
}

impl MetricFilters {
    pub fn to_query_parameters(&self) -> Vec<(&'static str, String)> {
        let mut parameters = Vec::with_capacity(2);
        if let Some(service) = self.service.as_ref().filter(|s| !s.is_empty()) {
            parameters.push(("service", service.clone()));
        }
        if let Some(limit) = self.limit {
            parameters.push(("limit", limit.to_string()));
        }
        parameters
    }
}
