use crate::log::Log;
use crate::trace::TraceInfo;
use serde::{Deserialize, Serialize};

/// Number of recent traces the dashboard summarizes.
pub const DASHBOARD_RECENT_TRACES: usize = 10;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceStats {
    pub total_traces: usize,
    pub error_traces: usize,
    pub error_rate_percent: f64,
    pub avg_duration_ms: f64,
    pub p95_duration_ms: f64,
    pub total_logs: usize,
    pub error_logs: usize,
    pub total_metrics: usize,
}

impl ServiceStats {
    pub fn from_data(traces: &[TraceInfo], logs: &[Log], metric_count: usize) -> Self {
        let error_traces = traces.iter().filter(|t| t.has_errors).count();
        let mut durations: Vec<f64> = traces.iter().map(|t| t.duration_ms).collect();
        durations.sort_by(f64::total_cmp);
        Self {
            total_traces: traces.len(),
            error_traces,
            error_rate_percent: percentage(error_traces, traces.len()),
            avg_duration_ms: mean(&durations),
            p95_duration_ms: percentile(&durations, 95.),
            total_logs: logs.len(),
            error_logs: logs
                .iter()
                .filter(|log| log.severity_level.category().is_error())
                .count(),
            total_metrics: metric_count,
        }
    }

    pub fn error_logs(logs: &[Log]) -> impl Iterator<Item = &Log> {
        logs.iter()
            .filter(|log| log.severity_level.category().is_error())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub service_count: usize,
    pub total_traces: usize,
    pub error_rate_percent: f64,
    pub avg_duration_ms: f64,
}

impl DashboardStats {
    /// `recent` is the first page of the trace list, `total_traces` its reported total.
    pub fn from_data(service_count: usize, recent: &[TraceInfo], total_traces: usize) -> Self {
        let recent = &recent[..recent.len().min(DASHBOARD_RECENT_TRACES)];
        let errors = recent.iter().filter(|t| t.has_errors).count();
        let durations: Vec<f64> = recent.iter().map(|t| t.duration_ms).collect();
        Self {
            service_count,
            total_traces,
            error_rate_percent: percentage(errors, recent.len()),
            avg_duration_ms: mean(&durations),
        }
    }
}

/// Traces drawn by the response time chart of a service.
pub const CHART_RECENT_TRACES: usize = 20;
/// Lowest bar, so the fastest trace is still visible.
pub const CHART_MIN_BAR_HEIGHT_PERCENT: f64 = 5.;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBar {
    pub trace_id: String,
    pub duration_ms: f64,
    pub has_errors: bool,
    pub height_percent: f64,
}

/// Response times of the latest traces, oldest bar first. Heights are
/// normalized between the fastest and the slowest drawn trace.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponseTimeChart {
    pub bars: Vec<ChartBar>,
    pub avg_duration_ms: f64,
    pub max_duration_ms: f64,
}

impl ResponseTimeChart {
    pub fn from_traces(traces: &[TraceInfo]) -> Self {
        let durations: Vec<f64> = traces
            .iter()
            .map(|t| t.duration_ms)
            .filter(|d| d.is_finite())
            .collect();
        let mut timed: Vec<(i64, &TraceInfo)> = traces
            .iter()
            .filter(|t| t.duration_ms.is_finite())
            .filter_map(|t| t.start_time.filter(|start| *start > 0).map(|start| (start, t)))
            .collect();
        timed.sort_by_key(|(start, _)| *start);
        let recent = &timed[timed.len().saturating_sub(CHART_RECENT_TRACES)..];

        let min = recent.iter().map(|(_, t)| t.duration_ms).fold(f64::INFINITY, f64::min);
        let max = recent.iter().map(|(_, t)| t.duration_ms).fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        let bars = recent
            .iter()
            .map(|(_, trace)| {
                let height = if range > 0. {
                    (trace.duration_ms - min) / range * 100.
                } else {
                    100.
                };
                ChartBar {
                    trace_id: trace.trace_id.clone(),
                    duration_ms: trace.duration_ms,
                    has_errors: trace.has_errors,
                    height_percent: height.max(CHART_MIN_BAR_HEIGHT_PERCENT),
                }
            })
            .collect();
        Self {
            bars,
            avg_duration_ms: mean(&durations),
            max_duration_ms: durations.iter().copied().fold(0., f64::max),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.;
    }
    part as f64 / whole as f64 * 100.
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Nearest-rank percentile of an ascending slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.;
    }
    let rank = (p / 100. * sorted.len() as f64).ceil() as usize;
    sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::attributes::Attributes;
    use crate::log::SeverityLevel;

    fn trace(id: usize, duration_ms: f64, has_errors: bool) -> TraceInfo {
        TraceInfo {
            trace_id: format!("t{id}"),
            service_name: Some("checkout".to_string()),
            duration_ms,
            span_count: 3,
            has_errors,
            start_time: None,
            root_span_name: None,
            root_span_kind: None,
        }
    }

    fn log(severity_level: SeverityLevel) -> Log {
        Log {
            time_unix_nano: 1,
            severity_level,
            severity_text: None,
            body: "message".to_string(),
            attributes: Attributes::new(),
            trace_id: None,
            span_id: None,
            service_name: None,
        }
    }

    #[test]
    fn service_stats_over_traces_and_logs() {
        let traces: Vec<TraceInfo> = (1..=20)
            .rev()
            .map(|i| trace(i, i as f64 * 10., i % 5 == 0))
            .collect();
        let logs = vec![
            log(SeverityLevel::Info),
            log(SeverityLevel::Error3),
            log(SeverityLevel::Fatal),
            log(SeverityLevel::Warn),
        ];
        let stats = ServiceStats::from_data(&traces, &logs, 7);
        assert_eq!(stats.total_traces, 20);
        assert_eq!(stats.error_traces, 4);
        assert_eq!(stats.error_rate_percent, 20.);
        assert_eq!(stats.avg_duration_ms, 105.);
        assert_eq!(stats.p95_duration_ms, 190.);
        assert_eq!(stats.total_logs, 4);
        assert_eq!(stats.error_logs, 2);
        assert_eq!(stats.total_metrics, 7);
        assert_eq!(ServiceStats::error_logs(&logs).count(), 2);
    }

    #[test]
    fn empty_service_has_zeroed_stats() {
        assert_eq!(ServiceStats::from_data(&[], &[], 0), ServiceStats::default());
    }

    #[test]
    fn single_trace_is_its_own_p95() {
        let stats = ServiceStats::from_data(&[trace(1, 42., false)], &[], 0);
        assert_eq!(stats.p95_duration_ms, 42.);
        assert_eq!(stats.error_rate_percent, 0.);
    }

    #[test]
    fn dashboard_only_summarizes_recent_traces() {
        let mut recent: Vec<TraceInfo> = (0..10).map(|i| trace(i, 10., i < 3)).collect();
        recent.push(trace(99, 1000., true));
        let stats = DashboardStats::from_data(4, &recent, 250);
        assert_eq!(stats.service_count, 4);
        assert_eq!(stats.total_traces, 250);
        assert_eq!(stats.error_rate_percent, 30.);
        assert_eq!(stats.avg_duration_ms, 10.);
    }

    fn started(id: usize, start_time: i64, duration_ms: f64) -> TraceInfo {
        TraceInfo {
            start_time: Some(start_time),
            ..trace(id, duration_ms, id % 2 == 0)
        }
    }

    #[test]
    fn chart_keeps_latest_traces_in_start_order() {
        let traces: Vec<TraceInfo> = (1..=25)
            .rev()
            .map(|i| started(i, i as i64 * 1_000, i as f64))
            .collect();
        let chart = ResponseTimeChart::from_traces(&traces);
        assert_eq!(chart.bars.len(), CHART_RECENT_TRACES);
        assert_eq!(chart.bars[0].trace_id, "t6");
        assert_eq!(chart.bars[19].trace_id, "t25");
        assert_eq!(chart.bars[0].height_percent, CHART_MIN_BAR_HEIGHT_PERCENT);
        assert_eq!(chart.bars[19].height_percent, 100.);
        assert_eq!(chart.avg_duration_ms, 13.);
        assert_eq!(chart.max_duration_ms, 25.);
    }

    #[test]
    fn chart_heights_are_normalized_between_min_and_max() {
        let traces = vec![
            started(1, 1, 10.),
            started(2, 2, 60.),
            started(3, 3, 110.),
            trace(4, 500., false),
        ];
        let chart = ResponseTimeChart::from_traces(&traces);
        let heights: Vec<f64> = chart.bars.iter().map(|b| b.height_percent).collect();
        assert_eq!(heights, vec![5., 50., 100.]);
        assert!(chart.bars[1].has_errors);
        // untimed traces still count for the summary
        assert_eq!(chart.max_duration_ms, 500.);
        assert_eq!(chart.avg_duration_ms, 170.);
    }

    #[test]
    fn chart_with_equal_durations_draws_full_bars() {
        let chart = ResponseTimeChart::from_traces(&[started(1, 5, 7.), started(2, 6, 7.)]);
        assert!(chart.bars.iter().all(|b| b.height_percent == 100.));
        assert!(ResponseTimeChart::from_traces(&[trace(1, 7., false)]).is_empty());
        assert_eq!(ResponseTimeChart::from_traces(&[]), ResponseTimeChart::default());
    }
}
