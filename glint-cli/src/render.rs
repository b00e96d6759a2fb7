//! Plain text rendering of API responses for the terminal.

use api_structs::time_conversion::format_date_time;
use api_structs::ui::formatters::{format_duration, format_duration_compact, pluralize, short_id};
use api_structs::ui::service::ServiceStats;
use api_structs::waterfall::{SpanBar, Waterfall, WaterfallError, WaterfallRow, WaterfallState};
use api_structs::{Log, Metric, ServiceName, Trace, TraceInfo};

pub const SHORT_ID_CHARS: usize = 8;
const EXPANDED_MARKER: &str = "▼ ";
const COLLAPSED_MARKER: &str = "▶ ";
const LEAF_MARKER: &str = "  ";
const INDENT: &str = "  ";

pub fn trace_line(trace: &TraceInfo) -> String {
    let mut line = format!(
        "[{}] {}",
        short_id(&trace.trace_id, SHORT_ID_CHARS),
        trace.service_name.as_deref().unwrap_or("unknown")
    );
    if let Some(root) = &trace.root_span_name {
        line.push_str(&format!(" {root}"));
    }
    line.push_str(&format!(
        " - {} - {}",
        format_duration(trace.duration_ms),
        pluralize(trace.span_count, "span", "spans")
    ));
    if trace.has_errors {
        line.push_str(" [ERROR]");
    }
    line
}

pub fn trace_list(traces: &[TraceInfo], total: usize) -> String {
    if traces.is_empty() {
        return "No traces found\n".to_string();
    }
    let mut out = String::new();
    for trace in traces {
        out.push_str(&trace_line(trace));
        out.push('\n');
    }
    out.push_str(&format!("Showing {} of {total}\n", traces.len()));
    out
}

/// Text waterfall of a trace. Every subtree is open unless `collapsed`, in
/// which case only root spans are listed.
pub fn waterfall(trace: &Trace, collapsed: bool, bar_chars: usize) -> Result<String, WaterfallError> {
    let waterfall = Waterfall::build(&trace.spans)?;
    let mut state = WaterfallState::new();
    if !collapsed {
        state.expand_all(waterfall.tree());
    }
    let rows = waterfall.rows(&state);
    let labels: Vec<String> = rows.iter().map(row_label).collect();
    let label_chars = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = format!("Trace {}", trace.trace_id);
    if let Some(service) = trace.display_service_name() {
        out.push_str(&format!(" ({service})"));
    }
    out.push('\n');
    let error_count = trace.spans.iter().filter(|s| s.has_error()).count();
    out.push_str(&format!(
        "Total: {}, {}",
        format_duration_compact(waterfall.timeline().total_duration_ms()),
        pluralize(waterfall.span_count(), "span", "spans")
    ));
    if error_count > 0 {
        out.push_str(&format!(", {}", pluralize(error_count, "error", "errors")));
    }
    out.push('\n');
    for (row, label) in rows.iter().zip(&labels) {
        out.push_str(&format!(
            "{label:<label_chars$}  {:>6}  |{}|\n",
            format_duration_compact(row.bar.duration_ms),
            bar(&row.bar, row.has_error(), bar_chars)
        ));
    }
    Ok(out)
}

fn row_label(row: &WaterfallRow<'_>) -> String {
    let marker = match (row.has_children, row.expanded) {
        (false, _) => LEAF_MARKER,
        (true, true) => EXPANDED_MARKER,
        (true, false) => COLLAPSED_MARKER,
    };
    format!("{}{marker}{}", INDENT.repeat(row.depth), row.span.name)
}

/// Always `chars` wide, at least one cell filled.
fn bar(bar: &SpanBar, has_error: bool, chars: usize) -> String {
    if chars == 0 {
        return String::new();
    }
    let scale = chars as f64 / 100.;
    let start = ((bar.start_offset_percent * scale).round() as usize).min(chars - 1);
    let filled = ((bar.width_percent * scale).round() as usize).clamp(1, chars - start);
    let fill = if has_error { "!" } else { "=" };
    format!(
        "{}{}{}",
        " ".repeat(start),
        fill.repeat(filled),
        " ".repeat(chars - start - filled)
    )
}

pub fn log_line(log: &Log) -> String {
    let mut line = format!(
        "{} {:<5} [{}] {}",
        format_date_time(log.time_unix_nano, 0),
        log.severity_level.category().as_str(),
        log.service_name.as_deref().unwrap_or("unknown"),
        log.body
    );
    if let Some(trace_id) = &log.trace_id {
        line.push_str(&format!(" trace={}", short_id(trace_id, SHORT_ID_CHARS)));
    }
    line
}

pub fn log_list(logs: &[Log]) -> String {
    if logs.is_empty() {
        return "No logs found\n".to_string();
    }
    logs.iter().map(|log| format!("{}\n", log_line(log))).collect()
}

pub fn service_list(services: &[ServiceName]) -> String {
    if services.is_empty() {
        return "No services reporting yet\n".to_string();
    }
    services.iter().map(|s| format!("{s}\n")).collect()
}

pub fn metric_list(metrics: &[Metric]) -> String {
    if metrics.is_empty() {
        return "No metrics found\n".to_string();
    }
    metrics
        .iter()
        .map(|metric| {
            format!(
                "{} ({:?}) {} - {}\n",
                metric.name,
                metric.metric_type,
                metric
                    .display_latest_value()
                    .unwrap_or_else(|| "No data".to_string()),
                metric.service_name.as_deref().unwrap_or("unknown")
            )
        })
        .collect()
}

pub fn service_stats(service: &str, stats: &ServiceStats) -> String {
    format!(
        "{service}\n\
         Traces:       {}\n\
         Error rate:   {:.1}%\n\
         Avg duration: {}\n\
         P95 duration: {}\n\
         Logs:         {} ({} errors)\n\
         Metrics:      {}\n",
        stats.total_traces,
        stats.error_rate_percent,
        format_duration(stats.avg_duration_ms),
        format_duration(stats.p95_duration_ms),
        stats.total_logs,
        stats.error_logs,
        stats.total_metrics
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use api_structs::{Attributes, Span, SpanKind, Status, StatusCode};

    const MS: i64 = 1_000_000;
    const T0: i64 = 1_700_000_000_000 * MS;

    fn span(id: &str, parent: Option<&str>, name: &str, start_ms: i64, end_ms: i64) -> Span {
        Span {
            span_id: id.to_string(),
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            parent_span_id: parent.map(str::to_string),
            name: name.to_string(),
            kind: SpanKind::Internal,
            start_time_unix_nano: T0 + start_ms * MS,
            end_time_unix_nano: T0 + end_ms * MS,
            attributes: Attributes::new(),
            status: Status::default(),
            service_name: Some("checkout".to_string()),
        }
    }

    fn checkout_trace() -> Trace {
        let mut cache = span("4", Some("1"), "cache.get", 60, 70);
        cache.status.code = StatusCode::Error;
        Trace {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            spans: vec![
                span("1", None, "GET /checkout", 0, 100),
                span("2", Some("1"), "db.query", 10, 50),
                span("3", Some("2"), "db.connect", 10, 20),
                cache,
            ],
            service_name: None,
        }
    }

    #[test]
    fn expanded_waterfall() {
        let output = waterfall(&checkout_trace(), false, 20).unwrap();
        insta::assert_snapshot!(output, @r###"
        Trace 4bf92f3577b34da6a3ce929d0e0e4736 (checkout)
        Total: 100ms, 4 spans, 1 error
        ▼ GET /checkout    100ms  |====================|
          ▼ db.query        40ms  |  ========          |
              db.connect    10ms  |  ==                |
            cache.get       10ms  |            !!      |
        "###);
    }

    #[test]
    fn collapsed_waterfall_lists_roots_only() {
        let output = waterfall(&checkout_trace(), true, 10).unwrap();
        insta::assert_snapshot!(output, @r###"
        Trace 4bf92f3577b34da6a3ce929d0e0e4736 (checkout)
        Total: 100ms, 4 spans, 1 error
        ▶ GET /checkout   100ms  |==========|
        "###);
    }

    #[test]
    fn instant_span_still_gets_a_cell() {
        let trace = Trace {
            trace_id: "t".to_string(),
            spans: vec![
                span("1", None, "job", 0, 1000),
                span("2", Some("1"), "tick", 1000, 1000),
            ],
            service_name: None,
        };
        let output = waterfall(&trace, false, 10).unwrap();
        let last = output.lines().last().unwrap();
        assert!(last.ends_with("|         =|"), "{last}");
    }

    #[test]
    fn waterfall_errors() {
        let empty = Trace {
            trace_id: "t".to_string(),
            spans: vec![],
            service_name: None,
        };
        assert_eq!(waterfall(&empty, false, 10), Err(WaterfallError::NoSpans));
        let instant = Trace {
            trace_id: "t".to_string(),
            spans: vec![span("1", None, "noop", 5, 5)],
            service_name: None,
        };
        assert_eq!(
            waterfall(&instant, false, 10),
            Err(WaterfallError::InvalidTiming)
        );
    }

    #[test]
    fn trace_lines() {
        let traces = vec![
            TraceInfo {
                trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
                service_name: Some("checkout".to_string()),
                duration_ms: 120.,
                span_count: 4,
                has_errors: true,
                start_time: None,
                root_span_name: Some("GET /checkout".to_string()),
                root_span_kind: Some(SpanKind::Server),
            },
            TraceInfo {
                trace_id: "00f067aa0ba902b7".to_string(),
                service_name: None,
                duration_ms: 1500.,
                span_count: 1,
                has_errors: false,
                start_time: None,
                root_span_name: None,
                root_span_kind: None,
            },
        ];
        insta::assert_snapshot!(trace_list(&traces, 42), @r###"
        [4bf92f35] checkout GET /checkout - 120.0ms - 4 spans [ERROR]
        [00f067aa] unknown - 1.50s - 1 span
        Showing 2 of 42
        "###);
        assert_eq!(trace_list(&[], 0), "No traces found\n");
    }

    #[test]
    fn stats_block() {
        let stats = ServiceStats {
            total_traces: 20,
            error_traces: 4,
            error_rate_percent: 20.,
            avg_duration_ms: 105.,
            p95_duration_ms: 190.,
            total_logs: 12,
            error_logs: 3,
            total_metrics: 5,
        };
        insta::assert_snapshot!(service_stats("checkout", &stats), @r###"
        checkout
        Traces:       20
        Error rate:   20.0%
        Avg duration: 105.0ms
        P95 duration: 190.0ms
        Logs:         12 (3 errors)
        Metrics:      5
        "###);
    }
}
