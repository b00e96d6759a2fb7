use crate::attributes::Attributes;
use crate::time_conversion::NANOS_IN_1_MS;
use crate::waterfall::TimelineBounds;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpanKind {
    #[default]
    #[serde(alias = "UNSPECIFIED")]
    Unspecified,
    #[serde(alias = "INTERNAL")]
    Internal,
    #[serde(alias = "SERVER")]
    Server,
    #[serde(alias = "CLIENT")]
    Client,
    #[serde(alias = "PRODUCER")]
    Producer,
    #[serde(alias = "CONSUMER")]
    Consumer,
}

impl SpanKind {
    pub fn label(&self) -> &'static str {
        match self {
            SpanKind::Unspecified => "UNSPECIFIED",
            SpanKind::Internal => "INTERNAL",
            SpanKind::Server => "SERVER",
            SpanKind::Client => "CLIENT",
            SpanKind::Producer => "PRODUCER",
            SpanKind::Consumer => "CONSUMER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StatusCode {
    #[default]
    #[serde(alias = "UNSET")]
    Unset,
    #[serde(alias = "OK")]
    Ok,
    #[serde(alias = "ERROR")]
    Error,
}

impl StatusCode {
    pub fn label(&self) -> &'static str {
        match self {
            StatusCode::Unset => "UNSET",
            StatusCode::Ok => "OK",
            StatusCode::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Status {
    pub code: StatusCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub span_id: String,
    pub trace_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub kind: SpanKind,
    pub start_time_unix_nano: i64,
    pub end_time_unix_nano: i64,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
}

impl Span {
    /// Empty parent ids are sent by some exporters for root spans.
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_span_id
            .as_deref()
            .filter(|parent_id| !parent_id.is_empty())
    }

    pub fn duration_nanos(&self) -> i64 {
        self.end_time_unix_nano
            .saturating_sub(self.start_time_unix_nano)
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_nanos() as f64 / NANOS_IN_1_MS as f64
    }

    pub fn has_error(&self) -> bool {
        self.status.code == StatusCode::Error
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub trace_id: String,
    pub spans: Vec<Span>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceValidationError {
    #[error("span id {span_id} appears more than once in trace {trace_id}")]
    DuplicateSpanId { trace_id: String, span_id: String },
    #[error("span {span_id} belongs to trace {span_trace_id}, not {trace_id}")]
    ForeignSpan {
        trace_id: String,
        span_id: String,
        span_trace_id: String,
    },
}

impl Trace {
    /// Rejects input the waterfall can't render unambiguously.
    pub fn validate(&self) -> Result<(), TraceValidationError> {
        let mut seen = HashSet::with_capacity(self.spans.len());
        for span in &self.spans {
            if span.trace_id != self.trace_id {
                return Err(TraceValidationError::ForeignSpan {
                    trace_id: self.trace_id.clone(),
                    span_id: span.span_id.clone(),
                    span_trace_id: span.trace_id.clone(),
                });
            }
            if !seen.insert(span.span_id.as_str()) {
                return Err(TraceValidationError::DuplicateSpanId {
                    trace_id: self.trace_id.clone(),
                    span_id: span.span_id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn root_span(&self) -> Option<&Span> {
        self.spans.iter().find(|s| s.parent_id().is_none())
    }

    pub fn has_errors(&self) -> bool {
        self.spans.iter().any(Span::has_error)
    }

    /// Same bounds as the waterfall timeline, 0 when the spans carry no usable timestamps.
    pub fn duration_nanos(&self) -> i64 {
        TimelineBounds::from_spans(&self.spans).map_or(0, |bounds| {
            bounds
                .max_end_unix_nano
                .saturating_sub(bounds.min_start_unix_nano)
        })
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_nanos() as f64 / NANOS_IN_1_MS as f64
    }

    /// Service of the root span, falling back to the first span that has one.
    pub fn display_service_name(&self) -> Option<&str> {
        self.service_name
            .as_deref()
            .or_else(|| self.root_span().and_then(|s| s.service_name.as_deref()))
            .or_else(|| self.spans.iter().find_map(|s| s.service_name.as_deref()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceInfo {
    pub trace_id: String,
    #[serde(default)]
    pub service_name: Option<String>,
    pub duration_ms: f64,
    pub span_count: usize,
    pub has_errors: bool,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub root_span_name: Option<String>,
    #[serde(default)]
    pub root_span_kind: Option<SpanKind>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TraceListResponse {
    pub traces: Vec<TraceInfo>,
    pub total: usize,
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    pub(crate) fn span(span_id: &str, parent: Option<&str>, start: i64, end: i64) -> Span {
        Span {
            span_id: span_id.to_string(),
            trace_id: "trace".to_string(),
            parent_span_id: parent.map(str::to_string),
            name: format!("op-{span_id}"),
            kind: SpanKind::Internal,
            start_time_unix_nano: start,
            end_time_unix_nano: end,
            attributes: Attributes::new(),
            status: Status::default(),
            service_name: None,
        }
    }

    #[test]
    fn parses_trace_from_api_json() {
        let raw = r#"{
            "trace_id": "abc",
            "service_name": "checkout",
            "spans": [{
                "span_id": "1",
                "trace_id": "abc",
                "name": "GET /cart",
                "kind": "SERVER",
                "start_time_unix_nano": 1000000,
                "end_time_unix_nano": 3000000,
                "attributes": {"http.method": {"type": "string", "value": "GET"}},
                "status": {"code": "Error", "message": "boom"}
            }, {
                "span_id": "2",
                "trace_id": "abc",
                "parent_span_id": "1",
                "name": "db",
                "kind": "Client",
                "start_time_unix_nano": 1500000,
                "end_time_unix_nano": 2000000,
                "attributes": {},
                "status": {"code": "OK"}
            }]
        }"#;
        let trace: Trace = serde_json::from_str(raw).unwrap();
        assert_eq!(trace.spans.len(), 2);
        assert_eq!(trace.spans[0].kind, SpanKind::Server);
        assert_eq!(trace.spans[1].kind, SpanKind::Client);
        assert_eq!(trace.spans[1].status.code, StatusCode::Ok);
        assert_eq!(trace.spans[0].status.message.as_deref(), Some("boom"));
        assert!(trace.has_errors());
        assert_eq!(trace.duration_ms(), 2.0);
        assert_eq!(trace.root_span().unwrap().span_id, "1");
        assert_eq!(trace.display_service_name(), Some("checkout"));
        assert!(trace.validate().is_ok());
    }

    #[test]
    fn empty_parent_id_means_root() {
        let root = span("a", Some(""), 0, 1);
        assert_eq!(root.parent_id(), None);
        let child = span("b", Some("a"), 0, 1);
        assert_eq!(child.parent_id(), Some("a"));
    }

    #[test]
    fn validation_rejects_duplicate_span_ids() {
        let trace = Trace {
            trace_id: "trace".to_string(),
            spans: vec![span("a", None, 0, 1), span("a", None, 1, 2)],
            service_name: None,
        };
        assert_eq!(
            trace.validate(),
            Err(TraceValidationError::DuplicateSpanId {
                trace_id: "trace".to_string(),
                span_id: "a".to_string()
            })
        );
    }

    #[test]
    fn validation_rejects_spans_of_other_traces() {
        let mut foreign = span("b", None, 0, 1);
        foreign.trace_id = "other".to_string();
        let trace = Trace {
            trace_id: "trace".to_string(),
            spans: vec![span("a", None, 0, 1), foreign],
            service_name: None,
        };
        assert!(matches!(
            trace.validate(),
            Err(TraceValidationError::ForeignSpan { .. })
        ));
    }

    #[test]
    fn corrupt_timestamps_saturate_instead_of_overflowing() {
        let corrupt = span("a", None, -9_000_000_000_000_000_000, 9_000_000_000_000_000_000);
        assert_eq!(corrupt.duration_nanos(), i64::MAX);
        assert!(corrupt.duration_ms().is_finite());
        let backwards = span("b", None, i64::MAX, i64::MIN);
        assert_eq!(backwards.duration_nanos(), i64::MIN);

        let trace = Trace {
            trace_id: "trace".to_string(),
            spans: vec![span("a", None, 1, i64::MAX), span("b", Some("a"), 2, 3)],
            service_name: None,
        };
        assert_eq!(trace.duration_nanos(), i64::MAX - 1);
    }

    #[test]
    fn unset_timestamps_do_not_stretch_the_trace() {
        let trace = Trace {
            trace_id: "trace".to_string(),
            spans: vec![
                span("a", None, 1_000_000, 5_000_000),
                span("unfinished", Some("a"), 2_000_000, 0),
                span("unstarted", Some("a"), 0, 3_000_000),
            ],
            service_name: None,
        };
        assert_eq!(trace.duration_ms(), 4.);
        let unset = Trace {
            trace_id: "trace".to_string(),
            spans: vec![span("a", None, 0, 0)],
            service_name: None,
        };
        assert_eq!(unset.duration_nanos(), 0);
        let empty = Trace {
            trace_id: "trace".to_string(),
            spans: vec![],
            service_name: None,
        };
        assert_eq!(empty.duration_ms(), 0.);
    }
}
