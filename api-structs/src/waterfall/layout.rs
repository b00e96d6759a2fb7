use super::WaterfallError;
use crate::time_conversion::NANOS_IN_1_MS;
use crate::trace::Span;

/// Narrowest bar drawn, keeps instant spans visible and clickable.
pub const MIN_VISIBLE_WIDTH_PERCENT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineBounds {
    pub min_start_unix_nano: i64,
    pub max_end_unix_nano: i64,
}

impl TimelineBounds {
    /// Zero or negative timestamps are treated as missing.
    pub fn from_spans<'s>(spans: impl IntoIterator<Item = &'s Span>) -> Option<Self> {
        let mut min_start: Option<i64> = None;
        let mut max_end: Option<i64> = None;
        for span in spans {
            if span.start_time_unix_nano > 0 {
                min_start = Some(min_start.map_or(span.start_time_unix_nano, |m| {
                    m.min(span.start_time_unix_nano)
                }));
            }
            if span.end_time_unix_nano > 0 {
                max_end = Some(
                    max_end.map_or(span.end_time_unix_nano, |m| m.max(span.end_time_unix_nano)),
                );
            }
        }
        Some(Self {
            min_start_unix_nano: min_start?,
            max_end_unix_nano: max_end?,
        })
    }
}

/// Horizontal geometry of one span, in percent of the whole trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanBar {
    pub start_offset_percent: f64,
    pub width_percent: f64,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    bounds: TimelineBounds,
    total_duration_ms: f64,
}

impl Timeline {
    pub fn new(bounds: TimelineBounds) -> Result<Self, WaterfallError> {
        let total_duration_ms = bounds
            .max_end_unix_nano
            .saturating_sub(bounds.min_start_unix_nano) as f64
            / NANOS_IN_1_MS as f64;
        if !total_duration_ms.is_finite() || total_duration_ms <= 0. {
            tracing::warn!(?bounds, total_duration_ms, "invalid span timing data");
            return Err(WaterfallError::InvalidTiming);
        }
        Ok(Self {
            bounds,
            total_duration_ms,
        })
    }

    pub fn total_duration_ms(&self) -> f64 {
        self.total_duration_ms
    }

    pub fn bar(&self, span: &Span) -> SpanBar {
        let start_offset_ms = span
            .start_time_unix_nano
            .saturating_sub(self.bounds.min_start_unix_nano) as f64
            / NANOS_IN_1_MS as f64;
        let duration_ms = span
            .end_time_unix_nano
            .saturating_sub(span.start_time_unix_nano) as f64
            / NANOS_IN_1_MS as f64;
        let start_offset_percent = (start_offset_ms / self.total_duration_ms * 100.).clamp(0., 100.);
        let width_percent = (duration_ms / self.total_duration_ms * 100.)
            .min(100. - start_offset_percent)
            .max(MIN_VISIBLE_WIDTH_PERCENT);
        SpanBar {
            start_offset_percent,
            width_percent,
            duration_ms,
        }
    }
}
