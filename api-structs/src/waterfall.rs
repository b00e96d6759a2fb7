//! Span tree reconstruction and timeline layout for trace waterfalls.
//!
//! Everything here is rebuilt from the flat span list on each render:
//! [`SpanTree`] links spans by parent id, [`Timeline`] turns timestamps into
//! percentages, and [`WaterfallState`] holds the expand/select state that
//! survives between renders.

mod layout;
mod rows;
mod state;
mod tree;

pub use layout::{SpanBar, Timeline, TimelineBounds, MIN_VISIBLE_WIDTH_PERCENT};
pub use rows::WaterfallRow;
pub use state::WaterfallState;
pub use tree::{DepthFirst, SpanNode, SpanTree};

use crate::trace::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WaterfallError {
    #[error("No spans to display")]
    NoSpans,
    #[error("Invalid span timing data")]
    InvalidTiming,
}

#[derive(Debug, Clone)]
pub struct Waterfall<'a> {
    tree: SpanTree<'a>,
    timeline: Timeline,
}

impl<'a> Waterfall<'a> {
    pub fn build(spans: &'a [Span]) -> Result<Self, WaterfallError> {
        if spans.is_empty() {
            return Err(WaterfallError::NoSpans);
        }
        let bounds = TimelineBounds::from_spans(spans).ok_or(WaterfallError::InvalidTiming)?;
        let timeline = Timeline::new(bounds)?;
        Ok(Self {
            tree: SpanTree::build(spans),
            timeline,
        })
    }

    pub fn tree(&self) -> &SpanTree<'a> {
        &self.tree
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn span_count(&self) -> usize {
        self.tree.len()
    }

    pub fn selected_span(&self, state: &WaterfallState) -> Option<&'a Span> {
        state
            .selected()
            .and_then(|span_id| self.tree.find(span_id))
            .map(|node| node.span)
    }
}
