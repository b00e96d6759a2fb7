use super::layout::SpanBar;
use super::state::WaterfallState;
use super::Waterfall;
use crate::trace::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallRow<'a> {
    pub span: &'a Span,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
    pub bar: SpanBar,
}

impl<'a> WaterfallRow<'a> {
    pub fn has_error(&self) -> bool {
        self.span.has_error()
    }
}

impl<'a> Waterfall<'a> {
    /// Rows to draw, top to bottom. Collapsed subtrees are not part of the list.
    pub fn rows(&self, state: &WaterfallState) -> Vec<WaterfallRow<'a>> {
        self.tree
            .depth_first(|node| state.is_expanded(node.span_id()))
            .map(|node| WaterfallRow {
                span: node.span,
                depth: node.depth,
                has_children: node.has_children(),
                expanded: node.has_children() && state.is_expanded(node.span_id()),
                bar: self.timeline.bar(node.span),
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::trace::test::span;
    use crate::waterfall::WaterfallError;
    use proptest::prelude::*;

    const MS: i64 = 1_000_000;

    fn sample() -> Vec<Span> {
        vec![
            span("root", None, 100 * MS, 200 * MS),
            span("db", Some("root"), 110 * MS, 150 * MS),
            span("query", Some("db"), 120 * MS, 140 * MS),
            span("cache", Some("root"), 150 * MS, 160 * MS),
            span("async", None, 180 * MS, 200 * MS),
        ]
    }

    fn row_ids<'a>(rows: &[WaterfallRow<'a>]) -> Vec<&'a str> {
        rows.iter().map(|r| r.span.span_id.as_str()).collect()
    }

    #[test]
    fn starts_with_only_roots_visible() {
        let spans = sample();
        let waterfall = Waterfall::build(&spans).unwrap();
        let rows = waterfall.rows(&WaterfallState::new());
        assert_eq!(row_ids(&rows), vec!["root", "async"]);
        assert!(rows[0].has_children);
        assert!(!rows[0].expanded);
        assert!(!rows[1].has_children);
    }

    #[test]
    fn expanded_rows_are_depth_first_in_insertion_order() {
        let spans = sample();
        let waterfall = Waterfall::build(&spans).unwrap();
        let mut state = WaterfallState::new();
        state.expand_all(waterfall.tree());
        let rows = waterfall.rows(&state);
        assert_eq!(row_ids(&rows), vec!["root", "db", "query", "cache", "async"]);
        let depths: Vec<usize> = rows.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 1, 0]);
        assert_eq!(rows[2].bar.start_offset_percent, 20.);
        assert_eq!(rows[2].bar.width_percent, 20.);
    }

    #[test]
    fn collapsed_subtree_is_skipped_even_if_descendants_are_expanded() {
        let spans = sample();
        let waterfall = Waterfall::build(&spans).unwrap();
        let mut state = WaterfallState::new();
        state.toggle(waterfall.tree(), "db");
        assert_eq!(row_ids(&waterfall.rows(&state)), vec!["root", "async"]);
        state.toggle(waterfall.tree(), "root");
        assert_eq!(
            row_ids(&waterfall.rows(&state)),
            vec!["root", "db", "query", "cache", "async"]
        );
    }

    #[test]
    fn selected_span_is_resolved_from_the_tree() {
        let spans = sample();
        let waterfall = Waterfall::build(&spans).unwrap();
        let mut state = WaterfallState::new();
        state.select("query");
        assert_eq!(waterfall.selected_span(&state).unwrap().name, "op-query");
        state.select("gone");
        assert_eq!(waterfall.selected_span(&state), None);
    }

    #[test]
    fn degenerate_inputs_report_errors() {
        assert_eq!(Waterfall::build(&[]).unwrap_err(), WaterfallError::NoSpans);
        let same_instant = vec![span("a", None, 7 * MS, 7 * MS)];
        assert_eq!(
            Waterfall::build(&same_instant).unwrap_err(),
            WaterfallError::InvalidTiming
        );
        let no_timestamps = vec![span("a", None, 0, 0)];
        assert_eq!(
            Waterfall::build(&no_timestamps).unwrap_err(),
            WaterfallError::InvalidTiming
        );
    }

    proptest! {
        #[test]
        fn toggling_twice_restores_rows(
            parents in prop::collection::vec(prop::option::of(any::<prop::sample::Index>()), 1..30),
            expanded in prop::collection::vec(any::<bool>(), 30),
            target in any::<prop::sample::Index>(),
        ) {
            let spans: Vec<Span> = parents
                .iter()
                .enumerate()
                .map(|(i, parent)| {
                    let parent_id = parent
                        .filter(|_| i > 0)
                        .map(|idx| format!("s{}", idx.index(i)));
                    span(&format!("s{i}"), parent_id.as_deref(), 1 + i as i64, 100 + i as i64)
                })
                .collect();
            let waterfall = Waterfall::build(&spans).unwrap();
            let mut state = WaterfallState::new();
            for (span, expand) in spans.iter().zip(&expanded) {
                if *expand {
                    state.toggle(waterfall.tree(), &span.span_id);
                }
            }
            let before = waterfall.rows(&state);
            let target_id = &spans[target.index(spans.len())].span_id;
            state.toggle(waterfall.tree(), target_id);
            state.toggle(waterfall.tree(), target_id);
            prop_assert_eq!(before, waterfall.rows(&state));
        }

        #[test]
        fn expand_all_then_collapse_all_leaves_nothing_expanded(
            parents in prop::collection::vec(prop::option::of(any::<prop::sample::Index>()), 2..30),
        ) {
            let mut spans: Vec<Span> = parents
                .iter()
                .enumerate()
                .map(|(i, parent)| {
                    let parent_id = parent
                        .filter(|_| i > 0)
                        .map(|idx| format!("s{}", idx.index(i)));
                    span(&format!("s{i}"), parent_id.as_deref(), 1, 50)
                })
                .collect();
            spans[1].parent_span_id = Some("s0".to_string());
            let waterfall = Waterfall::build(&spans).unwrap();
            let mut state = WaterfallState::new();
            state.expand_all(waterfall.tree());
            prop_assert!(state.expanded_count() > 0);
            prop_assert_eq!(waterfall.rows(&state).len(), spans.len());
            state.collapse_all();
            prop_assert_eq!(state.expanded_count(), 0);
        }
    }
}
