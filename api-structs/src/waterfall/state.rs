use super::tree::SpanTree;
use std::collections::HashSet;

/// What the user did to the waterfall, kept apart from the tree so the tree
/// can be rebuilt on every render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaterfallState {
    expanded: HashSet<String>,
    selected: Option<String>,
}

impl WaterfallState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, span_id: &str) -> bool {
        self.expanded.contains(span_id)
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// Flips the expand arrow of `span_id`. Leaves have no arrow, so this
    /// returns false and changes nothing for them.
    pub fn toggle(&mut self, tree: &SpanTree<'_>, span_id: &str) -> bool {
        let has_children = tree.find(span_id).is_some_and(|node| node.has_children());
        if !has_children {
            return false;
        }
        if !self.expanded.remove(span_id) {
            self.expanded.insert(span_id.to_string());
        }
        true
    }

    pub fn expand_all(&mut self, tree: &SpanTree<'_>) {
        self.expanded = tree
            .nodes()
            .iter()
            .filter(|node| node.has_children())
            .map(|node| node.span_id().to_string())
            .collect();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn select(&mut self, span_id: impl Into<String>) {
        self.selected = Some(span_id.into());
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::trace::test::span;

    #[test]
    fn select_replaces_and_close_clears() {
        let mut state = WaterfallState::new();
        assert_eq!(state.selected(), None);
        state.select("X");
        state.select("Y");
        assert_eq!(state.selected(), Some("Y"));
        state.close_detail();
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn leaves_cannot_be_toggled() {
        let spans = vec![span("root", None, 0, 2), span("leaf", Some("root"), 0, 1)];
        let tree = SpanTree::build(&spans);
        let mut state = WaterfallState::new();
        assert!(!state.toggle(&tree, "leaf"));
        assert!(!state.toggle(&tree, "unknown"));
        assert_eq!(state.expanded_count(), 0);
        assert!(state.toggle(&tree, "root"));
        assert!(state.is_expanded("root"));
        assert!(state.toggle(&tree, "root"));
        assert!(!state.is_expanded("root"));
    }

    #[test]
    fn expand_all_marks_only_parents_and_collapse_all_clears() {
        let spans = vec![
            span("root", None, 0, 10),
            span("mid", Some("root"), 1, 9),
            span("leaf", Some("mid"), 2, 3),
            span("other-root", None, 0, 1),
        ];
        let tree = SpanTree::build(&spans);
        let mut state = WaterfallState::new();
        state.expand_all(&tree);
        assert_eq!(state.expanded_count(), 2);
        assert!(state.is_expanded("root"));
        assert!(state.is_expanded("mid"));
        assert!(!state.is_expanded("leaf"));
        state.collapse_all();
        assert_eq!(state.expanded_count(), 0);
    }
}
