use crate::trace::Span;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// A span placed in the forest. Children are indices into [`SpanTree::nodes`],
/// kept in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanNode<'a> {
    pub span: &'a Span,
    pub index: usize,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub depth: usize,
}

impl<'a> SpanNode<'a> {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn span_id(&self) -> &'a str {
        self.span.span_id.as_str()
    }
}

/// Forest of spans linked by parent id. Node `i` always wraps input span `i`.
#[derive(Debug, Clone)]
pub struct SpanTree<'a> {
    nodes: Vec<SpanNode<'a>>,
    roots: Vec<usize>,
    by_span_id: HashMap<&'a str, usize>,
}

impl<'a> SpanTree<'a> {
    pub fn build(spans: &'a [Span]) -> Self {
        // later duplicates win the lookup, earlier ones still become nodes
        let by_span_id: HashMap<&'a str, usize> = spans
            .iter()
            .enumerate()
            .map(|(idx, span)| (span.span_id.as_str(), idx))
            .collect();
        let mut nodes: Vec<SpanNode<'a>> = spans
            .iter()
            .enumerate()
            .map(|(index, span)| SpanNode {
                span,
                index,
                parent: None,
                children: Vec::new(),
                depth: 0,
            })
            .collect();
        let mut linked_roots = Vec::new();
        for (idx, span) in spans.iter().enumerate() {
            let Some(parent_id) = span.parent_id() else {
                linked_roots.push(idx);
                continue;
            };
            match by_span_id.get(parent_id) {
                Some(&parent_idx) => {
                    nodes[parent_idx].children.push(idx);
                    nodes[idx].parent = Some(parent_idx);
                }
                None => {
                    debug!(
                        span_id = span.span_id.as_str(),
                        parent_id, "parent not in trace, promoting span to root"
                    );
                    linked_roots.push(idx);
                }
            }
        }

        let mut tree = Self {
            nodes,
            roots: Vec::with_capacity(linked_roots.len()),
            by_span_id,
        };
        let mut placed = vec![false; tree.nodes.len()];
        for root in linked_roots {
            tree.place_root(root, &mut placed);
        }
        // whatever is still unplaced hangs off a parent cycle
        for idx in 0..tree.nodes.len() {
            if placed[idx] {
                continue;
            }
            let member = tree.cycle_member(idx);
            warn!(
                span_id = tree.nodes[member].span.span_id.as_str(),
                "span is part of a parent cycle, promoting it to root"
            );
            if let Some(parent_idx) = tree.nodes[member].parent.take() {
                tree.nodes[parent_idx].children.retain(|child| *child != member);
            }
            tree.place_root(member, &mut placed);
        }
        tree
    }

    /// Follows parent links from `start` until a span repeats. Unplaced spans
    /// only have unplaced ancestors, so the repeated span closes the cycle.
    fn cycle_member(&self, start: usize) -> usize {
        let mut seen = HashSet::new();
        let mut current = start;
        while seen.insert(current) {
            match self.nodes[current].parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }

    fn place_root(&mut self, root: usize, placed: &mut [bool]) {
        self.roots.push(root);
        let mut stack = vec![(root, 0usize)];
        while let Some((idx, depth)) = stack.pop() {
            placed[idx] = true;
            let node = &mut self.nodes[idx];
            node.depth = depth;
            stack.extend(
                node.children
                    .iter()
                    .filter(|child| !placed[**child])
                    .map(|child| (*child, depth + 1)),
            );
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[SpanNode<'a>] {
        &self.nodes
    }

    pub fn roots(&self) -> impl Iterator<Item = &SpanNode<'a>> + '_ {
        self.roots.iter().map(|idx| &self.nodes[*idx])
    }

    pub fn children<'t>(
        &'t self,
        node: &'t SpanNode<'a>,
    ) -> impl Iterator<Item = &'t SpanNode<'a>> + 't {
        node.children.iter().map(|idx| &self.nodes[*idx])
    }

    pub fn find(&self, span_id: &str) -> Option<&SpanNode<'a>> {
        self.by_span_id.get(span_id).map(|idx| &self.nodes[*idx])
    }

    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Pre-order walk: roots in builder order, children in insertion order.
    /// A node's children are only visited when `descend` returns true for it.
    pub fn depth_first<F>(&self, descend: F) -> DepthFirst<'_, 'a, F>
    where
        F: FnMut(&SpanNode<'a>) -> bool,
    {
        DepthFirst {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
            descend,
        }
    }
}

pub struct DepthFirst<'t, 'a, F> {
    tree: &'t SpanTree<'a>,
    stack: Vec<usize>,
    descend: F,
}

impl<'t, 'a, F> Iterator for DepthFirst<'t, 'a, F>
where
    F: FnMut(&SpanNode<'a>) -> bool,
{
    type Item = &'t SpanNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = &self.tree.nodes[idx];
        if (self.descend)(node) {
            self.stack.extend(node.children.iter().rev().copied());
        }
        Some(node)
    }
}
