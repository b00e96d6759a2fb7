use crate::components::{EmptyState, StatusBadge};
use api_structs::ui::formatters::format_duration_compact;
use api_structs::waterfall::SpanTree;
use api_structs::Span;
use leptos::*;
use std::rc::Rc;

/// Fully expanded span hierarchy, without the timeline.
#[component]
pub fn SpanTreeList(spans: Rc<Vec<Span>>) -> impl IntoView {
    if spans.is_empty() {
        return view! { <EmptyState message="No spans to display"/> }.into_view();
    }
    let tree = SpanTree::build(&spans);
    let rows = tree
        .depth_first(|_| true)
        .map(|node| {
            let span = node.span;
            let style = format!("padding-left: {}px", node.depth * 16 + 8);
            view! {
                <li class="span-tree__row" style=style>
                    <span class="span-tree__name">{span.name.clone()}</span>
                    <span class="span-tree__kind">{span.kind.label()}</span>
                    <span class="span-tree__duration">{format_duration_compact(span.duration_ms())}</span>
                    <StatusBadge code=span.status.code/>
                </li>
            }
        })
        .collect_view();
    view! { <ul class="span-tree">{rows}</ul> }.into_view()
}
