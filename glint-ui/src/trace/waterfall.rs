use super::span_detail::SpanDetailPanel;
use api_structs::ui::formatters::{format_duration_compact, pluralize};
use api_structs::waterfall::{SpanTree, Waterfall, WaterfallRow, WaterfallState};
use api_structs::Span;
use leptos::logging::error;
use leptos::*;
use std::rc::Rc;

const INDENT_PX_PER_LEVEL: usize = 20;
const ROW_PADDING_PX: usize = 12;

/// Collapsible span waterfall with a detail panel for the selected span.
#[component]
pub fn SpanWaterfall(spans: Rc<Vec<Span>>) -> impl IntoView {
    let state = create_rw_signal(WaterfallState::new());
    let body = {
        let spans = Rc::clone(&spans);
        move || waterfall_body(Rc::clone(&spans), state)
    };
    let detail = move || {
        let waterfall = Waterfall::build(&spans).ok()?;
        let span = state.with(|s| waterfall.selected_span(s).cloned())?;
        let on_close = Callback::new(move |_| state.update(|s| s.close_detail()));
        Some(view! { <SpanDetailPanel span=span on_close=on_close/> })
    };
    view! {
        <ErrorBoundary fallback=|errors| {
            for (_, e) in errors.get() {
                error!("Waterfall failed to render: {e}");
            }
            view! {
                <div class="placeholder waterfall__placeholder">
                    <p>"Error displaying waterfall"</p>
                </div>
            }
        }>
            {body}
            {detail}
        </ErrorBoundary>
    }
}

fn placeholder(message: String) -> View {
    view! {
        <div class="placeholder waterfall__placeholder">
            <p>{message}</p>
        </div>
    }
    .into_view()
}

fn waterfall_body(spans: Rc<Vec<Span>>, state: RwSignal<WaterfallState>) -> View {
    let waterfall = match Waterfall::build(&spans) {
        Ok(waterfall) => waterfall,
        Err(e) => return placeholder(e.to_string()),
    };
    let total = format_duration_compact(waterfall.timeline().total_duration_ms());
    let count = pluralize(waterfall.span_count(), "span", "spans");
    let expand_all = {
        let spans = Rc::clone(&spans);
        move |_: ev::MouseEvent| state.update(|s| s.expand_all(&SpanTree::build(&spans)))
    };
    let collapse_all = move |_: ev::MouseEvent| state.update(|s| s.collapse_all());
    let rows = state.with(|s| waterfall.rows(s));
    let selected = state.with(|s| s.selected().map(str::to_string));
    let rows_view = rows
        .iter()
        .map(|row| waterfall_row(row, selected.as_deref(), Rc::clone(&spans), state))
        .collect_view();
    view! {
        <div class="waterfall">
            <div class="waterfall__header">
                <div>
                    <span class="waterfall__total">{format!("Total: {total}")}</span>
                    <span class="muted">{count}</span>
                </div>
                <div>
                    <button class="button button--link" on:click=expand_all>"Expand All"</button>
                    <span class="muted">"|"</span>
                    <button class="button button--link" on:click=collapse_all>"Collapse All"</button>
                </div>
            </div>
            <div class="waterfall__columns">
                <div class="waterfall__name-column">"SPAN"</div>
                <div class="waterfall__timeline-column">"TIMELINE"</div>
            </div>
            {rows_view}
        </div>
    }
    .into_view()
}

fn waterfall_row(
    row: &WaterfallRow<'_>,
    selected: Option<&str>,
    spans: Rc<Vec<Span>>,
    state: RwSignal<WaterfallState>,
) -> View {
    let span_id = row.span.span_id.clone();
    let toggle = if row.has_children {
        let span_id = span_id.clone();
        let on_toggle = move |ev: ev::MouseEvent| {
            ev.stop_propagation();
            state.update(|s| {
                s.toggle(&SpanTree::build(&spans), &span_id);
            });
        };
        let arrow = if row.expanded { "▼" } else { "▶" };
        view! { <button class="waterfall__toggle" on:click=on_toggle>{arrow}</button> }.into_view()
    } else {
        view! { <div class="waterfall__toggle-spacer"></div> }.into_view()
    };
    let on_select = {
        let span_id = span_id.clone();
        move |_: ev::MouseEvent| state.update(|s| s.select(span_id.clone()))
    };
    let on_bar_select = on_select.clone();
    let row_class = if selected == Some(span_id.as_str()) {
        "waterfall__row waterfall__row--selected"
    } else {
        "waterfall__row"
    };
    let bar_class = if row.has_error() {
        "waterfall__bar waterfall__bar--error"
    } else {
        "waterfall__bar"
    };
    let error_badge = row
        .has_error()
        .then(|| view! { <span class="badge badge--error">"ERROR"</span> });
    let name_style = format!(
        "padding-left: {}px",
        row.depth * INDENT_PX_PER_LEVEL + ROW_PADDING_PX
    );
    let bar_style = format!(
        "margin-left: {:.3}%; width: {:.3}%",
        row.bar.start_offset_percent, row.bar.width_percent
    );
    view! {
        <div class=row_class>
            <div class="waterfall__name-column" style=name_style>
                {toggle}
                <button class="waterfall__name" on:click=on_select>
                    <span>{row.span.name.clone()}</span>
                    {error_badge}
                </button>
                <span class="waterfall__duration">{format_duration_compact(row.bar.duration_ms)}</span>
            </div>
            <div class="waterfall__timeline-column">
                <div class=bar_class style=bar_style on:click=on_bar_select></div>
            </div>
        </div>
    }
    .into_view()
}
