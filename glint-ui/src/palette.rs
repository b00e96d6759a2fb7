use api_structs::ui::palette::PaletteState;
use leptos::*;
use leptos_router::use_navigate;

/// Page switcher toggled with Ctrl+K. Arrows move, Enter opens, Escape closes.
#[component]
pub fn CommandPalette() -> impl IntoView {
    let state = create_rw_signal(PaletteState::default());
    let navigate = use_navigate();

    let handle = window_event_listener(ev::keydown, {
        let navigate = navigate.clone();
        move |ev| {
            if ev.key() == "k" && ev.ctrl_key() && !ev.meta_key() {
                ev.prevent_default();
                state.update(PaletteState::toggle);
                return;
            }
            if !state.with_untracked(PaletteState::is_open) {
                return;
            }
            match ev.key().as_str() {
                "Escape" => state.update(PaletteState::close),
                "ArrowDown" => {
                    ev.prevent_default();
                    state.update(PaletteState::highlight_next);
                }
                "ArrowUp" => {
                    ev.prevent_default();
                    state.update(PaletteState::highlight_previous);
                }
                "Enter" => {
                    ev.prevent_default();
                    let mut path = None;
                    state.update(|s| path = s.confirm());
                    if let Some(path) = path {
                        navigate(path, Default::default());
                    }
                }
                _ => {}
            }
        }
    });
    on_cleanup(move || handle.remove());

    let on_input = move |ev: ev::Event| state.update(|s| s.set_query(event_target_value(&ev)));
    let entries = move || {
        let highlighted = state.with(PaletteState::highlighted);
        let matches = state.with(PaletteState::matches);
        if matches.is_empty() {
            return view! { <li class="palette__empty">"No results found."</li> }.into_view();
        }
        matches
            .into_iter()
            .enumerate()
            .map(|(idx, target)| {
                let navigate = navigate.clone();
                let class = if idx == highlighted {
                    "palette__item palette__item--selected"
                } else {
                    "palette__item"
                };
                let on_click = move |_: ev::MouseEvent| {
                    state.update(PaletteState::close);
                    navigate(target.path, Default::default());
                };
                view! { <li class=class on:click=on_click>{target.label}</li> }
            })
            .collect_view()
    };
    move || {
        let entries = entries.clone();
        state.with(PaletteState::is_open).then(move || {
            view! {
                <div class="palette__backdrop" on:click=move |_| state.update(PaletteState::close)>
                    <div class="palette" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                        <input
                            class="palette__input"
                            placeholder="Search for pages..."
                            autofocus=true
                            prop:value=move || state.with(|s| s.query().to_string())
                            on:input=on_input
                        />
                        <ul class="palette__list">{entries}</ul>
                    </div>
                </div>
            }
        })
    }
}
