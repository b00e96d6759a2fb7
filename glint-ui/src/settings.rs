use crate::storage;
use crate::toast::use_toasts;
use api_structs::ui::settings::{
    Settings, Theme, REFRESH_INTERVAL_OPTIONS_MS, SETTINGS_STORAGE_KEY, THEME_STORAGE_KEY,
};
use leptos::logging::{log, warn};
use leptos::*;

#[derive(Clone, Copy)]
struct SettingsContext {
    settings: RwSignal<Settings>,
    theme: RwSignal<Theme>,
}

/// Loads persisted settings and theme, saves every change back.
pub fn provide_settings() {
    let settings = create_rw_signal(Settings::from_stored(
        storage::load(SETTINGS_STORAGE_KEY).as_deref(),
    ));
    let theme = create_rw_signal(Theme::from_stored(
        storage::load(THEME_STORAGE_KEY).as_deref(),
    ));
    create_effect(move |_| {
        let current = settings.get();
        log!("Settings: {current:?}");
        storage::save(SETTINGS_STORAGE_KEY, &current.to_json());
    });
    create_effect(move |_| {
        let current = theme.get();
        storage::save(THEME_STORAGE_KEY, current.as_str());
        apply_theme(current);
    });
    provide_context(SettingsContext { settings, theme });
}

pub fn use_settings() -> RwSignal<Settings> {
    expect_context::<SettingsContext>().settings
}

fn use_theme() -> RwSignal<Theme> {
    expect_context::<SettingsContext>().theme
}

fn system_prefers_dark() -> bool {
    leptos::window()
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

fn apply_theme(theme: Theme) {
    let dark = theme.resolve(system_prefers_dark()) == Theme::Dark;
    let Some(root) = document().document_element() else {
        return;
    };
    if let Err(e) = root.class_list().toggle_with_force("dark", dark) {
        warn!("Failed to apply theme: {e:?}");
    }
}

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let theme = use_theme();
    let next = move || match theme.get() {
        Theme::Light => Theme::Dark,
        Theme::Dark => Theme::System,
        Theme::System => Theme::Light,
    };
    view! {
        <button class="navigation__button" title="Toggle theme" on:click=move |_| theme.set(next())>
            {move || format!("Theme: {}", theme.get())}
        </button>
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let settings = use_settings();
    let theme = use_theme();
    let toasts = use_toasts();
    let on_auto_refresh = move |ev: ev::Event| {
        let enabled = event_target_checked(&ev);
        settings.update(|s| s.auto_refresh = enabled);
        toasts.success(if enabled {
            "Auto-refresh enabled"
        } else {
            "Auto-refresh disabled"
        });
    };
    let on_interval = move |ev: ev::Event| {
        if let Ok(interval) = event_target_value(&ev).parse::<u32>() {
            settings.update(|s| s.refresh_interval_ms = interval);
        }
    };
    let on_theme = move |ev: ev::Event| {
        if let Ok(selected) = event_target_value(&ev).parse::<Theme>() {
            theme.set(selected);
        }
    };
    let interval_options = REFRESH_INTERVAL_OPTIONS_MS
        .into_iter()
        .map(|interval| {
            view! {
                <option
                    value=interval.to_string()
                    selected=move || settings.get().refresh_interval_ms == interval
                >
                    {format!("{}s", interval / 1000)}
                </option>
            }
        })
        .collect_view();
    let theme_options = Theme::ALL
        .into_iter()
        .map(|option| {
            view! {
                <option value=option.as_str() selected=move || theme.get() == option>
                    {option.as_str()}
                </option>
            }
        })
        .collect_view();
    view! {
        <div class="main">
            <h2>"Settings"</h2>
            <section class="settings">
                <label class="settings__row">
                    <input
                        type="checkbox"
                        prop:checked=move || settings.get().auto_refresh
                        on:change=on_auto_refresh
                    />
                    "Auto-refresh"
                </label>
                <label class="settings__row">
                    "Refresh interval"
                    <select
                        disabled=move || !settings.get().auto_refresh
                        on:change=on_interval
                    >
                        {interval_options}
                    </select>
                </label>
                <label class="settings__row">
                    "Theme"
                    <select on:change=on_theme>{theme_options}</select>
                </label>
            </section>
        </div>
    }
}
