use leptos::logging::log;
use leptos::*;
use leptos_router::*;

mod api;
mod components;
mod dashboard;
mod datetime;
mod logs;
mod metrics;
mod palette;
mod refresh;
mod services;
mod settings;
mod storage;
mod toast;
mod trace;

use dashboard::Dashboard;
use logs::Logs;
use metrics::Metrics;
use palette::CommandPalette;
use services::{ServiceDetails, Services};
use settings::SettingsPage;
use toast::{provide_toasts, Toasts};
use trace::{TraceDetailsPage, TraceList};

/// Base URL of the telemetry API, without trailing slash.
pub const API_SERVER_URL_NO_TRAILING_SLASH: &str =
    match option_env!("API_SERVER_URL_NO_TRAILING_SLASH") {
        Some(url) => url,
        None => "/api",
    };

fn main() {
    _ = console_log::init();
    console_error_panic_hook::set_once();
    mount_to_body(|| view! { <App/> });
    log!("Loaded up!");
}

#[component]
pub fn App() -> impl IntoView {
    provide_toasts();
    settings::provide_settings();
    view! {
        <Router>
            <header>
                <nav class="navigation">
                    <A class="navigation__button" href="/" exact=true>"Dashboard"</A>
                    <A class="navigation__button" href="/traces">"Traces"</A>
                    <A class="navigation__button" href="/services">"Services"</A>
                    <A class="navigation__button" href="/logs">"Logs"</A>
                    <A class="navigation__button" href="/metrics">"Metrics"</A>
                    <A class="navigation__button" href="/settings">"Settings"</A>
                    <settings::ThemeToggle/>
                </nav>
            </header>
            <main class="main-grid">
                <Routes>
                    <Route path="/" view=Dashboard/>
                    <Route path="/traces" view=TraceList/>
                    <Route path="/traces/:trace_id" view=TraceDetailsPage/>
                    <Route path="/services" view=Services/>
                    <Route path="/services/:service_name" view=ServiceDetails/>
                    <Route path="/logs" view=Logs/>
                    <Route path="/metrics" view=Metrics/>
                    <Route path="/settings" view=SettingsPage/>
                    <Route path="/*any" view=NotFound/>
                </Routes>
            </main>
            <Toasts/>
            <CommandPalette/>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="placeholder">
            <p>"Page not found"</p>
            <A href="/">"Back to the dashboard"</A>
        </div>
    }
}
