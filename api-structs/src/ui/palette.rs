//! Navigation palette opened with Ctrl+K.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationTarget {
    pub path: &'static str,
    pub label: &'static str,
    pub keys: &'static [&'static str],
}

pub const NAVIGATION_TARGETS: [NavigationTarget; 6] = [
    NavigationTarget {
        path: "/",
        label: "Dashboard",
        keys: &["d", "dashboard", "home"],
    },
    NavigationTarget {
        path: "/services",
        label: "Services",
        keys: &["s", "services"],
    },
    NavigationTarget {
        path: "/traces",
        label: "Traces",
        keys: &["t", "traces"],
    },
    NavigationTarget {
        path: "/logs",
        label: "Logs",
        keys: &["l", "logs"],
    },
    NavigationTarget {
        path: "/metrics",
        label: "Metrics",
        keys: &["m", "metrics"],
    },
    NavigationTarget {
        path: "/settings",
        label: "Settings",
        keys: &["settings", "config"],
    },
];

impl NavigationTarget {
    /// Blank queries match everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.label.to_lowercase().contains(&query)
            || self.keys.iter().any(|key| key.starts_with(query.as_str()))
    }
}

/// Open flag, typed query and highlighted entry of the palette.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteState {
    open: bool,
    query: String,
    highlighted: usize,
}

impl PaletteState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Opening always starts from a blank query.
    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            *self = Self {
                open: true,
                ..Self::default()
            };
        }
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.highlighted = 0;
    }

    pub fn matches(&self) -> Vec<&'static NavigationTarget> {
        NAVIGATION_TARGETS
            .iter()
            .filter(|target| target.matches(&self.query))
            .collect()
    }

    pub fn highlight_next(&mut self) {
        let count = self.matches().len();
        if self.highlighted + 1 < count {
            self.highlighted += 1;
        }
    }

    pub fn highlight_previous(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    /// Path to navigate to, closing the palette. `None` when nothing matches.
    pub fn confirm(&mut self) -> Option<&'static str> {
        let path = self.matches().get(self.highlighted).map(|target| target.path);
        if path.is_some() {
            self.close();
        }
        path
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn labels(state: &PaletteState) -> Vec<&'static str> {
        state.matches().iter().map(|t| t.label).collect()
    }

    #[test]
    fn query_matches_labels_and_keys() {
        let mut state = PaletteState::default();
        state.toggle();
        assert_eq!(labels(&state).len(), NAVIGATION_TARGETS.len());
        state.set_query("home");
        assert_eq!(labels(&state), vec!["Dashboard"]);
        state.set_query("  TR ");
        assert_eq!(labels(&state), vec!["Traces", "Metrics"]);
        state.set_query("conf");
        assert_eq!(labels(&state), vec!["Settings"]);
        state.set_query("xyz");
        assert!(state.matches().is_empty());
        assert_eq!(state.confirm(), None);
        assert!(state.is_open());
    }

    #[test]
    fn highlight_stays_within_matches() {
        let mut state = PaletteState::default();
        state.toggle();
        state.set_query("log");
        state.highlight_next();
        assert_eq!(state.highlighted(), 0);
        state.set_query("");
        state.highlight_previous();
        assert_eq!(state.highlighted(), 0);
        state.highlight_next();
        state.highlight_next();
        assert_eq!(state.confirm(), Some("/traces"));
        assert_eq!(state, PaletteState::default());
    }

    #[test]
    fn toggle_resets_the_query() {
        let mut state = PaletteState::default();
        state.toggle();
        state.set_query("metrics");
        state.toggle();
        assert!(!state.is_open());
        state.toggle();
        assert!(state.is_open());
        assert_eq!(state.query(), "");
    }
}
