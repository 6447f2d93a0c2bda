// Pure navigation state - no Tauri imports allowed.
// Mirrors the embedded view's load lifecycle into the toolbar's observable
// state, and tracks back/forward availability for an engine that does not
// report its own session history.

use serde::{Deserialize, Serialize};

/// Back/forward availability as reported by the embedded view.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewStatus {
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub is_loading: bool,
    pub progress: f64,
}

impl NavigationState {
    pub fn apply_started(&mut self, view: ViewStatus) {
        self.can_go_back = view.can_go_back;
        self.can_go_forward = view.can_go_forward;
        self.is_loading = true;
        self.progress = 0.0;
    }

    pub fn apply_finished(&mut self, view: ViewStatus) {
        self.can_go_back = view.can_go_back;
        self.can_go_forward = view.can_go_forward;
        self.is_loading = false;
        self.progress = 1.0;
    }

    /// A failed load just stops. Back/forward stay as the view reports them.
    pub fn apply_failed(&mut self, view: ViewStatus) {
        self.can_go_back = view.can_go_back;
        self.can_go_forward = view.can_go_forward;
        self.is_loading = false;
    }

    pub fn apply_progress(&mut self, progress: f64) {
        self.progress = progress.clamp(0.0, 1.0);
    }
}

/// Back/forward stacks reconciled from observed page loads.
///
/// The webview walks its own history when the shell evals
/// `history.back()`/`history.forward()`; all the shell sees is the page load
/// that follows. Each observed URL is matched against the stack tops to
/// classify it as a reload, a back-step, a forward-step, or a new visit.
#[derive(Debug, Default)]
pub struct SessionHistory {
    back: Vec<String>,
    current: Option<String>,
    forward: Vec<String>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visit(&mut self, url: &str) {
        if self.current.as_deref() == Some(url) {
            // Reload of the current page.
            return;
        }

        if self.back.last().map(String::as_str) == Some(url) {
            if let Some(cur) = self.current.take() {
                self.forward.push(cur);
            }
            self.current = self.back.pop();
            return;
        }

        if self.forward.last().map(String::as_str) == Some(url) {
            if let Some(cur) = self.current.take() {
                self.back.push(cur);
            }
            self.current = self.forward.pop();
            return;
        }

        if let Some(cur) = self.current.take() {
            self.back.push(cur);
        }
        self.current = Some(url.to_string());
        self.forward.clear();
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn status(&self) -> ViewStatus {
        ViewStatus {
            can_go_back: self.can_go_back(),
            can_go_forward: self.can_go_forward(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_state_is_idle() {
        let state = NavigationState::default();
        assert!(!state.can_go_back);
        assert!(!state.can_go_forward);
        assert!(!state.is_loading);
        assert_eq!(state.progress, 0.0);
    }

    #[test]
    fn started_resets_progress_and_marks_loading() {
        let mut state = NavigationState {
            progress: 1.0,
            ..Default::default()
        };
        state.apply_started(ViewStatus {
            can_go_back: true,
            can_go_forward: false,
        });

        assert!(state.is_loading);
        assert_eq!(state.progress, 0.0);
        assert!(state.can_go_back);
        assert!(!state.can_go_forward);
    }

    #[test]
    fn finished_completes_progress() {
        let mut state = NavigationState::default();
        state.apply_started(ViewStatus::default());
        state.apply_finished(ViewStatus {
            can_go_back: true,
            can_go_forward: true,
        });

        assert!(!state.is_loading);
        assert_eq!(state.progress, 1.0);
        assert!(state.can_go_back);
        assert!(state.can_go_forward);
    }

    #[test]
    fn failed_only_stops_loading() {
        let mut state = NavigationState::default();
        state.apply_started(ViewStatus {
            can_go_back: true,
            can_go_forward: false,
        });
        state.apply_progress(0.4);
        state.apply_failed(ViewStatus {
            can_go_back: true,
            can_go_forward: false,
        });

        assert!(!state.is_loading);
        assert_eq!(state.progress, 0.4);
        assert!(state.can_go_back);
    }

    #[rstest]
    #[case(-0.5, 0.0)]
    #[case(0.0, 0.0)]
    #[case(0.37, 0.37)]
    #[case(1.0, 1.0)]
    #[case(1.7, 1.0)]
    fn progress_is_clamped(#[case] raw: f64, #[case] expected: f64) {
        let mut state = NavigationState::default();
        state.apply_progress(raw);
        assert_eq!(state.progress, expected);
    }

    #[test]
    fn new_visits_build_back_stack() {
        let mut history = SessionHistory::new();
        history.visit("https://site/");
        assert!(!history.can_go_back());

        history.visit("https://site/a");
        history.visit("https://site/b");
        assert!(history.can_go_back());
        assert!(!history.can_go_forward());
        assert_eq!(history.current(), Some("https://site/b"));
    }

    #[test]
    fn back_and_forward_steps_are_recognized() {
        let mut history = SessionHistory::new();
        history.visit("https://site/");
        history.visit("https://site/a");

        // history.back() in the page surfaces as a load of the previous URL.
        history.visit("https://site/");
        assert_eq!(history.current(), Some("https://site/"));
        assert!(!history.can_go_back());
        assert!(history.can_go_forward());

        history.visit("https://site/a");
        assert_eq!(history.current(), Some("https://site/a"));
        assert!(history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn reload_changes_nothing() {
        let mut history = SessionHistory::new();
        history.visit("https://site/");
        history.visit("https://site/a");
        history.visit("https://site/a");

        assert_eq!(history.current(), Some("https://site/a"));
        assert!(history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn new_visit_clears_forward_stack() {
        let mut history = SessionHistory::new();
        history.visit("https://site/");
        history.visit("https://site/a");
        history.visit("https://site/"); // back
        assert!(history.can_go_forward());

        history.visit("https://site/b");
        assert!(!history.can_go_forward());
        assert!(history.can_go_back());
    }
}
