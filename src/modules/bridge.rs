// Navigation state bridge - relays webview lifecycle callbacks into
// NavigationState and publishes snapshots to the toolbar webview.

use std::sync::Mutex;

use tauri::{AppHandle, Emitter};

use crate::modules::navigation::{NavigationState, SessionHistory};

pub const NAVIGATION_STATE_EVENT: &str = "navigation-state";
const TOOLBAR_WEBVIEW: &str = "main";

#[derive(Default)]
pub struct NavigationBridge {
    state: Mutex<NavigationState>,
    history: Mutex<SessionHistory>,
}

impl NavigationBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_load_started(&self, app: &AppHandle, url: &str) {
        let snapshot = {
            let mut history = self.history.lock().unwrap();
            history.visit(url);
            let mut state = self.state.lock().unwrap();
            state.apply_started(history.status());
            state.clone()
        };
        self.publish(app, snapshot);
    }

    pub fn page_load_finished(&self, app: &AppHandle) {
        let snapshot = {
            let history = self.history.lock().unwrap();
            let mut state = self.state.lock().unwrap();
            state.apply_finished(history.status());
            state.clone()
        };
        self.publish(app, snapshot);
    }

    pub fn page_load_failed(&self, app: &AppHandle) {
        let snapshot = {
            let history = self.history.lock().unwrap();
            let mut state = self.state.lock().unwrap();
            state.apply_failed(history.status());
            state.clone()
        };
        self.publish(app, snapshot);
    }

    pub fn progress_changed(&self, app: &AppHandle, progress: f64) {
        let snapshot = {
            let mut state = self.state.lock().unwrap();
            state.apply_progress(progress);
            state.clone()
        };
        self.publish(app, snapshot);
    }

    pub fn snapshot(&self) -> NavigationState {
        self.state.lock().unwrap().clone()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.lock().unwrap().can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.lock().unwrap().can_go_forward()
    }

    pub fn current_url(&self) -> Option<String> {
        self.history.lock().unwrap().current().map(str::to_string)
    }

    // Lifecycle callbacks can arrive on a webview thread; hop onto the main
    // thread before the toolbar sees the update.
    fn publish(&self, app: &AppHandle, snapshot: NavigationState) {
        let app_for_emit = app.clone();
        let hopped = app.run_on_main_thread(move || {
            if let Err(e) = app_for_emit.emit_to(TOOLBAR_WEBVIEW, NAVIGATION_STATE_EVENT, snapshot) {
                eprintln!("[Navigation] Failed to publish state: {}", e);
            }
        });
        if let Err(e) = hopped {
            eprintln!("[Navigation] Failed to reach main thread: {}", e);
        }
    }
}
