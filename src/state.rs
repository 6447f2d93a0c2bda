// Shared state managed by Tauri, built once in setup and read by commands.

use std::sync::{Arc, Mutex};

use crate::favorites_store::FavoritesStore;
use crate::modules::bridge::NavigationBridge;

pub struct AppState {
    pub favorites: Arc<FavoritesStore>,
    pub bridge: Arc<NavigationBridge>,
    /// Last document title reported by the content webview. Used as the
    /// default name when the current page is favorited.
    pub current_title: Mutex<Option<String>>,
}
