// Favorites surface - Tauri commands plus change events so the toolbar star
// and the favorites panel stay in sync with the store.

use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager, State};
use url::Url;

use crate::favorites_store::FavoriteItem;
use crate::state::AppState;

pub const FAVORITES_CHANGED_EVENT: &str = "favorites-changed";
const TOOLBAR_WEBVIEW: &str = "main";
const CONTENT_WEBVIEW: &str = "content";

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesPayload {
    pub items: Vec<FavoriteItem>,
    pub current_is_favorite: bool,
}

/// Title shown for a favorited page: the document title when one was
/// reported, otherwise the page's host, otherwise the raw URL.
fn display_title(title: Option<&str>, url: &str) -> String {
    if let Some(t) = title {
        if !t.trim().is_empty() {
            return t.trim().to_string();
        }
    }
    if let Ok(parsed) = Url::parse(url) {
        if let Some(host) = parsed.host_str() {
            return host.to_string();
        }
    }
    url.to_string()
}

fn current_url(app: &AppHandle) -> Option<String> {
    let webview = app.get_webview(CONTENT_WEBVIEW)?;
    webview.url().ok().map(|u| u.to_string())
}

pub fn emit_favorites_changed(app: &AppHandle, state: &AppState) {
    let payload = FavoritesPayload {
        items: state.favorites.items(),
        current_is_favorite: state.favorites.is_favorite(current_url(app).as_deref()),
    };
    if let Err(e) = app.emit_to(TOOLBAR_WEBVIEW, FAVORITES_CHANGED_EVENT, payload) {
        eprintln!("[Favorites] Failed to emit update: {}", e);
    }
}

/// Star-button entry point. Returns whether the current page is a favorite
/// after the call. With no loaded page this is a no-op.
#[tauri::command]
pub fn toggle_favorite(app: AppHandle, state: State<AppState>) -> Result<bool, String> {
    let url = match current_url(&app) {
        Some(url) => url,
        None => return Ok(false),
    };

    let title = state.current_title.lock().map_err(|e| e.to_string())?.clone();
    let now_favorite = state.favorites.toggle(&display_title(title.as_deref(), &url), &url);

    println!(
        "[Favorites] {} {}",
        if now_favorite { "Added" } else { "Removed" },
        url
    );
    emit_favorites_changed(&app, &state);
    Ok(now_favorite)
}

#[tauri::command]
pub fn list_favorites(state: State<AppState>) -> Vec<FavoriteItem> {
    state.favorites.items()
}

#[tauri::command]
pub fn current_page_is_favorite(app: AppHandle, state: State<AppState>) -> bool {
    state.favorites.is_favorite(current_url(&app).as_deref())
}

/// Deletes favorites by position in the list the panel is showing.
#[tauri::command]
pub fn remove_favorites(
    app: AppHandle,
    state: State<AppState>,
    indices: Vec<usize>,
) -> Result<(), String> {
    if state.favorites.remove_at(&indices) {
        emit_favorites_changed(&app, &state);
    }
    Ok(())
}

/// Navigates the content webview to a favorite chosen in the panel.
#[tauri::command]
pub fn open_favorite(app: AppHandle, url: String) -> Result<(), String> {
    let parsed = Url::parse(&url).map_err(|e| e.to_string())?;
    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(format!("refusing to open {} URL", scheme));
    }

    if let Some(webview) = app.get_webview(CONTENT_WEBVIEW) {
        let js = format!("window.location.href = '{}'", parsed);
        webview.eval(&js).map_err(|e| e.to_string())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("Movie A"), "https://site/x", "Movie A")]
    #[case(Some("  Movie A  "), "https://site/x", "Movie A")]
    #[case(Some(""), "https://site/x", "site")]
    #[case(Some("   "), "https://site/x", "site")]
    #[case(None, "https://site/x", "site")]
    #[case(None, "not a url", "not a url")]
    fn display_title_falls_back(
        #[case] title: Option<&str>,
        #[case] url: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(display_title(title, url), expected);
    }
}
