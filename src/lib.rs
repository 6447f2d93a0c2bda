// CineView Library Entry Point
// Exposes all modules so they can be imported by main.rs and tested
// independently, and hosts the Tauri builder shared by desktop and mobile.

use std::sync::{Arc, Mutex};

use tauri::menu::{MenuBuilder, MenuItemBuilder, PredefinedMenuItem, SubmenuBuilder};
use tauri::webview::PageLoadEvent;
use tauri::{
    AppHandle, Emitter, Manager, PhysicalPosition, PhysicalSize, State, WebviewBuilder, WebviewUrl,
    Window,
};
use tauri_plugin_clipboard_manager::ClipboardExt;
use url::Url;

pub mod content_filter;
pub mod favorites_store;

// Shared state
pub mod state;

// Pure logic modules and command surfaces
pub mod modules;

use crate::favorites_store::FavoritesStore;
use crate::modules::bridge::NavigationBridge;
use crate::modules::favorites;
use crate::modules::navigation::NavigationState;
use crate::state::AppState;

/// The one site this shell exists for.
const HOME_URL: &str = "https://hdrezka.ag/";

/// Fixed per build; the site serves its desktop layout to this identity.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15";

const MAIN_WINDOW: &str = "main";
const CONTENT_WEBVIEW: &str = "content";
const TOOLBAR_HEIGHT_LOGICAL: f64 = 56.0;

/// Where the content webview should point at startup. An unparseable home
/// URL falls back to the bundled static page instead of loading anything.
fn startup_url() -> WebviewUrl {
    match Url::parse(HOME_URL) {
        Ok(home) => WebviewUrl::External(home),
        Err(e) => {
            eprintln!("[Shell] Invalid home URL {}: {}, showing fallback page", HOME_URL, e);
            WebviewUrl::App("fallback.html".into())
        }
    }
}

#[tauri::command]
fn go_back(app: AppHandle, state: State<AppState>) {
    if !state.bridge.can_go_back() {
        return;
    }
    if let Some(webview) = app.get_webview(CONTENT_WEBVIEW) {
        let _ = webview.eval("window.history.back()");
    }
}

#[tauri::command]
fn go_forward(app: AppHandle, state: State<AppState>) {
    if !state.bridge.can_go_forward() {
        return;
    }
    if let Some(webview) = app.get_webview(CONTENT_WEBVIEW) {
        let _ = webview.eval("window.history.forward()");
    }
}

#[tauri::command]
fn reload(app: AppHandle) {
    if let Some(webview) = app.get_webview(CONTENT_WEBVIEW) {
        let _ = webview.eval("window.location.reload()");
    }
}

#[tauri::command]
fn go_home(app: AppHandle) {
    if let Some(webview) = app.get_webview(CONTENT_WEBVIEW) {
        let js = format!("window.location.href = '{}'", HOME_URL);
        let _ = webview.eval(&js);
    }
}

/// Initial pull for the toolbar; later updates arrive as events.
#[tauri::command]
fn get_navigation_state(state: State<AppState>) -> NavigationState {
    state.bridge.snapshot()
}

#[tauri::command]
fn get_current_url(app: AppHandle) -> Option<String> {
    if let Some(webview) = app.get_webview(CONTENT_WEBVIEW) {
        webview.url().ok().map(|u| u.to_string())
    } else {
        None
    }
}

#[tauri::command]
fn copy_current_url(app: AppHandle) -> Result<(), String> {
    if let Some(webview) = app.get_webview(CONTENT_WEBVIEW) {
        if let Ok(url) = webview.url() {
            app.clipboard()
                .write_text(url.to_string())
                .map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}

fn build_menu(app: &tauri::App) -> tauri::Result<()> {
    let app_menu = SubmenuBuilder::new(app, "CineView")
        .item(&PredefinedMenuItem::about(app, Some("About CineView"), None)?)
        .separator()
        .item(&PredefinedMenuItem::quit(app, Some("Quit CineView"))?)
        .build()?;

    let view_menu = SubmenuBuilder::new(app, "View")
        .item(&MenuItemBuilder::with_id("reload", "Reload Page").accelerator("CmdOrCtrl+R").build(app)?)
        .item(&MenuItemBuilder::with_id("go_home", "Home").accelerator("CmdOrCtrl+Shift+H").build(app)?)
        .build()?;

    let history_menu = SubmenuBuilder::new(app, "History")
        .item(&MenuItemBuilder::with_id("go_back", "Back").accelerator("CmdOrCtrl+[").build(app)?)
        .item(&MenuItemBuilder::with_id("go_forward", "Forward").accelerator("CmdOrCtrl+]").build(app)?)
        .build()?;

    let favorites_menu = SubmenuBuilder::new(app, "Favorites")
        .item(&MenuItemBuilder::with_id("toggle_favorite", "Favorite This Page").accelerator("CmdOrCtrl+D").build(app)?)
        .item(&MenuItemBuilder::with_id("show_favorites", "Show Favorites").accelerator("CmdOrCtrl+Shift+O").build(app)?)
        .build()?;

    let menu = MenuBuilder::new(app)
        .items(&[&app_menu, &view_menu, &history_menu, &favorites_menu])
        .build()?;
    app.set_menu(menu)?;

    let handle = app.handle().clone();
    app.on_menu_event(move |_app_handle, event| {
        let id = event.id().0.as_str();
        match id {
            "reload" => reload(handle.clone()),
            "go_home" => go_home(handle.clone()),
            "go_back" => go_back(handle.clone(), handle.state()),
            "go_forward" => go_forward(handle.clone(), handle.state()),
            "toggle_favorite" => {
                let _ = favorites::toggle_favorite(handle.clone(), handle.state());
            }
            "show_favorites" => {
                if let Some(win) = handle.get_window(MAIN_WINDOW) {
                    let _ = win.emit("show-favorites", ());
                }
            }
            _ => {}
        }
    });

    Ok(())
}

fn setup_content_webview(app: &tauri::App) -> tauri::Result<()> {
    let main_window: Window = app.get_window(MAIN_WINDOW).expect("main window missing");

    let physical_size = main_window.inner_size()?;
    let scale_factor = main_window.scale_factor()?;
    let toolbar_height_physical = (TOOLBAR_HEIGHT_LOGICAL * scale_factor) as u32;

    let content_y = toolbar_height_physical;
    let content_height = physical_size
        .height
        .saturating_sub(toolbar_height_physical)
        .max(100);

    let bridge = app.state::<AppState>().bridge.clone();

    let webview_builder = WebviewBuilder::new(CONTENT_WEBVIEW, startup_url())
        .user_agent(USER_AGENT)
        // Both filter scripts run at document start on every load.
        .initialization_script(&content_filter::network_blocker_script())
        .initialization_script(content_filter::cosmetic_script())
        .on_navigation(|url: &Url| {
            if content_filter::is_blocked_request(url.as_str()) {
                println!("[Filter] Blocked navigation to {}", url);
                return false;
            }
            true
        })
        .on_document_title_changed(|webview, title| {
            let state = webview.app_handle().state::<AppState>();
            if let Ok(mut current) = state.current_title.lock() {
                *current = Some(title);
            }
        })
        .on_page_load(move |webview, payload| {
            let app = webview.app_handle();
            match payload.event() {
                PageLoadEvent::Started => {
                    bridge.page_load_started(app, payload.url().as_str());
                }
                PageLoadEvent::Finished => {
                    bridge.page_load_finished(app);
                    // The star reflects whichever page we landed on.
                    let state = app.state::<AppState>();
                    favorites::emit_favorites_changed(app, &state);
                }
            }
        });

    let _content_webview = main_window.add_child(
        webview_builder,
        PhysicalPosition::new(0, content_y as i32),
        PhysicalSize::new(physical_size.width, content_height),
    )?;

    // Keep the content webview glued below the toolbar on resize.
    let main_window_clone = main_window.clone();
    let handle = app.handle().clone();
    main_window.on_window_event(move |event| {
        if let tauri::WindowEvent::Resized(new_physical_size) = event {
            let scale = main_window_clone.scale_factor().unwrap_or(1.0);
            let toolbar_physical = (TOOLBAR_HEIGHT_LOGICAL * scale) as u32;
            let content_h = new_physical_size
                .height
                .saturating_sub(toolbar_physical)
                .max(100);

            if let Some(wv) = handle.get_webview(CONTENT_WEBVIEW) {
                let _ = wv.set_bounds(tauri::Rect {
                    position: tauri::Position::Physical(PhysicalPosition::new(
                        0,
                        toolbar_physical as i32,
                    )),
                    size: tauri::Size::Physical(PhysicalSize::new(
                        new_physical_size.width,
                        content_h,
                    )),
                });
            }
        }
    });

    Ok(())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            if let Some(win) = app.get_window(MAIN_WINDOW) {
                let _ = win.set_focus();
            }
        }))
        .plugin(tauri_plugin_clipboard_manager::init())
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            let app_data_dir = app
                .path()
                .app_data_dir()
                .expect("Failed to get app data dir");
            app.manage(AppState {
                favorites: Arc::new(FavoritesStore::new(app_data_dir)),
                bridge: Arc::new(NavigationBridge::new()),
                current_title: Mutex::new(None),
            });

            build_menu(app)?;
            setup_content_webview(app)?;

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            go_back,
            go_forward,
            reload,
            go_home,
            get_navigation_state,
            get_current_url,
            copy_current_url,
            favorites::toggle_favorite,
            favorites::list_favorites,
            favorites::current_page_is_favorite,
            favorites::remove_favorites,
            favorites::open_favorite
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
