mod audio;
mod commands;
mod error;
mod logger;
mod publisher;
mod security;
mod session;
mod state;
mod tts;

use publisher::ResourcePublisher;
use security::keystore::KeyStore;
use session::FileSessionStore;
use state::AppState;
use tauri::{
    menu::{MenuBuilder, MenuItemBuilder},
    tray::TrayIconBuilder,
    Manager,
};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    logger::init_file_logger();
    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::default().build())
        .manage(AppState::default())
        .manage(KeyStore::new())
        .setup(|app| {
            let data_dir = app.path().app_data_dir()?;
            app.manage(ResourcePublisher::new(data_dir.join("voiceovers")));
            app.manage(FileSessionStore::new(data_dir.join("session")));
            setup_tray(app)?;
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // App info
            commands::get_app_info,
            // Voiceover pipeline
            commands::voiceover::generate_voiceover,
            commands::voiceover::restore_voiceover,
            commands::voiceover::discard_voiceover,
            // Session persistence
            commands::session::save_session,
            commands::session::load_session,
            commands::session::clear_session,
            // Settings / API keys
            commands::settings::save_api_key,
            commands::settings::has_api_key,
            commands::settings::delete_api_key,
            commands::settings::sync_settings,
            commands::settings::debug_ui_event,
            commands::settings::check_provider_health,
            commands::settings::open_devtools,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

fn setup_tray(app: &tauri::App) -> Result<(), Box<dyn std::error::Error>> {
    let show_settings = MenuItemBuilder::with_id("settings", "Settings").build(app)?;
    let quit = MenuItemBuilder::with_id("quit", "Quit VoiceForge").build(app)?;

    let menu = MenuBuilder::new(app)
        .item(&show_settings)
        .separator()
        .item(&quit)
        .build()?;

    let _tray = TrayIconBuilder::new()
        .tooltip("VoiceForge — Ready")
        .menu(&menu)
        .on_menu_event(move |app: &tauri::AppHandle, event: tauri::menu::MenuEvent| {
            match event.id().as_ref() {
                "settings" => {
                    if let Some(window) = app.get_webview_window("main") {
                        let _ = window.show();
                        let _ = window.set_focus();
                    }
                }
                "quit" => {
                    app.exit(0);
                }
                _ => {}
            }
        })
        .build(app)?;

    Ok(())
}
