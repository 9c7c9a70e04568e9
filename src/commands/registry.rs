use tauri_specta::collect_commands;

// Import all command modules
use crate::modules::{
    catalog::commands::*, favorites::commands::*, navigation::commands::*, playback::commands::*,
};

/// Single source of truth for all Tauri commands
/// Keeps the specta bindings and `tauri::generate_handler!` in sync
pub fn get_all_commands() -> tauri_specta::Commands<tauri::Wry> {
    collect_commands![
        // Favorites commands
        is_favorite,
        toggle_favorite,
        get_favorites,
        clear_favorites,
        // Catalog commands
        get_home_feed,
        get_trending,
        get_popular,
        get_top_rated,
        get_upcoming,
        search_movies,
        get_movie_details,
        get_genres,
        discover_movies,
        // Player commands
        open_player,
        get_player_snapshot,
        report_player_loaded,
        report_player_error,
        report_player_position,
        seek_player,
        select_player_source,
        select_player_quality,
        close_player,
        // Navigation commands
        resolve_route,
    ]
}

/// Generate the handler list with all commands imported
#[macro_export]
macro_rules! generate_handler_list {
    () => {{
        use $crate::modules::{
            catalog::commands::*, favorites::commands::*, navigation::commands::*,
            playback::commands::*,
        };

        tauri::generate_handler![
            // Favorites commands
            is_favorite,
            toggle_favorite,
            get_favorites,
            clear_favorites,
            // Catalog commands
            get_home_feed,
            get_trending,
            get_popular,
            get_top_rated,
            get_upcoming,
            search_movies,
            get_movie_details,
            get_genres,
            discover_movies,
            // Player commands
            open_player,
            get_player_snapshot,
            report_player_loaded,
            report_player_error,
            report_player_position,
            seek_player,
            select_player_source,
            select_player_quality,
            close_player,
            // Navigation commands
            resolve_route,
        ]
    }};
}
