#[cfg(feature = "desktop")]
pub mod commands;
pub mod modules;
pub mod shared;

use modules::{
    catalog::{CatalogService, MetadataProvider, TmdbAdapter},
    favorites::{FavoritesService, JsonFileKeyValueStore, KeyValueStore, MemoryKeyValueStore},
    playback::{
        HttpStreamingProvider, LocalStreamingCatalog, PlayerSessionRegistry, SourceResolver,
        StreamingProvider,
    },
};
use shared::AppConfig;
use std::path::PathBuf;
use std::sync::Arc;

/// Application services, wired from configuration
///
/// The desktop shell hands these to Tauri as managed state; headless callers
/// (tests, tools) can use them directly.
pub struct AppServices {
    pub favorites: Arc<FavoritesService>,
    pub catalog: Arc<CatalogService>,
    pub players: Arc<PlayerSessionRegistry>,
}

impl AppServices {
    /// Wire every service from `config`
    ///
    /// Favorites persist under `data_dir` (the configured directory wins);
    /// without any directory they only live in memory.
    pub fn build(config: &AppConfig, data_dir: Option<PathBuf>) -> Self {
        let store: Arc<dyn KeyValueStore> = match config.data_dir.clone().or(data_dir) {
            Some(dir) => {
                let store = JsonFileKeyValueStore::in_dir(&dir);
                log::info!("Favorites stored in {}", store.path().display());
                Arc::new(store)
            }
            None => {
                log::warn!("No data directory configured; favorites will not persist");
                Arc::new(MemoryKeyValueStore::new())
            }
        };

        let metadata: Arc<dyn MetadataProvider> = Arc::new(TmdbAdapter::new(config.tmdb.clone()));
        let catalog = CatalogService::new(metadata, config.tmdb.image_base_url.clone());

        let streaming: Arc<dyn StreamingProvider> = match &config.streaming_api_url {
            Some(url) => {
                log::info!("Streaming sources from {}", url);
                Arc::new(HttpStreamingProvider::new(url.clone()))
            }
            None => Arc::new(LocalStreamingCatalog::new()),
        };
        let resolver = SourceResolver::from_config(streaming, &config.playback);

        Self {
            favorites: Arc::new(FavoritesService::new(store)),
            catalog: Arc::new(catalog),
            players: Arc::new(PlayerSessionRegistry::new(
                Arc::new(resolver),
                config.playback.clone(),
            )),
        }
    }
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use commands::get_all_commands;
    use specta_typescript::Typescript;
    use tauri::Manager;
    use tauri_specta::Builder as SpectaBuilder;

    // Load environment variables
    dotenvy::dotenv().ok();

    let specta_builder = SpectaBuilder::<tauri::Wry>::new().commands(get_all_commands());

    #[cfg(debug_assertions)]
    if let Err(e) = specta_builder.export(Typescript::default(), "../src/types/bindings.ts") {
        eprintln!("Warning: Failed to export TypeScript bindings: {}", e);
    }

    tauri::Builder::default()
        .invoke_handler(crate::generate_handler_list!())
        .plugin(tauri_plugin_opener::init())
        .plugin(
            tauri_plugin_log::Builder::new()
                .clear_targets()
                .targets([tauri_plugin_log::Target::new(
                    tauri_plugin_log::TargetKind::Stdout,
                )])
                .level(log::LevelFilter::Debug)
                .format(|out, message, record| {
                    let target = record.target();

                    if let Some(rest) = target.strip_prefix("marquee_lib::modules::") {
                        // marquee_lib::modules::playback::... -> [LEVEL] [BACKEND] [playback] message
                        let module = rest.split("::").next().unwrap_or("");
                        out.finish(format_args!(
                            "[{}] [BACKEND] [{}] {}",
                            record.level(),
                            module,
                            message
                        ))
                    } else if target.starts_with("marquee_lib") {
                        out.finish(format_args!("[{}] [BACKEND] {}", record.level(), message))
                    } else if target.starts_with("webview:") {
                        // Frontend logs already carry their own prefix
                        out.finish(format_args!("[{}] {}", record.level(), message))
                    } else {
                        out.finish(format_args!(
                            "[{}] [{}] {}",
                            record.level(),
                            target,
                            message
                        ))
                    }
                })
                .build(),
        )
        .setup(move |app| {
            specta_builder.mount_events(app);

            let config = match AppConfig::from_env() {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Invalid configuration: {}", e);
                    return Err(e.into());
                }
            };

            let data_dir = app.path().app_data_dir().ok();
            let services = AppServices::build(&config, data_dir);

            // Manage state so commands can access services via `State<T>`
            app.manage(services.favorites);
            app.manage(services.catalog);
            app.manage(services.players);

            log::info!("Marquee backend ready");
            Ok(())
        })
        .run(tauri::generate_context!())
        .unwrap_or_else(|e| {
            eprintln!("Failed to run Tauri application: {}", e);
            std::process::exit(1);
        });
}
