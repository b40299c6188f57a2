//! Headless demo: every line read from stdin is treated as a fresh text
//! selection and the tooltip is rendered into the log. `/key <value>` stores
//! a new API key and `/key` alone deletes it.
//!
//! ```text
//! RUST_LOG=debug cargo run
//! ```

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use select_translate_lib::api::commands::settings::{delete_api_key, save_api_key};
use select_translate_lib::shared::settings::AppSettings;
use select_translate_lib::shared::types::ViewportSize;
use select_translate_lib::{
    init_logging, EventBus, FileSettingsStore, LogSurface, PageEvent, SelectionSession,
    StaticSelection, TooltipConfig, TooltipPresenter,
};

const VIEWPORT: ViewportSize = ViewportSize {
    width: 1280.0,
    height: 800.0,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let store = Arc::new(FileSettingsStore::default_location()?);
    let settings = match store.load().await {
        Ok(settings) => settings,
        Err(e) => {
            warn!(error = %e, "failed to load settings, using defaults");
            AppSettings::default()
        }
    };
    info!(path = %store.path().display(), target_lang = %settings.preferences.target_lang, "settings loaded");

    let config = TooltipConfig::translation();
    let settle = config.selection_settle_delay;
    let presenter = TooltipPresenter::new(LogSurface::new(VIEWPORT), config);
    let source = Arc::new(StaticSelection::new());
    let session = SelectionSession::new(
        presenter,
        source.clone(),
        store.clone(),
        &settings.preferences.target_lang,
    );
    session.init_translator().await;

    let bus = EventBus::new();
    let _listener = session.spawn_settings_listener(&bus);

    info!("type text and press enter to select it; `/key <value>` sets the API key; Ctrl-D quits");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(rest) = line.strip_prefix("/key") {
            let result = if rest.trim().is_empty() {
                delete_api_key(store.as_ref(), &bus).await
            } else {
                save_api_key(store.as_ref(), &bus, rest).await
            };
            if let Err(e) = result {
                warn!(error = %e, "API key not changed");
            }
            continue;
        }

        source.set(line);
        session.handle_event(&PageEvent::PointerMove {
            x: VIEWPORT.width / 2.0,
            y: VIEWPORT.height / 2.0,
        });
        session.handle_event(&PageEvent::PointerUp);
        tokio::time::sleep(settle * 2).await;
    }

    session.handle_event(&PageEvent::KeyDown {
        key: "Escape".to_string(),
    });
    tokio::time::sleep(session.presenter().config().animation_delay * 2).await;
    Ok(())
}
