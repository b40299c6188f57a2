pub mod api;
pub mod config;
pub mod core;
pub mod shared;

pub use crate::config::{TooltipConfig, TranslatorConfig};
pub use crate::core::selection::{PageEvent, SelectionSource, StaticSelection};
pub use crate::core::session::SelectionSession;
pub use crate::core::tooltip::{LogSurface, TooltipPresenter, TooltipState, TooltipSurface};
pub use crate::core::translator::{DeepSeekTranslator, TranslateError, Translator};
pub use crate::shared::emit::EventBus;
pub use crate::shared::settings::{FileSettingsStore, MemorySettingsStore, SettingsStore};
pub use crate::shared::{AppError, AppResult};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the
/// default `info` level. Safe to call more than once.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
