//! StreamView Player - composition root binary.

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use streamview_player::infrastructure::{catalog, PlayerConfig};

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        // Missing .env is fine; variables may come from the shell.
        let dotenv = dotenvy::dotenv();

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "streamview_player=debug,dioxus=info".into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .init();

        if let Ok(path) = dotenv {
            tracing::debug!("Loaded environment from {}", path.display());
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    tracing::info!("Starting StreamView Player");

    // No process environment in the browser
    #[cfg(target_arch = "wasm32")]
    let config = PlayerConfig::default();
    #[cfg(not(target_arch = "wasm32"))]
    let config = PlayerConfig::from_env();

    let catalog = catalog::resolve_catalog(&config);
    tracing::info!(
        "{} content items, stream hosts: {}",
        catalog.len(),
        config.stream_hosts.iter().collect::<Vec<_>>().join(", ")
    );

    dioxus::LaunchBuilder::new()
        .with_context(config)
        .with_context(catalog)
        .launch(streamview_player::app);
}
