//! App-wide context: configuration and the REST backend.

use api::{ApiConfig, HttpBackend};
use dioxus::prelude::*;
use domain::QuestBoxConfig;

/// Shared handles every view can reach through context.
#[derive(Clone, Debug)]
pub struct AppContext {
    pub config: QuestBoxConfig,
    /// `None` when no usable API base URL could be resolved.
    pub backend: Option<HttpBackend>,
}

pub fn use_app() -> AppContext {
    use_context::<AppContext>()
}

/// Build the HTTP backend from `QUEST_API_URL` or the configured base URL.
pub fn make_backend(config: &QuestBoxConfig) -> Option<HttpBackend> {
    match ApiConfig::from_env(&config.api.base_url) {
        Ok(api) => {
            tracing::info!("Quest API at {}", api.base_url);
            Some(HttpBackend::new(api))
        }
        Err(e) => {
            tracing::error!("Failed to configure quest API: {}", e);
            None
        }
    }
}

/// Wrap the app with this to provide [`AppContext`].
#[component]
pub fn QuestBoxProvider(config: QuestBoxConfig, children: Element) -> Element {
    use_context_provider(|| AppContext {
        backend: make_backend(&config),
        config: config.clone(),
    });

    rsx! {
        {children}
    }
}
