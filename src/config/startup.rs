use std::sync::Arc;

use super::settings::Settings;
use crate::repositories::poll_registry::PollRegistry;

/// Shared handler context. Polls live in the registry; identities live in
/// each caller's session.
#[derive(Clone)]
pub struct AppState {
    pub polls: Arc<PollRegistry>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let latency = settings.latency();
        let polls = if settings.seed_demo_polls {
            PollRegistry::with_demo_polls(latency)
        } else {
            PollRegistry::new(latency)
        };

        Self {
            polls: Arc::new(polls),
            settings: Arc::new(settings),
        }
    }
}
