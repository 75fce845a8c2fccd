use tower_sessions::{
    cookie::{time::Duration, SameSite},
    Expiry, MemoryStore, SessionManagerLayer,
};

use super::settings::Settings;

pub fn init_session(settings: &Settings) -> SessionManagerLayer<MemoryStore> {
    let session_store = MemoryStore::default();
    SessionManagerLayer::new(session_store)
        .with_name(settings.session_cookie_name.clone())
        .with_same_site(SameSite::Lax)
        .with_secure(settings.session_secure)
        .with_path("/")
        .with_expiry(Expiry::OnInactivity(Duration::seconds(3600)))
}
