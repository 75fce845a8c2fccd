use chrono::Utc;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::{
    config::latency::{pause, Latency},
    error::{AppError, AuthError},
    models::{
        identity::{Identity, RegisterData},
        poll::new_id,
    },
};

/// Session key under which the active identity is mirrored as JSON.
pub const SESSION_USER_KEY: &str = "user";

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "password";

/// Request-scoped account handling. Holds the active identity slot for the
/// current request and mirrors it into the caller's session.
pub struct AccountDirectory {
    session: Session,
    current: Option<Identity>,
    latency: Latency,
}

impl AccountDirectory {
    pub fn new(session: Session, latency: Latency) -> Self {
        Self {
            session,
            current: None,
            latency,
        }
    }

    /// Email format and password strength are not checked here, see
    /// `utils::validation`.
    pub async fn register(&mut self, data: RegisterData) -> Result<Identity, AppError> {
        if data.email.is_empty() || data.password.is_empty() || data.username.is_empty() {
            return Err(AppError::Validation(String::from(
                "Email, password, and username are required",
            )));
        }

        pause(self.latency.auth).await;

        let now = Utc::now();
        let identity = Identity {
            id: new_id(),
            email: data.email,
            username: data.username,
            first_name: data.first_name,
            last_name: data.last_name,
            avatar: None,
            created_at: now,
            updated_at: now,
        };

        self.remember(identity.clone()).await?;
        info!("Registered user {} ({})", identity.username, identity.id);
        Ok(identity)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<Identity, AppError> {
        pause(self.latency.auth).await;

        if email != DEMO_EMAIL || password != DEMO_PASSWORD {
            warn!("Rejected login for {}", email);
            return Err(AuthError::InvalidCredentials.into());
        }

        let identity = Identity::demo();
        self.remember(identity.clone()).await?;
        info!("Logged in user {}", identity.username);
        Ok(identity)
    }

    pub async fn logout(&mut self) -> Result<(), AppError> {
        self.current = None;
        self.session.remove_value(SESSION_USER_KEY).await?;
        Ok(())
    }

    /// In-memory slot first, then the session. A session entry that no longer
    /// deserializes is dropped and treated as absent.
    pub async fn current_identity(&mut self) -> Result<Option<Identity>, AppError> {
        if let Some(identity) = &self.current {
            return Ok(Some(identity.clone()));
        }

        match self.session.get::<Identity>(SESSION_USER_KEY).await {
            Ok(stored) => {
                self.current = stored.clone();
                Ok(stored)
            }
            Err(e) => {
                warn!("Discarding corrupt session identity: {:?}", e);
                self.session.remove_value(SESSION_USER_KEY).await?;
                Ok(None)
            }
        }
    }

    pub async fn is_authenticated(&mut self) -> Result<bool, AppError> {
        Ok(self.current_identity().await?.is_some())
    }

    async fn remember(&mut self, identity: Identity) -> Result<(), AppError> {
        self.session.insert(SESSION_USER_KEY, &identity).await?;
        self.current = Some(identity);
        Ok(())
    }
}
