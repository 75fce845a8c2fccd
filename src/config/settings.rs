use std::{env, fmt::Display, net::SocketAddr, str::FromStr};

use tracing::{info, warn};

use super::latency::Latency;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: SocketAddr,
    pub cors_origin: String,
    pub session_cookie_name: String,
    pub session_secure: bool,
    pub simulate_latency: bool,
    pub seed_demo_polls: bool,
    /// Origin used to build shareable poll links
    pub public_origin: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            server_addr: try_load("SERVER_ADDR", "0.0.0.0:9000"),
            cors_origin: try_load("CORS_ORIGIN", "http://localhost:3000"),
            session_cookie_name: try_load("SESSION_COOKIE_NAME", "poll_session"),
            session_secure: try_load("SESSION_SECURE", "false"),
            simulate_latency: try_load("SIMULATE_LATENCY", "false"),
            seed_demo_polls: try_load("SEED_DEMO_POLLS", "true"),
            public_origin: env::var("PUBLIC_ORIGIN").ok(),
        }
    }

    pub fn latency(&self) -> Latency {
        if self.simulate_latency {
            Latency::simulated()
        } else {
            Latency::none()
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_addr: SocketAddr::from(([0, 0, 0, 0], 9000)),
            cors_origin: String::from("http://localhost:3000"),
            session_cookie_name: String::from("poll_session"),
            session_secure: false,
            simulate_latency: false,
            seed_demo_polls: true,
            public_origin: None,
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    parse_or_default(key, &raw, default)
}

fn parse_or_default<T: FromStr>(key: &str, raw: &str, default: &str) -> T
where
    T::Err: Display,
{
    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        match default.parse() {
            Ok(value) => value,
            Err(_) => unreachable!("default for {key} must parse"),
        }
    })
}
