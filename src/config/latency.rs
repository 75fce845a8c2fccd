use std::time::Duration;

/// Artificial per-operation delays standing in for network latency.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Latency {
    pub list: Duration,
    pub get: Duration,
    pub create: Duration,
    pub vote: Duration,
    pub by_creator: Duration,
    pub close: Duration,
    pub auth: Duration,
}

impl Latency {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn simulated() -> Self {
        Latency {
            list: Duration::from_millis(500),
            get: Duration::from_millis(300),
            create: Duration::from_millis(800),
            vote: Duration::from_millis(500),
            by_creator: Duration::from_millis(400),
            close: Duration::from_millis(300),
            auth: Duration::from_millis(1000),
        }
    }
}

pub async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
