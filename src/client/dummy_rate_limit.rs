use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct RateLimit {}

impl RateLimit {
    pub fn new(_cooldown: Duration) -> Self {
        RateLimit {}
    }

    pub async fn check<F, R>(&self, fut: F) -> R
    where
        F: Future<Output = R>,
    {
        fut.await
    }
}
