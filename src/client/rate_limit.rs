use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time::{sleep_until, Duration, Instant};

/// Forced cool down between two requests made through the same [`Client`][super::Client] (or any
/// of its clones).
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    cooldown: Duration,
    // Use a tokio mutex for fairness and because waiting out the cool down would otherwise block
    // the whole executor thread.
    deadline: Arc<Mutex<Option<Instant>>>,
}

struct Guard<'a> {
    deadline: MutexGuard<'a, Option<Instant>>,
    cooldown: Duration,
}

impl<'a> Drop for Guard<'a> {
    fn drop(&mut self) {
        // Use a `Drop` impl so that updating the deadline is panic-safe.
        *self.deadline = Some(Instant::now() + self.cooldown);
    }
}

impl RateLimit {
    pub fn new(cooldown: Duration) -> Self {
        RateLimit {
            cooldown,
            deadline: Arc::default(),
        }
    }

    async fn lock(&self) -> Guard<'_> {
        loop {
            let now = Instant::now();

            let deadline = {
                let guard = self.deadline.lock().await;

                match &*guard {
                    Some(deadline) if now < *deadline => *deadline,
                    _ => {
                        return Guard {
                            deadline: guard,
                            cooldown: self.cooldown,
                        }
                    }
                }
            };

            tracing::trace!("cooling down for {:?}", deadline - now);
            sleep_until(deadline).await;
        }
    }

    pub async fn check<F, R>(&self, fut: F) -> R
    where
        F: Future<Output = R>,
    {
        let guard = self.lock().await;
        let result = fut.await;
        drop(guard);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn second_request_waits_for_the_cooldown() {
        let limit = RateLimit::new(Duration::from_millis(50));
        let start = Instant::now();

        limit.check(async {}).await;
        limit.check(async {}).await;

        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn zero_cooldown_never_waits() {
        let limit = RateLimit::new(Duration::ZERO);

        for i in 0..3 {
            assert_eq!(limit.clone().check(async move { i }).await, i);
        }
    }
}
