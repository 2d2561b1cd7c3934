use std::time::Duration;

use tokio::time::sleep;

/// Fixed pause between order submissions
///
/// The pause starts once the previous call has returned, so a slow
/// submission never eats into it. A zero delay disables pacing.
#[derive(Debug, Clone, Copy)]
pub struct OrderPacer {
    delay: Duration,
}

impl OrderPacer {
    pub fn fixed_delay(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_zero_delay_never_waits() {
        let pacer = OrderPacer::fixed_delay(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..10 {
            pacer.pause().await;
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_every_pause_waits_full_delay() {
        let pacer = OrderPacer::fixed_delay(Duration::from_millis(50));
        for _ in 0..2 {
            let start = Instant::now();
            pacer.pause().await;
            assert!(start.elapsed() >= Duration::from_millis(50));
        }
        assert_eq!(pacer.delay(), Duration::from_millis(50));
    }
}
