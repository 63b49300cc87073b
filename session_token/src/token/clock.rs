use chrono::Utc;

/// Wall-clock source in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_reads_epoch_millis() {
        // 2020-09-13T12:26:40Z; seconds instead of millis would be far below this
        assert!(SystemClock.now_millis() > 1_600_000_000_000);
    }
}
