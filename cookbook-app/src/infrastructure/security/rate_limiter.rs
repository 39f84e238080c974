use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

const MAX_WRITES_PER_MINUTE: u32 = 10;
const MAX_WRITES_PER_HOUR: u32 = 100;
const CLEANUP_INTERVAL_SECS: u64 = 300;

#[derive(Clone)]
struct WriteRecord {
    minute_count: u32,
    hour_count: u32,
    minute_start: Instant,
    hour_start: Instant,
}

impl Default for WriteRecord {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            minute_count: 0,
            hour_count: 0,
            minute_start: now,
            hour_start: now,
        }
    }
}

/// Per-user throttle on writes (new recipes, edits, reviews).
#[derive(Clone)]
pub struct RateLimiter {
    writes: Arc<DashMap<String, WriteRecord>>,
    last_cleanup: Arc<std::sync::Mutex<Instant>>,
    per_minute: u32,
    per_hour: u32,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_limits(MAX_WRITES_PER_MINUTE, MAX_WRITES_PER_HOUR)
    }

    pub fn with_limits(per_minute: u32, per_hour: u32) -> Self {
        Self {
            writes: Arc::new(DashMap::new()),
            last_cleanup: Arc::new(std::sync::Mutex::new(Instant::now())),
            per_minute,
            per_hour,
        }
    }

    pub fn check_rate_limit(&self, user_id: &str) -> Result<(), RateLimitError> {
        self.maybe_cleanup();

        let now = Instant::now();
        let mut record = self.writes.entry(user_id.to_string()).or_default();

        if now.duration_since(record.minute_start) > Duration::from_secs(60) {
            record.minute_count = 0;
            record.minute_start = now;
        }

        if now.duration_since(record.hour_start) > Duration::from_secs(3600) {
            record.hour_count = 0;
            record.hour_start = now;
        }

        if record.minute_count >= self.per_minute {
            let wait_secs = 60u64.saturating_sub(now.duration_since(record.minute_start).as_secs());
            tracing::warn!("User {} hit the per-minute write limit", user_id);
            return Err(RateLimitError::TooManyPerMinute(wait_secs));
        }

        if record.hour_count >= self.per_hour {
            let wait_secs =
                3600u64.saturating_sub(now.duration_since(record.hour_start).as_secs());
            tracing::warn!("User {} hit the hourly write limit", user_id);
            return Err(RateLimitError::TooManyPerHour(wait_secs));
        }

        record.minute_count += 1;
        record.hour_count += 1;

        Ok(())
    }

    fn maybe_cleanup(&self) {
        let Ok(mut last_cleanup) = self.last_cleanup.lock() else {
            return;
        };
        if last_cleanup.elapsed() > Duration::from_secs(CLEANUP_INTERVAL_SECS) {
            let now = Instant::now();
            self.writes
                .retain(|_, v| now.duration_since(v.hour_start) < Duration::from_secs(3600));
            *last_cleanup = now;
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateLimitError {
    #[error("too many writes this minute, retry in {0}s")]
    TooManyPerMinute(u64),
    #[error("too many writes this hour, retry in {0}s")]
    TooManyPerHour(u64),
}

impl RateLimitError {
    pub fn user_message(&self) -> String {
        match self {
            Self::TooManyPerMinute(secs) => {
                format!("Slow down a little! Try again in {} seconds.", secs)
            }
            Self::TooManyPerHour(secs) => {
                format!(
                    "You've reached the hourly limit. Try again in {} minutes.",
                    secs.div_ceil(60)
                )
            }
        }
    }

    pub fn retry_after_secs(&self) -> u64 {
        match self {
            Self::TooManyPerMinute(secs) | Self::TooManyPerHour(secs) => *secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minute_limit_is_per_user() {
        let limiter = RateLimiter::with_limits(2, 10);
        assert!(limiter.check_rate_limit("ana").is_ok());
        assert!(limiter.check_rate_limit("ana").is_ok());
        assert!(matches!(
            limiter.check_rate_limit("ana"),
            Err(RateLimitError::TooManyPerMinute(_))
        ));
        assert!(limiter.check_rate_limit("ben").is_ok());
    }

    #[test]
    fn test_hour_limit() {
        let limiter = RateLimiter::with_limits(10, 1);
        assert!(limiter.check_rate_limit("ana").is_ok());
        let err = limiter.check_rate_limit("ana").unwrap_err();
        assert!(matches!(err, RateLimitError::TooManyPerHour(_)));
        assert!(err.user_message().contains("minutes"));
    }
}
