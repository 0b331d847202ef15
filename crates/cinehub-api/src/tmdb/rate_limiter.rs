//! TMDB request pacing.

use std::time::{Duration, Instant};

/// Default minimum interval between requests (~40 req/s).
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(25);

/// Spaces requests at least `min_interval` apart.
///
/// Callers reserve a slot while holding the lock and sleep after
/// releasing it, so concurrent requests (e.g. every season of a series)
/// queue up without serializing on the mutex.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbRateLimiter {
    /// Minimum interval between requests.
    min_interval: Duration,
    /// Earliest instant the next request may start.
    next_slot: Option<Instant>,
}

impl TmdbRateLimiter {
    /// Creates a limiter with the given minimum interval.
    pub(crate) const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: None,
        }
    }

    /// Creates a limiter with the default interval (25ms).
    pub(crate) const fn default_interval() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }

    /// Reserves the next request slot at `now` and returns how long the
    /// caller must wait before sending.
    pub(crate) fn reserve(&mut self, now: Instant) -> Duration {
        let slot = self.next_slot.map_or(now, |next| next.max(now));
        self.next_slot = slot.checked_add(self.min_interval);
        slot.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_reservation_is_immediate() {
        // Arrange
        let mut limiter = TmdbRateLimiter::new(Duration::from_secs(1));

        // Act
        let wait = limiter.reserve(Instant::now());

        // Assert
        assert_eq!(wait, Duration::ZERO);
    }

    #[test]
    fn test_back_to_back_reservations_queue_up() {
        // Arrange
        let mut limiter = TmdbRateLimiter::new(Duration::from_millis(50));
        let now = Instant::now();

        // Act
        let first = limiter.reserve(now);
        let second = limiter.reserve(now);
        let third = limiter.reserve(now);

        // Assert
        assert_eq!(first, Duration::ZERO);
        assert_eq!(second, Duration::from_millis(50));
        assert_eq!(third, Duration::from_millis(100));
    }

    #[test]
    fn test_idle_gap_resets_wait() {
        // Arrange
        let mut limiter = TmdbRateLimiter::new(Duration::from_millis(50));
        let start = Instant::now();
        limiter.reserve(start);

        // Act
        let later = start + Duration::from_millis(200);
        let wait = limiter.reserve(later);

        // Assert
        assert_eq!(wait, Duration::ZERO);
    }

    #[test]
    fn test_default_interval() {
        // Arrange & Act
        let limiter = TmdbRateLimiter::default_interval();

        // Assert
        assert_eq!(limiter.min_interval, Duration::from_millis(25));
    }
}
