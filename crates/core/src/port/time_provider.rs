// Clock Port - a Job's timestamp is taken once at assembly

/// Source of the submission timestamp
pub trait TimeProvider: Send + Sync {
    /// Milliseconds since epoch
    fn now_millis(&self) -> i64;
}

/// Wall clock
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Frozen clock for deterministic directory names
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeProvider(pub i64);

impl TimeProvider for FixedTimeProvider {
    fn now_millis(&self) -> i64 {
        self.0
    }
}
