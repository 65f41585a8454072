use log::{debug, log_enabled, Level};
use web_time::{Duration, Instant};

/// Utility struct to measure the time taken by a scope
/// and log it when the struct is dropped.
/// Usage:
/// ```
/// use hearmeout_util::profile::Measure;
/// {
///     let _measure = Measure::new("Resampled signal".to_string());
///     // Some operation to measure
/// }
/// ```
/// When the scope ends, the time taken by the operation will be logged
/// at debug level.
pub struct Measure(String, Instant);

impl Measure {
    pub fn new(message: String) -> Self {
        Measure(message, Instant::now())
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.1.elapsed()
    }
}

impl Drop for Measure {
    fn drop(&mut self) {
        if log_enabled!(Level::Debug) {
            debug!("{} in {:?}", self.0, self.1.elapsed());
        }
    }
}
