//! Scoped wall-clock timing.

use std::time::Instant;

/// Records the time between its creation and its drop into a buffer.
///
/// The sample is pushed in `Drop`, so an iteration that bails out early with
/// `?` is still measured.
pub struct TimingGuard<'a> {
    buffer: &'a mut Vec<f64>,
    start: Instant,
}

/// Start timing; the elapsed seconds are appended to `buffer` when the guard drops
pub fn track_infer_time(buffer: &mut Vec<f64>) -> TimingGuard<'_> {
    TimingGuard {
        buffer,
        start: Instant::now(),
    }
}

impl Drop for TimingGuard<'_> {
    fn drop(&mut self) {
        self.buffer.push(self.start.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_guard_appends_on_drop() {
        let mut buffer = Vec::new();
        {
            let _timer = track_infer_time(&mut buffer);
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(buffer.len(), 1);
        assert!(buffer[0] >= 0.005);
    }

    #[test]
    fn test_guard_records_failed_iteration() {
        fn failing(buffer: &mut Vec<f64>) -> Result<(), String> {
            let _timer = track_infer_time(buffer);
            let send: Result<(), String> = Err("connection refused".to_string());
            send?;
            Ok(())
        }

        let mut buffer = Vec::new();
        assert!(failing(&mut buffer).is_err());
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_samples_accumulate_in_order() {
        let mut buffer = vec![1.0];
        for _ in 0..3 {
            let _timer = track_infer_time(&mut buffer);
        }
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer[0], 1.0);
        assert!(buffer[1..].iter().all(|&s| s >= 0.0 && s < 1.0));
    }
}
