//! Live search statistics

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use seedmend_phrase::{format_duration, format_space};

/// Thread-safe search statistics
#[derive(Debug)]
pub struct SearchStats {
    /// Candidates run through the oracle
    pub candidates_tested: AtomicU64,
    /// Candidates that passed
    pub matches: AtomicU64,
    /// Size of the space being searched
    total: u128,
    start_time: Instant,
    /// Cleared to ask workers to stop early
    pub running: AtomicBool,
}

impl SearchStats {
    /// Create new stats for a space of `total` candidates
    pub fn new(total: u128) -> Arc<Self> {
        Arc::new(Self {
            candidates_tested: AtomicU64::new(0),
            matches: AtomicU64::new(0),
            total,
            start_time: Instant::now(),
            running: AtomicBool::new(true),
        })
    }

    pub fn add_tested(&self, count: u64) {
        self.candidates_tested.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_match(&self) {
        self.matches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_tested(&self) -> u64 {
        self.candidates_tested.load(Ordering::Relaxed)
    }

    pub fn total_matches(&self) -> u64 {
        self.matches.load(Ordering::Relaxed)
    }

    pub fn space_size(&self) -> u128 {
        self.total
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn candidates_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_tested() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Fraction of the space tested, 0.0..=1.0
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.total_tested() as f64 / self.total as f64).min(1.0)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Ask workers to stop
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// One-line progress string for terminal output
    pub fn format(&self) -> String {
        let tested = self.total_tested();
        let cps = self.candidates_per_second();
        let remaining = self.total.saturating_sub(tested as u128);
        let eta = if cps > 0.0 { remaining as f64 / cps } else { f64::INFINITY };

        format!(
            "[{} cand/s][Tested {}/{}][{:.1}%][Found {}][Done in {}]",
            format_space(cps as u128),
            format_space(tested as u128),
            format_space(self.total),
            self.progress() * 100.0,
            self.total_matches(),
            format_duration(eta)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let stats = SearchStats::new(100);
        stats.add_tested(25);
        stats.add_tested(25);
        stats.add_match();

        assert_eq!(stats.total_tested(), 50);
        assert_eq!(stats.total_matches(), 1);
        assert!((stats.progress() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stop() {
        let stats = SearchStats::new(1);
        assert!(stats.is_running());
        stats.stop();
        assert!(!stats.is_running());
    }

    #[test]
    fn test_format() {
        let stats = SearchStats::new(4096);
        stats.add_tested(2048);
        let line = stats.format();
        assert!(line.contains("Tested 2.05K/4.10K"), "{}", line);
        assert!(line.contains("[50.0%]"), "{}", line);
        assert!(line.contains("Found 0"), "{}", line);
    }
}
