//! Missing-word recovery search

use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use seedmend_phrase::{format_space, PhraseTemplate, WordVocabulary, DEFAULT_MARKER};

use crate::error::RecoveryError;
use crate::generator::CandidateGenerator;
use crate::oracle::ChecksumOracle;
use crate::stats::SearchStats;

/// Upper bound accepted for `max_missing`
pub const MAX_MISSING_LIMIT: usize = 24;

/// Default gap between progress callbacks
const DEFAULT_PROGRESS_INTERVAL_MS: u64 = 250;

/// Candidates a worker tests before publishing its count
const STATS_FLUSH: u64 = 4096;

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of unknown words accepted
    pub max_missing: usize,
    /// Capacity of the result channel
    pub batch_size: usize,
    /// Number of threads (0 = auto)
    pub threads: usize,
    /// Token marking an unknown word
    pub marker: String,
    /// Word counts that are checked directly when nothing is missing
    pub accepted_lengths: Vec<usize>,
    /// Stop after this many valid phrases (0 = search the whole space)
    pub max_results: usize,
    /// Minimum gap between progress callbacks, in milliseconds
    pub progress_interval_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_missing: 5,
            batch_size: 10,
            threads: 0, // Auto-detect
            marker: DEFAULT_MARKER.to_string(),
            accepted_lengths: vec![12, 15, 18, 21, 24],
            max_results: 0,
            progress_interval_ms: DEFAULT_PROGRESS_INTERVAL_MS,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), RecoveryError> {
        if self.max_missing > MAX_MISSING_LIMIT {
            return Err(RecoveryError::InvalidConfig(format!(
                "max missing words must be between 0 and {}",
                MAX_MISSING_LIMIT
            )));
        }
        if self.batch_size == 0 {
            return Err(RecoveryError::InvalidConfig(
                "batch size must be greater than 0".to_string(),
            ));
        }
        if self.progress_interval_ms == 0 {
            return Err(RecoveryError::InvalidConfig(
                "progress interval must be greater than 0".to_string(),
            ));
        }
        if self.marker.is_empty() || self.marker.chars().any(char::is_whitespace) {
            return Err(RecoveryError::InvalidConfig(
                "unknown-word marker must be a single non-empty token".to_string(),
            ));
        }
        Ok(())
    }

    fn worker_count(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        }
    }
}

/// Which path the search took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Nothing was missing; the phrase was checked as-is
    Verified,
    /// Unknown positions were searched
    Searched,
    /// No unknown positions and not a checkable length
    NoMissingWords,
}

/// Result of one recovery run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryReport {
    pub outcome: Outcome,
    /// Normalised template
    pub template: String,
    /// Number of unknown positions
    pub missing: usize,
    /// Phrases that passed the checksum
    pub phrases: BTreeSet<String>,
    /// Candidates run through the oracle
    pub candidates_tested: u64,
    /// Size of the candidate space
    pub space_size: u128,
    /// Whether the result limit cut the search short of the full space
    pub stopped_early: bool,
    /// Time taken in seconds
    pub time_secs: f64,
}

impl RecoveryReport {
    pub fn is_found(&self) -> bool {
        !self.phrases.is_empty()
    }
}

/// Recovery search engine
pub struct RecoverySearch<O: ChecksumOracle> {
    vocabulary: Arc<WordVocabulary>,
    oracle: O,
    config: SearchConfig,
}

impl<O: ChecksumOracle> RecoverySearch<O> {
    /// Create a new recovery search
    pub fn new(vocabulary: Arc<WordVocabulary>, oracle: O, config: SearchConfig) -> Self {
        Self {
            vocabulary,
            oracle,
            config,
        }
    }

    /// Run the search (blocking until the space is exhausted)
    pub fn run(&self, phrase: &str) -> Result<RecoveryReport, RecoveryError> {
        self.run_with_callback(phrase, |_| {})
    }

    /// Run the search, calling `callback` with live stats while it waits
    pub fn run_with_callback<F>(&self, phrase: &str, callback: F) -> Result<RecoveryReport, RecoveryError>
    where
        F: FnMut(&SearchStats),
    {
        self.config.validate()?;
        let template = PhraseTemplate::parse(phrase, &self.config.marker)?;
        let missing = template.missing_count();

        if missing == 0 && self.config.accepted_lengths.contains(&template.len()) {
            return Ok(self.verify(&template));
        }

        if missing == 0 {
            info!("No missing words detected");
            return Ok(RecoveryReport {
                outcome: Outcome::NoMissingWords,
                template: template.to_string(),
                missing,
                phrases: BTreeSet::new(),
                candidates_tested: 0,
                space_size: 0,
                stopped_early: false,
                time_secs: 0.0,
            });
        }

        if missing > self.config.max_missing {
            return Err(RecoveryError::TooManyMissing {
                count: missing,
                max: self.config.max_missing,
            });
        }

        self.search(&template, callback)
    }

    /// Complete phrase: one oracle call on the calling thread
    fn verify(&self, template: &PhraseTemplate) -> RecoveryReport {
        let stats = SearchStats::new(1);
        let phrase = template.to_string();

        let mut phrases = BTreeSet::new();
        if self.oracle.is_valid(&phrase) {
            phrases.insert(phrase);
        }
        stats.add_tested(1);

        RecoveryReport {
            outcome: Outcome::Verified,
            template: template.to_string(),
            missing: 0,
            phrases,
            candidates_tested: stats.total_tested(),
            space_size: 1,
            stopped_early: false,
            time_secs: stats.elapsed().as_secs_f64(),
        }
    }

    fn search<F>(&self, template: &PhraseTemplate, mut callback: F) -> Result<RecoveryReport, RecoveryError>
    where
        F: FnMut(&SearchStats),
    {
        let generator = CandidateGenerator::new(template, &self.vocabulary);
        let stats = SearchStats::new(generator.space_size());

        let num_threads = self.config.worker_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("seedmend-worker-{}", i))
            .build()
            .map_err(|e| RecoveryError::ThreadPool(e.to_string()))?;

        let shards = generator.shards(num_threads);
        info!(
            "Searching {} candidates for {} missing words across {} shards",
            format_space(generator.space_size()),
            template.missing_count(),
            shards.len()
        );

        let (tx, rx) = bounded::<String>(self.config.batch_size);
        let oracle = &self.oracle;
        let worker_stats: &SearchStats = &stats;
        let max_results = self.config.max_results;
        let interval = Duration::from_millis(self.config.progress_interval_ms);

        let phrases = thread::scope(|scope| {
            // Supervisor: joins every worker, then drops the last sender so the
            // consumer below sees the channel close.
            scope.spawn(move || {
                pool.scope(|workers| {
                    for shard in shards {
                        let tx = tx.clone();
                        workers.spawn(move |_| run_shard(shard, oracle, worker_stats, &tx));
                    }
                });
                drop(tx);
                debug!("All workers finished");
            });

            let mut found = BTreeSet::new();
            let mut last_progress = Instant::now();
            loop {
                match rx.recv_timeout(interval) {
                    Ok(phrase) => {
                        if max_results == 0 || found.len() < max_results {
                            found.insert(phrase);
                        }
                        if max_results > 0 && found.len() >= max_results && stats.is_running() {
                            info!("Reached {} valid phrases, stopping workers", max_results);
                            stats.stop();
                        }
                        // Matches arriving faster than the timeout still get progress
                        if last_progress.elapsed() >= interval {
                            callback(&*stats);
                            last_progress = Instant::now();
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        callback(&*stats);
                        last_progress = Instant::now();
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            found
        });

        callback(&*stats);

        Ok(RecoveryReport {
            outcome: Outcome::Searched,
            template: template.to_string(),
            missing: template.missing_count(),
            phrases,
            candidates_tested: stats.total_tested(),
            space_size: stats.space_size(),
            stopped_early: !stats.is_running() && (stats.total_tested() as u128) < stats.space_size(),
            time_secs: stats.elapsed().as_secs_f64(),
        })
    }
}

/// Enumerate one shard, sending every phrase the oracle accepts
fn run_shard<O: ChecksumOracle>(
    shard: CandidateGenerator<'_>,
    oracle: &O,
    stats: &SearchStats,
    tx: &Sender<String>,
) {
    let range = shard.outer_range();
    debug!(start = range.start, end = range.end, "Worker started");

    let mut local_count = 0u64;
    for candidate in &shard {
        if !stats.is_running() {
            break;
        }

        let phrase = candidate.phrase();
        local_count += 1;

        if oracle.is_valid(&phrase) {
            stats.add_match();
            // Blocks while the channel is full
            if tx.send(phrase).is_err() {
                break;
            }
        }

        if local_count == STATS_FLUSH {
            stats.add_tested(local_count);
            local_count = 0;
        }
    }

    // Add any remaining
    stats.add_tested(local_count);
    debug!(start = range.start, end = range.end, "Worker finished");
}
