//! SeedMend CLI
//!
//! Recovers the missing words of a BIP-39 seed phrase and resolves the
//! matching Pi Network / Stellar accounts.

mod report;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use seedmend_core::{
    estimate_time, format_duration, format_space, search_space, Bip39Checksum, CandidateGenerator,
    ChecksumOracle, Outcome, PhraseTemplate, RecoverySearch, SearchConfig, WordVocabulary,
    DEFAULT_MARKER,
};
use seedmend_crypto::mnemonic;
use seedmend_wallet::{all_ledgers, HorizonClient, Network, WalletConfig, WalletResolver};

use crate::report::{print_report, resolve_phrases, JsonReport};

/// Candidates timed by `estimate` when no rate is given
const BENCH_CANDIDATES: usize = 20_000;

#[derive(Parser)]
#[command(name = "seedmend")]
#[command(author = "SeedMend Team")]
#[command(version = "0.1.0")]
#[command(about = "Recover missing words of a BIP-39 seed phrase", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for the missing words of a seed phrase
    Recover(RecoverArgs),

    /// Check the checksum of a complete seed phrase
    Validate {
        /// Seed phrase
        #[arg(short, long)]
        seed: String,
    },

    /// Print the search-space size and an estimated duration
    Estimate {
        /// Seed phrase with unknown words marked
        #[arg(short, long)]
        seed: String,

        /// Placeholder for unknown words
        #[arg(long, default_value = DEFAULT_MARKER)]
        marker: String,

        /// Word list file, one word per line (default: BIP-39 English)
        #[arg(long)]
        wordlist: Option<PathBuf>,

        /// Candidates per second (default: measured on this machine)
        #[arg(long)]
        rate: Option<f64>,

        /// Number of threads (0 = auto)
        #[arg(long, default_value = "0")]
        threads: usize,
    },

    /// Show the vocabulary in use
    Wordlist {
        /// Word list file, one word per line (default: BIP-39 English)
        #[arg(long)]
        wordlist: Option<PathBuf>,
    },

    /// List supported ledgers
    Ledgers,
}

#[derive(Args)]
struct RecoverArgs {
    /// Seed phrase with unknown words marked, e.g. "word1 ? word3 ..."
    #[arg(short, long)]
    seed: String,

    /// Maximum number of unknown words to search
    #[arg(short, long = "max-word", default_value = "5")]
    max_word: usize,

    /// Result channel capacity
    #[arg(short, long = "batch", default_value = "10")]
    batch: usize,

    /// Number of threads (0 = auto)
    #[arg(long, default_value = "0")]
    threads: usize,

    /// Placeholder for unknown words
    #[arg(long, default_value = DEFAULT_MARKER)]
    marker: String,

    /// Word list file, one word per line (default: BIP-39 English)
    #[arg(long)]
    wordlist: Option<PathBuf>,

    /// Stop after this many valid phrases (0 = exhaustive)
    #[arg(long, default_value = "0")]
    max_results: usize,

    /// Query the testnet instead of mainnet
    #[arg(short, long)]
    testnet: bool,

    /// Ledger ticker (PI, XLM)
    #[arg(long, default_value = "PI")]
    ledger: String,

    /// Override the derivation path, e.g. m/44'/314159'/0'
    #[arg(long)]
    derivation_path: Option<String>,

    /// Skip balance lookups
    #[arg(long)]
    no_balance: bool,

    /// Override the Horizon endpoint
    #[arg(long)]
    horizon_url: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Recover(args) => cmd_recover(args).await?,
        Commands::Validate { seed } => cmd_validate(&seed)?,
        Commands::Estimate {
            seed,
            marker,
            wordlist,
            rate,
            threads,
        } => cmd_estimate(&seed, &marker, wordlist.as_deref(), rate, threads)?,
        Commands::Wordlist { wordlist } => cmd_wordlist(wordlist.as_deref())?,
        Commands::Ledgers => cmd_ledgers(),
    }

    Ok(())
}

fn load_vocabulary(path: Option<&Path>) -> Result<WordVocabulary> {
    match path {
        Some(path) => WordVocabulary::from_file(path)
            .with_context(|| format!("Failed to load word list {}", path.display())),
        None => Ok(WordVocabulary::bip39_english()),
    }
}

fn thread_count(threads: usize) -> usize {
    if threads == 0 {
        num_cpus::get()
    } else {
        threads
    }
}

async fn cmd_recover(args: RecoverArgs) -> Result<()> {
    let vocabulary = Arc::new(load_vocabulary(args.wordlist.as_deref())?);

    let config = SearchConfig {
        max_missing: args.max_word,
        batch_size: args.batch,
        threads: args.threads,
        marker: args.marker.clone(),
        max_results: args.max_results,
        ..Default::default()
    };
    let wallet_config = WalletConfig {
        ledger: args.ledger.clone(),
        network: if args.testnet { Network::Testnet } else { Network::Mainnet },
        derivation_path: args.derivation_path.clone(),
        horizon_url: args.horizon_url.clone(),
        fetch_balance: !args.no_balance,
    };
    let resolver = wallet_config.resolver().context("Invalid wallet settings")?;

    // Unknown fixed words make every candidate fail the checksum
    if let Ok(template) = PhraseTemplate::parse(&args.seed, &config.marker) {
        let outside = template.words_outside(&vocabulary);
        if !outside.is_empty() {
            let listed: Vec<String> = outside
                .iter()
                .map(|(position, word)| format!("{} (#{})", word, position + 1))
                .collect();
            warn!("Words not in the vocabulary: {}", listed.join(", "));
        }
    }

    if !args.json {
        eprintln!("SeedMend v0.1.0");
        eprintln!("Ledger: {} ({}, {})", resolver.name(), resolver.ticker(), wallet_config.network);
        eprintln!("Path: {}", resolver.derivation_path());
        eprintln!("Vocabulary: {} words", vocabulary.len());
        eprintln!("Threads: {}", thread_count(config.threads));
        eprintln!();
    }

    let search = RecoverySearch::new(vocabulary, Bip39Checksum, config);
    let seed = args.seed.clone();
    let show_progress = !args.json;
    let report = tokio::task::spawn_blocking(move || {
        search.run_with_callback(&seed, |stats| {
            if show_progress {
                eprint!("\r{}", stats.format());
            }
        })
    })
    .await
    .context("Search task failed")??;

    if show_progress && report.outcome == Outcome::Searched {
        eprintln!();
    }
    info!(
        "Search finished: {} valid phrase(s), {} candidates tested",
        report.phrases.len(),
        report.candidates_tested
    );

    let horizon = if wallet_config.fetch_balance && report.is_found() {
        let url = wallet_config.horizon_url(&resolver);
        match HorizonClient::new(url) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Balance lookups disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let wallets = resolve_phrases(&resolver, horizon.as_ref(), &report.phrases).await;

    if args.json {
        let doc = JsonReport {
            ledger: resolver.ticker(),
            report: &report,
            wallets: &wallets,
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print_report(&report, &wallets, resolver.ticker());
    }

    Ok(())
}

fn cmd_validate(seed: &str) -> Result<()> {
    let phrase = seed
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");
    anyhow::ensure!(!phrase.is_empty(), "Seed phrase is empty");

    match mnemonic::validate(&phrase) {
        Ok(()) => println!("✅ Valid seed phrase!"),
        Err(e) => println!("❌ Invalid seed phrase: {}", e),
    }

    Ok(())
}

fn cmd_estimate(
    seed: &str,
    marker: &str,
    wordlist: Option<&Path>,
    rate: Option<f64>,
    threads: usize,
) -> Result<()> {
    let vocabulary = load_vocabulary(wordlist)?;
    let template = PhraseTemplate::parse(seed, marker)?;
    let missing = template.missing_count();
    let space = search_space(vocabulary.len(), missing);

    let rate = match rate {
        Some(rate) => checked_rate(rate)?,
        None => {
            let generator = CandidateGenerator::new(&template, &vocabulary);
            let start = Instant::now();
            let mut checked = 0usize;
            for candidate in generator.iter().take(BENCH_CANDIDATES) {
                Bip39Checksum.is_valid(&candidate.phrase());
                checked += 1;
            }
            let secs = start.elapsed().as_secs_f64();
            let single = if secs > 0.0 { checked as f64 / secs } else { 0.0 };
            single * thread_count(threads) as f64
        }
    };

    println!("Template:     {}", template);
    println!("Missing:      {}", missing);
    if !template.is_complete() {
        let positions: Vec<String> = template
            .unknown_positions()
            .iter()
            .map(|p| format!("#{}", p + 1))
            .collect();
        println!("Positions:    {}", positions.join(" "));
    }
    println!("Vocabulary:   {} words", vocabulary.len());
    println!("Candidates:   {} ({})", space, format_space(space));
    println!("Rate:         {} cand/s", format_space(rate as u128));
    println!("Estimate:     {}", format_duration(estimate_time(space, rate)));

    Ok(())
}

/// A user-supplied candidates/second figure
fn checked_rate(rate: f64) -> Result<f64> {
    anyhow::ensure!(
        rate.is_finite() && rate > 0.0,
        "Rate must be a positive number of candidates per second, got {}",
        rate
    );
    Ok(rate)
}

fn cmd_wordlist(path: Option<&Path>) -> Result<()> {
    let vocabulary = load_vocabulary(path)?;
    let words = vocabulary.words();

    println!("Source: {}", path.map_or("BIP-39 English".to_string(), |p| p.display().to_string()));
    println!("Words:  {}", vocabulary.len());
    println!("{:-<60}", "");
    let sample: Vec<&str> = words.iter().take(8).map(String::as_str).collect();
    println!("First:  {}", sample.join(" "));
    let tail: Vec<&str> = words.iter().rev().take(8).rev().map(String::as_str).collect();
    println!("Last:   {}", tail.join(" "));

    Ok(())
}

fn cmd_ledgers() {
    println!("Supported Ledgers:");
    println!("{:-<60}", "");
    println!("{:<8} {:<12} {:<18} {}", "Ticker", "Name", "Path", "Horizon");
    println!("{:-<60}", "");

    for ledger in all_ledgers() {
        println!(
            "{:<8} {:<12} {:<18} {}",
            ledger.ticker(),
            ledger.name(),
            ledger.derivation_path().to_string(),
            ledger.horizon_url(Network::Mainnet)
        );
    }
}
