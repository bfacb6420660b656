//! Presentation of recovery results
//!
//! Derivation and balance lookups happen here, after the search, one phrase
//! at a time. Failures are attached to the phrase they belong to.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::warn;

use seedmend_core::{Outcome, RecoveryReport};
use seedmend_wallet::{HorizonClient, WalletError, WalletResolver};

/// One recovered phrase with whatever could be resolved for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPhrase {
    pub phrase: String,
    pub address: Option<String>,
    pub derivation_path: Option<String>,
    pub balance: Option<String>,
    /// Derivation or lookup failure, if any
    pub error: Option<String>,
}

/// Full `--json` document
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub ledger: &'a str,
    pub report: &'a RecoveryReport,
    pub wallets: &'a [ResolvedPhrase],
}

/// Derive an account for every phrase and, with a client, fetch its balance
pub async fn resolve_phrases<R: WalletResolver + ?Sized>(
    resolver: &R,
    horizon: Option<&HorizonClient>,
    phrases: &BTreeSet<String>,
) -> Vec<ResolvedPhrase> {
    let mut resolved = Vec::with_capacity(phrases.len());

    for phrase in phrases {
        let mut row = ResolvedPhrase {
            phrase: phrase.clone(),
            address: None,
            derivation_path: None,
            balance: None,
            error: None,
        };

        let wallet = match resolver.derive(phrase) {
            Ok(wallet) => wallet,
            Err(e) => {
                warn!("Could not derive {} account: {}", resolver.ticker(), e);
                row.error = Some(e.to_string());
                resolved.push(row);
                continue;
            }
        };

        if let Some(client) = horizon {
            match client.balance(&wallet.address).await {
                Ok(balance) => row.balance = Some(balance.native),
                Err(WalletError::AccountNotFound(_)) => {
                    row.error = Some("account not found (unfunded)".to_string());
                }
                Err(e) => {
                    warn!("Balance lookup for {} failed: {}", wallet.address, e);
                    row.error = Some(e.to_string());
                }
            }
        }

        row.address = Some(wallet.address);
        row.derivation_path = Some(wallet.derivation_path);
        resolved.push(row);
    }

    resolved
}

/// Human-readable report on stdout
pub fn print_report(report: &RecoveryReport, wallets: &[ResolvedPhrase], ticker: &str) {
    println!();
    match report.outcome {
        Outcome::NoMissingWords => {
            println!("No missing words detected in: {}", report.template);
            return;
        }
        Outcome::Verified if report.is_found() => println!("✅ Valid seed phrase!"),
        Outcome::Verified => println!("❌ Invalid seed phrase!"),
        Outcome::Searched if report.is_found() => {
            println!("🎉 FOUND {} VALID SEED PHRASE(S)", report.phrases.len())
        }
        Outcome::Searched => println!("❌ No valid seed phrase found."),
    }

    for wallet in wallets {
        println!("{:-<60}", "");
        println!("Seed:     {}", wallet.phrase);
        if let Some(address) = &wallet.address {
            println!("Address:  {}", address);
        }
        if let Some(path) = &wallet.derivation_path {
            println!("Path:     {}", path);
        }
        if let Some(balance) = &wallet.balance {
            println!("Balance:  {} {}", balance, ticker);
        }
        if let Some(error) = &wallet.error {
            println!("Note:     {}", error);
        }
    }

    if report.outcome == Outcome::Searched {
        println!("{:-<60}", "");
        println!("Missing:  {}", report.missing);
        println!("Tested:   {}/{}", report.candidates_tested, report.space_size);
        println!("Time:     {:.2}s", report.time_secs);
        if report.stopped_early {
            println!("Stopped early after reaching the result limit.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedmend_wallet::StellarLedger;

    const ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[tokio::test]
    async fn test_resolve_without_balance() {
        let phrases: BTreeSet<String> = [ABOUT.to_string()].into_iter().collect();
        let resolved = resolve_phrases(&StellarLedger::pi_network(), None, &phrases).await;

        assert_eq!(resolved.len(), 1);
        let row = &resolved[0];
        assert_eq!(row.phrase, ABOUT);
        assert!(row.address.as_deref().is_some_and(|a| a.starts_with('G')));
        assert_eq!(row.derivation_path.as_deref(), Some("m/44'/314159'/0'"));
        assert_eq!(row.balance, None);
        assert_eq!(row.error, None);
    }

    #[tokio::test]
    async fn test_derivation_failure_keeps_phrase() {
        // Passes a permissive oracle but is not a BIP-39 mnemonic
        let phrases: BTreeSet<String> =
            ["alpha bravo".to_string(), ABOUT.to_string()].into_iter().collect();
        let resolved = resolve_phrases(&StellarLedger::stellar(), None, &phrases).await;

        assert_eq!(resolved.len(), 2);
        let bad = resolved.iter().find(|r| r.phrase == "alpha bravo").unwrap();
        assert!(bad.address.is_none());
        assert!(bad.error.is_some());

        let good = resolved.iter().find(|r| r.phrase == ABOUT).unwrap();
        assert!(good.address.is_some());
        assert_eq!(good.derivation_path.as_deref(), Some("m/44'/148'/0'"));
    }

    #[test]
    fn test_json_report() {
        let report = RecoveryReport {
            outcome: Outcome::Searched,
            template: "? about".to_string(),
            missing: 1,
            phrases: BTreeSet::new(),
            candidates_tested: 2048,
            space_size: 2048,
            stopped_early: false,
            time_secs: 0.5,
        };
        let doc = JsonReport { ledger: "PI", report: &report, wallets: &[] };
        let json: serde_json::Value = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["ledger"], "PI");
        assert_eq!(json["report"]["outcome"], "Searched");
        assert_eq!(json["report"]["candidates_tested"], 2048);
        assert!(json["wallets"].as_array().unwrap().is_empty());
    }
}
