//! Search-space size and time estimates

/// Number of candidates for `missing` unknown slots over `vocabulary_size`
/// words (`V^k`), saturating at `u128::MAX`
pub fn search_space(vocabulary_size: usize, missing: usize) -> u128 {
    let base = vocabulary_size as u128;
    let mut total: u128 = 1;
    for _ in 0..missing {
        total = match total.checked_mul(base) {
            Some(t) => t,
            None => return u128::MAX,
        };
    }
    total
}

/// Format a candidate count as human-readable string
pub fn format_space(candidates: u128) -> String {
    let n = candidates as f64;
    if n >= 1e18 {
        format!("{:.2e}", n)
    } else if n >= 1e15 {
        format!("{:.2}P", n / 1e15)
    } else if n >= 1e12 {
        format!("{:.2}T", n / 1e12)
    } else if n >= 1e9 {
        format!("{:.2}G", n / 1e9)
    } else if n >= 1e6 {
        format!("{:.2}M", n / 1e6)
    } else if n >= 1e3 {
        format!("{:.2}K", n / 1e3)
    } else {
        format!("{}", candidates)
    }
}

/// Seconds needed to exhaust `candidates` at `candidates_per_second`
pub fn estimate_time(candidates: u128, candidates_per_second: f64) -> f64 {
    if candidates_per_second <= 0.0 {
        return f64::INFINITY;
    }
    candidates as f64 / candidates_per_second
}

/// Format duration in human-readable format
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() {
        "never".to_string()
    } else if seconds < 1.0 {
        format!("{:.0}ms", seconds * 1000.0)
    } else if seconds < 60.0 {
        format!("{:.1}s", seconds)
    } else if seconds < 3600.0 {
        format!("{:.1}m", seconds / 60.0)
    } else if seconds < 86400.0 {
        format!("{:.1}h", seconds / 3600.0)
    } else if seconds < 86400.0 * 365.0 {
        format!("{:.1}d", seconds / 86400.0)
    } else {
        format!("{:.1}y", seconds / (86400.0 * 365.0))
    }
}
