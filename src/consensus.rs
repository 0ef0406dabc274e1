//! # Consensus Engine
//! Pure, testable logic that maps a `RatingBundle` → `ConsensusResult`.
//! No I/O, no shared state; safe to call concurrently from any number of
//! request handlers.
//!
//! Policy: normalize each present source to 0–100, renormalize the fixed
//! base weights over the sources actually present, blend, and report an
//! independent confidence from source breadth + community vote volume.

use std::collections::BTreeMap;

use crate::ratings::{ConsensusResult, RatingBundle};
use crate::sources::{NativeScale, RatingSource};

/// Explanation attached to every scored result.
pub const FORMULA: &str = "Consensus = round(sum(normalized_source x weight)), normalized to 0-100. \
     Base weights: IMDb 0.35, RT Critic 0.35, Metacritic 0.20, TMDb 0.10, \
     RT Audience 0.00 (renormalized over the sources present).";

/// Explanation attached to the degenerate empty-bundle result.
pub const NO_SOURCES: &str = "No rating sources available.";

/// Compute the blended consensus score and confidence for one title.
///
/// Total over its input domain: the empty bundle yields a `null` score and
/// zero confidence, malformed native values are clamped into range, and no
/// input ever produces an error.
pub fn compute_consensus(bundle: &RatingBundle) -> ConsensusResult {
    // 1) Normalize every present source to the common 0-100 scale.
    let mut normalized = BTreeMap::new();
    for (source, obs) in bundle.iter() {
        let value = match source.native_scale() {
            NativeScale::TenPoint => obs.raw_score * 10.0,
            NativeScale::Percent => obs.raw_score,
        };
        normalized.insert(source, clamp(value, 0.0, 100.0));
    }

    // 2) Nothing usable: a valid terminal outcome, not an error.
    if normalized.is_empty() {
        return ConsensusResult {
            consensus: None,
            confidence: 0,
            normalized,
            weights_used: BTreeMap::new(),
            formula: NO_SOURCES.to_string(),
        };
    }

    // 3) Renormalize base weights over the present set so a missing source
    //    does not systematically drag the blend down. If only zero-weighted
    //    sources are present (audience-only), split equally instead.
    let sum_base: f64 = normalized.keys().map(|s| s.base_weight()).sum();
    let mut weights_used = BTreeMap::new();
    if sum_base > 0.0 {
        for s in normalized.keys() {
            weights_used.insert(*s, s.base_weight() / sum_base);
        }
    } else {
        let equal = 1.0 / normalized.len() as f64;
        for s in normalized.keys() {
            weights_used.insert(*s, equal);
        }
    }

    // 4) Blend. Round-half-up; values are non-negative so `f64::round`
    //    (half away from zero) matches the upstream display exactly.
    let blended: f64 = normalized
        .iter()
        .map(|(s, v)| v * weights_used[s])
        .sum();
    let consensus = clamp(blended, 0.0, 100.0).round() as u8;

    let confidence = confidence_for(bundle, normalized.len());

    ConsensusResult {
        consensus: Some(consensus),
        confidence,
        normalized,
        weights_used,
        formula: FORMULA.to_string(),
    }
}

/// Confidence is independent of the score's value: breadth of agreement
/// (up to 4 sources' worth, max 70) plus community sampling depth
/// (log-scaled IMDb+TMDb votes, max 30).
fn confidence_for(bundle: &RatingBundle, source_count: usize) -> u8 {
    let breadth = clamp(source_count as f64 / 4.0 * 70.0, 0.0, 70.0);

    let total_votes: u64 = RatingSource::ALL
        .iter()
        .filter(|s| s.counts_votes())
        .filter_map(|s| bundle.get(*s).and_then(|o| o.vote_count))
        .sum();
    let volume = clamp((total_votes as f64 + 1.0).log10() / 6.0 * 30.0, 0.0, 30.0);

    clamp(breadth + volume, 0.0, 100.0).round() as u8
}

fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}
