//! Value types shared across the engine and the API: per-source
//! observations, the input bundle, and the computed consensus output.
//!
//! These are plain serde values with builder-style helpers; all policy
//! lives in `consensus`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sources::RatingSource;

/// One fetched rating from a single source, in that source's native scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingObservation {
    /// Native-scale value: 0–10 for IMDb/TMDb, 0–100 for the others.
    pub raw_score: f64,
    /// Community vote count; published by IMDb and TMDb only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<u64>,
    /// When the value was fetched or last cached. Informational only,
    /// never used in scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
}

impl RatingObservation {
    pub fn new(raw_score: f64) -> Self {
        Self {
            raw_score,
            vote_count: None,
            observed_at: None,
        }
    }

    pub fn with_votes(mut self, votes: u64) -> Self {
        self.vote_count = Some(votes);
        self
    }

    pub fn observed_now(mut self) -> Self {
        self.observed_at = Some(Utc::now());
        self
    }
}

/// Per-source ratings for one title. A source absent from the map means
/// "unknown/unavailable", never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingBundle(BTreeMap<RatingSource, RatingObservation>);

impl RatingBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; last write wins for a repeated source.
    pub fn with(mut self, source: RatingSource, obs: RatingObservation) -> Self {
        self.insert(source, obs);
        self
    }

    pub fn insert(&mut self, source: RatingSource, obs: RatingObservation) {
        self.0.insert(source, obs);
    }

    pub fn get(&self, source: RatingSource) -> Option<&RatingObservation> {
        self.0.get(&source)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RatingSource, &RatingObservation)> {
        self.0.iter().map(|(s, o)| (*s, o))
    }

    pub fn sources(&self) -> impl Iterator<Item = RatingSource> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(RatingSource, RatingObservation)> for RatingBundle {
    fn from_iter<T: IntoIterator<Item = (RatingSource, RatingObservation)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Blended score plus the evidence behind it. Recomputed on every call,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    /// Blended 0–100 score, or `null` when no source was usable.
    pub consensus: Option<u8>,
    /// Independent 0–100 trust estimate from source breadth + vote volume.
    pub confidence: u8,
    /// 0–100 normalized value per source present in the input.
    pub normalized: BTreeMap<RatingSource, f64>,
    /// Weight actually applied per source, renormalized to sum to 1.0.
    pub weights_used: BTreeMap<RatingSource, f64>,
    /// Fixed human-readable description of the formula, for transparency.
    pub formula: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bundle_serializes_as_object_keyed_by_source() {
        let b = RatingBundle::new()
            .with(RatingSource::Imdb, RatingObservation::new(8.0).with_votes(1200))
            .with(RatingSource::RtCritic, RatingObservation::new(90.0));

        let v = serde_json::to_value(&b).unwrap();
        assert_eq!(v["IMDB"]["raw_score"], json!(8.0));
        assert_eq!(v["IMDB"]["vote_count"], json!(1200));
        assert_eq!(v["ROTTEN_TOMATOES_CRITIC"]["raw_score"], json!(90.0));
        // Absent optionals are omitted, absent sources are absent keys.
        assert!(v["IMDB"].get("observed_at").is_none());
        assert!(v.get("TMDB").is_none());
    }

    #[test]
    fn bundle_round_trips() {
        let b = RatingBundle::new()
            .with(RatingSource::Metacritic, RatingObservation::new(76.0))
            .with(RatingSource::Tmdb, RatingObservation::new(7.9).with_votes(5000));
        let s = serde_json::to_string(&b).unwrap();
        let back: RatingBundle = serde_json::from_str(&s).unwrap();
        assert_eq!(back, b);
    }

    #[test]
    fn repeated_insert_keeps_last_observation() {
        let b = RatingBundle::new()
            .with(RatingSource::Imdb, RatingObservation::new(5.0))
            .with(RatingSource::Imdb, RatingObservation::new(8.0));
        assert_eq!(b.len(), 1);
        assert_eq!(b.get(RatingSource::Imdb).unwrap().raw_score, 8.0);
    }
}
