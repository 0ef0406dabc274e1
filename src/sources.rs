//! # Rating Sources
//!
//! Closed set of supported rating providers plus the fixed base-weight
//! table used by the consensus blend.
//!
//! - Sources form an enum, not open string keys: an unrecognized source is
//!   a deserialization error, never a silent no-op.
//! - Base weights are constants in `[0.0, 1.0]`; they are renormalized over
//!   the sources actually present at blend time (see `consensus`).
//! - The audience score carries a zero base weight: it is displayed and
//!   tracked but does not move the blend unless it is the only source.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A rating provider in its canonical wire spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RatingSource {
    #[serde(rename = "IMDB")]
    Imdb,
    #[serde(rename = "ROTTEN_TOMATOES_CRITIC")]
    RtCritic,
    #[serde(rename = "ROTTEN_TOMATOES_AUDIENCE")]
    RtAudience,
    #[serde(rename = "METACRITIC")]
    Metacritic,
    #[serde(rename = "TMDB")]
    Tmdb,
}

/// The scale a provider reports its raw scores in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeScale {
    /// 0–10 with one decimal (IMDb, TMDb). Normalized by multiplying by 10.
    TenPoint,
    /// Already 0–100 (Rotten Tomatoes, Metacritic). Normalized as-is.
    Percent,
}

impl RatingSource {
    /// Every supported source, in canonical order.
    pub const ALL: [RatingSource; 5] = [
        RatingSource::Imdb,
        RatingSource::RtCritic,
        RatingSource::RtAudience,
        RatingSource::Metacritic,
        RatingSource::Tmdb,
    ];

    /// Un-renormalized contribution weight from the fixed table.
    pub fn base_weight(self) -> f64 {
        match self {
            RatingSource::Imdb => 0.35,
            RatingSource::RtCritic => 0.35,
            RatingSource::Metacritic => 0.20,
            RatingSource::Tmdb => 0.10,
            RatingSource::RtAudience => 0.0,
        }
    }

    pub fn native_scale(self) -> NativeScale {
        match self {
            RatingSource::Imdb | RatingSource::Tmdb => NativeScale::TenPoint,
            RatingSource::RtCritic | RatingSource::RtAudience | RatingSource::Metacritic => {
                NativeScale::Percent
            }
        }
    }

    /// Whether this source publishes a community vote count (feeds the
    /// confidence volume component).
    pub fn counts_votes(self) -> bool {
        matches!(self, RatingSource::Imdb | RatingSource::Tmdb)
    }

    /// Canonical wire spelling, same as the serde rename.
    pub fn as_str(self) -> &'static str {
        match self {
            RatingSource::Imdb => "IMDB",
            RatingSource::RtCritic => "ROTTEN_TOMATOES_CRITIC",
            RatingSource::RtAudience => "ROTTEN_TOMATOES_AUDIENCE",
            RatingSource::Metacritic => "METACRITIC",
            RatingSource::Tmdb => "TMDB",
        }
    }
}

impl fmt::Display for RatingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
