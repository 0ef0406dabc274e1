//! OMDb provider: one HTTP call per title (`i=<imdbID>&tomatoes=true`)
//! yields IMDb, Rotten Tomatoes critic/audience, and Metacritic ratings.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use metrics::counter;
use serde::Deserialize;

use crate::parse::parse_rating_value;
use crate::providers::RatingProvider;
use crate::ratings::{RatingBundle, RatingObservation};
use crate::sources::RatingSource;

const OMDB_BASE: &str = "https://www.omdbapi.com/";

/// Entries of the OMDb `Ratings` array, e.g.
/// `{"Source": "Rotten Tomatoes", "Value": "92%"}`.
#[derive(Debug, Deserialize)]
struct OmdbRating {
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Ratings", default)]
    ratings: Vec<OmdbRating>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    imdb_votes: Option<String>,
    #[serde(rename = "Metascore")]
    metascore: Option<String>,
    /// Present only with `tomatoes=true`; a bare number like "86".
    #[serde(rename = "tomatoUserMeter")]
    tomato_user_meter: Option<String>,
}

pub struct OmdbProvider {
    mode: Mode,
}

enum Mode {
    /// Canned JSON body, so tests need no network.
    Fixture(String),
    Http {
        api_key: String,
        timeout: Duration,
        client: reqwest::Client,
    },
}

impl OmdbProvider {
    pub fn from_fixture(body: &str) -> Self {
        Self {
            mode: Mode::Fixture(body.to_string()),
        }
    }

    pub fn from_api_key(api_key: String, timeout: Duration) -> Self {
        Self {
            mode: Mode::Http {
                api_key,
                timeout,
                client: reqwest::Client::new(),
            },
        }
    }

    fn bundle_from_body(body: &str) -> Result<RatingBundle> {
        let resp: OmdbResponse = serde_json::from_str(body).context("parsing omdb json")?;
        if resp.response != "True" {
            bail!(
                "omdb lookup failed: {}",
                resp.error.as_deref().unwrap_or("unknown error")
            );
        }

        let mut bundle = RatingBundle::new();

        for r in &resp.ratings {
            let source = match r.source.as_str() {
                "Internet Movie Database" => RatingSource::Imdb,
                "Rotten Tomatoes" => RatingSource::RtCritic,
                "Metacritic" => RatingSource::Metacritic,
                other => {
                    tracing::debug!(source = other, "skipping unknown omdb rating source");
                    continue;
                }
            };
            match parse_rating_value(source, &r.value) {
                Some(raw) => {
                    bundle.insert(source, RatingObservation::new(raw).observed_now());
                }
                None => {
                    counter!("rating_parse_failures_total").increment(1);
                    tracing::warn!(source = %source, value = %r.value, "unparseable omdb rating");
                }
            }
        }

        // Top-level fallbacks for responses without a Ratings array.
        if bundle.get(RatingSource::Imdb).is_none() {
            if let Some(raw) = resp.imdb_rating.as_deref().and_then(parse_plain_number) {
                bundle.insert(RatingSource::Imdb, RatingObservation::new(raw).observed_now());
            }
        }
        if bundle.get(RatingSource::Metacritic).is_none() {
            if let Some(v) = resp.metascore.as_deref() {
                if let Some(raw) = parse_rating_value(RatingSource::Metacritic, v) {
                    bundle.insert(
                        RatingSource::Metacritic,
                        RatingObservation::new(raw).observed_now(),
                    );
                }
            }
        }

        // Audience meter arrives as a bare number, not "NN%".
        if let Some(raw) = resp.tomato_user_meter.as_deref().and_then(parse_plain_number) {
            bundle.insert(
                RatingSource::RtAudience,
                RatingObservation::new(raw).observed_now(),
            );
        }

        // Attach the comma-grouped vote count to the IMDb observation.
        if let Some(votes) = resp.imdb_votes.as_deref().and_then(parse_omdb_votes) {
            if let Some(obs) = bundle.get(RatingSource::Imdb).cloned() {
                bundle.insert(RatingSource::Imdb, obs.with_votes(votes));
            }
        }

        counter!("omdb_bundles_total").increment(1);
        Ok(bundle)
    }
}

#[async_trait]
impl RatingProvider for OmdbProvider {
    async fn fetch_ratings(&self, imdb_id: &str) -> Result<RatingBundle> {
        match &self.mode {
            Mode::Fixture(body) => Self::bundle_from_body(body),

            Mode::Http {
                api_key,
                timeout,
                client,
            } => {
                let req = client
                    .get(OMDB_BASE)
                    .timeout(*timeout)
                    .query(&[("i", imdb_id), ("tomatoes", "true"), ("apikey", api_key)]);
                let body = match req.send().await {
                    Ok(resp) => resp.text().await.context("omdb http .text()")?,
                    Err(e) => {
                        tracing::warn!(error = ?e, provider = "OMDb", "provider http error");
                        counter!("omdb_provider_errors_total").increment(1);
                        return Err(e).context("omdb http get()");
                    }
                };
                Self::bundle_from_body(&body)
            }
        }
    }

    fn name(&self) -> &'static str {
        "OMDb"
    }
}

/// `"86"` or `"8.4"`, with an optional stray `%` suffix.
fn parse_plain_number(v: &str) -> Option<f64> {
    v.trim().trim_end_matches('%').parse().ok()
}

/// OMDb vote counts are comma-grouped, e.g. `"2,974,894"`.
fn parse_omdb_votes(v: &str) -> Option<u64> {
    let digits = v.trim().replace(',', "");
    digits.parse().ok()
}
