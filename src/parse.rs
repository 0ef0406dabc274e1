//! Free-text rating parser for provider strings like `"8.4/10"`, `"92%"`,
//! or `"76/100"`. Unparseable input is `None`, meaning "source unavailable";
//! callers must omit the source from the bundle, never substitute zero.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::sources::RatingSource;

static TEN_POINT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)\s*/\s*10").expect("ten-point rating regex"));
static PERCENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)%").expect("percent rating regex"));
static METACRITIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(?:\s*/\s*100)?").expect("metacritic rating regex"));

/// Parse a provider's native rating string into its native-scale value.
///
/// Expected patterns per source:
/// - IMDb/TMDb: leading decimal followed by `/10`.
/// - Rotten Tomatoes (critic or audience): leading number followed by `%`.
/// - Metacritic: leading integer, optional `/100` suffix.
///
/// Never panics; any mismatch is `None`.
pub fn parse_rating_value(source: RatingSource, raw: &str) -> Option<f64> {
    let text = raw.trim();
    let re: &Regex = match source {
        RatingSource::Imdb | RatingSource::Tmdb => &TEN_POINT_RE,
        RatingSource::RtCritic | RatingSource::RtAudience => &PERCENT_RE,
        RatingSource::Metacritic => &METACRITIC_RE,
    };
    re.captures(text)?.get(1)?.as_str().parse().ok()
}
