//! Upstream rating providers that assemble a `RatingBundle` for a title.
//! Fetching and caching policy belongs to callers; the engine itself never
//! performs I/O.

pub mod omdb;

use anyhow::Result;

use crate::ratings::RatingBundle;

#[async_trait::async_trait]
pub trait RatingProvider {
    /// Fetch every rating the provider knows for the given IMDb id.
    /// Fields the provider cannot parse are omitted from the bundle,
    /// never reported as zero.
    async fn fetch_ratings(&self, imdb_id: &str) -> Result<RatingBundle>;

    fn name(&self) -> &'static str;
}
