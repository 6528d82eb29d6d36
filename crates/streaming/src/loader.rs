use formats::{FaultLineGeometry, FeedError, GeoJsonError, QuakeFeed};
use layers::{build_earthquake_layer, build_fault_line_layer};
use scene::{MapConfig, MapView, compose_map};
use tracing::{info, warn};

use crate::fetch::{Fetch, FetchError};
use crate::source::{DEFAULT_PLATES_PATH, Source, USGS_ALL_DAY_FEED};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub feed: Source,
    pub plates: Source,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            feed: Source::parse(USGS_ALL_DAY_FEED),
            plates: Source::parse(DEFAULT_PLATES_PATH),
        }
    }
}

/// Both documents, parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedData {
    pub feed: QuakeFeed,
    pub plates: FaultLineGeometry,
}

#[derive(Debug)]
pub enum LoadError {
    FeedFetch(FetchError),
    FeedFormat(FeedError),
    PlatesFetch(FetchError),
    PlatesFormat(GeoJsonError),
}

impl LoadError {
    /// Which input failed, for user-facing messages.
    pub fn stage(&self) -> &'static str {
        match self {
            LoadError::FeedFetch(_) | LoadError::FeedFormat(_) => "earthquake feed",
            LoadError::PlatesFetch(_) | LoadError::PlatesFormat(_) => "plate boundaries",
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::FeedFetch(e) | LoadError::PlatesFetch(e) => {
                write!(f, "{}: {e}", self.stage())
            }
            LoadError::FeedFormat(e) => write!(f, "{}: {e}", self.stage()),
            LoadError::PlatesFormat(e) => write!(f, "{}: {e}", self.stage()),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::FeedFetch(e) | LoadError::PlatesFetch(e) => Some(e),
            LoadError::FeedFormat(e) => Some(e),
            LoadError::PlatesFormat(e) => Some(e),
        }
    }
}

/// Fetches the feed, then the plate boundaries, then builds the map.
///
/// The two fetches never overlap: the plates request is only issued once the
/// feed has arrived and parsed. Any failure ends the pass with no map.
#[derive(Debug, Clone)]
pub struct DataLoader<F> {
    config: LoaderConfig,
    fetcher: F,
}

impl<F: Fetch> DataLoader<F> {
    pub fn new(config: LoaderConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub async fn load(&self) -> Result<LoadedData, LoadError> {
        info!(source = %self.config.feed, "fetching earthquake feed");
        let feed_json = self
            .fetcher
            .fetch_json(&self.config.feed)
            .await
            .map_err(LoadError::FeedFetch)?;
        let feed = QuakeFeed::from_value(&feed_json).map_err(LoadError::FeedFormat)?;
        if feed.skipped > 0 {
            warn!(skipped = feed.skipped, "feed contained records without magnitude");
        }
        info!(records = feed.len(), "earthquake feed loaded");

        info!(source = %self.config.plates, "fetching plate boundaries");
        let plates_json = self
            .fetcher
            .fetch_json(&self.config.plates)
            .await
            .map_err(LoadError::PlatesFetch)?;
        let plates = FaultLineGeometry::from_value(plates_json).map_err(LoadError::PlatesFormat)?;
        info!(features = plates.feature_count(), "plate boundaries loaded");

        Ok(LoadedData { feed, plates })
    }

    /// One full render pass: load, assemble layers, compose.
    pub async fn render(&self, map: &MapConfig) -> Result<MapView, LoadError> {
        let data = self.load().await?;
        let earthquakes = build_earthquake_layer(&data.feed.records);
        let fault_lines = build_fault_line_layer(data.plates);
        Ok(compose_map(map, earthquakes, fault_lines))
    }
}
