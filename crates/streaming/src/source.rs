use std::fmt;
use std::path::PathBuf;

pub const USGS_ALL_DAY_FEED: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson";
pub const DEFAULT_PLATES_PATH: &str = "./static/data/PB2002_plates.json";

/// Where a JSON document comes from: a remote URL or a bundled local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote(String),
    Local(PathBuf),
}

impl Source {
    /// `http(s)://` is remote, `file://` and anything else is a local path.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            Source::Remote(s.to_string())
        } else {
            Source::Local(PathBuf::from(s.strip_prefix("file://").unwrap_or(s)))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Remote(url) => write!(f, "{url}"),
            Source::Local(path) => write!(f, "{}", path.display()),
        }
    }
}
