use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use scene::MapConfig;
use streaming::{DEFAULT_PLATES_PATH, LoaderConfig, Source, USGS_ALL_DAY_FEED};

#[derive(Debug, Parser)]
#[command(name = "quake_server", version, about = "Live earthquake and plate-boundary web map")]
pub struct Cli {
    #[command(flatten)]
    pub map: MapArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct MapArgs {
    /// GeoJSON earthquake feed (http(s) URL or local path).
    #[arg(long, env = "QUAKE_FEED_URL", default_value = USGS_ALL_DAY_FEED, global = true)]
    pub feed_url: String,

    /// Plate-boundary GeoJSON (local path or URL).
    #[arg(long, env = "QUAKE_PLATES_SOURCE", default_value = DEFAULT_PLATES_PATH, global = true)]
    pub plates: String,

    /// Tile provider access token substituted into basemap URLs.
    #[arg(long, env = "MAPBOX_ACCESS_TOKEN", hide_env_values = true, global = true)]
    pub access_token: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the map; every page load runs one fetch-and-render pass.
    Serve {
        #[arg(long, env = "QUAKE_ADDR", default_value = "127.0.0.1:9200")]
        addr: SocketAddr,
    },
    /// Run one pass and write the page to a file.
    Render {
        #[arg(long, short, default_value = "map.html")]
        out: PathBuf,
    },
}

impl MapArgs {
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            feed: Source::parse(&self.feed_url),
            plates: Source::parse(&self.plates),
        }
    }

    pub fn map_config(&self) -> MapConfig {
        MapConfig {
            access_token: self
                .access_token
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            ..MapConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;
    use std::path::PathBuf;
    use streaming::Source;

    #[test]
    fn render_with_overrides() {
        let cli = Cli::try_parse_from([
            "quake_server",
            "render",
            "--out",
            "quakes.html",
            "--feed-url",
            "https://example.org/feed.geojson",
            "--plates",
            "data/plates.json",
            "--access-token",
            "pk.123",
        ])
        .expect("parse");

        match &cli.command {
            Command::Render { out } => assert_eq!(out, &PathBuf::from("quakes.html")),
            other => panic!("unexpected command: {other:?}"),
        }

        let loader = cli.map.loader_config();
        assert_eq!(
            loader.feed,
            Source::Remote("https://example.org/feed.geojson".to_string())
        );
        assert_eq!(loader.plates, Source::Local(PathBuf::from("data/plates.json")));
        assert_eq!(cli.map.map_config().access_token.as_deref(), Some("pk.123"));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let cli = Cli::try_parse_from(["quake_server", "--access-token", "  ", "render"])
            .expect("parse");
        assert_eq!(cli.map.map_config().access_token, None);
    }

    #[test]
    fn serve_address() {
        let cli = Cli::try_parse_from(["quake_server", "serve", "--addr", "0.0.0.0:8080"])
            .expect("parse");
        match cli.command {
            Command::Serve { addr } => assert_eq!(addr.port(), 8080),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
