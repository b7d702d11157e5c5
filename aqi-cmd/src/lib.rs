//! Command implementations for the air-quality map CLI.
//!
//! Provides subcommands for classifying readings, searching places,
//! fetching station readings, analysing a driving route, and managing
//! the stored provider token.

use aqi_core::gateway::{GatewayConfig, HttpGateway};
use aqi_utils::tokens::{resolve_token, TokenStore, DEFAULT_STORE_PATH};
use clap::{Args, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

pub mod classify;
pub mod geojson;
pub mod route;
pub mod search;
pub mod stations;
pub mod token;

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct Options {
    /// AQI provider token (takes precedence over the stored token)
    #[arg(long, env = "WAQI_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Path of the key-value token store
    #[arg(long, env = "AQI_MAP_TOKEN_STORE", default_value = DEFAULT_STORE_PATH, global = true)]
    pub token_store: PathBuf,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    pub timeout: u64,
}

impl Options {
    pub fn load_store(&self) -> anyhow::Result<TokenStore> {
        TokenStore::load(&self.token_store)
    }

    /// Build the gateway with the resolved credential injected.
    pub fn gateway(&self) -> anyhow::Result<HttpGateway> {
        let store = self.load_store()?;
        let config = GatewayConfig {
            token: resolve_token(self.token.as_deref(), &store),
            timeout: Duration::from_secs(self.timeout),
            ..GatewayConfig::default()
        };
        Ok(HttpGateway::new(config)?)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the AQI category and color for a reading
    Classify {
        /// AQI value
        #[arg(allow_negative_numbers = true)]
        aqi: f64,

        /// Use the three-bucket Good/Moderate/Poor scale
        #[arg(long)]
        coarse: bool,
    },

    /// Geocode a place name (up to 5 results)
    Search {
        /// Place to look up
        query: String,
    },

    /// Fetch station readings for an area
    Stations {
        /// Center the query on the first geocoding hit for this place
        #[arg(long, conflicts_with_all = ["lat", "lon", "usa"])]
        place: Option<String>,

        /// Latitude of the query center
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude of the query center
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Query the contiguous United States
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        usa: bool,

        /// Half-width of the query box in degrees
        #[arg(long, default_value_t = aqi_core::geo::NEARBY_OFFSET_DEG)]
        offset: f64,

        /// Write readings to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write colored station markers to this GeoJSON file
        #[arg(long)]
        geojson: Option<PathBuf>,

        /// Color markers on the three-bucket scale
        #[arg(long)]
        coarse: bool,
    },

    /// Route between two places and color it by AQI along the way
    Route {
        /// Start place
        #[arg(long)]
        from: String,

        /// Destination place
        #[arg(long)]
        to: String,

        /// Number of points along the route to sample
        #[arg(long, default_value_t = aqi_data::sampling::DEFAULT_SAMPLE_COUNT)]
        samples: usize,

        /// Per-point AQI lookup timeout in seconds
        #[arg(long, default_value_t = 10)]
        sample_timeout: u64,

        /// Write colored route segments to this GeoJSON file
        #[arg(long)]
        geojson: Option<PathBuf>,

        /// Color segments on the three-bucket scale
        #[arg(long)]
        coarse: bool,
    },

    /// Manage the stored AQI provider token
    Token {
        #[command(subcommand)]
        action: token::TokenAction,
    },
}

pub async fn run(command: Command, options: Options) -> anyhow::Result<()> {
    match command {
        Command::Classify { aqi, coarse } => {
            classify::run_classify(aqi, coarse);
            Ok(())
        }
        Command::Search { query } => search::run_search(&options.gateway()?, &query).await,
        Command::Stations {
            place,
            lat,
            lon,
            usa,
            offset,
            csv,
            geojson,
            coarse,
        } => {
            let area = match (place, lat.zip(lon), usa) {
                (Some(place), _, _) => stations::Area::Place(place),
                (None, Some((lat, lon)), _) => {
                    stations::Area::Point(aqi_core::geo::Coordinate::new(lon, lat))
                }
                (None, None, true) => stations::Area::ContiguousUs,
                (None, None, false) => {
                    anyhow::bail!("Pass one of --place, --lat/--lon, or --usa")
                }
            };
            let output = stations::Output { csv, geojson };
            stations::run_stations(&options.gateway()?, area, offset, &output, coarse).await
        }
        Command::Route {
            from,
            to,
            samples,
            sample_timeout,
            geojson,
            coarse,
        } => {
            let request = route::RouteRequest {
                from,
                to,
                samples,
                sample_timeout: Duration::from_secs(sample_timeout),
                geojson,
                coarse,
            };
            route::run_route(&options.gateway()?, &request).await
        }
        Command::Token { action } => token::run_token(action, &options),
    }
}
