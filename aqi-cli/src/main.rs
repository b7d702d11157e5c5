//! aqi-map - command line air-quality map: station readings, place search,
//! and AQI-colored driving routes.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "aqi-map",
    version,
    about = "Air quality readings and AQI-colored routes"
)]
struct Cli {
    #[command(flatten)]
    options: aqi_cmd::Options,

    #[command(subcommand)]
    command: aqi_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Token store: {}", cli.options.token_store.display());
    aqi_cmd::run(cli.command, cli.options).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_route() {
        let cli = Cli::try_parse_from([
            "aqi-map", "route", "--from", "Denver", "--to", "Boulder", "--samples", "5",
        ])
        .unwrap();
        match cli.command {
            aqi_cmd::Command::Route { from, to, samples, .. } => {
                assert_eq!(from, "Denver");
                assert_eq!(to, "Boulder");
                assert_eq!(samples, 5);
            }
            _ => panic!("expected route"),
        }
    }

    #[test]
    fn test_parse_stations_point() {
        let cli = Cli::try_parse_from([
            "aqi-map", "stations", "--lat", "40.0", "--lon", "-74.5", "--timeout", "5",
        ])
        .unwrap();
        assert_eq!(cli.options.timeout, 5);
        match cli.command {
            aqi_cmd::Command::Stations { lat, lon, offset, .. } => {
                assert_eq!(lat, Some(40.0));
                assert_eq!(lon, Some(-74.5));
                assert_eq!(offset, 0.18);
            }
            _ => panic!("expected stations"),
        }
        assert!(Cli::try_parse_from(["aqi-map", "stations", "--lat", "40.0"]).is_err());
        assert!(Cli::try_parse_from(["aqi-map", "stations", "--place", "x", "--usa"]).is_err());
    }

    #[test]
    fn test_parse_classify_negative() {
        let cli = Cli::try_parse_from(["aqi-map", "classify", "-5"]).unwrap();
        assert!(matches!(cli.command, aqi_cmd::Command::Classify { aqi, .. } if aqi == -5.0));
    }
}
