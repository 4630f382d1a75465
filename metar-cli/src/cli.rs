use anyhow::Context;
use clap::{Parser, Subcommand};
use metar_core::{Config, MetarFetcher, ReqwestClient};
use std::sync::Arc;
use tracing::debug;

use crate::display;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "metar", version, about = "Current METAR observations from aviationweather.gov")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the default station and connection settings.
    Configure {
        /// Default station code, e.g. "EDDH".
        #[arg(long)]
        station: Option<String>,

        /// Data server base URL.
        #[arg(long)]
        endpoint: Option<String>,

        /// Request timeout in seconds.
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Show the current METAR for a station.
    Show {
        /// Station code; falls back to the configured default.
        station: Option<String>,

        /// Print the decoded observation as JSON.
        #[arg(long)]
        json: bool,

        /// Also show temperatures in Fahrenheit.
        #[arg(long)]
        imperial: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure { station, endpoint, timeout } => {
                configure(&mut config, station, endpoint, timeout)?;
                config.save()?;
                println!("Saved configuration to {}", Config::config_file_path()?.display());
            }
            Command::Show { station, json, imperial } => {
                let station = match station {
                    Some(s) => s,
                    None => config.default_station()?.to_string(),
                };

                let fetcher = fetcher_from_config(&config)?;
                debug!(%station, endpoint = %fetcher.endpoint(), "fetching current METAR");
                let obs = fetcher
                    .fetch_current_station_weather(&station)
                    .await
                    .with_context(|| format!("Failed to fetch METAR for '{station}'"))?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&obs)?);
                } else {
                    print!("{}", display::render(&obs, imperial));
                }
            }
        }

        Ok(())
    }
}

fn fetcher_from_config(config: &Config) -> anyhow::Result<MetarFetcher> {
    let client = Arc::new(ReqwestClient::from_config(config)?);
    let mut fetcher = MetarFetcher::new(client);
    if let Some(endpoint) = config.endpoint_url()? {
        fetcher = fetcher.with_endpoint(endpoint);
    }
    Ok(fetcher)
}

/// Apply values given as flags; ask for the station when it is missing.
fn configure(
    config: &mut Config,
    station: Option<String>,
    endpoint: Option<String>,
    timeout: Option<u64>,
) -> anyhow::Result<()> {
    let station = match station {
        Some(s) => s,
        None => {
            let mut prompt = inquire::Text::new("Default station code:")
                .with_help_message("ICAO identifier, e.g. EDDH or KJFK");
            if let Some(current) = config.default_station.as_deref() {
                prompt = prompt.with_default(current);
            }
            prompt.prompt().context("Failed to read station code")?
        }
    };
    config.set_default_station(&station);

    if let Some(endpoint) = endpoint {
        config.endpoint = Some(endpoint);
        config.endpoint_url()?;
    }
    if let Some(secs) = timeout {
        config.timeout_secs = Some(secs);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_with_flags_does_not_prompt() {
        let mut cfg = Config::default();
        configure(&mut cfg, Some("eddh".into()), Some("http://localhost:1/ds".into()), Some(7))
            .expect("no prompt needed");

        assert_eq!(cfg.default_station.as_deref(), Some("eddh"));
        assert_eq!(cfg.endpoint.as_deref(), Some("http://localhost:1/ds"));
        assert_eq!(cfg.timeout_secs, Some(7));
    }

    #[test]
    fn configure_keeps_settings_without_flags() {
        let mut cfg = Config {
            endpoint: Some("http://localhost:1/ds".into()),
            timeout_secs: Some(3),
            ..Config::default()
        };
        configure(&mut cfg, Some("KJFK".into()), None, None).expect("no prompt needed");

        assert_eq!(cfg.default_station.as_deref(), Some("KJFK"));
        assert_eq!(cfg.endpoint.as_deref(), Some("http://localhost:1/ds"));
        assert_eq!(cfg.timeout_secs, Some(3));
    }

    #[test]
    fn configure_rejects_bad_endpoint() {
        let mut cfg = Config::default();
        let err = configure(&mut cfg, Some("EDDH".into()), Some("nope".into()), None).unwrap_err();

        assert!(err.to_string().contains("Invalid endpoint URL"));
    }

    #[test]
    fn fetcher_uses_configured_endpoint() {
        let cfg = Config { endpoint: Some("http://localhost:8080/ds".into()), ..Config::default() };
        let fetcher = fetcher_from_config(&cfg).expect("valid config");

        assert_eq!(fetcher.endpoint().as_str(), "http://localhost:8080/ds");
    }

    #[test]
    fn parses_show_arguments() {
        let cli = Cli::try_parse_from(["metar", "show", "EDDH", "--json"]).expect("valid args");

        let Command::Show { station, json, imperial } = cli.command else {
            panic!("expected show");
        };
        assert_eq!(station.as_deref(), Some("EDDH"));
        assert!(json);
        assert!(!imperial);
    }
}
