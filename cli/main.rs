//! This module contains the main entrypoint to the traintrack cli.

use anyhow::{anyhow, Result};
use clap::Parser;
use colored::Colorize;
use std::{path::PathBuf, time::Duration};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

#[derive(Parser)]
#[clap(
	about = "Watch machine learning training runs as they happen.",
	disable_help_subcommand = true
)]
enum Options {
	#[clap(name = "app")]
	App(Box<AppOptions>),
}

#[derive(Parser, Debug)]
#[clap(about = "run the dashboard")]
#[clap(long_about = "run the dashboard web app, which charts the runs recorded by the tracking api")]
struct AppOptions {
	#[clap(long, default_value = "0.0.0.0")]
	host: std::net::IpAddr,
	#[clap(long, env = "PORT", default_value = "8080")]
	port: u16,
	#[clap(
		long,
		env = "TRAINTRACK_API_URL",
		default_value = traintrack_client::DEFAULT_API_URL,
		help = "the base url of the tracking api"
	)]
	api_url: Url,
	#[clap(
		long = "poll-interval",
		env = "TRAINTRACK_POLL_INTERVAL_MS",
		default_value = "3000",
		help = "how often live charts are refreshed, in milliseconds"
	)]
	poll_interval_ms: u64,
	#[clap(
		long = "live-chart-ttl",
		env = "TRAINTRACK_LIVE_CHART_TTL_SECS",
		default_value = "60",
		help = "stop refreshing a chart nobody has viewed for this many seconds"
	)]
	live_chart_ttl_secs: u64,
	#[clap(
		long,
		env = "TRAINTRACK_THEME_FILE",
		help = "where to persist the theme, defaults to theme.json in the user config directory"
	)]
	theme_file: Option<PathBuf>,
}

fn main() {
	init_logging();
	let options = Options::parse();
	let result = match options {
		Options::App(options) => cli_app(*options),
	};
	if let Err(error) = result {
		eprintln!("{}: {:#}", "error".red().bold(), error);
		std::process::exit(1);
	}
}

/// Log to stderr. `RUST_LOG` overrides the default `info` level.
fn init_logging() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::registry()
		.with(fmt::layer().with_writer(std::io::stderr))
		.with(filter)
		.init();
}

fn cli_app(options: AppOptions) -> Result<()> {
	if options.poll_interval_ms == 0 {
		return Err(anyhow!("the poll interval must be at least one millisecond"));
	}
	let theme_file = match options.theme_file {
		Some(theme_file) => Some(theme_file),
		None => default_theme_file(),
	};
	traintrack_app::run(traintrack_app::Options {
		host: options.host,
		port: options.port,
		api_url: options.api_url,
		poll_interval: Duration::from_millis(options.poll_interval_ms),
		live_chart_ttl: Duration::from_secs(options.live_chart_ttl_secs),
		theme_file,
	})
}

/// The theme file in the user config directory, found with the `dirs` crate. Without a config directory the theme is kept in memory.
fn default_theme_file() -> Option<PathBuf> {
	match dirs::config_dir() {
		Some(config_dir) => Some(config_dir.join("traintrack").join("theme.json")),
		None => {
			tracing::warn!("failed to find the user config directory, the theme will not be persisted");
			None
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_app_defaults() {
		let Options::App(options) = Options::try_parse_from(&["traintrack", "app"]).unwrap();
		assert_eq!(options.port, 8080);
		assert_eq!(options.poll_interval_ms, 3000);
		assert_eq!(options.api_url.as_str(), "http://localhost:8000/");
	}

	#[test]
	fn test_app_overrides() {
		let Options::App(options) = Options::try_parse_from(&[
			"traintrack",
			"app",
			"--api-url",
			"http://tracking:9000",
			"--poll-interval",
			"500",
			"--theme-file",
			"/tmp/theme.json",
		])
		.unwrap();
		assert_eq!(options.api_url.as_str(), "http://tracking:9000/");
		assert_eq!(options.poll_interval_ms, 500);
		assert_eq!(options.theme_file, Some(PathBuf::from("/tmp/theme.json")));
	}
}
