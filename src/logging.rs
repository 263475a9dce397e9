use anyhow::{Context, Result};
use time::format_description::{self, OwnedFormatItem};
use tracing_subscriber::fmt::time::LocalTime;

use crate::config::DEFAULT_TIME_FORMAT;

/// Build the log subscriber. Logs go to stderr since stdout carries the page.
pub fn create_subscriber(
    verbose: bool,
    time_format: &str,
) -> Result<Box<dyn tracing::Subscriber + Send + Sync>> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let format_desc = parse_time_format(time_format)?;

    Ok(Box::new(
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_timer(LocalTime::new(format_desc))
            .with_writer(std::io::stderr)
            .finish(),
    ))
}

/// Parse a timestamp format, falling back to the default one
fn parse_time_format(time_format: &str) -> Result<OwnedFormatItem> {
    match format_description::parse_owned::<1>(time_format) {
        Ok(format_desc) => Ok(format_desc),
        Err(_) => {
            eprintln!("Custom time format '{time_format}' not supported. Using default format.");
            format_description::parse_owned::<1>(DEFAULT_TIME_FORMAT)
                .context("Failed to parse default time format")
        }
    }
}
