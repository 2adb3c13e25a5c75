pub mod delete;
pub mod edit;
pub mod list;
pub mod new;
pub mod reschedule;
pub mod settings;
pub mod show;
pub mod upcoming;

use anyhow::{Context as _, Result};
use chrono::{NaiveDate, NaiveTime};
use planboard_core::config::ClientConfig;
use planboard_core::{CalendarSession, FileStore, Preferences};

use crate::client::ApiClient;
use crate::render::Palette;
use crate::utils::tui::create_spinner;

/// Everything a command needs: config, saved preferences and their store.
pub struct Context {
    pub config: ClientConfig,
    pub store: FileStore,
    pub prefs: Preferences,
}

impl Context {
    pub fn load(server: Option<String>) -> Result<Self> {
        let mut config = ClientConfig::load().context("Failed to load config")?;
        if let Some(server) = server {
            config.server_url = server;
        }

        let store_path = FileStore::default_path()?;
        let store = FileStore::open(&store_path)
            .with_context(|| format!("Failed to read {}", store_path.display()))?;
        let prefs = Preferences::load(&store);

        Ok(Context {
            config,
            store,
            prefs,
        })
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.prefs.theme)
    }

    /// Connect and fetch the event list.
    pub async fn open_session(&self) -> Result<CalendarSession<ApiClient>> {
        let client = ApiClient::new(&self.config)?;
        let spinner = create_spinner(format!("Fetching events from {}", self.config.server_url));

        let session = CalendarSession::open(client).await;
        spinner.finish_and_clear();

        session.with_context(|| format!("Failed to load events from {}", self.config.server_url))
    }
}

/// `YYYY-MM-DD`
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date \"{}\". Expected YYYY-MM-DD", input))
}

/// `HH:MM` (seconds allowed and dropped)
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .with_context(|| format!("Invalid time \"{}\". Expected HH:MM", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_times_with_and_without_seconds() {
        assert_eq!(parse_time("09:30").unwrap(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(parse_time("21:05:00").unwrap(), NaiveTime::from_hms_opt(21, 5, 0).unwrap());
        assert!(parse_time("9.30pm").is_err());
    }

    #[test]
    fn parses_iso_dates_only() {
        assert!(parse_date("2025-03-20").is_ok());
        assert!(parse_date("20-03-2025").is_err());
    }
}
