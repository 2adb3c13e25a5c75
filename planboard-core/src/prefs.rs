//! Display preferences and where they are kept.
//!
//! Every preference is stored as a plain string under a fixed key. Missing
//! or unreadable values fall back to their defaults, so a fresh install and
//! a hand-mangled file both load.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{PlanboardError, PlanboardResult};
use crate::format::{DateFormat, TimeFormat};
use crate::view::{CalendarView, WeekStart};

/// A string key/value store for preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> PlanboardResult<()>;
}

/// Preferences kept in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> PlanboardResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences in a flat TOML file, e.g. `~/.config/planboard/preferences.toml`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    pub fn default_path() -> PlanboardResult<PathBuf> {
        Ok(crate::config::config_dir()?.join("preferences.toml"))
    }

    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> PlanboardResult<Self> {
        let path = path.as_ref().to_path_buf();

        let values = match std::fs::read_to_string(&path) {
            Ok(content) => {
                let table: toml::Table = toml::from_str(&content)
                    .map_err(|e| PlanboardError::Config(format!("{}: {e}", path.display())))?;
                string_values(table)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(FileStore { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> PlanboardResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(&self.values)
            .map_err(|e| PlanboardError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Keep every value as a string. Hand-written scalars like `weekStart = 1`
/// are stringified; arrays and tables are dropped.
fn string_values(table: toml::Table) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();

    for (key, value) in table {
        match value {
            toml::Value::String(s) => {
                values.insert(key, s);
            }
            toml::Value::Integer(_)
            | toml::Value::Float(_)
            | toml::Value::Boolean(_)
            | toml::Value::Datetime(_) => {
                log::warn!("Preference {key} is not a string, reading it as \"{value}\"");
                values.insert(key, value.to_string());
            }
            toml::Value::Array(_) | toml::Value::Table(_) => {
                log::warn!("Ignoring preference {key}: expected a string");
            }
        }
    }

    values
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> PlanboardResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Light or dark output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = PlanboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(PlanboardError::Preference {
                key: "theme".into(),
                value: s.to_string(),
            }),
        }
    }
}

/// Preference keys, as written to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefKey {
    TimeFormat,
    WeekStart,
    DateFormat,
    Theme,
    CurrentView,
}

impl PrefKey {
    pub const ALL: [PrefKey; 5] = [
        PrefKey::TimeFormat,
        PrefKey::WeekStart,
        PrefKey::DateFormat,
        PrefKey::Theme,
        PrefKey::CurrentView,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrefKey::TimeFormat => "timeFormat",
            PrefKey::WeekStart => "weekStart",
            PrefKey::DateFormat => "dateFormat",
            PrefKey::Theme => "theme",
            PrefKey::CurrentView => "currentView",
        }
    }
}

impl fmt::Display for PrefKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrefKey {
    type Err = PlanboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrefKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| PlanboardError::UnknownPreference(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub time_format: TimeFormat,
    pub week_start: WeekStart,
    pub date_format: DateFormat,
    pub theme: Theme,
    pub current_view: CalendarView,
}

impl Preferences {
    pub fn load(store: &impl PreferenceStore) -> Self {
        Preferences {
            time_format: read_or_default(store, PrefKey::TimeFormat),
            week_start: read_or_default(store, PrefKey::WeekStart),
            date_format: read_or_default(store, PrefKey::DateFormat),
            theme: read_or_default(store, PrefKey::Theme),
            current_view: read_or_default(store, PrefKey::CurrentView),
        }
    }

    /// Write every key.
    pub fn save(&self, store: &mut impl PreferenceStore) -> PlanboardResult<()> {
        for key in PrefKey::ALL {
            store.set(key.as_str(), &self.get(key))?;
        }
        Ok(())
    }

    /// Current value of `key` as it would be stored.
    pub fn get(&self, key: PrefKey) -> String {
        match key {
            PrefKey::TimeFormat => self.time_format.to_string(),
            PrefKey::WeekStart => self.week_start.to_string(),
            PrefKey::DateFormat => self.date_format.to_string(),
            PrefKey::Theme => self.theme.to_string(),
            PrefKey::CurrentView => self.current_view.to_string(),
        }
    }

    /// Validate and apply a single value.
    pub fn set(&mut self, key: PrefKey, value: &str) -> PlanboardResult<()> {
        match key {
            PrefKey::TimeFormat => self.time_format = value.parse()?,
            PrefKey::WeekStart => self.week_start = value.parse()?,
            PrefKey::DateFormat => self.date_format = value.parse()?,
            PrefKey::Theme => self.theme = value.parse()?,
            PrefKey::CurrentView => self.current_view = value.parse()?,
        }
        Ok(())
    }

    /// Remember the last view the user looked at.
    pub fn record_view(
        &mut self,
        view: CalendarView,
        store: &mut impl PreferenceStore,
    ) -> PlanboardResult<()> {
        self.current_view = view;
        store.set(PrefKey::CurrentView.as_str(), view.as_str())
    }
}

fn read_or_default<T>(store: &impl PreferenceStore, key: PrefKey) -> T
where
    T: FromStr + Default,
{
    let Some(raw) = store.get(key.as_str()) else {
        return T::default();
    };

    raw.parse().unwrap_or_else(|_| {
        log::warn!("Ignoring invalid {} preference '{}', using default", key, raw);
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn empty_store_yields_defaults() {
        let prefs = Preferences::load(&MemoryStore::new());
        assert_eq!(prefs.time_format, TimeFormat::TwelveHour);
        assert_eq!(prefs.week_start, WeekStart(Weekday::Sun));
        assert_eq!(prefs.date_format, DateFormat::YearMonthDay);
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.current_view, CalendarView::DayGridMonth);
    }

    #[test]
    fn defaults_are_written_as_plain_strings() {
        let mut store = MemoryStore::new();
        Preferences::default().save(&mut store).unwrap();
        assert_eq!(store.get("timeFormat").as_deref(), Some("12"));
        assert_eq!(store.get("weekStart").as_deref(), Some("0"));
        assert_eq!(store.get("dateFormat").as_deref(), Some("YYYY-MM-DD"));
        assert_eq!(store.get("theme").as_deref(), Some("light"));
        assert_eq!(store.get("currentView").as_deref(), Some("dayGridMonth"));
    }

    #[test]
    fn saved_preferences_read_back() {
        let mut store = MemoryStore::new();
        let mut prefs = Preferences::default();
        prefs.set(PrefKey::TimeFormat, "24").unwrap();
        prefs.set(PrefKey::WeekStart, "1").unwrap();
        prefs.set(PrefKey::DateFormat, "DD-MM-YYYY").unwrap();
        prefs.set(PrefKey::Theme, "dark").unwrap();
        prefs.save(&mut store).unwrap();

        assert_eq!(Preferences::load(&store), prefs);
    }

    #[test]
    fn invalid_stored_value_falls_back() {
        let mut store = MemoryStore::new();
        store.set("theme", "solarized").unwrap();
        store.set("timeFormat", "24").unwrap();

        let prefs = Preferences::load(&store);
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.time_format, TimeFormat::TwentyFourHour);
    }

    #[test]
    fn set_rejects_invalid_value() {
        let mut prefs = Preferences::default();
        assert!(prefs.set(PrefKey::WeekStart, "9").is_err());
        assert_eq!(prefs.week_start, WeekStart::default());
    }

    #[test]
    fn record_view_persists_current_view() {
        let mut store = MemoryStore::new();
        let mut prefs = Preferences::load(&store);
        prefs.record_view(CalendarView::ListWeek, &mut store).unwrap();
        assert_eq!(store.get("currentView").as_deref(), Some("listWeek"));
        assert_eq!(Preferences::load(&store).current_view, CalendarView::ListWeek);
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let mut store = FileStore::open(&path).unwrap();
        assert!(store.get("theme").is_none());
        store.set("theme", "dark").unwrap();
        store.set("weekStart", "1").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        let prefs = Preferences::load(&reopened);
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.week_start, WeekStart(Weekday::Mon));
    }

    #[test]
    fn hand_written_values_still_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        std::fs::write(
            &path,
            "theme = \"dark\"\nweekStart = 1\ntimeFormat = 24\nrecent = [\"a\", \"b\"]\n",
        )
        .unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("weekStart").as_deref(), Some("1"));
        assert!(store.get("recent").is_none());

        let prefs = Preferences::load(&store);
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.week_start, WeekStart(Weekday::Mon));
        assert_eq!(prefs.time_format, TimeFormat::TwentyFourHour);
    }

    #[test]
    fn keys_parse_case_insensitively() {
        assert_eq!("dateformat".parse::<PrefKey>().unwrap(), PrefKey::DateFormat);
        assert!("fontSize".parse::<PrefKey>().is_err());
    }
}
