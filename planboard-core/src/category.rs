//! Event categories.
//!
//! The events API has no category field: the background color is the
//! category. One color is reserved for deadlines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PlanboardError, PlanboardResult};

pub const DEFAULT_COLOR: &str = "#3788d8";
pub const DEADLINE_COLOR: &str = "#dc3545";

/// Named categories offered by the add/edit form.
pub const PRESETS: &[(&str, &str)] = &[
    ("event", DEFAULT_COLOR),
    ("deadline", DEADLINE_COLOR),
    ("meeting", "#198754"),
    ("reminder", "#ffc107"),
    ("personal", "#6f42c1"),
];

/// A `backgroundColor` value, e.g. `#3788d8`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn deadline() -> Self {
        Color(DEADLINE_COLOR.to_string())
    }

    /// Accepts a preset name (`deadline`) or a `#rrggbb` value.
    pub fn parse(input: &str) -> PlanboardResult<Self> {
        let input = input.trim();

        if let Some((_, hex)) = PRESETS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(input))
        {
            return Ok(Color(hex.to_string()));
        }

        if parse_hex(input).is_some() {
            return Ok(Color(input.to_ascii_lowercase()));
        }

        Err(PlanboardError::InvalidColor(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_deadline(&self) -> bool {
        self.0.eq_ignore_ascii_case(DEADLINE_COLOR)
    }

    /// Preset name for this color, if it is one of the presets.
    pub fn preset_name(&self) -> Option<&'static str> {
        PRESETS
            .iter()
            .find(|(_, hex)| hex.eq_ignore_ascii_case(&self.0))
            .map(|(name, _)| *name)
    }

    /// RGB components, `None` for values that aren't `#rrggbb`.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex(&self.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color(DEFAULT_COLOR.to_string())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.preset_name() {
            Some(name) => write!(f, "{} ({})", name, self.0),
            None => f.write_str(&self.0),
        }
    }
}

impl FromStr for Color {
    type Err = PlanboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

// The server only sets a default on insert, so tolerate null here.
impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?
            .map(Color)
            .unwrap_or_default())
    }
}

fn parse_hex(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
