//! Rain configuration.
//!
//! Every literal of the effect (container id, column width, word, timing
//! ranges, element tags and class names) lives here so callers and tests can
//! override it. The defaults reproduce the stock ZENCHAIN rain.

use crate::error::RainError;

pub const DEFAULT_CONTAINER_ID: &str = "rain-container";
pub const DEFAULT_COLUMN_WIDTH: u32 = 60;
pub const DEFAULT_WORD: &str = "ZENCHAIN";

/// Configuration for one rain run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RainConfig {
    /// Element id of the container to populate.
    pub container_id: String,
    /// Horizontal slot per column, in CSS pixels.
    pub column_width: u32,
    /// Word repeated in every column, one letter element per character.
    pub word: String,
    pub duration_min_s: f64,
    pub duration_max_s: f64,
    pub delay_min_s: f64,
    pub delay_max_s: f64,
    /// Element tags created for columns and letters.
    pub column_tag: String,
    pub letter_tag: String,
    pub column_class: String,
    pub letter_class: String,
    /// Remove existing container children before appending. Off by default,
    /// so repeated runs accumulate column sets.
    pub clear_before: bool,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            column_width: DEFAULT_COLUMN_WIDTH,
            word: DEFAULT_WORD.to_string(),
            duration_min_s: 5.0,
            duration_max_s: 10.0,
            delay_min_s: 0.0,
            delay_max_s: 5.0,
            column_tag: "div".to_string(),
            letter_tag: "span".to_string(),
            column_class: "column".to_string(),
            letter_class: "letter".to_string(),
            clear_before: false,
        }
    }
}

impl RainConfig {
    pub fn validate(&self) -> Result<(), RainError> {
        if self.column_width == 0 {
            return Err(invalid("column_width must be greater than zero"));
        }
        if self.word.is_empty() {
            return Err(invalid("word must not be empty"));
        }
        for (name, value) in [
            ("container_id", &self.container_id),
            ("column_tag", &self.column_tag),
            ("letter_tag", &self.letter_tag),
            ("column_class", &self.column_class),
            ("letter_class", &self.letter_class),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(&format!("{name} must not be blank")));
            }
        }
        check_range("duration", self.duration_min_s, self.duration_max_s)?;
        check_range("delay", self.delay_min_s, self.delay_max_s)?;
        Ok(())
    }

    /// Parse a (possibly partial) JSON object; missing fields take defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, RainError> {
        let config: RainConfig =
            serde_json::from_str(json).map_err(|e| RainError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

fn check_range(name: &str, min: f64, max: f64) -> Result<(), RainError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(invalid(&format!("{name} bounds must be finite")));
    }
    if min < 0.0 {
        return Err(invalid(&format!("{name} minimum must not be negative")));
    }
    if min > max {
        return Err(invalid(&format!("{name} minimum {min} exceeds maximum {max}")));
    }
    Ok(())
}

fn invalid(msg: &str) -> RainError {
    RainError::InvalidConfig(msg.to_string())
}
