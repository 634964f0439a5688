// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output configuration.

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::category::CategoryKind;
use crate::channel::ChannelDescriptor;
use crate::error::{ConfigError, Result};
use crate::types::{OutputMode, TransitionTime};

/// Configuration of one output.
///
/// # Examples
///
/// ```
/// use vdc_output::output::OutputConfig;
/// use vdc_output::category::CategoryKind;
///
/// let config = OutputConfig::from_json(r#"{
///     "category": "audio",
///     "channels": [
///         { "id": "volume", "type": "audio_volume", "min": 0, "max": 100 },
///         { "id": "powerstate", "type": "power_state", "min": 0, "max": 2 }
///     ],
///     "transition_up_ms": 500
/// }"#).unwrap();
///
/// assert_eq!(config.category, CategoryKind::Audio);
/// assert_eq!(config.channels.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// How the primary channel is written to hardware.
    #[serde(default)]
    pub mode: OutputMode,

    /// Scene mapping category.
    #[serde(default)]
    pub category: CategoryKind,

    /// Channel descriptors; the first is the primary channel.
    pub channels: Vec<ChannelDescriptor>,

    /// Default transition time for rising values, in milliseconds.
    #[serde(default)]
    pub transition_up_ms: u64,

    /// Default transition time for falling values, in milliseconds.
    #[serde(default)]
    pub transition_down_ms: u64,
}

impl OutputConfig {
    /// Creates a gradual, standard-category configuration.
    #[must_use]
    pub fn new(channels: Vec<ChannelDescriptor>) -> Self {
        Self {
            mode: OutputMode::default(),
            category: CategoryKind::default(),
            channels,
            transition_up_ms: 0,
            transition_down_ms: 0,
        }
    }

    /// Single brightness channel.
    #[must_use]
    pub fn dimmer() -> Self {
        Self::new(vec![ChannelDescriptor::brightness()])
    }

    /// Brightness with hue, saturation and color temperature.
    #[must_use]
    pub fn color_light() -> Self {
        Self::new(vec![
            ChannelDescriptor::brightness(),
            ChannelDescriptor::hue(),
            ChannelDescriptor::saturation(),
            ChannelDescriptor::color_temperature(),
        ])
    }

    /// Shade with position and slat angle.
    #[must_use]
    pub fn shade() -> Self {
        Self::new(vec![
            ChannelDescriptor::shade_position(),
            ChannelDescriptor::shade_angle(),
        ])
    }

    /// Audio renderer with volume, power state and `sources` content sources.
    #[must_use]
    pub fn audio(sources: u16) -> Self {
        Self::new(vec![
            ChannelDescriptor::audio_volume(),
            ChannelDescriptor::power_state(),
            ChannelDescriptor::content_source(sources),
        ])
        .with_category(CategoryKind::Audio)
    }

    /// Sets the output mode.
    #[must_use]
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: CategoryKind) -> Self {
        self.category = category;
        self
    }

    /// Sets the default transition times.
    #[must_use]
    pub fn with_transitions(mut self, up: Duration, down: Duration) -> Self {
        self.transition_up_ms = u64::try_from(up.as_millis()).unwrap_or(u64::MAX);
        self.transition_down_ms = u64::try_from(down.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Default transition time for rising values.
    #[must_use]
    pub const fn transition_up(&self) -> TransitionTime {
        TransitionTime::from_millis(self.transition_up_ms)
    }

    /// Default transition time for falling values.
    #[must_use]
    pub const fn transition_down(&self) -> TransitionTime {
        TransitionTime::from_millis(self.transition_down_ms)
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`](crate::Error::Parse) for malformed JSON and
    /// [`Error::Config`](crate::Error::Config) for an invalid configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`](crate::Error::Parse) if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if there are no channels, two channels
    /// share an id, or a channel descriptor is invalid.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.channels.is_empty() {
            return Err(ConfigError::NoChannels);
        }
        let mut ids = HashSet::new();
        for channel in &self.channels {
            if !ids.insert(channel.id()) {
                return Err(ConfigError::DuplicateChannelId(channel.id().to_string()));
            }
            channel.validate()?;
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::dimmer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn presets_are_valid() {
        for config in [
            OutputConfig::dimmer(),
            OutputConfig::color_light(),
            OutputConfig::shade(),
            OutputConfig::audio(3),
        ] {
            assert!(config.validate().is_ok(), "{config:?}");
        }
        assert_eq!(OutputConfig::audio(3).category, CategoryKind::Audio);
    }

    #[test]
    fn json_roundtrip() {
        let config = OutputConfig::color_light()
            .with_mode(OutputMode::Binary)
            .with_transitions(Duration::from_millis(300), Duration::from_secs(1));
        let json = config.to_json().unwrap();
        let parsed = OutputConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.transition_up(), TransitionTime::from_millis(300));
        assert_eq!(parsed.transition_down(), TransitionTime::from_millis(1000));
    }

    #[test]
    fn defaults_when_omitted() {
        let config = OutputConfig::from_json(
            r#"{ "channels": [{ "id": "level", "min": 0, "max": 10 }] }"#,
        )
        .unwrap();
        assert_eq!(config.mode, OutputMode::Gradual);
        assert_eq!(config.category, CategoryKind::Standard);
        assert!(config.transition_up().is_immediate());
    }

    #[test]
    fn empty_channel_list_rejected() {
        let err = OutputConfig::from_json(r#"{ "channels": [] }"#).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NoChannels)));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let config = OutputConfig::new(vec![
            ChannelDescriptor::hue(),
            ChannelDescriptor::hue(),
        ]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateChannelId("hue".to_string()))
        );
    }

    #[test]
    fn degenerate_channel_rejected() {
        let err = OutputConfig::from_json(
            r#"{ "channels": [{ "id": "x", "min": 5, "max": 5 }] }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::DegenerateRange { .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            OutputConfig::from_json("{ nope"),
            Err(Error::Parse(_))
        ));
    }
}
