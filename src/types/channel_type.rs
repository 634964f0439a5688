// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel kind.
//!
//! Every channel carries a fixed [`ChannelType`] describing the physical
//! quantity it controls. The type never changes over the lifetime of a
//! channel and is used for lookups (`ChannelSet::by_type`) and for picking
//! sensible descriptor defaults.

use std::fmt;

/// The kind of quantity a channel controls.
///
/// | Type | Typical range | Enumerated |
/// |------|---------------|------------|
/// | `Brightness` | 0-100 % | no |
/// | `Hue` | 0-360 ° (wraps) | no |
/// | `Saturation` | 0-100 % | no |
/// | `ColorTemperature` | 100-1000 mired | no |
/// | `ShadePosition` | 0-100 % | no |
/// | `ShadeAngle` | 0-100 % | no |
/// | `AudioVolume` | 0-100 % | no |
/// | `PowerState` | 0-2 | yes |
/// | `ContentSource` | 0-n | yes |
/// | `Generic` | any | no |
///
/// # Examples
///
/// ```
/// use vdc_output::types::ChannelType;
///
/// assert!(ChannelType::PowerState.is_enumerated());
/// assert!(!ChannelType::Brightness.is_enumerated());
/// assert_eq!(ChannelType::Hue.as_str(), "hue");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    /// Light output level.
    Brightness,
    /// Color hue angle.
    Hue,
    /// Color saturation.
    Saturation,
    /// White color temperature.
    ColorTemperature,
    /// Blind/shade vertical position.
    ShadePosition,
    /// Blind/shade slat angle.
    ShadeAngle,
    /// Audio renderer volume.
    AudioVolume,
    /// Device power state (off/on/paused).
    PowerState,
    /// Selected input or content source index.
    ContentSource,
    /// Any other scalar quantity.
    #[default]
    Generic,
}

impl ChannelType {
    /// Returns the identifier used in configuration documents and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::ColorTemperature => "color_temperature",
            Self::ShadePosition => "shade_position",
            Self::ShadeAngle => "shade_angle",
            Self::AudioVolume => "audio_volume",
            Self::PowerState => "power_state",
            Self::ContentSource => "content_source",
            Self::Generic => "generic",
        }
    }

    /// Returns `true` for channels whose values are indices into a list of
    /// discrete states rather than points on a continuous scale.
    #[must_use]
    pub const fn is_enumerated(&self) -> bool {
        matches!(self, Self::PowerState | Self::ContentSource)
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&ChannelType::ColorTemperature).unwrap();
        assert_eq!(json, "\"color_temperature\"");

        let parsed: ChannelType = serde_json::from_str("\"audio_volume\"").unwrap();
        assert_eq!(parsed, ChannelType::AudioVolume);
    }

    #[test]
    fn display_matches_serde_name() {
        assert_eq!(ChannelType::ShadeAngle.to_string(), "shade_angle");
        assert_eq!(ChannelType::default(), ChannelType::Generic);
    }
}
