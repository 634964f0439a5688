// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene number type.

use std::fmt;

/// Identifies a scene slot of a device.
///
/// Scene numbers follow the usual home-automation numbering where a few
/// slots carry fixed meaning (off, presets, min/max, dimming directives).
/// The well-known slots are available as constants.
///
/// # Examples
///
/// ```
/// use vdc_output::types::SceneNumber;
///
/// assert_eq!(SceneNumber::OFF.value(), 0);
/// assert_eq!(SceneNumber::PRESET_1.value(), 5);
/// assert!(SceneNumber::new(17).is_preset());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct SceneNumber(u8);

impl SceneNumber {
    /// Main off.
    pub const OFF: Self = Self(0);
    /// Area 1-4 off.
    pub const AREA_OFF: [Self; 4] = [Self(1), Self(2), Self(3), Self(4)];
    /// Main on (preset 1).
    pub const PRESET_1: Self = Self(5);
    /// Area 1-4 on.
    pub const AREA_ON: [Self; 4] = [Self(6), Self(7), Self(8), Self(9)];
    /// Area stepping continue.
    pub const AREA_CONTINUE: Self = Self(10);
    /// Dim one step down.
    pub const DECREMENT: Self = Self(11);
    /// Dim one step up.
    pub const INCREMENT: Self = Self(12);
    /// Minimum (non-zero) level.
    pub const MIN: Self = Self(13);
    /// Maximum level.
    pub const MAX: Self = Self(14);
    /// Stop a running dimming or movement.
    pub const STOP: Self = Self(15);
    /// Preset 2.
    pub const PRESET_2: Self = Self(17);
    /// Preset 3.
    pub const PRESET_3: Self = Self(18);
    /// Preset 4.
    pub const PRESET_4: Self = Self(19);
    /// Slowly fade to off.
    pub const SLOW_OFF: Self = Self(40);
    /// Deep off (also switches off standby consumers).
    pub const DEEP_OFF: Self = Self(68);

    /// Number of scene slots per device.
    pub const COUNT: usize = 128;

    /// Creates a scene number.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the raw scene number.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns `true` for the main presets 1-4.
    #[must_use]
    pub const fn is_preset(&self) -> bool {
        matches!(self.0, 5 | 17 | 18 | 19)
    }

    /// Returns `true` for off-type scenes.
    #[must_use]
    pub const fn is_off(&self) -> bool {
        matches!(self.0, 0..=4 | 40 | 68)
    }
}

impl From<u8> for SceneNumber {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for SceneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_scenes() {
        assert!(SceneNumber::OFF.is_off());
        assert!(SceneNumber::AREA_OFF.iter().all(SceneNumber::is_off));
        assert!(SceneNumber::SLOW_OFF.is_off());
        assert!(SceneNumber::DEEP_OFF.is_off());
        assert!(!SceneNumber::PRESET_1.is_off());
    }

    #[test]
    fn presets() {
        assert!(SceneNumber::PRESET_1.is_preset());
        assert!(SceneNumber::PRESET_4.is_preset());
        assert!(!SceneNumber::MAX.is_preset());
    }

    #[test]
    fn serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&SceneNumber::MAX).unwrap(), "14");
        assert_eq!(SceneNumber::new(18).to_string(), "scene 18");
    }
}
