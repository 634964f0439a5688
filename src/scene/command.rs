// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene commands.

use std::fmt;

use crate::types::SceneNumber;

/// Semantic action of a scene recall.
///
/// Only the value-recalling commands load channels from the scene; dimming
/// directives are handled elsewhere and leave channels untouched.
///
/// # Examples
///
/// ```
/// use vdc_output::scene::SceneCommand;
/// use vdc_output::types::SceneNumber;
///
/// assert_eq!(SceneCommand::for_scene(SceneNumber::OFF), SceneCommand::Off);
/// assert!(SceneCommand::Max.affects_channels());
/// assert!(!SceneCommand::Increment.affects_channels());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SceneCommand {
    /// Recall the stored values.
    #[default]
    Invoke,
    /// Restore the values from before the last recall.
    Undo,
    /// Switch off.
    Off,
    /// Fade off slowly.
    SlowOff,
    /// Go to minimum (non-zero) level.
    Min,
    /// Go to maximum level.
    Max,
    /// Dim one step up.
    Increment,
    /// Dim one step down.
    Decrement,
    /// Stop dimming.
    Stop,
    /// Continue area stepping.
    AreaContinue,
}

impl SceneCommand {
    /// Returns the default command for a scene number.
    #[must_use]
    pub fn for_scene(number: SceneNumber) -> Self {
        match number {
            SceneNumber::SLOW_OFF => Self::SlowOff,
            SceneNumber::MIN => Self::Min,
            SceneNumber::MAX => Self::Max,
            SceneNumber::INCREMENT => Self::Increment,
            SceneNumber::DECREMENT => Self::Decrement,
            SceneNumber::STOP => Self::Stop,
            SceneNumber::AREA_CONTINUE => Self::AreaContinue,
            n if n.is_off() => Self::Off,
            _ => Self::Invoke,
        }
    }

    /// Returns `true` if recalling with this command loads channel values.
    #[must_use]
    pub const fn affects_channels(&self) -> bool {
        matches!(
            self,
            Self::Invoke | Self::Undo | Self::Off | Self::SlowOff | Self::Min | Self::Max
        )
    }

    /// Returns the identifier used in configuration documents and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Invoke => "invoke",
            Self::Undo => "undo",
            Self::Off => "off",
            Self::SlowOff => "slow_off",
            Self::Min => "min",
            Self::Max => "max",
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::Stop => "stop",
            Self::AreaContinue => "area_continue",
        }
    }
}

impl fmt::Display for SceneCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
