// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Factory defaults for the well-known scene slots.

use crate::channel::ChannelDescriptor;
use crate::types::SceneNumber;

/// Default level a scene stores for a level-type channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultLevel {
    /// Channel minimum (off).
    Off,
    /// Dimming floor: lowest level that is still on.
    Floor,
    /// Fraction of the channel range above the minimum.
    Fraction(f64),
    /// The slot has no meaningful default.
    DontCare,
}

impl DefaultLevel {
    /// Default level for a scene number.
    ///
    /// | Scenes | Level |
    /// |--------|-------|
    /// | off, area off, slow off, deep off | off |
    /// | preset 1, area on, max | 100 % |
    /// | preset 2 / 3 / 4 | 75 / 50 / 25 % |
    /// | min | dimming floor |
    /// | anything else | don't care |
    #[must_use]
    pub fn for_scene(number: SceneNumber) -> Self {
        match number {
            SceneNumber::PRESET_1 | SceneNumber::MAX => Self::Fraction(1.0),
            n if SceneNumber::AREA_ON.contains(&n) => Self::Fraction(1.0),
            SceneNumber::PRESET_2 => Self::Fraction(0.75),
            SceneNumber::PRESET_3 => Self::Fraction(0.5),
            SceneNumber::PRESET_4 => Self::Fraction(0.25),
            SceneNumber::MIN => Self::Floor,
            n if n.is_off() => Self::Off,
            _ => Self::DontCare,
        }
    }

    /// Resolves the level against a channel, `None` for don't care.
    #[must_use]
    pub fn resolve(&self, descriptor: &ChannelDescriptor) -> Option<f64> {
        match self {
            Self::Off => Some(descriptor.min()),
            Self::Floor => Some(descriptor.dim_floor()),
            Self::Fraction(f) => Some(descriptor.min() + f * descriptor.range()),
            Self::DontCare => None,
        }
    }
}
