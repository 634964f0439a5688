// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device categories and their scene-to-channel mappings.
//!
//! Every category maps scenes onto channels through [`SceneMapping`]. The set
//! of categories is closed: [`Category`] is an enum with one variant per
//! category and dispatches to the variant's mapping. Mappings only use the
//! public channel setters and getters, never transition internals.

mod audio;
mod standard;

pub use audio::{AudioMapping, AudioPowerState};
pub use standard::StandardMapping;

use serde::{Deserialize, Serialize};

use crate::output::{ChannelSet, SceneTiming};
use crate::scene::Scene;
use crate::types::SceneNumber;

/// Loads and saves channel values through scenes.
pub trait SceneMapping {
    /// Sets channels from the scene, honoring its don't-care bits.
    fn load_channels_from_scene(
        &mut self,
        channels: &mut ChannelSet,
        scene: &Scene,
        timing: SceneTiming,
    );

    /// Stores the current channel values into the scene.
    fn save_channels_to_scene(&self, channels: &ChannelSet, scene: &mut Scene);
}

/// Category identifier used in configuration documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Single primary channel mapping (lights, blinds, generic actuators).
    #[default]
    Standard,
    /// Volume, power state and content source.
    Audio,
}

impl CategoryKind {
    /// Returns the identifier used in configuration documents.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Audio => "audio",
        }
    }
}

/// A device category with its mapping state.
#[derive(Debug, Clone)]
pub enum Category {
    /// Primary channel only.
    Standard(StandardMapping),
    /// Audio renderer.
    Audio(AudioMapping),
}

impl Default for Category {
    fn default() -> Self {
        Self::Standard(StandardMapping)
    }
}

impl From<CategoryKind> for Category {
    fn from(kind: CategoryKind) -> Self {
        match kind {
            CategoryKind::Standard => Self::Standard(StandardMapping),
            CategoryKind::Audio => Self::Audio(AudioMapping::default()),
        }
    }
}

impl Category {
    /// The category identifier.
    #[must_use]
    pub const fn kind(&self) -> CategoryKind {
        match self {
            Self::Standard(_) => CategoryKind::Standard,
            Self::Audio(_) => CategoryKind::Audio,
        }
    }

    /// Builds the factory default scene for `number`.
    #[must_use]
    pub fn default_scene(&self, number: SceneNumber, channels: &ChannelSet) -> Scene {
        match self {
            Self::Standard(m) => m.default_scene(number, channels),
            Self::Audio(m) => m.default_scene(number, channels),
        }
    }
}

impl SceneMapping for Category {
    fn load_channels_from_scene(
        &mut self,
        channels: &mut ChannelSet,
        scene: &Scene,
        timing: SceneTiming,
    ) {
        match self {
            Self::Standard(m) => m.load_channels_from_scene(channels, scene, timing),
            Self::Audio(m) => m.load_channels_from_scene(channels, scene, timing),
        }
    }

    fn save_channels_to_scene(&self, channels: &ChannelSet, scene: &mut Scene) {
        match self {
            Self::Standard(m) => m.save_channels_to_scene(channels, scene),
            Self::Audio(m) => m.save_channels_to_scene(channels, scene),
        }
    }
}

/// Scene with every channel marked don't care.
fn blank_scene(number: SceneNumber, channels: &ChannelSet) -> Scene {
    let mut scene = Scene::new(number, channels.len());
    for index in 0..channels.len() {
        scene.set_dont_care(index, true);
    }
    scene
}
