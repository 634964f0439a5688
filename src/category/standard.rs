// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Default single-channel mapping.

use super::{SceneMapping, blank_scene};
use crate::output::{ChannelSet, SceneTiming};
use crate::scene::{DefaultLevel, Scene};
use crate::types::SceneNumber;

const PRIMARY: usize = 0;

/// Maps a scene onto the primary channel only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StandardMapping;

impl StandardMapping {
    /// Default scene: the primary channel gets the table level, the others
    /// are left alone.
    #[must_use]
    pub fn default_scene(&self, number: SceneNumber, channels: &ChannelSet) -> Scene {
        let mut scene = blank_scene(number, channels);
        match DefaultLevel::for_scene(number).resolve(channels.primary().descriptor()) {
            Some(level) => scene.capture_value(PRIMARY, level),
            None => scene.flags_mut().dont_care = true,
        }
        scene
    }
}

impl SceneMapping for StandardMapping {
    fn load_channels_from_scene(
        &mut self,
        channels: &mut ChannelSet,
        scene: &Scene,
        timing: SceneTiming,
    ) {
        if let Some(value) = scene.value_for(PRIMARY) {
            channels.set_channel_value_if_not_dont_care(scene, PRIMARY, value, timing, true);
        }
    }

    fn save_channels_to_scene(&self, channels: &ChannelSet, scene: &mut Scene) {
        scene.capture_value(PRIMARY, channels.primary().get_channel_value(false));
    }
}
