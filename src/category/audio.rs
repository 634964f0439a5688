// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Audio renderer mapping: volume, power state and content source.
//!
//! The volume is the primary channel. Power state and content source are
//! found by channel type, so a renderer without a source selector works
//! too.
//!
//! Recalling a scene does not reset the volume of a renderer that is already
//! playing, unless the scene has the fixed level flag. The content source is
//! only switched when the scene carries a command. Muting keeps the previous
//! volume aside and restores it on unmute.

use super::{SceneMapping, blank_scene};
use crate::output::{ChannelSet, SceneTiming};
use crate::scene::{DefaultLevel, Scene};
use crate::types::{ChannelType, SceneNumber, TransitionTime};

const VOLUME: usize = 0;

/// Power state values carried by the power state channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioPowerState {
    /// Switched off or in standby.
    Off,
    /// Playing.
    Playing,
    /// Paused.
    Paused,
}

impl AudioPowerState {
    /// Interprets a power state channel value.
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        match value.round() {
            v if (v - 1.0).abs() < f64::EPSILON => Self::Playing,
            v if (v - 2.0).abs() < f64::EPSILON => Self::Paused,
            _ => Self::Off,
        }
    }

    /// The channel value for this state.
    #[must_use]
    pub const fn value(&self) -> f64 {
        match self {
            Self::Off => 0.0,
            Self::Playing => 1.0,
            Self::Paused => 2.0,
        }
    }
}

/// Scene mapping for audio renderers, with mute state.
///
/// # Examples
///
/// ```
/// use vdc_output::category::AudioMapping;
/// use vdc_output::channel::ChannelDescriptor;
/// use vdc_output::output::ChannelSet;
/// use vdc_output::types::TransitionTime;
///
/// let mut channels = ChannelSet::new(vec![
///     ChannelDescriptor::audio_volume(),
///     ChannelDescriptor::power_state(),
/// ]).unwrap();
/// channels.primary_mut().set_channel_value(42.0, TransitionTime::IMMEDIATE, false);
///
/// let mut audio = AudioMapping::default();
/// assert!(audio.mute(&mut channels));
/// assert_eq!(channels.primary().get_channel_value(false), 0.0);
/// assert!(audio.unmute(&mut channels));
/// assert_eq!(channels.primary().get_channel_value(false), 42.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AudioMapping {
    unmuted_volume: Option<f64>,
}

impl AudioMapping {
    /// Returns `true` if the volume is down because of an explicit mute.
    #[must_use]
    pub fn is_muted(&self, channels: &ChannelSet) -> bool {
        let volume = channels.primary();
        self.unmuted_volume.is_some()
            && volume.get_channel_value(false) <= volume.descriptor().min()
    }

    /// Mutes the renderer, keeping the current volume for [`unmute`](Self::unmute).
    ///
    /// Returns `false` if it was already muted.
    pub fn mute(&mut self, channels: &mut ChannelSet) -> bool {
        if self.is_muted(channels) {
            return false;
        }
        let volume = channels.primary_mut();
        let level = volume.get_channel_value(false);
        let silent = volume.descriptor().min();
        self.unmuted_volume = Some(level);
        volume.set_channel_value(silent, TransitionTime::IMMEDIATE, true);
        tracing::debug!(channel = %volume.id(), level, "Audio muted");
        true
    }

    /// Restores the volume from before [`mute`](Self::mute).
    ///
    /// The restored volume is at least one resolution step above the
    /// minimum, so unmuting is always audible. Returns `false` if the
    /// renderer was not muted.
    pub fn unmute(&mut self, channels: &mut ChannelSet) -> bool {
        if !self.is_muted(channels) {
            self.unmuted_volume = None;
            return false;
        }
        let Some(level) = self.unmuted_volume.take() else {
            return false;
        };
        let volume = channels.primary_mut();
        let audible = volume.descriptor().min() + volume.descriptor().resolution();
        let restored = level.max(audible);
        volume.set_channel_value(restored, TransitionTime::IMMEDIATE, true);
        tracing::debug!(channel = %volume.id(), level = restored, "Audio unmuted");
        true
    }

    /// Default scene for an audio renderer.
    ///
    /// Off scenes switch the renderer off, on scenes start playback at the
    /// current volume, min and max force the volume level.
    #[must_use]
    pub fn default_scene(&self, number: SceneNumber, channels: &ChannelSet) -> Scene {
        let mut scene = blank_scene(number, channels);
        let power = channels.index_of_type(ChannelType::PowerState);
        let level = DefaultLevel::for_scene(number);
        match (number, level, power) {
            (SceneNumber::MIN | SceneNumber::MAX, _, _) => {
                if let Some(v) = level.resolve(channels.primary().descriptor()) {
                    scene.capture_value(VOLUME, v);
                    scene.flags_mut().fixed_level = true;
                }
            }
            (_, DefaultLevel::Off, Some(p)) => {
                scene.capture_value(p, AudioPowerState::Off.value());
            }
            (_, DefaultLevel::Off, None) => {
                scene.capture_value(VOLUME, channels.primary().descriptor().min());
            }
            (_, DefaultLevel::Fraction(_), Some(p)) => {
                scene.capture_value(p, AudioPowerState::Playing.value());
            }
            _ => scene.flags_mut().dont_care = true,
        }
        scene
    }
}

impl SceneMapping for AudioMapping {
    fn load_channels_from_scene(
        &mut self,
        channels: &mut ChannelSet,
        scene: &Scene,
        timing: SceneTiming,
    ) {
        let power = channels.index_of_type(ChannelType::PowerState);
        // prior state decides whether the volume is carried over
        let was_playing = power
            .and_then(|p| channels.get(p))
            .is_some_and(|c| {
                AudioPowerState::from_value(c.get_channel_value(false)) == AudioPowerState::Playing
            });

        if let Some(p) = power
            && let Some(state) = scene.value_for(p)
        {
            channels.set_channel_value_if_not_dont_care(scene, p, state, timing, true);
        }

        if scene.flags().fixed_level || !was_playing {
            if let Some(level) = scene.value_for(VOLUME) {
                channels.set_channel_value_if_not_dont_care(scene, VOLUME, level, timing, true);
            }
        } else {
            tracing::trace!(scene = %scene.number(), "Keeping volume of playing renderer");
        }

        if scene.command().is_some()
            && let Some(s) = channels.index_of_type(ChannelType::ContentSource)
            && let Some(source) = scene.value_for(s)
        {
            channels.set_channel_value_if_not_dont_care(scene, s, source, timing, true);
        }
    }

    fn save_channels_to_scene(&self, channels: &ChannelSet, scene: &mut Scene) {
        scene.capture_value(VOLUME, channels.primary().get_channel_value(false));
        for channel_type in [ChannelType::PowerState, ChannelType::ContentSource] {
            if let Some(index) = channels.index_of_type(channel_type)
                && let Some(channel) = channels.get(index)
            {
                scene.capture_value(index, channel.get_channel_value(false));
            }
        }
    }
}
