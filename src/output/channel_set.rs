// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered channel collection of an output.

use std::collections::HashSet;
use std::time::Instant;

use crate::channel::{Channel, ChannelDescriptor, TransitionStep};
use crate::error::ConfigError;
use crate::scene::Scene;
use crate::types::{ChannelType, TransitionTime};

/// Transition times used when recalling a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneTiming {
    /// Used when a value rises.
    pub up: TransitionTime,
    /// Used when a value falls.
    pub down: TransitionTime,
}

impl SceneTiming {
    /// Same transition time in both directions.
    #[must_use]
    pub const fn symmetric(transition: TransitionTime) -> Self {
        Self {
            up: transition,
            down: transition,
        }
    }
}

/// The channels of one output. Index 0 is the primary channel.
///
/// # Examples
///
/// ```
/// use vdc_output::channel::ChannelDescriptor;
/// use vdc_output::output::ChannelSet;
/// use vdc_output::types::ChannelType;
///
/// let set = ChannelSet::new(vec![
///     ChannelDescriptor::brightness(),
///     ChannelDescriptor::hue(),
/// ]).unwrap();
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.primary().channel_type(), ChannelType::Brightness);
/// assert_eq!(set.index_of_type(ChannelType::Hue), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct ChannelSet {
    channels: Vec<Channel>,
}

impl ChannelSet {
    /// Creates the channels from their descriptors.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an empty list, duplicate channel ids or
    /// any invalid descriptor.
    pub fn new(descriptors: Vec<ChannelDescriptor>) -> Result<Self, ConfigError> {
        if descriptors.is_empty() {
            return Err(ConfigError::NoChannels);
        }
        let mut ids = HashSet::new();
        let mut channels = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if !ids.insert(descriptor.id().to_string()) {
                return Err(ConfigError::DuplicateChannelId(descriptor.id().to_string()));
            }
            channels.push(Channel::new(descriptor)?);
        }
        Ok(Self { channels })
    }

    /// Number of channels (at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Always `false`: a channel set has a primary channel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// The primary channel.
    #[must_use]
    pub fn primary(&self) -> &Channel {
        &self.channels[0]
    }

    /// The primary channel, mutably.
    pub fn primary_mut(&mut self) -> &mut Channel {
        &mut self.channels[0]
    }

    /// Channel at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    /// Channel at `index`, mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Channel> {
        self.channels.get_mut(index)
    }

    /// Index of the first channel of the given type.
    #[must_use]
    pub fn index_of_type(&self, channel_type: ChannelType) -> Option<usize> {
        self.channels
            .iter()
            .position(|c| c.channel_type() == channel_type)
    }

    /// First channel of the given type.
    #[must_use]
    pub fn by_type(&self, channel_type: ChannelType) -> Option<&Channel> {
        self.index_of_type(channel_type)
            .map(|i| &self.channels[i])
    }

    /// Index of the channel with the given id.
    #[must_use]
    pub fn index_of_id(&self, id: &str) -> Option<usize> {
        self.channels.iter().position(|c| c.id() == id)
    }

    /// Iterates over the channels in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }

    /// Iterates mutably over the channels in index order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Channel> {
        self.channels.iter_mut()
    }

    /// Sets a channel from a scene value unless the scene marks it don't care.
    ///
    /// Returns `true` if the value was handed to the channel.
    pub fn set_channel_value_if_not_dont_care(
        &mut self,
        scene: &Scene,
        index: usize,
        value: f64,
        timing: SceneTiming,
        always_apply: bool,
    ) -> bool {
        if scene.is_dont_care(index) {
            return false;
        }
        let Some(channel) = self.channels.get_mut(index) else {
            return false;
        };
        channel.set_channel_value_updown(value, timing.up, timing.down, always_apply);
        true
    }

    /// Indices of channels whose target still has to be applied.
    #[must_use]
    pub fn needing_apply(&self) -> Vec<usize> {
        self.channels
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.needs_applying().then_some(i))
            .collect()
    }

    /// Returns `true` if any channel is in transition.
    #[must_use]
    pub fn any_in_transition(&self) -> bool {
        self.channels.iter().any(Channel::in_transition)
    }

    /// Runs one transition step on every channel.
    ///
    /// Returns `true` while any channel is still in transition.
    pub fn update_transitions(&mut self, step: TransitionStep) -> bool {
        self.channels
            .iter_mut()
            .fold(false, |running, c| c.update_transition(step) || running)
    }

    /// Confirms all pending channels as written at `now`.
    pub fn all_applied(&mut self, now: Instant) {
        for channel in &mut self.channels {
            channel.channel_value_applied(false, now);
        }
    }
}

impl<'a> IntoIterator for &'a ChannelSet {
    type Item = &'a Channel;
    type IntoIter = std::slice::Iter<'a, Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SceneNumber;

    fn set() -> ChannelSet {
        ChannelSet::new(vec![
            ChannelDescriptor::brightness(),
            ChannelDescriptor::saturation(),
        ])
        .unwrap()
    }

    #[test]
    fn empty_set_rejected() {
        assert_eq!(ChannelSet::new(vec![]).unwrap_err(), ConfigError::NoChannels);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = ChannelSet::new(vec![
            ChannelDescriptor::brightness(),
            ChannelDescriptor::brightness(),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateChannelId("brightness".to_string()));
    }

    #[test]
    fn lookup_by_type_and_id() {
        let set = set();
        assert_eq!(set.index_of_type(ChannelType::Saturation), Some(1));
        assert!(set.by_type(ChannelType::Hue).is_none());
        assert_eq!(set.index_of_id("brightness"), Some(0));
        assert_eq!(set.index_of_id("nope"), None);
    }

    #[test]
    fn dont_care_guard() {
        let mut set = set();
        let mut scene = Scene::new(SceneNumber::PRESET_1, 2);
        scene.set_dont_care(1, true);
        let timing = SceneTiming::default();

        assert!(set.set_channel_value_if_not_dont_care(&scene, 0, 60.0, timing, true));
        assert!(!set.set_channel_value_if_not_dont_care(&scene, 1, 60.0, timing, true));
        assert!(!set.set_channel_value_if_not_dont_care(&scene, 5, 60.0, timing, true));

        assert!((set.primary().get_channel_value(false) - 60.0).abs() < 1e-9);
        assert!(set.get(1).unwrap().get_channel_value(false).abs() < 1e-9);
        assert_eq!(set.needing_apply(), vec![0]);
    }

    #[test]
    fn update_transitions_reports_any_running() {
        let mut set = set();
        let t0 = Instant::now();
        set.primary_mut()
            .set_channel_value(50.0, TransitionTime::IMMEDIATE, false);
        set.get_mut(1)
            .unwrap()
            .set_channel_value(50.0, TransitionTime::from_millis(100), false);

        assert!(set.update_transitions(TransitionStep::Begin(t0)));
        assert!(set.any_in_transition());
        assert!(!set.update_transitions(TransitionStep::At(t0 + std::time::Duration::from_millis(100))));

        set.all_applied(t0);
        assert!(set.needing_apply().is_empty());
    }
}
