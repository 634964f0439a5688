// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device scene value store.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::SceneNumber;

/// Stored value of one channel in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneValue {
    /// Value to recall.
    pub value: f64,
    /// When set, recalling the scene leaves the channel alone.
    #[serde(default)]
    pub dont_care: bool,
}

/// Scene-wide flags.
///
/// Not every category uses every flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
// Independent flags, as carried in the scene records.
#[allow(clippy::struct_excessive_bools)]
#[serde(default)]
pub struct SceneFlags {
    /// The whole scene is unused for this device.
    pub dont_care: bool,
    /// Recall even if the device is under local priority.
    pub ignore_local_priority: bool,
    /// Always reapply the level, whatever the device was doing before.
    pub fixed_level: bool,
    /// Recall takes priority over running category actions.
    pub priority: bool,
    /// A later recall may interrupt this scene's side effects.
    pub interruptible: bool,
}

/// A named, partially masked snapshot of an output's channel values.
///
/// # Examples
///
/// ```
/// use vdc_output::scene::Scene;
/// use vdc_output::types::SceneNumber;
///
/// let mut scene = Scene::new(SceneNumber::PRESET_2, 2);
/// scene.set_value(0, 75.0);
/// scene.set_dont_care(1, true);
///
/// assert_eq!(scene.value_for(0), Some(75.0));
/// assert!(!scene.is_dont_care(0));
/// assert!(scene.is_dont_care(1));
/// // channels the scene knows nothing about are never touched
/// assert!(scene.is_dont_care(7));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    number: SceneNumber,
    values: Vec<SceneValue>,
    #[serde(default)]
    flags: SceneFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transition_ms: Option<u64>,
}

impl Scene {
    /// Creates a scene with `channel_count` zero values, all cared about.
    #[must_use]
    pub fn new(number: SceneNumber, channel_count: usize) -> Self {
        Self {
            number,
            values: vec![SceneValue::default(); channel_count],
            flags: SceneFlags::default(),
            command: None,
            transition_ms: None,
        }
    }

    /// Scene number.
    #[must_use]
    pub const fn number(&self) -> SceneNumber {
        self.number
    }

    /// Number of channel slots.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.values.len()
    }

    /// Stored value for a channel, `None` for unknown indices.
    #[must_use]
    pub fn value_for(&self, index: usize) -> Option<f64> {
        self.values.get(index).map(|v| v.value)
    }

    /// Stores a value. Out-of-range indices grow the scene.
    ///
    /// The don't-care bit is left as it is.
    pub fn set_value(&mut self, index: usize, value: f64) {
        self.slot_mut(index).value = value;
    }

    /// Returns `true` if recalling must not touch the channel.
    #[must_use]
    pub fn is_dont_care(&self, index: usize) -> bool {
        self.values.get(index).is_none_or(|v| v.dont_care)
    }

    /// Sets or clears a channel's don't-care bit.
    pub fn set_dont_care(&mut self, index: usize, dont_care: bool) {
        self.slot_mut(index).dont_care = dont_care;
    }

    /// Stores a captured value, which is by definition cared about.
    pub fn capture_value(&mut self, index: usize, value: f64) {
        let slot = self.slot_mut(index);
        slot.value = value;
        slot.dont_care = false;
    }

    fn slot_mut(&mut self, index: usize) -> &mut SceneValue {
        if index >= self.values.len() {
            self.values.resize(
                index + 1,
                SceneValue {
                    value: 0.0,
                    dont_care: true,
                },
            );
        }
        &mut self.values[index]
    }

    /// Scene-wide flags.
    #[must_use]
    pub const fn flags(&self) -> &SceneFlags {
        &self.flags
    }

    /// Mutable scene-wide flags.
    pub fn flags_mut(&mut self) -> &mut SceneFlags {
        &mut self.flags
    }

    /// Category-specific command string, if any.
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref().filter(|c| !c.is_empty())
    }

    /// Sets the category-specific command string.
    pub fn set_command(&mut self, command: Option<String>) {
        self.command = command;
    }

    /// Transition time stored with the scene, overriding the output default.
    #[must_use]
    pub fn transition(&self) -> Option<Duration> {
        self.transition_ms.map(Duration::from_millis)
    }

    /// Sets the scene's own transition time.
    pub fn set_transition(&mut self, transition: Option<Duration>) {
        self.transition_ms =
            transition.map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scene_cares_about_all_channels() {
        let scene = Scene::new(SceneNumber::PRESET_1, 3);
        assert_eq!(scene.channel_count(), 3);
        assert!((0..3).all(|i| !scene.is_dont_care(i)));
        assert!(!scene.flags().dont_care);
    }

    #[test]
    fn capture_clears_dont_care() {
        let mut scene = Scene::new(SceneNumber::PRESET_1, 1);
        scene.set_dont_care(0, true);
        scene.capture_value(0, 33.0);
        assert_eq!(scene.value_for(0), Some(33.0));
        assert!(!scene.is_dont_care(0));
    }

    #[test]
    fn set_value_keeps_dont_care() {
        let mut scene = Scene::new(SceneNumber::PRESET_1, 1);
        scene.set_dont_care(0, true);
        scene.set_value(0, 12.0);
        assert!(scene.is_dont_care(0));
    }

    #[test]
    fn writing_past_the_end_grows_with_dont_care_slots() {
        let mut scene = Scene::new(SceneNumber::PRESET_1, 1);
        scene.capture_value(3, 1.0);
        assert_eq!(scene.channel_count(), 4);
        assert!(scene.is_dont_care(1));
        assert!(scene.is_dont_care(2));
        assert!(!scene.is_dont_care(3));
    }

    #[test]
    fn empty_command_counts_as_none() {
        let mut scene = Scene::new(SceneNumber::PRESET_1, 1);
        scene.set_command(Some(String::new()));
        assert_eq!(scene.command(), None);
        scene.set_command(Some("radio1".to_string()));
        assert_eq!(scene.command(), Some("radio1"));
    }

    #[test]
    fn json_roundtrip_keeps_flags_and_transition() {
        let mut scene = Scene::new(SceneNumber::PRESET_4, 2);
        scene.capture_value(0, 25.0);
        scene.set_dont_care(1, true);
        scene.flags_mut().fixed_level = true;
        scene.set_transition(Some(Duration::from_millis(1500)));

        let json = serde_json::to_string(&scene).unwrap();
        let parsed: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, scene);
        assert_eq!(parsed.transition(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn deserialize_minimal_record() {
        let json = r#"{ "number": 5, "values": [{ "value": 100.0 }] }"#;
        let scene: Scene = serde_json::from_str(json).unwrap();
        assert_eq!(scene.number(), SceneNumber::PRESET_1);
        assert!(!scene.is_dont_care(0));
        assert_eq!(scene.flags(), &SceneFlags::default());
        assert_eq!(scene.transition(), None);
    }
}
