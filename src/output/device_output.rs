// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The output: channels, mode and scene orchestration.

use std::fmt;
use std::time::Instant;

use super::{ChannelSet, NoHooks, OutputConfig, OutputHooks, SceneTiming};
use crate::category::{Category, SceneMapping};
use crate::channel::{Channel, TransitionStep};
use crate::error::{Error, Result};
use crate::scene::{Scene, SceneCommand};
use crate::types::{Direction, OutputMode, SceneNumber, TransitionTime};

/// Continuous dimming request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimMode {
    /// Start dimming up.
    Up,
    /// Start dimming down.
    Down,
    /// Stop where the channel is now.
    Stop,
}

impl DimMode {
    const fn direction(self) -> Direction {
        match self {
            Self::Up => Direction::Up,
            Self::Down => Direction::Down,
            Self::Stop => Direction::Auto,
        }
    }
}

/// A device output.
///
/// Owns the channels, the output mode and the category mapping, and turns
/// scene recalls and captures into channel operations. The output never
/// talks to hardware: drivers read [`output_value_for`](Self::output_value_for)
/// for every channel in [`channels_needing_apply`](Self::channels_needing_apply)
/// and confirm with [`all_channels_applied`](Self::all_channels_applied).
///
/// # Examples
///
/// ```
/// use std::time::Instant;
/// use vdc_output::output::{Output, OutputConfig};
/// use vdc_output::scene::SceneCommand;
/// use vdc_output::types::SceneNumber;
///
/// let mut output = Output::from_config(&OutputConfig::dimmer()).unwrap();
/// let scene = output.default_scene(SceneNumber::PRESET_2);
///
/// assert!(output.call_scene(&scene, SceneCommand::Invoke));
/// assert_eq!(output.channels_needing_apply(), vec![0]);
/// assert_eq!(output.output_value_for(0, false).unwrap(), 75.0);
///
/// output.all_channels_applied(Instant::now());
/// assert!(output.channels_needing_apply().is_empty());
/// ```
pub struct Output {
    mode: OutputMode,
    channels: ChannelSet,
    category: Category,
    timing: SceneTiming,
    hooks: Box<dyn OutputHooks>,
    undo: Option<Scene>,
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("mode", &self.mode)
            .field("channels", &self.channels)
            .field("category", &self.category)
            .field("timing", &self.timing)
            .field("undo", &self.undo)
            .finish_non_exhaustive()
    }
}

impl Output {
    /// Creates an output from its parts, without driver hooks.
    #[must_use]
    pub fn new(mode: OutputMode, category: Category, channels: ChannelSet) -> Self {
        Self {
            mode,
            channels,
            category,
            timing: SceneTiming::default(),
            hooks: Box::new(NoHooks),
            undo: None,
        }
    }

    /// Builds an output from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn from_config(config: &OutputConfig) -> Result<Self> {
        config.validate()?;
        let channels = ChannelSet::new(config.channels.clone())?;
        tracing::debug!(
            category = config.category.as_str(),
            mode = config.mode.as_str(),
            channels = channels.len(),
            "Output created"
        );
        Ok(Self::new(config.mode, config.category.into(), channels).with_timing(SceneTiming {
            up: config.transition_up(),
            down: config.transition_down(),
        }))
    }

    /// Attaches driver hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: impl OutputHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Sets the default scene transition times.
    #[must_use]
    pub fn with_timing(mut self, timing: SceneTiming) -> Self {
        self.timing = timing;
        self
    }

    // ========== Accessors ==========

    /// Output mode.
    #[must_use]
    pub const fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Changes the output mode.
    ///
    /// The primary channel is marked pending, since the value written to
    /// hardware changes with the mode. Its target, any running transition
    /// and its volatile flag stay as they are.
    pub fn set_mode(&mut self, mode: OutputMode) {
        if mode == self.mode {
            return;
        }
        tracing::debug!(from = self.mode.as_str(), to = mode.as_str(), "Output mode changed");
        self.mode = mode;
        self.channels.primary_mut().request_reapply();
    }

    /// The category.
    #[must_use]
    pub const fn category(&self) -> &Category {
        &self.category
    }

    /// Default scene transition times.
    #[must_use]
    pub const fn timing(&self) -> SceneTiming {
        self.timing
    }

    /// All channels.
    #[must_use]
    pub const fn channels(&self) -> &ChannelSet {
        &self.channels
    }

    /// All channels, mutably.
    pub fn channels_mut(&mut self) -> &mut ChannelSet {
        &mut self.channels
    }

    /// Channel at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownChannel`] for an index past the last channel.
    pub fn channel(&self, index: usize) -> Result<&Channel> {
        self.channels.get(index).ok_or(Error::UnknownChannel(index))
    }

    /// Channel at `index`, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownChannel`] for an index past the last channel.
    pub fn channel_mut(&mut self, index: usize) -> Result<&mut Channel> {
        self.channels
            .get_mut(index)
            .ok_or(Error::UnknownChannel(index))
    }

    // ========== Values toward hardware ==========

    /// Applies the output mode to a raw channel value.
    ///
    /// Only the primary channel is affected; others pass through.
    #[must_use]
    pub fn output_value_according_to_mode(&self, index: usize, raw: f64) -> f64 {
        if index == 0 {
            self.mode.transform(raw)
        } else {
            raw
        }
    }

    /// Value a driver should write for channel `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownChannel`] for an index past the last channel.
    pub fn output_value_for(&self, index: usize, transitional: bool) -> Result<f64> {
        let raw = self.channel(index)?.get_channel_value(transitional);
        Ok(self.output_value_according_to_mode(index, raw))
    }

    /// Indices of channels with a value still owed to hardware.
    #[must_use]
    pub fn channels_needing_apply(&self) -> Vec<usize> {
        self.channels.needing_apply()
    }

    /// Confirms that all pending channel values were written.
    pub fn all_channels_applied(&mut self, now: Instant) {
        self.channels.all_applied(now);
    }

    // ========== Transitions ==========

    /// Fires the transitions armed by the last value changes.
    ///
    /// Returns `true` if any channel is now in transition.
    pub fn start_transitions(&mut self, now: Instant) -> bool {
        self.channels.update_transitions(TransitionStep::Begin(now))
    }

    /// Advances all running transitions to `now`.
    ///
    /// Returns `true` while any channel is still in transition.
    pub fn step_transitions(&mut self, now: Instant) -> bool {
        self.channels.update_transitions(TransitionStep::At(now))
    }

    /// Starts or stops continuous dimming of channel `index`.
    ///
    /// The primary channel of a binary or disabled output cannot be dimmed;
    /// the request is ignored. Returns the channel's resulting target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownChannel`] for an index past the last channel.
    pub fn dim_channel(
        &mut self,
        index: usize,
        mode: DimMode,
        ms_per_unit: Option<f64>,
    ) -> Result<f64> {
        let output_mode = self.mode;
        let channel = self.channel_mut(index)?;
        if index == 0 && output_mode != OutputMode::Gradual && mode != DimMode::Stop {
            tracing::debug!(mode = output_mode.as_str(), "Dimming ignored for non-gradual output");
            return Ok(channel.get_channel_value(false));
        }
        Ok(channel.move_channel_value(mode.direction(), ms_per_unit))
    }

    // ========== Scenes ==========

    /// Transition times for recalling `scene`.
    ///
    /// A transition time stored with the scene overrides the defaults.
    #[must_use]
    pub fn scene_timing(&self, scene: &Scene) -> SceneTiming {
        scene.transition().map_or(self.timing, |d| {
            SceneTiming::symmetric(TransitionTime::Fixed(d))
        })
    }

    /// Recalls a scene, remembering the current values for [`undo_scene`](Self::undo_scene).
    ///
    /// [`SceneCommand::Undo`] ignores `scene` and restores the snapshot
    /// instead.
    ///
    /// Returns `true` if channels changed and must be applied.
    pub fn call_scene(&mut self, scene: &Scene, command: SceneCommand) -> bool {
        if command == SceneCommand::Undo {
            return self.undo_scene();
        }
        if command.affects_channels() {
            self.prepare_undo(scene.number());
        }
        self.apply_scene_to_channels(scene, command)
    }

    /// Maps a scene onto the channels.
    ///
    /// Running scene actions are stopped first. Only value-recalling commands
    /// load channels; dimming directives leave them untouched.
    ///
    /// Returns `true` if channels changed and must be applied.
    pub fn apply_scene_to_channels(&mut self, scene: &Scene, command: SceneCommand) -> bool {
        self.hooks.stop_scene_actions();
        if !command.affects_channels() {
            tracing::trace!(scene = %scene.number(), command = %command, "Nothing to apply");
            return false;
        }
        let timing = self.scene_timing(scene);
        self.category
            .load_channels_from_scene(&mut self.channels, scene, timing);
        tracing::debug!(scene = %scene.number(), command = %command, "Scene applied");
        true
    }

    /// Stores the current channel values into `scene`.
    pub fn save_channels_to_scene(&self, scene: &mut Scene) {
        self.category.save_channels_to_scene(&self.channels, scene);
    }

    /// Captures the current state into `scene`.
    ///
    /// With `from_hardware` the driver is asked to refresh the channels
    /// first. The scene is cared about afterwards.
    pub fn capture_scene(&mut self, scene: &mut Scene, from_hardware: bool, now: Instant) {
        if from_hardware {
            self.hooks.request_channel_refresh(&mut self.channels, now);
        }
        self.save_channels_to_scene(scene);
        scene.flags_mut().dont_care = false;
        tracing::debug!(scene = %scene.number(), from_hardware, "Scene captured");
    }

    /// Snapshots every channel for a later [`undo_scene`](Self::undo_scene).
    pub fn prepare_undo(&mut self, number: SceneNumber) {
        let mut snapshot = Scene::new(number, self.channels.len());
        for (index, channel) in self.channels.iter().enumerate() {
            snapshot.capture_value(index, channel.get_channel_value(false));
        }
        self.undo = Some(snapshot);
    }

    /// Scene number whose recall can currently be undone.
    #[must_use]
    pub fn undo_scene_number(&self) -> Option<SceneNumber> {
        self.undo.as_ref().map(Scene::number)
    }

    /// Restores the values from before the last recall.
    ///
    /// Every channel is restored, whatever the category. Returns `false` if
    /// there is nothing to undo.
    pub fn undo_scene(&mut self) -> bool {
        let Some(snapshot) = self.undo.take() else {
            return false;
        };
        self.hooks.stop_scene_actions();
        let timing = self.scene_timing(&snapshot);
        for index in 0..self.channels.len() {
            if let Some(value) = snapshot.value_for(index) {
                self.channels
                    .set_channel_value_if_not_dont_care(&snapshot, index, value, timing, true);
            }
        }
        tracing::debug!(scene = %snapshot.number(), command = %SceneCommand::Undo, "Scene undone");
        true
    }

    /// Factory default scene for this output.
    #[must_use]
    pub fn default_scene(&self, number: SceneNumber) -> Scene {
        self.category.default_scene(number, &self.channels)
    }

    // ========== Audio ==========

    /// Mutes an audio output.
    ///
    /// Returns `false` if it was already muted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedCategory`] for non-audio outputs.
    pub fn mute(&mut self) -> Result<bool> {
        match &mut self.category {
            Category::Audio(audio) => Ok(audio.mute(&mut self.channels)),
            Category::Standard(_) => Err(Error::UnsupportedCategory("audio")),
        }
    }

    /// Unmutes an audio output.
    ///
    /// Returns `false` if it was not muted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedCategory`] for non-audio outputs.
    pub fn unmute(&mut self) -> Result<bool> {
        match &mut self.category {
            Category::Audio(audio) => Ok(audio.unmute(&mut self.channels)),
            Category::Standard(_) => Err(Error::UnsupportedCategory("audio")),
        }
    }

    /// Returns `true` if an audio output is muted.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        match &self.category {
            Category::Audio(audio) => audio.is_muted(&self.channels),
            Category::Standard(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::channel::ChannelDescriptor;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn dimmer() -> Output {
        Output::from_config(&OutputConfig::dimmer()).unwrap()
    }

    fn scene(number: SceneNumber, value: f64) -> Scene {
        let mut scene = Scene::new(number, 1);
        scene.set_value(0, value);
        scene
    }

    #[derive(Default)]
    struct CountingHooks {
        stops: Arc<AtomicUsize>,
        hardware_value: f64,
    }

    impl OutputHooks for CountingHooks {
        fn stop_scene_actions(&mut self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }

        fn request_channel_refresh(&mut self, channels: &mut ChannelSet, now: Instant) {
            channels
                .primary_mut()
                .sync_channel_value(self.hardware_value, false, false, now);
        }
    }

    #[test]
    fn invoke_loads_primary() {
        let mut output = dimmer();
        assert!(output.apply_scene_to_channels(&scene(SceneNumber::PRESET_1, 60.0), SceneCommand::Invoke));
        assert!(approx(output.channel(0).unwrap().get_channel_value(false), 60.0));
    }

    #[test]
    fn dimming_commands_change_nothing() {
        let mut output = dimmer();
        assert!(!output.apply_scene_to_channels(
            &scene(SceneNumber::INCREMENT, 60.0),
            SceneCommand::Increment
        ));
        assert!(output.channels_needing_apply().is_empty());
    }

    #[test]
    fn scene_actions_stopped_before_every_recall() {
        let stops = Arc::new(AtomicUsize::new(0));
        let mut output = dimmer().with_hooks(CountingHooks {
            stops: Arc::clone(&stops),
            hardware_value: 0.0,
        });
        output.apply_scene_to_channels(&scene(SceneNumber::PRESET_1, 60.0), SceneCommand::Invoke);
        output.apply_scene_to_channels(&scene(SceneNumber::STOP, 0.0), SceneCommand::Stop);
        assert_eq!(stops.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn capture_from_hardware_refreshes_first() {
        let mut output = dimmer().with_hooks(CountingHooks {
            hardware_value: 33.0,
            ..CountingHooks::default()
        });
        let mut target = scene(SceneNumber::PRESET_3, 0.0);
        target.set_dont_care(0, true);
        target.flags_mut().dont_care = true;

        output.capture_scene(&mut target, true, Instant::now());

        assert_eq!(target.value_for(0), Some(33.0));
        assert!(!target.is_dont_care(0));
        assert!(!target.flags().dont_care);
    }

    #[test]
    fn capture_without_hardware_uses_cached_value() {
        let mut output = dimmer().with_hooks(CountingHooks {
            hardware_value: 33.0,
            ..CountingHooks::default()
        });
        output
            .channel_mut(0)
            .unwrap()
            .set_channel_value(20.0, TransitionTime::IMMEDIATE, false);
        let mut target = scene(SceneNumber::PRESET_3, 0.0);

        output.capture_scene(&mut target, false, Instant::now());
        assert_eq!(target.value_for(0), Some(20.0));
    }

    #[test]
    fn scene_transition_overrides_defaults() {
        let output = dimmer().with_timing(SceneTiming::symmetric(TransitionTime::from_millis(100)));
        let mut slow = scene(SceneNumber::PRESET_1, 50.0);
        assert_eq!(output.scene_timing(&slow).up, TransitionTime::from_millis(100));

        slow.set_transition(Some(Duration::from_secs(2)));
        let timing = output.scene_timing(&slow);
        assert_eq!(timing.up, TransitionTime::from_millis(2000));
        assert_eq!(timing.down, TransitionTime::from_millis(2000));
    }

    #[test]
    fn up_and_down_times_follow_direction() {
        let config = OutputConfig::dimmer()
            .with_transitions(Duration::from_millis(200), Duration::from_millis(800));
        let mut output = Output::from_config(&config).unwrap();

        output.apply_scene_to_channels(&scene(SceneNumber::PRESET_1, 80.0), SceneCommand::Invoke);
        assert_eq!(
            output.channel(0).unwrap().transition_time(),
            TransitionTime::from_millis(200)
        );
        output.apply_scene_to_channels(&scene(SceneNumber::OFF, 0.0), SceneCommand::Off);
        assert_eq!(
            output.channel(0).unwrap().transition_time(),
            TransitionTime::from_millis(800)
        );
    }

    #[test]
    fn undo_restores_previous_values() {
        let mut output = dimmer();
        output.call_scene(&scene(SceneNumber::PRESET_1, 40.0), SceneCommand::Invoke);
        output.call_scene(&scene(SceneNumber::PRESET_2, 90.0), SceneCommand::Invoke);
        assert_eq!(output.undo_scene_number(), Some(SceneNumber::PRESET_2));

        assert!(output.undo_scene());
        assert!(approx(output.channel(0).unwrap().get_channel_value(false), 40.0));
        assert!(!output.undo_scene());
    }

    #[test]
    fn undo_command_restores_snapshot() {
        let mut output = dimmer();
        output.call_scene(&scene(SceneNumber::PRESET_1, 40.0), SceneCommand::Invoke);
        output.call_scene(&scene(SceneNumber::PRESET_2, 90.0), SceneCommand::Invoke);

        // the scene handed in alongside the command is not loaded
        let unrelated = scene(SceneNumber::PRESET_4, 10.0);
        assert!(output.call_scene(&unrelated, SceneCommand::Undo));
        assert!(approx(output.channel(0).unwrap().get_channel_value(false), 40.0));
        assert_eq!(output.undo_scene_number(), None);

        assert!(!output.call_scene(&unrelated, SceneCommand::Undo));
        assert!(approx(output.channel(0).unwrap().get_channel_value(false), 40.0));
    }

    #[test]
    fn mode_transform_applies_to_primary_only() {
        let channels = ChannelSet::new(vec![
            ChannelDescriptor::brightness(),
            ChannelDescriptor::hue(),
        ])
        .unwrap();
        let mut output = Output::new(OutputMode::Binary, Category::default(), channels);
        output
            .channel_mut(0)
            .unwrap()
            .set_channel_value(30.0, TransitionTime::IMMEDIATE, false);
        output
            .channel_mut(1)
            .unwrap()
            .set_channel_value(30.0, TransitionTime::IMMEDIATE, false);

        assert!(approx(output.output_value_for(0, false).unwrap(), 100.0));
        assert!(approx(output.output_value_for(1, false).unwrap(), 30.0));
        // never stored back
        assert!(approx(output.channel(0).unwrap().get_channel_value(false), 30.0));

        output.set_mode(OutputMode::Disabled);
        assert!(approx(output.output_value_for(0, false).unwrap(), 0.0));
        assert!(matches!(output.output_value_for(2, false), Err(Error::UnknownChannel(2))));
    }

    #[test]
    fn mode_change_marks_primary_pending() {
        let mut output = dimmer();
        output.all_channels_applied(Instant::now());
        output.set_mode(OutputMode::Binary);
        assert_eq!(output.channels_needing_apply(), vec![0]);
    }

    #[test]
    fn mode_change_keeps_volatile_value_unpersisted() {
        let mut output = dimmer();
        output.all_channels_applied(Instant::now());
        let primary = output.channel_mut(0).unwrap();
        assert!(primary.sync_channel_value(40.0, false, true, Instant::now()));

        output.set_mode(OutputMode::Binary);
        let primary = output.channel(0).unwrap();
        assert!(primary.is_volatile());
        assert_eq!(primary.persisted_value(), None);
        assert!(primary.needs_applying());
        assert!(approx(primary.get_channel_value(false), 40.0));
    }

    #[test]
    fn mode_change_leaves_running_transition() {
        let mut output = dimmer().with_timing(SceneTiming::symmetric(TransitionTime::from_millis(1000)));
        let t0 = Instant::now();
        output.apply_scene_to_channels(&scene(SceneNumber::PRESET_1, 100.0), SceneCommand::Invoke);
        output.start_transitions(t0);
        output.step_transitions(t0 + Duration::from_millis(300));

        output.set_mode(OutputMode::Binary);
        let primary = output.channel(0).unwrap();
        assert!(primary.in_transition());
        assert!(approx(primary.get_channel_value(false), 100.0));
        assert!((primary.transition_progress() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn dimming_follows_mode() {
        let mut output = dimmer();
        let target = output.dim_channel(0, DimMode::Up, None).unwrap();
        assert!(approx(target, 100.0));
        assert!(output.dim_channel(3, DimMode::Up, None).is_err());

        let mut binary = dimmer();
        binary.set_mode(OutputMode::Binary);
        binary.all_channels_applied(Instant::now());
        assert!(approx(binary.dim_channel(0, DimMode::Up, None).unwrap(), 0.0));
        assert!(binary.channels_needing_apply().is_empty());
    }

    #[test]
    fn dim_stop_freezes_mid_transition() {
        let mut output = dimmer();
        let t0 = Instant::now();
        // 1 ms per unit: full sweep in 100 ms
        output.dim_channel(0, DimMode::Up, Some(1.0)).unwrap();
        assert!(output.start_transitions(t0));
        assert!(output.step_transitions(t0 + Duration::from_millis(50)));

        let frozen = output.dim_channel(0, DimMode::Stop, None).unwrap();
        assert!((frozen - 50.0).abs() < 1e-6);
        assert!(!output.channel(0).unwrap().in_transition());
    }

    #[test]
    fn transitions_run_to_completion() {
        let mut output = dimmer().with_timing(SceneTiming::symmetric(TransitionTime::from_millis(1000)));
        let t0 = Instant::now();
        output.apply_scene_to_channels(&scene(SceneNumber::PRESET_1, 100.0), SceneCommand::Invoke);

        assert!(output.start_transitions(t0));
        assert!(output.step_transitions(t0 + Duration::from_millis(500)));
        assert!((output.output_value_for(0, true).unwrap() - 50.0).abs() < 1e-6);
        assert!(!output.step_transitions(t0 + Duration::from_millis(1000)));
        assert!(approx(output.output_value_for(0, true).unwrap(), 100.0));
    }

    #[test]
    fn mute_requires_audio_category() {
        let mut output = dimmer();
        assert!(matches!(output.mute(), Err(Error::UnsupportedCategory("audio"))));
        assert!(matches!(output.unmute(), Err(Error::UnsupportedCategory("audio"))));
        assert!(!output.is_muted());

        let mut audio = Output::from_config(&OutputConfig::audio(2)).unwrap();
        assert!(audio.mute().unwrap());
        assert!(audio.is_muted());
        assert!(audio.unmute().unwrap());
    }
}
