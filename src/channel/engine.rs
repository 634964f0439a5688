// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel value and transition state machine.
//!
//! A [`Channel`] keeps three things consistent:
//!
//! - the committed **target** value (what should end up on the hardware),
//! - the in-flight **transition** from the previous value toward the target,
//! - whether the target still has to be **applied** to the hardware.
//!
//! # States
//!
//! | State | `progress` | `needs_applying()` |
//! |-------|------------|--------------------|
//! | Idle | 1 | `false` |
//! | Committed, not applied | 1 | `true` |
//! | Transitioning | < 1 | `true` |
//!
//! Setting a value only *arms* a transition. The animation starts when the
//! scheduler calls [`Channel::update_transition`] with
//! [`TransitionStep::Begin`], which lets a driver set several channels before
//! the first tick fires. The channel never reads a clock and never schedules
//! anything itself: every time-dependent call receives `now` explicitly.

use std::time::{Duration, Instant};

use super::ChannelDescriptor;
use super::range::{self, same_value};
use crate::error::ConfigError;
use crate::types::{ChannelType, Direction, TransitionTime};

/// What the scheduler asks [`Channel::update_transition`] to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStep {
    /// Start an armed transition at `now`, or finish it right away when there
    /// is nothing to animate. Leaves a running transition alone.
    Begin(Instant),
    /// Like `Begin`, but always completes instead of animating.
    Reset,
    /// Advance a running transition to `now`.
    At(Instant),
}

/// A single controllable quantity of a device output.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use vdc_output::channel::{Channel, ChannelDescriptor, TransitionStep};
/// use vdc_output::types::TransitionTime;
///
/// let mut level = Channel::new(ChannelDescriptor::brightness()).unwrap();
/// let t0 = Instant::now();
///
/// level.set_channel_value(80.0, TransitionTime::from_millis(1000), false);
/// assert!(level.needs_applying());
///
/// // The scheduler fires the transition, then ticks it
/// assert!(level.update_transition(TransitionStep::Begin(t0)));
/// level.update_transition(TransitionStep::At(t0 + Duration::from_millis(500)));
/// assert!((level.get_channel_value(true) - 40.0).abs() < 1e-9);
///
/// // The driver confirms the value made it to the hardware
/// level.channel_value_applied(false, t0 + Duration::from_millis(500));
/// assert!(!level.needs_applying());
/// ```
#[derive(Debug, Clone)]
pub struct Channel {
    descriptor: ChannelDescriptor,
    /// Committed value.
    target: f64,
    /// Value the current transition started from.
    previous: f64,
    /// 0..=1, 1 meaning not in transition.
    progress: f64,
    transition_start: Option<Instant>,
    transition_time: TransitionTime,
    direction: Direction,
    pending_apply: bool,
    last_sync: Option<Instant>,
    volatile: bool,
    needs_persisting: bool,
}

impl Channel {
    /// Creates an idle channel with no known value.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the descriptor is invalid, most notably
    /// for a degenerate range.
    pub fn new(descriptor: ChannelDescriptor) -> Result<Self, ConfigError> {
        descriptor.validate()?;
        let initial = descriptor.min();
        Ok(Self {
            descriptor,
            target: initial,
            previous: initial,
            progress: 1.0,
            transition_start: None,
            transition_time: TransitionTime::IMMEDIATE,
            direction: Direction::Auto,
            pending_apply: false,
            last_sync: None,
            volatile: false,
            needs_persisting: false,
        })
    }

    // ========== Metadata ==========

    /// Returns the channel's static description.
    #[must_use]
    pub fn descriptor(&self) -> &ChannelDescriptor {
        &self.descriptor
    }

    /// Returns the channel id.
    #[must_use]
    pub fn id(&self) -> &str {
        self.descriptor.id()
    }

    /// Returns the channel type.
    #[must_use]
    pub fn channel_type(&self) -> ChannelType {
        self.descriptor.channel_type()
    }

    // ========== Reading ==========

    /// Returns the committed target, or the value visible right now when
    /// `transitional` is set.
    #[must_use]
    pub fn get_channel_value(&self, transitional: bool) -> f64 {
        if transitional {
            self.current_transitional_value()
        } else {
            self.target
        }
    }

    /// Returns `true` if the target lies in the upper half of the range.
    #[must_use]
    pub fn get_channel_value_bool(&self) -> bool {
        self.target > self.descriptor.min() + self.descriptor.range() / 2.0
    }

    /// Value the channel shows at the current transition progress.
    #[must_use]
    pub fn current_transitional_value(&self) -> f64 {
        if !self.in_transition() {
            return self.target;
        }
        if self.descriptor.wraparound() {
            let delta = range::wrapped_delta(
                self.previous,
                self.target,
                self.descriptor.range(),
                self.direction,
            );
            self.descriptor
                .normalize(self.previous + self.progress * delta)
        } else {
            self.previous + self.progress * (self.target - self.previous)
        }
    }

    /// Value the current (or last) transition started from.
    #[must_use]
    pub fn previous_value(&self) -> f64 {
        self.previous
    }

    /// Returns `true` while a transition is running.
    #[must_use]
    pub fn in_transition(&self) -> bool {
        self.progress < 1.0
    }

    /// Transition progress between 0 and 1.
    #[must_use]
    pub fn transition_progress(&self) -> f64 {
        self.progress
    }

    /// Duration of the current or last transition.
    #[must_use]
    pub fn transition_time(&self) -> TransitionTime {
        self.transition_time
    }

    /// Forced direction of the current transition.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` if the target has not been confirmed on the hardware.
    #[must_use]
    pub fn needs_applying(&self) -> bool {
        self.pending_apply
    }

    /// Time of the last confirmed agreement with the hardware.
    #[must_use]
    pub fn last_sync(&self) -> Option<Instant> {
        self.last_sync
    }

    /// Time since the last confirmed agreement with the hardware.
    #[must_use]
    pub fn value_age(&self, now: Instant) -> Option<Duration> {
        self.last_sync.map(|t| now.saturating_duration_since(t))
    }

    /// Returns `true` if the value is derived and must not be persisted.
    #[must_use]
    pub fn is_volatile(&self) -> bool {
        self.volatile
    }

    // ========== Setting ==========

    /// Commits a new target value with automatic direction.
    ///
    /// See [`set_channel_value_directed`](Self::set_channel_value_directed).
    pub fn set_channel_value(
        &mut self,
        value: f64,
        transition: TransitionTime,
        always_apply: bool,
    ) -> bool {
        self.set_channel_value_directed(value, transition, always_apply, Direction::Auto)
    }

    /// Commits a new target value.
    ///
    /// The value is rounded to the resolution (if enforced) and clamped or
    /// wrapped into range. Changes smaller than the resolution are dropped
    /// unless `always_apply` is set or a transition is running. A committed
    /// value starts from whatever is visible right now, so superseding a
    /// running transition never jumps.
    ///
    /// Returns `true` if the value was committed.
    pub fn set_channel_value_directed(
        &mut self,
        value: f64,
        transition: TransitionTime,
        always_apply: bool,
        direction: Direction,
    ) -> bool {
        if !value.is_finite() {
            tracing::trace!(channel = %self.id(), "Ignoring non-finite channel value");
            return false;
        }
        let new_value = self.prepare_value(value);

        if !always_apply
            && !self.in_transition()
            && (new_value - self.target).abs() < self.descriptor.resolution()
        {
            tracing::trace!(
                channel = %self.id(),
                value = new_value,
                target = self.target,
                "Skipping sub-resolution channel update"
            );
            return false;
        }

        self.previous = self.current_transitional_value();
        if !same_value(new_value, self.target) {
            self.needs_persisting = true;
        }
        self.target = new_value;
        self.progress = 1.0;
        self.transition_start = None;
        self.transition_time = transition;
        self.direction = direction;
        self.pending_apply = true;
        self.volatile = false;
        tracing::debug!(
            channel = %self.id(),
            value = new_value,
            from = self.previous,
            transition = %transition,
            direction = %direction,
            "Channel value set"
        );
        true
    }

    /// Commits a new target value, picking the transition time by direction.
    ///
    /// `up` is used when the rounded, in-range target lies above the
    /// currently visible value, `down` otherwise. On a wraparound channel
    /// "above" follows the shorter arc, so 350 to 10 on a hue circle is up.
    pub fn set_channel_value_updown(
        &mut self,
        value: f64,
        up: TransitionTime,
        down: TransitionTime,
        always_apply: bool,
    ) -> bool {
        if !value.is_finite() {
            return self.set_channel_value(value, down, always_apply);
        }
        let target = self.prepare_value(value);
        let current = self.current_transitional_value();
        let rising = if self.descriptor.wraparound() {
            range::wrapped_delta(current, target, self.descriptor.range(), Direction::Auto) > 0.0
        } else {
            target > current
        };
        let transition = if rising { up } else { down };
        self.set_channel_value(value, transition, always_apply)
    }

    /// Rounds to the resolution (if enforced) and brings `value` into range.
    fn prepare_value(&self, value: f64) -> f64 {
        let rounded = if self.descriptor.enforces_resolution() {
            self.descriptor.quantize(value)
        } else {
            value
        };
        self.descriptor.normalize(rounded)
    }

    /// Changes the target by `delta` and returns the resulting target.
    ///
    /// Wraparound channels wrap at both ends. Other channels stop at `max`
    /// and at the dimming floor. On a wraparound channel a timed dim that
    /// lands on the same value still runs, as a full turn in the direction
    /// of `delta`.
    pub fn dim_channel_value(&mut self, delta: f64, transition: TransitionTime) -> f64 {
        if !delta.is_finite() {
            return self.target;
        }
        let desc = &self.descriptor;
        let raw = self.target + delta;
        let new_value = if desc.wraparound() {
            desc.normalize(raw)
        } else {
            // dimming down never raises a value already below the floor
            let floor = desc.dim_floor().min(self.target);
            raw.clamp(floor, desc.max())
        };
        let full_loop = desc.wraparound() && !transition.is_immediate() && delta != 0.0;
        if !same_value(new_value, self.target) || full_loop {
            self.set_channel_value_directed(
                new_value,
                transition,
                true,
                Direction::from_delta(delta),
            );
        }
        self.target
    }

    /// Starts or stops a continuous movement.
    ///
    /// [`Direction::Auto`] stops a running transition where it is. `Up` and
    /// `Down` issue a single dim across the whole remaining distance (a full
    /// turn for wraparound channels), taking `ms_per_unit` milliseconds per
    /// unit or the channel's default dimming rate.
    ///
    /// Returns the resulting target.
    pub fn move_channel_value(&mut self, direction: Direction, ms_per_unit: Option<f64>) -> f64 {
        if !direction.is_forced() {
            self.stop_transition();
            return self.target;
        }
        let desc = &self.descriptor;
        let distance = if desc.wraparound() {
            desc.range()
        } else if direction == Direction::Up {
            desc.max() - self.target
        } else {
            self.target - desc.dim_floor()
        }
        .max(0.0);
        let ms_per_unit = ms_per_unit
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or_else(|| 1.0 / desc.dim_per_ms());
        let duration =
            Duration::try_from_secs_f64(distance * ms_per_unit / 1000.0).unwrap_or(Duration::MAX);
        self.dim_channel_value(direction.signum() * distance, TransitionTime::Fixed(duration))
    }

    /// Freezes the channel at the value visible right now.
    pub fn stop_transition(&mut self) {
        let current = self.current_transitional_value();
        if !same_value(current, self.target) {
            tracing::debug!(channel = %self.id(), value = current, "Transition stopped");
            self.target = current;
            self.pending_apply = true;
            self.needs_persisting = true;
        }
        self.set_progress(1.0);
    }

    // ========== Transitions ==========

    /// Drives the transition state machine.
    ///
    /// Returns `true` while the channel is still in transition.
    pub fn update_transition(&mut self, step: TransitionStep) -> bool {
        self.update_transition_limited(step, 1.0)
    }

    /// Like [`update_transition`](Self::update_transition), but never lets
    /// time-based progress exceed `max_progress`.
    pub fn update_transition_limited(&mut self, step: TransitionStep, max_progress: f64) -> bool {
        let now = match step {
            TransitionStep::Begin(now) => return self.begin_transition(Some(now)),
            TransitionStep::Reset => return self.begin_transition(None),
            TransitionStep::At(now) => now,
        };
        if !self.in_transition() {
            return false;
        }
        let Some(duration) = self.transition_time.duration() else {
            // externally timed, progress comes from report_channel_progress
            return true;
        };
        let Some(start) = self.transition_start else {
            return self.set_progress(1.0);
        };
        let progress = if duration.is_zero() {
            1.0
        } else {
            now.saturating_duration_since(start).as_secs_f64() / duration.as_secs_f64()
        };
        let progress = progress.min(max_progress);
        tracing::trace!(channel = %self.id(), progress, "Transition tick");
        self.set_progress(progress)
    }

    fn begin_transition(&mut self, now: Option<Instant>) -> bool {
        if self.in_transition() {
            return true;
        }
        let forced_loop = self.descriptor.wraparound() && self.direction.is_forced();
        let unchanged = same_value(self.previous, self.target) && !forced_loop;
        match now {
            Some(now) if !self.transition_time.is_immediate() && !unchanged => {
                tracing::debug!(
                    channel = %self.id(),
                    from = self.previous,
                    to = self.target,
                    transition = %self.transition_time,
                    "Transition started"
                );
                self.transition_start = Some(now);
                self.progress = 0.0;
                true
            }
            _ => self.set_progress(1.0),
        }
    }

    /// Feeds externally observed progress into an externally timed transition.
    ///
    /// Returns `true` while the channel is still in transition.
    pub fn report_channel_progress(&mut self, progress: f64) -> bool {
        if !self.in_transition() {
            return false;
        }
        self.set_progress(progress)
    }

    /// Sets the transition progress, clamped into `[0, 1]`.
    ///
    /// Reaching 1 consolidates the transition: `previous` becomes the target
    /// and a forced direction is dropped so it cannot replay on the next,
    /// unrelated transition. Returns `true` while still in transition.
    pub fn set_progress(&mut self, progress: f64) -> bool {
        if progress.is_nan() {
            return self.in_transition();
        }
        let progress = progress.clamp(0.0, 1.0);
        if progress >= 1.0 {
            self.progress = 1.0;
            self.transition_start = None;
            self.previous = self.target;
            self.direction = Direction::Auto;
        } else {
            self.progress = progress;
        }
        self.in_transition()
    }

    // ========== Hardware synchronization ==========

    /// Takes over a value observed on the hardware.
    ///
    /// Refused while a written value is still pending (unless `always_sync`),
    /// because the readback may predate that write. Returns `true` if the
    /// cached value changed.
    pub fn sync_channel_value(
        &mut self,
        value: f64,
        always_sync: bool,
        volatile: bool,
        now: Instant,
    ) -> bool {
        if self.pending_apply && !always_sync {
            tracing::debug!(
                channel = %self.id(),
                value,
                pending = self.target,
                "Refusing hardware sync while a value is pending"
            );
            return false;
        }
        if !value.is_finite() {
            return false;
        }
        let value = self.descriptor.normalize(value);
        let changed = !same_value(value, self.target);
        self.volatile = volatile;
        self.target = value;
        self.previous = value;
        self.progress = 1.0;
        self.transition_start = None;
        self.direction = Direction::Auto;
        self.pending_apply = false;
        self.last_sync = Some(now);
        if changed && !volatile {
            self.needs_persisting = true;
        }
        if changed {
            tracing::debug!(channel = %self.id(), value, volatile, "Channel synced from hardware");
        }
        changed
    }

    /// Confirms that the target has been written to the hardware.
    ///
    /// Works mid-transition too: the hardware can already hold the final
    /// value while the software still animates toward it. Without `forced`
    /// nothing happens when no value was pending.
    pub fn channel_value_applied(&mut self, forced: bool, now: Instant) {
        if self.pending_apply || forced {
            tracing::debug!(channel = %self.id(), value = self.target, "Channel value applied");
            self.pending_apply = false;
            self.last_sync = Some(now);
        }
    }

    /// Marks the current target as needing another write.
    ///
    /// The target, the transition and the volatile flag are left as they
    /// are. Used when something outside the channel changes how its value
    /// reaches the hardware.
    pub fn request_reapply(&mut self) {
        tracing::debug!(channel = %self.id(), value = self.target, "Channel reapply requested");
        self.pending_apply = true;
    }

    // ========== Persistence ==========

    /// Value to store, `None` for volatile values.
    #[must_use]
    pub fn persisted_value(&self) -> Option<f64> {
        (!self.volatile).then_some(self.target)
    }

    /// Restores a stored value.
    ///
    /// A restored value has never been confirmed on the hardware and is
    /// therefore pending. `None` (a volatile value was stored) only marks the
    /// channel volatile.
    pub fn load_persisted_value(&mut self, value: Option<f64>) {
        match value.filter(|v| v.is_finite()) {
            Some(v) => {
                let v = self.descriptor.normalize(v);
                self.target = v;
                self.previous = v;
                self.progress = 1.0;
                self.transition_start = None;
                self.direction = Direction::Auto;
                self.pending_apply = true;
                self.volatile = false;
            }
            None => self.volatile = true,
        }
        self.needs_persisting = false;
    }

    /// Returns `true` if the value changed since it was last persisted.
    #[must_use]
    pub fn needs_persisting(&self) -> bool {
        self.needs_persisting && !self.volatile
    }

    /// Marks the current value as persisted.
    pub fn mark_persisted(&mut self) {
        self.needs_persisting = false;
    }
}
