// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic transition driver.
//!
//! Channels never schedule their own updates. [`TransitionDriver`] is a
//! ready-made tick loop for drivers running on tokio: it fires the armed
//! transitions of an output, advances them on a fixed period and hands the
//! output to an apply callback after every tick, until all channels have
//! settled.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::time::MissedTickBehavior;

use crate::output::Output;

/// Default tick period.
const DEFAULT_PERIOD: Duration = Duration::from_millis(50);

/// Drives output transitions on a fixed period.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use parking_lot::Mutex;
/// use vdc_output::output::{Output, OutputConfig};
/// use vdc_output::scheduler::TransitionDriver;
/// use vdc_output::types::TransitionTime;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let output = Arc::new(Mutex::new(Output::from_config(&OutputConfig::dimmer()).unwrap()));
/// output
///     .lock()
///     .channel_mut(0)
///     .unwrap()
///     .set_channel_value(60.0, TransitionTime::from_millis(100), false);
///
/// let driver = TransitionDriver::new(Duration::from_millis(20));
/// driver
///     .run(&output, |out, now| {
///         // write out.output_value_for(0, true) to the hardware here
///         out.all_channels_applied(now);
///     })
///     .await;
///
/// assert!(!output.lock().channel(0).unwrap().in_transition());
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionDriver {
    period: Duration,
}

impl TransitionDriver {
    /// Creates a driver ticking every `period`.
    ///
    /// A zero period is replaced by one millisecond.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
        }
    }

    /// The tick period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Runs transitions until no channel of `output` is in transition.
    ///
    /// `apply` is called with the locked output after the transitions were
    /// fired and after every tick, typically to write the transitional values
    /// and confirm them. The lock is never held across an await point.
    ///
    /// Time does not advance a channel whose transition time is
    /// [`TransitionTime::Unknown`](crate::types::TransitionTime::Unknown).
    /// The loop keeps ticking until `apply` feeds the hardware's progress
    /// back through
    /// [`Channel::report_channel_progress`](crate::channel::Channel::report_channel_progress)
    /// and that progress reaches 1.
    ///
    /// Returns the number of times `apply` was called.
    pub async fn run<F>(&self, output: &Mutex<Output>, mut apply: F) -> usize
    where
        F: FnMut(&mut Output, Instant),
    {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // first tick completes immediately
        let now = interval.tick().await.into_std();
        let mut running = {
            let mut out = output.lock();
            let running = out.start_transitions(now);
            apply(&mut out, now);
            running
        };
        let mut ticks = 1;

        while running {
            let now = interval.tick().await.into_std();
            let mut out = output.lock();
            running = out.step_transitions(now);
            apply(&mut out, now);
            ticks += 1;
            tracing::trace!(ticks, running, "Transition tick");
        }
        tracing::debug!(ticks, "Transitions settled");
        ticks
    }
}

impl Default for TransitionDriver {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD)
    }
}
