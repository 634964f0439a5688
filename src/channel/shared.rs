// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thread-safe channel handle.
//!
//! When software intent (`set_channel_value`) and hardware readback
//! (`sync_channel_value`) arrive on different threads, both must observe the
//! same pending-apply flag. [`SharedChannel`] serializes all access to one
//! channel behind a `parking_lot::Mutex`.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, MutexGuard};

use super::Channel;
use super::range::same_value;
use crate::types::TransitionTime;

/// Cloneable, mutex-protected handle to a [`Channel`].
///
/// # Examples
///
/// ```
/// use std::time::Instant;
/// use vdc_output::channel::{Channel, ChannelDescriptor, SharedChannel};
/// use vdc_output::types::TransitionTime;
///
/// let shared = SharedChannel::new(Channel::new(ChannelDescriptor::audio_volume()).unwrap());
/// let reader = shared.clone();
///
/// shared.set_value(30.0, TransitionTime::IMMEDIATE);
/// // a stale readback cannot overwrite the pending write
/// assert!(!reader.sync_value(10.0, Instant::now()));
/// assert_eq!(reader.lock().get_channel_value(false), 30.0);
/// ```
#[derive(Debug, Clone)]
pub struct SharedChannel {
    inner: Arc<Mutex<Channel>>,
}

impl SharedChannel {
    /// Wraps a channel.
    #[must_use]
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: Arc::new(Mutex::new(channel)),
        }
    }

    /// Locks the channel for a compound operation.
    pub fn lock(&self) -> MutexGuard<'_, Channel> {
        self.inner.lock()
    }

    /// Commits a new target value (software intent).
    pub fn set_value(&self, value: f64, transition: TransitionTime) -> bool {
        self.inner.lock().set_channel_value(value, transition, false)
    }

    /// Offers a hardware readback; refused while a write is pending.
    pub fn sync_value(&self, value: f64, now: Instant) -> bool {
        self.inner.lock().sync_channel_value(value, false, false, now)
    }

    /// Confirms `written` as applied to the hardware.
    ///
    /// The confirmation only takes effect while `written` still equals the
    /// target. A value committed after the driver read it stays pending and
    /// is returned again by [`value_to_apply`](Self::value_to_apply).
    /// Returns `true` if the pending flag was cleared.
    pub fn applied(&self, written: f64, now: Instant) -> bool {
        let mut channel = self.inner.lock();
        if !channel.needs_applying() || !same_value(written, channel.get_channel_value(false)) {
            return false;
        }
        channel.channel_value_applied(false, now);
        true
    }

    /// Returns the target value if it still needs applying.
    #[must_use]
    pub fn value_to_apply(&self) -> Option<f64> {
        let channel = self.inner.lock();
        channel
            .needs_applying()
            .then(|| channel.get_channel_value(false))
    }
}

impl From<Channel> for SharedChannel {
    fn from(channel: Channel) -> Self {
        Self::new(channel)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::channel::ChannelDescriptor;

    fn shared() -> SharedChannel {
        SharedChannel::new(Channel::new(ChannelDescriptor::shade_position()).unwrap())
    }

    #[test]
    fn value_to_apply_tracks_pending() {
        let ch = shared();
        assert_eq!(ch.value_to_apply(), None);
        ch.set_value(25.0, TransitionTime::IMMEDIATE);
        assert_eq!(ch.value_to_apply(), Some(25.0));
        assert!(ch.applied(25.0, Instant::now()));
        assert_eq!(ch.value_to_apply(), None);
    }

    #[test]
    fn newer_target_survives_stale_confirmation() {
        let ch = shared();
        ch.set_value(30.0, TransitionTime::IMMEDIATE);
        let written = ch.value_to_apply();
        assert_eq!(written, Some(30.0));

        // intent arrives between the driver's read and its confirmation
        ch.set_value(60.0, TransitionTime::IMMEDIATE);
        assert!(!ch.applied(30.0, Instant::now()));

        assert!(ch.lock().needs_applying());
        assert_eq!(ch.value_to_apply(), Some(60.0));
        assert!(ch.applied(60.0, Instant::now()));
        assert_eq!(ch.value_to_apply(), None);
    }

    #[test]
    fn confirmation_without_pending_write_is_ignored() {
        let ch = shared();
        assert!(!ch.applied(0.0, Instant::now()));
    }

    #[test]
    fn readback_after_apply_is_accepted() {
        let ch = shared();
        ch.set_value(25.0, TransitionTime::IMMEDIATE);
        assert!(ch.applied(25.0, Instant::now()));
        assert!(ch.sync_value(30.0, Instant::now()));
        assert_eq!(ch.lock().get_channel_value(false), 30.0);
    }

    #[test]
    fn concurrent_writers_never_lose_a_pending_value() {
        let ch = shared();
        let writer = ch.clone();
        let reader = ch.clone();

        let w = thread::spawn(move || {
            for i in 0..200 {
                writer.set_value(f64::from(i % 100), TransitionTime::IMMEDIATE);
            }
        });
        let r = thread::spawn(move || {
            for _ in 0..200 {
                reader.sync_value(99.5, Instant::now());
            }
        });
        w.join().unwrap();
        r.join().unwrap();

        // whatever interleaving happened, a pending value was never clobbered
        let guard = ch.lock();
        if guard.needs_applying() {
            assert!((guard.get_channel_value(false) - 99.5).abs() > f64::EPSILON);
        }
    }
}
