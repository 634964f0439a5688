// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Driver callbacks invoked by an output during scene handling.

use std::time::Instant;

use super::ChannelSet;

/// Callbacks an output makes into its device driver.
///
/// Both methods default to doing nothing, so a driver only implements what
/// it supports.
pub trait OutputHooks: Send {
    /// Stops category-specific actions of a previously recalled scene.
    ///
    /// Called before every scene recall, so a new recall never races with
    /// the side effects of an older one.
    fn stop_scene_actions(&mut self) {}

    /// Refreshes channel values from the hardware before a scene capture.
    ///
    /// Implementations push what they know through
    /// [`Channel::sync_channel_value`](crate::channel::Channel::sync_channel_value).
    fn request_channel_refresh(&mut self, channels: &mut ChannelSet, now: Instant) {
        let _ = (channels, now);
    }
}

/// Hooks of an output without a driver attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl OutputHooks for NoHooks {}
