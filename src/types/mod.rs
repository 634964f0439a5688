// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by channels, scenes and outputs.
//!
//! # Types
//!
//! - [`ChannelType`] - Kind of quantity a channel controls
//! - [`Direction`] - Forced or automatic travel direction for wraparound channels
//! - [`OutputMode`] - Disabled / binary / gradual output
//! - [`TransitionTime`] - Fixed or externally timed transition duration
//! - [`SceneNumber`] - Scene slot identifier with well-known constants

mod channel_type;
mod direction;
mod output_mode;
mod scene_number;
mod transition_time;

pub use channel_type::ChannelType;
pub use direction::Direction;
pub use output_mode::OutputMode;
pub use scene_number::SceneNumber;
pub use transition_time::TransitionTime;
