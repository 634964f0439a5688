// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output channels.
//!
//! - [`ChannelDescriptor`] - Read-only metadata (range, resolution, wraparound, dimming)
//! - [`Channel`] - Value, transition and hardware-sync state machine
//! - [`SharedChannel`] - Mutex-protected handle for multi-threaded drivers
//!
//! # Examples
//!
//! ```
//! use std::time::Instant;
//! use vdc_output::channel::{Channel, ChannelDescriptor, TransitionStep};
//! use vdc_output::types::{Direction, TransitionTime};
//!
//! let mut hue = Channel::new(ChannelDescriptor::hue()).unwrap();
//! hue.set_channel_value(350.0, TransitionTime::IMMEDIATE, true);
//! hue.update_transition(TransitionStep::Reset);
//!
//! // 350° -> 10° travels the short way through 0°
//! hue.set_channel_value(10.0, TransitionTime::from_millis(1000), false);
//! hue.update_transition(TransitionStep::Begin(Instant::now()));
//! hue.set_progress(0.5);
//! assert!(hue.current_transitional_value().abs() < 1e-9);
//! ```

mod descriptor;
mod engine;
mod range;
mod shared;

pub use descriptor::{ChannelDescriptor, ChannelDescriptorBuilder, FULL_SCALE_DIM_TIME_MS};
pub use engine::{Channel, TransitionStep};
pub use shared::SharedChannel;
