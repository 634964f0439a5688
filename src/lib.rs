// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `vdc_output` - output channels and scenes for device-integration gateways.
//!
//! A gateway exposes physical and cloud-connected appliances as devices made
//! of output channels and scenes. This crate is the part every device driver
//! shares: it keeps a channel's committed target, its in-flight transition
//! and the value confirmed on hardware consistent, and maps scenes onto
//! channels.
//!
//! The crate performs no I/O. Time is passed in explicitly, and transitions
//! only advance when something ticks them, either the driver itself or the
//! tokio-based [`scheduler::TransitionDriver`].
//!
//! # Features
//!
//! - **Channels**: clamped or wrapping values, resolution filtering,
//!   up/down transition times, shortest-path and forced-direction wraparound
//!   interpolation, continuous dimming with a dimming floor
//! - **Hardware sync**: pending-write tracking, readbacks that never
//!   overwrite an unapplied value
//! - **Scenes**: per-channel don't-care bits, capture and recall, undo,
//!   factory defaults for the well-known scene numbers
//! - **Categories**: single primary channel mapping and an audio mapping with
//!   mute/unmute
//! - **Output modes**: disabled, binary and gradual, applied toward hardware
//!
//! # Quick Start
//!
//! ```
//! use std::time::{Duration, Instant};
//! use vdc_output::{Output, OutputConfig, SceneCommand, SceneNumber};
//!
//! # fn main() -> vdc_output::Result<()> {
//! let config = OutputConfig::dimmer()
//!     .with_transitions(Duration::from_millis(400), Duration::from_millis(400));
//! let mut output = Output::from_config(&config)?;
//!
//! // recall preset 3 (50 %)
//! let scene = output.default_scene(SceneNumber::PRESET_3);
//! assert!(output.call_scene(&scene, SceneCommand::Invoke));
//!
//! // arm the fade, then tick it
//! let t0 = Instant::now();
//! assert!(output.start_transitions(t0));
//! output.step_transitions(t0 + Duration::from_millis(200));
//! let halfway = output.output_value_for(0, true)?;
//! assert!((halfway - 25.0).abs() < 1e-6);
//!
//! // the driver wrote the value
//! output.all_channels_applied(t0);
//! assert!(output.channels_needing_apply().is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Hardware readback
//!
//! ```
//! use std::time::Instant;
//! use vdc_output::channel::{Channel, ChannelDescriptor};
//! use vdc_output::types::TransitionTime;
//!
//! let mut channel = Channel::new(ChannelDescriptor::shade_position()).unwrap();
//! channel.set_channel_value(80.0, TransitionTime::IMMEDIATE, false);
//!
//! // a stale readback cannot overwrite the unapplied write
//! assert!(!channel.sync_channel_value(10.0, false, false, Instant::now()));
//! assert_eq!(channel.get_channel_value(false), 80.0);
//!
//! channel.channel_value_applied(false, Instant::now());
//! assert!(channel.sync_channel_value(75.0, false, false, Instant::now()));
//! ```

pub mod category;
pub mod channel;
pub mod error;
pub mod output;
pub mod scene;
pub mod scheduler;
pub mod types;

pub use category::{
    AudioMapping, AudioPowerState, Category, CategoryKind, SceneMapping, StandardMapping,
};
pub use channel::{
    Channel, ChannelDescriptor, ChannelDescriptorBuilder, SharedChannel, TransitionStep,
};
pub use error::{ConfigError, Error, Result};
pub use output::{ChannelSet, DimMode, NoHooks, Output, OutputConfig, OutputHooks, SceneTiming};
pub use scene::{DefaultLevel, Scene, SceneCommand, SceneFlags, SceneValue};
pub use scheduler::TransitionDriver;
pub use types::{ChannelType, Direction, OutputMode, SceneNumber, TransitionTime};
