// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device outputs.
//!
//! An [`Output`] owns a [`ChannelSet`] whose first channel is the primary
//! channel, an [`OutputMode`](crate::types::OutputMode) applied at the
//! boundary toward hardware, and a [`Category`](crate::category::Category)
//! mapping scenes onto the channels. Drivers plug in through
//! [`OutputHooks`].

mod channel_set;
mod config;
mod device_output;
mod hooks;

pub use channel_set::{ChannelSet, SceneTiming};
pub use config::OutputConfig;
pub use device_output::{DimMode, Output};
pub use hooks::{NoHooks, OutputHooks};
