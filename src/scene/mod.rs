// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scenes: stored, partially masked channel snapshots.
//!
//! A [`Scene`] holds one [`SceneValue`] per channel index (a value plus a
//! don't-care bit), scene-wide [`SceneFlags`] and an optional
//! category-specific command string. Capturing a value always clears its
//! don't-care bit; recalling never touches a channel whose bit is set.

mod command;
mod defaults;
mod device_scene;

pub use command::SceneCommand;
pub use defaults::DefaultLevel;
pub use device_scene::{Scene, SceneFlags, SceneValue};
