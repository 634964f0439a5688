// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Range arithmetic for linear and wraparound channels.

use crate::types::Direction;

/// Tolerance below which two channel values are considered identical.
pub(crate) const VALUE_EPSILON: f64 = 1e-9;

/// Returns `true` if `a` and `b` denote the same channel value.
pub(crate) fn same_value(a: f64, b: f64) -> bool {
    (a - b).abs() < VALUE_EPSILON
}

/// Reduces `value` modulo `max - min` into `[min, max)`.
pub(crate) fn wrap(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    let wrapped = min + (value - min).rem_euclid(span);
    // rem_euclid can round up to exactly `span` for tiny negative inputs
    if wrapped >= max { min } else { wrapped }
}

/// Rounds `value` to the nearest multiple of `resolution`.
pub(crate) fn quantize(value: f64, resolution: f64) -> f64 {
    (value / resolution).round() * resolution
}

/// Distance to travel from `previous` to `target` on a circle of `span`.
///
/// With a forced direction the result always has that direction's sign,
/// extending a wrong-signed or zero delta by a full turn. Without one the
/// shorter of the two arcs is chosen.
pub(crate) fn wrapped_delta(previous: f64, target: f64, span: f64, direction: Direction) -> f64 {
    let delta = target - previous;
    match direction {
        Direction::Up if delta <= VALUE_EPSILON => delta + span,
        Direction::Down if delta >= -VALUE_EPSILON => delta - span,
        Direction::Up | Direction::Down => delta,
        Direction::Auto => {
            if delta > span / 2.0 {
                delta - span
            } else if delta < -span / 2.0 {
                delta + span
            } else {
                delta
            }
        }
    }
}
