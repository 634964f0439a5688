// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transition direction for wraparound channels.

use std::fmt;

/// Requested direction of travel for a transition.
///
/// Only wraparound channels (e.g. a hue angle) care about the direction:
/// with [`Direction::Auto`] they take the shorter arc, with `Up`/`Down` they
/// travel the requested way even if that means going the long way around.
///
/// # Examples
///
/// ```
/// use vdc_output::types::Direction;
///
/// assert_eq!(Direction::from_delta(-3.5), Direction::Down);
/// assert_eq!(Direction::from_delta(0.0), Direction::Auto);
/// assert_eq!(Direction::Up.signum(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Decreasing values.
    Down,
    /// Shortest path.
    #[default]
    Auto,
    /// Increasing values.
    Up,
}

impl Direction {
    /// Returns the direction matching the sign of `delta`.
    #[must_use]
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Up
        } else if delta < 0.0 {
            Self::Down
        } else {
            Self::Auto
        }
    }

    /// Returns -1, 0 or +1.
    #[must_use]
    pub const fn as_i8(&self) -> i8 {
        match self {
            Self::Down => -1,
            Self::Auto => 0,
            Self::Up => 1,
        }
    }

    /// Returns -1.0, 0.0 or +1.0.
    #[must_use]
    pub fn signum(&self) -> f64 {
        f64::from(self.as_i8())
    }

    /// Returns `true` unless this is [`Direction::Auto`].
    #[must_use]
    pub const fn is_forced(&self) -> bool {
        !matches!(self, Self::Auto)
    }
}

impl From<i8> for Direction {
    fn from(value: i8) -> Self {
        match value.signum() {
            1 => Self::Up,
            -1 => Self::Down,
            _ => Self::Auto,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.as_i8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_i8_uses_sign() {
        assert_eq!(Direction::from(5), Direction::Up);
        assert_eq!(Direction::from(-2), Direction::Down);
        assert_eq!(Direction::from(0), Direction::Auto);
    }

    #[test]
    fn forced_directions() {
        assert!(Direction::Up.is_forced());
        assert!(Direction::Down.is_forced());
        assert!(!Direction::Auto.is_forced());
    }

    #[test]
    fn display_shows_sign() {
        assert_eq!(Direction::Up.to_string(), "+1");
        assert_eq!(Direction::Down.to_string(), "-1");
    }
}
