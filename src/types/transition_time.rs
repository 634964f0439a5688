// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transition duration type.

use std::fmt;
use std::time::Duration;

/// Duration of a channel transition.
///
/// Most transitions are timed by the gateway itself ([`TransitionTime::Fixed`]).
/// Some hardware runs transitions on its own clock (a motor-driven blind
/// reports where it is); those use [`TransitionTime::Unknown`] and feed
/// progress back through `Channel::report_channel_progress`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use vdc_output::types::TransitionTime;
///
/// let fade = TransitionTime::from_millis(500);
/// assert_eq!(fade.duration(), Some(Duration::from_millis(500)));
/// assert!(TransitionTime::IMMEDIATE.is_immediate());
/// assert!(TransitionTime::Unknown.duration().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionTime {
    /// Transition timed by the gateway.
    Fixed(Duration),
    /// Transition timed externally.
    Unknown,
}

impl TransitionTime {
    /// No transition at all.
    pub const IMMEDIATE: Self = Self::Fixed(Duration::ZERO);

    /// Creates a fixed transition time from milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self::Fixed(Duration::from_millis(millis))
    }

    /// Returns the fixed duration, if known.
    #[must_use]
    pub const fn duration(&self) -> Option<Duration> {
        match self {
            Self::Fixed(d) => Some(*d),
            Self::Unknown => None,
        }
    }

    /// Returns `true` for a zero fixed duration.
    #[must_use]
    pub const fn is_immediate(&self) -> bool {
        matches!(self, Self::Fixed(d) if d.is_zero())
    }

    /// Returns `true` for externally timed transitions.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl Default for TransitionTime {
    fn default() -> Self {
        Self::IMMEDIATE
    }
}

impl From<Duration> for TransitionTime {
    fn from(value: Duration) -> Self {
        Self::Fixed(value)
    }
}

impl fmt::Display for TransitionTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(d) => write!(f, "{}ms", d.as_millis()),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_immediate() {
        assert_eq!(TransitionTime::default(), TransitionTime::IMMEDIATE);
        assert!(!TransitionTime::from_millis(1).is_immediate());
        assert!(!TransitionTime::Unknown.is_immediate());
    }

    #[test]
    fn display() {
        assert_eq!(TransitionTime::from_millis(250).to_string(), "250ms");
        assert_eq!(TransitionTime::Unknown.to_string(), "unknown");
    }
}
