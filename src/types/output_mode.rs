// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output mode.

use std::fmt;

/// How an output passes its primary channel value on to the hardware.
///
/// The mode is applied at the boundary toward the hardware only; the
/// channel itself always keeps the untransformed value.
///
/// | Mode | Hardware value |
/// |------|----------------|
/// | `Disabled` | always 0 |
/// | `Binary` | 0 for values ≤ 0, 100 otherwise |
/// | `Gradual` | unchanged |
///
/// # Examples
///
/// ```
/// use vdc_output::types::OutputMode;
///
/// assert_eq!(OutputMode::Binary.transform(0.4), 100.0);
/// assert_eq!(OutputMode::Binary.transform(0.0), 0.0);
/// assert_eq!(OutputMode::Disabled.transform(80.0), 0.0);
/// assert_eq!(OutputMode::Gradual.transform(42.5), 42.5);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Output is switched off regardless of channel values.
    Disabled,
    /// On/off only.
    Binary,
    /// Full range pass-through.
    #[default]
    Gradual,
}

impl OutputMode {
    /// Full-scale value used for the "on" state of a binary output.
    pub const BINARY_ON: f64 = 100.0;

    /// Transforms a raw primary channel value according to this mode.
    #[must_use]
    pub fn transform(&self, raw: f64) -> f64 {
        match self {
            Self::Disabled => 0.0,
            Self::Binary => {
                if raw <= 0.0 {
                    0.0
                } else {
                    Self::BINARY_ON
                }
            }
            Self::Gradual => raw,
        }
    }

    /// Returns the identifier used in configuration documents.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Binary => "binary",
            Self::Gradual => "gradual",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_treats_negative_as_off() {
        assert_eq!(OutputMode::Binary.transform(-10.0), 0.0);
        assert_eq!(OutputMode::Binary.transform(f64::MIN_POSITIVE), 100.0);
    }

    #[test]
    fn default_is_gradual() {
        assert_eq!(OutputMode::default(), OutputMode::Gradual);
    }

    #[test]
    fn serde_roundtrip_names() {
        let mode: OutputMode = serde_json::from_str("\"binary\"").unwrap();
        assert_eq!(mode, OutputMode::Binary);
        assert_eq!(serde_json::to_string(&OutputMode::Disabled).unwrap(), "\"disabled\"");
    }
}
