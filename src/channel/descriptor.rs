// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel descriptors: the fixed, read-only metadata of a channel.
//!
//! A descriptor can be created from one of the presets, assembled with
//! [`ChannelDescriptorBuilder`], or deserialized from a configuration
//! document. Deserialized descriptors are validated when the channel is
//! created, so a degenerate range is rejected before any value is set.

use serde::{Deserialize, Serialize};

use super::range;
use crate::error::ConfigError;
use crate::types::ChannelType;

/// Time for a full-scale dimming sweep when no rate is configured.
pub const FULL_SCALE_DIM_TIME_MS: f64 = 7000.0;

/// Static description of a channel.
///
/// # Examples
///
/// ```
/// use vdc_output::channel::ChannelDescriptor;
///
/// let hue = ChannelDescriptor::hue();
/// assert!(hue.wraparound());
/// assert_eq!(hue.range(), 360.0);
///
/// let brightness = ChannelDescriptor::brightness();
/// assert_eq!(brightness.dim_floor(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelDescriptor {
    id: String,
    #[serde(rename = "type", default)]
    channel_type: ChannelType,
    min: f64,
    max: f64,
    #[serde(default = "default_resolution")]
    resolution: f64,
    #[serde(default)]
    wraparound: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dim_per_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dim_floor: Option<f64>,
    #[serde(default = "default_enforce_resolution")]
    enforce_resolution: bool,
}

fn default_resolution() -> f64 {
    1.0
}

fn default_enforce_resolution() -> bool {
    true
}

impl ChannelDescriptor {
    /// Starts building a descriptor.
    #[must_use]
    pub fn builder(id: impl Into<String>, channel_type: ChannelType) -> ChannelDescriptorBuilder {
        ChannelDescriptorBuilder::new(id, channel_type)
    }

    fn preset(id: &str, channel_type: ChannelType, min: f64, max: f64, resolution: f64) -> Self {
        Self {
            id: id.to_string(),
            channel_type,
            min,
            max,
            resolution,
            wraparound: false,
            dim_per_ms: None,
            dim_floor: None,
            enforce_resolution: true,
        }
    }

    /// Light brightness, 0-100 % with a 1 % dimming floor.
    #[must_use]
    pub fn brightness() -> Self {
        Self {
            dim_floor: Some(1.0),
            ..Self::preset("brightness", ChannelType::Brightness, 0.0, 100.0, 0.1)
        }
    }

    /// Color hue, 0-360 ° wrapping around.
    #[must_use]
    pub fn hue() -> Self {
        Self {
            wraparound: true,
            ..Self::preset("hue", ChannelType::Hue, 0.0, 360.0, 0.1)
        }
    }

    /// Color saturation, 0-100 %.
    #[must_use]
    pub fn saturation() -> Self {
        Self::preset("saturation", ChannelType::Saturation, 0.0, 100.0, 0.1)
    }

    /// White color temperature, 100-1000 mired.
    #[must_use]
    pub fn color_temperature() -> Self {
        Self::preset("colortemp", ChannelType::ColorTemperature, 100.0, 1000.0, 1.0)
    }

    /// Shade position, 0-100 %.
    #[must_use]
    pub fn shade_position() -> Self {
        Self::preset("position", ChannelType::ShadePosition, 0.0, 100.0, 0.5)
    }

    /// Shade slat angle, 0-100 %.
    #[must_use]
    pub fn shade_angle() -> Self {
        Self::preset("angle", ChannelType::ShadeAngle, 0.0, 100.0, 1.0)
    }

    /// Audio volume, 0-100 % with a 1 % dimming floor.
    #[must_use]
    pub fn audio_volume() -> Self {
        Self {
            dim_floor: Some(1.0),
            ..Self::preset("volume", ChannelType::AudioVolume, 0.0, 100.0, 1.0)
        }
    }

    /// Device power state: 0 = off, 1 = on, 2 = paused.
    #[must_use]
    pub fn power_state() -> Self {
        Self::preset("powerstate", ChannelType::PowerState, 0.0, 2.0, 1.0)
    }

    /// Content source index with `sources` distinct values.
    ///
    /// At least two sources are assumed so the range never degenerates.
    #[must_use]
    pub fn content_source(sources: u16) -> Self {
        let max = f64::from(sources.max(2) - 1);
        Self::preset("source", ChannelType::ContentSource, 0.0, max, 1.0)
    }

    /// Checks the descriptor for construction-time defects.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the bounds are not finite, the range is
    /// empty, the resolution or dimming rate is not positive, or the dimming
    /// floor lies outside the range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::NonFiniteBound);
        }
        if self.max <= self.min {
            return Err(ConfigError::DegenerateRange {
                min: self.min,
                max: self.max,
            });
        }
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(ConfigError::InvalidResolution(self.resolution));
        }
        if let Some(rate) = self.dim_per_ms
            && !(rate.is_finite() && rate > 0.0)
        {
            return Err(ConfigError::InvalidDimRate(rate));
        }
        if let Some(floor) = self.dim_floor
            && !(self.min..=self.max).contains(&floor)
        {
            return Err(ConfigError::DimFloorOutOfRange {
                floor,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Channel identifier, unique within an output.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Kind of quantity this channel controls.
    #[must_use]
    pub const fn channel_type(&self) -> ChannelType {
        self.channel_type
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Span between the bounds.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Quantization step.
    #[must_use]
    pub const fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Whether `max` and `min` denote the same physical state.
    #[must_use]
    pub const fn wraparound(&self) -> bool {
        self.wraparound
    }

    /// Whether new values are rounded to the resolution.
    #[must_use]
    pub const fn enforces_resolution(&self) -> bool {
        self.enforce_resolution
    }

    /// Dimming rate in units per millisecond.
    ///
    /// Defaults to a full-scale sweep in [`FULL_SCALE_DIM_TIME_MS`].
    #[must_use]
    pub fn dim_per_ms(&self) -> f64 {
        self.dim_per_ms
            .unwrap_or_else(|| self.range() / FULL_SCALE_DIM_TIME_MS)
    }

    /// Lowest value dimming down will reach. Defaults to `min`.
    #[must_use]
    pub fn dim_floor(&self) -> f64 {
        self.dim_floor.unwrap_or(self.min)
    }

    /// Clamps (or wraps) `value` into the channel range.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        if self.wraparound {
            range::wrap(value, self.min, self.max)
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Rounds `value` to the nearest multiple of the resolution.
    #[must_use]
    pub fn quantize(&self, value: f64) -> f64 {
        range::quantize(value, self.resolution)
    }
}

/// Builder for [`ChannelDescriptor`].
///
/// # Examples
///
/// ```
/// use vdc_output::channel::ChannelDescriptor;
/// use vdc_output::types::ChannelType;
///
/// let angle = ChannelDescriptor::builder("rotation", ChannelType::Generic)
///     .range(0.0, 360.0)
///     .resolution(0.5)
///     .wraparound()
///     .build()
///     .unwrap();
/// assert!(angle.wraparound());
///
/// // An empty range is rejected up front
/// assert!(ChannelDescriptor::builder("bad", ChannelType::Generic)
///     .range(10.0, 10.0)
///     .build()
///     .is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ChannelDescriptorBuilder {
    inner: ChannelDescriptor,
}

impl ChannelDescriptorBuilder {
    /// Creates a builder for a 0-100 channel with resolution 1.
    #[must_use]
    pub fn new(id: impl Into<String>, channel_type: ChannelType) -> Self {
        Self {
            inner: ChannelDescriptor {
                id: id.into(),
                channel_type,
                min: 0.0,
                max: 100.0,
                resolution: default_resolution(),
                wraparound: false,
                dim_per_ms: None,
                dim_floor: None,
                enforce_resolution: true,
            },
        }
    }

    /// Sets the value range.
    #[must_use]
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.inner.min = min;
        self.inner.max = max;
        self
    }

    /// Sets the quantization step.
    #[must_use]
    pub fn resolution(mut self, resolution: f64) -> Self {
        self.inner.resolution = resolution;
        self
    }

    /// Makes the channel wrap around at its bounds.
    #[must_use]
    pub fn wraparound(mut self) -> Self {
        self.inner.wraparound = true;
        self
    }

    /// Overrides the default dimming rate (units per millisecond).
    #[must_use]
    pub fn dim_per_ms(mut self, rate: f64) -> Self {
        self.inner.dim_per_ms = Some(rate);
        self
    }

    /// Sets the lowest value dimming down will reach.
    #[must_use]
    pub fn dim_floor(mut self, floor: f64) -> Self {
        self.inner.dim_floor = Some(floor);
        self
    }

    /// Accepts values between resolution steps as given.
    #[must_use]
    pub fn without_resolution_enforcement(mut self) -> Self {
        self.inner.enforce_resolution = false;
        self
    }

    /// Validates and returns the descriptor.
    ///
    /// # Errors
    ///
    /// See [`ChannelDescriptor::validate`].
    pub fn build(self) -> Result<ChannelDescriptor, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
