//! Paint and style state: stroke caps, thumb scaling, gradients and brushes.

use crate::{color::Color, error::ConfigError};

/// Alpha factor applied to the background color when the translucent
/// background is enabled.
pub const BACKGROUND_ALPHA_FACTOR: f32 = 0.3;

/// Alpha factor applied to black for the shadow paint.
pub const SHADOW_ALPHA_FACTOR: f32 = 0.2;

/// How stroked arc endpoints are capped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    /// Flat cap ending exactly at the endpoint.
    #[default]
    Square,
    /// Semicircular cap extending past the endpoint.
    Round,
}

impl StrokeCap {
    /// Cap for the `rounded` style flag.
    #[inline]
    pub fn from_rounded(rounded: bool) -> Self {
        if rounded { Self::Round } else { Self::Square }
    }
}

/// How the thumb marker's size is derived.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ThumbScaleMode {
    /// Thumb radius follows the stroke thickness (half of it).
    #[default]
    Auto,
    /// Absolute thumb radius in pixels.
    Point,
    /// Thumb radius is `stroke / 2 * size_rate`.
    Rate,
}

/// Thumb marker configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbConfig {
    /// Whether the thumb is drawn at all (single-arc mode only).
    pub enabled: bool,
    /// Size derivation mode.
    pub mode: ThumbScaleMode,
    /// Absolute radius used in [`ThumbScaleMode::Point`].
    pub size: f32,
    /// Rate relative to half the stroke, used in [`ThumbScaleMode::Rate`].
    pub size_rate: f32,
    /// Upper bound the rate is clamped to when a degenerate layout forces a
    /// fallback.
    pub max_size_rate: f32,
}

impl ThumbConfig {
    /// Effective thumb radius for the given stroke thickness.
    pub fn radius(&self, stroke_thickness: f32) -> f32 {
        match self.mode {
            ThumbScaleMode::Auto => stroke_thickness / 2.0,
            ThumbScaleMode::Point => self.size,
            ThumbScaleMode::Rate => stroke_thickness / 2.0 * self.size_rate,
        }
    }

    /// Whether the thumb's diameter exceeds the stroke thickness, meaning it
    /// overshoots the arc band.
    pub fn is_thicker_than_stroke(&self, stroke_thickness: f32) -> bool {
        match self.mode {
            ThumbScaleMode::Auto => false,
            ThumbScaleMode::Point => self.size * 2.0 > stroke_thickness,
            ThumbScaleMode::Rate => self.size_rate > 1.0,
        }
    }
}

/// Validated sweep-gradient configuration, before a center is known.
///
/// The realized [`SweepGradient`] is built lazily once layout bounds exist,
/// and rebuilt only when this spec or the drawable size changes.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSpec {
    colors: Vec<Color>,
    positions: Option<Vec<f32>>,
}

impl GradientSpec {
    /// Validates and stores a gradient configuration.
    ///
    /// `colors` needs at least two entries. `positions`, when given, holds
    /// the relative position of each color in `[0, 1]`; when absent the
    /// colors are spaced evenly. `duplicate_first` appends a copy of the
    /// first color so the gradient stitches seamlessly at 360 degrees.
    pub fn new(
        colors: &[Color],
        positions: Option<&[f32]>,
        duplicate_first: bool,
    ) -> Result<Self, ConfigError> {
        if colors.len() < 2 {
            return Err(ConfigError::TooFewGradientColors {
                count: colors.len(),
            });
        }
        let mut colors = colors.to_vec();
        if duplicate_first {
            colors.push(colors[0]);
        }
        Ok(Self {
            colors,
            positions: positions.map(<[f32]>::to_vec),
        })
    }

    /// The color sequence after `duplicate_first` expansion.
    pub fn effective_colors(&self) -> &[Color] {
        &self.colors
    }

    /// Realizes the gradient around `center`.
    pub fn realize(&self, center: (f32, f32)) -> SweepGradient {
        SweepGradient {
            center,
            colors: self.colors.clone(),
            positions: self.positions.clone(),
        }
    }
}

/// A realized sweep gradient: colors interpolated around a center point.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepGradient {
    /// Center of the angular interpolation.
    pub center: (f32, f32),
    /// Colors distributed around the center.
    pub colors: Vec<Color>,
    /// Relative positions of the colors; evenly spaced when `None`.
    pub positions: Option<Vec<f32>>,
}

/// What an arc is painted with.
#[derive(Debug, Clone, PartialEq)]
pub enum Brush {
    /// A single flat color.
    Solid(Color),
    /// A sweep gradient.
    Sweep(SweepGradient),
}
