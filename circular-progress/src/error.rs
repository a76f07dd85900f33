//! Configuration errors raised synchronously by widget setters.

use thiserror::Error;

/// A widget configuration that cannot be rendered.
///
/// All variants are raised at the call that introduced the violation; the
/// widget's prior valid state stays in effect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The multi-arc segment values add up to more than the configured max.
    #[error("progress segments sum ({total}) is greater than max value ({max})")]
    SegmentsExceedMax {
        /// Sum of the offending segment values.
        total: f32,
        /// Configured maximum progress value.
        max: f32,
    },

    /// A sweep gradient needs at least two colors.
    #[error("sweep gradient requires at least 2 colors, got {count}")]
    TooFewGradientColors {
        /// Number of colors supplied.
        count: usize,
    },
}
