//! Size resolution with a last-known-good fallback.
//!
//! The widget always renders inside a square. Resolution takes the smaller
//! of the proposed width/height, computes the inset needed for the stroke
//! and the thumb overshoot, and refuses configurations whose arc region
//! would be degenerate, silently substituting the last valid snapshot
//! instead.

use tracing::debug;

use crate::{
    geometry::Rect,
    style::{ThumbConfig, ThumbScaleMode},
};

/// Fixed padding between the widget bounds and the arc band.
pub const VIEW_PADDING: f32 = 10.0;

/// Vertical offset of the shadow behind the arc.
pub const SHADOW_PADDING: f32 = 5.0;

/// Dimension substituted when the host leaves the height unspecified.
pub const DEFAULT_MAX_DIMENSION: f32 = 100.0;

/// Snapshot of the last configuration that produced a renderable layout.
///
/// Seeded at construction with the widget defaults, overwritten on every
/// valid resolution and read back whenever a proposal cannot fit its stroke
/// and thumb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCache {
    /// Inset of the arc band from the widget edge.
    pub arc_inset: f32,
    /// Stroke thickness of the valid configuration.
    pub stroke_thickness: f32,
    /// Absolute thumb size of the valid configuration.
    pub thumb_size: f32,
    /// Thumb size rate of the valid configuration.
    pub thumb_size_rate: f32,
}

/// Output of one size resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLayout {
    /// Final square dimension of the widget.
    pub dimension: f32,
    /// Bounds the progress arcs and background oval are inscribed in.
    pub progress_rect: Rect,
    /// Progress bounds shifted down for the shadow pass.
    pub shadow_rect: Rect,
    /// Effective stroke thickness (the proposal's, or the fallback's).
    pub stroke_thickness: f32,
    /// Effective absolute thumb size.
    pub thumb_size: f32,
    /// Effective thumb size rate.
    pub thumb_size_rate: f32,
    /// Whether the last-known-good snapshot had to be substituted.
    pub used_fallback: bool,
}

/// Thumb extent as it participates in measurement. In `Auto` mode the thumb
/// rides inside the stroke band, so the stroke itself is the extent.
fn measured_thumb_extent(thumb: &ThumbConfig, stroke_thickness: f32) -> f32 {
    match thumb.mode {
        ThumbScaleMode::Point => thumb.size,
        ThumbScaleMode::Rate => stroke_thickness / 2.0 * thumb.size_rate,
        ThumbScaleMode::Auto => stroke_thickness,
    }
}

/// Resolves the widget's square dimension and drawable rectangles.
///
/// `height_unspecified` substitutes [`DEFAULT_MAX_DIMENSION`] for the
/// proposed height. On a valid proposal the cache is overwritten; on a
/// degenerate one (arc region no wider than the stroke/thumb extent) the
/// cached values are substituted and the thumb rate is clamped to the
/// configured maximum. Resolving the same inputs twice yields the same
/// output.
pub fn resolve(
    cache: &mut LayoutCache,
    proposed_width: f32,
    proposed_height: f32,
    height_unspecified: bool,
    stroke_thickness: f32,
    thumb: &ThumbConfig,
) -> ResolvedLayout {
    let height = if height_unspecified {
        DEFAULT_MAX_DIMENSION
    } else {
        proposed_height
    };
    let dimension = proposed_width.min(height).max(0.0);

    let thumb_extent = measured_thumb_extent(thumb, stroke_thickness);
    let mut progress_width = stroke_thickness;
    // A thumb thicker than the stroke band pushes the arc further inward.
    if thumb.enabled && thumb.mode != ThumbScaleMode::Auto {
        if thumb_extent * 2.0 > stroke_thickness {
            progress_width += thumb_extent - stroke_thickness;
        } else {
            progress_width = stroke_thickness / 2.0;
        }
    }

    let arc_inset = progress_width.max(0.0) + VIEW_PADDING;
    let progress_rect = Rect::square_inset(dimension, arc_inset);

    let (layout, fallback) = if progress_rect.width() <= progress_width.max(thumb_extent) {
        let rect = Rect::square_inset(dimension, cache.arc_inset);
        (
            ResolvedLayout {
                dimension,
                progress_rect: rect,
                shadow_rect: rect.offset(0.0, SHADOW_PADDING),
                stroke_thickness: cache.stroke_thickness,
                thumb_size: cache.thumb_size,
                thumb_size_rate: cache.thumb_size_rate.min(thumb.max_size_rate).max(0.0),
                used_fallback: true,
            },
            true,
        )
    } else {
        *cache = LayoutCache {
            arc_inset,
            stroke_thickness,
            thumb_size: thumb.size,
            thumb_size_rate: thumb.size_rate,
        };
        (
            ResolvedLayout {
                dimension,
                progress_rect,
                shadow_rect: progress_rect.offset(0.0, SHADOW_PADDING),
                stroke_thickness,
                thumb_size: thumb.size,
                thumb_size_rate: thumb.size_rate,
                used_fallback: false,
            },
            false,
        )
    };

    if fallback {
        debug!(
            dimension,
            stroke_thickness, "degenerate layout proposal, reusing last valid configuration"
        );
    }
    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thumb(enabled: bool, mode: ThumbScaleMode) -> ThumbConfig {
        ThumbConfig {
            enabled,
            mode,
            size: 10.0,
            size_rate: 2.0,
            max_size_rate: 2.0,
        }
    }

    fn default_cache() -> LayoutCache {
        LayoutCache {
            arc_inset: 20.0,
            stroke_thickness: 10.0,
            thumb_size: 10.0,
            thumb_size_rate: 2.0,
        }
    }

    #[test]
    fn test_resolve_valid_square() {
        let mut cache = default_cache();
        let layout = resolve(
            &mut cache,
            200.0,
            300.0,
            false,
            10.0,
            &thumb(false, ThumbScaleMode::Auto),
        );
        assert_eq!(layout.dimension, 200.0);
        assert!(!layout.used_fallback);
        // inset = stroke + padding
        assert_eq!(layout.progress_rect, Rect::new(20.0, 20.0, 180.0, 180.0));
        assert_eq!(layout.shadow_rect.top, 25.0);
        assert_eq!(cache.arc_inset, 20.0);
        assert_eq!(cache.stroke_thickness, 10.0);
    }

    #[test]
    fn test_resolve_height_unspecified_uses_default_max() {
        let mut cache = default_cache();
        let layout = resolve(
            &mut cache,
            400.0,
            0.0,
            true,
            10.0,
            &thumb(false, ThumbScaleMode::Auto),
        );
        assert_eq!(layout.dimension, DEFAULT_MAX_DIMENSION);
    }

    #[test]
    fn test_resolve_point_thumb_widens_inset() {
        let mut cache = default_cache();
        let layout = resolve(
            &mut cache,
            200.0,
            200.0,
            false,
            10.0,
            &thumb(true, ThumbScaleMode::Point),
        );
        // progress_width = 10 + (10 - 10) = 10... thumb 10 * 2 > 10, so
        // width grows by thumb - stroke = 0; inset stays stroke + padding.
        assert_eq!(layout.progress_rect.left, 20.0);

        let mut wide = thumb(true, ThumbScaleMode::Point);
        wide.size = 18.0;
        let layout = resolve(&mut cache, 200.0, 200.0, false, 10.0, &wide);
        // progress_width = 10 + (18 - 10) = 18, inset = 28.
        assert_eq!(layout.progress_rect.left, 28.0);
    }

    #[test]
    fn test_resolve_degenerate_falls_back_to_cache() {
        let mut cache = default_cache();
        let before = cache;
        let layout = resolve(
            &mut cache,
            30.0,
            30.0,
            false,
            40.0,
            &thumb(false, ThumbScaleMode::Auto),
        );
        assert!(layout.used_fallback);
        assert_eq!(layout.stroke_thickness, before.stroke_thickness);
        assert_eq!(layout.progress_rect, Rect::square_inset(30.0, 20.0));
        // Fallback never mutates the snapshot.
        assert_eq!(cache, before);
    }

    #[test]
    fn test_resolve_fallback_clamps_thumb_rate() {
        let mut cache = default_cache();
        cache.thumb_size_rate = 5.0;
        let mut t = thumb(true, ThumbScaleMode::Rate);
        t.size_rate = 5.0;
        t.max_size_rate = 2.0;
        let layout = resolve(&mut cache, 30.0, 30.0, false, 40.0, &t);
        assert!(layout.used_fallback);
        assert_eq!(layout.thumb_size_rate, 2.0);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut cache = default_cache();
        let t = thumb(true, ThumbScaleMode::Point);
        let a = resolve(&mut cache, 150.0, 150.0, false, 12.0, &t);
        let cache_after_first = cache;
        let b = resolve(&mut cache, 150.0, 150.0, false, 12.0, &t);
        assert_eq!(a, b);
        assert_eq!(cache, cache_after_first);
    }

    #[test]
    fn test_resolve_negative_proposal_clamps_to_zero() {
        let mut cache = default_cache();
        let layout = resolve(
            &mut cache,
            -50.0,
            -50.0,
            false,
            10.0,
            &thumb(false, ThumbScaleMode::Auto),
        );
        assert_eq!(layout.dimension, 0.0);
        assert!(layout.used_fallback);
    }
}
