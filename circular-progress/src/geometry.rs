//! Pure arc geometry: sweep angles, points on the circle, multi-arc chaining.
//!
//! Everything in this module is a side-effect-free function of its inputs.
//! Angles are in degrees, measured from the positive x axis and growing
//! clockwise (screen coordinates, y grows downward).

/// Cosmetic overlap, in degrees, applied at multi-arc segment boundaries so
/// adjacent arc caps do not show a visible seam. Applied only when the
/// progress direction is not reversed.
pub const MULTI_ARC_JOIN_OVERLAP_DEG: f32 = 6.0;

/// An axis-aligned rectangle in `f32` pixel coordinates.
///
/// Plays the role of the drawable arc bounds: arcs and ovals are inscribed
/// in it, thumbs are positioned relative to its center.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl Rect {
    /// Creates a rectangle from its four edges.
    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The square rectangle inset by `inset` on every side within a
    /// `dimension` x `dimension` area.
    #[inline]
    pub fn square_inset(dimension: f32, inset: f32) -> Self {
        Self::new(inset, inset, dimension - inset, dimension - inset)
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// X coordinate of the center.
    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    /// Y coordinate of the center.
    #[inline]
    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    /// This rectangle translated by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }
}

/// Angular extent of the arc for `value` out of `max`, in degrees.
///
/// `360 * value / max`, negated when `reverse` is set so the arc grows
/// counter-clockwise. A non-positive `max` yields a zero sweep rather than
/// an infinite or NaN angle.
#[inline]
pub fn sweep_angle(value: f32, max: f32, reverse: bool) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    let angle = 360.0 * value / max;
    if reverse { -angle } else { angle }
}

/// The point at `angle_deg` degrees on the circle of `radius` centered at
/// `(center_x, center_y)`.
///
/// Standard parametric circle: `x = cx + r*cos(a)`, `y = cy + r*sin(a)`.
#[inline]
pub fn point_on_circle(center_x: f32, center_y: f32, radius: f32, angle_deg: f32) -> (f32, f32) {
    let radians = angle_deg.to_radians();
    (
        center_x + radius * radians.cos(),
        center_y + radius * radians.sin(),
    )
}

/// Start and sweep angles for one drawn arc segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    /// Angle the arc starts at, degrees.
    pub start_angle: f32,
    /// Angular extent, degrees. Negative when reversed.
    pub sweep_angle: f32,
}

/// Chains `values` into contiguous arc spans starting at `starting_angle`.
///
/// Segment `i` starts where segment `i - 1` ended. When `join_overlap` is
/// true each span is widened at its start boundary by
/// [`MULTI_ARC_JOIN_OVERLAP_DEG`] to hide the seam between caps; the widening
/// does not shift where the next segment starts.
pub fn chain_spans(
    values: &[f32],
    max: f32,
    starting_angle: f32,
    reverse: bool,
    join_overlap: bool,
) -> Vec<ArcSpan> {
    let offset = if join_overlap && !reverse {
        MULTI_ARC_JOIN_OVERLAP_DEG
    } else {
        0.0
    };
    let mut previous_angle = starting_angle;
    values
        .iter()
        .map(|&value| {
            let sweep = sweep_angle(value, max, reverse);
            let span = ArcSpan {
                start_angle: previous_angle - offset,
                sweep_angle: sweep + offset,
            };
            previous_angle += sweep;
            span
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_sweep_angle_is_linear_in_value() {
        let max = 100.0;
        for value in [0.0, 1.0, 25.0, 50.0, 99.0, 100.0] {
            let expected = 360.0 * value / max;
            assert!((sweep_angle(value, max, false) - expected).abs() < EPS);
            assert!((sweep_angle(value, max, true) + expected).abs() < EPS);
        }
    }

    #[test]
    fn test_sweep_angle_zero_max() {
        assert_eq!(sweep_angle(50.0, 0.0, false), 0.0);
        assert_eq!(sweep_angle(50.0, -1.0, true), 0.0);
    }

    #[test]
    fn test_point_on_circle_quadrants() {
        let (x, y) = point_on_circle(10.0, 10.0, 5.0, 0.0);
        assert!((x - 15.0).abs() < EPS);
        assert!((y - 10.0).abs() < EPS);

        // 90 degrees is straight down in screen coordinates.
        let (x, y) = point_on_circle(10.0, 10.0, 5.0, 90.0);
        assert!((x - 10.0).abs() < EPS);
        assert!((y - 15.0).abs() < EPS);

        let (x, y) = point_on_circle(0.0, 0.0, 2.0, 180.0);
        assert!((x + 2.0).abs() < EPS);
        assert!(y.abs() < EPS);
    }

    #[test]
    fn test_chain_spans_are_contiguous() {
        let spans = chain_spans(&[30.0, 40.0], 100.0, 270.0, false, false);
        assert_eq!(spans.len(), 2);
        assert!((spans[0].start_angle - 270.0).abs() < EPS);
        assert!((spans[0].sweep_angle - 108.0).abs() < EPS);
        assert!((spans[1].start_angle - 378.0).abs() < EPS);
        assert!((spans[1].sweep_angle - 144.0).abs() < EPS);
    }

    #[test]
    fn test_chain_spans_join_overlap() {
        let spans = chain_spans(&[30.0, 40.0], 100.0, 0.0, false, true);
        // Widened at the start boundary only; the chain itself is unshifted.
        assert!((spans[0].start_angle + 6.0).abs() < EPS);
        assert!((spans[0].sweep_angle - 114.0).abs() < EPS);
        assert!((spans[1].start_angle - 102.0).abs() < EPS);

        // Reversed arcs never get the overlap.
        let spans = chain_spans(&[30.0], 100.0, 0.0, true, true);
        assert!((spans[0].start_angle).abs() < EPS);
        assert!((spans[0].sweep_angle + 108.0).abs() < EPS);
    }

    #[test]
    fn test_rect_helpers() {
        let rect = Rect::square_inset(100.0, 10.0);
        assert_eq!(rect, Rect::new(10.0, 10.0, 90.0, 90.0));
        assert_eq!(rect.width(), 80.0);
        assert_eq!(rect.center_x(), 50.0);

        let shifted = rect.offset(0.0, 5.0);
        assert_eq!(shifted.top, 15.0);
        assert_eq!(shifted.bottom, 95.0);
        assert_eq!(shifted.center_y(), 55.0);
    }
}
