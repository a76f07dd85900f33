//! Draw commands emitted by the render pass.
//!
//! The library is headless: instead of touching a canvas it emits an ordered
//! list of primitives for the host renderer to rasterize. Order is
//! significant, commands are painted back to front.

use crate::{color::Color, geometry::Rect, style::{Brush, StrokeCap}};

/// Fill vs. stroke for circle commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintStyle {
    /// Fill the whole circle.
    Fill,
    /// Stroke the outline.
    Stroke {
        /// Width of the stroked outline.
        width: f32,
    },
}

/// One primitive the host renderer has to paint.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A stroked ellipse inscribed in `rect` (the background track).
    Oval {
        /// Bounding rectangle of the ellipse.
        rect: Rect,
        /// Stroke color.
        color: Color,
        /// Stroke width.
        stroke_width: f32,
    },
    /// A stroked arc inscribed in `rect`.
    Arc {
        /// Bounding rectangle of the full ellipse the arc belongs to.
        rect: Rect,
        /// Start angle in degrees, clockwise from the positive x axis.
        start_angle: f32,
        /// Angular extent in degrees; negative sweeps counter-clockwise.
        sweep_angle: f32,
        /// What the arc is painted with.
        brush: Brush,
        /// Stroke width.
        stroke_width: f32,
        /// Endpoint cap style.
        cap: StrokeCap,
    },
    /// A circle (the thumb marker or its shadow).
    Circle {
        /// Center of the circle.
        center: (f32, f32),
        /// Radius of the circle.
        radius: f32,
        /// Paint color.
        color: Color,
        /// Fill or stroke.
        style: PaintStyle,
    },
}

impl DrawCommand {
    /// Scales the opacity of the command's paint by `opacity`.
    pub fn apply_opacity(&mut self, opacity: f32) {
        let factor = opacity.clamp(0.0, 1.0);
        match self {
            DrawCommand::Oval { color, .. } | DrawCommand::Circle { color, .. } => {
                *color = color.mul_alpha(factor);
            }
            DrawCommand::Arc { brush, .. } => match brush {
                Brush::Solid(color) => *color = color.mul_alpha(factor),
                Brush::Sweep(gradient) => {
                    for color in &mut gradient.colors {
                        *color = color.mul_alpha(factor);
                    }
                }
            },
        }
    }
}
