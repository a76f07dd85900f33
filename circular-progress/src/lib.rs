//! A headless circular/arc progress indicator.
//!
//! The widget converts a progress value (one arc, or several independently
//! colored arcs) into geometry, drives a time-based animation of the
//! displayed value, and emits an ordered list of [`DrawCommand`]s for a host
//! renderer to paint. The host owns the surface and the frame scheduler; the
//! widget owns everything else.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use circular_progress::{CircularProgressArgsBuilder, CircularProgressView};
//!
//! let mut view = CircularProgressView::new(
//!     CircularProgressArgsBuilder::default()
//!         .thumb_enabled(true)
//!         .build()
//!         .unwrap(),
//! );
//!
//! view.measure(200.0, 200.0, false);
//! let _ = view.set_progress(75.0, true, Some(Duration::from_millis(300)));
//!
//! // Per frame, while the animation runs:
//! let keep_going = view.tick(Instant::now());
//! let commands = view.render();
//! # let _ = (keep_going, commands);
//! ```

pub mod animation;
pub mod color;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod render;
pub mod style;
pub mod view;

pub use animation::{AnimationSession, Easing};
pub use color::Color;
pub use error::ConfigError;
pub use geometry::Rect;
pub use layout::{LayoutCache, ResolvedLayout};
pub use render::{DrawCommand, PaintStyle};
pub use style::{Brush, GradientSpec, StrokeCap, SweepGradient, ThumbConfig, ThumbScaleMode};
pub use view::{
    ArcSegment, CircularProgressArgs, CircularProgressArgsBuilder, CircularProgressView,
    Invalidate, ProgressCallback, ProgressMode,
};
