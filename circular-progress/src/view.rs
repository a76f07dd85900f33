//! The circular progress widget itself.
//!
//! [`CircularProgressView`] owns the style state, the layout cache, the
//! current progress value(s) and at most one animation session. It is
//! headless: the host calls [`measure`](CircularProgressView::measure) when
//! constraints change, [`tick`](CircularProgressView::tick) once per frame
//! while an animation runs, and [`render`](CircularProgressView::render) to
//! obtain the ordered draw commands for the current state.
//!
//! # Threading
//!
//! The widget is single-threaded by contract: every entry point must be
//! called from the host's render thread. The type performs no interior
//! synchronization; calling it from another thread without external
//! marshalling is a caller contract violation.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use derive_builder::Builder;
use smallvec::SmallVec;
use tracing::trace;

use crate::{
    animation::{AnimationSession, DEFAULT_ANIMATION_DURATION, Easing, decelerate},
    color::Color,
    error::ConfigError,
    geometry::{chain_spans, point_on_circle, sweep_angle},
    layout::{DEFAULT_MAX_DIMENSION, LayoutCache, ResolvedLayout, VIEW_PADDING, resolve},
    render::{DrawCommand, PaintStyle},
    style::{
        BACKGROUND_ALPHA_FACTOR, Brush, GradientSpec, SHADOW_ALPHA_FACTOR, StrokeCap,
        SweepGradient, ThumbConfig, ThumbScaleMode,
    },
};

/// Default maximum progress value (100%).
pub const DEFAULT_MAX: f32 = 100.0;

/// Default starting angle in degrees; 270 is 12 o'clock.
pub const DEFAULT_STARTING_ANGLE: f32 = 270.0;

/// Default stroke thickness in pixels.
pub const DEFAULT_STROKE_THICKNESS: f32 = 10.0;

/// Default absolute thumb size in pixels.
pub const DEFAULT_THUMB_SIZE: f32 = 10.0;

/// Default (and default maximum) thumb size rate.
pub const DEFAULT_MAX_THUMB_SIZE_RATE: f32 = 2.0;

/// What a state mutation requires from the host.
///
/// Setters return this instead of triggering redraw/relayout implicitly;
/// acting on it is the host's responsibility.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Invalidate {
    /// No visible change.
    Nothing,
    /// The widget needs to be redrawn.
    Paint,
    /// The widget needs to be re-measured, then redrawn.
    Layout,
}

/// Observer callback receiving a progress value.
pub type ProgressCallback = Arc<dyn Fn(f32) + Send + Sync>;

/// Which rendering mode the last `set_progress*` call selected.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// One arc for a single value, with optional background and thumb.
    #[default]
    SingleArc,
    /// Several independently colored contiguous arcs.
    MultiArc,
}

/// One multi-arc segment: a value share and its color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    /// Progress share of this segment.
    pub value: f32,
    /// Arc color; transparent when the caller supplied no color for it.
    pub color: Color,
}

/// Construction-time configuration, one field per widget style attribute.
#[derive(Builder, Clone, Debug)]
#[builder(pattern = "owned")]
pub struct CircularProgressArgs {
    /// Maximum progress value (100%).
    #[builder(default = "DEFAULT_MAX")]
    pub max: f32,

    /// Whether the shadow arc is drawn.
    #[builder(default = "true")]
    pub shadow_enabled: bool,

    /// Whether the thumb marker is drawn (single-arc mode only).
    #[builder(default = "false")]
    pub thumb_enabled: bool,

    /// Thumb size derivation mode.
    #[builder(default)]
    pub thumb_scale_mode: ThumbScaleMode,

    /// Absolute thumb radius for [`ThumbScaleMode::Point`].
    #[builder(default = "DEFAULT_THUMB_SIZE")]
    pub thumb_size: f32,

    /// Thumb rate for [`ThumbScaleMode::Rate`].
    #[builder(default = "DEFAULT_MAX_THUMB_SIZE_RATE")]
    pub thumb_size_rate: f32,

    /// Ceiling the thumb rate is clamped to on layout fallback.
    #[builder(default = "DEFAULT_MAX_THUMB_SIZE_RATE")]
    pub max_thumb_size_rate: f32,

    /// Angle the arc starts at, degrees.
    #[builder(default = "DEFAULT_STARTING_ANGLE")]
    pub starting_angle: f32,

    /// Initial progress value.
    #[builder(default = "0.0")]
    pub progress: f32,

    /// Stroke thickness in pixels.
    #[builder(default = "DEFAULT_STROKE_THICKNESS")]
    pub stroke_thickness: f32,

    /// Progress arc color.
    #[builder(default = "Color::BLACK")]
    pub progress_color: Color,

    /// Background oval color; the progress color when `None`.
    #[builder(default)]
    pub background_color: Option<Color>,

    /// Round vs. square stroke caps.
    #[builder(default = "false")]
    pub rounded: bool,

    /// Whether the background oval is drawn translucent.
    #[builder(default = "true")]
    pub background_alpha_enabled: bool,

    /// Grow the arc counter-clockwise instead.
    #[builder(default = "false")]
    pub reverse: bool,

    /// Optional sweep-gradient configuration for the progress arc.
    #[builder(default)]
    pub gradient: Option<GradientSpec>,
}

impl Default for CircularProgressArgs {
    fn default() -> Self {
        Self {
            max: DEFAULT_MAX,
            shadow_enabled: true,
            thumb_enabled: false,
            thumb_scale_mode: ThumbScaleMode::default(),
            thumb_size: DEFAULT_THUMB_SIZE,
            thumb_size_rate: DEFAULT_MAX_THUMB_SIZE_RATE,
            max_thumb_size_rate: DEFAULT_MAX_THUMB_SIZE_RATE,
            starting_angle: DEFAULT_STARTING_ANGLE,
            progress: 0.0,
            stroke_thickness: DEFAULT_STROKE_THICKNESS,
            progress_color: Color::BLACK,
            background_color: None,
            rounded: false,
            background_alpha_enabled: true,
            reverse: false,
            gradient: None,
        }
    }
}

/// A circular/arc progress indicator.
///
/// See the [module documentation](self) for the host protocol and the
/// threading contract.
pub struct CircularProgressView {
    max: f32,
    starting_angle: f32,
    reverse: bool,
    shadow_enabled: bool,
    background_alpha_enabled: bool,
    cap: StrokeCap,
    progress: f32,
    mode: ProgressMode,
    segments: Vec<ArcSegment>,
    segments_total: f32,
    thumb: ThumbConfig,
    stroke_thickness: f32,
    progress_color: Color,
    background_color: Color,
    gradient_spec: Option<GradientSpec>,
    gradient: Option<SweepGradient>,
    gradient_dirty: bool,
    layout_cache: LayoutCache,
    layout: ResolvedLayout,
    easing: Easing,
    session: Option<AnimationSession>,
    on_progress_changed: Option<ProgressCallback>,
    on_animation_finished: Option<ProgressCallback>,
}

impl CircularProgressView {
    /// Creates a widget from its style attributes and resolves an initial
    /// layout at the default dimension.
    ///
    /// The layout fallback snapshot starts at the built-in defaults, never
    /// at the caller's attributes: a stroke or thumb that cannot fit the
    /// default dimension falls back to a renderable configuration instead of
    /// to itself.
    pub fn new(args: CircularProgressArgs) -> Self {
        let mut thumb = ThumbConfig {
            enabled: args.thumb_enabled,
            mode: args.thumb_scale_mode,
            size: args.thumb_size,
            size_rate: args.thumb_size_rate,
            max_size_rate: args.max_thumb_size_rate,
        };
        let mut layout_cache = LayoutCache {
            arc_inset: DEFAULT_STROKE_THICKNESS + VIEW_PADDING,
            stroke_thickness: DEFAULT_STROKE_THICKNESS,
            thumb_size: DEFAULT_THUMB_SIZE,
            thumb_size_rate: DEFAULT_MAX_THUMB_SIZE_RATE,
        };
        let layout = resolve(
            &mut layout_cache,
            DEFAULT_MAX_DIMENSION,
            DEFAULT_MAX_DIMENSION,
            false,
            args.stroke_thickness,
            &thumb,
        );
        thumb.size = layout.thumb_size;
        thumb.size_rate = layout.thumb_size_rate;
        Self {
            max: args.max,
            starting_angle: args.starting_angle,
            reverse: args.reverse,
            shadow_enabled: args.shadow_enabled,
            background_alpha_enabled: args.background_alpha_enabled,
            cap: StrokeCap::from_rounded(args.rounded),
            progress: args.progress.clamp(0.0, args.max),
            mode: ProgressMode::SingleArc,
            segments: Vec::new(),
            segments_total: 0.0,
            thumb,
            stroke_thickness: layout.stroke_thickness,
            progress_color: args.progress_color,
            background_color: args.background_color.unwrap_or(args.progress_color),
            gradient_dirty: args.gradient.is_some(),
            gradient_spec: args.gradient,
            gradient: None,
            layout_cache,
            layout,
            easing: decelerate(),
            session: None,
            on_progress_changed: None,
            on_animation_finished: None,
        }
    }

    // --- Host protocol ---

    /// Resolves the widget's square dimension for the proposed constraints
    /// and returns it.
    ///
    /// A degenerate proposal (arc region too small for the stroke and thumb)
    /// silently falls back to the last valid configuration; the effective
    /// stroke and thumb values are written back so subsequent renders use
    /// them.
    pub fn measure(
        &mut self,
        proposed_width: f32,
        proposed_height: f32,
        height_unspecified: bool,
    ) -> f32 {
        let previous_dimension = self.layout.dimension;
        self.layout = resolve(
            &mut self.layout_cache,
            proposed_width,
            proposed_height,
            height_unspecified,
            self.stroke_thickness,
            &self.thumb,
        );
        self.stroke_thickness = self.layout.stroke_thickness;
        self.thumb.size = self.layout.thumb_size;
        self.thumb.size_rate = self.layout.thumb_size_rate;
        if self.layout.dimension != previous_dimension {
            // The gradient center depends on the drawable bounds.
            self.gradient_dirty = true;
        }
        self.layout.dimension
    }

    /// Advances the active animation session, if any, to `now`.
    ///
    /// Fires the progress-changed callback with the sampled value, and on
    /// natural completion fires the finished callback exactly once with the
    /// target value. Returns whether another frame is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        let (value, finished) = session.sample(now);
        let end_value = session.end_value();
        self.progress = value;
        if let Some(callback) = &self.on_progress_changed {
            callback(value);
        }
        if finished {
            self.session = None;
            trace!(value = end_value, "progress animation finished");
            if let Some(callback) = &self.on_animation_finished {
                callback(end_value);
            }
        }
        !finished
    }

    /// Emits the ordered draw commands for the current state.
    ///
    /// Order: background oval (single-arc mode only), shadow arc, shadow
    /// thumb (single-arc mode with thumb enabled), then per segment the
    /// progress arc followed by the thumb (single-arc mode only). The sweep
    /// gradient is realized lazily here, only when its configuration or the
    /// drawable size changed since the last pass.
    pub fn render(&mut self) -> SmallVec<[DrawCommand; 8]> {
        let rect = self.layout.progress_rect;
        let shadow_rect = self.layout.shadow_rect;
        let single = self.mode == ProgressMode::SingleArc;

        if let Some(spec) = &self.gradient_spec
            && (self.gradient_dirty || self.gradient.is_none())
        {
            self.gradient = Some(spec.realize((rect.center_x(), rect.center_y())));
            self.gradient_dirty = false;
        }

        // Radius of the circle the thumb center travels on, and the thumb
        // radius itself, both derived from how far the arc band sits inside
        // the widget bounds.
        let mut radius = self.layout.dimension / 2.0 - VIEW_PADDING;
        let icon_thickness = self.stroke_thickness / 2.0;
        let thumb_radius = self.thumb.radius(self.stroke_thickness);
        match self.thumb.mode {
            ThumbScaleMode::Auto => radius -= icon_thickness + self.stroke_thickness / 2.0,
            ThumbScaleMode::Point | ThumbScaleMode::Rate => {
                radius -= if self.thumb.is_thicker_than_stroke(self.stroke_thickness) {
                    thumb_radius
                } else {
                    self.stroke_thickness / 2.0
                };
            }
        }
        let thumb_style = match self.thumb.mode {
            ThumbScaleMode::Auto => PaintStyle::Stroke {
                width: self.stroke_thickness,
            },
            ThumbScaleMode::Point | ThumbScaleMode::Rate => PaintStyle::Fill,
        };

        let mut commands = SmallVec::new();

        if single {
            let color = if self.background_alpha_enabled {
                self.background_color.mul_alpha(BACKGROUND_ALPHA_FACTOR)
            } else {
                self.background_color
            };
            commands.push(DrawCommand::Oval {
                rect,
                color,
                stroke_width: self.stroke_thickness,
            });
        }

        let total = if single {
            self.progress
        } else {
            self.segments_total
        };
        let total_sweep = sweep_angle(total, self.max, self.reverse);

        if self.shadow_enabled {
            let shadow_color = Color::BLACK.mul_alpha(SHADOW_ALPHA_FACTOR);
            commands.push(DrawCommand::Arc {
                rect: shadow_rect,
                start_angle: self.starting_angle,
                sweep_angle: total_sweep,
                brush: Brush::Solid(shadow_color),
                stroke_width: self.stroke_thickness,
                cap: self.cap,
            });
            if single && self.thumb.enabled {
                let center = point_on_circle(
                    shadow_rect.center_x(),
                    shadow_rect.center_y(),
                    radius,
                    self.starting_angle + total_sweep,
                );
                commands.push(DrawCommand::Circle {
                    center,
                    radius: thumb_radius,
                    color: shadow_color,
                    style: thumb_style,
                });
            }
        }

        let values: SmallVec<[f32; 4]> = if single {
            SmallVec::from_slice(&[self.progress])
        } else {
            self.segments.iter().map(|segment| segment.value).collect()
        };
        let spans = chain_spans(&values, self.max, self.starting_angle, self.reverse, !single);

        for (i, span) in spans.iter().enumerate() {
            let brush = if single {
                match &self.gradient {
                    Some(gradient) => Brush::Sweep(gradient.clone()),
                    None => Brush::Solid(self.progress_color),
                }
            } else {
                Brush::Solid(self.segments[i].color)
            };
            commands.push(DrawCommand::Arc {
                rect,
                start_angle: span.start_angle,
                sweep_angle: span.sweep_angle,
                brush,
                stroke_width: self.stroke_thickness,
                cap: self.cap,
            });
            if single && self.thumb.enabled {
                let center = point_on_circle(
                    rect.center_x(),
                    rect.center_y(),
                    radius,
                    span.start_angle + span.sweep_angle,
                );
                commands.push(DrawCommand::Circle {
                    center,
                    radius: thumb_radius,
                    color: self.progress_color,
                    style: thumb_style,
                });
            }
        }

        commands
    }

    // --- Progress operations ---

    /// Sets the single-arc progress value, clamped to `[0, max]`.
    ///
    /// Enters single-arc mode. With `animate` a new session starts from the
    /// currently displayed value, cancelling any in-flight session; the
    /// superseded session never reports completion. Without `animate` the
    /// value applies immediately and the progress-changed callback does
    /// *not* fire (only animation ticks notify).
    pub fn set_progress(
        &mut self,
        value: f32,
        animate: bool,
        duration: Option<Duration>,
    ) -> Invalidate {
        self.mode = ProgressMode::SingleArc;
        let target = value.clamp(0.0, self.max);
        if animate {
            let duration = duration.unwrap_or(DEFAULT_ANIMATION_DURATION);
            trace!(start = self.progress, target, ?duration, "starting progress animation");
            self.session = Some(AnimationSession::new(
                self.progress,
                target,
                Instant::now(),
                duration,
                self.easing.clone(),
            ));
        } else {
            self.session = None;
            self.progress = target;
        }
        Invalidate::Paint
    }

    /// Animates (or jumps) back to zero.
    pub fn reset_progress(&mut self, animate: bool, duration: Option<Duration>) -> Invalidate {
        self.set_progress(0.0, animate, duration)
    }

    /// Switches to multi-arc mode with one contiguous arc per value.
    ///
    /// Fails synchronously when the values add up to more than `max`,
    /// leaving the prior state fully intact. Colors beyond `values.len()`
    /// are ignored; missing colors render transparent. Multi-arc mode forces
    /// square caps and cancels any running animation.
    pub fn set_progress_segments(
        &mut self,
        values: &[f32],
        colors: &[Color],
    ) -> Result<Invalidate, ConfigError> {
        let mut total = 0.0;
        for &value in values {
            total += value;
            if total > self.max {
                return Err(ConfigError::SegmentsExceedMax {
                    total,
                    max: self.max,
                });
            }
        }
        self.mode = ProgressMode::MultiArc;
        self.cap = StrokeCap::Square;
        self.session = None;
        self.progress = 0.0;
        self.segments_total = total;
        self.segments = values
            .iter()
            .enumerate()
            .map(|(i, &value)| ArcSegment {
                value,
                color: colors.get(i).copied().unwrap_or(Color::TRANSPARENT),
            })
            .collect();
        Ok(Invalidate::Paint)
    }

    /// Cancels the in-flight animation session, if any.
    ///
    /// Synchronous: after this returns the cancelled session can produce no
    /// further ticks or notifications. Returns whether a session was
    /// cancelled.
    pub fn cancel_animation(&mut self) -> bool {
        self.session.take().is_some()
    }

    // --- Style operations ---

    /// Configures a sweep gradient for the progress arc.
    ///
    /// Needs at least two colors. The gradient is realized lazily at the
    /// next render, once the true drawable center is known.
    pub fn set_progress_colors(
        &mut self,
        colors: &[Color],
        positions: Option<&[f32]>,
        duplicate_first: bool,
    ) -> Result<Invalidate, ConfigError> {
        self.gradient_spec = Some(GradientSpec::new(colors, positions, duplicate_first)?);
        self.gradient_dirty = true;
        Ok(Invalidate::Paint)
    }

    /// Requests a new square dimension, re-resolving the layout immediately.
    pub fn set_size(&mut self, size: f32) -> Invalidate {
        self.gradient_dirty = true;
        self.measure(size, size, false);
        Invalidate::Layout
    }

    /// Changes the stroke thickness of the arcs, shadow and background.
    pub fn set_progress_stroke_thickness(&mut self, thickness: f32) -> Invalidate {
        self.stroke_thickness = thickness;
        Invalidate::Layout
    }

    /// Sets the maximum progress value.
    pub fn set_max(&mut self, max: f32) -> Invalidate {
        self.max = max;
        Invalidate::Paint
    }

    /// Changes the starting angle; 270 degrees is 12 o'clock.
    pub fn set_starting_angle(&mut self, degrees: f32) -> Invalidate {
        self.starting_angle = degrees;
        Invalidate::Paint
    }

    /// Grows the arc counter-clockwise when enabled.
    pub fn set_reverse_enabled(&mut self, enabled: bool) -> Invalidate {
        self.reverse = enabled;
        Invalidate::Paint
    }

    /// Toggles the shadow arc.
    pub fn set_shadow_enabled(&mut self, enabled: bool) -> Invalidate {
        self.shadow_enabled = enabled;
        Invalidate::Paint
    }

    /// Toggles the thumb marker. Affects measurement.
    pub fn set_thumb_enabled(&mut self, enabled: bool) -> Invalidate {
        self.thumb.enabled = enabled;
        Invalidate::Layout
    }

    /// Changes how the thumb size is derived.
    pub fn set_thumb_scale_mode(&mut self, mode: ThumbScaleMode) -> Invalidate {
        self.thumb.mode = mode;
        Invalidate::Layout
    }

    /// Absolute thumb radius for [`ThumbScaleMode::Point`].
    pub fn set_thumb_size(&mut self, size: f32) -> Invalidate {
        self.thumb.size = size;
        Invalidate::Layout
    }

    /// Thumb rate for [`ThumbScaleMode::Rate`].
    pub fn set_thumb_size_rate(&mut self, rate: f32) -> Invalidate {
        self.thumb.size_rate = rate;
        Invalidate::Layout
    }

    /// Ceiling the thumb rate is clamped to on layout fallback.
    pub fn set_max_thumb_size_rate(&mut self, rate: f32) -> Invalidate {
        self.thumb.max_size_rate = rate;
        Invalidate::Layout
    }

    /// Round vs. square stroke caps.
    pub fn set_rounded(&mut self, rounded: bool) -> Invalidate {
        self.cap = StrokeCap::from_rounded(rounded);
        Invalidate::Paint
    }

    /// Toggles the translucent background oval.
    pub fn set_background_alpha_enabled(&mut self, enabled: bool) -> Invalidate {
        self.background_alpha_enabled = enabled;
        Invalidate::Paint
    }

    /// Sets the progress arc color, discarding any configured gradient.
    pub fn set_progress_color(&mut self, color: Color) -> Invalidate {
        self.progress_color = color;
        self.gradient_spec = None;
        self.gradient = None;
        Invalidate::Paint
    }

    /// Sets the background oval color.
    pub fn set_background_color(&mut self, color: Color) -> Invalidate {
        self.background_color = color;
        Invalidate::Paint
    }

    /// Sets progress and background to the same color.
    pub fn set_color(&mut self, color: Color) -> Invalidate {
        let _ = self.set_progress_color(color);
        self.set_background_color(color)
    }

    /// Replaces the animation easing curve; `None` restores the default
    /// decelerating curve. Applies to sessions started afterwards.
    pub fn set_animation_easing(&mut self, easing: Option<Easing>) -> Invalidate {
        self.easing = easing.unwrap_or_else(decelerate);
        Invalidate::Nothing
    }

    // --- Observers ---

    /// Registers the per-tick progress observer.
    pub fn set_on_progress_changed(&mut self, callback: Option<ProgressCallback>) {
        self.on_progress_changed = callback;
    }

    /// Registers the animation-finished observer. Fires only on natural
    /// completion of the most recent session, never for superseded ones.
    pub fn set_on_animation_finished(&mut self, callback: Option<ProgressCallback>) {
        self.on_animation_finished = callback;
    }

    // --- Accessors ---

    /// Current displayed progress value.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Maximum progress value.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Sum of the multi-arc segment values.
    pub fn segments_total(&self) -> f32 {
        self.segments_total
    }

    /// Current rendering mode.
    pub fn mode(&self) -> ProgressMode {
        self.mode
    }

    /// Whether an animation session is in flight.
    pub fn is_animating(&self) -> bool {
        self.session.is_some()
    }

    /// The most recently resolved layout.
    pub fn layout(&self) -> &ResolvedLayout {
        &self.layout
    }

    /// Current stroke thickness.
    pub fn stroke_thickness(&self) -> f32 {
        self.stroke_thickness
    }

    /// Current starting angle in degrees.
    pub fn starting_angle(&self) -> f32 {
        self.starting_angle
    }
}

impl Default for CircularProgressView {
    fn default() -> Self {
        Self::new(CircularProgressArgs::default())
    }
}
