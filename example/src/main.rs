//! Headless demo: drives the widget through a simulated frame loop and logs
//! the draw commands a renderer would receive.

use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use circular_progress::{
    CircularProgressArgsBuilder, CircularProgressView, Color, DrawCommand,
};
use parking_lot::Mutex;
use tracing::info;

const FRAME: Duration = Duration::from_millis(16);

fn describe(command: &DrawCommand) -> String {
    match command {
        DrawCommand::Oval { rect, .. } => {
            format!("oval    {:.0}x{:.0}", rect.width(), rect.height())
        }
        DrawCommand::Arc {
            start_angle,
            sweep_angle,
            ..
        } => format!("arc     start {start_angle:.1} sweep {sweep_angle:.1}"),
        DrawCommand::Circle { center, radius, .. } => {
            format!(
                "circle  at ({:.1}, {:.1}) r {radius:.1}",
                center.0, center.1
            )
        }
    }
}

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let mut view = CircularProgressView::new(
        CircularProgressArgsBuilder::default()
            .thumb_enabled(true)
            .progress_color(Color::from([33, 150, 243]))
            .background_color(Some(Color::WHITE))
            .build()
            .expect("valid default args"),
    );
    view.measure(200.0, 200.0, false);

    let observed = Arc::new(Mutex::new(Vec::new()));
    let observed_in_cb = observed.clone();
    view.set_on_progress_changed(Some(Arc::new(move |value| {
        observed_in_cb.lock().push(value);
    })));
    view.set_on_animation_finished(Some(Arc::new(|value| {
        info!(value, "animation finished");
    })));

    // Single-arc mode, animated.
    let _ = view.set_progress(80.0, true, Some(Duration::from_millis(500)));
    while view.tick(Instant::now()) {
        thread::sleep(FRAME);
    }
    info!(
        frames = observed.lock().len(),
        progress = view.progress(),
        "single-arc animation done"
    );
    for command in view.render() {
        info!("{}", describe(&command));
    }

    // Multi-arc mode.
    let _ = view
        .set_progress_segments(
            &[30.0, 40.0, 20.0],
            &[Color::RED, Color::from_rgb(1.0, 0.6, 0.0), Color::BLUE],
        )
        .expect("segments fit max");
    info!(total = view.segments_total(), "multi-arc mode");
    for command in view.render() {
        info!("{}", describe(&command));
    }

    // A compositor fading the widget in scales every paint.
    let mut faded = view.render();
    for command in faded.iter_mut() {
        command.apply_opacity(0.5);
    }
    info!(commands = faded.len(), "multi-arc frame at half opacity");
}
