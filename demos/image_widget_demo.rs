// Headless walk through the image widget: load a synthetic head, pick a plane,
// scroll it and cycle the contour.

use anyhow::{Context, Result};
use clap::Parser;
use kiwi_core::{Axis, Point3f};
use kiwi_visualization::{
    GestureEvent, GestureHandler, ImageWidget, ImageWidgetConfig, Renderer, Representation,
    ShaderProgram,
};
use kiwi_volume::parallel::{init_thread_pool, ThreadPoolConfig};
use kiwi_volume::ImageVolume;
use std::rc::Rc;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "image_widget_demo")]
#[command(about = "Replay a gesture script against the three-plane image widget")]
struct Args {
    /// Samples per volume axis
    #[arg(short, long, default_value = "64")]
    size: usize,

    /// Viewport width in pixels
    #[arg(long, default_value = "640")]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value = "480")]
    height: u32,

    /// Iso value of the contour
    #[arg(long, default_value = "1400")]
    iso: f32,

    /// Worker threads for contouring (0 = automatic)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log: String,
}

/// Skull-like shell around a soft interior, values in [0, 3000]
fn synthetic_head(n: usize) -> Result<ImageVolume> {
    let c = (n as f32 - 1.0) * 0.5;
    let center = Point3f::new(c, c, c);
    let volume = ImageVolume::from_fn([n, n, n], [1.0; 3], Point3f::origin(), |x, y, z| {
        let r = (Point3f::new(x as f32, y as f32, z as f32) - center).norm() / c.max(1.0);
        match r {
            r if r < 0.7 => 900.0 + 200.0 * r,
            r if r < 0.85 => 3000.0,
            _ => 0.0,
        }
    })?;
    Ok(volume)
}

fn log_stats(widget: &ImageWidget, renderer: &Renderer) {
    tracing::info!(
        facets = widget.number_of_facets(),
        vertices = widget.number_of_vertices(),
        lines = widget.number_of_lines(),
        drawn_facets = renderer.number_of_facets(),
        "scene stats"
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut pool = ThreadPoolConfig::default();
    if args.threads > 0 {
        pool = pool.with_threads(args.threads);
    }
    init_thread_pool(pool).context("Failed to configure thread pool")?;

    let volume = Arc::new(synthetic_head(args.size).context("Failed to build synthetic volume")?);
    let bounds = volume.bounds();

    let mut renderer = Renderer::new(args.width, args.height);
    renderer.set_background_color(0.1, 0.1, 0.15);

    let config = ImageWidgetConfig::default().with_contour_iso_value(args.iso);
    let mut widget = ImageWidget::initialize_with_shader(
        Rc::new(ShaderProgram::surface()),
        Rc::new(ShaderProgram::textured_plane()),
        config,
    );
    widget.add_self_to_renderer(&mut renderer);
    widget
        .set_image_data(volume, Some(&mut renderer))
        .context("Failed to load volume into widget")?;
    renderer.reset_camera_to_scene()?;
    log_stats(&widget, &renderer);

    let cx = (args.width / 2) as i32;
    let cy = (args.height / 2) as i32;
    let script = [
        GestureEvent::SingleTouchDown { x: cx + 40, y: cy - 40 },
        GestureEvent::SingleTouchPan { dx: 0.0, dy: -12.0 },
        GestureEvent::SingleTouchPan { dx: 0.0, dy: -0.5 },
        GestureEvent::SingleTouchUp,
        GestureEvent::SingleTouchDown { x: 2, y: 2 },
        GestureEvent::SingleTouchPan { dx: 30.0, dy: 0.0 },
        GestureEvent::SingleTouchUp,
        GestureEvent::DoubleTap,
        GestureEvent::DoubleTap,
    ];

    for event in script {
        let handled = widget.dispatch(&mut renderer, event);
        if !handled {
            if let GestureEvent::SingleTouchPan { dx, .. } = event {
                renderer.camera_mut().azimuth(-dx as f32 * 0.5);
                renderer.reset_camera_clipping_range(&bounds);
            }
        }
        tracing::info!(
            ?event,
            handled,
            selected = ?widget.selected_axis(),
            x = widget.slice_index(Axis::X),
            y = widget.slice_index(Axis::Y),
            z = widget.slice_index(Axis::Z),
            contour = ?widget.contour_visibility(),
            "gesture"
        );
    }

    log_stats(&widget, &renderer);
    for (bin, actor) in renderer.render_order().iter().enumerate() {
        let actor = actor.borrow();
        tracing::debug!(
            order = bin,
            bin = actor.bin_number,
            shader = %actor.mapper.shader.name,
            translucent = actor.mapper.is_translucent(),
            "draw"
        );
    }

    widget.remove_self_from_renderer(&mut renderer);
    Ok(())
}
