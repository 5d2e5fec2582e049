//! Horologe desktop simulator
//!
//! Runs a face on the host's wall clock through a scripted session and
//! prints every frame it draws to the terminal as text.

mod config;
mod host;
mod script;

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Timer};
use horologe_core::traits::{Drawable, LifecycleHandler, ModeObserver};
use horologe_core::{PlatformContext, WatchFace};
use horologe_display::{DrawSurface, TextCanvas};
use jiff::tz::Offset;
use jiff::Timestamp;
use log::{error, info};

use crate::host::{
    SignalRedraw, SimBattery, SimPlatform, SimTimer, SimTimezone, SystemClock, REDRAW,
};
use crate::script::{Action, Step};

/// Canvas cell size; 24x12 cells make a 240x240 surface
const CELL_WIDTH: u16 = 10;
const CELL_HEIGHT: u16 = 20;

/// Where scripted taps land
const TAP_X: i32 = 120;
const TAP_Y: i32 = 120;

/// Host battery status code reported throughout (discharging)
const BATTERY_STATUS: i32 = 3;

#[derive(Parser, Debug)]
#[command(version, about = "Run a Horologe face through a scripted session")]
struct Cli {
    /// Face configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulate a round screen
    #[arg(long)]
    round: bool,

    /// Report reduced color depth in ambient mode
    #[arg(long)]
    low_bit_ambient: bool,

    /// Report burn-in protection
    #[arg(long)]
    burn_in_protection: bool,

    /// Session length in seconds; the face is destroyed at the end
    #[arg(long, default_value_t = 11)]
    seconds: u64,

    /// Initial UTC offset of the system timezone (minutes)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    utc_offset_minutes: i32,

    /// Battery level in percent; negative for no reading
    #[arg(long, default_value_t = 87, allow_negative_numbers = true)]
    battery: i32,
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    info!("Horologe simulator starting...");
    let code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            error!("Simulator error: {:#}", e);
            1
        }
    };
    // The std executor never returns on its own
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref())?;
    let offset = Offset::from_seconds(cli.utc_offset_minutes.saturating_mul(60))
        .context("UTC offset out of range")?;

    let timer = SimTimer::new();
    let timezone = SimTimezone::new(offset);
    let redraw = SignalRedraw::default();
    let ctx = PlatformContext::<SimPlatform> {
        timer: timer.clone(),
        clock: SystemClock,
        timezone: timezone.clone(),
        battery: SimBattery::new(cli.battery, BATTERY_STATUS),
        redraw: redraw.clone(),
    };

    let mut face = WatchFace::new(ctx, config);
    face.on_create();
    face.on_apply_window_insets(cli.round);
    face.on_properties_changed(cli.low_bit_ambient, cli.burn_in_protection);

    let mut canvas = TextCanvas::new(CELL_WIDTH, CELL_HEIGHT);
    let mut frames = 0u32;
    let start = Instant::now();
    let mut steps = script::session(cli.seconds).into_iter().peekable();

    while let Some(deadline) = next_deadline(start, steps.peek(), &timer) {
        match select(Timer::at(deadline), REDRAW.wait()).await {
            Either::First(()) => {
                let now = Instant::now();
                while let Some(handle) = timer.take_due(now) {
                    face.on_timer_fired(handle);
                }
                while let Some(step) =
                    steps.next_if(|s| start + Duration::from_millis(s.at_ms) <= now)
                {
                    apply(&mut face, &timezone, step.action);
                }
            }
            Either::Second(()) => {
                frames += 1;
                draw_frame(&mut face, &mut canvas, frames);
            }
        }
    }

    info!(
        "Session over: {} frames for {} redraw requests",
        frames,
        redraw.requests()
    );
    ensure!(
        timer.pending_count() == 0,
        "refresh tick still pending after destroy"
    );
    ensure!(
        timezone.listeners() == 0,
        "timezone subscription held after destroy"
    );
    Ok(())
}

/// Earliest of the next script step and the next refresh tick
fn next_deadline(start: Instant, step: Option<&Step>, timer: &SimTimer) -> Option<Instant> {
    let step_at = step.map(|s| start + Duration::from_millis(s.at_ms));
    match (step_at, timer.next_deadline()) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn apply(face: &mut WatchFace<SimPlatform>, timezone: &SimTimezone, action: Action) {
    info!("> {:?}", action);
    match action {
        Action::Visible(visible) => face.on_visibility_changed(visible),
        Action::Ambient(ambient) => face.on_ambient_mode_changed(ambient),
        Action::TimeTick => face.on_time_tick(),
        Action::ShiftTimezone(minutes) => {
            if timezone.shift(minutes) {
                face.on_timezone_changed();
            } else {
                info!("Timezone changed with nobody listening");
            }
        }
        Action::Tap(tap) => face.on_tap_code(
            tap.to_code(),
            TAP_X,
            TAP_Y,
            Timestamp::now().as_millisecond(),
        ),
        Action::Destroy => face.on_destroy(),
    }
}

fn draw_frame(face: &mut WatchFace<SimPlatform>, canvas: &mut TextCanvas, frame: u32) {
    let bounds = canvas.clip_bounds();
    face.on_draw(canvas, bounds);

    let border = "-".repeat(canvas.cols());
    println!("+{}+ frame {} {:?}", border, frame, face.mode());
    for line in canvas.lines() {
        println!("|{}|", line);
    }
    println!("+{}+", border);
    canvas.mark_clean();
}
