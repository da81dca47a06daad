//! Terminal host for the avatar face
//!
//! Interactive mode draws the shell into the terminal and maps keys and
//! mouse clicks to control actions. Headless mode runs the shell on a fixed
//! step clock and logs the counters, which is handy for soak runs in CI.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};
use visage_core::{AvatarState, ThemeName};
use visage_runtime::{init_tracing, Shell, ShellConfig, TelemetryConfig};
use visage_term::{
    compose, map_event, terminal_size, Canvas, Command, Composed, Presenter, Rasterizer,
    TerminalGuard,
};
use visage_time::{FixedStepClock, FrameClock, FrameSource};

#[derive(Parser)]
#[command(name = "face-demo")]
#[command(about = "Animated avatar face in the terminal")]
struct Cli {
    /// JSON shell configuration
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Target frame rate (overrides the config file)
    #[arg(long)]
    fps: Option<u32>,

    /// Blink RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Initial avatar state: idle, speaking or listening
    #[arg(long)]
    state: Option<AvatarState>,

    /// Initial theme: ruby or spectrum
    #[arg(long)]
    theme: Option<ThemeName>,

    /// Run without a terminal UI
    #[arg(long)]
    headless: bool,

    /// Seconds to run in headless mode
    #[arg(long, default_value = "10")]
    duration: f64,

    /// Log filter, e.g. `visage_face=debug`
    #[arg(long, env = "VISAGE_LOG")]
    log: Option<String>,

    /// Emit JSON logs
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn shell_config(&self) -> anyhow::Result<ShellConfig> {
        let mut config = match &self.config {
            Some(path) => ShellConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ShellConfig::default(),
        };
        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }
        if let Some(seed) = self.seed {
            config.face.seed = Some(seed);
        }
        if let Some(state) = self.state {
            config.initial_state = state;
        }
        if let Some(theme) = self.theme {
            config.initial_theme = theme;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&TelemetryConfig {
        filter: cli.log.clone(),
        json: cli.json_logs,
    });

    let config = cli.shell_config()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    if cli.headless {
        runtime.block_on(run_headless(&config, cli.duration))
    } else {
        runtime.block_on(run_interactive(&config))
    }
}

/// Frames a headless run of `seconds` covers
fn headless_frames(seconds: f64, fps: u32) -> anyhow::Result<u64> {
    anyhow::ensure!(
        seconds.is_finite() && seconds >= 0.0,
        "duration must be a finite, non-negative number of seconds, got {}",
        seconds
    );
    Ok((seconds * fps as f64).round() as u64)
}

/// Fixed-step run with no terminal. Ctrl-C stops it early.
async fn run_headless(config: &ShellConfig, seconds: f64) -> anyhow::Result<()> {
    let frames = headless_frames(seconds, config.target_fps)?;
    let mut shell = Shell::new(config)?;
    let mut clock = FixedStepClock::from_fps(config.target_fps);

    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    for _ in 0..frames {
        tokio::select! {
            biased;
            signal = &mut interrupt => {
                signal?;
                info!(frames = shell.stats().frames, "interrupted");
                break;
            }
            _ = tokio::task::yield_now() => {}
        }

        let view = shell.frame(clock.tick())?;
        debug!(
            frame = view.time.frame,
            mouth = view.face.mouth_scale,
            eyes_open = view.face.eyes_open,
            "frame"
        );
    }

    let blinks = shell.face().blinker().blinks();
    shell.shutdown();
    let stats = shell.stats();
    info!(
        frames = stats.frames,
        blinks,
        last_frame_us = stats.last_frame_duration.as_micros() as u64,
        "headless run finished"
    );
    Ok(())
}

/// Terminal UI loop
async fn run_interactive(config: &ShellConfig) -> anyhow::Result<()> {
    let mut shell = Shell::new(config)?;
    let (w, h) = terminal_size().context("reading terminal size")?;

    let mut guard = TerminalGuard::enter().context("entering raw mode")?;
    let mut presenter = Presenter::new(io::stdout());
    let mut canvas = Canvas::new(w, h, shell.palette().off_white);
    let mut raster = Rasterizer::default();
    let mut clock = FrameClock::new();
    let mut layout = Composed::default();

    let mut ticker = interval(config.frame_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let result: anyhow::Result<()> = async {
        'frames: loop {
            ticker.tick().await;

            while event::poll(Duration::ZERO)? {
                let ev = event::read()?;
                if let Event::Resize(cols, rows) = ev {
                    canvas.resize(cols, rows, shell.palette().off_white);
                    continue;
                }
                match map_event(ev, &layout, shell.pointer_mut()) {
                    Some(Command::Quit) => break 'frames,
                    Some(Command::ToggleTheme) => shell.toggle_theme()?,
                    Some(Command::Control(action)) => shell.dispatch(action)?,
                    None => {}
                }
            }

            let view = shell.frame(clock.tick())?;
            layout = compose(&view, &mut canvas, &mut raster)?;
            presenter.present(&canvas)?;
        }
        Ok(())
    }
    .await;

    shell.shutdown();
    guard.restore()?;
    result
}
