//! Touch trace replay tool
//!
//! Replays a recorded touch-event trace through the virtual pad subsystem
//! and prints the logical-input timeline, one line per frame. Used to
//! review regressions against traces captured on real devices.
//!
//! # Usage
//!
//! ```bash
//! # Print every frame's pressed inputs
//! padreplay trace.json
//!
//! # Print only frames whose flag set changed
//! padreplay trace.json --quiet
//!
//! # Replay under a specific settings table
//! padreplay trace.json --settings touch.toml
//! ```
//!
//! A trace is a JSON array of frames, each an object with an `events`
//! array:
//!
//! ```json
//! [
//!   {"events": [{"type": "down", "finger": 1, "x": 40.0, "y": 170.0}]},
//!   {"events": [{"type": "move", "finger": 1, "x": 45.0, "y": 170.0}]},
//!   {"events": [{"type": "up", "finger": 1}]}
//! ]
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use vpad::{
    GameMode, OverlayScreen, RawTouchSample, ScreenSize, StaticBackend, TouchInput, TouchPhase,
    TouchSettings,
};

/// Touch trace replay for the virtual pad subsystem
#[derive(Parser)]
#[command(name = "padreplay")]
#[command(about = "Replay a recorded touch trace and print the logical-input timeline")]
struct Args {
    /// Trace file (JSON array of frames)
    trace: PathBuf,

    /// Touch settings table to replay under (defaults when omitted)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print only frames whose flag set changed
    #[arg(long)]
    quiet: bool,

    /// Device resolution the trace was captured at
    #[arg(long, default_value_t = 320.0)]
    xres: f32,

    /// Device resolution the trace was captured at
    #[arg(long, default_value_t = 240.0)]
    yres: f32,
}

#[derive(Debug, serde::Deserialize)]
struct TraceFrame {
    #[serde(default)]
    events: Vec<TraceEvent>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TraceEvent {
    Down {
        finger: u64,
        #[serde(default)]
        device: u64,
        x: f32,
        y: f32,
    },
    Move {
        finger: u64,
        #[serde(default)]
        device: u64,
        x: f32,
        y: f32,
    },
    Up {
        finger: u64,
        #[serde(default)]
        device: u64,
    },
    /// Tap from the native recognizer, in normalized coordinates
    Tap { x: f32, y: f32 },
    GameMode { mode: GameMode },
    ScreenEnter { screen: OverlayScreen },
    ScreenLeave { screen: OverlayScreen },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => TouchSettings::load(path)
            .with_context(|| format!("loading settings {}", path.display()))?,
        None => TouchSettings::default(),
    };

    let trace = std::fs::read_to_string(&args.trace)
        .with_context(|| format!("reading trace {}", args.trace.display()))?;
    let frames: Vec<TraceFrame> =
        serde_json::from_str(&trace).context("parsing trace")?;

    println!("=== Touch trace replay ===");
    println!("{} frames from {}\n", frames.len(), args.trace.display());

    let backend = StaticBackend::with_resolution(args.xres, args.yres);
    let mut input = TouchInput::new(
        settings,
        Box::new(backend),
        ScreenSize::new(args.xres as i32, args.yres as i32),
    );
    input.init();
    input.game_mode_changed(GameMode::Normal);

    let mut last_line = String::new();
    for (index, frame) in frames.iter().enumerate() {
        input.pre_process();
        for event in &frame.events {
            apply(&mut input, event);
        }
        input.process();

        let pressed: Vec<String> = input
            .flags()
            .pressed()
            .map(|i| format!("{i:?}"))
            .collect();
        let mut line = pressed.join(" ");
        if input.was_tap() {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str("(tap)");
        }

        if !args.quiet || line != last_line {
            println!("frame {index:>5}: {line}");
        }
        last_line = line;
    }

    Ok(())
}

fn apply(input: &mut TouchInput, event: &TraceEvent) {
    match *event {
        TraceEvent::Down {
            finger,
            device,
            x,
            y,
        } => input.inject(RawTouchSample {
            finger,
            device,
            phase: TouchPhase::Started,
            x,
            y,
        }),
        TraceEvent::Move {
            finger,
            device,
            x,
            y,
        } => input.inject(RawTouchSample {
            finger,
            device,
            phase: TouchPhase::Moved,
            x,
            y,
        }),
        TraceEvent::Up { finger, device } => input.inject(RawTouchSample {
            finger,
            device,
            phase: TouchPhase::Ended,
            x: 0.0,
            y: 0.0,
        }),
        TraceEvent::Tap { x, y } => input.inject_tap(x, y),
        TraceEvent::GameMode { mode } => input.game_mode_changed(mode),
        TraceEvent::ScreenEnter { screen } => input.screen_changed(screen, true),
        TraceEvent::ScreenLeave { screen } => input.screen_changed(screen, false),
    }
}
