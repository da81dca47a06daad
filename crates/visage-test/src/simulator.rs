//! Frame Simulator - deterministic playback of the shell
//!
//! Drives a `Shell` from a `FixedStepClock`, applies scripted control
//! actions at exact frame numbers, and records one sample per frame. Each
//! sample is checked against the animation invariants as it is taken.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use visage_core::{AvatarState, FrameTime, ThemeName, VisageResult};
use visage_face::{pulse_style, FaceConfig, FaceSnapshot, Shimmer};
use visage_runtime::{ControlAction, Shell, ShellConfig, ShellStats, VISUALIZER_BARS};
use visage_time::{FixedStepClock, FrameSource};

const EPS: f32 = 1e-5;

/// Control action applied before a given frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptStep {
    pub frame: u64,
    pub action: ControlAction,
}

/// Timed control actions, ordered by frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    steps: Vec<ScriptStep>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action before `frame`
    pub fn at(mut self, frame: u64, action: ControlAction) -> Self {
        let pos = self.steps.partition_point(|s| s.frame <= frame);
        self.steps.insert(pos, ScriptStep { frame, action });
        self
    }

    pub fn state_at(self, frame: u64, state: AvatarState) -> Self {
        self.at(frame, ControlAction::SelectState(state))
    }

    pub fn theme_at(self, frame: u64, theme: ThemeName) -> Self {
        self.at(frame, ControlAction::SelectTheme(theme))
    }

    /// `switches` random state or theme selections spread over `frames`
    pub fn random(seed: u64, frames: u64, switches: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut script = Script::new();
        for _ in 0..switches {
            let frame = rng.gen_range(0..frames.max(1));
            let action = if rng.gen_bool(0.7) {
                let state = AvatarState::ALL[rng.gen_range(0..AvatarState::ALL.len())];
                ControlAction::SelectState(state)
            } else {
                let theme = ThemeName::ALL[rng.gen_range(0..ThemeName::ALL.len())];
                ControlAction::SelectTheme(theme)
            };
            script = script.at(frame, action);
        }
        script
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// One recorded frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSample {
    pub time: FrameTime,
    pub state: AvatarState,
    pub theme: ThemeName,
    pub face: FaceSnapshot,
    pub status_opacity: f32,
    pub bars: [f32; VISUALIZER_BARS],
}

/// Invariant violation found in a sample
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub frame: u64,
    pub message: String,
}

/// Outcome of a simulation run
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub samples: Vec<FrameSample>,
    pub violations: Vec<Violation>,
    pub blinks: u64,
    pub stats: ShellStats,
}

impl SimulationReport {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn frames(&self) -> usize {
        self.samples.len()
    }

    pub fn last(&self) -> Option<&FrameSample> {
        self.samples.last()
    }

    /// Samples taken while in `state`
    pub fn in_state(&self, state: AvatarState) -> impl Iterator<Item = &FrameSample> {
        self.samples.iter().filter(move |s| s.state == state)
    }
}

/// Deterministic shell driver
pub struct FrameSimulator {
    shell: Shell,
    clock: FixedStepClock,
    samples: Vec<FrameSample>,
    violations: Vec<Violation>,
}

impl FrameSimulator {
    /// Build from a shell config. An unseeded config is pinned to seed 0.
    pub fn new(mut config: ShellConfig) -> VisageResult<Self> {
        if config.face.seed.is_none() {
            config.face.seed = Some(0);
        }
        let clock = FixedStepClock::from_fps(config.target_fps);
        Ok(FrameSimulator {
            shell: Shell::new(&config)?,
            clock,
            samples: Vec::new(),
            violations: Vec::new(),
        })
    }

    /// Idle/ruby at 60 fps with the given blink seed
    pub fn seeded(seed: u64) -> VisageResult<Self> {
        Self::new(ShellConfig {
            face: FaceConfig::seeded(seed),
            ..ShellConfig::default()
        })
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut Shell {
        &mut self.shell
    }

    pub fn samples(&self) -> &[FrameSample] {
        &self.samples
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Run one frame and record it
    pub fn step(&mut self) -> VisageResult<&FrameSample> {
        let time = self.clock.tick();
        let state = self.shell.avatar_state();
        let theme = self.shell.theme();
        let expected_pulse = pulse_style(state, self.shell.palette());

        let view = self.shell.frame(time)?;
        let mut bars = [0.0; VISUALIZER_BARS];
        for (slot, h) in bars.iter_mut().zip(view.visualizer.heights()) {
            *slot = h;
        }
        let sample = FrameSample {
            time,
            state,
            theme,
            face: view.face.clone(),
            status_opacity: view.status.opacity,
            bars,
        };

        let face = &sample.face;
        if (face.pulse_color, face.pulse_opacity) != expected_pulse {
            self.violate(time.frame, format!("pulse style {:?} in {}", expected_pulse, state));
        }
        for message in check_sample(&sample) {
            self.violate(time.frame, message);
        }

        self.samples.push(sample);
        Ok(&self.samples[self.samples.len() - 1])
    }

    fn violate(&mut self, frame: u64, message: String) {
        debug!(frame, %message, "invariant violated");
        self.violations.push(Violation { frame, message });
    }

    /// Run `frames` frames, applying `script` steps as their frames come up
    pub fn run(&mut self, frames: u64, script: &Script) -> VisageResult<()> {
        let mut steps = script.steps().iter().peekable();
        let start = self.samples.len() as u64;
        for i in 0..frames {
            let frame = start + i;
            while let Some(step) = steps.next_if(|s| s.frame <= frame) {
                self.shell.dispatch(step.action)?;
            }
            self.step()?;
        }
        Ok(())
    }

    /// Run for `seconds` of simulated time
    pub fn run_for(&mut self, seconds: f64, script: &Script) -> VisageResult<()> {
        let fps = 1.0 / self.clock.step();
        self.run((seconds * fps).round() as u64, script)
    }

    /// Stop the shell and hand back everything recorded
    pub fn finish(mut self) -> SimulationReport {
        self.shell.shutdown();
        SimulationReport {
            blinks: self.shell.face().blinker().blinks(),
            stats: self.shell.stats().clone(),
            samples: std::mem::take(&mut self.samples),
            violations: std::mem::take(&mut self.violations),
        }
    }
}

/// Range checks on one sample
pub fn check_sample(sample: &FrameSample) -> Vec<String> {
    let mut out = Vec::new();
    let face = &sample.face;

    if face.eye_scale < 0.0 || face.eye_scale > 1.0 + EPS {
        out.push(format!("eye scale {} outside [0, 1]", face.eye_scale));
    }

    let pulse_range = match sample.state {
        AvatarState::Idle => (0.97, 1.03),
        AvatarState::Speaking => (0.9, 1.1),
        AvatarState::Listening => (0.85, 1.15),
    };
    if face.pulse_scale < pulse_range.0 - EPS || face.pulse_scale > pulse_range.1 + EPS {
        out.push(format!("pulse scale {} outside {:?}", face.pulse_scale, pulse_range));
    }

    match sample.state {
        AvatarState::Speaking if !(0.3 - EPS..=1.3 + EPS).contains(&face.mouth_scale) => {
            out.push(format!("speaking mouth {} outside [0.3, 1.3]", face.mouth_scale));
        }
        AvatarState::Listening if !(0.5 - EPS..=0.7 + EPS).contains(&face.mouth_scale) => {
            out.push(format!("listening mouth {} outside [0.5, 0.7]", face.mouth_scale));
        }
        _ => {}
    }

    let shimmer = Shimmer::for_state(sample.state);
    let lo = (shimmer.baseline - shimmer.amplitude) as f32 - EPS;
    let hi = (shimmer.baseline + shimmer.amplitude) as f32 + EPS;
    for (i, o) in face.accent_opacity.iter().enumerate() {
        if *o < lo || *o > hi {
            out.push(format!("accent {} opacity {} outside [{}, {}]", i, o, lo, hi));
        }
    }

    if sample.bars.iter().any(|h| !(0.0..=1.0).contains(h)) {
        out.push("visualizer bar outside [0, 1]".to_string());
    }
    out
}
