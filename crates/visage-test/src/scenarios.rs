//! Scripted scenarios
//!
//! Each scenario runs the full shell through the simulator and returns the
//! report. The assertions live with the callers.

use visage_core::{AvatarState, ThemeName, VisageResult};
use visage_face::FaceConfig;
use visage_runtime::ShellConfig;

use crate::simulator::{FrameSimulator, Script, SimulationReport};

/// Scenario parameters
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    pub fps: u32,
    pub seed: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self { fps: 60, seed: 0 }
    }
}

impl ScenarioConfig {
    pub fn at_fps(fps: u32) -> Self {
        Self {
            fps,
            ..Self::default()
        }
    }

    fn shell(&self, state: AvatarState, theme: ThemeName) -> ShellConfig {
        ShellConfig {
            initial_state: state,
            initial_theme: theme,
            target_fps: self.fps,
            face: FaceConfig::seeded(self.seed),
            ..ShellConfig::default()
        }
    }
}

/// One second of listening from a standing start
pub fn listening_one_second(config: &ScenarioConfig) -> VisageResult<SimulationReport> {
    let mut sim =
        FrameSimulator::new(config.shell(AvatarState::Listening, ThemeName::Ruby))?;
    sim.run_for(1.0, &Script::new())?;
    Ok(sim.finish())
}

/// Speak for a second, then idle for `idle_seconds`
pub fn speaking_then_idle(
    config: &ScenarioConfig,
    idle_seconds: f64,
) -> VisageResult<SimulationReport> {
    let mut sim = FrameSimulator::new(config.shell(AvatarState::Speaking, ThemeName::Ruby))?;
    sim.run_for(1.0, &Script::new())?;
    let switch_at = sim.samples().len() as u64;
    sim.run_for(idle_seconds, &Script::new().state_at(switch_at, AvatarState::Idle))?;
    Ok(sim.finish())
}

/// Switch to spectrum halfway through a second of speaking
pub fn theme_switch_while_speaking(config: &ScenarioConfig) -> VisageResult<SimulationReport> {
    let mut sim = FrameSimulator::new(config.shell(AvatarState::Speaking, ThemeName::Ruby))?;
    let half = (config.fps / 2) as u64;
    sim.run_for(1.0, &Script::new().theme_at(half, ThemeName::Spectrum))?;
    Ok(sim.finish())
}

/// Idle for a long stretch so several blinks happen
pub fn blink_soak(config: &ScenarioConfig, seconds: f64) -> VisageResult<SimulationReport> {
    let mut sim = FrameSimulator::new(config.shell(AvatarState::Idle, ThemeName::Ruby))?;
    sim.run_for(seconds, &Script::new())?;
    Ok(sim.finish())
}

/// Random state and theme switches
pub fn random_controls(
    config: &ScenarioConfig,
    frames: u64,
    switches: usize,
) -> VisageResult<SimulationReport> {
    let mut sim = FrameSimulator::new(config.shell(AvatarState::Idle, ThemeName::Ruby))?;
    sim.run(frames, &Script::random(config.seed, frames, switches))?;
    Ok(sim.finish())
}
