//! Face Renderer - per-frame animation of the face rig
//!
//! The renderer owns the rig, the animation accumulators and the deferred
//! task scheduler. It holds no clock: the host passes one `FrameTime` per
//! rendered frame to `update`.

use tracing::{debug, trace};
use visage_core::{AvatarState, Color, FrameTime, Palette, VisageResult};
use visage_scene::{SceneGraph, Vec3};
use visage_time::{Scheduler, TaskId};

use crate::motion::{
    head_sway, listening_mouth, listening_ring_scale, pulse_scale, ring_rates, smooth_toward,
    speaking_mouth, Shimmer, IDLE_MOUTH, LISTEN_PHASE_RATE, SPEAK_PHASE_RATE,
};
use crate::{Blinker, FaceConfig, FaceNodes, FaceRig};

/// Work deferred past the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceTask {
    /// End of a blink
    ReopenEyes,
}

/// Read-back of the animated values, for overlays and tests
#[derive(Debug, Clone, PartialEq)]
pub struct FaceSnapshot {
    pub state: AvatarState,
    pub frame: FrameTime,
    pub eyes_open: bool,
    /// Pupil vertical scale (both eyes move together)
    pub eye_scale: f32,
    pub mouth_scale: f32,
    pub inner_ring_rotation: f32,
    pub inner_ring_scale: f32,
    pub outer_ring_rotation: f32,
    pub pulse_scale: f32,
    pub pulse_color: Color,
    pub pulse_opacity: f32,
    /// Head rotation (x, y)
    pub head_rotation: (f32, f32),
    pub accent_opacity: [f32; 6],
}

/// Animated avatar face
pub struct FaceRenderer {
    rig: FaceRig,
    state: AvatarState,
    palette: Palette,
    config: FaceConfig,
    blinker: Blinker,
    scheduler: Scheduler<FaceTask>,
    reopen_task: Option<TaskId>,
    speak_phase: f64,
    listen_phase: f64,
    last_frame: FrameTime,
    torn_down: bool,
}

impl FaceRenderer {
    /// Build the face and its animation state
    pub fn new(state: AvatarState, palette: Palette, config: FaceConfig) -> VisageResult<Self> {
        config.validate()?;
        let rig = FaceRig::build(&palette, state)?;
        let blinker = Blinker::new(&config);

        debug!(%state, first_blink = blinker.threshold(), "face renderer created");

        Ok(FaceRenderer {
            rig,
            state,
            palette,
            config,
            blinker,
            scheduler: Scheduler::new(),
            reopen_task: None,
            speak_phase: 0.0,
            listen_phase: 0.0,
            last_frame: FrameTime::ZERO,
            torn_down: false,
        })
    }

    pub fn state(&self) -> AvatarState {
        self.state
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.rig.graph
    }

    pub fn nodes(&self) -> &FaceNodes {
        &self.rig.nodes
    }

    pub fn blinker(&self) -> &Blinker {
        &self.blinker
    }

    /// Deferred tasks still waiting to run
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Switch avatar state; state colors apply immediately
    pub fn set_state(&mut self, state: AvatarState) -> VisageResult<()> {
        if state != self.state {
            debug!(from = %self.state, to = %state, "face state changed");
        }
        self.state = state;
        self.rig.apply_state(&self.palette, state)
    }

    /// Swap palettes; every derived color is repainted before returning
    pub fn set_palette(&mut self, palette: Palette) -> VisageResult<()> {
        self.palette = palette;
        self.rig.apply_palette(&self.palette, self.state)
    }

    /// Advance the face by one rendered frame
    pub fn update(&mut self, frame: FrameTime) -> VisageResult<()> {
        if self.torn_down {
            return Ok(());
        }
        trace!(?frame, state = %self.state, "face frame");

        self.run_due_tasks(frame.elapsed);
        self.update_blink(frame)?;
        self.update_state_motion(frame)?;
        self.update_head(frame)?;
        self.update_accents(frame)?;

        self.last_frame = frame;
        Ok(())
    }

    /// Cancel deferred work and stop animating
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        let dropped = self.scheduler.cancel_all();
        self.reopen_task = None;
        self.torn_down = true;
        debug!(dropped, "face renderer torn down");
    }

    fn run_due_tasks(&mut self, now: f64) {
        for task in self.scheduler.poll(now) {
            match task {
                FaceTask::ReopenEyes => {
                    self.reopen_task = None;
                    self.blinker.reopen();
                }
            }
        }
    }

    fn update_blink(&mut self, frame: FrameTime) -> VisageResult<()> {
        if self.blinker.advance(frame.delta) {
            if let Some(stale) = self.reopen_task.take() {
                self.scheduler.cancel(stale);
            }
            self.reopen_task = Some(self.scheduler.schedule_after(
                frame.elapsed,
                self.config.blink_duration(),
                FaceTask::ReopenEyes,
            ));
            debug!(
                at = frame.elapsed,
                next_in = self.blinker.threshold(),
                "blink"
            );
        }

        let target = self.blinker.target();
        let k = self
            .config
            .smoothing
            .factor(self.config.eye_smoothing, frame.delta);
        for pupil in self.rig.nodes.pupils() {
            let t = self.rig.graph.transform_mut(pupil)?;
            t.scale.y = smooth_toward(t.scale.y, target, k).max(0.0);
        }
        Ok(())
    }

    fn update_state_motion(&mut self, frame: FrameTime) -> VisageResult<()> {
        let nodes = &self.rig.nodes;
        let graph = &mut self.rig.graph;
        let t = frame.elapsed;
        let delta = frame.delta;
        let rates = ring_rates(self.state);

        match self.state {
            AvatarState::Speaking => {
                self.speak_phase += delta * SPEAK_PHASE_RATE;
                graph.transform_mut(nodes.mouth.cavity)?.scale.y = speaking_mouth(self.speak_phase);
            }
            AvatarState::Listening => {
                self.listen_phase += delta * LISTEN_PHASE_RATE;
                graph.transform_mut(nodes.mouth.cavity)?.scale.y =
                    listening_mouth(self.listen_phase);
                graph.transform_mut(nodes.inner_ring)?.scale = Vec3::planar(listening_ring_scale(t));
            }
            AvatarState::Idle => {
                let k = self
                    .config
                    .smoothing
                    .factor(self.config.mouth_smoothing, delta);
                let mouth = graph.transform_mut(nodes.mouth.cavity)?;
                mouth.scale.y = smooth_toward(mouth.scale.y, IDLE_MOUTH, k);
            }
        }

        graph.transform_mut(nodes.inner_ring)?.rotation.z += rates.inner * delta as f32;
        graph.transform_mut(nodes.outer_ring)?.rotation.z += rates.outer * delta as f32;
        graph.transform_mut(nodes.pulse_ring)?.scale = Vec3::planar(pulse_scale(self.state, t));
        Ok(())
    }

    fn update_head(&mut self, frame: FrameTime) -> VisageResult<()> {
        let (rx, ry) = head_sway(frame.elapsed);
        let head = self.rig.graph.transform_mut(self.rig.nodes.head)?;
        head.rotation.x = rx;
        head.rotation.y = ry;
        Ok(())
    }

    fn update_accents(&mut self, frame: FrameTime) -> VisageResult<()> {
        let shimmer = Shimmer::for_state(self.state);
        for (i, dot) in self.rig.nodes.accents.iter().enumerate() {
            self.rig.graph.material_mut(*dot)?.opacity = shimmer.opacity(frame.elapsed, i);
        }
        Ok(())
    }

    /// Current animated values
    pub fn snapshot(&self) -> VisageResult<FaceSnapshot> {
        let g = &self.rig.graph;
        let n = &self.rig.nodes;

        let head = g.transform(n.head)?;
        let inner = g.transform(n.inner_ring)?;
        let pulse = g.material(n.pulse_ring)?;
        let mut accent_opacity = [0.0; 6];
        for (slot, dot) in accent_opacity.iter_mut().zip(n.accents) {
            *slot = g.material(dot)?.opacity;
        }

        Ok(FaceSnapshot {
            state: self.state,
            frame: self.last_frame,
            eyes_open: self.blinker.is_open(),
            eye_scale: g.transform(n.left_eye.pupil)?.scale.y,
            mouth_scale: g.transform(n.mouth.cavity)?.scale.y,
            inner_ring_rotation: inner.rotation.z,
            inner_ring_scale: inner.scale.x,
            outer_ring_rotation: g.transform(n.outer_ring)?.rotation.z,
            pulse_scale: g.transform(n.pulse_ring)?.scale.x,
            pulse_color: pulse.color,
            pulse_opacity: pulse.opacity,
            head_rotation: (head.rotation.x, head.rotation.y),
            accent_opacity,
        })
    }
}

impl Drop for FaceRenderer {
    fn drop(&mut self) {
        self.teardown();
    }
}
