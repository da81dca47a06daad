//! Presentation Shell
//!
//! Owns the two pieces of UI state (avatar state and theme), keeps the face
//! renderer in sync with them, and derives every overlay from them once per
//! frame.

use std::time::{Duration, Instant};

use tracing::{debug, info};
use visage_core::{AvatarState, FrameTime, Palette, ThemeName, ThemeRegistry, VisageResult};
use visage_face::{FaceRenderer, FaceSnapshot};
use visage_scene::SceneGraph;

use crate::overlay::{AudioVisualizer, Decor, Header, StatusIndicator};
use crate::panel::{ControlAction, ControlPanel, PanelInteraction};
use crate::ShellConfig;

/// Shell counters
#[derive(Clone, Debug, Default)]
pub struct ShellStats {
    pub frames: u64,
    pub state_changes: u64,
    pub theme_changes: u64,
    pub last_frame_duration: Duration,
}

/// Everything needed to draw one frame
pub struct ViewFrame<'a> {
    pub time: FrameTime,
    pub scene: &'a SceneGraph,
    pub face: FaceSnapshot,
    pub palette: &'a Palette,
    pub header: Header,
    pub status: StatusIndicator,
    pub visualizer: AudioVisualizer,
    pub panel: ControlPanel,
    pub decor: &'a Decor,
}

/// The presentation shell
pub struct Shell {
    state: AvatarState,
    theme: ThemeName,
    themes: ThemeRegistry,
    face: FaceRenderer,
    pointer: PanelInteraction,
    decor: Decor,
    stats: ShellStats,
}

impl Shell {
    /// Build the shell and its face from a validated config
    pub fn new(config: &ShellConfig) -> VisageResult<Self> {
        config.validate()?;
        let themes = config.theme_registry()?;
        let palette = *themes.palette(config.initial_theme);
        let face = FaceRenderer::new(config.initial_state, palette, config.face.clone())?;

        info!(
            state = %config.initial_state,
            theme = %config.initial_theme,
            fps = config.target_fps,
            "shell started"
        );

        Ok(Shell {
            state: config.initial_state,
            theme: config.initial_theme,
            themes,
            face,
            pointer: PanelInteraction::new(),
            decor: Decor::new(&palette),
            stats: ShellStats::default(),
        })
    }

    pub fn avatar_state(&self) -> AvatarState {
        self.state
    }

    pub fn theme(&self) -> ThemeName {
        self.theme
    }

    /// Palette of the current theme
    pub fn palette(&self) -> &Palette {
        self.themes.palette(self.theme)
    }

    pub fn face(&self) -> &FaceRenderer {
        &self.face
    }

    pub fn stats(&self) -> &ShellStats {
        &self.stats
    }

    /// Pointer state of the control panel
    pub fn pointer_mut(&mut self) -> &mut PanelInteraction {
        &mut self.pointer
    }

    /// Switch the avatar state. Re-selecting the current state is allowed
    /// and leaves the counters alone.
    pub fn set_avatar_state(&mut self, next: AvatarState) -> VisageResult<()> {
        if next != self.state {
            debug!(from = %self.state, to = %next, "avatar state");
            self.stats.state_changes += 1;
        }
        self.state = next;
        self.face.set_state(next)
    }

    /// Switch the theme. The face is repainted before this returns.
    pub fn set_theme(&mut self, next: ThemeName) -> VisageResult<()> {
        if next != self.theme {
            debug!(from = %self.theme, to = %next, "theme");
            self.stats.theme_changes += 1;
        }
        self.theme = next;
        let palette = *self.themes.palette(next);
        self.decor = Decor::new(&palette);
        self.face.set_palette(palette)
    }

    pub fn toggle_theme(&mut self) -> VisageResult<()> {
        self.set_theme(self.theme.toggled())
    }

    /// Apply a control panel action
    pub fn dispatch(&mut self, action: ControlAction) -> VisageResult<()> {
        match action {
            ControlAction::SelectState(state) => self.set_avatar_state(state),
            ControlAction::SelectTheme(theme) => self.set_theme(theme),
        }
    }

    /// Advance the face and derive this frame's view
    pub fn frame(&mut self, time: FrameTime) -> VisageResult<ViewFrame<'_>> {
        let start = Instant::now();
        self.stats.frames += 1;

        self.face.update(time)?;
        let face = self.face.snapshot()?;

        let palette = self.themes.palette(self.theme);
        let view = ViewFrame {
            time,
            scene: self.face.scene(),
            face,
            palette,
            header: Header::new(palette),
            status: StatusIndicator::new(self.state, palette, time.elapsed),
            visualizer: AudioVisualizer::new(self.state, palette, time.elapsed),
            panel: ControlPanel::build(self.state, self.theme, palette, &self.pointer),
            decor: &self.decor,
        };

        self.stats.last_frame_duration = start.elapsed();
        Ok(view)
    }

    /// Stop the face; pending blink work is dropped
    pub fn shutdown(&mut self) {
        self.face.teardown();
        info!(frames = self.stats.frames, "shell stopped");
    }
}
