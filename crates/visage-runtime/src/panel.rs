//! Control Panel - mode and theme selection
//!
//! The panel is a pure view model rebuilt from (state, theme, palette). Its
//! only side channel is `ControlAction`, handed back to the shell when a
//! control is activated. Hover and press feedback is cosmetic and lives in
//! `PanelInteraction`, local to the panel.

use visage_core::{AvatarState, Color, Palette, Rgba, ThemeName};

/// Panel heading
pub const MODE_LABEL: &str = "MODE SELECT";
/// Theme group heading
pub const THEME_LABEL: &str = "THEME";
/// Info block heading
pub const CURRENT_STATE_LABEL: &str = "Current State:";

/// Vertical offset of a hovered button
pub const HOVER_LIFT: f32 = 2.0;

// Alpha suffixes applied to the palette primary
const INACTIVE_FILL: u8 = 0x0D;
const OUTLINE: u8 = 0x33;
const ACTIVE_GLOW: u8 = 0x66;
const THEME_GLOW: u8 = 0x44;
const DIVIDER: u8 = 0x1A;

fn hover_fill() -> Rgba {
    Rgba::new(Color::from_rgb8(220, 38, 38), 0.15)
}

fn label_gray() -> Color {
    Color::from_rgb8(0x4A, 0x4A, 0x4A)
}

fn hint_gray() -> Color {
    Color::from_rgb8(0x6B, 0x72, 0x80)
}

/// Identifies one activatable control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    State(AvatarState),
    Theme(ThemeName),
}

/// What activating a control asks the shell to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    SelectState(AvatarState),
    SelectTheme(ThemeName),
}

impl ControlId {
    /// Every control in panel order
    pub fn all() -> impl Iterator<Item = ControlId> {
        AvatarState::ALL
            .into_iter()
            .map(ControlId::State)
            .chain(ThemeName::ALL.into_iter().map(ControlId::Theme))
    }

    pub fn action(self) -> ControlAction {
        match self {
            ControlId::State(s) => ControlAction::SelectState(s),
            ControlId::Theme(t) => ControlAction::SelectTheme(t),
        }
    }
}

/// Transient pointer feedback on a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Rest,
    Hover,
    Press,
}

/// Pointer tracking for the panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelInteraction {
    hovered: Option<ControlId>,
    pressed: Option<ControlId>,
}

impl PanelInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer moved onto `target` (or off every control)
    pub fn hover(&mut self, target: Option<ControlId>) {
        self.hovered = target;
    }

    pub fn press(&mut self, target: ControlId) {
        self.hovered = Some(target);
        self.pressed = Some(target);
    }

    /// Release the pointer. Activates the pressed control if the pointer is
    /// still over it.
    pub fn release(&mut self) -> Option<ControlAction> {
        let pressed = self.pressed.take()?;
        (self.hovered == Some(pressed)).then(|| pressed.action())
    }

    pub fn interaction(&self, id: ControlId) -> Interaction {
        if self.pressed == Some(id) {
            Interaction::Press
        } else if self.hovered == Some(id) {
            Interaction::Hover
        } else {
            Interaction::Rest
        }
    }
}

/// Resolved look of one button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStyle {
    pub background: Rgba,
    pub border: Rgba,
    pub border_width: f32,
    pub glow: Option<Rgba>,
    pub text: Color,
    /// Upward offset
    pub lift: f32,
}

impl ButtonStyle {
    fn with_interaction(mut self, interaction: Interaction) -> Self {
        match interaction {
            Interaction::Rest => {}
            Interaction::Hover => {
                self.background = hover_fill();
                self.lift = HOVER_LIFT;
            }
            Interaction::Press => {
                self.background = hover_fill();
                self.lift = 0.0;
            }
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateButton {
    pub state: AvatarState,
    pub label: &'static str,
    pub icon: &'static str,
    pub active: bool,
    pub style: ButtonStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeButton {
    pub theme: ThemeName,
    pub label: &'static str,
    pub swatches: Vec<Color>,
    pub active: bool,
    pub style: ButtonStyle,
}

/// "Current State" block with the state hint
#[derive(Debug, Clone, PartialEq)]
pub struct InfoBlock {
    pub heading: &'static str,
    pub value: String,
    pub value_color: Color,
    pub divider: Rgba,
    pub hint: &'static str,
    pub hint_color: Color,
}

/// Full panel view model
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    pub outline: Rgba,
    pub state_buttons: Vec<StateButton>,
    pub theme_buttons: Vec<ThemeButton>,
    pub info: InfoBlock,
}

impl ControlPanel {
    pub fn build(
        state: AvatarState,
        theme: ThemeName,
        palette: &Palette,
        pointer: &PanelInteraction,
    ) -> Self {
        let primary = palette.primary;

        let state_buttons = AvatarState::ALL
            .into_iter()
            .map(|s| {
                let active = s == state;
                let style = if active {
                    ButtonStyle {
                        background: Rgba::opaque(primary),
                        border: Rgba::opaque(primary),
                        border_width: 1.0,
                        glow: Some(primary.with_alpha8(ACTIVE_GLOW)),
                        text: Color::white(),
                        lift: 0.0,
                    }
                } else {
                    ButtonStyle {
                        background: primary.with_alpha8(INACTIVE_FILL),
                        border: primary.with_alpha8(OUTLINE),
                        border_width: 1.0,
                        glow: None,
                        text: label_gray(),
                        lift: 0.0,
                    }
                };
                StateButton {
                    state: s,
                    label: s.label(),
                    icon: s.icon(),
                    active,
                    style: style.with_interaction(pointer.interaction(ControlId::State(s))),
                }
            })
            .collect();

        let theme_buttons = ThemeName::ALL
            .into_iter()
            .map(|t| {
                let active = t == theme;
                let style = ButtonStyle {
                    background: Rgba::new(palette.off_white, 0.8),
                    border: if active {
                        Rgba::opaque(primary)
                    } else {
                        Rgba::transparent()
                    },
                    border_width: 2.0,
                    glow: active.then(|| primary.with_alpha8(THEME_GLOW)),
                    text: label_gray(),
                    lift: 0.0,
                };
                ThemeButton {
                    theme: t,
                    label: t.label(),
                    swatches: t.swatches(),
                    active,
                    style: style.with_interaction(pointer.interaction(ControlId::Theme(t))),
                }
            })
            .collect();

        ControlPanel {
            outline: primary.with_alpha8(OUTLINE),
            state_buttons,
            theme_buttons,
            info: InfoBlock {
                heading: CURRENT_STATE_LABEL,
                value: state.as_str().to_uppercase(),
                value_color: primary,
                divider: primary.with_alpha8(DIVIDER),
                hint: state.hint(),
                hint_color: hint_gray(),
            },
        }
    }

    /// Active state button, if any
    pub fn active_state(&self) -> Option<AvatarState> {
        self.state_buttons.iter().find(|b| b.active).map(|b| b.state)
    }

    pub fn active_theme(&self) -> Option<ThemeName> {
        self.theme_buttons.iter().find(|b| b.active).map(|b| b.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ruby() -> Palette {
        Palette::builtin(ThemeName::Ruby)
    }

    #[test]
    fn test_state_buttons() {
        let panel = ControlPanel::build(
            AvatarState::Speaking,
            ThemeName::Ruby,
            &ruby(),
            &PanelInteraction::new(),
        );

        let labels: Vec<_> = panel
            .state_buttons
            .iter()
            .map(|b| format!("{} {}", b.label, b.icon))
            .collect();
        assert_eq!(labels, ["IDLE ◯", "SPEAK ◉", "LISTEN ◎"]);
        assert_eq!(panel.active_state(), Some(AvatarState::Speaking));

        let active = &panel.state_buttons[1].style;
        assert_eq!(active.background, Rgba::opaque(ruby().primary));
        assert_eq!(active.text, Color::white());
        assert_eq!(active.glow.unwrap().to_hex(), "#DC262666");

        let inactive = &panel.state_buttons[0].style;
        assert_eq!(inactive.background.to_hex(), "#DC26260D");
        assert_eq!(inactive.border.to_hex(), "#DC262633");
        assert!(inactive.glow.is_none());
    }

    #[test]
    fn test_theme_buttons() {
        let spectrum = Palette::builtin(ThemeName::Spectrum);
        let panel = ControlPanel::build(
            AvatarState::Idle,
            ThemeName::Spectrum,
            &spectrum,
            &PanelInteraction::new(),
        );

        assert_eq!(panel.active_theme(), Some(ThemeName::Spectrum));
        assert_eq!(panel.theme_buttons[0].swatches.len(), 1);
        assert_eq!(panel.theme_buttons[1].swatches.len(), 3);

        let active = &panel.theme_buttons[1].style;
        assert_eq!(active.border_width, 2.0);
        assert_eq!(active.glow.unwrap().to_hex(), "#2563EB44");
        assert_eq!(panel.theme_buttons[0].style.border.alpha, 0.0);
    }

    #[test]
    fn test_info_block() {
        for (state, hint) in [
            (AvatarState::Idle, "Avatar is in standby mode"),
            (AvatarState::Speaking, "Avatar is actively speaking"),
            (AvatarState::Listening, "Avatar is listening for input"),
        ] {
            let panel =
                ControlPanel::build(state, ThemeName::Ruby, &ruby(), &PanelInteraction::new());
            assert_eq!(panel.info.heading, "Current State:");
            assert_eq!(panel.info.value, state.as_str().to_uppercase());
            assert_eq!(panel.info.hint, hint);
        }
    }

    #[test]
    fn test_hover_and_press_feedback() {
        let mut pointer = PanelInteraction::new();
        let target = ControlId::State(AvatarState::Listening);

        pointer.hover(Some(target));
        let panel = ControlPanel::build(AvatarState::Idle, ThemeName::Ruby, &ruby(), &pointer);
        let hovered = &panel.state_buttons[2].style;
        assert_eq!(hovered.lift, HOVER_LIFT);
        assert_eq!(hovered.background.to_hex(), "#DC262626");
        assert_eq!(panel.state_buttons[0].style.lift, 0.0);

        pointer.press(target);
        let panel = ControlPanel::build(AvatarState::Idle, ThemeName::Ruby, &ruby(), &pointer);
        assert_eq!(panel.state_buttons[2].style.lift, 0.0);

        assert_eq!(
            pointer.release(),
            Some(ControlAction::SelectState(AvatarState::Listening))
        );
        assert_eq!(pointer.interaction(target), Interaction::Hover);
    }

    #[test]
    fn test_release_off_target_does_nothing() {
        let mut pointer = PanelInteraction::new();
        pointer.press(ControlId::Theme(ThemeName::Spectrum));
        pointer.hover(None);
        assert_eq!(pointer.release(), None);
        assert_eq!(pointer.release(), None);
    }

    #[test]
    fn test_control_ids_cover_panel() {
        let actions: Vec<_> = ControlId::all().map(ControlId::action).collect();
        assert_eq!(actions.len(), 5);
        assert_eq!(actions[4], ControlAction::SelectTheme(ThemeName::Spectrum));
    }
}
