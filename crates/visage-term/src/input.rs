//! Keyboard and mouse mapping
//!
//! `1`/`i` idle, `2`/`s` speaking, `3`/`l` listening, `r` ruby, `p` spectrum,
//! `t` toggle theme, `q`/`Esc`/`Ctrl-C` quit. Mouse input drives the control
//! panel's hover and press feedback.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use visage_core::{AvatarState, ThemeName};
use visage_runtime::{ControlAction, PanelInteraction};

use crate::Composed;

/// What the host loop should do with an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Control(ControlAction),
    ToggleTheme,
    Quit,
}

/// Map a key press to a command
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let state = |s| Some(Command::Control(ControlAction::SelectState(s)));
    let theme = |t| Some(Command::Control(ControlAction::SelectTheme(t)));

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Some(Command::Quit),
        (KeyCode::Char('1'), _) | (KeyCode::Char('i'), _) => state(AvatarState::Idle),
        (KeyCode::Char('2'), _) | (KeyCode::Char('s'), _) => state(AvatarState::Speaking),
        (KeyCode::Char('3'), _) | (KeyCode::Char('l'), _) => state(AvatarState::Listening),
        (KeyCode::Char('r'), _) => theme(ThemeName::Ruby),
        (KeyCode::Char('p'), _) => theme(ThemeName::Spectrum),
        (KeyCode::Char('t'), _) => Some(Command::ToggleTheme),
        _ => None,
    }
}

/// Feed a mouse event to the panel pointer, using the last frame's control
/// rectangles. Returns an action when a click completes on a control.
pub fn map_mouse(
    mouse: MouseEvent,
    layout: &Composed,
    pointer: &mut PanelInteraction,
) -> Option<Command> {
    let target = layout.hit(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
            pointer.hover(target);
            None
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(id) = target {
                pointer.press(id);
            }
            None
        }
        MouseEventKind::Up(MouseButton::Left) => {
            pointer.hover(target);
            pointer.release().map(Command::Control)
        }
        _ => None,
    }
}

/// Map any terminal event
pub fn map_event(
    event: Event,
    layout: &Composed,
    pointer: &mut PanelInteraction,
) -> Option<Command> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse, layout, pointer),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;
    use visage_runtime::ControlId;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_key_bindings() {
        let none = KeyModifiers::NONE;
        assert_eq!(
            map_key(press(KeyCode::Char('2'), none)),
            Some(Command::Control(ControlAction::SelectState(AvatarState::Speaking)))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('l'), none)),
            Some(Command::Control(ControlAction::SelectState(AvatarState::Listening)))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('p'), none)),
            Some(Command::Control(ControlAction::SelectTheme(ThemeName::Spectrum)))
        );
        assert_eq!(map_key(press(KeyCode::Char('t'), none)), Some(Command::ToggleTheme));
        assert_eq!(map_key(press(KeyCode::Esc, none)), Some(Command::Quit));
        assert_eq!(
            map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(map_key(press(KeyCode::Char('x'), none)), None);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut key = press(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }

    #[test]
    fn test_mouse_click_on_control() {
        let layout = Composed {
            controls: vec![(Rect::new(10, 5, 8, 1), ControlId::Theme(ThemeName::Spectrum))],
            ..Composed::default()
        };
        let mut pointer = PanelInteraction::new();

        assert_eq!(map_mouse(mouse(MouseEventKind::Moved, 12, 5), &layout, &mut pointer), None);
        assert_eq!(
            map_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 12, 5), &layout, &mut pointer),
            None
        );
        assert_eq!(
            map_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 13, 5), &layout, &mut pointer),
            Some(Command::Control(ControlAction::SelectTheme(ThemeName::Spectrum)))
        );

        // Dragging off the control cancels the click
        map_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 12, 5), &layout, &mut pointer);
        assert_eq!(
            map_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0), &layout, &mut pointer),
            None
        );
    }
}
