use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind,
};

/// High-level input events. Targets are resolved later by whoever dispatches them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press, delivered to the focused element.
    Key { key: Key, modifiers: Modifiers },
    /// Mouse button press.
    Click { x: u16, y: u16, button: MouseButton },
    /// Mouse wheel. Positive `delta_y` scrolls down.
    Scroll { x: u16, y: u16, delta_y: i16 },
    /// Mouse moved without a button held.
    MouseMove { x: u16, y: u16 },
    /// Terminal resized.
    Resize { width: u16, height: u16 },
}

impl Event {
    /// Convenience constructor for an unmodified key press.
    pub fn key(key: Key) -> Self {
        Event::Key {
            key,
            modifiers: Modifiers::new(),
        }
    }

    /// Convenience constructor for a left click.
    pub fn click(x: u16, y: u16) -> Self {
        Event::Click {
            x,
            y,
            button: MouseButton::Left,
        }
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

fn convert_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        _ => return None,
    };
    Some(key)
}

/// Convert a raw crossterm event. Key releases, unsupported keys and drags
/// are dropped.
pub fn convert_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Some(Event::Key {
            key: convert_key(key.code)?,
            modifiers: key.modifiers.into(),
        }),
        CrosstermEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(button) => Some(Event::Click {
                x: mouse.column,
                y: mouse.row,
                button: button.into(),
            }),
            MouseEventKind::ScrollDown => Some(Event::Scroll {
                x: mouse.column,
                y: mouse.row,
                delta_y: 1,
            }),
            MouseEventKind::ScrollUp => Some(Event::Scroll {
                x: mouse.column,
                y: mouse.row,
                delta_y: -1,
            }),
            MouseEventKind::Moved => Some(Event::MouseMove {
                x: mouse.column,
                y: mouse.row,
            }),
            _ => None,
        },
        CrosstermEvent::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}
