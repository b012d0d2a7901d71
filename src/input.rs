//! Input model: modifier keys, buttons, shortcuts, cursor affordance, and the pan gesture.
//!
//! `Shortcut` maps a key press to one of the zoom commands. `InputState` is the
//! gesture being tracked between pointer-down and pointer-up; while panning it
//! carries the `GestureSession` snapshot needed to turn pointer movement into
//! scroll offsets.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::Point;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Meta / Command key.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Windows/Linux, Cmd on macOS. Either one arms the zoom shortcuts.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
    Secondary,
    /// Back, forward, and any other extra button.
    Other,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Other,
        }
    }
}

/// A keyboard key as reported by the browser's `KeyboardEvent.key` (e.g. `" "`, `"="`, `"0"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The hold-to-pan key.
    #[must_use]
    pub fn is_pan_modifier(&self) -> bool {
        matches!(self.0.as_str(), " " | "Space" | "Spacebar")
    }
}

/// Zoom commands reachable from the keyboard. Toolbar buttons invoke the same operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    ZoomIn,
    ZoomOut,
    ResetZoom,
    FitToView,
}

impl Shortcut {
    pub const ALL: [Shortcut; 4] = [Self::ZoomIn, Self::ZoomOut, Self::ResetZoom, Self::FitToView];

    /// Resolve a key press. Only fires with Ctrl or Cmd held.
    #[must_use]
    pub fn from_key(key: &Key, modifiers: Modifiers) -> Option<Self> {
        if !modifiers.command() {
            return None;
        }
        match key.0.as_str() {
            "+" | "=" => Some(Self::ZoomIn),
            "-" | "_" => Some(Self::ZoomOut),
            "0" => Some(Self::ResetZoom),
            "1" => Some(Self::FitToView),
            _ => None,
        }
    }

    /// Human-readable name for help listings and tooltips.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ZoomIn => "Zoom in",
            Self::ZoomOut => "Zoom out",
            Self::ResetZoom => "Reset to 100%",
            Self::FitToView => "Fit to view",
        }
    }

    #[must_use]
    pub fn key_hint(self) -> &'static str {
        match self {
            Self::ZoomIn => "Ctrl/⌘ +",
            Self::ZoomOut => "Ctrl/⌘ -",
            Self::ResetZoom => "Ctrl/⌘ 0",
            Self::FitToView => "Ctrl/⌘ 1",
        }
    }
}

/// Whether the host should suppress the browser's default handling of a key-down:
/// page zoom for the shortcuts, page scroll for the pan key outside text fields.
#[must_use]
pub fn should_prevent_default(key: &Key, modifiers: Modifiers, focus_in_text_input: bool) -> bool {
    if Shortcut::from_key(key, modifiers).is_some() {
        return true;
    }
    key.is_pan_modifier() && !focus_in_text_input
}

/// Cursor affordance shown over the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    /// Pan modifier held, ready to drag.
    Grab,
    /// Drag in progress.
    Grabbing,
}

impl Cursor {
    /// CSS `cursor` property value.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Snapshot taken on drag start. Lives only for the duration of one drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    pub start_pointer: Point,
    pub start_scroll: Point,
}

impl GestureSession {
    #[must_use]
    pub fn new(start_pointer: Point, start_scroll: Point) -> Self {
        Self { start_pointer, start_scroll }
    }

    /// Scroll offset for the current pointer position. Inverted so dragging right
    /// moves the visible window left ("grab" semantics). Not clamped; the container
    /// enforces its own scroll range.
    #[must_use]
    pub fn scroll_for(&self, pointer: Point) -> Point {
        let moved = pointer.delta_from(self.start_pointer);
        Point { x: self.start_scroll.x - moved.x, y: self.start_scroll.y - moved.y }
    }
}

/// The gesture state machine. At most one session exists at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No drag in progress.
    #[default]
    Idle,
    /// Dragging to pan.
    Panning(GestureSession),
}

impl InputState {
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        match self {
            Self::Idle => None,
            Self::Panning(session) => Some(session),
        }
    }
}
