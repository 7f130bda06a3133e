//! Input events delivered to widgets by the host.
//!
//! The host (a platform runner, a test, the demo driver) translates native
//! events into these types and calls the matching widget method. All
//! dispatch happens synchronously on the UI thread.

use std::cell::Cell;

use crate::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,   // Left mouse, touch
    Secondary, // Right mouse
    Tertiary,  // Middle mouse
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down(PointerButton),
    Up(PointerButton),
    Move,
    Cancel,
}

#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerKind,
    pub event: PointerEventKind,
    pub position: Vec2,
}

impl PointerEvent {
    pub fn mouse(event: PointerEventKind, position: Vec2) -> Self {
        Self {
            id: PointerId(0),
            kind: PointerKind::Mouse,
            event,
            position,
        }
    }
}

/// The element an event originated from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventTarget {
    pub name: Option<String>,
    pub id: Option<String>,
    pub value: String,
}

/// Raw value change from a text control.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangeEvent {
    pub target: EventTarget,
}

impl ChangeEvent {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            target: EventTarget {
                value: value.into(),
                ..EventTarget::default()
            },
        }
    }

    pub fn value(&self) -> &str {
        &self.target.value
    }
}

/// Form submission request. Handlers call `prevent_default` to suppress
/// the host's native navigation.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: Cell<bool>,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}
