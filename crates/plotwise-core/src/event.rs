//! Normalized pointer input.
//!
//! Host toolkits translate their mouse and touch events into
//! [`PointerEvent`] at the boundary; nothing past this point knows which
//! toolkit produced them.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Pointer event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    /// Button pressed or touch started
    Down,
    /// Pointer moved
    Move,
    /// Button released or touch ended
    Up,
    /// Pointer entered the chart surface
    Enter,
    /// Pointer left the chart surface
    Leave,
}

/// Bitmask of held buttons, using the DOM `buttons` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Buttons(pub u8);

impl Buttons {
    /// No buttons held
    pub const NONE: Self = Self(0);
    /// Primary (usually left) button
    pub const PRIMARY: Self = Self(1);
    /// Secondary (usually right) button
    pub const SECONDARY: Self = Self(2);
    /// Auxiliary (usually middle) button
    pub const AUXILIARY: Self = Self(4);

    /// Whether the primary button is held.
    pub const fn primary(self) -> bool {
        self.0 & Self::PRIMARY.0 != 0
    }

    /// Whether no button is held.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A pointer event in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// What happened
    pub kind: PointerKind,
    /// Offset from the surface's top-left corner
    pub position: Point,
    /// Buttons held during the event
    pub buttons: Buttons,
    /// Pan modifier (shift key, or a second touch)
    pub modifier: bool,
}

impl PointerEvent {
    /// Create an event.
    pub const fn new(kind: PointerKind, position: Point, buttons: Buttons, modifier: bool) -> Self {
        Self {
            kind,
            position,
            buttons,
            modifier,
        }
    }

    /// Primary-button press at `(x, y)`.
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Down, Point::new(x, y), Buttons::PRIMARY, false)
    }

    /// Move at `(x, y)` with the primary button held.
    pub const fn drag(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Move, Point::new(x, y), Buttons::PRIMARY, false)
    }

    /// Move at `(x, y)` with no button held.
    pub const fn hover(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Move, Point::new(x, y), Buttons::NONE, false)
    }

    /// Release at `(x, y)`.
    pub const fn up(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Up, Point::new(x, y), Buttons::NONE, false)
    }

    /// Pointer left the surface.
    pub const fn leave() -> Self {
        Self::new(PointerKind::Leave, Point::ORIGIN, Buttons::NONE, false)
    }

    /// Same event with the pan modifier set.
    pub const fn with_modifier(mut self) -> Self {
        self.modifier = true;
        self
    }

    /// Adapt a touch event.
    ///
    /// `active` lists touches still on the surface, `changed` the touches
    /// that triggered this event. The first active touch supplies the
    /// position; on release (no active touches) the first changed touch
    /// does. Any touch counts as the primary button and two or more active
    /// touches act as the pan modifier. Returns `None` when neither list
    /// carries a position.
    pub fn from_touches(kind: PointerKind, active: &[Point], changed: &[Point]) -> Option<Self> {
        let position = active.first().or_else(|| changed.first())?;
        Some(Self::new(kind, *position, Buttons::PRIMARY, active.len() > 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_mask() {
        assert!(Buttons::PRIMARY.primary());
        assert!(!Buttons::SECONDARY.primary());
        assert!(Buttons(3).primary());
        assert!(Buttons::NONE.is_empty());
    }

    #[test]
    fn test_single_touch_is_primary_press() {
        let e = PointerEvent::from_touches(PointerKind::Down, &[Point::new(5.0, 6.0)], &[]).unwrap();
        assert_eq!(e.position, Point::new(5.0, 6.0));
        assert!(e.buttons.primary());
        assert!(!e.modifier);
    }

    #[test]
    fn test_two_touches_set_modifier() {
        let active = [Point::new(1.0, 1.0), Point::new(9.0, 9.0)];
        let e = PointerEvent::from_touches(PointerKind::Move, &active, &[]).unwrap();
        assert!(e.modifier);
        assert_eq!(e.position, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_release_uses_changed_touch() {
        let e = PointerEvent::from_touches(PointerKind::Up, &[], &[Point::new(3.0, 4.0)]).unwrap();
        assert_eq!(e.kind, PointerKind::Up);
        assert_eq!(e.position, Point::new(3.0, 4.0));
        assert!(PointerEvent::from_touches(PointerKind::Up, &[], &[]).is_none());
    }

    #[test]
    fn test_constructors() {
        assert_eq!(PointerEvent::hover(1.0, 2.0).buttons, Buttons::NONE);
        assert!(PointerEvent::drag(1.0, 2.0).with_modifier().modifier);
        assert_eq!(PointerEvent::leave().kind, PointerKind::Leave);
    }
}
