/// Client-space points and the pointer-like input events that carry them
use std::ops::Sub;

/// A 2-D coordinate in client (viewport) space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned bounds of a surface in client space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Whether `point` falls inside the rectangle (right and bottom edges excluded)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.y >= self.top
            && point.x < self.left + self.width
            && point.y < self.top + self.height
    }
}

/// Mouse button reported by a down event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Auxiliary,
    Secondary,
    Other(i16),
}

impl Button {
    /// Map a DOM-style `MouseEvent.button` code
    pub fn from_code(code: i16) -> Self {
        match code {
            0 => Button::Primary,
            1 => Button::Auxiliary,
            2 => Button::Secondary,
            other => Button::Other(other),
        }
    }
}

/// A platform input event as delivered by an interactive surface.
///
/// Touch variants carry the full active touch list in client space; mouse
/// variants carry the event's own client position.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    MouseDown { button: Button, client: Point },
    MouseMove { client: Point },
    MouseUp,
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    TouchEnd,
    Wheel { delta_y: f64 },
    Blur,
    ContextMenu,
}

/// Client-space position of a pointer-like event.
///
/// Touch events resolve to their first touch. Returns `None` for events that
/// carry no position, including touch events whose touch list is empty.
pub fn client_point(event: &InputEvent) -> Option<Point> {
    match event {
        InputEvent::MouseDown { client, .. } | InputEvent::MouseMove { client } => Some(*client),
        InputEvent::TouchStart { touches } | InputEvent::TouchMove { touches } => {
            touches.first().copied()
        }
        _ => None,
    }
}

/// Position of a pointer-like event relative to the top-left of `bounds`
pub fn local_point(bounds: &Rect, event: &InputEvent) -> Option<Point> {
    client_point(event).map(|point| point - bounds.top_left())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_event_uses_own_position() {
        let event = InputEvent::MouseMove {
            client: Point::new(12.0, 34.0),
        };
        assert_eq!(client_point(&event), Some(Point::new(12.0, 34.0)));
    }

    #[test]
    fn test_touch_event_uses_first_touch() {
        let event = InputEvent::TouchMove {
            touches: vec![Point::new(5.0, 6.0), Point::new(100.0, 200.0)],
        };
        assert_eq!(client_point(&event), Some(Point::new(5.0, 6.0)));
    }

    #[test]
    fn test_empty_touch_list_has_no_point() {
        let start = InputEvent::TouchStart { touches: vec![] };
        let moved = InputEvent::TouchMove { touches: vec![] };
        assert_eq!(client_point(&start), None);
        assert_eq!(client_point(&moved), None);
        assert_eq!(client_point(&InputEvent::TouchEnd), None);
    }

    #[test]
    fn test_local_point_subtracts_bounds_origin() {
        let bounds = Rect::new(10.0, 20.0, 300.0, 150.0);
        let event = InputEvent::MouseDown {
            button: Button::Primary,
            client: Point::new(110.0, 70.0),
        };
        assert_eq!(local_point(&bounds, &event), Some(Point::new(100.0, 50.0)));
    }

    #[test]
    fn test_button_codes() {
        assert_eq!(Button::from_code(0), Button::Primary);
        assert_eq!(Button::from_code(2), Button::Secondary);
        assert_eq!(Button::from_code(4), Button::Other(4));
    }

    #[test]
    fn test_rect_contains() {
        let bounds = Rect::new(0.0, 1.0, 10.0, 5.0);
        assert!(bounds.contains(Point::new(0.0, 1.0)));
        assert!(!bounds.contains(Point::new(10.0, 3.0)));
        assert!(!bounds.contains(Point::new(3.0, 0.5)));
    }
}
