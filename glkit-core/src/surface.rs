/// Interactive surface abstraction the camera control listens on
use crate::point::{local_point, InputEvent, Point, Rect};

/// Where a listener is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The surface element itself
    Surface,
    /// The global input scope (the window), used to keep tracking a drag
    /// after the pointer leaves the surface
    Global,
}

/// Event kinds a surface can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    Wheel,
    Blur,
    ContextMenu,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        EventKind::MouseDown,
        EventKind::MouseMove,
        EventKind::MouseUp,
        EventKind::TouchStart,
        EventKind::TouchMove,
        EventKind::TouchEnd,
        EventKind::Wheel,
        EventKind::Blur,
        EventKind::ContextMenu,
    ];

    /// DOM event name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::MouseDown => "mousedown",
            EventKind::MouseMove => "mousemove",
            EventKind::MouseUp => "mouseup",
            EventKind::TouchStart => "touchstart",
            EventKind::TouchMove => "touchmove",
            EventKind::TouchEnd => "touchend",
            EventKind::Wheel => "wheel",
            EventKind::Blur => "blur",
            EventKind::ContextMenu => "contextmenu",
        }
    }
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::MouseDown { .. } => EventKind::MouseDown,
            InputEvent::MouseMove { .. } => EventKind::MouseMove,
            InputEvent::MouseUp => EventKind::MouseUp,
            InputEvent::TouchStart { .. } => EventKind::TouchStart,
            InputEvent::TouchMove { .. } => EventKind::TouchMove,
            InputEvent::TouchEnd => EventKind::TouchEnd,
            InputEvent::Wheel { .. } => EventKind::Wheel,
            InputEvent::Blur => EventKind::Blur,
            InputEvent::ContextMenu => EventKind::ContextMenu,
        }
    }
}

/// A surface that can deliver input events to a subscriber.
///
/// `listen` hands back a token that owns one registration; passing it to
/// `unlisten` releases exactly that registration. Implementations route the
/// delivered events to whoever drives the controller.
pub trait InputSurface {
    type Listener;

    fn listen(&self, scope: Scope, kind: EventKind) -> Self::Listener;

    fn unlisten(&self, listener: Self::Listener);

    fn focus(&self);

    fn bounding_rect(&self) -> Rect;
}

/// Surface-local position of a pointer-like event, for picking
pub fn point_at<S: InputSurface>(surface: &S, event: &InputEvent) -> Option<Point> {
    local_point(&surface.bounding_rect(), event)
}

#[cfg(test)]
pub(crate) mod recording {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    struct Registry {
        next_id: u32,
        active: HashMap<u32, (Scope, EventKind)>,
        focus_calls: usize,
    }

    /// Surface that records live registrations so tests can count leaks
    #[derive(Clone, Default)]
    pub struct RecordingSurface {
        registry: Rc<RefCell<Registry>>,
        bounds: Rect,
    }

    impl RecordingSurface {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_bounds(bounds: Rect) -> Self {
            Self {
                bounds,
                ..Self::default()
            }
        }

        pub fn listener_count(&self, scope: Scope) -> usize {
            self.registry
                .borrow()
                .active
                .values()
                .filter(|(s, _)| *s == scope)
                .count()
        }

        pub fn total_listeners(&self) -> usize {
            self.registry.borrow().active.len()
        }

        pub fn is_listening(&self, scope: Scope, kind: EventKind) -> bool {
            self.registry
                .borrow()
                .active
                .values()
                .any(|entry| *entry == (scope, kind))
        }

        pub fn focus_calls(&self) -> usize {
            self.registry.borrow().focus_calls
        }
    }

    impl InputSurface for RecordingSurface {
        type Listener = u32;

        fn listen(&self, scope: Scope, kind: EventKind) -> u32 {
            let mut registry = self.registry.borrow_mut();
            registry.next_id += 1;
            let id = registry.next_id;
            registry.active.insert(id, (scope, kind));
            id
        }

        fn unlisten(&self, listener: u32) {
            self.registry.borrow_mut().active.remove(&listener);
        }

        fn focus(&self) {
            self.registry.borrow_mut().focus_calls += 1;
        }

        fn bounding_rect(&self) -> Rect {
            self.bounds
        }
    }
}

#[cfg(test)]
mod tests {
    use super::recording::RecordingSurface;
    use super::*;

    #[test]
    fn test_point_at_uses_surface_bounds() {
        let surface = RecordingSurface::with_bounds(Rect::new(8.0, 16.0, 640.0, 480.0));
        let event = InputEvent::TouchStart {
            touches: vec![Point::new(18.0, 20.0)],
        };
        assert_eq!(point_at(&surface, &event), Some(Point::new(10.0, 4.0)));
    }

    #[test]
    fn test_event_kind_names() {
        assert_eq!(InputEvent::MouseUp.kind().name(), "mouseup");
        assert_eq!(
            InputEvent::Wheel { delta_y: 1.0 }.kind(),
            EventKind::Wheel
        );
        assert_eq!(EventKind::ContextMenu.name(), "contextmenu");
    }
}
