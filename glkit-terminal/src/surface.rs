/// Terminal input surface backed by crossterm mouse and focus events
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crossterm::event::{Event, MouseButton, MouseEventKind};
use glkit_core::{Button, EventKind, InputEvent, InputSurface, Point, Rect, Scope};

#[derive(Default)]
struct Subscriptions {
    next_id: u64,
    active: HashMap<u64, (Scope, EventKind)>,
}

/// Registration token returned by [`TerminalSurface::listen`]
#[derive(Debug, PartialEq, Eq)]
pub struct TerminalListener(u64);

/// The terminal viewport as an interactive surface.
///
/// Surface-scoped listeners only see mouse events inside the viewport;
/// global listeners see every mouse event in the terminal. Cheap to clone,
/// clones share their subscriptions.
#[derive(Clone)]
pub struct TerminalSurface {
    subscriptions: Rc<RefCell<Subscriptions>>,
    viewport: Rc<Cell<Rect>>,
}

impl TerminalSurface {
    pub fn new(viewport: Rect) -> Self {
        Self {
            subscriptions: Rc::default(),
            viewport: Rc::new(Cell::new(viewport)),
        }
    }

    pub fn set_viewport(&self, viewport: Rect) {
        self.viewport.set(viewport);
    }

    pub fn listener_count(&self) -> usize {
        self.subscriptions.borrow().active.len()
    }

    /// Translate a terminal event and return it only if some listener would
    /// receive it
    pub fn route(&self, event: &Event) -> Option<InputEvent> {
        let input = translate(event)?;
        let position = match event {
            Event::Mouse(mouse) => Some(Point::new(mouse.column as f64, mouse.row as f64)),
            _ => None,
        };
        let kind = input.kind();
        let viewport = self.viewport.get();

        let delivered = self
            .subscriptions
            .borrow()
            .active
            .values()
            .any(|&(scope, listening)| {
                listening == kind
                    && match scope {
                        Scope::Global => true,
                        Scope::Surface => position.map_or(true, |point| viewport.contains(point)),
                    }
            });
        delivered.then_some(input)
    }
}

impl InputSurface for TerminalSurface {
    type Listener = TerminalListener;

    fn listen(&self, scope: Scope, kind: EventKind) -> TerminalListener {
        let mut subscriptions = self.subscriptions.borrow_mut();
        subscriptions.next_id += 1;
        let id = subscriptions.next_id;
        subscriptions.active.insert(id, (scope, kind));
        TerminalListener(id)
    }

    fn unlisten(&self, listener: TerminalListener) {
        self.subscriptions.borrow_mut().active.remove(&listener.0);
    }

    fn focus(&self) {
        // The terminal window already owns keyboard focus while it receives mouse input
        log::trace!("terminal surface focus requested");
    }

    fn bounding_rect(&self) -> Rect {
        self.viewport.get()
    }
}

fn button_code(button: MouseButton) -> i16 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
    }
}

/// Map a crossterm event onto the pointer event model. Cells are client units.
pub fn translate(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Mouse(mouse) => {
            let client = Point::new(mouse.column as f64, mouse.row as f64);
            match mouse.kind {
                MouseEventKind::Down(button) => Some(InputEvent::MouseDown {
                    button: Button::from_code(button_code(button)),
                    client,
                }),
                MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                    Some(InputEvent::MouseMove { client })
                }
                MouseEventKind::Up(_) => Some(InputEvent::MouseUp),
                MouseEventKind::ScrollDown => Some(InputEvent::Wheel { delta_y: 1.0 }),
                MouseEventKind::ScrollUp => Some(InputEvent::Wheel { delta_y: -1.0 }),
                _ => None,
            }
        }
        Event::FocusLost => Some(InputEvent::Blur),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseEvent};
    use glkit_core::{CameraControl, DeltaQueue};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_translate_buttons_and_scroll() {
        assert_eq!(
            translate(&mouse(MouseEventKind::Down(MouseButton::Right), 3, 4)),
            Some(InputEvent::MouseDown {
                button: Button::Secondary,
                client: Point::new(3.0, 4.0),
            })
        );
        assert_eq!(
            translate(&mouse(MouseEventKind::ScrollUp, 0, 0)),
            Some(InputEvent::Wheel { delta_y: -1.0 })
        );
        assert_eq!(translate(&Event::FocusLost), Some(InputEvent::Blur));
        assert_eq!(translate(&Event::FocusGained), None);
    }

    #[test]
    fn test_surface_events_only_inside_viewport() {
        let surface = TerminalSurface::new(Rect::new(0.0, 1.0, 80.0, 23.0));
        let _down = surface.listen(Scope::Surface, EventKind::MouseDown);

        let header_click = mouse(MouseEventKind::Down(MouseButton::Left), 5, 0);
        let viewport_click = mouse(MouseEventKind::Down(MouseButton::Left), 5, 10);
        assert_eq!(surface.route(&header_click), None);
        assert!(surface.route(&viewport_click).is_some());
    }

    #[test]
    fn test_drag_tracks_outside_viewport() {
        let surface = TerminalSurface::new(Rect::new(0.0, 1.0, 80.0, 23.0));
        let mut control: CameraControl<DeltaQueue, TerminalSurface> =
            CameraControl::new(DeltaQueue::default());
        control.attach(surface.clone());
        assert_eq!(surface.listener_count(), 5);

        let feed = |control: &mut CameraControl<DeltaQueue, TerminalSurface>, event: Event| {
            if let Some(input) = surface.route(&event) {
                let _ = control.handle(&input);
            }
        };

        // Moves are not routed until a drag starts
        feed(&mut control, mouse(MouseEventKind::Moved, 10, 10));
        assert!(control.hooks().is_empty());

        feed(&mut control, mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
        assert_eq!(surface.listener_count(), 9);
        // Dragging onto the header row still counts
        feed(&mut control, mouse(MouseEventKind::Drag(MouseButton::Left), 12, 0));
        feed(&mut control, mouse(MouseEventKind::Up(MouseButton::Left), 12, 0));
        assert_eq!(surface.listener_count(), 5);
        assert_eq!(control.hooks().len(), 1);

        control.detach();
        assert_eq!(surface.listener_count(), 0);
    }
}
