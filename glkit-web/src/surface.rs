/// Canvas-backed input surface
///
/// Routes DOM events from a canvas (surface scope) and its window (global
/// scope) into a dispatcher. One closure is created per event kind when the
/// surface is built and is reused for every registration, so a listener can be
/// removed from inside the event it is handling without freeing the running
/// closure.
use std::collections::HashMap;
use std::rc::Rc;

use glkit_core::{Button, Disposition, EventKind, InputEvent, InputSurface, Point, Rect, Scope};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, HtmlCanvasElement, MouseEvent, TouchEvent,
    TouchList, WheelEvent, Window,
};

use crate::error::Result;
use crate::util::window;

/// Receives converted events and reports what to do with the default action
pub type Dispatch = Rc<dyn Fn(InputEvent) -> Disposition>;

/// Registration token for one DOM listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomListener {
    scope: Scope,
    kind: EventKind,
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    window: Window,
    handlers: HashMap<EventKind, Closure<dyn FnMut(Event)>>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, dispatch: Dispatch) -> Result<Self> {
        let window = window()?;
        let handlers = EventKind::ALL
            .iter()
            .map(|&kind| {
                let dispatch = dispatch.clone();
                let handler = Closure::wrap(Box::new(move |event: Event| {
                    let Some(input) = to_input_event(kind, &event) else {
                        return;
                    };
                    if dispatch(input) == Disposition::PreventDefault {
                        event.prevent_default();
                    }
                }) as Box<dyn FnMut(Event)>);
                (kind, handler)
            })
            .collect();

        Ok(Self {
            canvas,
            window,
            handlers,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn target(&self, scope: Scope) -> &EventTarget {
        match scope {
            Scope::Surface => self.canvas.as_ref(),
            Scope::Global => self.window.as_ref(),
        }
    }
}

/// Touch start and wheel are registered non-passive so their default action
/// can be prevented
fn needs_active_listener(kind: EventKind) -> bool {
    matches!(kind, EventKind::TouchStart | EventKind::Wheel)
}

impl InputSurface for CanvasSurface {
    type Listener = DomListener;

    fn listen(&self, scope: Scope, kind: EventKind) -> DomListener {
        if let Some(handler) = self.handlers.get(&kind) {
            let target = self.target(scope);
            let callback = handler.as_ref().unchecked_ref();
            let result = if needs_active_listener(kind) {
                let options = AddEventListenerOptions::new();
                options.set_passive(false);
                target.add_event_listener_with_callback_and_add_event_listener_options(
                    kind.name(),
                    callback,
                    &options,
                )
            } else {
                target.add_event_listener_with_callback(kind.name(), callback)
            };
            if let Err(err) = result {
                log::warn!("failed to add {} listener: {:?}", kind.name(), err);
            }
        }
        DomListener { scope, kind }
    }

    fn unlisten(&self, listener: DomListener) {
        if let Some(handler) = self.handlers.get(&listener.kind) {
            let result = self
                .target(listener.scope)
                .remove_event_listener_with_callback(
                    listener.kind.name(),
                    handler.as_ref().unchecked_ref(),
                );
            if let Err(err) = result {
                log::warn!("failed to remove {} listener: {:?}", listener.kind.name(), err);
            }
        }
    }

    fn focus(&self) {
        if let Err(err) = self.canvas.focus() {
            log::debug!("canvas focus failed: {:?}", err);
        }
    }

    fn bounding_rect(&self) -> Rect {
        let bounds = self.canvas.get_bounding_client_rect();
        Rect::new(bounds.left(), bounds.top(), bounds.width(), bounds.height())
    }
}

fn touch_points(touches: &TouchList) -> Vec<Point> {
    (0..touches.length())
        .filter_map(|i| touches.item(i))
        .map(|touch| Point::new(touch.client_x() as f64, touch.client_y() as f64))
        .collect()
}

fn mouse_point(event: &MouseEvent) -> Point {
    Point::new(event.client_x() as f64, event.client_y() as f64)
}

/// Convert a DOM event delivered for `kind`
pub fn to_input_event(kind: EventKind, event: &Event) -> Option<InputEvent> {
    match kind {
        EventKind::MouseDown => event.dyn_ref::<MouseEvent>().map(|e| InputEvent::MouseDown {
            button: Button::from_code(e.button()),
            client: mouse_point(e),
        }),
        EventKind::MouseMove => event
            .dyn_ref::<MouseEvent>()
            .map(|e| InputEvent::MouseMove { client: mouse_point(e) }),
        EventKind::MouseUp => Some(InputEvent::MouseUp),
        EventKind::TouchStart => event.dyn_ref::<TouchEvent>().map(|e| InputEvent::TouchStart {
            touches: touch_points(&e.touches()),
        }),
        EventKind::TouchMove => event.dyn_ref::<TouchEvent>().map(|e| InputEvent::TouchMove {
            touches: touch_points(&e.touches()),
        }),
        EventKind::TouchEnd => Some(InputEvent::TouchEnd),
        EventKind::Wheel => event
            .dyn_ref::<WheelEvent>()
            .map(|e| InputEvent::Wheel { delta_y: e.delta_y() }),
        EventKind::Blur => Some(InputEvent::Blur),
        EventKind::ContextMenu => Some(InputEvent::ContextMenu),
    }
}
