/// Pointer-driven orbit camera control
///
/// Translates pointer, touch and wheel events from an attached surface into
/// pan, rotate and zoom deltas delivered to a set of camera hooks.
use std::collections::vec_deque::{self, VecDeque};
use std::f64::consts::PI;

use crate::point::{client_point, Button, InputEvent, Point};
use crate::surface::{EventKind, InputSurface, Scope};

/// Events listened for on the surface for as long as the control is attached
const SURFACE_EVENTS: [EventKind; 5] = [
    EventKind::MouseDown,
    EventKind::TouchStart,
    EventKind::Wheel,
    EventKind::Blur,
    EventKind::ContextMenu,
];

/// Events listened for on the global scope while a drag is in progress
const DRAG_EVENTS: [EventKind; 4] = [
    EventKind::MouseMove,
    EventKind::MouseUp,
    EventKind::TouchMove,
    EventKind::TouchEnd,
];

/// Scaling applied to raw pointer and wheel input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSpeeds {
    /// Pan distance per client pixel
    pub pan_speed: f64,
    /// Multiplicative zoom factor per wheel tick
    pub zoom_speed: f64,
    /// Rotation in radians per client pixel
    pub rotate_speed: f64,
}

impl ControlSpeeds {
    pub fn with_pan_speed(mut self, pan_speed: f64) -> Self {
        self.pan_speed = pan_speed;
        self
    }

    pub fn with_zoom_speed(mut self, zoom_speed: f64) -> Self {
        self.zoom_speed = zoom_speed;
        self
    }

    pub fn with_rotate_speed(mut self, rotate_speed: f64) -> Self {
        self.rotate_speed = rotate_speed;
        self
    }
}

impl Default for ControlSpeeds {
    fn default() -> Self {
        Self {
            pan_speed: 0.1,
            zoom_speed: 1.1,
            rotate_speed: PI / 180.0,
        }
    }
}

/// A single camera adjustment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraDelta {
    Pan { dx: f64, dy: f64 },
    Rotate { dx: f64, dy: f64 },
    Zoom(f64),
}

/// Camera update hooks supplied by the owning application.
///
/// Called synchronously from inside event handling; implementations should
/// return quickly.
pub trait CameraHooks {
    fn on_pan(&mut self, dx: f64, dy: f64);

    fn on_rotate(&mut self, dx: f64, dy: f64);

    fn on_zoom(&mut self, factor: f64);

    fn apply(&mut self, delta: CameraDelta) {
        match delta {
            CameraDelta::Pan { dx, dy } => self.on_pan(dx, dy),
            CameraDelta::Rotate { dx, dy } => self.on_rotate(dx, dy),
            CameraDelta::Zoom(factor) => self.on_zoom(factor),
        }
    }
}

/// Bounded buffer of deltas for hosts that apply camera updates outside event
/// dispatch. When full, the oldest delta is dropped.
#[derive(Debug, Clone)]
pub struct DeltaQueue {
    deltas: VecDeque<CameraDelta>,
    capacity: usize,
}

impl DeltaQueue {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            deltas: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, delta: CameraDelta) {
        if self.deltas.len() == self.capacity {
            self.deltas.pop_front();
            log::trace!("delta queue full, dropping oldest delta");
        }
        self.deltas.push_back(delta);
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Remove and return queued deltas, oldest first
    pub fn drain(&mut self) -> vec_deque::Drain<'_, CameraDelta> {
        self.deltas.drain(..)
    }
}

impl Default for DeltaQueue {
    fn default() -> Self {
        Self::new(64)
    }
}

impl CameraHooks for DeltaQueue {
    fn on_pan(&mut self, dx: f64, dy: f64) {
        self.push(CameraDelta::Pan { dx, dy });
    }

    fn on_rotate(&mut self, dx: f64, dy: f64) {
        self.push(CameraDelta::Rotate { dx, dy });
    }

    fn on_zoom(&mut self, factor: f64) {
        self.push(CameraDelta::Zoom(factor));
    }
}

/// Drag gesture state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { is_panning: bool, last_point: Point },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// Change to global listener registration requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Keep,
    Begin,
    End,
}

/// What the platform should do with the event's default action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Disposition {
    PassThrough,
    PreventDefault,
}

/// Result of feeding one event to a drag state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub next: DragState,
    pub delta: Option<CameraDelta>,
    pub capture: Capture,
    pub disposition: Disposition,
}

impl Transition {
    fn stay(state: DragState) -> Self {
        Self {
            next: state,
            delta: None,
            capture: Capture::Keep,
            disposition: Disposition::PassThrough,
        }
    }
}

/// Compute the next drag state for `event`.
///
/// Pan versus rotate is decided once at the start of a gesture; a down event
/// arriving mid-gesture does not change it.
pub fn transition(state: DragState, event: &InputEvent, speeds: &ControlSpeeds) -> Transition {
    match (state, event) {
        (DragState::Idle, InputEvent::MouseDown { .. } | InputEvent::TouchStart { .. }) => {
            let is_panning = match event {
                InputEvent::MouseDown {
                    button: Button::Primary,
                    ..
                }
                | InputEvent::TouchStart { .. } => false,
                InputEvent::MouseDown {
                    button: Button::Secondary,
                    ..
                } => true,
                // Still suppressed so middle-click autoscroll never starts
                _ => {
                    return Transition {
                        disposition: Disposition::PreventDefault,
                        ..Transition::stay(state)
                    }
                }
            };
            match client_point(event) {
                Some(last_point) => Transition {
                    next: DragState::Dragging {
                        is_panning,
                        last_point,
                    },
                    delta: None,
                    capture: Capture::Begin,
                    disposition: Disposition::PreventDefault,
                },
                None => Transition::stay(state),
            }
        }
        (DragState::Dragging { .. }, InputEvent::MouseDown { .. } | InputEvent::TouchStart { .. }) => {
            Transition {
                disposition: Disposition::PreventDefault,
                ..Transition::stay(state)
            }
        }
        (
            DragState::Dragging {
                is_panning,
                last_point,
            },
            InputEvent::MouseMove { .. } | InputEvent::TouchMove { .. },
        ) => {
            let Some(point) = client_point(event) else {
                return Transition::stay(state);
            };
            let offset = point - last_point;
            let delta = if offset.is_zero() {
                None
            } else if is_panning {
                Some(CameraDelta::Pan {
                    dx: offset.x * speeds.pan_speed,
                    dy: offset.y * speeds.pan_speed,
                })
            } else {
                Some(CameraDelta::Rotate {
                    dx: offset.x * speeds.rotate_speed,
                    dy: offset.y * speeds.rotate_speed,
                })
            };
            Transition {
                next: DragState::Dragging {
                    is_panning,
                    last_point: point,
                },
                delta,
                capture: Capture::Keep,
                disposition: Disposition::PassThrough,
            }
        }
        (DragState::Dragging { .. }, InputEvent::MouseUp | InputEvent::TouchEnd | InputEvent::Blur) => {
            Transition {
                next: DragState::Idle,
                delta: None,
                capture: Capture::End,
                disposition: Disposition::PassThrough,
            }
        }
        (_, InputEvent::Wheel { delta_y }) => {
            let factor = if *delta_y > 0.0 {
                Some(speeds.zoom_speed)
            } else if *delta_y < 0.0 {
                Some(1.0 / speeds.zoom_speed)
            } else {
                None
            };
            Transition {
                delta: factor.map(CameraDelta::Zoom),
                ..Transition::stay(state)
            }
        }
        (_, InputEvent::ContextMenu) => Transition {
            disposition: Disposition::PreventDefault,
            ..Transition::stay(state)
        },
        _ => Transition::stay(state),
    }
}

struct Attachment<S: InputSurface> {
    surface: S,
    listeners: Vec<S::Listener>,
    drag: DragState,
    drag_listeners: Vec<S::Listener>,
}

impl<S: InputSurface> Attachment<S> {
    fn capture(&mut self) {
        for kind in DRAG_EVENTS {
            let listener = self.surface.listen(Scope::Global, kind);
            self.drag_listeners.push(listener);
        }
    }

    fn release(&mut self) {
        for listener in self.drag_listeners.drain(..) {
            self.surface.unlisten(listener);
        }
    }

    fn dispose(mut self) {
        self.release();
        for listener in self.listeners.drain(..) {
            self.surface.unlisten(listener);
        }
    }
}

/// Orbit camera input controller bound to at most one surface at a time
pub struct CameraControl<H, S: InputSurface> {
    speeds: ControlSpeeds,
    hooks: H,
    attachment: Option<Attachment<S>>,
}

impl<H: CameraHooks, S: InputSurface> CameraControl<H, S> {
    pub fn new(hooks: H) -> Self {
        Self::with_speeds(hooks, ControlSpeeds::default())
    }

    pub fn with_speeds(hooks: H, speeds: ControlSpeeds) -> Self {
        Self {
            speeds,
            hooks,
            attachment: None,
        }
    }

    /// Bind to `surface` and start listening. Does nothing if already attached.
    pub fn attach(&mut self, surface: S) {
        if self.attachment.is_some() {
            log::debug!("camera control already attached, ignoring attach");
            return;
        }
        let listeners = SURFACE_EVENTS
            .iter()
            .map(|kind| surface.listen(Scope::Surface, *kind))
            .collect();
        self.attachment = Some(Attachment {
            surface,
            listeners,
            drag: DragState::Idle,
            drag_listeners: Vec::with_capacity(DRAG_EVENTS.len()),
        });
        log::debug!("camera control attached");
    }

    /// Remove every listener registered on the surface and the global scope
    /// and forget any drag in progress.
    pub fn detach(&mut self) {
        let Some(attachment) = self.attachment.take() else {
            return;
        };
        attachment.dispose();
        log::debug!("camera control detached");
    }

    /// Feed one event delivered by the attached surface
    pub fn handle(&mut self, event: &InputEvent) -> Disposition {
        let Some(attachment) = self.attachment.as_mut() else {
            return Disposition::PassThrough;
        };

        let step = transition(attachment.drag, event, &self.speeds);
        attachment.drag = step.next;
        match step.capture {
            Capture::Begin => {
                attachment.surface.focus();
                attachment.capture();
                log::trace!("drag started: {:?}", step.next);
            }
            Capture::End => {
                attachment.release();
                log::trace!("drag ended");
            }
            Capture::Keep => {}
        }

        if let Some(delta) = step.delta {
            self.hooks.apply(delta);
        }
        step.disposition
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_state().is_dragging()
    }

    pub fn drag_state(&self) -> DragState {
        self.attachment
            .as_ref()
            .map(|attachment| attachment.drag)
            .unwrap_or_default()
    }

    pub fn surface(&self) -> Option<&S> {
        self.attachment.as_ref().map(|attachment| &attachment.surface)
    }

    pub fn speeds(&self) -> &ControlSpeeds {
        &self.speeds
    }

    /// Speeds may be changed between gestures; a drag in progress picks up the
    /// new values on its next move.
    pub fn speeds_mut(&mut self) -> &mut ControlSpeeds {
        &mut self.speeds
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }
}

impl<H, S: InputSurface> Drop for CameraControl<H, S> {
    fn drop(&mut self) {
        if let Some(attachment) = self.attachment.take() {
            attachment.dispose();
        }
    }
}
