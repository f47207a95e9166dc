/// Camera control bound to a canvas element
///
/// Events are handled with the control borrowed; the resulting deltas are
/// queued and handed to the hooks only after that borrow ends, so hooks may
/// read or reconfigure the control.
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glkit_core::{CameraControl, CameraHooks, ControlSpeeds, DeltaQueue, Disposition, InputEvent};
use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::error::Result;
use crate::surface::{CanvasSurface, Dispatch};

type SharedControl = Rc<RefCell<CameraControl<DeltaQueue, CanvasSurface>>>;

/// Owns a [`CameraControl`] and wires canvas events into it
pub struct CanvasCameraControl<H: CameraHooks + 'static> {
    control: SharedControl,
    hooks: Rc<RefCell<H>>,
}

impl<H: CameraHooks + 'static> CanvasCameraControl<H> {
    pub fn new(hooks: H) -> Self {
        Self::with_speeds(hooks, ControlSpeeds::default())
    }

    pub fn with_speeds(hooks: H, speeds: ControlSpeeds) -> Self {
        Self {
            control: Rc::new(RefCell::new(CameraControl::with_speeds(
                DeltaQueue::default(),
                speeds,
            ))),
            hooks: Rc::new(RefCell::new(hooks)),
        }
    }

    /// Start listening on `canvas`. Does nothing if already attached.
    pub fn attach(&self, canvas: HtmlCanvasElement) -> Result<()> {
        let mut control = self.control.borrow_mut();
        if control.is_attached() {
            return Ok(());
        }

        let weak = Rc::downgrade(&self.control);
        let hooks = self.hooks.clone();
        let dispatch: Dispatch = Rc::new(move |event| dispatch_event(&weak, &hooks, event));
        control.attach(CanvasSurface::new(canvas, dispatch)?);
        Ok(())
    }

    pub fn detach(&self) {
        self.control.borrow_mut().detach();
    }

    pub fn is_attached(&self) -> bool {
        self.control.borrow().is_attached()
    }

    pub fn is_dragging(&self) -> bool {
        self.control.borrow().is_dragging()
    }

    pub fn speeds(&self) -> ControlSpeeds {
        *self.control.borrow().speeds()
    }

    pub fn update_speeds(&self, f: impl FnOnce(&mut ControlSpeeds)) {
        f(self.control.borrow_mut().speeds_mut());
    }

    pub fn hooks(&self) -> &Rc<RefCell<H>> {
        &self.hooks
    }
}

fn dispatch_event<H: CameraHooks>(
    control: &Weak<RefCell<CameraControl<DeltaQueue, CanvasSurface>>>,
    hooks: &RefCell<H>,
    event: InputEvent,
) -> Disposition {
    let Some(control) = control.upgrade() else {
        return Disposition::PassThrough;
    };

    let (disposition, deltas) = {
        let Ok(mut guard) = control.try_borrow_mut() else {
            log::warn!("dropping re-entrant {} event", event.kind().name());
            return Disposition::PassThrough;
        };
        let disposition = guard.handle(&event);
        let deltas: Vec<_> = guard.hooks_mut().drain().collect();
        (disposition, deltas)
    };

    if !deltas.is_empty() {
        match hooks.try_borrow_mut() {
            Ok(mut hooks) => deltas.into_iter().for_each(|delta| hooks.apply(delta)),
            Err(_) => log::warn!("camera hooks busy, dropping {} deltas", deltas.len()),
        }
    }
    disposition
}

/// JavaScript callbacks, settable while the control is live
#[derive(Default)]
struct JsCallbacks {
    on_pan: RefCell<Option<Function>>,
    on_rotate: RefCell<Option<Function>>,
    on_zoom: RefCell<Option<Function>>,
}

/// Hooks that forward to JavaScript callbacks
#[derive(Clone, Default)]
pub struct JsHooks(Rc<JsCallbacks>);

fn call_hook(name: &str, slot: &RefCell<Option<Function>>, args: &[f64]) {
    // Clone out so the callback may replace itself
    let Some(hook) = slot.borrow().clone() else {
        return;
    };
    let result = match args {
        [a] => hook.call1(&JsValue::NULL, &JsValue::from_f64(*a)),
        [a, b] => hook.call2(&JsValue::NULL, &JsValue::from_f64(*a), &JsValue::from_f64(*b)),
        _ => hook.call0(&JsValue::NULL),
    };
    if let Err(err) = result {
        log::error!("{} callback threw: {:?}", name, err);
    }
}

impl CameraHooks for JsHooks {
    fn on_pan(&mut self, dx: f64, dy: f64) {
        call_hook("onPan", &self.0.on_pan, &[dx, dy]);
    }

    fn on_rotate(&mut self, dx: f64, dy: f64) {
        call_hook("onRotate", &self.0.on_rotate, &[dx, dy]);
    }

    fn on_zoom(&mut self, factor: f64) {
        call_hook("onZoom", &self.0.on_zoom, &[factor]);
    }
}

/// JavaScript-facing orbit camera control.
///
/// ```js
/// const control = new CameraControl();
/// control.onRotate = (dx, dy) => { ... };
/// control.attach(canvas);
/// ```
#[wasm_bindgen(js_name = CameraControl)]
pub struct WebCameraControl {
    control: CanvasCameraControl<JsHooks>,
    callbacks: JsHooks,
}

#[wasm_bindgen(js_class = CameraControl)]
impl WebCameraControl {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebCameraControl {
        let callbacks = JsHooks::default();
        WebCameraControl {
            control: CanvasCameraControl::new(callbacks.clone()),
            callbacks,
        }
    }

    pub fn attach(&self, canvas: HtmlCanvasElement) -> Result<()> {
        self.control.attach(canvas)
    }

    pub fn detach(&self) {
        self.control.detach();
    }

    #[wasm_bindgen(getter = isAttached)]
    pub fn is_attached(&self) -> bool {
        self.control.is_attached()
    }

    #[wasm_bindgen(getter = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.control.is_dragging()
    }

    #[wasm_bindgen(getter = panSpeed)]
    pub fn pan_speed(&self) -> f64 {
        self.control.speeds().pan_speed
    }

    #[wasm_bindgen(setter = panSpeed)]
    pub fn set_pan_speed(&self, value: f64) {
        self.control.update_speeds(|speeds| speeds.pan_speed = value);
    }

    #[wasm_bindgen(getter = zoomSpeed)]
    pub fn zoom_speed(&self) -> f64 {
        self.control.speeds().zoom_speed
    }

    #[wasm_bindgen(setter = zoomSpeed)]
    pub fn set_zoom_speed(&self, value: f64) {
        self.control.update_speeds(|speeds| speeds.zoom_speed = value);
    }

    #[wasm_bindgen(getter = rotateSpeed)]
    pub fn rotate_speed(&self) -> f64 {
        self.control.speeds().rotate_speed
    }

    #[wasm_bindgen(setter = rotateSpeed)]
    pub fn set_rotate_speed(&self, value: f64) {
        self.control.update_speeds(|speeds| speeds.rotate_speed = value);
    }

    #[wasm_bindgen(setter = onPan)]
    pub fn set_on_pan(&self, callback: Option<Function>) {
        *self.callbacks.0.on_pan.borrow_mut() = callback;
    }

    #[wasm_bindgen(setter = onRotate)]
    pub fn set_on_rotate(&self, callback: Option<Function>) {
        *self.callbacks.0.on_rotate.borrow_mut() = callback;
    }

    #[wasm_bindgen(setter = onZoom)]
    pub fn set_on_zoom(&self, callback: Option<Function>) {
        *self.callbacks.0.on_zoom.borrow_mut() = callback;
    }
}

impl Default for WebCameraControl {
    fn default() -> Self {
        Self::new()
    }
}
