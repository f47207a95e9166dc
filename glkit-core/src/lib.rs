//! glkit core - input handling and geometry shared by every host
//!
//! This library holds the platform-independent pieces: the pointer-driven
//! orbit camera control, client-space point extraction, procedural primitive
//! geometry and an orbit camera model that consumes the control's deltas.

pub mod control;
pub mod geometry;
pub mod point;
pub mod projection;
pub mod surface;

// Re-export commonly used types
pub use control::{
    CameraControl, CameraDelta, CameraHooks, ControlSpeeds, DeltaQueue, Disposition,
    DragState,
};
pub use geometry::{Attribute, Geometry};
pub use point::{client_point, local_point, Button, InputEvent, Point, Rect};
pub use projection::{to_radians, OrbitCamera, ProjectionMode};
pub use surface::{point_at, EventKind, InputSurface, Scope};
