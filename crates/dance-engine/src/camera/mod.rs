//! Camera path and per-frame transform.
//!
//! The camera never reacts to input. Its position is a pure function of two
//! accumulators (`t`, `h`) held in [`CameraState`], mapped through the path curve in
//! [`path`] and composed into a single [`Transform`] by [`ViewProjection`].

pub mod path;
mod state;
mod transform;
mod view_projection;

pub use path::PathShape;
pub use state::CameraState;
pub use transform::{Transform, TransformUniform};
pub use view_projection::ViewProjection;
