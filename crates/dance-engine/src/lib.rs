//! Dance engine crate.
//!
//! A camera travelling along an epitrochoid around additively blended triangle
//! meshes. The crate owns the platform and GPU runtime (`window`, `device`, `input`,
//! `time`), the rendering seam (`render`), the camera math (`camera`) and the loop
//! that ties them together (`frame_loop`).

pub mod camera;
pub mod core;
pub mod device;
pub mod error;
pub mod frame_loop;
pub mod input;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;
