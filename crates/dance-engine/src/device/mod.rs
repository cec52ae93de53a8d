//! GPU device + surface management.
//!
//! [`Gpu`] creates the wgpu device for the window, keeps the surface and the
//! multisampled color target configured, and hands out one [`GpuFrame`] per
//! presented image.

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
