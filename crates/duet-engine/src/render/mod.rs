//! GPU rendering subsystem.
//!
//! Renderers issue GPU commands via wgpu into a per-frame target. Each
//! renderer is responsible for its own GPU resources (pipelines, buffers).

mod ctx;

pub use ctx::{RenderCtx, RenderTarget};
