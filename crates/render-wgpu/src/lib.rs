//! wgpu render backend for the Aphrodite demos.
//!
//! Draws one indexed, textured mesh per frame with a projection-view-model
//! transform supplied by the caller.
//!
//! # Invariants
//! - The renderer never computes transforms; it uploads what `aphrodite-math` produced.
//! - Depth is cleared to 0 and tested with `GreaterEqual`.
//! - Resizing destroys the previous depth texture before allocating a new one.

mod context;
mod error;
mod gpu;
mod shaders;
mod timer;

pub use context::GpuContext;
pub use error::RenderError;
pub use gpu::{BasicRenderPipeline, MeshBuffers};
pub use timer::GpuTimer;
