//! Scene state shared by the demo binaries: meshes, camera and engine state,
//! frame timing, uniform layout, textures and configuration.
//!
//! Everything here is plain CPU data built on `aphrodite-math`; GPU resources
//! live in `aphrodite-render-wgpu`.

pub mod clock;
pub mod config;
pub mod image;
pub mod input;
pub mod mesh;
pub mod perf;
pub mod state;
pub mod uniforms;

pub use clock::FrameClock;
pub use config::{ConfigError, DemoConfig, SceneKind};
pub use image::{Rgba8Image, mip_level_count};
pub use input::{CameraController, MoveKey};
pub use mesh::{Mesh, Vertex};
pub use perf::PerformanceStats;
pub use state::{CameraState, EngineState};
pub use uniforms::TransformUniforms;
