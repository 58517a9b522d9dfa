#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    UnsupportedSurface,
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("texture upload needs at least one image")]
    EmptyMipChain,
}
