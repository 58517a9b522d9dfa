use aphrodite_math::{Matrix4x4, Vector2, Vector4};
use bytemuck::{Pod, Zeroable};

/// CPU mirror of the per-draw uniform buffer.
///
/// The vertex stage reads the projection-view-model matrix at offset 0 and the
/// fragment stage reads the texture coordinate multiplier at offset 256, the
/// minimum uniform buffer offset alignment wgpu guarantees.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TransformUniforms {
    pub pvm: Matrix4x4,
    _pad0: [Vector4; 12],
    pub texture_multiplier: Vector2,
    _pad1: [Vector2; 31],
}

impl Default for TransformUniforms {
    fn default() -> Self {
        Self {
            pvm: Matrix4x4::IDENTITY,
            _pad0: [Vector4::ZERO; 12],
            texture_multiplier: Vector2::new(1.0, 1.0),
            _pad1: [Vector2::ZERO; 31],
        }
    }
}

impl TransformUniforms {
    pub const PVM_OFFSET: u64 = 0;
    pub const PVM_SIZE: u64 = Matrix4x4::BYTE_LEN as u64;
    pub const MULTIPLIER_OFFSET: u64 = 256;
    pub const MULTIPLIER_SIZE: u64 = std::mem::size_of::<Vector2>() as u64;
    pub const SIZE: u64 = 512;

    pub fn set_pvm(&mut self, pvm: &Matrix4x4) {
        self.pvm.assign_from(pvm);
    }

    pub fn set_texture_multiplier(&mut self, multiplier: Vector2) {
        self.texture_multiplier.assign_from(&multiplier);
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn pvm_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.pvm)
    }

    pub fn multiplier_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.texture_multiplier)
    }
}
