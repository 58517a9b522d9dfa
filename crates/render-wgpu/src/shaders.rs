/// WGSL shader for textured meshes.
///
/// Binding 0 holds the projection-view-model matrix and binding 3 the texture
/// coordinate multiplier; both live in the same 512-byte uniform buffer.
pub const BASIC_SHADER: &str = r#"
@group(0) @binding(0)
var<uniform> pvm: mat4x4<f32>;

@group(0) @binding(1)
var base_texture: texture_2d<f32>;

@group(0) @binding(2)
var base_sampler: sampler;

@group(0) @binding(3)
var<uniform> texture_multiplier: vec2<f32>;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = pvm * vec4<f32>(vertex.position, 1.0);
    out.normal = vertex.normal;
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let color = textureSample(base_texture, base_sampler, in.uv * texture_multiplier);
    let light_dir = normalize(vec3<f32>(0.3, 1.0, 0.5));
    let ambient = 0.4;
    let diffuse = max(dot(normalize(in.normal), light_dir), 0.0);
    let lighting = ambient + diffuse * 0.6;
    return vec4<f32>(color.rgb * lighting, color.a);
}
"#;
