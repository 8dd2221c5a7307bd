/// WGSL shader for instanced mesh parts.
///
/// `fs_lit` sums three directional lights over an ambient term, each scaled
/// by its alpha as intensity; `fs_sky` passes the instance colour through
/// unlit.
pub const MESH_SHADER: &str = r#"
struct Light {
    direction: vec4<f32>,
    color: vec4<f32>,
};

struct Uniforms {
    view_proj: mat4x4<f32>,
    lights: array<Light, 3>,
    ambient: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct InstanceInput {
    @location(3) model_0: vec4<f32>,
    @location(4) model_1: vec4<f32>,
    @location(5) model_2: vec4<f32>,
    @location(6) model_3: vec4<f32>,
    @location(7) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) color: vec4<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_normal = normalize(world_normal);
    out.color = instance.color;
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_lit(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    var lighting = uniforms.ambient.rgb * uniforms.ambient.a;
    for (var i = 0u; i < 3u; i = i + 1u) {
        let light = uniforms.lights[i];
        let diffuse = max(dot(n, -light.direction.xyz), 0.0);
        lighting = lighting + light.color.rgb * light.color.a * diffuse;
    }
    return vec4<f32>(in.color.rgb * min(lighting, vec3<f32>(1.0)), in.color.a);
}

@fragment
fn fs_sky(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
