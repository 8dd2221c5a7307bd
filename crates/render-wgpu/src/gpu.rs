use std::collections::BTreeMap;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use tinyengine_assets::{AssetId, Material, Mesh};
use tinyengine_render::{Camera, Lighting, MAX_LIGHTS, RenderError, Renderer};
use wgpu::util::DeviceExt;

use crate::batch::{FrameBatch, InstanceData, Pass};
use crate::shaders;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const INITIAL_INSTANCES: u64 = 1024;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
    2 => Float32x2,
];
const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4,
    7 => Float32x4,
];

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct GpuLight {
    /// Direction the light travels, `w` unused.
    direction: [f32; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    lights: [GpuLight; MAX_LIGHTS],
    ambient: [f32; 4],
}

impl Uniforms {
    fn new(view_proj: Mat4, lighting: &Lighting) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            lights: lighting.lights.map(|l| GpuLight {
                direction: l.direction.extend(0.0).to_array(),
                color: l.color.to_array(),
            }),
            ambient: lighting.ambient.to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct GpuVertex {
    position: [f32; 3],
    normal: [f32; 3],
    uv: [f32; 2],
}

struct GpuPart {
    index_buffer: wgpu::Buffer,
    index_count: u32,
    base_vertex: i32,
}

/// Device-side copy of one mesh. Empty parts have no buffer.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    parts: Vec<Option<GpuPart>>,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, mesh: &Mesh) -> Self {
        let vertices: Vec<GpuVertex> = mesh
            .vertices
            .iter()
            .map(|v| GpuVertex {
                position: v.position.to_array(),
                normal: v.normal.to_array(),
                uv: v.uv.to_array(),
            })
            .collect();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} vertices", mesh.name)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let parts = mesh
            .parts
            .iter()
            .map(|part| {
                if part.indices.is_empty() {
                    return None;
                }
                let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} indices", mesh.name)),
                    contents: bytemuck::cast_slice(&part.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                Some(GpuPart {
                    index_buffer,
                    index_count: part.indices.len() as u32,
                    base_vertex: part.base_vertex as i32,
                })
            })
            .collect();

        Self {
            vertex_buffer,
            parts,
        }
    }
}

/// wgpu-backed [`Renderer`] drawing into a window surface.
pub struct WgpuRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    lit_pipeline: wgpu::RenderPipeline,
    sky_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    instance_capacity: u64,
    depth_view: wgpu::TextureView,
    meshes: BTreeMap<AssetId, GpuMesh>,
    batch: FrameBatch,
    lighting: Lighting,
    frames: u64,
}

impl WgpuRenderer {
    /// Bring up a device for `target` and configure its surface.
    pub fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(target)
            .map_err(|e| RenderError::Surface(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(RenderError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("tinyengine_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| RenderError::Device(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or_else(|| RenderError::Surface("surface reports no formats".into()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::new(Mat4::IDENTITY, &Lighting::default())),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::MESH_SHADER.into()),
        });

        let lit_pipeline = create_pipeline(&device, &pipeline_layout, &shader, format, Pass::Lit);
        let sky_pipeline = create_pipeline(&device, &pipeline_layout, &shader, format, Pass::Sky);

        let instance_buffer = create_instance_buffer(&device, INITIAL_INSTANCES);
        let depth_view = create_depth_texture(&device, config.width, config.height);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            ?format,
            width = config.width,
            height = config.height,
            "GPU initialized"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            lit_pipeline,
            sky_pipeline,
            uniform_buffer,
            uniform_bind_group,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCES,
            depth_view,
            meshes: BTreeMap::new(),
            batch: FrameBatch::new(),
            lighting: Lighting::default(),
            frames: 0,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Meshes with buffers resident on the device.
    pub fn cached_meshes(&self) -> usize {
        self.meshes.len()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    fn reserve_instances(&mut self, count: usize) {
        let needed = count as u64;
        if needed <= self.instance_capacity {
            return;
        }
        let capacity = needed.next_power_of_two();
        tracing::debug!(from = self.instance_capacity, to = capacity, "growing instance buffer");
        self.instance_buffer = create_instance_buffer(&self.device, capacity);
        self.instance_capacity = capacity;
    }
}

impl Renderer for WgpuRenderer {
    fn clear(&mut self) {
        self.batch.clear();
    }

    fn draw_mesh(
        &mut self,
        mesh: &Mesh,
        materials: &[Arc<Material>],
        camera: &dyn Camera,
        world: Mat4,
    ) {
        if !self.meshes.contains_key(&mesh.id) {
            tracing::debug!(mesh = %mesh.name, id = %mesh.id, "uploading mesh");
            self.meshes.insert(mesh.id, GpuMesh::upload(&self.device, mesh));
        }
        self.batch.push(mesh, materials, camera, world);
    }

    fn present(&mut self) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                tracing::debug!("surface reconfigured, frame dropped");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "surface error, frame dropped");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::new(self.batch.view_proj(), &self.lighting)),
        );

        let (instances, ranges) = self.batch.flatten();
        self.reserve_instances(instances.len());
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let clear = self.lighting.clear_color;
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.x as f64,
                            g: clear.y as f64,
                            b: clear.z as f64,
                            a: clear.w as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            let mut current = None;
            for (key, range) in ranges {
                let Some(mesh) = self.meshes.get(&key.mesh) else {
                    continue;
                };
                let Some(part) = mesh.parts.get(key.part).and_then(Option::as_ref) else {
                    continue;
                };
                if current != Some(key.pass) {
                    pass.set_pipeline(match key.pass {
                        Pass::Sky => &self.sky_pipeline,
                        Pass::Lit => &self.lit_pipeline,
                    });
                    current = Some(key.pass);
                }
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(part.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..part.index_count, part.base_vertex, range);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.frames += 1;
        tracing::trace!(
            frame = self.frames,
            draws = self.batch.draws(),
            instances = instances.len(),
            "frame presented"
        );
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_texture(&self.device, width, height);
        tracing::debug!(width, height, "surface resized");
    }

    fn set_lighting(&mut self, lighting: Lighting) {
        self.lighting = lighting;
    }
}

/// Sky parts are unlit, double-sided and leave depth untouched so every
/// later draw lands in front of them.
fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    pass: Pass,
) -> wgpu::RenderPipeline {
    let (label, fragment, cull_mode, depth_write_enabled) = match pass {
        Pass::Sky => ("sky_pipeline", "fs_sky", None, false),
        Pass::Lit => ("lit_pipeline", "fs_lit", Some(wgpu::Face::Back), true),
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<GpuVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRIBUTES,
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<InstanceData>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &INSTANCE_ATTRIBUTES,
                },
            ],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fragment),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}

fn create_instance_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instance_buffer"),
        size: capacity * std::mem::size_of::<InstanceData>() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};
    use tinyengine_render::DirectionalLight;

    #[test]
    fn uniforms_match_wgsl_layout() {
        // mat4 + three (vec4, vec4) lights + ambient vec4
        assert_eq!(std::mem::size_of::<Uniforms>(), 64 + 3 * 32 + 16);
    }

    #[test]
    fn uniforms_carry_lighting() {
        let mut lighting = Lighting::default();
        lighting.lights[2] = DirectionalLight::new(Vec3::new(0.0, 0.0, 2.0), Vec4::new(1.0, 0.0, 1.0, 1.0));
        lighting.ambient = Vec4::new(0.1, 0.1, 0.2, 0.5);

        let u = Uniforms::new(Mat4::IDENTITY, &lighting);
        assert_eq!(u.lights[2].direction, [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(u.lights[2].color, [1.0, 0.0, 1.0, 1.0]);
        assert_eq!(u.lights[1].color, [0.0; 4]);
        assert_eq!(u.ambient, [0.1, 0.1, 0.2, 0.5]);
        assert_eq!(u.view_proj, Mat4::IDENTITY.to_cols_array_2d());
    }
}
