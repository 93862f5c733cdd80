//! wgpu implementation of [`RenderSurface`].
//!
//! The scene graph only holds CPU data. When its revision changes the
//! [`GpuRenderer`] uploads every distinct mesh and material once and groups mesh
//! nodes into [`Instanced`] batches sharing one instance buffer. Opaque batches
//! are drawn first, transparent ones afterwards, back to front.

use std::{collections::HashMap, iter, sync::Arc};

use cgmath::{InnerSpace, Vector3};
use log::{debug, warn};
use wgpu::util::DeviceExt;

use crate::{
    camera::{Camera, CameraUniform, Projection},
    context::GpuContext,
    data_structures::{
        instance::{Instance, InstanceRaw},
        model::{Material, MeshData, Shading},
        scene_graph::{NodeKind, SceneGraph},
        texture::{self, Texture},
    },
    error::SceneError,
    host::RenderSurface,
    pipelines::{
        basic::mk_basic_pipeline,
        light::{self, LightUniform},
        transparent::mk_transparent_pipeline,
        uniform_layout,
    },
    viewport::ViewportSize,
};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    color: [f32; 4],
    specular: [f32; 4],
}

impl From<&Material> for MaterialUniform {
    fn from(material: &Material) -> Self {
        let (strength, shininess) = match material.shading {
            Shading::Lambert => (0.0, 1.0),
            Shading::Phong {
                shininess,
                specular,
            } => (specular, shininess),
        };
        let [r, g, b] = material.color;
        Self {
            color: [r, g, b, material.opacity],
            specular: [strength, shininess, 0.0, 0.0],
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    num_elements: u32,
}

struct GpuMaterial {
    bind_group: wgpu::BindGroup,
    // keeps the uniform alive as long as the bind group
    _uniform: wgpu::Buffer,
}

/// One draw call: a mesh/material pair and all world transforms it appears with.
pub struct Instanced {
    mesh: usize,
    material: usize,
    instance: wgpu::Buffer,
    amount: u32,
    /// World position of the first instance, used to order transparent batches.
    anchor: Vector3<f32>,
}

struct UploadedScene {
    revision: u64,
    meshes: Vec<GpuMesh>,
    materials: Vec<GpuMaterial>,
    opaque: Vec<Instanced>,
    transparent: Vec<Instanced>,
}

pub struct GpuRenderer {
    gpu: GpuContext,
    surface: Option<wgpu::Surface<'static>>,
    config: wgpu::SurfaceConfiguration,
    clear_colour: wgpu::Color,
    depth_texture: Texture,
    blank: Texture,
    material_layout: wgpu::BindGroupLayout,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    light_buffer: wgpu::Buffer,
    light_bind_group: wgpu::BindGroup,
    basic_pipeline: wgpu::RenderPipeline,
    transparent_pipeline: wgpu::RenderPipeline,
    uploaded: Option<UploadedScene>,
}

impl GpuRenderer {
    pub fn new(
        gpu: GpuContext,
        size: ViewportSize,
        clear_colour: wgpu::Color,
    ) -> Result<Self, SceneError> {
        let (surface, config) = gpu
            .create_surface(size.width, size.height)
            .map_err(|e| SceneError::RenderTarget(format!("{e:#}")))?;
        let device = &gpu.device;

        let depth_texture =
            Texture::create_depth_texture(device, [config.width, config.height], "depth_texture");
        let blank = Texture::create_blank(device, &gpu.queue);
        let material_layout = texture::material_layout(device);

        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_layout = uniform_layout(device, "camera_bind_group_layout");
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let light_layout = uniform_layout(device, "light_bind_group_layout");
        let light_buffer = light::mk_buffer(device, LightUniform::default());
        let light_bind_group = light::mk_bind_group(device, &light_layout, &light_buffer);

        let basic_pipeline = mk_basic_pipeline(
            device,
            config.format,
            &material_layout,
            &camera_layout,
            &light_layout,
        );
        let transparent_pipeline = mk_transparent_pipeline(
            device,
            config.format,
            &material_layout,
            &camera_layout,
            &light_layout,
        );

        Ok(Self {
            surface: Some(surface),
            config,
            clear_colour,
            depth_texture,
            blank,
            material_layout,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            light_buffer,
            light_bind_group,
            basic_pipeline,
            transparent_pipeline,
            uploaded: None,
            gpu,
        })
    }

    pub fn is_released(&self) -> bool {
        self.surface.is_none()
    }

    /// Number of draw calls of the last uploaded scene.
    pub fn batch_count(&self) -> usize {
        self.uploaded
            .as_ref()
            .map_or(0, |scene| scene.opaque.len() + scene.transparent.len())
    }

    fn upload(&mut self, scene: &SceneGraph) {
        let device = &self.gpu.device;
        let mut mesh_ids: HashMap<*const MeshData, usize> = HashMap::new();
        let mut material_ids: HashMap<*const Material, usize> = HashMap::new();
        let mut meshes = Vec::new();
        let mut materials = Vec::new();
        let mut transparent_flags = Vec::new();
        let mut batches: HashMap<(usize, usize), Vec<Instance>> = HashMap::new();
        let mut order = Vec::new();

        scene.walk(&mut |node| {
            let NodeKind::Mesh { mesh, material } = node.kind() else {
                return;
            };
            if mesh.indices.is_empty() {
                return;
            }
            let mesh_id = *mesh_ids.entry(Arc::as_ptr(mesh)).or_insert_with(|| {
                meshes.push(upload_mesh(device, node.name(), mesh));
                meshes.len() - 1
            });
            let material_id = *material_ids.entry(Arc::as_ptr(material)).or_insert_with(|| {
                materials.push(upload_material(
                    device,
                    &self.gpu.queue,
                    &self.material_layout,
                    &self.blank,
                    material,
                ));
                transparent_flags.push(material.is_transparent());
                materials.len() - 1
            });
            let instances = batches.entry((mesh_id, material_id)).or_default();
            if instances.is_empty() {
                order.push((mesh_id, material_id));
            }
            instances.push(node.get_world_transform().clone());
        });

        let mut opaque = Vec::new();
        let mut transparent = Vec::new();
        for key in order {
            let Some(instances) = batches.remove(&key) else {
                continue;
            };
            let (mesh, material) = key;
            if transparent_flags[material] {
                // sorted per frame, so every transparent node gets its own batch
                for instance in instances {
                    transparent.push(instanced(device, mesh, material, &[instance]));
                }
            } else {
                opaque.push(instanced(device, mesh, material, &instances));
            }
        }

        self.gpu.queue.write_buffer(
            &self.light_buffer,
            0,
            bytemuck::cast_slice(&[LightUniform::from_scene(scene)]),
        );
        debug!(
            "Uploaded revision {}: {} meshes, {} materials, {} opaque and {} transparent batches",
            scene.revision(),
            meshes.len(),
            materials.len(),
            opaque.len(),
            transparent.len()
        );
        self.uploaded = Some(UploadedScene {
            revision: scene.revision(),
            meshes,
            materials,
            opaque,
            transparent,
        });
    }
}

fn upload_mesh(device: &wgpu::Device, name: &str, mesh: &MeshData) -> GpuMesh {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{name} Vertex Buffer")),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{name} Index Buffer")),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    GpuMesh {
        vertex_buffer,
        index_buffer,
        num_elements: mesh.indices.len() as u32,
    }
}

fn upload_material(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    blank: &Texture,
    material: &Material,
) -> GpuMaterial {
    let uniform = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{} Material Buffer", material.name)),
        contents: bytemuck::cast_slice(&[MaterialUniform::from(material)]),
        usage: wgpu::BufferUsages::UNIFORM,
    });
    let texture = material
        .texture
        .as_ref()
        .map(|rgba| Texture::from_rgba(device, queue, rgba, Some(&material.name)));
    let texture = texture.as_ref().unwrap_or(blank);
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: uniform.as_entire_binding(),
            },
        ],
        label: Some(&material.name),
    });
    GpuMaterial {
        bind_group,
        _uniform: uniform,
    }
}

fn instanced(
    device: &wgpu::Device,
    mesh: usize,
    material: usize,
    instances: &[Instance],
) -> Instanced {
    let raw = instances.iter().map(Instance::to_raw).collect::<Vec<InstanceRaw>>();
    let instance = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Instance Buffer"),
        contents: bytemuck::cast_slice(&raw),
        usage: wgpu::BufferUsages::VERTEX,
    });
    Instanced {
        mesh,
        material,
        instance,
        amount: instances.len() as u32,
        anchor: instances
            .first()
            .map_or(Vector3::new(0.0, 0.0, 0.0), |i| i.position),
    }
}

fn draw(render_pass: &mut wgpu::RenderPass<'_>, scene: &UploadedScene, batch: &Instanced) {
    let mesh = &scene.meshes[batch.mesh];
    render_pass.set_bind_group(0, &scene.materials[batch.material].bind_group, &[]);
    render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
    render_pass.set_vertex_buffer(1, batch.instance.slice(..));
    render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    render_pass.draw_indexed(0..mesh.num_elements, 0, 0..batch.amount);
}

impl RenderSurface for GpuRenderer {
    fn size(&self) -> ViewportSize {
        ViewportSize::new(self.config.width, self.config.height)
    }

    fn resize(&mut self, size: ViewportSize) {
        if size.is_empty() {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        if let Some(surface) = self.surface.as_ref() {
            surface.configure(&self.gpu.device, &self.config);
        }
        self.depth_texture = Texture::create_depth_texture(
            &self.gpu.device,
            [self.config.width, self.config.height],
            "depth_texture",
        );
    }

    fn render(
        &mut self,
        scene: &SceneGraph,
        camera: &Camera,
        projection: &Projection,
    ) -> Result<(), SceneError> {
        if self.surface.is_none() {
            return Err(SceneError::RenderTarget("surface was released".to_string()));
        }
        if self.uploaded.as_ref().map(|s| s.revision) != Some(scene.revision()) {
            self.upload(scene);
        }
        self.camera_uniform.update_view_proj(camera, projection);
        self.gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );

        let (Some(surface), Some(uploaded)) = (self.surface.as_ref(), self.uploaded.as_ref()) else {
            return Ok(());
        };
        let output = match surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output)
            | wgpu::CurrentSurfaceTexture::Suboptimal(output) => output,
            // Reconfigure the surface if it's lost or outdated, the next frame picks it up
            wgpu::CurrentSurfaceTexture::Lost | wgpu::CurrentSurfaceTexture::Outdated => {
                warn!("Surface lost or outdated, reconfiguring");
                surface.configure(&self.gpu.device, &self.config);
                return Ok(());
            }
            e => return Err(SceneError::RenderTarget(format!("{e:?}"))),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let eye = Vector3::new(camera.position().x, camera.position().y, camera.position().z);
        let mut transparent: Vec<&Instanced> = uploaded.transparent.iter().collect();
        transparent.sort_by(|a, b| {
            let da = (a.anchor - eye).magnitude2();
            let db = (b.anchor - eye).magnitude2();
            db.total_cmp(&da)
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                ..Default::default()
            });
            render_pass.set_bind_group(1, &self.camera_bind_group, &[]);
            render_pass.set_bind_group(2, &self.light_bind_group, &[]);

            render_pass.set_pipeline(&self.basic_pipeline);
            for batch in &uploaded.opaque {
                draw(&mut render_pass, uploaded, batch);
            }
            render_pass.set_pipeline(&self.transparent_pipeline);
            for batch in transparent {
                draw(&mut render_pass, uploaded, batch);
            }
        }

        self.gpu.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn release(&mut self) -> Result<(), SceneError> {
        self.uploaded = None;
        match self.surface.take() {
            Some(surface) => {
                drop(surface);
                debug!("Released render surface");
                Ok(())
            }
            None => Err(SceneError::teardown(
                "render surface",
                "surface was already released",
            )),
        }
    }
}
