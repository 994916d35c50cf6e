//! SDF-based WebGPU surface
//!
//! Draw calls are recorded into CPU-side buffers between `clear` and
//! `present`; `present` uploads them and shades the whole frame in one
//! fullscreen fragment pass.

use std::borrow::Cow;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use wgpu::util::DeviceExt;

use super::surface::{Fill, Rect, Surface};
use crate::background::Image;

/// Initial circle capacity of the storage buffer (grows on demand)
const INITIAL_CIRCLE_CAPACITY: usize = 64;

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    resolution: [f32; 2], // offset 0
    scale: f32,           // offset 8
    circle_count: u32,    // offset 12
    image_rect: [f32; 4], // offset 16
    has_image: u32,       // offset 32
    _pad: [u32; 3],       // pad to 48 bytes
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct CircleData {
    center: [f32; 2],
    radius: f32,
    kind: u32, // 0 = solid, 1 = radial gradient
    focal: [f32; 2],
    _pad: [f32; 2],
    stop_offsets: [f32; 4],
    colors: [[f32; 4]; 3],
}

impl CircleData {
    fn new(center: Vec2, radius: f32, fill: &Fill) -> Self {
        let mut data = Self::zeroed();
        data.center = center.to_array();
        data.radius = radius;
        match fill {
            Fill::Solid(color) => {
                data.kind = 0;
                data.colors[0] = color.to_array();
            }
            Fill::Radial(gradient) => {
                data.kind = 1;
                data.focal = gradient.focal.to_array();
                for (i, stop) in gradient.stops.iter().enumerate() {
                    data.stop_offsets[i] = stop.offset;
                    data.colors[i] = stop.color.to_array();
                }
            }
        }
        data
    }
}

// ============================================================================
// SDF RENDER STATE
// ============================================================================

pub struct SdfRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,

    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    globals_buffer: wgpu::Buffer,
    circles_buffer: wgpu::Buffer,
    circle_capacity: usize,
    image_view: wgpu::TextureView,
    sampler: wgpu::Sampler,

    /// Physical pixel size
    pub size: (u32, u32),
    /// Physical pixels per logical unit
    scale: f32,

    // Per-frame recording
    circles: Vec<CircleData>,
    image_rect: Option<Rect>,
}

impl SdfRenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        scale: f32,
    ) -> Self {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("sdf-device"),
                required_features: wgpu::Features::empty(),
                // Downlevel baseline, but with the adapter's real texture size cap
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);

        // Colors are authored in sRGB like a 2D canvas, so write them as-is
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sdf_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("sdf_shader.wgsl").into()),
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&Globals::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let circles_buffer = Self::create_circles_buffer(&device, INITIAL_CIRCLE_CAPACITY);

        // 1x1 placeholder until a background is drawn
        let image_view = Self::create_image_texture(
            &device,
            &queue,
            &Image {
                width: 1,
                height: 1,
                pixels: vec![0, 0, 0, 0],
            },
        );

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("image_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sdf_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = Self::create_bind_group(
            &device,
            &bind_group_layout,
            &globals_buffer,
            &circles_buffer,
            &image_view,
            &sampler,
        );

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sdf_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sdf_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[], // No vertex buffers - fullscreen triangle
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            bind_group_layout,
            bind_group,
            globals_buffer,
            circles_buffer,
            circle_capacity: INITIAL_CIRCLE_CAPACITY,
            image_view,
            sampler,
            size: (width, height),
            scale,
            circles: Vec::with_capacity(INITIAL_CIRCLE_CAPACITY),
            image_rect: None,
        }
    }

    fn create_circles_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("circles"),
            size: (std::mem::size_of::<CircleData>() * capacity) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_image_texture(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &Image,
    ) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("background_image"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        globals_buffer: &wgpu::Buffer,
        circles_buffer: &wgpu::Buffer,
        image_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sdf_bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: circles_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(image_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    fn rebuild_bind_group(&mut self) {
        self.bind_group = Self::create_bind_group(
            &self.device,
            &self.bind_group_layout,
            &self.globals_buffer,
            &self.circles_buffer,
            &self.image_view,
            &self.sampler,
        );
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32, scale: f32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.scale = scale;
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Grow the storage buffer so the recorded circles fit
    fn ensure_capacity(&mut self) {
        if self.circles.len() <= self.circle_capacity {
            return;
        }
        let capacity = self.circles.len().next_power_of_two();
        log::info!("Growing circle buffer to {} entries", capacity);
        self.circles_buffer = Self::create_circles_buffer(&self.device, capacity);
        self.circle_capacity = capacity;
        self.rebuild_bind_group();
    }

    /// Upload recorded draws and render them
    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.ensure_capacity();

        let logical = self.size();
        let (image_rect, has_image) = match self.image_rect {
            Some(rect) => ([rect.origin.x, rect.origin.y, rect.size.x, rect.size.y], 1),
            None => ([0.0; 4], 0),
        };
        let globals = Globals {
            resolution: logical.to_array(),
            scale: self.scale,
            circle_count: self.circles.len() as u32,
            image_rect,
            has_image,
            _pad: [0; 3],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        if !self.circles.is_empty() {
            self.queue
                .write_buffer(&self.circles_buffer, 0, bytemuck::cast_slice(&self.circles));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sdf_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sdf_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl Surface for SdfRenderState {
    fn size(&self) -> Vec2 {
        Vec2::new(self.size.0 as f32, self.size.1 as f32) / self.scale
    }

    fn clear(&mut self) {
        self.circles.clear();
        self.image_rect = None;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &Fill) {
        self.circles.push(CircleData::new(center, radius, fill));
    }

    fn draw_image(&mut self, image: &Image, dest: Rect) {
        if image.width == 0 || image.height == 0 {
            return;
        }
        let max_dimension = self.device.limits().max_texture_dimension_2d;
        let image = image.downscaled(max_dimension);
        if image.width > max_dimension || image.height > max_dimension {
            log::error!(
                "Background {}x{} exceeds texture limit {}; skipped",
                image.width,
                image.height,
                max_dimension
            );
            return;
        }
        if let Cow::Owned(small) = &image {
            log::warn!(
                "Background downscaled to {}x{} to fit texture limit {}",
                small.width,
                small.height,
                max_dimension
            );
        }
        self.image_view = Self::create_image_texture(&self.device, &self.queue, &image);
        self.rebuild_bind_group();
        self.image_rect = Some(dest);
    }

    fn present(&mut self) {
        match self.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = self.size;
                self.resize(width, height, self.scale);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}
