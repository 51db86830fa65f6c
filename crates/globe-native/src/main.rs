use std::f32::consts::TAU;
use std::time::Instant;

use wgpu::util::DeviceExt;
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use glam::Vec3;
use globe_core::{
    demo_routes, lat_lon_to_vec3, ArcEngine, Camera, DotPosition, EngineParams, GlobeSpin, Rgb,
    Ring, RingEmitter, DASH_SIZE, DOT_RADIUS_FACTOR, GAP_SIZE, MAX_RINGS,
};

const GRID_STEP_DEG: i32 = 15;
const GRID_SEGMENTS: usize = 64;
const GRID_COLOR: [f32; 4] = [0.12, 0.16, 0.22, 1.0];
const RING_SEGMENTS: usize = 48;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    camera_right: [f32; 4],
    camera_up: [f32; 4],
    dash: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LineVertex {
    pos: [f32; 3],
    // x: dash coordinate (cumulative length + offset), y: dashed flag
    dash: [f32; 2],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct DotInstance {
    center: [f32; 3],
    scale: f32,
    color: [f32; 3],
    _pad: f32,
}

/// All animation state owned by the viewer; ticked once per frame.
struct Scene {
    engine: ArcEngine,
    spin: GlobeSpin,
    rings: RingEmitter,
    anchors: Vec<(Vec3, Rgb)>,
    // Cumulative world length along each arc's polyline, cached alongside it
    arc_lengths: Vec<Vec<f32>>,
    dots: Vec<DotPosition>,
}

impl Scene {
    fn new(engine: ArcEngine, seed: u64) -> Self {
        let anchors = engine.arcs.iter().map(|a| (a.end, a.color)).collect();
        let arc_lengths = engine
            .arcs
            .iter()
            .map(|a| cumulative_lengths(&a.points))
            .collect();
        let rings = RingEmitter::new(engine.params.radius, seed);
        Self {
            engine,
            spin: GlobeSpin::default(),
            rings,
            anchors,
            arc_lengths,
            dots: Vec::new(),
        }
    }

    fn dot_capacity(&self) -> usize {
        self.engine.arcs.iter().map(|a| a.dot_count()).sum()
    }

    fn dynamic_line_capacity(&self) -> usize {
        let arc_verts: usize = self
            .engine
            .arcs
            .iter()
            .map(|a| (a.points.len().saturating_sub(1)) * 2)
            .sum();
        arc_verts + MAX_RINGS * RING_SEGMENTS * 2
    }
}

fn cumulative_lengths(points: &[Vec3]) -> Vec<f32> {
    let mut total = 0.0;
    let mut out = Vec::with_capacity(points.len());
    out.push(0.0);
    for pair in points.windows(2) {
        total += (pair[1] - pair[0]).length();
        out.push(total);
    }
    out
}

/// Latitude/longitude grid standing in for the textured sphere mesh.
fn build_graticule(radius: f32) -> Vec<LineVertex> {
    let mut verts = Vec::new();
    let mut push_polyline = |points: &[Vec3]| {
        for pair in points.windows(2) {
            for p in pair {
                verts.push(LineVertex {
                    pos: p.to_array(),
                    dash: [0.0, 0.0],
                    color: GRID_COLOR,
                });
            }
        }
    };

    // Parallels, skipping the poles themselves
    let mut lat = -90 + GRID_STEP_DEG;
    while lat < 90 {
        let points: Vec<Vec3> = (0..=GRID_SEGMENTS)
            .map(|i| {
                let lon = -180.0 + 360.0 * i as f32 / GRID_SEGMENTS as f32;
                lat_lon_to_vec3(lat as f32, lon, radius)
            })
            .collect();
        push_polyline(&points);
        lat += GRID_STEP_DEG;
    }

    // Meridians, pole to pole
    let mut lon = -180;
    while lon < 180 {
        let points: Vec<Vec3> = (0..=GRID_SEGMENTS)
            .map(|i| {
                let lat = -90.0 + 180.0 * i as f32 / GRID_SEGMENTS as f32;
                lat_lon_to_vec3(lat, lon as f32, radius)
            })
            .collect();
        push_polyline(&points);
        lon += GRID_STEP_DEG;
    }

    verts
}

fn ring_vertices(ring: &Ring, out: &mut Vec<LineVertex>) {
    let normal = ring.center.normalize_or_zero();
    if normal == Vec3::ZERO {
        return;
    }
    let helper = if normal.y.abs() < 0.99 { Vec3::Y } else { Vec3::X };
    let t1 = normal.cross(helper).normalize();
    let t2 = normal.cross(t1);
    let color = [ring.color.r, ring.color.g, ring.color.b, ring.alpha()];
    let mut prev = ring.center + t1 * ring.radius;
    for i in 1..=RING_SEGMENTS {
        let angle = TAU * i as f32 / RING_SEGMENTS as f32;
        let next = ring.center + (t1 * angle.cos() + t2 * angle.sin()) * ring.radius;
        out.push(LineVertex {
            pos: prev.to_array(),
            dash: [0.0, 0.0],
            color,
        });
        out.push(LineVertex {
            pos: next.to_array(),
            dash: [0.0, 0.0],
            color,
        });
        prev = next;
    }
}

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    line_pipeline: wgpu::RenderPipeline,
    dot_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    static_line_vb: wgpu::Buffer,
    static_line_count: u32,
    dynamic_line_vb: wgpu::Buffer,
    quad_vb: wgpu::Buffer,
    dot_instance_vb: wgpu::Buffer,
    line_scratch: Vec<LineVertex>,
    width: u32,
    height: u32,
    start: Instant,
    last_frame: Instant,
    scene: Scene,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window, scene: Scene) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene"),
            source: wgpu::ShaderSource::Wgsl(globe_core::SCENE_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let graticule = build_graticule(scene.engine.params.radius);
        let static_line_count = graticule.len() as u32;
        let static_line_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("graticule_vb"),
            contents: bytemuck::cast_slice(&graticule),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let dynamic_line_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("arc_line_vb"),
            size: (std::mem::size_of::<LineVertex>() * scene.dynamic_line_capacity()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Quad vertices for two triangles
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let dot_instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("dot_instance_vb"),
            size: (std::mem::size_of::<DotInstance>() * scene.dot_capacity().max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let line_vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 12,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 20,
                    shader_location: 2,
                },
            ],
        };

        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_line"),
                buffers: &[line_vertex_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_line"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let dot_vertex_buffers = [
            // slot 0: quad corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: per-dot instance data
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<DotInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 12,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 16,
                        shader_location: 3,
                    },
                ],
            },
        ];
        let dot_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("dot_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_dot"),
                buffers: &dot_vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_dot"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let now = Instant::now();
        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            line_pipeline,
            dot_pipeline,
            uniform_buffer,
            bind_group,
            static_line_vb,
            static_line_count,
            dynamic_line_vb,
            quad_vb,
            dot_instance_vb,
            line_scratch: Vec::new(),
            width: size.width.max(1),
            height: size.height.max(1),
            start: now,
            last_frame: now,
            scene,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn uniforms(&self) -> Uniforms {
        let aspect = self.width as f32 / self.height as f32;
        let camera = Camera::front(aspect).orbited(self.scene.spin.angle);
        let forward = (camera.target - camera.eye).normalize();
        let right = forward.cross(camera.up).normalize();
        let up = right.cross(forward);
        Uniforms {
            view_proj: (camera.projection_matrix() * camera.view_matrix()).to_cols_array_2d(),
            camera_right: right.extend(0.0).to_array(),
            camera_up: up.extend(0.0).to_array(),
            dash: [DASH_SIZE, GAP_SIZE, 0.0, 0.0],
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;
        let now_sec = self.start.elapsed().as_secs_f64();

        // Single-threaded frame tick: spin, arcs, rings
        let Scene {
            engine,
            spin,
            rings,
            anchors,
            arc_lengths,
            dots,
        } = &mut self.scene;
        spin.tick(dt);
        dots.clear();
        engine.tick(dt, now_sec, dots);
        rings.tick(dt, now_sec, anchors);

        // Rebuild the dynamic line vertices: dashed arcs plus ring pulses
        self.line_scratch.clear();
        for (arc, lengths) in engine.arcs.iter().zip(arc_lengths.iter()) {
            let color = [arc.color.r, arc.color.g, arc.color.b, 1.0];
            for seg in 0..arc.points.len().saturating_sub(1) {
                for i in [seg, seg + 1] {
                    self.line_scratch.push(LineVertex {
                        pos: arc.points[i].to_array(),
                        dash: [lengths[i] + arc.dash_offset, 1.0],
                        color,
                    });
                }
            }
        }
        for ring in &rings.rings {
            ring_vertices(ring, &mut self.line_scratch);
        }
        let dynamic_line_count = self.line_scratch.len() as u32;

        let dot_scale = 2.0 * DOT_RADIUS_FACTOR * engine.params.radius;
        let instances: Vec<DotInstance> = dots
            .iter()
            .map(|d| DotInstance {
                center: d.position.to_array(),
                scale: dot_scale,
                color: engine.arcs[d.arc_index].color.to_array(),
                _pad: 0.0,
            })
            .collect();

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let uniforms = self.uniforms();
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        self.queue
            .write_buffer(&self.dynamic_line_vb, 0, bytemuck::cast_slice(&self.line_scratch));
        self.queue
            .write_buffer(&self.dot_instance_vb, 0, bytemuck::cast_slice(&instances));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.02,
                            g: 0.02,
                            b: 0.04,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.line_pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.static_line_vb.slice(..));
            rpass.draw(0..self.static_line_count, 0..1);
            rpass.set_vertex_buffer(0, self.dynamic_line_vb.slice(..));
            rpass.draw(0..dynamic_line_count, 0..1);

            rpass.set_pipeline(&self.dot_pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.dot_instance_vb.slice(..));
            rpass.draw(0..6, 0..instances.len() as u32);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Demo scene: the built-in catalog at the page-level animation speeds
    let params = EngineParams {
        dash_speed: 0.8,
        dot_speed: 0.4,
        ..EngineParams::default()
    };
    let engine = ArcEngine::new(demo_routes(), params);
    log::info!(
        "[scene] arcs={} radius={:.1}",
        engine.arcs.len(),
        engine.params.radius
    );
    let scene = Scene::new(engine, 42);

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("arcglobe (native)")
        .build(&event_loop)
        .expect("window");

    let mut state = pollster::block_on(GpuState::new(&window, scene)).expect("gpu");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => state.resize(size),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => elwt.exit(),
            Event::AboutToWait => match state.render() {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            },
            _ => {}
        })
        .unwrap();
}
