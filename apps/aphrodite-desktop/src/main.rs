use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use aphrodite_common::{DemoConfig, FrameClock, MoveKey, PerformanceStats, SceneKind};
use aphrodite_math::{Matrix4x4, Vector3, Vector4};
use aphrodite_render_wgpu::{BasicRenderPipeline, GpuContext, MeshBuffers};
use clap::Parser;
use egui::Context as EguiContext;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "aphrodite-desktop", about = "Aphrodite desktop demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML demo configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mesh to draw: triangle, quad, plane or cube
    #[arg(short, long)]
    scene: Option<SceneKind>,
}

const CHECKER_LIGHT: Vector4 = Vector4::new(1.0, 1.0, 1.0, 1.0);
const CHECKER_DARK: Vector4 = Vector4::new(0.35, 0.35, 0.4, 1.0);
/// Frames longer than this are clamped so a stall does not teleport the camera.
const MAX_FRAME_TIME: Duration = Duration::from_millis(100);

fn move_key(code: KeyCode) -> Option<MoveKey> {
    match code {
        KeyCode::KeyW => Some(MoveKey::Forward),
        KeyCode::KeyS => Some(MoveKey::Backward),
        KeyCode::KeyA => Some(MoveKey::Left),
        KeyCode::KeyD => Some(MoveKey::Right),
        _ => None,
    }
}

/// CPU-side demo state: everything the overlay edits and the frame reads.
struct AppState {
    config: DemoConfig,
    clock: FrameClock,
    perf: PerformanceStats,
    model_rotation: Vector3,
    show_overlay: bool,
    scene_changed: bool,
}

impl AppState {
    fn new(config: DemoConfig) -> Self {
        Self {
            config,
            clock: FrameClock::new(),
            perf: PerformanceStats::default(),
            model_rotation: Vector3::ZERO,
            show_overlay: true,
            scene_changed: false,
        }
    }

    fn update(&mut self, dt: Duration) {
        self.perf.update(dt);
        let dt = dt.min(MAX_FRAME_TIME);
        self.config
            .controller
            .update(&mut self.config.camera, dt);
        let spun = self.model_rotation + self.config.rotation_speed * dt.as_secs_f32();
        self.model_rotation.assign_from(&spun);
    }

    fn model(&self) -> Matrix4x4 {
        Matrix4x4::translation(self.config.model_position)
            * Matrix4x4::rotation_xyz(self.model_rotation)
    }

    /// `projection * view * model` for the current frame.
    fn pvm(&self, aspect_ratio: f32) -> Matrix4x4 {
        self.config.camera.view_projection(aspect_ratio) * self.model()
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        if let Some(key) = move_key(code) {
            self.config.controller.set_pressed(key, pressed);
            return;
        }
        if pressed && code == KeyCode::F1 {
            self.show_overlay = !self.show_overlay;
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_overlay {
            return;
        }

        egui::Window::new("Aphrodite")
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::CollapsingHeader::new("Engine")
                    .default_open(true)
                    .show(ui, |ui| self.engine_section(ui));
                egui::CollapsingHeader::new("Performance")
                    .default_open(true)
                    .show(ui, |ui| self.performance_section(ui));
                egui::CollapsingHeader::new("Main Camera")
                    .default_open(true)
                    .show(ui, |ui| self.camera_section(ui));
                ui.separator();
                ui.small("F1: Toggle Overlay | WASD: Move");
            });
    }

    fn engine_section(&mut self, ui: &mut egui::Ui) {
        let engine = &mut self.config.engine;
        let mut rgb = engine.clear_color.to_f32_array();
        ui.horizontal(|ui| {
            ui.label("Clear color");
            if ui.color_edit_button_rgb(&mut rgb).changed() {
                engine.set_clear_color(Vector3::from(rgb));
            }
            let [r, g, b] = engine.clear_color_rgb8();
            ui.monospace(format!("#{r:02x}{g:02x}{b:02x}"));
        });

        let mut scene = self.config.scene;
        egui::ComboBox::from_label("Scene")
            .selected_text(scene.name())
            .show_ui(ui, |ui| {
                for kind in SceneKind::ALL {
                    ui.selectable_value(&mut scene, kind, kind.name());
                }
            });
        if scene != self.config.scene {
            self.config.scene = scene;
            self.scene_changed = true;
        }

        let multiplier = &mut self.config.texture_multiplier;
        ui.horizontal(|ui| {
            ui.label("Texture multiplier");
            ui.add(egui::DragValue::new(&mut multiplier.x).range(0.1..=64.0).speed(0.1));
            ui.add(egui::DragValue::new(&mut multiplier.y).range(0.1..=64.0).speed(0.1));
        });
    }

    fn performance_section(&mut self, ui: &mut egui::Ui) {
        let perf = &mut self.perf;
        ui.label(format!("ms: {:.6}", perf.ms));
        ui.label(format!("fps: {:.6}", perf.fps));
        ui.label(format!("render pass ms: {:.6}", perf.render_pass_ms));
        ui.horizontal(|ui| {
            ui.label("delay");
            ui.add(egui::DragValue::new(&mut perf.delay_ms).range(0.0..=10_000.0).suffix(" ms"));
        });
    }

    fn camera_section(&mut self, ui: &mut egui::Ui) {
        let camera = &mut self.config.camera;
        vector_row(ui, "Position", &mut camera.position, -10.0..=10.0, 0.01);
        vector_row(
            ui,
            "Rotation",
            &mut camera.rotation,
            -std::f32::consts::TAU..=std::f32::consts::TAU,
            0.01,
        );
        ui.add(egui::Slider::new(&mut camera.fovy, 0.1..=3.0).text("fovy"));
    }
}

fn vector_row(
    ui: &mut egui::Ui,
    label: &str,
    v: &mut Vector3,
    range: std::ops::RangeInclusive<f32>,
    speed: f64,
) {
    ui.label(label);
    ui.horizontal(|ui| {
        for (prefix, c) in [("X: ", &mut v.x), ("Y: ", &mut v.y), ("Z: ", &mut v.z)] {
            ui.add(
                egui::DragValue::new(c)
                    .prefix(prefix)
                    .range(range.clone())
                    .speed(speed),
            );
        }
    });
}

/// GPU resources that exist once the window does.
struct Graphics {
    ctx: GpuContext,
    pipeline: BasicRenderPipeline,
    mesh: MeshBuffers,
    bind_group: wgpu::BindGroup,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Graphics {
    fn new(window: &Arc<Window>, egui_ctx: &EguiContext, config: &DemoConfig) -> Result<Self> {
        let size = window.inner_size();
        let ctx = pollster::block_on(GpuContext::new(window.clone(), size.width, size.height))?;

        let pipeline = BasicRenderPipeline::new(&ctx);
        let mesh = pipeline.create_mesh_buffers(&ctx.device, &config.scene.mesh());
        let texture =
            pipeline.create_checkerboard_texture(&ctx.device, &ctx.queue, CHECKER_LIGHT, CHECKER_DARK)?;
        let sampler = pipeline.create_default_sampler(&ctx.device, config.anisotropy);
        let bind_group = pipeline.create_bind_group(&ctx.device, &texture, &sampler);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.format(), None, 1, false);

        Ok(Self {
            ctx,
            pipeline,
            mesh,
            bind_group,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if self.ctx.resize(size.width, size.height) {
            let (width, height) = self.ctx.size();
            self.pipeline.resize(&self.ctx.device, width, height);
        }
    }

    fn draw_overlay(
        &mut self,
        window: &Window,
        egui_ctx: &EguiContext,
        view: &wgpu::TextureView,
        state: &mut AppState,
    ) {
        let device = &self.ctx.device;
        let queue = &self.ctx.queue;

        let raw_input = self.egui_winit.take_egui_input(window);
        let full_output = egui_ctx.run(raw_input, |ctx| state.draw_ui(ctx));
        self.egui_winit
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = self.ctx.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        self.egui_renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    gfx: Option<Graphics>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(config: DemoConfig) -> Self {
        Self {
            state: AppState::new(config),
            window: None,
            gfx: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gfx)) = (&self.window, &mut self.gfx) else {
            return;
        };

        let dt = self.state.clock.tick();
        self.state.update(dt);

        if std::mem::take(&mut self.state.scene_changed) {
            let mesh = self.state.config.scene.mesh();
            gfx.mesh = gfx.pipeline.create_mesh_buffers(&gfx.ctx.device, &mesh);
            tracing::info!(scene = %self.state.config.scene, "scene switched");
        }

        let frame = match gfx.ctx.acquire() {
            Ok(Some(frame)) => frame,
            Ok(None) => return,
            Err(e) => {
                tracing::error!("giving up on surface: {e}");
                event_loop.exit();
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let pvm = self.state.pvm(gfx.ctx.aspect_ratio());
        gfx.pipeline.set_pvm(&gfx.ctx.queue, &pvm);
        gfx.pipeline
            .set_texture_multiplier(&gfx.ctx.queue, self.state.config.texture_multiplier);

        let clear = self.state.config.engine.clear_rgba();
        if let Some(ms) = gfx.pipeline.render(
            &gfx.ctx.device,
            &gfx.ctx.queue,
            &view,
            clear,
            &gfx.mesh,
            &gfx.bind_group,
        ) {
            self.state.perf.add_render_pass_ms(ms);
        }

        gfx.draw_overlay(window, &self.egui_ctx, &view, &mut self.state);

        frame.present();
        window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Aphrodite")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match Graphics::new(&window, &self.egui_ctx, &self.state.config) {
            Ok(gfx) => self.gfx = Some(gfx),
            Err(e) => {
                tracing::error!("failed to initialize graphics: {e:#}");
                event_loop.exit();
                return;
            }
        }
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(window), Some(gfx)) = (&self.window, &mut self.gfx) {
            let response = gfx.egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gfx) = &mut self.gfx {
                    gfx.resize(new_size);
                }
            }
            WindowEvent::Focused(false) => {
                self.state.config.controller.release_all();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn load_config(cli: &Cli) -> Result<DemoConfig> {
    let mut config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    if let Some(scene) = cli.scene {
        config.scene = scene;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config = load_config(&cli)?;
    tracing::info!(scene = %config.scene, "aphrodite-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
