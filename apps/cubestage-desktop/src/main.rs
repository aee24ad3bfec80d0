mod panel_ui;

use anyhow::{Context, Result};
use clap::Parser;
use cubestage_author::{Demo, DemoOptions};
use cubestage_input::{PointerButton, PointerEvent, PointerTracker};
use cubestage_render::Container;
use cubestage_render_wgpu::WgpuRenderer;
use egui::Context as EguiContext;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "cubestage-desktop", about = "Three cubes, two lights and a control panel")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in logical pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value = "720")]
    height: u32,

    /// Keep the camera gliding after orbit input stops
    #[arg(long)]
    damping: bool,

    /// MSAA sample count (1 disables antialiasing)
    #[arg(long, default_value = "4")]
    msaa: u32,
}

/// The window, seen as the demo's container: logical size plus scale factor.
struct WindowHost<'a>(&'a Window);

impl WindowHost<'_> {
    fn logical_size(&self) -> LogicalSize<u32> {
        self.0.inner_size().to_logical(self.0.scale_factor())
    }
}

impl Container for WindowHost<'_> {
    fn client_width(&self) -> u32 {
        self.logical_size().width
    }

    fn client_height(&self) -> u32 {
        self.logical_size().height
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.0.scale_factor()
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

fn wheel_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(p) => p.y.signum() as f32,
    }
}

/// Everything that exists only once the GPU is up.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    options: DemoOptions,
    initial_size: LogicalSize<u32>,
    msaa: u32,
    demo: Option<Demo>,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    pointer: PointerTracker,
    last_cursor: Option<PhysicalPosition<f64>>,
    show_panel: bool,
}

impl GpuApp {
    fn new(cli: &Cli) -> Self {
        Self {
            options: DemoOptions {
                damping: cli.damping,
            },
            initial_size: LogicalSize::new(cli.width, cli.height),
            msaa: cli.msaa,
            demo: None,
            gpu: None,
            egui_ctx: EguiContext::default(),
            pointer: PointerTracker::new(),
            last_cursor: None,
            show_panel: true,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("cubestage")
            .with_inner_size(self.initial_size);
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let demo = Demo::new(&WindowHost(&window), self.options)?;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no suitable GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("cubestage_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let sample_count = if adapter
            .get_texture_format_features(surface_format)
            .flags
            .sample_count_supported(self.msaa)
        {
            self.msaa
        } else {
            tracing::warn!("msaa x{} unsupported for {surface_format:?}, using x1", self.msaa);
            1
        };

        let (width, height) = demo.viewport.drawing_buffer_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(
            &device,
            surface_format,
            width,
            height,
            sample_count,
            &demo.scene,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend, {width}x{height} msaa x{sample_count}",
            adapter.get_info().backend.to_str()
        );

        window.request_redraw();
        self.demo = Some(demo);
        self.gpu = Some(Gpu {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        });
        Ok(())
    }

    fn handle_resize(&mut self) {
        let (Some(demo), Some(gpu)) = (&mut self.demo, &mut self.gpu) else {
            return;
        };
        if !demo.resize(&WindowHost(&gpu.window)) {
            return;
        }
        let (width, height) = demo.viewport.drawing_buffer_size();
        gpu.config.width = width;
        gpu.config.height = height;
        gpu.surface.configure(&gpu.device, &gpu.config);
        gpu.renderer.resize(&gpu.device, width, height);
    }

    fn handle_pointer(&mut self, event: PointerEvent) {
        let Some(demo) = &mut self.demo else {
            return;
        };
        if let Some(action) = self.pointer.handle(event) {
            demo.orbit(action);
            if let Some(gpu) = &self.gpu {
                gpu.window.request_redraw();
            }
        }
    }

    fn redraw(&mut self) {
        let (Some(demo), Some(gpu)) = (&mut self.demo, &mut self.gpu) else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                gpu.window.request_redraw();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let renderer = &mut gpu.renderer;
        let (device, queue) = (&gpu.device, &gpu.queue);
        let next = demo.frame(|scene, camera| {
            renderer.render(device, queue, &view, scene, camera);
        });

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let show_panel = self.show_panel;
        let mut edits = Vec::new();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if !show_panel {
                return;
            }
            egui::SidePanel::right("controls")
                .default_width(260.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        edits = panel_ui::draw_panel(ui, &demo.panel);
                        ui.separator();
                        ui.small("F1: Toggle panel | LMB: Orbit | RMB: Pan | Wheel: Zoom");
                    });
                });
        });
        for (id, value) in edits {
            if let Err(e) = demo.panel.set(id, value, &mut demo.scene) {
                tracing::warn!("control update rejected: {e}");
            }
        }

        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);
        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        gpu.egui_renderer.update_buffers(
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
                        view: &view,
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
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        if next {
            gpu.window.request_redraw();
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("startup failed: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.repaint {
                gpu.window.request_redraw();
            }
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                if let Some(demo) = &mut self.demo {
                    demo.dispose();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.handle_resize();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::F1),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.show_panel = !self.show_panel;
                if let Some(gpu) = &self.gpu {
                    gpu.window.request_redraw();
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = pointer_button(button) {
                    let event = match state {
                        ElementState::Pressed => PointerEvent::Pressed(button),
                        ElementState::Released => PointerEvent::Released(button),
                    };
                    self.handle_pointer(event);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let previous = self.last_cursor.replace(position);
                let scale = self
                    .gpu
                    .as_ref()
                    .map(|gpu| gpu.window.scale_factor())
                    .unwrap_or(1.0);
                if let Some(previous) = previous {
                    self.handle_pointer(PointerEvent::Moved {
                        dx: ((position.x - previous.x) / scale) as f32,
                        dy: ((position.y - previous.y) / scale) as f32,
                    });
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.last_cursor = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.handle_pointer(PointerEvent::Wheel(wheel_lines(delta)));
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("cubestage-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = GpuApp::new(&cli);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_buttons_map_to_orbit_buttons() {
        assert_eq!(pointer_button(MouseButton::Left), Some(PointerButton::Primary));
        assert_eq!(pointer_button(MouseButton::Right), Some(PointerButton::Secondary));
        assert_eq!(pointer_button(MouseButton::Middle), Some(PointerButton::Middle));
        assert_eq!(pointer_button(MouseButton::Back), None);
    }

    #[test]
    fn wheel_uses_line_delta_or_pixel_direction() {
        assert_eq!(wheel_lines(MouseScrollDelta::LineDelta(0.0, 2.0)), 2.0);
        assert_eq!(
            wheel_lines(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0))),
            -1.0
        );
    }
}
