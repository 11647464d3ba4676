use anyhow::{Context, Result};
use clap::Parser;
use glam::{UVec2, Vec2};
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use slicer::camera::{InputDeltas, OrbitCamera};
use slicer::cli::Cli;
use slicer::mesh::SliceMesh;
use slicer::project::project_frame;
use slicer::renderer::SliceRenderer;

// === Constants ===

const FPS_UPDATE_INTERVAL: f32 = 1.0;
const INITIAL_WINDOW_WIDTH: u32 = 500;
const INITIAL_WINDOW_HEIGHT: u32 = 500;

// === Application ===

struct App {
    image: image::RgbaImage,
    mesh: SliceMesh,
    camera: OrbitCamera,
    window: Option<Arc<Window>>,
    renderer: Option<SliceRenderer>,
    /// Input collected since the last frame, drained by `advance`
    deltas: InputDeltas,
    dragging: bool,
    last_cursor: Option<Vec2>,
    last_frame_time: Instant,
    frame_count: u32,
    fps_update_timer: f32,
}

impl App {
    fn new(image: image::RgbaImage, mesh: SliceMesh) -> Self {
        Self {
            image,
            mesh,
            camera: OrbitCamera::new(),
            window: None,
            renderer: None,
            deltas: InputDeltas::default(),
            dragging: false,
            last_cursor: None,
            last_frame_time: Instant::now(),
            frame_count: 0,
            fps_update_timer: 0.0,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            log::info!(
                "FPS: {:.1}",
                self.frame_count as f32 / self.fps_update_timer
            );
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        self.update_fps(dt);

        let deltas = std::mem::take(&mut self.deltas);
        self.camera.advance(&deltas, dt);

        let Some(renderer) = &mut self.renderer else {
            return;
        };

        let size = renderer.size();
        let viewport = Vec2::new(size.width as f32, size.height as f32);
        let winding = project_frame(&self.camera, viewport, &mut self.mesh);

        match renderer.render(&self.mesh, winding) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("frame dropped: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Slicer")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(SliceRenderer::new(
            window.clone(),
            &self.image,
            &self.mesh,
        )) {
            Ok(r) => r,
            Err(e) => {
                log::error!("failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.last_frame_time = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed()
                    && !event.repeat
                    && event.physical_key == PhysicalKey::Code(KeyCode::Space)
                {
                    self.deltas.toggle_spin = true;
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = state.is_pressed();
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                if self.dragging {
                    if let Some(last) = self.last_cursor {
                        self.deltas.drag += position - last;
                    }
                }
                self.last_cursor = Some(position);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.deltas.wheel += match delta {
                    MouseScrollDelta::LineDelta(_, y) => y as i32,
                    MouseScrollDelta::PixelDelta(pos) => pos.y.signum() as i32,
                };
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let image = image::open(&cli.file)
        .with_context(|| format!("failed to open image {}", cli.file.display()))?
        .to_rgba8();
    let image_size = UVec2::new(image.width(), image.height());
    let slice_size = cli.slice_size(image.width());

    // CapacityOverflow is structural, caught here before any rendering
    let mesh = SliceMesh::build(cli.copies as usize, slice_size, image_size)
        .context("failed to build slice mesh")?;
    if mesh.slice_count == 0 {
        log::warn!(
            "no {}x{} slice fits inside the {}x{} image, showing an empty scene",
            slice_size.x,
            slice_size.y,
            image_size.x,
            image_size.y
        );
    }

    log::info!("Slicer - drag to orbit, wheel to zoom, Space toggles spin, Escape quits");

    let event_loop = EventLoop::new()?;
    let mut app = App::new(image, mesh);
    event_loop.run_app(&mut app)?;

    Ok(())
}
