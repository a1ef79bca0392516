use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use game_of_life::control::{Command, Controller, RunState};
use game_of_life::LifeConfig;

use crate::gpu::{GpuContext, GridBuffers, RenderPipeline};

/// Window, GPU resources and the controller that owns the grid
pub struct App {
    config: LifeConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    grid_buffers: Option<GridBuffers>,
    render_pipeline: Option<RenderPipeline>,
    controller: Controller,
    fps_counter: FpsCounter,
}

impl App {
    pub fn new(config: LifeConfig, controller: Controller) -> Self {
        Self {
            config,
            window: None,
            gpu: None,
            grid_buffers: None,
            render_pipeline: None,
            controller,
            fps_counter: FpsCounter::new(),
        }
    }

    /// Canvas extent in the same physical pixels as cursor positions
    fn canvas(&self) -> (f64, f64) {
        match &self.gpu {
            Some(gpu) => {
                let (w, h) = gpu.size();
                (w as f64, h as f64)
            }
            None => (
                self.config.canvas_width as f64,
                self.config.canvas_height as f64,
            ),
        }
    }

    fn render(&mut self) {
        let (Some(gpu), Some(buffers), Some(render)) = (
            self.gpu.as_ref(),
            self.grid_buffers.as_mut(),
            self.render_pipeline.as_ref(),
        ) else {
            return;
        };

        // Timing driver: step when the interval elapsed and not paused
        self.controller.tick(Instant::now());

        buffers.upload_cells(&gpu.queue, self.controller.grid());
        buffers.update_render_params(
            &gpu.queue,
            gpu.size(),
            &self.config.palette,
            gpu.format().is_srgb(),
        );

        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        let bind_group = render.create_bind_group(
            &gpu.device,
            &buffers.cell_buffer,
            &buffers.render_params_buffer,
        );
        render.draw(&mut encoder, &view, &bind_group);

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(fps) = self.fps_counter.tick() {
            if let Some(window) = &self.window {
                let grid = self.controller.grid();
                let state = match self.controller.state() {
                    RunState::Running => "Running",
                    RunState::Paused => "Paused",
                };
                window.set_title(&format!(
                    "Game of Life - Gen {} - {} alive - {} - {:.0} FPS",
                    grid.generation(),
                    grid.population(),
                    state,
                    fps
                ));
            }
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        let command = match key_code {
            KeyCode::KeyR => Command::Restart,
            KeyCode::Space => Command::TogglePause,
            KeyCode::KeyC => Command::Clear,
            _ => return,
        };
        self.controller.handle_command(command);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (grid_width, grid_height) = (
            self.controller.grid().width(),
            self.controller.grid().height(),
        );
        log::info!("Initializing Game of Life...");
        log::info!(
            "Canvas {}x{}, cell size {}, grid {}x{}",
            self.config.canvas_width,
            self.config.canvas_height,
            self.config.cell_size,
            grid_width,
            grid_height
        );

        let window_attrs = Window::default_attributes()
            .with_title("Game of Life")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.canvas_width,
                self.config.canvas_height,
            ))
            .with_resizable(false);

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()));

        let grid_buffers = GridBuffers::new(&gpu.device, grid_width, grid_height);
        let render_pipeline = RenderPipeline::new(&gpu.device, gpu.format());

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  R: Restart with random cells");
        log::info!("  Space: Pause/resume");
        log::info!("  C: Clear all cells");
        log::info!("  Left mouse (paused): Toggle cells");
        log::info!("  Escape: Quit");

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
        self.grid_buffers = Some(grid_buffers);
        self.render_pipeline = Some(render_pipeline);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let canvas = self.canvas();
                self.controller.pointer_moved((position.x, position.y), canvas);
            }
            WindowEvent::CursorLeft { .. } => {
                self.controller.pointer_left();
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    let canvas = self.canvas();
                    self.controller.pointer_pressed(canvas);
                }
                ElementState::Released => self.controller.pointer_released(),
            },
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Simple FPS counter
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Tick the counter, returns Some(fps) every second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}
