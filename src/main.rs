//! Colview - live collision viewer host loop

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use colview::core::{error::Error, logging, time::FrameTimer};
use colview::extract::{ExtractConfig, FrameResult, Session};
use colview::memory::{DolphinMemory, MemoryView};
use colview::render::{GpuContext, ScenePipeline};

/// How often to retry attaching while no target is present
const ATTACH_RETRY: Duration = Duration::from_secs(2);

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    pipeline: Option<ScenePipeline>,
    session: Option<Session<DolphinMemory>>,
    config: ExtractConfig,
    timer: FrameTimer,
    last_attach_attempt: Option<Instant>,
    /// Last status line shown to the operator; transitions are logged once
    status: String,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            pipeline: None,
            session: None,
            config: ExtractConfig::default(),
            timer: FrameTimer::new(),
            last_attach_attempt: None,
            status: String::new(),
        }
    }

    fn set_status(&mut self, status: &str) {
        if self.status != status {
            log::info!("{status}");
            self.status = status.to_string();
        }
        if let Some(window) = &self.window {
            window.set_title(&format!("Collision Viewer - {status}"));
        }
    }

    /// Periodically try to attach while no session exists
    fn try_attach(&mut self) {
        let due = self
            .last_attach_attempt
            .is_none_or(|t| t.elapsed() >= ATTACH_RETRY);
        if !due {
            return;
        }
        self.last_attach_attempt = Some(Instant::now());

        let mem = match DolphinMemory::attach() {
            Ok(mem) => mem,
            Err(_) => {
                self.set_status("emulator not found");
                return;
            }
        };
        match Session::attach(mem, self.config) {
            Ok(session) => {
                self.session = Some(session);
                self.set_status("ready");
            }
            Err(Error::WrongGame) => self.set_status("running game is not the expected one"),
            Err(Error::UnknownRevision(fp)) => {
                self.set_status(&format!("unknown game revision {fp:#04x}"));
            }
            Err(e) => self.set_status(&format!("attach failed: {e}")),
        }
    }

    /// One extraction pass. Failures only clear this frame's geometry; the
    /// display loop itself never stops because the target went away.
    fn extract(&mut self) {
        if self.session.is_none() {
            self.try_attach();
        }

        let lost = self
            .session
            .as_ref()
            .is_some_and(|s| !s.mem().is_attached());
        if lost {
            self.session = None;
            if let Some(pipeline) = &mut self.pipeline {
                pipeline.clear_scene();
            }
            self.set_status("target process exited");
            return;
        }

        let (Some(session), Some(gpu), Some(pipeline)) =
            (&self.session, &self.gpu, &mut self.pipeline)
        else {
            return;
        };

        match session.extract_frame(gpu.aspect()) {
            Ok(FrameResult::Frame(frame)) => {
                pipeline.upload(
                    &gpu.device,
                    &gpu.queue,
                    frame.proj,
                    frame.view,
                    &frame.triangles,
                );
            }
            Ok(FrameResult::Skipped) => pipeline.clear_scene(),
            Err(e) => {
                log::debug!("extraction abandoned this frame: {e}");
                pipeline.clear_scene();
            }
        }
    }

    fn render(&mut self) {
        let (Some(gpu), Some(pipeline)) = (&self.gpu, &self.pipeline) else {
            return;
        };
        let frame = match gpu.get_current_texture() {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("surface unavailable: {e}");
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        pipeline.draw(&mut encoder, &view);
        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Collision Viewer")
            .with_inner_size(PhysicalSize::new(800, 600));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        let gpu = pollster::block_on(GpuContext::new(window.clone()))
            .expect("Failed to create GPU context");
        let (width, height) = gpu.size();
        let pipeline = ScenePipeline::new(&gpu.device, gpu.format(), width, height);

        log::info!("Window created: {width}x{height}");
        log::info!("GPU: {}", gpu.adapter.get_info().name);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.pipeline = Some(pipeline);
        self.set_status("waiting for emulator");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed()
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
                if let (Some(gpu), Some(pipeline)) = (&self.gpu, &mut self.pipeline) {
                    pipeline.resize(&gpu.device, size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.timer.tick();
                self.extract();
                self.render();

                if let Some(w) = &self.window {
                    w.request_redraw();
                }
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

fn main() {
    logging::init();
    log::info!("Collision viewer starting...");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
