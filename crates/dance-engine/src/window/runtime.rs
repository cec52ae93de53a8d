use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, FrameCtx, LoopState};
use crate::device::{Gpu, GpuInit};
use crate::error::GraphicsError;
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputPoll, InputState, Key};
use crate::render::WgpuFactory;
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Key that ends the animation.
    pub quit_key: Key,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Dance of Triangles".to_string(),
            initial_size: LogicalSize::new(1200.0, 1200.0),
            quit_key: Key::Escape,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, builds the app against its GPU, and runs until the app
    /// terminates or fails.
    ///
    /// `build` runs once, after the GPU is ready and before the first frame. The app
    /// is dropped before the GPU context and the window.
    pub fn run<A, F>(config: RuntimeConfig, gpu_init: GpuInit, build: F) -> Result<()>
    where
        A: App + 'static,
        F: FnOnce(&mut WgpuFactory<'_>) -> Result<A>,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, build);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.shutdown();
        match state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,
    close_requested: bool,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A, F> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    build: Option<F>,

    app: Option<A>,
    window: Option<WindowEntry>,

    error: Option<anyhow::Error>,
    shut_down: bool,
}

impl<A, F> AppState<A, F>
where
    A: App + 'static,
    F: FnOnce(&mut WgpuFactory<'_>) -> Result<A>,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, build: F) -> Self {
        Self {
            config,
            gpu_init,
            build: Some(build),
            app: None,
            window: None,
            error: None,
            shut_down: false,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| GraphicsError::Initialization(format!("failed to create window: {e}")))?;

        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            close_requested: false,
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .map_err(|e| anyhow::Error::new(GraphicsError::Initialization(format!("{e:#}"))))
            },
        }
        .try_build()?;

        Ok(entry)
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let entry = self.create_window_entry(event_loop)?;

        let build = self
            .build
            .take()
            .context("application was already built")?;
        let app = {
            let mut factory = entry.borrow_gpu().resource_factory();
            build(&mut factory).context("failed to build the scene")?
        };

        entry.borrow_window().request_redraw();
        self.window = Some(entry);
        self.app = Some(app);
        Ok(())
    }

    /// Stores the first fatal error and stops the event loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.shutdown();
        event_loop.exit();
    }

    /// Releases the app, then the GPU context and window. Runs once.
    fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        if let Some(mut app) = self.app.take() {
            app.on_exit();
            drop(app);
        }
        if let Some(entry) = self.window.take() {
            drop(entry);
            log::debug!("released GPU context and window");
        }
    }
}

impl<A, F> ApplicationHandler for AppState<A, F>
where
    A: App + 'static,
    F: FnOnce(&mut WgpuFactory<'_>) -> Result<A>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.shut_down {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.shut_down {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; presentation paces the loop.
        if let Some(entry) = &self.window {
            entry.borrow_window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let quit_key = self.config.quit_key;

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (Some(app), Some(entry)) = (self.app.as_mut(), self.window.as_mut()) else {
            return;
        };
        if entry.borrow_window().id() != window_id {
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                entry.with_close_requested_mut(|c| *c = true);
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.borrow_window().request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.borrow_window().inner_size();
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.borrow_window().request_redraw();
            }

            _ => {}
        }

        let mut state = entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(&event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
            let poll = InputPoll::from_state(
                fields.input_state,
                fields.input_frame,
                quit_key,
                *fields.close_requested,
            );
            app.on_input(poll)
        });

        if state == LoopState::Running && matches!(event, WindowEvent::RedrawRequested) {
            let result = entry.with_mut(|fields| {
                let mut ctx = FrameCtx {
                    window: fields.window,
                    gpu: fields.gpu,
                    input: fields.input_state,
                    input_frame: fields.input_frame,
                    time: fields.clock.tick(),
                    quit_key,
                    close_requested: *fields.close_requested,
                };
                let result = app.on_frame(&mut ctx);

                // Per-frame deltas are consumed by the poll that ended the frame.
                fields.input_frame.clear();
                result
            });

            match result {
                Ok(s) => state = s,
                Err(e) => {
                    self.fail(event_loop, anyhow::Error::new(e).context("frame failed"));
                    return;
                }
            }
        }

        if state == LoopState::Terminated {
            self.shutdown();
            event_loop.exit();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
