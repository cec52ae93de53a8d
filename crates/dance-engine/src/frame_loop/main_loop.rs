use crate::camera::{CameraState, Transform, ViewProjection};
use crate::core::{App, FrameCtx, LoopState};
use crate::error::Result;
use crate::input::InputPoll;
use crate::render::{DrawCommands, GraphicsApi, Scene, WgpuApi, dispatcher};
use crate::time::FrameClock;

use super::config::LoopConfig;
use super::host::FrameHost;

/// Transform for the current state, and the state for the next frame.
pub fn step_camera(camera: CameraState, view: &ViewProjection, step: f64) -> (Transform, CameraState) {
    (view.build(camera), camera.advanced(step))
}

/// Drives the animation: one transform, one draw of the whole scene, one present
/// and one termination poll per iteration.
pub struct MainLoop<A: GraphicsApi> {
    scene: Scene<A>,
    view: ViewProjection,
    camera: CameraState,
    config: LoopConfig,
    state: LoopState,
    frames: u64,
}

impl<A: GraphicsApi> MainLoop<A> {
    pub fn new(scene: Scene<A>, view: ViewProjection, camera: CameraState, config: LoopConfig) -> Self {
        log::info!(
            "scene ready: {} meshes, {} vertices",
            scene.len(),
            scene.vertex_count()
        );
        Self {
            scene,
            view,
            camera,
            config,
            state: LoopState::Running,
            frames: 0,
        }
    }

    /// Computes the transform, advances the camera, then clears, draws and presents.
    ///
    /// Does nothing once terminated. A host error terminates the loop and is returned.
    pub fn render_frame<H>(&mut self, host: &mut H, dt: f64) -> Result<()>
    where
        H: FrameHost<Api = A> + ?Sized,
    {
        if self.state == LoopState::Terminated {
            return Ok(());
        }

        let step = self.config.step.step_for(dt);
        let rendered = self.camera;
        let (transform, next) = step_camera(rendered, &self.view, step);
        self.camera = next;

        let scene = &self.scene;
        let presented = host.render(self.config.clear_color, &mut |cmds: &mut dyn DrawCommands<A>| {
            dispatcher::draw_scene(cmds, scene, &transform)
        });
        if let Err(err) = presented {
            self.state = LoopState::Terminated;
            return Err(err);
        }

        if let Some(line) = self.frame_trace(rendered) {
            log::trace!("{line}");
        }
        self.frames += 1;
        Ok(())
    }

    /// Trace line for the frame about to be counted, when one is due.
    fn frame_trace(&self, rendered: CameraState) -> Option<String> {
        let every = self.config.trace_every;
        if every == 0 || self.frames % every != 0 {
            return None;
        }
        let eye = self.view.eye(rendered);
        Some(format!(
            "frame {}: t={:.4} h={:.4} eye=({:.3}, {:.3}, {:.3})",
            self.frames, rendered.t, rendered.h, eye.x, eye.y, eye.z
        ))
    }

    /// Applies a termination poll. `Terminated` is final.
    pub fn poll(&mut self, poll: InputPoll) -> LoopState {
        if self.state == LoopState::Running && poll.should_terminate() {
            let reason = if poll.quit_key_pressed {
                "quit key pressed"
            } else {
                "window close requested"
            };
            log::info!("terminating after {} frames: {reason}", self.frames);
            self.state = LoopState::Terminated;
        }
        self.state
    }

    /// One full iteration for hosts that poll on their own.
    pub fn iterate<H>(&mut self, host: &mut H, dt: f64) -> Result<LoopState>
    where
        H: FrameHost<Api = A> + ?Sized,
    {
        self.render_frame(host, dt)?;
        let poll = host.poll_input();
        Ok(self.poll(poll))
    }

    /// Iterates until terminated, timing frames with `clock`.
    pub fn run<H>(&mut self, host: &mut H, clock: &mut FrameClock) -> Result<()>
    where
        H: FrameHost<Api = A> + ?Sized,
    {
        while self.state == LoopState::Running {
            let dt = clock.tick().dt;
            self.iterate(host, dt)?;
        }
        Ok(())
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn camera(&self) -> CameraState {
        self.camera
    }

    /// Frames handed to the host so far. A frame the surface skipped still counts,
    /// and the camera advanced for it.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl App for MainLoop<WgpuApi> {
    fn on_input(&mut self, poll: InputPoll) -> LoopState {
        self.poll(poll)
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<LoopState> {
        let dt = ctx.time.dt;
        self.iterate(ctx, dt)
    }

    fn on_exit(&mut self) {
        log::info!("releasing {} meshes", self.scene.len());
    }
}
