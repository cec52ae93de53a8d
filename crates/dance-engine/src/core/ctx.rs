use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::error::{GraphicsError, Result};
use crate::frame_loop::FrameHost;
use crate::input::{InputFrame, InputPoll, InputState, Key};
use crate::render::{Color, DrawCommands, WgpuApi, WgpuCommands};
use crate::time::FrameTime;

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    pub quit_key: Key,
    pub close_requested: bool,
}

impl FrameHost for FrameCtx<'_, '_> {
    type Api = WgpuApi;

    /// Clears the target, records draws through `record`, then presents.
    ///
    /// Lost/outdated surfaces and timeouts skip the frame.
    fn render(
        &mut self,
        clear: Color,
        record: &mut dyn FnMut(&mut dyn DrawCommands<WgpuApi>),
    ) -> Result<()> {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let message = err.to_string();
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => Err(GraphicsError::SurfaceFatal(message)),
                    action => {
                        log::warn!("frame skipped: {message} ({action:?})");
                        Ok(())
                    }
                };
            }
        };

        // The pass borrows frame.encoder; dropped before submit() takes frame.
        {
            let (view, resolve_target, store) = match self.gpu.msaa_view() {
                Some(msaa) => (msaa, Some(&frame.view), wgpu::StoreOp::Discard),
                None => (&frame.view, None, wgpu::StoreOp::Store),
            };

            let pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("dance scene"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                        store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let mut cmds = WgpuCommands::new(pass, self.gpu.queue());
            record(&mut cmds);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);
        Ok(())
    }

    fn poll_input(&mut self) -> InputPoll {
        InputPoll::from_state(self.input, self.input_frame, self.quit_key, self.close_requested)
    }
}
