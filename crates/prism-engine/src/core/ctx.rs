use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::render::{GpuResources, RenderCtx, RenderTarget, WgpuBackend};
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

use super::app::AppControl;
use super::scheduler::FrameScheduler;

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl WindowCtx<'_> {
    /// Logical window size, the basis for projection aspect ratios.
    pub fn viewport(&self) -> Viewport {
        let phys = self.window.inner_size();
        let logical: winit::dpi::LogicalSize<f64> = phys.to_logical(self.window.scale_factor());
        Viewport::new(logical.width as f32, logical.height as f32)
    }
}

/// Context passed to `App::on_init`: the window and its freshly created GPU.
pub struct InitCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a Gpu<'w>,
}

impl InitCtx<'_, '_> {
    /// Backend for creating buffers and programs into `resources`.
    pub fn backend<'s>(&'s self, resources: &'s mut GpuResources) -> WgpuBackend<'s> {
        let ctx = RenderCtx::new(
            self.gpu.device(),
            self.gpu.queue(),
            self.gpu.surface_format(),
            self.window.viewport(),
        );
        WgpuBackend::setup(ctx, resources)
    }
}

/// Per-frame context passed to `App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub time: FrameTime,
    pub runtime: &'a mut RuntimeCtx,
}

impl FrameCtx<'_, '_> {
    /// Acquires the surface, hands `draw` a backend recording into it plus the
    /// window's frame scheduler, then presents.
    ///
    /// Nothing is drawn while the window is zero-sized. Transient surface
    /// errors skip the frame and retry at the next refresh; only fatal ones
    /// return `Exit`.
    pub fn render<F>(&mut self, resources: &mut GpuResources, draw: F) -> AppControl
    where
        F: FnOnce(&mut WgpuBackend<'_>, &mut dyn FrameScheduler),
    {
        if !self.gpu.is_drawable() {
            return AppControl::Continue;
        }

        let viewport = self.window.viewport();

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::debug!("surface acquisition failed: {err}");
                let action = self.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    log::error!("surface lost for good; exiting");
                    return AppControl::Exit;
                }
                self.runtime.request_redraw();
                return AppControl::Continue;
            }
        };

        // The backend borrows frame.encoder; dropped before submit() takes frame.
        {
            let gpu = &*self.gpu;
            let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), viewport);
            let target = RenderTarget::new(&mut frame.encoder, &frame.view, gpu.depth_view());
            let mut backend = WgpuBackend::frame(ctx, target, resources);
            draw(&mut backend, &mut *self.runtime);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
