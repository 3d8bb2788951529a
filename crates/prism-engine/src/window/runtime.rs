use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, InitCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "prism".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
        }
    }
}

/// Requests made by the app during a frame.
///
/// Applied once the callback returns; repeated requests coalesce.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    redraw: bool,
}

impl RuntimeCtx {
    /// Schedules another `on_frame` at the next display refresh.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and runs the event loop until it closes or the app
    /// exits.
    ///
    /// Returns the fatal setup error (no GPU context, failed `App::on_init`),
    /// if there was one.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut host = Host {
            config,
            gpu_init,
            app,
            entry: None,
            finished: false,
            fatal: None,
        };

        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;

        match host.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// The window and the GPU context that borrows it.
#[self_referencing]
struct WindowEntry {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct Host<A: App + 'static> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    finished: bool,
    fatal: Option<anyhow::Error>,
}

impl<A: App + 'static> Host<A> {
    fn finish(&mut self, event_loop: &ActiveEventLoop) {
        self.finished = true;
        self.entry = None;
        event_loop.exit();
    }

    /// Keeps the first fatal error and stops the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        self.finish(event_loop);
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let id = window.id();
        let gpu_init = self.gpu_init.clone();

        let mut entry = WindowEntryTryBuilder {
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .context("unable to initialize a GPU context for the window")
            },
        }
        .try_build()?;

        let app = &mut self.app;
        entry
            .with_mut(|fields| {
                let mut ctx = InitCtx {
                    window: WindowCtx {
                        id,
                        window: fields.window,
                    },
                    gpu: &*fields.gpu,
                };
                app.on_init(&mut ctx)
            })
            .context("application setup failed")?;

        // Setup time is not part of the first frame's dt.
        entry.with_clock_mut(|clock| clock.reset());
        entry.with_window(|w| w.request_redraw());

        log::info!("window {id:?} ready");
        Ok(entry)
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop, id: WindowId) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let mut runtime = RuntimeCtx::default();
        let app = &mut self.app;

        let control = entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id,
                    window: fields.window,
                },
                gpu: fields.gpu,
                time: fields.clock.tick(),
                runtime: &mut runtime,
            };
            app.on_frame(&mut ctx)
        });

        if control == AppControl::Exit {
            self.finish(event_loop);
        } else if runtime.redraw_requested() {
            entry.with_window(|w| w.request_redraw());
        }
    }
}

impl<A: App + 'static> ApplicationHandler for Host<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.finished {
            return;
        }

        match self.open(event_loop) {
            Ok(entry) => self.entry = Some(entry),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.finished {
            event_loop.exit();
            return;
        }

        // Frames come from OS redraws and from the app asking for the next one.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        if entry.borrow_window().id() != window_id {
            return;
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            self.finish(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => self.finish(event_loop),

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop, window_id),

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_ctx_starts_idle() {
        let ctx = RuntimeCtx::default();
        assert!(!ctx.redraw_requested());
    }

    #[test]
    fn redraw_requests_coalesce() {
        let mut ctx = RuntimeCtx::default();
        ctx.request_redraw();
        ctx.request_redraw();
        assert!(ctx.redraw_requested());
    }

    #[test]
    fn default_config_is_a_small_titled_window() {
        let config = RuntimeConfig::default();
        assert_eq!(config.title, "prism");
        assert_eq!(config.initial_size, LogicalSize::new(640.0, 480.0));
    }
}
