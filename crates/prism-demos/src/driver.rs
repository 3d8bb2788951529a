//! Loop drivers: backend-agnostic scenes and the engine apps that host them.

use anyhow::{Context, Result};
use prism_engine::core::{App, AppControl, FrameCtx, FrameScheduler, InitCtx};
use prism_engine::render::{GpuResources, GraphicsBackend};
use prism_engine::shader::ShaderError;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

use crate::buffers::{init_cube_buffers, init_quad_buffers, CubeBuffers, QuadBuffers};
use crate::program::{init_shader_program, ProgramInfo, ProgramSource, CUBE_PROGRAM, QUAD_PROGRAM};
use crate::renderer::{draw_cube, draw_quad};
use crate::scene::{RenderState, SceneParams};

/// The rotating cube: owns its device resources and rotation state.
#[derive(Debug)]
pub struct CubeScene {
    params: SceneParams,
    state: RenderState,
    program: ProgramInfo,
    buffers: CubeBuffers,
}

impl CubeScene {
    pub fn init<B>(backend: &mut B, params: SceneParams, source: &ProgramSource) -> Result<Self, ShaderError>
    where
        B: GraphicsBackend + ?Sized,
    {
        let program = init_shader_program(backend, source)?;
        let buffers = init_cube_buffers(backend);

        Ok(Self {
            params,
            state: RenderState::new(),
            program,
            buffers,
        })
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// One animation step: advance by `dt` seconds, draw, schedule the next frame.
    pub fn frame<B, S>(&mut self, backend: &mut B, scheduler: &mut S, dt: f32)
    where
        B: GraphicsBackend + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        self.state = self.state.tick(dt);
        draw_cube(backend, &self.program, &self.buffers, &self.params, self.state.rotation);
        scheduler.request_next_frame();
    }
}

/// The static quad. Draws whenever asked and never schedules itself.
#[derive(Debug)]
pub struct QuadScene {
    params: SceneParams,
    program: ProgramInfo,
    buffers: QuadBuffers,
}

impl QuadScene {
    pub fn init<B>(backend: &mut B, params: SceneParams, source: &ProgramSource) -> Result<Self, ShaderError>
    where
        B: GraphicsBackend + ?Sized,
    {
        let program = init_shader_program(backend, source)?;
        let buffers = init_quad_buffers(backend);

        Ok(Self {
            params,
            program,
            buffers,
        })
    }

    pub fn draw<B: GraphicsBackend + ?Sized>(&self, backend: &mut B) {
        draw_quad(backend, &self.program, &self.buffers, &self.params);
    }
}

fn escape_pressed(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::KeyboardInput {
            event: KeyEvent {
                logical_key: Key::Named(NamedKey::Escape),
                state: ElementState::Pressed,
                ..
            },
            ..
        }
    )
}

pub struct CubeApp {
    params: SceneParams,
    resources: GpuResources,
    scene: Option<CubeScene>,
}

impl CubeApp {
    pub fn new(params: SceneParams) -> Self {
        Self {
            params,
            resources: GpuResources::new(),
            scene: None,
        }
    }
}

impl App for CubeApp {
    fn on_init(&mut self, ctx: &mut InitCtx<'_, '_>) -> Result<()> {
        let mut backend = ctx.backend(&mut self.resources);
        let scene = CubeScene::init(&mut backend, self.params, &CUBE_PROGRAM)
            .context("cube setup failed")?;

        log::info!(
            "cube ready: {} buffer(s), {} program(s)",
            self.resources.buffer_count(),
            self.resources.program_count()
        );
        self.scene = Some(scene);
        Ok(())
    }

    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if escape_pressed(event) {
            AppControl::Exit
        } else {
            AppControl::Continue
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(scene) = self.scene.as_mut() else {
            return AppControl::Continue;
        };

        let dt = ctx.time.dt;
        ctx.render(&mut self.resources, |backend, scheduler| {
            scene.frame(backend, scheduler, dt);
        })
    }
}

pub struct QuadApp {
    params: SceneParams,
    resources: GpuResources,
    scene: Option<QuadScene>,
}

impl QuadApp {
    pub fn new(params: SceneParams) -> Self {
        Self {
            params,
            resources: GpuResources::new(),
            scene: None,
        }
    }
}

impl App for QuadApp {
    fn on_init(&mut self, ctx: &mut InitCtx<'_, '_>) -> Result<()> {
        let mut backend = ctx.backend(&mut self.resources);
        let scene = QuadScene::init(&mut backend, self.params, &QUAD_PROGRAM)
            .context("quad setup failed")?;

        log::info!(
            "quad ready: {} buffer(s), {} program(s)",
            self.resources.buffer_count(),
            self.resources.program_count()
        );
        self.scene = Some(scene);
        Ok(())
    }

    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if escape_pressed(event) {
            AppControl::Exit
        } else {
            AppControl::Continue
        }
    }

    // Repaints only when the host asks (first show, resize, expose).
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(scene) = self.scene.as_ref() else {
            return AppControl::Continue;
        };

        ctx.render(&mut self.resources, |backend, _scheduler| scene.draw(backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingBackend, RecordingScheduler};
    use prism_engine::render::{DrawCall, Topology};

    #[test]
    fn broken_shader_means_no_scene_and_no_draw() {
        let mut backend = RecordingBackend::new();
        let broken = ProgramSource {
            vertex: "@vertex fn vs_main() -> @builtin(position) vec4<f32> { return 1; ",
            ..CUBE_PROGRAM
        };

        let result = CubeScene::init(&mut backend, SceneParams::default(), &broken);

        assert!(matches!(result, Err(ShaderError::Compile { .. })));
        assert!(backend.programs.is_empty());
        assert!(backend.buffers.is_empty());
        assert!(backend.passes.is_empty());
    }

    #[test]
    fn quad_draws_one_strip_of_four_vertices() {
        let mut backend = RecordingBackend::new();
        let scene = QuadScene::init(&mut backend, SceneParams::default(), &QUAD_PROGRAM).unwrap();

        scene.draw(&mut backend);

        assert_eq!(backend.passes.len(), 1);
        let pass = &backend.passes[0];
        assert_eq!(pass.topology, Topology::TriangleStrip);
        assert_eq!(pass.draw, DrawCall::Arrays { first: 0, count: 4 });
        assert_eq!(pass.draw.vertex_count(), 4);
    }

    #[test]
    fn each_cube_frame_draws_once_and_schedules_once() {
        let mut backend = RecordingBackend::new();
        let mut scheduler = RecordingScheduler::default();
        let mut scene = CubeScene::init(&mut backend, SceneParams::default(), &CUBE_PROGRAM).unwrap();

        for (i, dt) in [0.016, 0.016, 0.02].into_iter().enumerate() {
            scene.frame(&mut backend, &mut scheduler, dt);

            assert_eq!(backend.passes.len(), i + 1);
            assert_eq!(scheduler.requests, i + 1);
            let pass = &backend.passes[i];
            assert_eq!(pass.topology, Topology::TriangleList);
            assert!(matches!(pass.draw, DrawCall::Indexed { count: 36, .. }));
        }

        assert!((scene.state().rotation - 0.052).abs() < 1e-5);
    }

    #[test]
    fn cube_uses_the_rotation_after_the_tick() {
        let mut backend = RecordingBackend::new();
        let mut scheduler = RecordingScheduler::default();
        let params = SceneParams::default();
        let mut scene = CubeScene::init(&mut backend, params, &CUBE_PROGRAM).unwrap();

        scene.frame(&mut backend, &mut scheduler, 0.25);

        assert_eq!(backend.passes[0].uniforms[1].value, params.model_view_matrix(Some(0.25)));
    }
}
