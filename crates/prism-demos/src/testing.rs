//! Device and host stand-ins that record what the demos ask for.

use prism_engine::coords::Viewport;
use prism_engine::core::FrameScheduler;
use prism_engine::render::{
    BufferHandle, BufferUsage, DrawPass, GraphicsBackend, ProgramDesc, ProgramHandle, Topology,
    VertexAttribute,
};
use prism_engine::shader::ShaderError;

#[derive(Debug, Clone)]
pub struct RecordedBuffer {
    pub label: String,
    pub usage: BufferUsage,
    pub contents: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct RecordedProgram {
    pub label: String,
    pub attributes: Vec<VertexAttribute>,
    pub topology: Topology,
    pub depth_test: bool,
}

/// Backend that keeps every request in memory and draws nothing.
#[derive(Debug)]
pub struct RecordingBackend {
    pub viewport: Viewport,
    pub buffers: Vec<RecordedBuffer>,
    pub programs: Vec<RecordedProgram>,
    pub passes: Vec<DrawPass>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            viewport: Viewport::new(640.0, 480.0),
            buffers: Vec::new(),
            programs: Vec::new(),
            passes: Vec::new(),
        }
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsBackend for RecordingBackend {
    fn create_buffer(&mut self, label: &str, usage: BufferUsage, contents: &[u8]) -> BufferHandle {
        let handle = BufferHandle::from_index(self.buffers.len() as u32);
        self.buffers.push(RecordedBuffer {
            label: label.to_owned(),
            usage,
            contents: contents.to_vec(),
        });
        handle
    }

    fn create_program(&mut self, desc: &ProgramDesc<'_>) -> Result<ProgramHandle, ShaderError> {
        let handle = ProgramHandle::from_index(self.programs.len() as u32);
        self.programs.push(RecordedProgram {
            label: desc.program.label().to_owned(),
            attributes: desc.attributes.to_vec(),
            topology: desc.topology,
            depth_test: desc.depth_test,
        });
        Ok(handle)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn submit(&mut self, pass: &DrawPass) {
        self.passes.push(pass.clone());
    }
}

/// Counts next-frame requests.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    pub requests: usize,
}

impl FrameScheduler for RecordingScheduler {
    fn request_next_frame(&mut self) {
        self.requests += 1;
    }
}
