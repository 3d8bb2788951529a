use crate::coords::Viewport;
use crate::shader::ShaderError;

use super::{BufferHandle, BufferUsage, DrawPass, ProgramDesc, ProgramHandle};

/// The narrow device surface the demo renderers are written against.
///
/// Resources are created once during setup and never released while the
/// backend's owner is alive.
pub trait GraphicsBackend {
    /// Allocates a device buffer and copies `contents` into it.
    fn create_buffer(&mut self, label: &str, usage: BufferUsage, contents: &[u8]) -> BufferHandle;

    /// Creates a device program from a linked program.
    fn create_program(&mut self, desc: &ProgramDesc<'_>) -> Result<ProgramHandle, ShaderError>;

    /// Current drawable size in logical pixels.
    fn viewport(&self) -> Viewport;

    /// Records and submits one pass. Device-level errors are not reported.
    fn submit(&mut self, pass: &DrawPass);
}
