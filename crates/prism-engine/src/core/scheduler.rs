use crate::window::RuntimeCtx;

/// Host mechanism for asking to be called again on the next display refresh.
///
/// A frame callback that wants to keep animating requests the next frame
/// before returning; one that does not request simply stops being called
/// (until the host needs a repaint on its own).
pub trait FrameScheduler {
    fn request_next_frame(&mut self);
}

impl FrameScheduler for RuntimeCtx {
    fn request_next_frame(&mut self) {
        self.request_redraw();
    }
}
