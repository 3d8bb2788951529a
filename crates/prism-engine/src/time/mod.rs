//! Time subsystem.
//!
//! Frame timing decoupled from the runtime so it can be tested on its own:
//! one `FrameClock` per window, `tick()` once per rendered frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
