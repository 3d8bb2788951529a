//! Core engine-facing contracts.
//!
//! The interface between the runtime (platform loop) and the demos: the `App`
//! callbacks, the per-window contexts they receive, and the "next frame"
//! request that drives animation.

mod app;
mod ctx;
mod scheduler;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, InitCtx, WindowCtx};
pub use scheduler::FrameScheduler;
