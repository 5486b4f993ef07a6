//! Windowed host for the free-fly camera: event loop, frame timing and
//! platform directories.

pub mod frame_clock;
pub mod platform;
pub mod window;
