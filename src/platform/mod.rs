pub mod framebuffer;
pub mod headless;
pub mod terminal;

use std::io;
use std::time::Duration;

pub use framebuffer::{FrameBuffer, Rgb, TextItem};
pub use headless::HeadlessPlatform;
pub use terminal::TerminalPlatform;

/// Input the games understand. Anything else is dropped by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Confirm,
    Jump,
}

pub trait Platform {
    /// Drain all input that arrived since the last call
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>>;
    fn frame(&mut self) -> &mut FrameBuffer;
    fn present(&mut self) -> io::Result<()>;
    /// Monotonic milliseconds since the platform was created
    fn elapsed_ms(&self) -> u64;
    fn sleep(&mut self, duration: Duration);
}
