use std::collections::BTreeMap;
use std::io;
use std::time::Duration;

use super::{FrameBuffer, InputEvent, Platform};

/// Scripted platform: events are queued against frame numbers and the clock
/// only moves when the loop sleeps.
pub struct HeadlessPlatform {
    frame: FrameBuffer,
    now_ms: u64,
    polls: u64,
    scripted: BTreeMap<u64, Vec<InputEvent>>,
    presented: u64,
}

impl HeadlessPlatform {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: FrameBuffer::new(width, height),
            now_ms: 0,
            polls: 0,
            scripted: BTreeMap::new(),
            presented: 0,
        }
    }

    /// Deliver `event` on the `poll`-th call to `poll_events` (0-based)
    pub fn push_event(&mut self, poll: u64, event: InputEvent) {
        self.scripted.entry(poll).or_default().push(event);
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn last_frame(&self) -> &FrameBuffer {
        &self.frame
    }
}

impl Platform for HeadlessPlatform {
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        let events = self.scripted.remove(&self.polls).unwrap_or_default();
        self.polls += 1;
        Ok(events)
    }

    fn frame(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    fn present(&mut self) -> io::Result<()> {
        self.presented += 1;
        Ok(())
    }

    fn elapsed_ms(&self) -> u64 {
        self.now_ms
    }

    fn sleep(&mut self, duration: Duration) {
        self.now_ms += duration.as_millis() as u64;
    }
}
