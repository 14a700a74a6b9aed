pub mod color_box;
pub mod jump_ball;

use crate::platform::{FrameBuffer, InputEvent};

/// A game driven by the session loop once it is running.
///
/// `elapsed_ms` is always measured from the moment the game left its start
/// prompt, so games never read the wall clock themselves.
pub trait Game {
    fn title(&self) -> &'static str;
    fn screen_size(&self) -> (u32, u32);
    fn handle_input(&mut self, event: InputEvent, elapsed_ms: u64);
    fn update(&mut self, elapsed_ms: u64);
    fn render(&mut self, fb: &mut FrameBuffer);
    fn get_score(&self) -> u32;
    fn is_game_over(&self) -> bool;
}
