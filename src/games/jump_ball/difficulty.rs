/// Gravity and obstacle speed for a moment of the run.
///
/// Always recomputed from elapsed whole seconds, never accumulated, so an
/// irregular frame rate cannot make it drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub gravity: f32,
    pub obstacle_speed: f32,
}

impl Difficulty {
    /// +1 gravity every 10 s, +1 speed every 5 s
    pub fn at(elapsed_secs: u64, base_gravity: f32, base_speed: f32) -> Self {
        Self {
            gravity: base_gravity + (elapsed_secs / 10) as f32,
            obstacle_speed: base_speed + (elapsed_secs / 5) as f32,
        }
    }
}
