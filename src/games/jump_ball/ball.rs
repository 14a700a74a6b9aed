/// The player's ball. Moves only vertically; x and radius never change.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub vy: f32,
}

impl Ball {
    pub fn on_ground(x: f32, radius: f32, ground_y: f32) -> Self {
        Self {
            x,
            y: ground_y - radius,
            radius,
            vy: 0.0,
        }
    }

    /// Overwrite the vertical velocity. Works mid-air too, so the ball can
    /// keep hopping without touching down.
    pub fn jump(&mut self, velocity: f32) {
        self.vy = velocity;
    }

    /// One frame of motion under `gravity`, clamped to the ground
    pub fn integrate(&mut self, gravity: f32, ground_y: f32) {
        self.vy += gravity;
        self.y += self.vy;

        let floor = ground_y - self.radius;
        if self.y > floor {
            self.y = floor;
            self.vy = 0.0;
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.radius
    }

    pub fn left(&self) -> f32 {
        self.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.x + self.radius
    }
}
