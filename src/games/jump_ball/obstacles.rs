use super::ball::Ball;

/// A block resting on the ground, scrolling right to left
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

#[derive(Debug, Clone)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    screen_width: f32,
    ground_y: f32,
    width: f32,
    height: f32,
}

impl ObstacleField {
    pub fn new(screen_width: f32, ground_y: f32, width: f32, height: f32) -> Self {
        Self {
            obstacles: Vec::new(),
            screen_width,
            ground_y,
            width,
            height,
        }
    }

    /// Add an obstacle at the right screen edge, sitting on the ground
    pub fn spawn(&mut self) {
        self.obstacles.push(Obstacle {
            x: self.screen_width,
            y: self.ground_y - self.height,
            width: self.width,
            height: self.height,
        });
        log::debug!("Spawned obstacle #{} at x={}", self.obstacles.len(), self.screen_width);
    }

    pub fn advance(&mut self, speed: f32) {
        for obs in &mut self.obstacles {
            obs.x -= speed;
        }
    }

    /// Drop obstacles that have fully left the screen on the left
    pub fn cull(&mut self) {
        self.obstacles.retain(|obs| obs.right() >= 0.0);
    }

    /// Loose hit test: horizontal overlap with the ball's span, and the
    /// obstacle top above the ball's bottom. Not an exact circle test.
    pub fn check_collision(&self, ball: &Ball) -> bool {
        self.obstacles.iter().any(|obs| {
            obs.x < ball.right() && obs.right() > ball.left() && obs.y < ball.bottom()
        })
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: f32 = 54.0;

    fn field() -> ObstacleField {
        ObstacleField::new(120.0, GROUND, 6.0, 10.0)
    }

    #[test]
    fn test_spawn_rests_on_ground_at_right_edge() {
        let mut field = field();
        field.spawn();
        let obs = &field.obstacles()[0];
        assert_eq!(obs.x, 120.0);
        assert_eq!(obs.y, GROUND - 10.0);
        assert_eq!(obs.y + obs.height, GROUND);
    }

    #[test]
    fn test_advance_moves_by_speed() {
        let mut field = field();
        field.spawn();
        for _ in 0..7 {
            field.advance(3.0);
        }
        assert_eq!(field.obstacles()[0].x, 120.0 - 7.0 * 3.0);
    }

    #[test]
    fn test_culled_only_once_fully_offscreen() {
        let mut field = ObstacleField::new(10.0, GROUND, 6.0, 10.0);
        field.spawn();

        // x = 10 - 2n; right edge = 16 - 2n. Still live at right edge 0.
        for _ in 0..8 {
            field.advance(2.0);
            field.cull();
        }
        assert_eq!(field.obstacles()[0].right(), 0.0);
        assert_eq!(field.len(), 1);

        field.advance(2.0);
        field.cull();
        assert!(field.is_empty());
    }

    #[test]
    fn test_cull_keeps_order_of_survivors() {
        let mut field = field();
        field.spawn();
        field.advance(100.0);
        field.spawn();
        field.advance(10.0);
        field.spawn();
        // oldest at x = 10, then 110, then 120
        field.advance(20.0);
        field.cull();
        let xs: Vec<f32> = field.obstacles().iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![90.0, 100.0]);
    }

    #[test]
    fn test_collision_needs_horizontal_overlap() {
        let mut field = field();
        let ball = Ball::on_ground(20.0, 3.0, GROUND);
        field.spawn();

        // Ball spans 17..23; obstacle at 20..26
        field.advance(100.0);
        assert!(field.check_collision(&ball));

        // Obstacle at 24..30, no overlap
        let mut clear = self::field();
        clear.spawn();
        clear.advance(96.0);
        assert!(!clear.check_collision(&ball));

        // Obstacle at 8..14, already passed
        field.advance(12.0);
        assert!(!field.check_collision(&ball));
    }

    #[test]
    fn test_collision_cleared_by_jumping_above_top() {
        let mut field = field();
        field.spawn();
        field.advance(100.0);

        let mut ball = Ball::on_ground(20.0, 3.0, GROUND);
        // Bottom exactly at the top edge is a miss
        ball.y = GROUND - 10.0 - 3.0;
        assert!(!field.check_collision(&ball));
        ball.y += 0.5;
        assert!(field.check_collision(&ball));
    }
}
