pub mod ball;
pub mod difficulty;
pub mod obstacles;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::games::Game;
use crate::platform::{FrameBuffer, InputEvent, Rgb};
use crate::raster::{draw_line, draw_rect_outline};
use crate::settings::JumpBallTuning;

pub use ball::Ball;
pub use difficulty::Difficulty;
pub use obstacles::{Obstacle, ObstacleField};

const SKY: Rgb = Rgb(10, 12, 40);
const STAR: Rgb = Rgb(255, 255, 225);
const MOON: Rgb = Rgb(240, 235, 200);
const GROUND_LIGHT: Rgb = Rgb(120, 100, 80);
const GROUND_DARK: Rgb = Rgb(90, 72, 56);
const GROUND_MARK: Rgb = Rgb(60, 48, 36);
const BALL: Rgb = Rgb(255, 120, 60);
const OBSTACLE_FILL: Rgb = Rgb(40, 160, 40);
const OBSTACLE_EDGE: Rgb = Rgb(20, 90, 20);
const GROUND_MARK_SPACING: i32 = 8;

pub struct JumpBall {
    tuning: JumpBallTuning,
    ball: Ball,
    field: ObstacleField,
    difficulty: Difficulty,
    frame: u64,
    score: u32,
    game_over: bool,
    /// Total distance the world has scrolled, drives the ground pattern
    scroll: f32,
    stars: Vec<(i32, i32)>,
    rng: StdRng,
}

impl JumpBall {
    pub fn new(tuning: JumpBallTuning, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let ground_y = tuning.ground_y();
        let sky_rows = (ground_y as i32).max(1);
        let stars = (0..tuning.star_count)
            .map(|_| (rng.gen_range(0..tuning.width as i32), rng.gen_range(0..sky_rows)))
            .collect();

        Self {
            ball: Ball::on_ground(tuning.ball_x, tuning.ball_radius, ground_y),
            field: ObstacleField::new(
                tuning.width as f32,
                ground_y,
                tuning.obstacle_width,
                tuning.obstacle_height,
            ),
            difficulty: Difficulty::at(0, tuning.base_gravity, tuning.base_speed),
            frame: 0,
            score: 0,
            game_over: false,
            scroll: 0.0,
            stars,
            rng,
            tuning,
        }
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn render_stars(&mut self, fb: &mut FrameBuffer) {
        for &(x, y) in &self.stars {
            let level = self.rng.gen_range(0.35..=1.0);
            fb.set_pixel(x, y, STAR.dim(level));
        }
    }

    fn render_moon(&self, fb: &mut FrameBuffer) {
        let cx = self.tuning.width as i32 - 20;
        fb.fill_circle(cx, 12, 7, MOON);
        // Crescent bite
        fb.fill_circle(cx + 3, 10, 6, SKY);
    }

    fn render_ground(&self, fb: &mut FrameBuffer) {
        let width = self.tuning.width as i32;
        let top = self.tuning.ground_y() as i32;
        let bottom = self.tuning.height as i32;
        for y in top..bottom {
            let shade = if (y - top) % 2 == 0 { GROUND_LIGHT } else { GROUND_DARK };
            draw_line(fb, 0, y, width - 1, y, shade);
        }

        // Slanted marks scroll with the obstacles
        let offset = self.scroll as i32 % GROUND_MARK_SPACING;
        let mut x = -offset;
        while x < width + GROUND_MARK_SPACING {
            draw_line(fb, x, top + 2, x - 3, bottom - 2, GROUND_MARK);
            x += GROUND_MARK_SPACING;
        }
    }

    fn render_obstacles(&self, fb: &mut FrameBuffer) {
        for obs in self.field.obstacles() {
            let (x, y) = (obs.x.round() as i32, obs.y.round() as i32);
            let (w, h) = (obs.width as i32, obs.height as i32);
            fb.fill_rect(x, y, w, h, OBSTACLE_FILL);
            draw_rect_outline(fb, x, y, w, h, OBSTACLE_EDGE);
        }
    }
}

impl Game for JumpBall {
    fn title(&self) -> &'static str {
        "Jump Ball"
    }

    fn screen_size(&self) -> (u32, u32) {
        (self.tuning.width, self.tuning.height)
    }

    fn handle_input(&mut self, event: InputEvent, _elapsed_ms: u64) {
        if event == InputEvent::Jump && !self.game_over {
            self.ball.jump(self.tuning.jump_velocity);
        }
    }

    fn update(&mut self, elapsed_ms: u64) {
        if self.game_over {
            return;
        }

        let secs = elapsed_ms / 1000;
        self.difficulty = Difficulty::at(secs, self.tuning.base_gravity, self.tuning.base_speed);

        self.ball.integrate(self.difficulty.gravity, self.tuning.ground_y());

        self.field.advance(self.difficulty.obstacle_speed);
        self.scroll += self.difficulty.obstacle_speed;
        if self.frame % self.tuning.spawn_cadence == 0 {
            self.field.spawn();
        }
        self.field.cull();
        self.frame += 1;

        self.score = secs as u32;
        if self.field.check_collision(&self.ball) {
            self.game_over = true;
            log::info!(
                "Ball hit an obstacle after {} frames, final score {}",
                self.frame,
                self.score
            );
        }
    }

    fn render(&mut self, fb: &mut FrameBuffer) {
        fb.clear(SKY);
        self.render_stars(fb);
        self.render_moon(fb);
        self.render_ground(fb);
        fb.fill_circle(
            self.ball.x.round() as i32,
            self.ball.y.round() as i32,
            self.ball.radius as i32,
            BALL,
        );
        self.render_obstacles(fb);
        fb.draw_text(format!("Score: {}", self.score), 2, 2, Rgb::WHITE);
    }

    fn get_score(&self) -> u32 {
        self.score
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }
}
