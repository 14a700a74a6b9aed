use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::games::Game;
use crate::platform::{FrameBuffer, InputEvent, Rgb};
use crate::raster::draw_rect_outline;
use crate::settings::ColorBoxTuning;

const PALETTE: [Rgb; 7] = [
    Rgb(255, 0, 0),
    Rgb(0, 0, 255),
    Rgb(255, 255, 0),
    Rgb(0, 255, 0),
    Rgb(255, 255, 255),
    Rgb(128, 0, 128),
    Rgb(0, 255, 255),
];

pub struct ColorBox {
    tuning: ColorBoxTuning,
    color: Rgb,
    x: i32,
    y: i32,
    score: u32,
    changes: u32,
    last_change_ms: u64,
    game_over: bool,
    rng: StdRng,
}

impl ColorBox {
    pub fn new(tuning: ColorBoxTuning, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut game = Self {
            tuning,
            color: PALETTE[0],
            x: 0,
            y: 0,
            score: 0,
            changes: 0,
            last_change_ms: 0,
            game_over: false,
            rng,
        };
        game.color = game.random_color();
        (game.x, game.y) = game.random_position();
        game
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn changes(&self) -> u32 {
        self.changes
    }

    fn random_color(&mut self) -> Rgb {
        *PALETTE.choose(&mut self.rng).unwrap_or(&Rgb::WHITE)
    }

    fn random_position(&mut self) -> (i32, i32) {
        let t = &self.tuning;
        let (lo, size) = (t.margin as i32, t.box_size as i32);
        let max_x = t.width as i32 - size - lo;
        let max_y = t.height as i32 - size - lo;
        (self.rng.gen_range(lo..=max_x), self.rng.gen_range(lo..=max_y))
    }

    fn corners(&self) -> [(i32, i32); 4] {
        let right = self.tuning.width as i32 - self.tuning.box_size as i32;
        let bottom = self.tuning.height as i32 - self.tuning.box_size as i32;
        [(0, 0), (right, 0), (0, bottom), (right, bottom)]
    }

    pub fn is_touching_corner(&self) -> bool {
        let size = self.tuning.box_size as i32;
        let (w, h) = (self.tuning.width as i32, self.tuning.height as i32);
        let left = self.x <= 0;
        let top = self.y <= 0;
        let right = self.x + size >= w;
        let bottom = self.y + size >= h;
        (left && top) || (right && top) || (left && bottom) || (right && bottom)
    }

    /// New colour and position; every `corner_period`-th change lands in a corner
    fn change(&mut self, now_ms: u64) {
        self.color = self.random_color();
        self.changes += 1;
        self.last_change_ms = now_ms;

        (self.x, self.y) = if self.changes % self.tuning.corner_period == 0 {
            let corners = self.corners();
            corners[self.rng.gen_range(0..corners.len())]
        } else {
            self.random_position()
        };
        log::debug!("Box change #{} -> ({}, {})", self.changes, self.x, self.y);
    }
}

impl Game for ColorBox {
    fn title(&self) -> &'static str {
        "Color Box"
    }

    fn screen_size(&self) -> (u32, u32) {
        (self.tuning.width, self.tuning.height)
    }

    fn handle_input(&mut self, event: InputEvent, elapsed_ms: u64) {
        if event != InputEvent::Jump || self.game_over {
            return;
        }
        if self.is_touching_corner() {
            self.game_over = true;
            log::info!("Pressed while cornered, final score {}", self.score);
        } else {
            self.score += 1;
            self.change(elapsed_ms);
        }
    }

    fn update(&mut self, elapsed_ms: u64) {
        if self.game_over {
            return;
        }
        if elapsed_ms.saturating_sub(self.last_change_ms) > self.tuning.auto_change_ms {
            self.change(elapsed_ms);
        }
    }

    fn render(&mut self, fb: &mut FrameBuffer) {
        fb.clear(Rgb::BLACK);
        let size = self.tuning.box_size as i32;
        fb.fill_rect(self.x, self.y, size, size, self.color);
        // Two-pixel border in a darker shade of the fill
        let edge = self.color.dim(0.5);
        draw_rect_outline(fb, self.x, self.y, size, size, edge);
        draw_rect_outline(fb, self.x + 1, self.y + 1, size - 2, size - 2, edge);

        fb.draw_text("Press Space to change color", 2, 2, Rgb::WHITE);
        let score = format!("Score: {}", self.score);
        let x = self.tuning.width as i32 - score.len() as i32 - 2;
        fb.draw_text(score, x, 6, Rgb::WHITE);
    }

    fn get_score(&self) -> u32 {
        self.score
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> ColorBox {
        ColorBox::new(ColorBoxTuning::default(), Some(42))
    }

    #[test]
    fn test_starts_inside_margins() {
        for seed in 0..50 {
            let game = ColorBox::new(ColorBoxTuning::default(), Some(seed));
            let (x, y) = game.position();
            assert!((16..=120 - 24 - 16).contains(&x));
            assert!((16..=64 - 24 - 16).contains(&y));
            assert!(!game.is_touching_corner());
            assert!(PALETTE.contains(&game.color()));
        }
    }

    #[test]
    fn test_space_scores_when_not_cornered() {
        let mut game = game();
        game.handle_input(InputEvent::Jump, 100);
        assert_eq!(game.get_score(), 1);
        assert_eq!(game.changes(), 1);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_space_in_corner_ends_game() {
        let mut game = game();
        game.x = 120 - 24;
        game.y = 64 - 24;
        assert!(game.is_touching_corner());
        game.handle_input(InputEvent::Jump, 100);
        assert!(game.is_game_over());
        assert_eq!(game.get_score(), 0);
    }

    #[test]
    fn test_edge_is_not_a_corner() {
        let mut game = game();
        game.x = 0;
        game.y = 20;
        assert!(!game.is_touching_corner());
    }

    #[test]
    fn test_every_eighth_change_is_a_corner() {
        let mut game = game();
        for i in 1..=16u64 {
            game.handle_input(InputEvent::Jump, i * 10);
            if game.is_game_over() {
                panic!("landed in a corner off-period at change {}", game.changes());
            }
            if game.changes() % 8 == 0 {
                assert!(game.is_touching_corner());
                // Step out of the corner by hand so the next press scores
                game.x = 40;
                game.y = 20;
            } else {
                assert!(!game.is_touching_corner());
            }
        }
        assert_eq!(game.get_score(), 16);
    }

    #[test]
    fn test_auto_change_after_interval_without_score() {
        let mut game = game();
        game.update(5_000);
        assert_eq!(game.changes(), 0);
        game.update(5_001);
        assert_eq!(game.changes(), 1);
        assert_eq!(game.get_score(), 0);
        // Timer restarted
        game.update(9_000);
        assert_eq!(game.changes(), 1);
        game.update(10_002);
        assert_eq!(game.changes(), 2);
    }

    #[test]
    fn test_render_box_and_hud() {
        let mut game = game();
        let mut fb = FrameBuffer::new(120, 64);
        game.render(&mut fb);
        let (x, y) = game.position();
        assert_eq!(fb.pixel(x + 5, y + 5), Some(game.color()));
        // Darker border, two pixels thick
        let edge = game.color().dim(0.5);
        assert_eq!(fb.pixel(x, y), Some(edge));
        assert_eq!(fb.pixel(x + 1, y + 12), Some(edge));
        assert_eq!(fb.pixel(x + 23, y + 23), Some(edge));
        assert_eq!(fb.pixel(x + 2, y + 2), Some(game.color()));
        assert_eq!(fb.pixel(x + 24, y), Some(Rgb::BLACK));
        assert_eq!(fb.texts()[1].text, "Score: 0");
    }
}
