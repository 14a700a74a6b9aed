use std::io;
use std::time::Duration;

use crate::games::Game;
use crate::logging;
use crate::platform::{FrameBuffer, InputEvent, Platform, Rgb, TerminalPlatform};
use crate::settings::Settings;

/// Process entry for a game: settings, logging, terminal, session.
/// The terminal is restored before this returns, whatever the outcome.
pub fn launch<G: Game>(make_game: impl FnOnce(&Settings) -> G) -> io::Result<()> {
    let loaded = Settings::load();
    let settings = loaded.as_ref().cloned().unwrap_or_default();
    logging::init(&settings.log_path());
    match (&loaded, Settings::settings_path()) {
        (Ok(_), Some(path)) => log::info!("Loaded settings from {}", path.display()),
        (Ok(_), None) => log::info!("No settings file found, using defaults"),
        (Err(err), _) => log::warn!("Ignoring settings file, using defaults: {err}"),
    }

    let game = make_game(&settings);
    let (width, height) = game.screen_size();
    let mut platform = TerminalPlatform::new(game.title(), width, height)?;
    let mut app = App::new(game, &settings);
    let exit = app.run(&mut platform);
    drop(platform);

    log::info!("Session ended: {exit:?}");
    exit.map(|_| ())
}

/// Where the session is. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    WaitingToStart,
    Running { started_ms: u64 },
    GameOver { entered_ms: u64, final_score: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The player closed the game
    Quit,
    /// The game over screen was shown for its full duration
    Finished { score: u32 },
}

/// Drives one game through start prompt, play and game over, one frame at a time
pub struct App<G: Game> {
    pub game: G,
    pub phase: Phase,
    pub should_quit: bool,
    frame_ms: u64,
    hold_ms: u64,
}

impl<G: Game> App<G> {
    pub fn new(game: G, settings: &Settings) -> Self {
        Self {
            game,
            phase: Phase::WaitingToStart,
            should_quit: false,
            frame_ms: settings.frame_ms(),
            hold_ms: settings.game_over_hold_ms,
        }
    }

    /// Run frames until the player quits or the game over screen has been held
    pub fn run<P: Platform>(&mut self, platform: &mut P) -> io::Result<Exit> {
        log::info!("{} waiting for start", self.game.title());
        loop {
            if let Some(exit) = self.step(platform)? {
                return Ok(exit);
            }
        }
    }

    pub fn step<P: Platform>(&mut self, platform: &mut P) -> io::Result<Option<Exit>> {
        if self.should_quit {
            log::info!("Quit requested");
            return Ok(Some(Exit::Quit));
        }

        let frame_start = platform.elapsed_ms();
        for event in platform.poll_events()? {
            self.on_event(event, frame_start);
        }
        if self.should_quit {
            log::info!("Quit requested");
            return Ok(Some(Exit::Quit));
        }

        if let Phase::Running { started_ms } = self.phase {
            let elapsed = frame_start - started_ms;
            self.game.update(elapsed);
            if self.game.is_game_over() {
                let final_score = self.game.get_score();
                log::info!("{} over with score {final_score}", self.game.title());
                self.phase = Phase::GameOver {
                    entered_ms: frame_start,
                    final_score,
                };
            }
        }

        let (width, height) = self.game.screen_size();
        match self.phase {
            Phase::WaitingToStart => render_prompt(platform.frame(), width, height),
            Phase::Running { .. } => self.game.render(platform.frame()),
            Phase::GameOver { final_score, .. } => {
                render_game_over(platform.frame(), width, height, final_score)
            }
        }
        platform.present()?;

        if let Phase::GameOver { entered_ms, final_score } = self.phase {
            if platform.elapsed_ms() - entered_ms >= self.hold_ms {
                return Ok(Some(Exit::Finished { score: final_score }));
            }
        }

        self.throttle(platform, frame_start);
        Ok(None)
    }

    fn on_event(&mut self, event: InputEvent, now_ms: u64) {
        if event == InputEvent::Quit {
            self.should_quit = true;
            return;
        }
        match self.phase {
            Phase::WaitingToStart => {
                if event == InputEvent::Confirm {
                    log::info!("{} started", self.game.title());
                    self.phase = Phase::Running { started_ms: now_ms };
                }
            }
            Phase::Running { started_ms } => self.game.handle_input(event, now_ms - started_ms),
            Phase::GameOver { .. } => {}
        }
    }

    fn throttle<P: Platform>(&self, platform: &mut P, frame_start: u64) {
        let spent = platform.elapsed_ms() - frame_start;
        if spent < self.frame_ms {
            platform.sleep(Duration::from_millis(self.frame_ms - spent));
        } else {
            log::debug!("Frame overran budget: {spent} ms");
        }
    }
}

fn centered_x(width: u32, text: &str) -> i32 {
    (width as i32 - text.chars().count() as i32) / 2
}

fn render_prompt(fb: &mut FrameBuffer, width: u32, height: u32) {
    let msg = "Press Enter to Start";
    fb.clear(Rgb::BLACK);
    fb.draw_text(msg, centered_x(width, msg), height as i32 / 2, Rgb::WHITE);
}

fn render_game_over(fb: &mut FrameBuffer, width: u32, height: u32, score: u32) {
    let title = "Game Over";
    let score = format!("Final Score: {score}");
    let mid = height as i32 / 2;
    fb.clear(Rgb::BLACK);
    fb.draw_text(title, centered_x(width, title), mid - 4, Rgb::WHITE);
    fb.draw_text(score.clone(), centered_x(width, &score), mid + 2, Rgb::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::color_box::ColorBox;
    use crate::games::jump_ball::JumpBall;
    use crate::platform::HeadlessPlatform;
    use crate::settings::{ColorBoxTuning, JumpBallTuning};

    fn jump_ball() -> (App<JumpBall>, HeadlessPlatform) {
        let settings = Settings::default();
        let game = JumpBall::new(JumpBallTuning::default(), Some(1));
        (App::new(game, &settings), HeadlessPlatform::new(120, 64))
    }

    #[test]
    fn test_waits_for_confirm() {
        let (mut app, mut platform) = jump_ball();
        platform.push_event(2, InputEvent::Jump);
        for _ in 0..5 {
            assert_eq!(app.step(&mut platform).unwrap(), None);
        }
        assert_eq!(app.phase, Phase::WaitingToStart);
        assert_eq!(platform.last_frame().texts()[0].text, "Press Enter to Start");
        assert_eq!(platform.presented(), 5);

        platform.push_event(5, InputEvent::Confirm);
        app.step(&mut platform).unwrap();
        assert!(matches!(app.phase, Phase::Running { .. }));
    }

    #[test]
    fn test_throttles_to_frame_rate() {
        let (mut app, mut platform) = jump_ball();
        for _ in 0..30 {
            app.step(&mut platform).unwrap();
        }
        assert_eq!(platform.elapsed_ms(), 30 * 33);
    }

    #[test]
    fn test_quit_exits_from_any_phase() {
        let (mut app, mut platform) = jump_ball();
        platform.push_event(0, InputEvent::Quit);
        assert_eq!(app.run(&mut platform).unwrap(), Exit::Quit);
        assert_eq!(platform.presented(), 0);

        let (mut app, mut platform) = jump_ball();
        platform.push_event(0, InputEvent::Confirm);
        platform.push_event(10, InputEvent::Quit);
        assert_eq!(app.run(&mut platform).unwrap(), Exit::Quit);
        assert!(matches!(app.phase, Phase::Running { .. }));
        assert_eq!(platform.presented(), 10);
    }

    #[test]
    fn test_hundred_frames_spawn_one_obstacle() {
        let (mut app, mut platform) = jump_ball();
        platform.push_event(0, InputEvent::Confirm);
        for _ in 0..100 {
            app.step(&mut platform).unwrap();
        }
        assert!(matches!(app.phase, Phase::Running { .. }));
        assert_eq!(app.game.get_score(), 3);

        let obstacles = app.game.field().obstacles();
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].x, 120.0 - 99.0 * 1.0);
    }

    #[test]
    fn test_collision_leads_to_held_game_over() {
        let (mut app, mut platform) = jump_ball();
        platform.push_event(0, InputEvent::Confirm);

        let exit = app.run(&mut platform).unwrap();
        let Exit::Finished { score } = exit else {
            panic!("expected the run to finish, got {exit:?}");
        };
        let Phase::GameOver { entered_ms, final_score } = app.phase else {
            panic!("expected game over phase");
        };
        assert_eq!(score, final_score);
        assert_eq!(score, app.game.get_score());
        assert!(platform.elapsed_ms() - entered_ms >= 3000);

        let texts = platform.last_frame().texts();
        assert_eq!(texts[0].text, "Game Over");
        assert_eq!(texts[1].text, format!("Final Score: {score}"));
    }

    #[test]
    fn test_color_box_runs_through_same_loop() {
        let settings = Settings::default();
        let game = ColorBox::new(ColorBoxTuning::default(), Some(3));
        let mut app = App::new(game, &settings);
        let mut platform = HeadlessPlatform::new(120, 64);
        platform.push_event(0, InputEvent::Confirm);
        platform.push_event(1, InputEvent::Jump);
        platform.push_event(2, InputEvent::Jump);
        for _ in 0..3 {
            app.step(&mut platform).unwrap();
        }
        assert_eq!(app.game.get_score(), 2);
        assert_eq!(app.game.changes(), 2);
    }
}
