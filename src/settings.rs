use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming an explicit settings file
pub const SETTINGS_ENV: &str = "NIGHTCADE_SETTINGS";
const SETTINGS_FILE: &str = "nightcade.json";
const LOG_FILE: &str = "nightcade.log";
const MAX_SCREEN: u32 = 4096;

fn screen_fits(width: u32, height: u32) -> bool {
    (1..=MAX_SCREEN).contains(&width) && (1..=MAX_SCREEN).contains(&height)
}

/// Tuning for the jumping-ball game. Distances are logical pixels, rates are per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpBallTuning {
    pub width: u32,
    pub height: u32,
    /// Height of the ground band at the bottom of the screen
    pub ground_height: u32,
    pub ball_x: f32,
    pub ball_radius: f32,
    /// Vertical velocity set by a jump (negative = upward). Gravity grows by
    /// one every 10 s and a jump only lifts off while `|jump_velocity|` exceeds
    /// it, so with the defaults jumping stops working at 50 s.
    pub jump_velocity: f32,
    pub base_gravity: f32,
    pub base_speed: f32,
    pub spawn_cadence: u64,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub star_count: usize,
}

impl Default for JumpBallTuning {
    fn default() -> Self {
        Self {
            width: 120,
            height: 64,
            ground_height: 10,
            ball_x: 12.0,
            ball_radius: 3.0,
            jump_velocity: -5.0,
            base_gravity: 0.5,
            base_speed: 1.0,
            spawn_cadence: 100,
            obstacle_width: 6.0,
            obstacle_height: 10.0,
            star_count: 40,
        }
    }
}

impl JumpBallTuning {
    pub fn ground_y(&self) -> f32 {
        self.height.saturating_sub(self.ground_height) as f32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorBoxTuning {
    pub width: u32,
    pub height: u32,
    pub box_size: u32,
    /// Automatic recolour interval
    pub auto_change_ms: u64,
    /// Every n-th change snaps the box into a corner
    pub corner_period: u32,
    pub margin: u32,
}

impl Default for ColorBoxTuning {
    fn default() -> Self {
        Self {
            width: 120,
            height: 64,
            box_size: 24,
            auto_change_ms: 5000,
            corner_period: 8,
            margin: 16,
        }
    }
}

/// Top-level settings shared by both games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fps: u32,
    /// How long the game over screen stays up before the process exits
    pub game_over_hold_ms: u64,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub jump_ball: JumpBallTuning,
    pub color_box: ColorBoxTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: 30,
            game_over_hold_ms: 3000,
            seed: None,
            log_file: None,
            jump_ball: JumpBallTuning::default(),
            color_box: ColorBoxTuning::default(),
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(err) => write!(f, "cannot read settings: {err}"),
            SettingsError::Parse(err) => write!(f, "malformed settings: {err}"),
            SettingsError::Invalid(what) => write!(f, "invalid settings: {what}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(err) => Some(err),
            SettingsError::Parse(err) => Some(err),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err)
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `$NIGHTCADE_SETTINGS` or `nightcade.json` beside the
    /// executable. No file at all means defaults.
    pub fn load() -> Result<Self, SettingsError> {
        match Self::settings_path() {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// The settings file `load` reads, if any
    pub fn settings_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(SETTINGS_ENV) {
            return Some(PathBuf::from(path));
        }
        let exe = std::env::current_exe().ok()?;
        let path = exe.parent()?.join(SETTINGS_FILE);
        path.exists().then_some(path)
    }

    /// Where the log is written while the terminal is in raw mode
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE))
    }

    pub fn frame_ms(&self) -> u64 {
        1000 / u64::from(self.fps.max(1))
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.fps == 0 {
            return Err(SettingsError::Invalid("fps must be positive"));
        }
        let jb = &self.jump_ball;
        if !screen_fits(jb.width, jb.height) {
            return Err(SettingsError::Invalid("jump_ball screen must be 1..=4096 px each way"));
        }
        if jb.ground_height >= jb.height {
            return Err(SettingsError::Invalid("jump_ball ground must leave room for sky"));
        }
        if jb.spawn_cadence == 0 {
            return Err(SettingsError::Invalid("jump_ball spawn_cadence must be positive"));
        }
        // Negated comparisons also catch NaN
        if !(jb.jump_velocity < 0.0) {
            return Err(SettingsError::Invalid("jump_ball jump_velocity must point upward"));
        }
        if !(jb.ball_radius > 0.0) {
            return Err(SettingsError::Invalid("jump_ball ball_radius must be positive"));
        }
        if !(jb.obstacle_width > 0.0) || !(jb.obstacle_height > 0.0) {
            return Err(SettingsError::Invalid("jump_ball obstacles must have a positive size"));
        }
        if !(jb.base_speed > 0.0) {
            return Err(SettingsError::Invalid("jump_ball base_speed must be positive"));
        }
        if !(jb.base_gravity >= 0.0) {
            return Err(SettingsError::Invalid("jump_ball base_gravity must not be negative"));
        }
        let cb = &self.color_box;
        if !screen_fits(cb.width, cb.height) {
            return Err(SettingsError::Invalid("color_box screen must be 1..=4096 px each way"));
        }
        let needed = u64::from(cb.box_size) + 2 * u64::from(cb.margin);
        if cb.box_size == 0 || needed > u64::from(cb.width.min(cb.height)) {
            return Err(SettingsError::Invalid("color_box box does not fit the screen"));
        }
        if cb.corner_period == 0 {
            return Err(SettingsError::Invalid("color_box corner_period must be positive"));
        }
        Ok(())
    }
}
