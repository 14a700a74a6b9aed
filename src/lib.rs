pub mod app;
pub mod games;
pub mod logging;
pub mod platform;
pub mod raster;
pub mod settings;

pub use app::{App, Exit, Phase};
pub use settings::{Settings, SettingsError};
