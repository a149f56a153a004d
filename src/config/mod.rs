pub mod settings;

pub use settings::{AppConfig, GameSettings, OutputSettings};
