mod config;
pub mod display_window;
pub mod timestep;

pub use config::DisplayConfig;
pub use display_window::{RunSummary, run_display};
