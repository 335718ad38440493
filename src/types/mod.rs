pub mod bg_subtract_types;
pub mod thread_types;

pub use bg_subtract_types::{BackgroundSubtractor, SubtractorType};
