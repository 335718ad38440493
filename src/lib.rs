//! Motion detection on video streams.
//!
//! Frames are run through a background subtraction model, the resulting
//! foreground mask is thresholded and cleaned up with morphology, and every
//! outer contour left in the mask is outlined on the frame with its bounding box.

pub mod allocator;
pub mod app;
pub mod bg_subtract;
pub mod cli;
pub mod config;
pub mod detect;
pub mod display;
pub mod error;
pub mod mask;
pub mod overlay;
pub mod pipeline;
pub mod source;
pub mod threads;
pub mod types;

pub use app::run;
pub use config::MotionConfig;
pub use display::RunSummary;
pub use error::{Error, Result};
pub use pipeline::{FrameOutcome, MotionDetector};
