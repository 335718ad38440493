mod capture;
mod detection;
mod util;

pub use capture::capture_thread;
pub use detection::detection_pipeline;
pub use util::try_sending;
