use opencv::core::Mat;
use std::time::SystemTime;

use crate::error::Result;
use crate::pipeline::FrameOutcome;

pub enum CaptureMessage {
    GetFrame,
    Quit,
}

pub enum PipelineMessage {
    GenerateFrame,
    /// Relearn the background, seeded with the next captured frame.
    Reset,
    Quit,
}

#[derive(Debug)]
pub struct CaptureResult {
    pub data: Result<Mat>,
    pub timestamp: SystemTime,
}

#[derive(Debug)]
pub struct DetectionResult {
    pub data: Result<FrameOutcome>,
    pub timestamp: SystemTime,
}
