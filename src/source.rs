use std::collections::VecDeque;

use log::{debug, info};
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::error::{Error, Result};

/// Anything frames can be pulled from. An empty `Mat` means the stream ended.
pub trait FrameSource {
    fn read_frame(&mut self) -> Result<Mat>;
}

impl FrameSource for VideoCapture {
    fn read_frame(&mut self) -> Result<Mat> {
        let mut frame = Mat::default();
        if !self.read(&mut frame)? {
            debug!("capture returned no frame");
            return Ok(Mat::default());
        }
        Ok(frame)
    }
}

/// Replays frames that are already in memory.
#[derive(Default)]
pub struct FrameQueue {
    frames: VecDeque<Mat>,
}

impl FrameQueue {
    pub fn new(frames: impl IntoIterator<Item = Mat>) -> FrameQueue {
        FrameQueue {
            frames: frames.into_iter().collect(),
        }
    }
}

impl FrameSource for FrameQueue {
    fn read_frame(&mut self) -> Result<Mat> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureSource {
    Device(i32),
    File(String),
}

impl CaptureSource {
    /// A bare integer selects a camera device, anything else is opened as a file.
    pub fn from_location(location: &str) -> CaptureSource {
        let location = location.trim();
        match location.parse::<i32>() {
            Ok(index) => CaptureSource::Device(index),
            Err(_) => CaptureSource::File(location.to_string()),
        }
    }

    fn describe(&self) -> String {
        match self {
            CaptureSource::Device(index) => format!("camera {index}"),
            CaptureSource::File(path) => path.clone(),
        }
    }
}

/// Doubles every backslash in a user supplied location.
pub fn escape_location(location: &str) -> String {
    location.replace('\\', "\\\\")
}

pub fn open_capture(source: &CaptureSource) -> Result<VideoCapture> {
    let cam = match source {
        CaptureSource::Device(index) => VideoCapture::new(*index, videoio::CAP_ANY)?,
        CaptureSource::File(path) => VideoCapture::from_file(path, videoio::CAP_ANY)?,
    };
    if !cam.is_opened()? {
        return Err(Error::SourceUnavailable(source.describe()));
    }
    info!("opened {}", source.describe());
    Ok(cam)
}

pub fn validate_source(source: &CaptureSource) -> Result<()> {
    let mut cam = open_capture(source)?;
    cam.release()?;
    Ok(())
}
