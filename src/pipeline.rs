use log::{debug, trace, warn};
use opencv::core::{Mat, Rect};
use opencv::prelude::*;

use crate::allocator::OffsetAllocator;
use crate::bg_subtract::create_subtractor;
use crate::config::MotionConfig;
use crate::detect::{DetectionConfig, find_motion_boxes};
use crate::error::Result;
use crate::mask::{MaskConfig, clean_mask};
use crate::overlay::{OverlayConfig, draw_boxes};
use crate::types::BackgroundSubtractor;

#[derive(Debug)]
pub enum FrameOutcome {
    /// Input frame with the motion boxes drawn on it.
    Annotated { frame: Mat, boxes: Vec<Rect> },
    /// Per-frame block allocation failed, the frame was not processed.
    Skipped,
    EndOfStream,
}

pub struct MotionDetector {
    subtractor: Box<dyn BackgroundSubtractor>,
    allocator: OffsetAllocator,
    mask: MaskConfig,
    detection: DetectionConfig,
    overlay: OverlayConfig,
}

impl MotionDetector {
    pub fn new(
        subtractor: Box<dyn BackgroundSubtractor>,
        allocator: OffsetAllocator,
        config: &MotionConfig,
    ) -> MotionDetector {
        MotionDetector {
            subtractor,
            allocator,
            mask: config.mask,
            detection: config.detection,
            overlay: config.overlay,
        }
    }

    pub fn from_config(config: &MotionConfig, base_address: usize) -> Result<MotionDetector> {
        let subtractor = create_subtractor(&config.subtractor)?;
        Ok(MotionDetector::new(
            subtractor,
            OffsetAllocator::new(base_address),
            config,
        ))
    }

    pub fn process(&mut self, mut frame: Mat) -> Result<FrameOutcome> {
        if frame.empty() {
            return Ok(FrameOutcome::EndOfStream);
        }

        let image_size = frame.total() * frame.elem_size()?;
        let Some(block) = self.allocator.allocate(image_size) else {
            warn!("memory allocation failed for {image_size} bytes");
            return Ok(FrameOutcome::Skipped);
        };
        debug!("memory allocated successfully at address {block}");

        let raw = self.subtractor.apply(&frame)?;
        let mask = clean_mask(&raw, &self.mask)?;
        let boxes = find_motion_boxes(&mask, &self.detection)?;
        draw_boxes(&mut frame, &boxes, &self.overlay)?;
        trace!("{} moving objects", boxes.len());

        Ok(FrameOutcome::Annotated { frame, boxes })
    }

    pub fn reset(&mut self, background: Option<Mat>) {
        self.subtractor.reset(background);
    }
}
