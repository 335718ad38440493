use log::{debug, error, info};
use opencv::prelude::*;
use std::sync::mpsc::{Receiver, SyncSender};
use std::time::SystemTime;

use crate::config::MotionConfig;
use crate::error::{Error, Result};
use crate::pipeline::MotionDetector;
use crate::threads::try_sending;
use crate::types::thread_types::*;

const THREAD: &str = "detection thread";

fn closed(queue: &'static str) -> Error {
    Error::ChannelClosed {
        thread: THREAD,
        queue,
    }
}

/// Runs the motion detector on request of the display loop.
///
/// A frame is requested from the capture thread at the top of every
/// iteration, so it's usually ready by the time the next command arrives.
pub fn detection_pipeline(
    capture_control_queue: SyncSender<CaptureMessage>,
    frame_queue: Receiver<CaptureResult>,
    pipeline_control_queue: Receiver<PipelineMessage>,
    result_queue: SyncSender<DetectionResult>,
    config: MotionConfig,
    base_address: usize,
) -> Result<()> {
    // built here so the subtractor never has to cross threads
    let mut detector = MotionDetector::from_config(&config, base_address)?;
    loop {
        try_sending(
            &capture_control_queue,
            CaptureMessage::GetFrame,
            THREAD,
            "capture_control_queue",
        );

        let msg = pipeline_control_queue
            .recv()
            .map_err(|_| closed("pipeline_control_queue"))?;
        match msg {
            PipelineMessage::Quit => {
                try_sending(
                    &capture_control_queue,
                    CaptureMessage::Quit,
                    THREAD,
                    "capture_control_queue",
                );
                // the frame requested above is still on its way
                let _ = frame_queue.recv();
                info!("quitting detection gracefully");
                return Ok(());
            }
            PipelineMessage::GenerateFrame => {
                let captured = frame_queue.recv().map_err(|_| closed("frame_queue"))?;
                debug!("frame captured at {:?}", captured.timestamp);
                let data = captured.data.and_then(|frame| detector.process(frame));
                try_sending(
                    &result_queue,
                    DetectionResult {
                        data,
                        timestamp: SystemTime::now(),
                    },
                    THREAD,
                    "result_queue",
                );
            }
            PipelineMessage::Reset => {
                let captured = frame_queue.recv().map_err(|_| closed("frame_queue"))?;
                match captured.data {
                    Ok(frame) => {
                        info!("resetting background model");
                        let background = if frame.empty() { None } else { Some(frame) };
                        detector.reset(background);
                    }
                    Err(e) => error!("could not reset background, no frame: {e}"),
                }
            }
        }
    }
}
