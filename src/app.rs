use std::sync::mpsc::{Receiver, SyncSender, sync_channel};
use std::thread::{self, JoinHandle};

use log::{error, info};

use crate::config::MotionConfig;
use crate::display::{RunSummary, run_display};
use crate::error::{Error, Result};
use crate::source::FrameSource;
use crate::threads::{capture_thread, detection_pipeline};
use crate::types::thread_types::*;

fn join(handle: JoinHandle<Result<()>>, name: &'static str) -> Result<()> {
    handle.join().map_err(|_| Error::ThreadPanicked(name))?
}

/// Wires capture, detection and display together and blocks until they all finish.
///
/// The display loop runs on the calling thread, which matters for GUI backends
/// that insist on owning the main thread.
pub fn run<S: FrameSource + Send + 'static>(
    source: S,
    config: MotionConfig,
    base_address: usize,
) -> Result<RunSummary> {
    let (frame_sender, frame_receiver): (SyncSender<CaptureResult>, Receiver<CaptureResult>) =
        sync_channel(1);
    let (capture_control_sender, capture_control_receiver): (
        SyncSender<CaptureMessage>,
        Receiver<CaptureMessage>,
    ) = sync_channel(1);
    let (pipeline_control_sender, pipeline_control_receiver): (
        SyncSender<PipelineMessage>,
        Receiver<PipelineMessage>,
    ) = sync_channel(1);
    let (result_sender, result_receiver): (
        SyncSender<DetectionResult>,
        Receiver<DetectionResult>,
    ) = sync_channel(1);

    let display_config = config.display.clone();

    let capture_handle = thread::Builder::new()
        .name("capture".to_string())
        .spawn(move || capture_thread(capture_control_receiver, frame_sender, source))?;
    let detection_handle = thread::Builder::new()
        .name("detection".to_string())
        .spawn(move || {
            detection_pipeline(
                capture_control_sender,
                frame_receiver,
                pipeline_control_receiver,
                result_sender,
                config,
                base_address,
            )
        })?;

    let display_res = run_display(pipeline_control_sender, result_receiver, &display_config);

    let detection_res = join(detection_handle, "detection thread");
    let capture_res = join(capture_handle, "capture thread");

    // a dead detection thread takes the other two down with it, report the cause
    if let Err(e) = detection_res {
        if let Err(display_err) = &display_res {
            error!("display stopped: {display_err}");
        }
        return Err(e);
    }
    let summary = display_res?;
    if let Err(e) = capture_res {
        error!("capture stopped: {e}");
        return Err(e);
    }

    info!(
        "processed {} frames, {} boxes drawn, {} skipped, {} errors",
        summary.frames, summary.boxes, summary.skipped, summary.errors
    );
    Ok(summary)
}
