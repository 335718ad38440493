use log::{debug, info};
use std::sync::mpsc::{Receiver, SyncSender};
use std::time::SystemTime;

use crate::error::{Error, Result};
use crate::source::FrameSource;
use crate::threads::try_sending;
use crate::types::thread_types::*;

const THREAD: &str = "capture thread";

/// Reads one frame per `GetFrame` request and hands it to `frame_queue`.
pub fn capture_thread<S: FrameSource>(
    capture_control_queue: Receiver<CaptureMessage>,
    frame_queue: SyncSender<CaptureResult>,
    mut source: S,
) -> Result<()> {
    let mut frames_read: u64 = 0;
    loop {
        match capture_control_queue.recv() {
            Ok(CaptureMessage::Quit) => {
                info!("quitting capture gracefully after {frames_read} frames");
                return Ok(());
            }
            Ok(CaptureMessage::GetFrame) => {
                let data = source.read_frame();
                if data.is_ok() {
                    frames_read += 1;
                }
                try_sending(
                    &frame_queue,
                    CaptureResult {
                        data,
                        timestamp: SystemTime::now(),
                    },
                    THREAD,
                    "frame_queue",
                );
            }
            Err(error) => {
                debug!("{THREAD}: {error}");
                return Err(Error::ChannelClosed {
                    thread: THREAD,
                    queue: "capture_control_queue",
                });
            }
        }
    }
}
