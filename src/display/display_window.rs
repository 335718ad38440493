use log::{debug, error, info};
use opencv::highgui;
use opencv::prelude::*;

use std::sync::mpsc::{Receiver, SyncSender};

use crate::display::DisplayConfig;
use crate::display::timestep::FrameClock;
use crate::error::{Error, Result};
use crate::pipeline::FrameOutcome;
use crate::threads::try_sending;
use crate::types::thread_types::*;

const THREAD: &str = "display thread";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames that came back annotated.
    pub frames: u64,
    pub skipped: u64,
    pub boxes: u64,
    pub errors: u64,
}

impl RunSummary {
    fn received(&self) -> u64 {
        self.frames + self.skipped + self.errors
    }
}

enum Viewer {
    Window(String),
    Headless,
}

impl Viewer {
    fn open(config: &DisplayConfig) -> Result<Viewer> {
        if !config.enabled {
            info!("running headless");
            return Ok(Viewer::Headless);
        }
        highgui::named_window(&config.window_name, highgui::WINDOW_AUTOSIZE)?;
        Ok(Viewer::Window(config.window_name.clone()))
    }

    fn show(&self, frame: &Mat) -> Result<()> {
        if let Viewer::Window(name) = self {
            highgui::imshow(name, frame)?;
        }
        Ok(())
    }

    fn poll_key(&self, wait_ms: i32) -> Result<Option<i32>> {
        match self {
            Viewer::Window(_) => {
                let key = highgui::wait_key(wait_ms)?;
                Ok((key >= 0).then_some(key & 0xff))
            }
            Viewer::Headless => Ok(None),
        }
    }

    fn close(&self) {
        if let Viewer::Window(_) = self {
            if let Err(e) = highgui::destroy_all_windows() {
                error!("could not close windows: {e}");
            }
        }
    }
}

fn send_pipeline_msg(pipeline_control_queue: &SyncSender<PipelineMessage>, msg: PipelineMessage) {
    try_sending(pipeline_control_queue, msg, THREAD, "pipeline_control_queue");
}

fn display_loop(
    viewer: &Viewer,
    pipeline_control_queue: &SyncSender<PipelineMessage>,
    result_queue: &Receiver<DetectionResult>,
    config: &DisplayConfig,
    summary: &mut RunSummary,
) -> Result<()> {
    let mut clock = FrameClock::new();
    let mut consecutive_errors = 0;
    loop {
        send_pipeline_msg(pipeline_control_queue, PipelineMessage::GenerateFrame);

        let result = result_queue.recv().map_err(|_| Error::ChannelClosed {
            thread: THREAD,
            queue: "result_queue",
        })?;
        match result.data {
            Ok(FrameOutcome::Annotated { frame, boxes }) => {
                consecutive_errors = 0;
                summary.frames += 1;
                summary.boxes += boxes.len() as u64;
                viewer.show(&frame)?;

                clock.tick();
                if config.fps_log_interval > 0 && clock.frame_count % config.fps_log_interval == 0
                {
                    if let Some(fps) = clock.fps() {
                        debug!("{fps:.1} fps after {:.1}s", clock.runtime_secs());
                    }
                }
            }
            Ok(FrameOutcome::Skipped) => {
                consecutive_errors = 0;
                summary.skipped += 1;
            }
            Ok(FrameOutcome::EndOfStream) => {
                info!("end of stream");
                return Ok(());
            }
            Err(e) => {
                summary.errors += 1;
                consecutive_errors += 1;
                error!("received frame is error: {e}");
                if consecutive_errors >= config.max_consecutive_errors {
                    return Err(e);
                }
            }
        }

        if config.max_frames.is_some_and(|max| summary.received() >= max) {
            info!("reached frame limit");
            return Ok(());
        }

        match viewer.poll_key(config.wait_ms)? {
            Some(key) if key == config.quit_key => {
                info!("quit requested");
                return Ok(());
            }
            Some(key) if key == config.reset_key as i32 => {
                send_pipeline_msg(pipeline_control_queue, PipelineMessage::Reset);
            }
            _ => (),
        }
    }
}

/// Drives the pipeline one frame at a time until the stream ends, the user
/// quits or the frame limit is hit. The pipeline is always told to quit.
pub fn run_display(
    pipeline_control_queue: SyncSender<PipelineMessage>,
    result_queue: Receiver<DetectionResult>,
    config: &DisplayConfig,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let outcome = Viewer::open(config).and_then(|viewer| {
        let res = display_loop(
            &viewer,
            &pipeline_control_queue,
            &result_queue,
            config,
            &mut summary,
        );
        viewer.close();
        res
    });

    send_pipeline_msg(&pipeline_control_queue, PipelineMessage::Quit);
    info!("quitting display gracefully");
    outcome.map(|_| summary)
}
