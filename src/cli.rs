use std::io::{BufRead, ErrorKind, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::allocator::parse_base_address;
use crate::config::MotionConfig;
use crate::error::{Error, Result};

/// Outline moving objects in a video.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// TOML settings file, defaults are used if it doesn't exist
    #[arg(short, long, default_value = "motion_boxes.toml")]
    pub config: PathBuf,

    /// Video file or camera index
    #[arg(short, long)]
    pub input: Option<String>,

    /// Base address for the per-frame offset allocator (hex, octal or decimal)
    #[arg(short, long)]
    pub base_address: Option<String>,

    /// Process without opening a window
    #[arg(long)]
    pub headless: bool,

    /// Stop after this many frames
    #[arg(long)]
    pub max_frames: Option<u64>,
}

impl Args {
    /// Command line values win over the config file.
    pub fn apply(&self, config: &mut MotionConfig) {
        if let Some(input) = &self.input {
            config.capture.location = Some(input.clone());
        }
        if let Some(base_address) = &self.base_address {
            config.allocator.base_address = Some(base_address.clone());
        }
        if self.headless {
            config.display.enabled = false;
        }
        if self.max_frames.is_some() {
            config.display.max_frames = self.max_frames;
        }
    }
}

/// Prints `message` and reads one line, without its line ending.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::Io(std::io::Error::new(
            ErrorKind::UnexpectedEof,
            "no input while prompting",
        )));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn resolve_base_address<R: BufRead, W: Write>(
    config: &MotionConfig,
    input: &mut R,
    output: &mut W,
) -> Result<usize> {
    match &config.allocator.base_address {
        Some(text) => parse_base_address(text),
        None => parse_base_address(&prompt(input, output, "Enter the base address of memory: ")?),
    }
}

pub fn resolve_location<R: BufRead, W: Write>(
    config: &MotionConfig,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    match &config.capture.location {
        Some(location) => Ok(location.clone()),
        None => prompt(input, output, "Enter the video location: "),
    }
}
