use std::io;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use motion_boxes::cli::{Args, resolve_base_address, resolve_location};
use motion_boxes::source::{CaptureSource, escape_location, open_capture, validate_source};
use motion_boxes::{MotionConfig, Result, RunSummary, run};

fn start(args: Args) -> Result<RunSummary> {
    let mut config = MotionConfig::load_or_default(&args.config)?;
    args.apply(&mut config);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let base_address = resolve_base_address(&config, &mut input, &mut output)?;
    let location = resolve_location(&config, &mut input, &mut output)?;

    let escaped = escape_location(&location);
    info!("opening location {escaped}");
    let source = CaptureSource::from_location(&escaped);
    validate_source(&source)?;
    let capture = open_capture(&source)?;

    run(capture, config, base_address)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match start(Args::parse()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
