mod config;
mod mog2;
mod naive;
mod test;

use log::info;

pub use crate::types::{BackgroundSubtractor, SubtractorType};
pub use config::SubtractorConfig;
pub use mog2::{Mog2Settings, Mog2Subtractor};
pub use naive::{NaiveSettings, NaiveSubtractor};
pub use test::{TestSettings, TestSubtractor};

use crate::error::Result;

pub fn create_subtractor(config: &SubtractorConfig) -> Result<Box<dyn BackgroundSubtractor>> {
    info!("using {:?} background subtractor", config.subtractor_type);
    Ok(match config.subtractor_type {
        SubtractorType::Mog2 => Box::new(Mog2Subtractor::new(config.mog2_settings)?),
        SubtractorType::Naive => Box::new(NaiveSubtractor::new(config.naive_settings)),
        SubtractorType::Test => Box::new(TestSubtractor::new(config.test_settings)),
    })
}
