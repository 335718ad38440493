use opencv::core::Mat;
use serde::Deserialize;

use crate::error::Result;

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubtractorType {
    #[default]
    Mog2,
    Naive,
    Test,
}

pub trait BackgroundSubtractor {
    /// Foreground mask for `frame`, single channel 8 bit, same size as the frame.
    fn apply(&mut self, frame: &Mat) -> Result<Mat>;

    /// Forget the learned background. Subtractors that work against a
    /// reference frame take `background` as the new reference.
    fn reset(&mut self, background: Option<Mat>);
}
