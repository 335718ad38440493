use log::debug;
use opencv::core::{CV_8U, Mat, Vector, absdiff, greater_than_mat_f64, split};
use opencv::prelude::*;
use serde::Deserialize;

use crate::error::Result;
use crate::types::BackgroundSubtractor;

#[derive(Deserialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct NaiveSettings {
    pub threshold_per_channel: f64,
}

impl Default for NaiveSettings {
    fn default() -> NaiveSettings {
        NaiveSettings {
            threshold_per_channel: 50_f64,
        }
    }
}

/// Differences every frame against a fixed reference frame.
pub struct NaiveSubtractor {
    background_approximation: Option<Mat>,
    settings: NaiveSettings,
}

fn naive_background_removal(img: &Mat, ref_img: &Mat, threshold: f64) -> Result<Mat> {
    let mut res = Mat::default();
    absdiff(img, ref_img, &mut res)?;

    let mut channels: Vector<Mat> = Vector::default();
    split(&res, &mut channels)?;
    let num_channels = channels.len();

    // saturating u8 sum over all channels
    let init = channels.get(0);
    let acc = channels
        .iter()
        .skip(1)
        .fold(init, |acc, m| (acc? + (m)).into_result()?.to_mat())?;

    let mask = greater_than_mat_f64(&acc, (num_channels as f64) * threshold)?.to_mat()?;
    Ok(mask)
}

impl NaiveSubtractor {
    pub fn new(settings: NaiveSettings) -> NaiveSubtractor {
        NaiveSubtractor {
            background_approximation: None,
            settings,
        }
    }
}

impl BackgroundSubtractor for NaiveSubtractor {
    fn apply(&mut self, frame: &Mat) -> Result<Mat> {
        match &self.background_approximation {
            Some(reference) => naive_background_removal(
                frame,
                reference,
                self.settings.threshold_per_channel,
            ),
            None => {
                debug!("no reference yet, taking current frame");
                self.background_approximation = Some(frame.try_clone()?);
                Ok(Mat::zeros(frame.rows(), frame.cols(), CV_8U)?.to_mat()?)
            }
        }
    }

    fn reset(&mut self, background: Option<Mat>) {
        self.background_approximation = background;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::fill_rect;
    use opencv::core::{CV_8UC3, Rect, Scalar, count_non_zero};

    fn frame(value: f64) -> Mat {
        Mat::new_rows_cols_with_default(40, 40, CV_8UC3, Scalar::all(value)).unwrap()
    }

    #[test]
    fn first_frame_becomes_reference() {
        let mut subtractor = NaiveSubtractor::new(NaiveSettings::default());
        let mask = subtractor.apply(&frame(30.0)).unwrap();
        assert_eq!(count_non_zero(&mask).unwrap(), 0);

        let mask = subtractor.apply(&frame(30.0)).unwrap();
        assert_eq!(count_non_zero(&mask).unwrap(), 0);
    }

    #[test]
    fn changed_region_is_foreground() {
        let mut subtractor = NaiveSubtractor::new(NaiveSettings::default());
        subtractor.apply(&frame(0.0)).unwrap();

        let mut moved = frame(0.0);
        fill_rect(&mut moved, Rect::new(10, 10, 5, 5), 200.0).unwrap();
        let mask = subtractor.apply(&moved).unwrap();
        assert_eq!(count_non_zero(&mask).unwrap(), 25);
        assert_eq!(*mask.at_2d::<u8>(12, 12).unwrap(), 255);
    }

    #[test]
    fn small_changes_stay_background() {
        let mut subtractor = NaiveSubtractor::new(NaiveSettings::default());
        subtractor.reset(Some(frame(100.0)));
        let mask = subtractor.apply(&frame(140.0)).unwrap();
        assert_eq!(count_non_zero(&mask).unwrap(), 0);
    }
}
