use opencv::core::{CV_8U, Mat, Rect};
use opencv::prelude::*;
use serde::Deserialize;

use crate::error::Result;
use crate::overlay::fill_rect;
use crate::types::BackgroundSubtractor;

#[derive(Deserialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct TestSettings {
    pub test_box_pos: (i32, i32),
    pub test_box_size: (i32, i32),
}

impl Default for TestSettings {
    fn default() -> TestSettings {
        TestSettings {
            test_box_pos: (0, 0),
            test_box_size: (200, 200),
        }
    }
}

/// Reports the same rectangle as foreground on every frame.
pub struct TestSubtractor {
    pub settings: TestSettings,
}

impl TestSubtractor {
    pub fn new(settings: TestSettings) -> TestSubtractor {
        TestSubtractor { settings }
    }
}

impl BackgroundSubtractor for TestSubtractor {
    fn apply(&mut self, frame: &Mat) -> Result<Mat> {
        let mut mask = Mat::zeros(frame.rows(), frame.cols(), CV_8U)?.to_mat()?;
        let (x, y) = self.settings.test_box_pos;
        let (width, height) = self.settings.test_box_size;
        fill_rect(&mut mask, Rect::new(x, y, width, height), 255.0)?;
        Ok(mask)
    }

    fn reset(&mut self, _background: Option<Mat>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{CV_8UC3, Scalar, count_non_zero};

    #[test]
    fn box_is_clipped_to_frame() {
        let mut subtractor = TestSubtractor::new(TestSettings {
            test_box_pos: (50, 50),
            test_box_size: (100, 100),
        });
        let frame =
            Mat::new_rows_cols_with_default(60, 80, CV_8UC3, Scalar::all(0.0)).unwrap();
        let mask = subtractor.apply(&frame).unwrap();
        assert_eq!(count_non_zero(&mask).unwrap(), 10 * 30);
    }
}
