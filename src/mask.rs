use opencv::core::{BORDER_CONSTANT, Mat, Point, Size};
use opencv::imgproc;
use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KernelShape {
    #[default]
    Ellipse,
    Rect,
    Cross,
}

impl KernelShape {
    fn morph_shape(self) -> i32 {
        match self {
            KernelShape::Ellipse => imgproc::MORPH_ELLIPSE,
            KernelShape::Rect => imgproc::MORPH_RECT,
            KernelShape::Cross => imgproc::MORPH_CROSS,
        }
    }
}

#[derive(Deserialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct MaskConfig {
    pub threshold: f64,
    pub max_value: f64,
    pub kernel_shape: KernelShape,
    pub kernel_size: i32,
    pub open: bool,
    pub close: bool,
}

impl Default for MaskConfig {
    fn default() -> MaskConfig {
        MaskConfig {
            threshold: 128.0,
            max_value: 255.0,
            kernel_shape: KernelShape::Ellipse,
            kernel_size: 5,
            open: true,
            close: true,
        }
    }
}

impl MaskConfig {
    pub fn validate(&self) -> Result<()> {
        if self.kernel_size < 1 || self.kernel_size % 2 == 0 {
            return Err(Error::InvalidConfig(format!(
                "mask.kernel_size must be odd and positive, got {}",
                self.kernel_size
            )));
        }
        Ok(())
    }
}

fn morph(src: &Mat, op: i32, kernel: &Mat) -> Result<Mat> {
    let mut dst = Mat::default();
    imgproc::morphology_ex(
        src,
        &mut dst,
        op,
        kernel,
        Point::new(-1, -1),
        1,
        BORDER_CONSTANT,
        imgproc::morphology_default_border_value()?,
    )?;
    Ok(dst)
}

/// Binarizes a raw foreground mask and removes speckle (open) and holes (close).
///
/// Shadow pixels reported by MOG2 (127) fall below the default threshold and are dropped.
pub fn clean_mask(raw: &Mat, config: &MaskConfig) -> Result<Mat> {
    let mut binary = Mat::default();
    imgproc::threshold(
        raw,
        &mut binary,
        config.threshold,
        config.max_value,
        imgproc::THRESH_BINARY,
    )?;

    let kernel = imgproc::get_structuring_element(
        config.kernel_shape.morph_shape(),
        Size::new(config.kernel_size, config.kernel_size),
        Point::new(-1, -1),
    )?;

    let mut filtered = binary;
    if config.open {
        filtered = morph(&filtered, imgproc::MORPH_OPEN, &kernel)?;
    }
    if config.close {
        filtered = morph(&filtered, imgproc::MORPH_CLOSE, &kernel)?;
    }
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::fill_rect;
    use opencv::core::{CV_8UC1, Rect, Scalar, count_non_zero};
    use opencv::prelude::*;

    fn blank() -> Mat {
        Mat::new_rows_cols_with_default(60, 60, CV_8UC1, Scalar::all(0.0)).unwrap()
    }

    fn fill(mask: &mut Mat, rect: Rect, value: f64) {
        fill_rect(mask, rect, value).unwrap();
    }

    #[test]
    fn shadows_are_dropped() {
        let mut raw = blank();
        fill(&mut raw, Rect::new(10, 10, 20, 20), 127.0);
        let cleaned = clean_mask(&raw, &MaskConfig::default()).unwrap();
        assert_eq!(count_non_zero(&cleaned).unwrap(), 0);
    }

    #[test]
    fn isolated_pixels_are_opened_away() {
        let mut raw = blank();
        fill(&mut raw, Rect::new(5, 5, 1, 1), 255.0);
        fill(&mut raw, Rect::new(40, 40, 2, 2), 255.0);
        let cleaned = clean_mask(&raw, &MaskConfig::default()).unwrap();
        assert_eq!(count_non_zero(&cleaned).unwrap(), 0);
    }

    #[test]
    fn solid_blob_survives_with_output_levels() {
        let mut raw = blank();
        fill(&mut raw, Rect::new(20, 20, 16, 16), 255.0);
        let cleaned = clean_mask(&raw, &MaskConfig::default()).unwrap();
        assert_eq!(*cleaned.at_2d::<u8>(28, 28).unwrap(), 255);
        assert_eq!(*cleaned.at_2d::<u8>(2, 2).unwrap(), 0);
        assert_eq!(cleaned.typ(), CV_8UC1);
    }

    #[test]
    fn morphology_can_be_disabled() {
        let mut raw = blank();
        fill(&mut raw, Rect::new(5, 5, 1, 1), 200.0);
        let config = MaskConfig {
            open: false,
            close: false,
            ..MaskConfig::default()
        };
        let cleaned = clean_mask(&raw, &config).unwrap();
        assert_eq!(count_non_zero(&cleaned).unwrap(), 1);
    }

    #[test]
    fn kernel_size_must_be_odd() {
        let config = MaskConfig {
            kernel_size: 6,
            ..MaskConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(MaskConfig::default().validate().is_ok());
    }
}
