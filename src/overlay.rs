use opencv::core::{Mat, Rect, Scalar};
use opencv::imgproc;
use serde::Deserialize;

use crate::error::Result;

#[derive(Deserialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct OverlayConfig {
    /// BGR
    pub color: [u8; 3],
    pub thickness: i32,
}

impl Default for OverlayConfig {
    fn default() -> OverlayConfig {
        OverlayConfig {
            color: [0, 0, 255],
            thickness: 2,
        }
    }
}

impl OverlayConfig {
    fn scalar(&self) -> Scalar {
        Scalar::new(
            self.color[0] as f64,
            self.color[1] as f64,
            self.color[2] as f64,
            0.,
        )
    }
}

/// Paints `rect` solid with `value` on every channel, clipped to the image.
pub fn fill_rect(image: &mut Mat, rect: Rect, value: f64) -> Result<()> {
    imgproc::rectangle(image, rect, Scalar::all(value), imgproc::FILLED, imgproc::LINE_8, 0)?;
    Ok(())
}

pub fn draw_boxes(frame: &mut Mat, boxes: &[Rect], config: &OverlayConfig) -> Result<()> {
    let color = config.scalar();
    for bounding in boxes {
        imgproc::rectangle(
            frame,
            *bounding,
            color,
            config.thickness,
            imgproc::LINE_8,
            0,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{CV_8UC3, Vec3b};
    use opencv::prelude::*;

    #[test]
    fn outline_is_drawn_in_red() {
        let mut frame =
            Mat::new_rows_cols_with_default(50, 50, CV_8UC3, Scalar::all(0.0)).unwrap();
        draw_boxes(
            &mut frame,
            &[Rect::new(10, 10, 20, 20)],
            &OverlayConfig::default(),
        )
        .unwrap();

        let edge = *frame.at_2d::<Vec3b>(10, 20).unwrap();
        assert_eq!(edge, Vec3b::from([0, 0, 255]));
        let inside = *frame.at_2d::<Vec3b>(20, 20).unwrap();
        assert_eq!(inside, Vec3b::from([0, 0, 0]));
    }

    #[test]
    fn fill_is_clipped_and_solid() {
        let mut frame =
            Mat::new_rows_cols_with_default(10, 10, CV_8UC3, Scalar::all(0.0)).unwrap();
        fill_rect(&mut frame, Rect::new(6, 6, 10, 10), 200.0).unwrap();
        assert_eq!(*frame.at_2d::<Vec3b>(9, 9).unwrap(), Vec3b::from([200, 200, 200]));
        assert_eq!(*frame.at_2d::<Vec3b>(7, 7).unwrap(), Vec3b::from([200, 200, 200]));
        assert_eq!(*frame.at_2d::<Vec3b>(5, 5).unwrap(), Vec3b::from([0, 0, 0]));
    }

    #[test]
    fn no_boxes_leaves_frame_untouched() {
        let mut frame =
            Mat::new_rows_cols_with_default(8, 8, CV_8UC3, Scalar::all(7.0)).unwrap();
        draw_boxes(&mut frame, &[], &OverlayConfig::default()).unwrap();
        assert_eq!(*frame.at_2d::<Vec3b>(4, 4).unwrap(), Vec3b::from([7, 7, 7]));
    }
}
