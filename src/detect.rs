use opencv::core::{Mat, Point, Rect, Vector};
use opencv::imgproc;
use opencv::prelude::*;
use serde::Deserialize;

use crate::error::Result;

#[derive(Deserialize, Clone, Copy, Debug, Default)]
#[serde(default)]
pub struct DetectionConfig {
    /// Boxes with a smaller pixel area are discarded. 0 keeps everything.
    pub min_area: i32,
}

/// One bounding box per outer contour of a binary mask.
pub fn find_motion_boxes(mask: &Mat, config: &DetectionConfig) -> Result<Vec<Rect>> {
    let mut contours: Vector<Vector<Point>> = Vector::new();
    imgproc::find_contours(
        mask,
        &mut contours,
        imgproc::RETR_EXTERNAL,
        imgproc::CHAIN_APPROX_SIMPLE,
        Point::new(0, 0),
    )?;

    let mut boxes = Vec::with_capacity(contours.len());
    for contour in contours.iter() {
        let bounding = imgproc::bounding_rect(&contour)?;
        if bounding.area() >= config.min_area {
            boxes.push(bounding);
        }
    }
    Ok(boxes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::fill_rect;
    use opencv::core::{CV_8UC1, Scalar};

    fn mask_with(rects: &[Rect]) -> Mat {
        let mut mask =
            Mat::new_rows_cols_with_default(100, 100, CV_8UC1, Scalar::all(0.0)).unwrap();
        for rect in rects {
            fill_rect(&mut mask, *rect, 255.0).unwrap();
        }
        mask
    }

    fn sorted(mut boxes: Vec<Rect>) -> Vec<Rect> {
        boxes.sort_by_key(|r| (r.x, r.y));
        boxes
    }

    #[test]
    fn empty_mask_has_no_boxes() {
        let boxes = find_motion_boxes(&mask_with(&[]), &DetectionConfig::default()).unwrap();
        assert!(boxes.is_empty());
    }

    #[test]
    fn each_blob_gets_its_bounding_box() {
        let a = Rect::new(5, 5, 10, 20);
        let b = Rect::new(60, 40, 30, 8);
        let boxes = find_motion_boxes(&mask_with(&[a, b]), &DetectionConfig::default()).unwrap();
        assert_eq!(sorted(boxes), vec![a, b]);
    }

    #[test]
    fn nested_blobs_report_outer_contour_only() {
        let mut mask = mask_with(&[Rect::new(10, 10, 50, 50)]);
        fill_rect(&mut mask, Rect::new(20, 20, 30, 30), 0.0).unwrap();
        fill_rect(&mut mask, Rect::new(30, 30, 5, 5), 255.0).unwrap();
        let boxes = find_motion_boxes(&mask, &DetectionConfig::default()).unwrap();
        assert_eq!(boxes, vec![Rect::new(10, 10, 50, 50)]);
    }

    #[test]
    fn min_area_filters_small_boxes() {
        let big = Rect::new(5, 5, 20, 20);
        let small = Rect::new(70, 70, 3, 3);
        let config = DetectionConfig { min_area: 50 };
        let boxes = find_motion_boxes(&mask_with(&[big, small]), &config).unwrap();
        assert_eq!(boxes, vec![big]);
    }
}
