use log::{debug, error};
use opencv::core::{Mat, Ptr};
use opencv::prelude::*;
use opencv::video::{
    BackgroundSubtractorMOG2, BackgroundSubtractorTrait, create_background_subtractor_mog2,
};
use serde::Deserialize;

use crate::error::Result;
use crate::types::BackgroundSubtractor;

#[derive(Deserialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct Mog2Settings {
    pub history: i32,
    pub var_threshold: f64,
    pub detect_shadows: bool,
    /// Negative lets the model pick its own rate from `history`.
    pub learning_rate: f64,
}

impl Default for Mog2Settings {
    fn default() -> Mog2Settings {
        Mog2Settings {
            history: 500,
            var_threshold: 16.0,
            detect_shadows: true,
            learning_rate: -1.0,
        }
    }
}

pub struct Mog2Subtractor {
    subtractor: Ptr<BackgroundSubtractorMOG2>,
    settings: Mog2Settings,
}

fn mog2_from_settings(
    Mog2Settings {
        history,
        var_threshold,
        detect_shadows,
        learning_rate: _,
    }: Mog2Settings,
) -> Result<Ptr<BackgroundSubtractorMOG2>> {
    Ok(create_background_subtractor_mog2(
        history,
        var_threshold,
        detect_shadows,
    )?)
}

impl Mog2Subtractor {
    pub fn new(settings: Mog2Settings) -> Result<Mog2Subtractor> {
        let subtractor = mog2_from_settings(settings)?;
        debug!("created mog2 subtractor {settings:?}");
        Ok(Mog2Subtractor {
            subtractor,
            settings,
        })
    }
}

impl BackgroundSubtractor for Mog2Subtractor {
    fn apply(&mut self, frame: &Mat) -> Result<Mat> {
        let mut mask = Mat::default();
        // MOG2 redeclares `apply`, name the base trait to keep the call unambiguous
        BackgroundSubtractorTrait::apply(
            &mut self.subtractor,
            frame,
            &mut mask,
            self.settings.learning_rate,
        )?;
        Ok(mask)
    }

    fn reset(&mut self, _background: Option<Mat>) {
        match mog2_from_settings(self.settings) {
            Ok(subtractor) => self.subtractor = subtractor,
            Err(e) => error!("could not reset mog2 background subtractor: {e}"),
        }
    }
}
