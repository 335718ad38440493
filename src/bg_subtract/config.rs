use serde::Deserialize;

use crate::bg_subtract::mog2::Mog2Settings;
use crate::bg_subtract::naive::NaiveSettings;
use crate::bg_subtract::test::TestSettings;
use crate::types::SubtractorType;

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct SubtractorConfig {
    pub subtractor_type: SubtractorType,
    pub mog2_settings: Mog2Settings,
    pub naive_settings: NaiveSettings,
    pub test_settings: TestSettings,
}
