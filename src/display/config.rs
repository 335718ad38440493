use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DisplayConfig {
    /// Without a window frames are processed as fast as they can be read.
    pub enabled: bool,
    pub window_name: String,
    pub wait_ms: i32,
    pub quit_key: i32,
    pub reset_key: char,
    pub max_frames: Option<u64>,
    pub max_consecutive_errors: u32,
    pub fps_log_interval: u64,
}

impl Default for DisplayConfig {
    fn default() -> DisplayConfig {
        DisplayConfig {
            enabled: true,
            window_name: "Moving Objects".to_string(),
            wait_ms: 30,
            quit_key: 27,
            reset_key: 'r',
            max_frames: None,
            max_consecutive_errors: 10,
            fps_log_interval: 100,
        }
    }
}
