use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("opencv error: {0}")]
    OpenCv(#[from] opencv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid base address `{0}`")]
    InvalidAddress(String),

    #[error("error opening video source `{0}`")]
    SourceUnavailable(String),

    #[error("{thread}: queue `{queue}` disconnected")]
    ChannelClosed {
        thread: &'static str,
        queue: &'static str,
    },

    #[error("{0} panicked")]
    ThreadPanicked(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
