use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArqError>;

#[derive(Error, Debug)]
pub enum ArqError {
    /// `send` was called while `can_send` is false.
    #[error("window full: next sequence {next_sequence} outside [{window_base}, {window_base}+{window_size})")]
    WindowFull {
        window_base: u32,
        next_sequence: u32,
        window_size: u32,
    },

    #[error("sequence space exhausted")]
    SequenceExhausted,

    #[error("corruption rate {0} is not a probability in [0, 1]")]
    InvalidCorruptionRate(f64),

    #[error("frame {sequence} still corrupted after {transmissions} transmissions")]
    RetriesExhausted { sequence: u32, transmissions: u32 },

    #[error("window size {window_size} is too small, at least {required} needed")]
    WindowTooSmall { window_size: u32, required: u32 },

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("link closed by peer")]
    LinkClosed,

    #[error("session task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
