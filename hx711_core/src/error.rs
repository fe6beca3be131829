use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum Error {
    /// The converter never pulled the data line low within the
    /// configured window. A stuck bus is not self-healing, so this is
    /// never retried internally.
    #[error("data-ready timeout")]
    Timeout,
    #[error("invalid mode: {0}")]
    InvalidMode(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
