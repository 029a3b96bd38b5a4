use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed offset {0:?}")]
    MalformedOffset(String),

    #[error("unknown placement {0:?}")]
    UnknownPlacement(String),

    #[error("unknown theme {0:?}")]
    UnknownTheme(String),
}

pub type Result<T> = std::result::Result<T, Error>;
